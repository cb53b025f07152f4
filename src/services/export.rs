//! CSV 导出
//!
//! 固定表头，按插入顺序写出记录，每次运行覆盖目标文件

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use crate::config::OutputEncoding;
use crate::models::{OutputRecord, CSV_HEADER};

/// UTF-8 字节序标记
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 写出全部记录
pub fn write_records(path: &Path, encoding: OutputEncoding, records: &[OutputRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建目录失败: {}", parent.display()))?;
        }
    }

    let file = File::create(path).with_context(|| format!("无法创建文件: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    if encoding == OutputEncoding::Utf8Bom {
        out.write_all(UTF8_BOM)?;
    }

    write_csv(&mut out, records)?;
    out.flush()?;
    Ok(())
}

/// 写出表头和记录到任意 writer
pub fn write_csv<W: Write>(out: W, records: &[OutputRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
