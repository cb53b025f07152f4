//! 比较表数据模型
//!
//! 表格行没有固定结构，每个位置的含义取决于数据源的列布局。
//! 数值筛选使用显式的 `CellNumber`，筛选谓词对所有输入都有定义。

/// 一行表格：按文档顺序排列、已去除首尾空白的非空文本
pub type TableRow = Vec<String>;

/// 股票代码与公司名在第二列中的分隔符
pub const CODE_NAME_SEPARATOR: &str = " / ";

/// 单元格的数值解析结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellNumber {
    Parsed(f64),
    NotANumber,
}

impl CellNumber {
    /// 去掉千位分隔符后解析数值，如 "1,234.5" -> 1234.5
    pub fn parse(cell: &str) -> Self {
        match cell.replace(',', "").trim().parse::<f64>() {
            Ok(value) => CellNumber::Parsed(value),
            Err(_) => CellNumber::NotANumber,
        }
    }
}

/// 第四列筛选条件
///
/// `column_index` 为负数表示不启用；`threshold` 为空时任何值都通过
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub column_index: i32,
    pub threshold: Option<f64>,
}

impl FilterSpec {
    /// 不启用的筛选条件
    pub const fn disabled() -> Self {
        Self {
            column_index: -1,
            threshold: None,
        }
    }

    pub const fn below(column_index: i32, threshold: f64) -> Self {
        Self {
            column_index,
            threshold: Some(threshold),
        }
    }

    /// 筛选列的位置，负数返回 None
    pub fn column(&self) -> Option<usize> {
        usize::try_from(self.column_index).ok()
    }

    /// 判断一行是否通过第四列筛选
    ///
    /// 列不存在、值无法解析或没有阈值时视为通过，
    /// 否则要求数值严格小于阈值
    pub fn passes(&self, row: &[String]) -> bool {
        let Some(cell) = self.column().and_then(|idx| row.get(idx)) else {
            return true;
        };
        match (CellNumber::parse(cell), self.threshold) {
            (CellNumber::Parsed(value), Some(threshold)) => value < threshold,
            (CellNumber::Parsed(_), None) | (CellNumber::NotANumber, _) => true,
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::disabled()
    }
}

/// 最后一列筛选：数值必须为负，非数值视为通过
pub fn last_column_passes(row: &[String]) -> bool {
    match row.last().map(|cell| CellNumber::parse(cell)) {
        Some(CellNumber::Parsed(value)) => value < 0.0,
        Some(CellNumber::NotANumber) | None => true,
    }
}

/// 拆分第二列 "代码 / 公司名"
///
/// 左半部分覆盖第二列，右半部分插入为第三列，后续列依次右移。
/// 没有分隔符的行保持原样。
pub fn split_code_and_name(row: &mut TableRow) {
    if row.len() < 2 {
        return;
    }
    let Some((code, name)) = row[1].split_once(CODE_NAME_SEPARATOR) else {
        return;
    };
    let (code, name) = (code.trim().to_string(), name.trim().to_string());
    row[1] = code;
    row.insert(2, name);
}
