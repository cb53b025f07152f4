//! kabutec 比较表抓取
//!
//! 数据来源: https://www.kabutec.jp/contents/compare/com.php
//!
//! 每个 `<tr>` 中位于 `<td>` 内的文本节点各自成为一个单元格，
//! 随后依次应用第四列筛选、最后一列（负值）筛选和第二列拆分。

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::models::{last_column_passes, split_code_and_name, FilterSpec, TableRow};

use super::http::fetch_page;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to parse row selector"));

/// 抓取比较表并返回保留的行
///
/// 只有传输失败向上传递，由调度层决定如何处理；
/// 非 2xx 响应记录警告后照常解析响应体
pub async fn fetch_table(
    client: &Client,
    url: &str,
    filter: &FilterSpec,
    split_second_column: bool,
) -> Result<Vec<TableRow>, ScrapeError> {
    let page = fetch_page(client, url).await?;
    if !page.status.is_success() {
        log::warn!("比较表返回 {} ({}), 继续解析响应体", page.status, page.url);
    }
    Ok(parse_table(&page.body, filter, split_second_column))
}

/// 解析页面中所有表格行并筛选，保持文档顺序
pub fn parse_table(html: &str, filter: &FilterSpec, split_second_column: bool) -> Vec<TableRow> {
    let document = Html::parse_document(html);
    let mut output = Vec::new();
    let mut total = 0usize;

    for row in document.select(&ROW_SELECTOR) {
        let mut cells = row_cells(row);
        if cells.is_empty() {
            continue;
        }
        total += 1;

        if !(filter.passes(&cells) && last_column_passes(&cells)) {
            continue;
        }
        if split_second_column {
            split_code_and_name(&mut cells);
        }
        output.push(cells);
    }

    log::debug!("表格共 {} 行有数据, 保留 {} 行", total, output.len());
    output
}

/// 收集一行中 `<td>` 内的全部文本节点，去除空白并丢弃空串
fn row_cells(row: ElementRef<'_>) -> TableRow {
    row.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let in_cell = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != row.id())
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|element| element.name() == "td");
            in_cell.then(|| text.trim().to_string())
        })
        .filter(|cell| !cell.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::services::http::build_client;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TABLE_HTML: &str = r#"
        <html><body>
        <table>
          <tr><th>No</th><th>コード / 銘柄</th><th>RSI</th><th>騰落率</th></tr>
          <tr><td>1</td><td>7203 / トヨタ自動車</td><td>2,850</td><td>18.2</td><td>-1.5</td></tr>
          <tr><td>2</td><td>6758 / ソニーグループ</td><td>13,100</td><td>25.0</td><td>-0.8</td></tr>
          <tr><td>3</td><td>9984 / ソフトバンクG</td><td>8,000</td><td>15.0</td><td>2.3</td></tr>
          <tr><td>4</td><td>8306 / 三菱UFJ</td><td>1,500</td><td>-</td><td>—</td></tr>
          <tr><td>&nbsp;</td><td> </td></tr>
        </table>
        </body></html>
    "#;

    fn cells(r: &[&str]) -> TableRow {
        r.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_table_filters_and_splits() {
        println!("\n========== 测试比较表解析 ==========");
        let rows = parse_table(TABLE_HTML, &FilterSpec::below(3, 20.0), true);
        for r in &rows {
            println!("  {:?}", r);
        }

        assert_eq!(
            rows,
            vec![
                cells(&["1", "7203", "トヨタ自動車", "2,850", "18.2", "-1.5"]),
                cells(&["4", "8306", "三菱UFJ", "1,500", "-", "—"]),
            ]
        );
    }

    #[test]
    fn test_parse_table_disabled_filter() {
        let rows = parse_table(TABLE_HTML, &FilterSpec::disabled(), true);
        let codes: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(codes, vec!["7203", "6758", "8306"]);
    }

    #[test]
    fn test_parse_table_without_split() {
        let rows = parse_table(TABLE_HTML, &FilterSpec::disabled(), false);
        assert_eq!(rows[0], cells(&["1", "7203 / トヨタ自動車", "2,850", "18.2", "-1.5"]));
    }

    #[test]
    fn test_text_nodes_become_cells() {
        let html = r#"<table>
            <tr><td><a href="/s/7203">7203</a> 詳細</td><td><span>-2.0</span></td></tr>
            <tr><th>見出し</th><th>-9</th></tr>
        </table>"#;
        let rows = parse_table(html, &FilterSpec::disabled(), true);
        assert_eq!(rows, vec![cells(&["7203", "詳細", "-2.0"])]);
    }

    #[test]
    fn test_header_only_rows_are_skipped() {
        let html = "<table><tr><th>A</th></tr><tr><td>   </td></tr></table>";
        assert!(parse_table(html, &FilterSpec::disabled(), true).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contents/compare/com.php"))
            .and(query_param("col1", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(TABLE_HTML, "text/html; charset=utf-8"))
            .mount(&server)
            .await;

        let client = build_client(&HttpConfig::default()).unwrap();
        let url = format!("{}/contents/compare/com.php?col1=20", server.uri());
        let rows = fetch_table(&client, &url, &FilterSpec::below(3, 20.0), true).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "7203");
    }

    #[tokio::test]
    async fn test_fetch_table_parses_error_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_raw(
                "<table><tr><td>1</td><td>7203 / トヨタ</td><td>-1</td></tr></table>",
                "text/html; charset=utf-8",
            ))
            .mount(&server)
            .await;

        let client = build_client(&HttpConfig::default()).unwrap();
        let rows = fetch_table(&client, &server.uri(), &FilterSpec::disabled(), true).await.unwrap();
        assert_eq!(rows, vec![cells(&["1", "7203", "トヨタ", "-1"])]);
    }

    #[tokio::test]
    async fn test_fetch_table_connection_refused() {
        let client = build_client(&HttpConfig::default()).unwrap();
        let result = fetch_table(&client, "http://127.0.0.1:1/com.php", &FilterSpec::disabled(), true).await;
        assert!(matches!(result, Err(ScrapeError::Http(_))));
    }
}
