//! CLI 通用输出格式化模块
//!
//! 提供 table/json/yaml 三种输出格式的通用实现

use anyhow::Result;
use serde::Serialize;

/// 单元格最大显示宽度 (字符)
const MAX_CELL_WIDTH: usize = 40;

/// 可输出为表格行的数据 trait
pub trait TableRow {
    /// 返回表格列标题
    fn headers() -> Vec<&'static str>;

    /// 返回该项的表格行数据
    fn row(&self) -> Vec<String>;

    /// 是否在该行之前打印分隔线
    fn separator_before(&self) -> bool {
        false
    }
}

/// 截断过长文本，只保留第一行
pub fn truncate(text: &str, max: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    let count = first.chars().count();
    if count <= max && first.len() == text.len() {
        return first.to_string();
    }
    let keep = max.saturating_sub(1).min(count);
    let mut out: String = first.chars().take(keep).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// 表格格式输出，列宽按内容自适应
pub fn print_table<T: TableRow>(items: &[T]) {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| item.row().iter().map(|c| truncate(c, MAX_CELL_WIDTH)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let header_line = line(headers.iter().map(|h| h.to_string()).collect());
    let rule = "-".repeat(header_line.chars().count());
    println!("{}", header_line);
    println!("{}", rule);

    for (item, row) in items.iter().zip(rows) {
        if item.separator_before() {
            println!("{}", rule);
        }
        println!("{}", line(row));
    }
}

/// JSON 格式输出
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// YAML 格式输出
pub fn print_yaml<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}

/// 根据格式参数选择输出方式，未知格式按表格输出
pub fn output_formatted<T: TableRow, S: Serialize + ?Sized>(
    rows: &[T],
    value: &S,
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json(value)?,
        "yaml" => print_yaml(value)?,
        _ => print_table(rows),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("line one\nline two", 40), "line one…");
        assert_eq!(truncate("Đăng ký thành công", 7), "Đăng k…");
    }

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("Đăng", 6), "Đăng  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
