//! Excel 工作簿写入
//!
//! 将 [`Grid`] 写成单工作表的 `.xlsx`，合并区域原样写入。

use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

use crate::spreadsheet::{Grid, MergeRegion, COLUMN_COUNT, DATA_START_ROW};
use crate::Result;

/// 默认导出文件名
pub const DEFAULT_WORKBOOK_NAME: &str = "TestCases_Updated.xlsx";

/// 默认工作表名
pub const DEFAULT_SHEET_NAME: &str = "Template";

/// 各列宽度 (字符数)
const COLUMN_WIDTHS: [f64; COLUMN_COUNT] = [10.0, 22.0, 32.0, 24.0, 40.0, 20.0, 32.0, 28.0, 10.0, 10.0];

struct Formats {
    title: Format,
    header: Format,
    body: Format,
    group: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center),
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin),
            body: Format::new()
                .set_text_wrap()
                .set_align(FormatAlign::Top)
                .set_border(FormatBorder::Thin),
            group: Format::new()
                .set_bold()
                .set_text_wrap()
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
        }
    }
}

fn fill_worksheet(worksheet: &mut Worksheet, grid: &Grid) -> Result<()> {
    let formats = Formats::new();

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as ColNum, *width)?;
    }

    for (row, cells) in grid.cells.iter().enumerate() {
        let format = match row {
            0 => &formats.title,
            r if r < DATA_START_ROW => &formats.header,
            _ => &formats.body,
        };
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string_with_format(row as RowNum, col as ColNum, value, format)?;
        }
    }

    // 合并区域最后写入，首个单元格保留原文字
    for region in &grid.merges {
        let text = grid.cell(region.first_row, region.first_col).unwrap_or("");
        let format = if region.first_row == 0 {
            &formats.title
        } else {
            &formats.group
        };
        merge(worksheet, region, text, format)?;
    }

    Ok(())
}

fn merge(worksheet: &mut Worksheet, region: &MergeRegion, text: &str, format: &Format) -> Result<()> {
    worksheet.merge_range(
        region.first_row as RowNum,
        region.first_col as ColNum,
        region.last_row as RowNum,
        region.last_col as ColNum,
        text,
        format,
    )?;
    Ok(())
}

fn build_workbook(grid: &Grid, sheet_name: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;
    fill_worksheet(worksheet, grid)?;
    Ok(workbook)
}

/// 生成 `.xlsx` 字节内容
pub fn workbook_bytes(grid: &Grid, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(grid, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

/// 写入 `.xlsx` 文件
///
/// 先在内存中生成完整内容，工作表出错时不会留下半个文件。
pub fn write_workbook<P: AsRef<Path>>(grid: &Grid, path: P, sheet_name: &str) -> Result<()> {
    let path = path.as_ref();
    let bytes = workbook_bytes(grid, sheet_name)?;
    std::fs::write(path, &bytes)?;
    info!(
        "工作簿已写入: {:?} ({} 字节, {} 行, {} 个合并区域)",
        path,
        bytes.len(),
        grid.row_count(),
        grid.merges.len()
    );
    Ok(())
}
