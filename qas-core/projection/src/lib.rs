//! QAS 投影
//!
//! 从同一份 [`TestSuite`](qas_model::TestSuite) 派生出的只读视图:
//!
//! - **场景分组** (`grouping`): 按相邻且相同的场景切分连续区间
//! - **电子表格** (`spreadsheet` / `workbook`): 标题行 + 表头 + 数据行 + 合并区域
//! - **Playwright 脚本** (`script`): 每个可自动化用例一个 `test(...)` 块
//! - **原始导出** (`raw`): 缩进 JSON / YAML
//!
//! 投影可以随时从模型重新计算，不持有任何状态。

pub mod grouping;
pub mod raw;
pub mod script;
pub mod spreadsheet;
pub mod workbook;

pub use grouping::{compute_runs, run_span_map, GroupRun};
pub use script::{generate_manifest, generate_script, CASE_ID_ANNOTATION};
pub use raw::{export_json, export_yaml};
pub use spreadsheet::{
    project, Grid, MergeRegion, COLUMN_COUNT, DATA_START_ROW, GROUP_COLUMN, HEADER, TITLE_BANNER,
};
pub use workbook::{workbook_bytes, write_workbook, DEFAULT_SHEET_NAME, DEFAULT_WORKBOOK_NAME};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Excel 写入失败: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("序列化错误: {0}")]
    SerdeError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
