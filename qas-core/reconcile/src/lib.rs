//! QAS 结果回填
//!
//! 读取 Playwright JSON 报告 (`--reporter=json`)，递归遍历 suite 树，
//! 从 spec 标题的 `[ID]` 前缀 (或 `case-id` 注解) 提取用例编号与执行结果，
//! 再按编号合并回测试套件。
//!
//! 报告解析失败时整个导入失败，不会产生部分修改。

pub mod merge;
pub mod outcome;
pub mod report;

pub use merge::{merge, reconcile, reconcile_report, Reconciliation};
pub use outcome::{
    extract_outcomes, parse_bracketed_id, ExecutionOutcome, OutcomeMap, CASE_ID_ANNOTATION,
    FAIL_MESSAGE, PASS_MESSAGE,
};
pub use report::{Annotation, ReportNode, ResultError, SpecEntry, SpecTest, TestResult};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("执行报告解析失败: {0}")]
    ImportParseFailure(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
