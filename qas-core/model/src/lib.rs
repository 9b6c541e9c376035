//! QAS 数据模型
//!
//! 测试套件 (`TestSuite`) 是唯一的数据源，电子表格、Playwright 脚本、
//! 原始 JSON 三种投影以及执行结果回填都只读写这一份模型。
//!
//! # 示例
//!
//! ```ignore
//! use qas_model::TestSuite;
//!
//! let suite = TestSuite::from_json_str(&payload)?;
//! for case in &suite.cases {
//!     println!("{} {}", case.id, case.title);
//! }
//! ```

pub mod case;
pub mod suite;

pub use case::{Assertion, Automation, AutomationKind, AutomationPlan, HttpMethod, Priority, Status, TestCase};
pub use suite::{ScenarioGroup, StatusCounts, TestSuite};

use thiserror::Error;

/// 模型错误类型
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("数据结构不符合测试套件模式: {0}")]
    SchemaViolation(String),

    #[error("用例 ID 重复: {0}")]
    DuplicateId(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
