//! QAS 会话
//!
//! 会话是测试套件的唯一持有者。投影都是对当前快照的纯计算，
//! 生成与回填会整体替换套件，失败时保留原套件。
//!
//! 没有活动套件时，导出与回填返回 `None`，不视为错误。

pub mod session;

pub use session::{ImportSummary, SuiteSession};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Model(#[from] qas_model::ModelError),

    #[error(transparent)]
    Generate(#[from] qas_generator::GenerateError),

    #[error(transparent)]
    Projection(#[from] qas_projection::ProjectionError),

    #[error(transparent)]
    Reconcile(#[from] qas_reconcile::ReconcileError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
