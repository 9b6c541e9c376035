//! QAS 用例生成
//!
//! 向生成式 AI 服务发送目标网站 URL 与固定指令，返回原始 JSON 文本。
//! 解析与安装由调用方负责，生成器从不直接持有测试套件。

pub mod gemini;
pub mod prompt;

pub use gemini::{resolve_api_key, GeminiProducer, GeneratorConfig, FALLBACK_API_KEY_ENV};
pub use prompt::{build_prompt, Prompt, MODULES};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("缺少 API Key，请设置环境变量 API_KEY 或 GEMINI_API_KEY")]
    MissingCredential,

    #[error("生成失败: {0}")]
    GenerationFailure(String),

    #[error("响应不符合测试套件结构: {0}")]
    SchemaViolation(String),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// 测试套件生产者
///
/// 一次请求只产生一个完整的 UTF-8 负载，不支持部分结果。
#[async_trait]
pub trait SuiteProducer: Send + Sync {
    /// 根据目标网站生成原始 JSON 文本
    async fn generate(&self, target_url: &str) -> Result<String>;

    /// 生产者名称，用于日志
    fn name(&self) -> &str {
        "producer"
    }
}
