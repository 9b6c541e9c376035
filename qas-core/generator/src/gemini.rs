//! Gemini 生产者

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::prompt::build_prompt;
use crate::{GenerateError, Result, SuiteProducer};

/// API Key 主环境变量缺失时尝试的备用变量
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API 基础 URL
    pub api_base: String,

    /// 模型名称
    pub model: String,

    /// API Key，缺失时在生成前报错
    pub api_key: Option<String>,

    /// 请求超时（秒）
    pub timeout_secs: u64,

    /// 是否启用 Google 搜索工具
    pub search_grounding: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            api_key: None,
            timeout_secs: 120,
            search_grounding: true,
        }
    }
}

/// 从环境变量读取 API Key，主变量为空时回退到 `GEMINI_API_KEY`
pub fn resolve_api_key(env_name: &str) -> Option<String> {
    [env_name, FALLBACK_API_KEY_ENV]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn request_body(target_url: &str, search_grounding: bool) -> GeminiRequest {
    let prompt = build_prompt(target_url);
    let tools = if search_grounding {
        vec![serde_json::json!({ "googleSearch": {} })]
    } else {
        Vec::new()
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: prompt.combined(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
        },
        tools,
    }
}

/// 第一个候选的全部文本片段拼接，去掉可能的 Markdown 代码围栏
fn extract_payload(response: GeminiResponse) -> Result<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let payload = strip_code_fence(text.trim());
    if payload.is_empty() {
        return Err(GenerateError::GenerationFailure(
            "AI 服务未返回任何内容".to_string(),
        ));
    }
    Ok(payload.to_string())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// 基于 Gemini generateContent 接口的生产者
pub struct GeminiProducer {
    config: GeneratorConfig,
    http_client: Client,
}

impl GeminiProducer {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::GenerationFailure(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerateError::MissingCredential)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model.trim()
        )
    }
}

#[async_trait]
impl SuiteProducer for GeminiProducer {
    async fn generate(&self, target_url: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let endpoint = self.endpoint();
        let body = request_body(target_url, self.config.search_grounding);

        info!("请求 AI 生成测试套件: {} (模型 {})", target_url, self.config.model);

        let response = self
            .http_client
            .post(&endpoint)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::GenerationFailure(format!("请求失败: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("AI 服务返回错误状态: {}", status);
            return Err(GenerateError::GenerationFailure(format!(
                "API 错误 ({}): {}",
                status, text
            )));
        }

        let envelope: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::GenerationFailure(format!("响应解析失败: {}", e.without_url())))?;

        let payload = extract_payload(envelope)?;
        debug!("AI 响应长度: {} 字节", payload.len());
        Ok(payload)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
