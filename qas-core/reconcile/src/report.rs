//! Playwright JSON 报告结构
//!
//! 只声明回填需要的字段，其余字段忽略。

use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::{ReconcileError, Result};

/// suite 节点，可以同时包含 spec 列表和子 suite
///
/// `specs` / `suites` 缺失或为 `null` 时按空列表处理。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportNode {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specs: Vec<SpecEntry>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub suites: Vec<ReportNode>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecEntry {
    pub title: String,

    #[serde(default)]
    pub tests: Vec<SpecTest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecTest {
    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub results: Vec<TestResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestResult {
    /// passed / failed / timedOut / skipped / interrupted
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub error: Option<ResultError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ReportNode {
    /// 解析报告文本，根节点必须是 JSON 对象
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| ReconcileError::ImportParseFailure(e.to_string()))?;

        if !value.is_object() {
            return Err(ReconcileError::ImportParseFailure(
                "报告根节点不是 JSON 对象".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| ReconcileError::ImportParseFailure(e.to_string()))
    }

    /// 读取报告文件，IO 错误与解析错误分开报告
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 节点树中 spec 的总数
    pub fn spec_count(&self) -> usize {
        self.specs.len() + self.suites.iter().map(ReportNode::spec_count).sum::<usize>()
    }
}

impl SpecEntry {
    /// 第一次尝试的第一个结果
    pub fn first_result(&self) -> Option<&TestResult> {
        self.tests.first().and_then(|t| t.results.first())
    }

    /// `case-id` 注解中的用例编号
    pub fn annotated_id(&self, annotation_type: &str) -> Option<&str> {
        self.tests
            .first()?
            .annotations
            .iter()
            .find(|a| a.kind == annotation_type)
            .and_then(|a| a.description.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
