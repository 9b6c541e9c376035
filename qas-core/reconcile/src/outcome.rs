//! 从报告树提取 `用例编号 -> 执行结果` 映射

use qas_model::Status;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::report::{ReportNode, SpecEntry, TestResult};

/// 通过时的实际结果文本
pub const PASS_MESSAGE: &str = "Đạt (Playwright)";

/// 失败时的实际结果文本
pub const FAIL_MESSAGE: &str = "Thất bại";

/// 错误信息前缀
const ERROR_SEPARATOR: &str = " | Lỗi: ";

/// 错误信息缺失时的占位
const UNKNOWN_ERROR: &str = "Unknown error";

/// 错误首行最大字符数
const MAX_ERROR_CHARS: usize = 200;

/// 记录用例编号的注解类型，与脚本生成时写入的一致
pub const CASE_ID_ANNOTATION: &str = "case-id";

/// 单个用例的执行结果，状态只会是 Pass 或 Fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub id: String,
    pub status: Status,
    pub message: String,
}

impl ExecutionOutcome {
    fn from_result(id: &str, result: &TestResult) -> Self {
        let passed = result.status.as_deref() == Some("passed");
        let (status, base) = if passed {
            (Status::Pass, PASS_MESSAGE)
        } else {
            (Status::Fail, FAIL_MESSAGE)
        };

        let mut message = base.to_string();
        if let Some(error) = &result.error {
            message.push_str(ERROR_SEPARATOR);
            message.push_str(&error_first_line(error.message.as_deref()));
        }

        Self {
            id: id.to_string(),
            status,
            message,
        }
    }
}

fn error_first_line(message: Option<&str>) -> String {
    let first = message
        .and_then(|m| m.lines().next())
        .map(str::trim_end)
        .unwrap_or("");

    if first.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    first.chars().take(MAX_ERROR_CHARS).collect()
}

/// 提取结果，同一编号以最后处理的为准
#[derive(Debug, Clone, Default)]
pub struct OutcomeMap {
    outcomes: HashMap<String, ExecutionOutcome>,
    /// 无法解析出编号的 spec 数
    pub skipped_untagged: usize,
    /// 没有执行结果的 spec 数
    pub skipped_without_result: usize,
}

impl OutcomeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, outcome: ExecutionOutcome) {
        if let Some(previous) = self.outcomes.insert(outcome.id.clone(), outcome) {
            debug!("报告中编号重复，覆盖之前的结果: {}", previous.id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&ExecutionOutcome> {
        self.outcomes.get(id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.outcomes.keys().map(String::as_str)
    }
}

fn bracket_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\[(.*?)\]").ok())
        .as_ref()
}

/// 解析标题开头的 `[ID]`
///
/// 括号内文本原样返回，不去除空白；空白或空的编号视为无编号。
pub fn parse_bracketed_id(title: &str) -> Option<&str> {
    bracket_pattern()?
        .captures(title)?
        .get(1)
        .map(|m| m.as_str())
        .filter(|id| !id.trim().is_empty())
}

fn resolve_id(spec: &SpecEntry) -> Option<&str> {
    spec.annotated_id(CASE_ID_ANNOTATION)
        .or_else(|| parse_bracketed_id(&spec.title))
}

/// 递归遍历报告树，先处理当前节点的 specs，再处理子 suites
pub fn extract_outcomes(report: &ReportNode) -> OutcomeMap {
    let mut map = OutcomeMap::new();
    walk(report, &mut map);
    debug!(
        "提取执行结果: {} 条, 无编号 {} 条, 无结果 {} 条",
        map.len(),
        map.skipped_untagged,
        map.skipped_without_result
    );
    map
}

fn walk(node: &ReportNode, map: &mut OutcomeMap) {
    for spec in &node.specs {
        let Some(id) = resolve_id(spec) else {
            trace!("跳过无编号的 spec: {}", spec.title);
            map.skipped_untagged += 1;
            continue;
        };

        let Some(result) = spec.first_result() else {
            trace!("跳过无执行结果的 spec: {}", spec.title);
            map.skipped_without_result += 1;
            continue;
        };

        map.insert(ExecutionOutcome::from_result(id, result));
    }

    for child in &node.suites {
        walk(child, map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> ReportNode {
        ReportNode::from_json_str(json).unwrap()
    }

    #[test]
    fn test_parse_bracketed_id() {
        assert_eq!(parse_bracketed_id("[RG_01] Đăng ký"), Some("RG_01"));
        assert_eq!(parse_bracketed_id("[A] [B] x"), Some("A"));
        assert_eq!(parse_bracketed_id("RG_01 Đăng ký"), None);
        assert_eq!(parse_bracketed_id(" [RG_01] leading space"), None);
        assert_eq!(parse_bracketed_id("[] empty"), None);
        assert_eq!(parse_bracketed_id("[   ] blank"), None);
    }

    #[test]
    fn test_bracketed_id_keeps_inner_whitespace() {
        assert_eq!(parse_bracketed_id("[ RG_01 ] x"), Some(" RG_01 "));

        let map = extract_outcomes(&report(
            r#"{"specs": [{"title": "[ RG_01 ] x", "tests": [{"results": [{"status": "passed"}]}]}]}"#,
        ));
        assert!(map.get("RG_01").is_none());
        assert_eq!(map.ids().collect::<Vec<_>>(), vec![" RG_01 "]);
    }

    #[test]
    fn test_passed_outcome() {
        let map = extract_outcomes(&report(
            r#"{"specs": [{"title": "[RG_01] a", "tests": [{"results": [{"status": "passed"}]}]}]}"#,
        ));
        let outcome = map.get("RG_01").unwrap();
        assert_eq!(outcome.status, Status::Pass);
        assert_eq!(outcome.message, "Đạt (Playwright)");
    }

    #[test]
    fn test_failed_outcome_with_error() {
        let map = extract_outcomes(&report(
            r#"{"suites": [{"suites": [{"specs": [{"title": "[LG_01] b", "tests": [{"results": [
                {"status": "failed", "error": {"message": "Timeout 30000ms exceeded\n  at line 2"}}
            ]}]}]}]}]}"#,
        ));
        let outcome = map.get("LG_01").unwrap();
        assert_eq!(outcome.status, Status::Fail);
        assert_eq!(outcome.message, "Thất bại | Lỗi: Timeout 30000ms exceeded");
    }

    #[test]
    fn test_other_status_is_fail() {
        let map = extract_outcomes(&report(
            r#"{"specs": [{"title": "[X_01] t", "tests": [{"results": [{"status": "timedOut"}]}]}]}"#,
        ));
        assert_eq!(map.get("X_01").unwrap().message, "Thất bại");
    }

    #[test]
    fn test_error_without_message() {
        let map = extract_outcomes(&report(
            r#"{"specs": [{"title": "[X_01] t", "tests": [{"results": [{"status": "failed", "error": {}}]}]}]}"#,
        ));
        assert_eq!(map.get("X_01").unwrap().message, "Thất bại | Lỗi: Unknown error");
    }

    #[test]
    fn test_error_first_line_capped() {
        let long = "x".repeat(500);
        assert_eq!(error_first_line(Some(&long)).chars().count(), 200);
        assert_eq!(error_first_line(Some("\nsecond")), "Unknown error");
    }

    #[test]
    fn test_annotation_takes_precedence() {
        let map = extract_outcomes(&report(
            r#"{"specs": [{"title": "[OLD_01] renamed", "tests": [{
                "annotations": [{"type": "case-id", "description": "NEW_01"}],
                "results": [{"status": "passed"}]
            }]}]}"#,
        ));
        assert!(map.get("NEW_01").is_some());
        assert!(map.get("OLD_01").is_none());
    }

    #[test]
    fn test_skips_untagged_and_missing_results() {
        let map = extract_outcomes(&report(
            r#"{"specs": [
                {"title": "no id", "tests": [{"results": [{"status": "passed"}]}]},
                {"title": "[SK_01] skipped", "tests": [{"results": []}]},
                {"title": "[SK_02] no tests", "tests": []}
            ]}"#,
        ));
        assert!(map.is_empty());
        assert_eq!(map.skipped_untagged, 1);
        assert_eq!(map.skipped_without_result, 2);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        // 当前节点的 spec 先于子 suite 处理
        let map = extract_outcomes(&report(
            r#"{
                "specs": [{"title": "[D_01] first", "tests": [{"results": [{"status": "passed"}]}]}],
                "suites": [{"specs": [{"title": "[D_01] second", "tests": [{"results": [{"status": "failed"}]}]}]}]
            }"#,
        ));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("D_01").unwrap().status, Status::Fail);
    }
}
