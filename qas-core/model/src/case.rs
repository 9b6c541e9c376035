//! 测试用例定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    Pass,
    Fail,
    /// 未执行 (初始值)
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
    Block,
}

impl Status {
    /// 表格中显示的文字标签
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
            Status::NotApplicable => "N/A",
            Status::Block => "Block",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 自动化类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutomationKind {
    /// 直接请求页面并检查 HTTP 状态
    HttpSmoke,
    /// 浏览器交互 (登录、搜索、播放器等)
    UiE2e,
    /// 不生成自动化代码
    None,
}

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "patch")]
    Patch,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "head")]
    Head,
    #[serde(alias = "none")]
    None,
}

impl HttpMethod {
    /// 实际发送请求时使用的方法，`NONE` 视为 `GET`
    pub fn effective(self) -> HttpMethod {
        match self {
            HttpMethod::None => HttpMethod::Get,
            other => other,
        }
    }

    /// Playwright `APIRequestContext` 上对应的方法名
    pub fn request_fn(self) -> &'static str {
        match self.effective() {
            HttpMethod::Get | HttpMethod::None => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
        }
    }
}

/// 结构化断言
///
/// 目前仅随模型保存和导出，脚本生成不消费该字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub kind: String,
    pub op: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// 自动化配置
///
/// 按原样保存 AI 返回的全部字段，通过 [`Automation::plan`] 获取按类型区分的视图。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    #[serde(alias = "type")]
    pub kind: AutomationKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "urlPath")]
    pub url_path: Option<String>,

    /// UI_E2E 的实现说明，可能直接是 Playwright 代码片段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,
}

/// 按自动化类型区分的执行计划
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationPlan<'a> {
    HttpSmoke { method: HttpMethod, url_path: &'a str },
    UiE2e { notes: Option<&'a str> },
    None,
}

impl Automation {
    pub fn http_smoke(method: HttpMethod, url_path: &str) -> Self {
        Self {
            kind: AutomationKind::HttpSmoke,
            method: Some(method),
            url_path: Some(url_path.to_string()),
            notes: None,
            assertions: Vec::new(),
        }
    }

    pub fn ui_e2e(notes: Option<&str>) -> Self {
        Self {
            kind: AutomationKind::UiE2e,
            method: None,
            url_path: None,
            notes: notes.map(str::to_string),
            assertions: Vec::new(),
        }
    }

    pub fn none() -> Self {
        Self {
            kind: AutomationKind::None,
            method: None,
            url_path: None,
            notes: None,
            assertions: Vec::new(),
        }
    }

    pub fn plan(&self) -> AutomationPlan<'_> {
        match self.kind {
            AutomationKind::HttpSmoke => AutomationPlan::HttpSmoke {
                method: self.method.unwrap_or_default().effective(),
                url_path: self.url_path.as_deref().unwrap_or(""),
            },
            AutomationKind::UiE2e => AutomationPlan::UiE2e {
                notes: self.notes.as_deref().filter(|n| !n.trim().is_empty()),
            },
            AutomationKind::None => AutomationPlan::None,
        }
    }

    /// 是否会生成可执行的测试块
    pub fn is_executable(&self) -> bool {
        !matches!(self.kind, AutomationKind::None)
    }
}

/// 测试用例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// 用例编号，例如 `RG_01`，回填执行结果时按此精确匹配
    #[serde(alias = "No")]
    pub id: String,

    /// 测试场景 (分组键)，相邻且相同的用例归为一组
    #[serde(alias = "TestSenario")]
    pub scenario_group: String,

    #[serde(alias = "TestCase")]
    pub title: String,

    #[serde(default, alias = "Pre-Condition")]
    pub precondition: String,

    /// 操作步骤，按行分隔
    #[serde(default, alias = "Steps")]
    pub steps: String,

    #[serde(default, alias = "Data Test")]
    pub test_data: String,

    #[serde(default, alias = "Expected result")]
    pub expected_result: String,

    #[serde(default, alias = "Actural Result")]
    pub actual_result: String,

    #[serde(default, alias = "Status")]
    pub status: Status,

    #[serde(alias = "Priority")]
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation: Option<Automation>,
}

impl TestCase {
    pub fn new(id: &str, scenario_group: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            scenario_group: scenario_group.to_string(),
            title: title.to_string(),
            precondition: String::new(),
            steps: String::new(),
            test_data: String::new(),
            expected_result: String::new(),
            actual_result: String::new(),
            status: Status::default(),
            priority: Priority::Medium,
            automation: None,
        }
    }

    pub fn with_steps(mut self, steps: &str) -> Self {
        self.steps = steps.to_string();
        self
    }

    pub fn with_expected(mut self, expected: &str) -> Self {
        self.expected_result = expected.to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_automation(mut self, automation: Automation) -> Self {
        self.automation = Some(automation);
        self
    }

    /// 按行拆分的步骤
    pub fn steps_lines(&self) -> impl Iterator<Item = &str> {
        self.steps.split('\n').map(|line| line.trim_end_matches('\r'))
    }

    /// 是否会出现在生成的脚本中
    pub fn is_automated(&self) -> bool {
        self.automation
            .as_ref()
            .map(Automation::is_executable)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Pass.label(), "Pass");
        assert_eq!(Status::NotApplicable.to_string(), "N/A");
        assert_eq!(Status::default(), Status::NotApplicable);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&Status::NotApplicable).unwrap(), "\"N/A\"");
        let status: Status = serde_json::from_str("\"Block\"").unwrap();
        assert_eq!(status, Status::Block);
    }

    #[test]
    fn test_method_none_defaults_to_get() {
        assert_eq!(HttpMethod::None.effective(), HttpMethod::Get);
        assert_eq!(HttpMethod::None.request_fn(), "get");
        assert_eq!(HttpMethod::Post.request_fn(), "post");
    }

    #[test]
    fn test_automation_accepts_type_alias() {
        let json = r#"{"type": "HTTP_SMOKE", "method": "GET", "url_path": "/login"}"#;
        let automation: Automation = serde_json::from_str(json).unwrap();
        assert_eq!(automation.kind, AutomationKind::HttpSmoke);
        assert_eq!(
            automation.plan(),
            AutomationPlan::HttpSmoke {
                method: HttpMethod::Get,
                url_path: "/login"
            }
        );
    }

    #[test]
    fn test_http_smoke_without_method() {
        let json = r#"{"kind": "HTTP_SMOKE", "url_path": "/"}"#;
        let automation: Automation = serde_json::from_str(json).unwrap();
        match automation.plan() {
            AutomationPlan::HttpSmoke { method, .. } => assert_eq!(method, HttpMethod::Get),
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn test_ui_e2e_blank_notes() {
        let automation = Automation::ui_e2e(Some("   "));
        assert_eq!(automation.plan(), AutomationPlan::UiE2e { notes: None });
    }

    #[test]
    fn test_case_original_field_names() {
        let json = r#"{
            "No": "LG_01",
            "TestSenario": "Trang Đăng nhập",
            "TestCase": "Đăng nhập thành công",
            "Pre-Condition": "Có tài khoản",
            "Steps": "Mở trang\nNhập thông tin",
            "Data Test": "user/pass",
            "Expected result": "Vào trang chủ",
            "Actural Result": "",
            "Status": "N/A",
            "Priority": "High"
        }"#;
        let case: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.id, "LG_01");
        assert_eq!(case.scenario_group, "Trang Đăng nhập");
        assert_eq!(case.priority, Priority::High);
        assert_eq!(case.steps_lines().count(), 2);
        assert!(!case.is_automated());
    }

    #[test]
    fn test_case_serializes_canonical_names() {
        let case = TestCase::new("RG_01", "Đăng ký", "Đăng ký thành công");
        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["id"], "RG_01");
        assert_eq!(value["scenarioGroup"], "Đăng ký");
        assert_eq!(value["actualResult"], "");
        assert_eq!(value["status"], "N/A");
        assert!(value.get("automation").is_none());
    }

    #[test]
    fn test_steps_lines_crlf() {
        let case = TestCase::new("HM_01", "Home", "Load").with_steps("a\r\nb");
        let lines: Vec<_> = case.steps_lines().collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
