//! AI 负载解析测试

use qas_model::{AutomationKind, AutomationPlan, HttpMethod, ModelError, Priority, Status, TestSuite};

#[test]
fn test_parse_original_field_names() {
    let payload = r#"{
        "project_title": "Web xem phim",
        "base_url": "https://movie-streaming-demo.vercel.app",
        "assumptions": ["Trang có chức năng đăng ký"],
        "testcases": [{
            "No": "RG_01",
            "TestSenario": "Trang Đăng ký",
            "TestCase": "Đăng ký thành công",
            "Pre-Condition": "Chưa có tài khoản",
            "Steps": "1. Mở trang\r\n2. Nhập email",
            "Data Test": "a@b.c",
            "Expected result": "Tạo tài khoản",
            "Actural Result": "",
            "Status": "N/A",
            "Priority": "High",
            "automation": {"type": "HTTP_SMOKE", "method": "POST", "url_path": "/register"}
        }]
    }"#;

    let suite = TestSuite::from_json_str(payload).unwrap();
    assert_eq!(suite.title, "Web xem phim");
    assert_eq!(suite.assumptions.len(), 1);

    let case = &suite.cases[0];
    assert_eq!(case.scenario_group, "Trang Đăng ký");
    assert_eq!(case.precondition, "Chưa có tài khoản");
    assert_eq!(case.test_data, "a@b.c");
    assert_eq!(case.status, Status::NotApplicable);
    assert_eq!(case.priority, Priority::High);
    assert_eq!(
        case.steps_lines().collect::<Vec<_>>(),
        vec!["1. Mở trang", "2. Nhập email"]
    );

    let automation = case.automation.as_ref().unwrap();
    assert_eq!(automation.kind, AutomationKind::HttpSmoke);
    assert_eq!(
        automation.plan(),
        AutomationPlan::HttpSmoke {
            method: HttpMethod::Post,
            url_path: "/register"
        }
    );
}

#[test]
fn test_missing_required_field_is_schema_violation() {
    let payload = r#"{"title": "t", "baseUrl": "https://x", "cases": [
        {"id": "RG_01", "title": "no group", "priority": "High"}
    ]}"#;
    assert!(matches!(
        TestSuite::from_json_str(payload),
        Err(ModelError::SchemaViolation(_))
    ));
}

#[test]
fn test_unknown_enum_value_is_schema_violation() {
    let payload = r#"{"title": "t", "baseUrl": "https://x", "cases": [
        {"id": "RG_01", "scenarioGroup": "g", "title": "x", "priority": "Urgent"}
    ]}"#;
    assert!(matches!(
        TestSuite::from_json_str(payload),
        Err(ModelError::SchemaViolation(_))
    ));
}

#[test]
fn test_irregular_id_is_accepted() {
    let payload = r#"{"title": "t", "baseUrl": "https://x", "cases": [
        {"id": "login-1", "scenarioGroup": "g", "title": "x", "priority": "Low"}
    ]}"#;
    let suite = TestSuite::from_json_str(payload).unwrap();
    assert_eq!(suite.case_ids(), vec!["login-1"]);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.json");
    let suite = TestSuite::new("Demo", "https://example.com");
    std::fs::write(&path, serde_json::to_string_pretty(&suite).unwrap()).unwrap();

    assert_eq!(TestSuite::from_json_file(&path).unwrap(), suite);
    assert!(matches!(
        TestSuite::from_json_file(dir.path().join("missing.json")),
        Err(ModelError::IoError(_))
    ));
}
