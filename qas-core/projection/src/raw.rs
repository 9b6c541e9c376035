//! 原始导出

use qas_model::TestSuite;

use crate::{ProjectionError, Result};

/// 导出为缩进 JSON，字段名与数据模型一致
pub fn export_json(suite: &TestSuite) -> Result<String> {
    serde_json::to_string_pretty(suite).map_err(|e| ProjectionError::SerdeError(e.to_string()))
}

/// 导出为 YAML
pub fn export_yaml(suite: &TestSuite) -> Result<String> {
    serde_yaml::to_string(suite).map_err(|e| ProjectionError::SerdeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qas_model::{Automation, HttpMethod, TestCase};

    fn suite() -> TestSuite {
        let mut suite = TestSuite::new("Demo", "https://example.com").with_cases(vec![
            TestCase::new("HM_01", "Trang chủ", "Tải trang")
                .with_automation(Automation::http_smoke(HttpMethod::Get, "/")),
        ]);
        suite.assumptions.push("Không cần đăng nhập".to_string());
        suite
    }

    #[test]
    fn test_export_json_field_names() {
        let json = export_json(&suite()).unwrap();
        assert!(json.contains("\"baseUrl\": \"https://example.com\""));
        assert!(json.contains("\"scenarioGroup\": \"Trang chủ\""));
        assert!(json.contains("\"kind\": \"HTTP_SMOKE\""));
        assert!(json.contains("\"url_path\": \"/\""));
        assert!(json.contains('\n'));

        let parsed = TestSuite::from_json_str(&json).unwrap();
        assert_eq!(parsed, suite());
    }

    #[test]
    fn test_export_yaml() {
        let yaml = export_yaml(&suite()).unwrap();
        assert!(yaml.contains("title: Demo"));
        assert!(yaml.contains("id: HM_01"));
    }
}
