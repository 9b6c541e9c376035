//! 生成指令
//!
//! 模块与编号前缀是固定的，回填时用例编号必须与此一致。

/// 页面模块: (越南语名称, 英文名称, 编号前缀)
pub const MODULES: [(&str, &str, &str); 9] = [
    ("Trang Đăng ký", "Register", "RG"),
    ("Trang Đăng nhập", "Login", "LG"),
    ("Trang chủ", "Home", "HM"),
    ("Trang Danh sách phim / Phân loại", "Category", "CT"),
    ("Trang Tìm kiếm", "Search", "SE"),
    ("Trang Chi tiết phim", "Movie Detail", "DT"),
    ("Trang Xem phim", "Player", "PL"),
    ("Trang Tài khoản / Hồ sơ", "Profile", "PF"),
    ("Trang 404 / Lỗi", "Error", "ER"),
];

/// 模块内排序
const SORT_ORDER: [&str; 4] = ["Happy Path", "Validation", "Negative / Edge cases", "Security"];

const OUTPUT_SCHEMA: &str = r#"{
  "title": "string (in Vietnamese)",
  "baseUrl": "string",
  "assumptions": ["string (in Vietnamese)"],
  "cases": [
    {
      "id": "RG_01 (prefix depends on module)",
      "scenarioGroup": "Trang Đăng ký (MUST BE SAME FOR ALL CASES IN MODULE)",
      "title": "string (in Vietnamese)",
      "precondition": "string (in Vietnamese)",
      "steps": "string (in Vietnamese, one step per line)",
      "testData": "string (in Vietnamese)",
      "expectedResult": "string (in Vietnamese)",
      "actualResult": "",
      "status": "N/A",
      "priority": "High|Medium|Low",
      "automation": {
        "kind": "HTTP_SMOKE|UI_E2E|NONE",
        "method": "GET|POST|NONE",
        "url_path": "string",
        "notes": "string (Playwright code snippet)"
      }
    }
  ]
}"#;

/// 系统指令与用户指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// 合并为单条用户消息
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

fn system_prompt() -> String {
    let mut text = String::from(
        "You are a Senior QA Automation Engineer and Business Analyst.\n\
         Your task is to analyze a movie streaming website URL and generate a comprehensive test suite.\n\n\
         STRICT REQUIREMENT: GROUPING & NUMBERING\n\
         You must group test cases by the following Modules (if the page exists).\n\
         For each module, use the specific ID Prefix and keep the 'scenarioGroup' field identical \
         for all cases in the group. Cases of one module must be contiguous.\n\n\
         Modules & Prefixes:\n",
    );

    for (i, (name, english, prefix)) in MODULES.iter().enumerate() {
        text.push_str(&format!("{}. {} ({}) -> Prefix: {}_xx\n", i + 1, name, english, prefix));
    }

    text.push_str("\nSort Order within each Module:\n");
    for (i, order) in SORT_ORDER.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, order));
    }

    text.push_str(
        "\nLanguage:\n\
         All content values MUST BE IN VIETNAMESE.\n\n\
         Output Schema:\n\
         Output MUST be valid JSON following the schema.\n\
         Use 'HTTP_SMOKE' for simple page loads/html checks.\n\
         Use 'UI_E2E' for complex interactions (Login, Search, Player controls).\n",
    );
    text
}

/// 构造针对目标网站的指令
pub fn build_prompt(target_url: &str) -> Prompt {
    Prompt {
        system: system_prompt(),
        user: format!(
            "Target Website: {}\n\nGenerate a JSON object with this schema:\n{}",
            target_url.trim(),
            OUTPUT_SCHEMA
        ),
    }
}
