//! 套件查看命令

use anyhow::Result;
use colored::Colorize;
use qas_model::{AutomationPlan, StatusCounts, TestCase};
use qas_projection::run_span_map;
use std::path::Path;

use super::common::load_session;
use super::output::{output_formatted, TableRow};
use crate::config::AppConfig;

/// 表格中的一行，场景只在分组的第一行显示
struct CaseRow<'a> {
    case: &'a TestCase,
    group_span: Option<usize>,
    first: bool,
}

fn automation_label(case: &TestCase) -> String {
    match case.automation.as_ref().map(|a| a.plan()) {
        Some(AutomationPlan::HttpSmoke { method, url_path }) => {
            format!("HTTP {} {}", method.request_fn().to_uppercase(), url_path)
        }
        Some(AutomationPlan::UiE2e { .. }) => "UI_E2E".to_string(),
        Some(AutomationPlan::None) | None => "-".to_string(),
    }
}

impl TableRow for CaseRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["No", "TestSenario", "TestCase", "Status", "Priority", "Automation"]
    }

    fn row(&self) -> Vec<String> {
        let group = match self.group_span {
            Some(1) => self.case.scenario_group.clone(),
            Some(span) => format!("{} ({})", self.case.scenario_group, span),
            None => String::new(),
        };
        vec![
            self.case.id.clone(),
            group,
            self.case.title.clone(),
            self.case.status.label().to_string(),
            self.case.priority.label().to_string(),
            automation_label(self.case),
        ]
    }

    fn separator_before(&self) -> bool {
        self.group_span.is_some() && !self.first
    }
}

fn print_counts(counts: &StatusCounts) {
    println!(
        "\n状态统计: {} {}  {} {}  {} {}  {} {}  (共 {})",
        "Pass".green(),
        counts.pass,
        "Fail".red(),
        counts.fail,
        "Block".yellow(),
        counts.block,
        "N/A".bright_black(),
        counts.not_applicable,
        counts.total()
    );
}

pub fn handle(config: &AppConfig, path: &Path, format: &str) -> Result<()> {
    let session = load_session(config, path)?;
    let Some(suite) = session.suite() else {
        return Ok(());
    };

    if format != "table" {
        return output_formatted::<CaseRow, _>(&[], suite, format);
    }

    let spans = run_span_map(&session.runs().unwrap_or_default());
    let rows: Vec<CaseRow> = suite
        .cases
        .iter()
        .enumerate()
        .map(|(i, case)| CaseRow {
            case,
            group_span: spans.get(&i).copied(),
            first: i == 0,
        })
        .collect();

    println!("\n{} {}", "📋".cyan(), suite.title.bold());
    println!("  Base URL: {}", suite.base_url.cyan());
    if !suite.assumptions.is_empty() {
        println!("  假设:");
        for assumption in &suite.assumptions {
            println!("    - {}", assumption.bright_black());
        }
    }
    println!(
        "  用例: {}  可自动化: {}\n",
        suite.len().to_string().yellow(),
        suite.automated_count().to_string().yellow()
    );

    output_formatted(&rows, suite, format)?;
    print_counts(&suite.status_counts());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qas_model::{Automation, HttpMethod};

    #[test]
    fn test_group_cell_only_on_run_start() {
        let case = TestCase::new("RG_01", "Đăng ký", "a");
        let start = CaseRow { case: &case, group_span: Some(2), first: true };
        let inner = CaseRow { case: &case, group_span: None, first: false };

        assert_eq!(start.row()[1], "Đăng ký (2)");
        assert_eq!(inner.row()[1], "");
        assert!(!start.separator_before());
        assert!(!inner.separator_before());
    }

    #[test]
    fn test_automation_label() {
        let case = TestCase::new("HM_01", "Home", "x")
            .with_automation(Automation::http_smoke(HttpMethod::None, "/phim"));
        assert_eq!(automation_label(&case), "HTTP GET /phim");
        assert_eq!(automation_label(&TestCase::new("A_01", "g", "t")), "-");
    }
}
