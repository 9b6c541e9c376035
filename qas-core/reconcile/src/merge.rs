//! 合并执行结果到测试套件

use qas_model::TestSuite;
use tracing::{info, warn};

use crate::outcome::{extract_outcomes, OutcomeMap};
use crate::report::ReportNode;
use crate::Result;

/// 一次回填的结果
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// 合并后的新套件
    pub suite: TestSuite,
    /// 报告中提取到的结果数
    pub outcome_count: usize,
    /// 被更新的用例编号，按套件顺序
    pub updated: Vec<String>,
    /// 报告中存在但套件中没有的编号，已排序
    pub unmatched: Vec<String>,
}

/// 按编号替换 `status` 与 `actual_result`，未匹配的用例保持原样
///
/// 不修改传入的套件。
pub fn merge(suite: &TestSuite, outcomes: &OutcomeMap) -> TestSuite {
    let mut merged = suite.clone();
    for case in merged.cases.iter_mut() {
        if let Some(outcome) = outcomes.get(&case.id) {
            case.status = outcome.status;
            case.actual_result = outcome.message.clone();
        }
    }
    merged
}

/// 解析报告文本并回填。解析失败时返回错误，原套件不受影响
pub fn reconcile(suite: &TestSuite, report_text: &str) -> Result<Reconciliation> {
    let report = ReportNode::from_json_str(report_text)?;
    Ok(reconcile_report(suite, &report))
}

/// 用已解析的报告回填
pub fn reconcile_report(suite: &TestSuite, report: &ReportNode) -> Reconciliation {
    let outcomes = extract_outcomes(report);

    let updated: Vec<String> = suite
        .cases
        .iter()
        .filter(|c| outcomes.get(&c.id).is_some())
        .map(|c| c.id.clone())
        .collect();

    let mut unmatched: Vec<String> = outcomes
        .ids()
        .filter(|id| suite.find_case(id).is_none())
        .map(str::to_string)
        .collect();
    unmatched.sort();

    if !unmatched.is_empty() {
        warn!("报告中有 {} 个编号在套件中不存在: {:?}", unmatched.len(), unmatched);
    }

    let merged = merge(suite, &outcomes);
    info!(
        "回填完成: {} 个 spec, 提取 {} 条, 更新 {} 个用例",
        report.spec_count(),
        outcomes.len(),
        updated.len()
    );

    Reconciliation {
        suite: merged,
        outcome_count: outcomes.len(),
        updated,
        unmatched,
    }
}
