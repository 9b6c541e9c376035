//! 套件会话

use qas_generator::{GenerateError, SuiteProducer};
use qas_model::{ModelError, StatusCounts, TestSuite};
use qas_projection::{
    compute_runs, export_json, export_yaml, generate_manifest, generate_script, project,
    write_workbook, Grid, GroupRun,
};
use qas_reconcile::{reconcile, reconcile_report, Reconciliation, ReportNode};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::{Result, SessionError};

/// 一次回填的摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// 报告中提取到的结果数
    pub outcome_count: usize,
    /// 被更新的用例编号
    pub updated: Vec<String>,
    /// 套件中不存在的编号
    pub unmatched: Vec<String>,
    /// 回填后的状态统计
    pub counts: StatusCounts,
}

/// 会话，至多持有一个测试套件
#[derive(Debug, Default)]
pub struct SuiteSession {
    suite: Option<TestSuite>,
    regroup_scenarios: bool,
}

impl SuiteSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 安装套件时是否把同一场景的用例重排为相邻
    pub fn with_regroup(mut self, regroup_scenarios: bool) -> Self {
        self.regroup_scenarios = regroup_scenarios;
        self
    }

    pub fn suite(&self) -> Option<&TestSuite> {
        self.suite.as_ref()
    }

    pub fn has_suite(&self) -> bool {
        self.suite.is_some()
    }

    /// 整体替换当前套件，返回被替换的旧套件
    pub fn install(&mut self, mut suite: TestSuite) -> Option<TestSuite> {
        if self.regroup_scenarios {
            let moved = suite.regroup();
            if moved > 0 {
                info!("按场景重排用例: 移动 {} 个位置", moved);
            }
        }

        info!("安装测试套件: {} ({} 个用例)", suite.title, suite.len());
        let previous = self.suite.replace(suite);
        if let Some(old) = &previous {
            debug!("替换旧套件: {}", old.title);
        }
        previous
    }

    /// 取出当前套件，会话变为空
    pub fn take(&mut self) -> Option<TestSuite> {
        self.suite.take()
    }

    /// 解析原始负载并安装。解析或校验失败时保留原套件
    pub fn install_from_payload(&mut self, raw: &str) -> Result<Option<TestSuite>> {
        if raw.trim().is_empty() {
            return Err(GenerateError::GenerationFailure("AI 服务返回空内容".to_string()).into());
        }

        let suite = TestSuite::from_json_str(raw).map_err(|e| {
            warn!("负载不符合测试套件结构: {}", e);
            match e {
                ModelError::SchemaViolation(msg) => GenerateError::SchemaViolation(msg).into(),
                other => SessionError::from(other),
            }
        })?;
        Ok(self.install(suite))
    }

    /// 调用生产者生成套件并安装，返回新套件
    pub async fn generate(
        &mut self,
        producer: &dyn SuiteProducer,
        target_url: &str,
    ) -> Result<&TestSuite> {
        info!("通过 {} 生成测试套件: {}", producer.name(), target_url);
        let raw = producer.generate(target_url).await?;
        self.install_from_payload(&raw)?;
        self.suite
            .as_ref()
            .ok_or_else(|| GenerateError::GenerationFailure("套件未安装".to_string()).into())
    }

    pub fn runs(&self) -> Option<Vec<GroupRun>> {
        self.suite.as_ref().map(|s| compute_runs(&s.cases))
    }

    pub fn grid(&self) -> Option<Grid> {
        self.suite.as_ref().map(|s| project(s, &compute_runs(&s.cases)))
    }

    pub fn script(&self) -> Option<String> {
        self.suite.as_ref().map(generate_script)
    }

    /// package.json 与套件内容无关，始终可用
    pub fn manifest(&self) -> String {
        generate_manifest()
    }

    pub fn raw_json(&self) -> Result<Option<String>> {
        match &self.suite {
            Some(suite) => Ok(Some(export_json(suite)?)),
            None => Ok(None),
        }
    }

    pub fn raw_yaml(&self) -> Result<Option<String>> {
        match &self.suite {
            Some(suite) => Ok(Some(export_yaml(suite)?)),
            None => Ok(None),
        }
    }

    /// 写出 Excel 工作簿，没有套件时不写任何文件并返回 `false`
    pub fn write_workbook<P: AsRef<Path>>(&self, path: P, sheet_name: &str) -> Result<bool> {
        let Some(grid) = self.grid() else {
            debug!("没有活动套件，跳过 Excel 导出");
            return Ok(false);
        };
        write_workbook(&grid, path, sheet_name)?;
        Ok(true)
    }

    /// 回填执行报告
    ///
    /// 报告完整解析并合并后才替换套件；失败时套件保持不变。
    pub fn import_report(&mut self, report_text: &str) -> Result<Option<ImportSummary>> {
        let Some(current) = self.suite.as_ref() else {
            debug!("没有活动套件，忽略执行报告");
            return Ok(None);
        };

        let reconciliation = reconcile(current, report_text)?;
        Ok(Some(self.apply(reconciliation)))
    }

    /// 从文件回填执行报告，语义同 [`import_report`](Self::import_report)
    pub fn import_report_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<Option<ImportSummary>> {
        let Some(current) = self.suite.as_ref() else {
            debug!("没有活动套件，忽略执行报告");
            return Ok(None);
        };

        let report = ReportNode::from_json_file(path)?;
        let reconciliation = reconcile_report(current, &report);
        Ok(Some(self.apply(reconciliation)))
    }

    fn apply(&mut self, reconciliation: Reconciliation) -> ImportSummary {
        let summary = ImportSummary {
            outcome_count: reconciliation.outcome_count,
            updated: reconciliation.updated,
            unmatched: reconciliation.unmatched,
            counts: reconciliation.suite.status_counts(),
        };

        self.suite = Some(reconciliation.suite);
        info!("执行报告已回填: 更新 {} 个用例", summary.updated.len());
        summary
    }
}
