//! 测试套件定义

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::case::{Status, TestCase};
use crate::{ModelError, Result};

/// 测试套件 (唯一数据源)
///
/// `cases` 的顺序有语义: 它决定分组相邻关系以及所有投影中的行顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    #[serde(alias = "project_title")]
    pub title: String,

    #[serde(alias = "base_url")]
    pub base_url: String,

    #[serde(default)]
    pub assumptions: Vec<String>,

    #[serde(alias = "testcases")]
    pub cases: Vec<TestCase>,
}

/// 按场景键显式分组的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioGroup {
    pub key: String,
    pub case_ids: Vec<String>,
}

/// 各状态用例数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub fail: usize,
    pub not_applicable: usize,
    pub block: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pass + self.fail + self.not_applicable + self.block
    }
}

fn is_regular_id(id: &str) -> bool {
    static PATTERN: OnceLock<Option<regex::Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| regex::Regex::new(r"^[A-Z]{2}_\d{2,}$").ok())
        .as_ref()
        .map_or(true, |re| re.is_match(id))
}

impl TestSuite {
    pub fn new(title: &str, base_url: &str) -> Self {
        Self {
            title: title.to_string(),
            base_url: base_url.to_string(),
            assumptions: Vec::new(),
            cases: Vec::new(),
        }
    }

    pub fn with_cases(mut self, cases: Vec<TestCase>) -> Self {
        self.cases = cases;
        self
    }

    /// 从 JSON 字符串解析并校验
    ///
    /// 不做任何尽力而为的修补: 结构不符或 ID 重复时整体失败。
    pub fn from_json_str(json: &str) -> Result<Self> {
        let suite: TestSuite = serde_json::from_str(json)
            .map_err(|e| ModelError::SchemaViolation(e.to_string()))?;
        suite.validate()?;
        debug!("解析测试套件成功: {} ({} 个用例)", suite.title, suite.cases.len());
        Ok(suite)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 校验不变量
    ///
    /// - 用例 ID 在套件内唯一 (回填依赖精确匹配)
    /// - ID 格式不符合 `<AA>_<NN>` 时仅记录警告
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.cases.len());
        for case in &self.cases {
            if !seen.insert(case.id.as_str()) {
                return Err(ModelError::DuplicateId(case.id.clone()));
            }
            if !is_regular_id(&case.id) {
                warn!("用例 ID 格式不规范: {}", case.id);
            }
        }
        Ok(())
    }

    pub fn find_case(&self, id: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn case_ids(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// 可生成脚本的用例数
    pub fn automated_count(&self) -> usize {
        self.cases.iter().filter(|c| c.is_automated()).count()
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for case in &self.cases {
            match case.status {
                Status::Pass => counts.pass += 1,
                Status::Fail => counts.fail += 1,
                Status::NotApplicable => counts.not_applicable += 1,
                Status::Block => counts.block += 1,
            }
        }
        counts
    }

    /// 按场景键显式分组 (键按首次出现的顺序排列)
    ///
    /// 与位置分组不同，不相邻但场景相同的用例会落入同一组。
    pub fn scenario_groups(&self) -> Vec<ScenarioGroup> {
        let mut groups: Vec<ScenarioGroup> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for case in &self.cases {
            match index.get(case.scenario_group.as_str()) {
                Some(&i) => groups[i].case_ids.push(case.id.clone()),
                None => {
                    index.insert(case.scenario_group.as_str(), groups.len());
                    groups.push(ScenarioGroup {
                        key: case.scenario_group.clone(),
                        case_ids: vec![case.id.clone()],
                    });
                }
            }
        }

        groups
    }

    /// 按显式分组稳定重排用例，使同一场景的用例相邻
    ///
    /// 组内保持原有相对顺序，返回被移动的用例数。
    pub fn regroup(&mut self) -> usize {
        let groups = self.scenario_groups();
        let before: Vec<String> = self.cases.iter().map(|c| c.id.clone()).collect();

        // 按位置搬移，ID 重复时也不会丢失用例
        let mut slots: Vec<Option<TestCase>> =
            std::mem::take(&mut self.cases).into_iter().map(Some).collect();
        for group in &groups {
            for slot in slots.iter_mut() {
                if slot.as_ref().is_some_and(|c| c.scenario_group == group.key) {
                    self.cases.extend(slot.take());
                }
            }
        }

        let moved = before
            .iter()
            .zip(self.cases.iter())
            .filter(|(id, case)| **id != case.id)
            .count();
        if moved > 0 {
            debug!("场景重新分组: {} 组, 移动了 {} 个用例", groups.len(), moved);
        }
        moved
    }
}
