//! 场景分组
//!
//! 分组是位置性的: 只比较相邻用例的 `scenario_group`，
//! 两段不相邻但文本相同的区间视为两个独立分组。输入顺序即权威顺序，不做排序。

use qas_model::TestCase;
use std::collections::HashMap;

/// 一个最大连续同场景区间
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRun {
    pub start_index: usize,
    pub len: usize,
    pub key: String,
}

impl GroupRun {
    /// 区间结束位置 (不含)
    pub fn end_index(&self) -> usize {
        self.start_index + self.len
    }

    /// 是否需要在表格中合并单元格
    pub fn needs_merge(&self) -> bool {
        self.len >= 2
    }
}

/// 计算分组区间
///
/// 结果恰好划分 `[0, cases.len())`: 无空隙、无重叠。空输入返回空列表。
pub fn compute_runs(cases: &[TestCase]) -> Vec<GroupRun> {
    let mut runs = Vec::new();
    let mut run_start = 0;

    for i in 1..=cases.len() {
        let closes = i == cases.len() || cases[i].scenario_group != cases[run_start].scenario_group;
        if closes {
            runs.push(GroupRun {
                start_index: run_start,
                len: i - run_start,
                key: cases[run_start].scenario_group.clone(),
            });
            run_start = i;
        }
    }

    runs
}

/// 区间起始行 -> 行跨度，用于终端表格渲染
pub fn run_span_map(runs: &[GroupRun]) -> HashMap<usize, usize> {
    runs.iter().map(|r| (r.start_index, r.len)).collect()
}
