//! 电子表格投影
//!
//! 布局:
//! - 第 0 行: 标题 (横跨全部 10 列)
//! - 第 1 行: 固定表头
//! - 第 2 行起: 每个用例一行，顺序与套件一致
//!
//! 合并区域只消费传入的分组区间，不自行判断分组。

use qas_model::{TestCase, TestSuite};
use serde::Serialize;

use crate::grouping::GroupRun;

/// 标题行前缀
pub const TITLE_BANNER: &str = "TESTCASE PROJECT - ";

/// 固定表头
pub const HEADER: [&str; COLUMN_COUNT] = [
    "No",
    "TestSenario",
    "TestCase",
    "Pre-Condition",
    "Steps",
    "Data Test",
    "Expected result",
    "Actural Result",
    "Status",
    "Priority",
];

pub const COLUMN_COUNT: usize = 10;

/// 分组列 (TestSenario)
pub const GROUP_COLUMN: usize = 1;

/// 数据行起始行号
pub const DATA_START_ROW: usize = 2;

/// 矩形合并区域 (首尾均包含)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeRegion {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl MergeRegion {
    pub fn row_span(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    pub fn col_span(&self) -> usize {
        self.last_col - self.first_col + 1
    }
}

/// 二维单元格网格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub cells: Vec<Vec<String>>,
    pub merges: Vec<MergeRegion>,
}

impl Grid {
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// 数据行数 (不含标题行和表头)
    pub fn data_row_count(&self) -> usize {
        self.cells.len().saturating_sub(DATA_START_ROW)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// 分组列上的合并区域
    pub fn group_merges(&self) -> impl Iterator<Item = &MergeRegion> {
        self.merges
            .iter()
            .filter(|m| m.first_row >= DATA_START_ROW && m.first_col == GROUP_COLUMN)
    }
}

fn case_row(case: &TestCase) -> Vec<String> {
    vec![
        case.id.clone(),
        case.scenario_group.clone(),
        case.title.clone(),
        case.precondition.clone(),
        case.steps.clone(),
        case.test_data.clone(),
        case.expected_result.clone(),
        case.actual_result.clone(),
        case.status.label().to_string(),
        case.priority.label().to_string(),
    ]
}

/// 将套件与分组区间投影为表格
pub fn project(suite: &TestSuite, runs: &[GroupRun]) -> Grid {
    let mut cells = Vec::with_capacity(suite.cases.len() + DATA_START_ROW);

    let mut title_row = vec![String::new(); COLUMN_COUNT];
    title_row[0] = format!("{}{}", TITLE_BANNER, suite.title.to_uppercase());
    cells.push(title_row);
    cells.push(HEADER.iter().map(|h| h.to_string()).collect());
    cells.extend(suite.cases.iter().map(case_row));

    // 标题行合并始终存在
    let mut merges = vec![MergeRegion {
        first_row: 0,
        first_col: 0,
        last_row: 0,
        last_col: COLUMN_COUNT - 1,
    }];

    // 长度为 1 的区间不合并，分组文字仍保留在该行
    merges.extend(runs.iter().filter(|r| r.needs_merge()).map(|r| MergeRegion {
        first_row: r.start_index + DATA_START_ROW,
        first_col: GROUP_COLUMN,
        last_row: r.start_index + r.len + DATA_START_ROW - 1,
        last_col: GROUP_COLUMN,
    }));

    Grid { cells, merges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::compute_runs;
    use qas_model::{Priority, Status};

    fn suite(groups: &[&str]) -> TestSuite {
        let cases = groups
            .iter()
            .enumerate()
            .map(|(i, g)| TestCase::new(&format!("TC_{:02}", i + 1), g, "case"))
            .collect();
        TestSuite::new("Phim demo", "https://example.com").with_cases(cases)
    }

    #[test]
    fn test_empty_suite_has_title_and_header_only() {
        let s = suite(&[]);
        let grid = project(&s, &compute_runs(&s.cases));
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.data_row_count(), 0);
        assert_eq!(grid.merges.len(), 1);
        assert_eq!(grid.merges[0].col_span(), COLUMN_COUNT);
    }

    #[test]
    fn test_title_is_uppercased_with_banner() {
        let s = suite(&["A"]);
        let grid = project(&s, &compute_runs(&s.cases));
        assert_eq!(grid.cell(0, 0), Some("TESTCASE PROJECT - PHIM DEMO"));
        assert_eq!(grid.cells[0].len(), COLUMN_COUNT);
        assert_eq!(grid.cells[1], HEADER.to_vec());
    }

    #[test]
    fn test_row_mapping_and_labels() {
        let mut s = suite(&["A"]);
        s.cases[0].status = Status::NotApplicable;
        s.cases[0].priority = Priority::High;
        s.cases[0].steps = "b1\nb2".to_string();
        let grid = project(&s, &compute_runs(&s.cases));
        assert_eq!(grid.cell(2, 0), Some("TC_01"));
        assert_eq!(grid.cell(2, 1), Some("A"));
        assert_eq!(grid.cell(2, 4), Some("b1\nb2"));
        assert_eq!(grid.cell(2, 8), Some("N/A"));
        assert_eq!(grid.cell(2, 9), Some("High"));
    }

    #[test]
    fn test_merge_spans_match_runs() {
        let s = suite(&["A", "A", "A", "B", "C", "C"]);
        let runs = compute_runs(&s.cases);
        let grid = project(&s, &runs);

        let merges: Vec<_> = grid.group_merges().copied().collect();
        assert_eq!(merges.len(), 2);
        assert_eq!((merges[0].first_row, merges[0].last_row), (2, 4));
        assert_eq!(merges[0].row_span(), 3);
        assert_eq!((merges[1].first_row, merges[1].last_row), (6, 7));

        // 单行区间的分组文字仍然存在
        assert_eq!(grid.cell(5, GROUP_COLUMN), Some("B"));
        assert_eq!(grid.data_row_count(), 6);
    }

    #[test]
    fn test_consumes_runs_as_given() {
        let s = suite(&["A", "A"]);
        // 调用方给出的区间即使与数据不符也照搬
        let runs = vec![
            GroupRun { start_index: 0, len: 1, key: "A".to_string() },
            GroupRun { start_index: 1, len: 1, key: "A".to_string() },
        ];
        let grid = project(&s, &runs);
        assert_eq!(grid.group_merges().count(), 0);
    }
}
