//! 执行结果回填命令

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::{load_session, print_written, write_text};
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    suite: &Path,
    report: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut session = load_session(config, suite)?;

    // 解析失败时套件文件保持不变
    let Some(summary) = session
        .import_report_file(report)
        .with_context(|| format!("读取 JSON 报告失败: {:?}", report))?
    else {
        return Ok(());
    };

    println!(
        "{} 报告中提取 {} 条结果, 更新 {} 个用例",
        "✓".green().bold(),
        summary.outcome_count.to_string().yellow(),
        summary.updated.len().to_string().yellow()
    );
    if !summary.unmatched.is_empty() {
        println!(
            "{} 套件中不存在的编号: {}",
            "ℹ".yellow(),
            summary.unmatched.join(", ").bright_black()
        );
    }
    println!(
        "  Pass {}  Fail {}  Block {}  N/A {}",
        summary.counts.pass.to_string().green(),
        summary.counts.fail.to_string().red(),
        summary.counts.block,
        summary.counts.not_applicable
    );

    let json = session.raw_json()?.context("会话中没有测试套件")?;
    let path = output.unwrap_or_else(|| suite.to_path_buf());
    write_text(&path, &json)?;
    print_written("测试套件", &path);

    Ok(())
}
