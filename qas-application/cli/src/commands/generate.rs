//! 测试套件生成命令

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use qas_generator::GeminiProducer;
use qas_session::SuiteSession;
use std::path::PathBuf;

use super::common::{print_written, spinner, write_text};
use crate::config::AppConfig;

/// 默认输出文件名，带生成时间
fn default_file_name() -> String {
    format!("qas-suite-{}.json", Local::now().format("%Y%m%d-%H%M%S"))
}

pub async fn handle(config: &AppConfig, url: &str, output: Option<PathBuf>) -> Result<()> {
    let producer = GeminiProducer::new(config.generator_config())?;
    let mut session = SuiteSession::new().with_regroup(config.suite.regroup_scenarios);

    let spinner = spinner(format!("AI 正在分析 {} 并编写测试用例...", url));
    let result = session.generate(&producer, url).await;
    match &result {
        Ok(suite) => spinner.finish_with_message(format!(
            "{} 生成完成: {} ({} 个用例)",
            "✓".green().bold(),
            suite.title.cyan(),
            suite.len()
        )),
        Err(_) => spinner.finish_with_message(format!("{} 生成失败", "✗".red().bold())),
    }
    result.context("生成测试套件失败")?;

    let json = session
        .raw_json()?
        .context("会话中没有测试套件")?;
    let path = output.unwrap_or_else(|| config.output_path(&default_file_name()));
    write_text(&path, &json)?;
    print_written("测试套件", &path);

    if let Some(runs) = session.runs() {
        println!("  场景分组: {}", runs.len().to_string().yellow());
    }
    println!(
        "\n下一步: {} 查看用例, {} 导出 Excel / Playwright 脚本",
        format!("qas show {}", path.display()).cyan(),
        "qas export".cyan()
    );

    Ok(())
}
