//! 命令公共工具

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use qas_model::TestSuite;
use qas_session::SuiteSession;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::AppConfig;

/// 创建带提示信息的 spinner
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// 读取套件文件并装入新会话
pub fn load_session(config: &AppConfig, path: &Path) -> Result<SuiteSession> {
    let suite = TestSuite::from_json_file(path)
        .with_context(|| format!("加载测试套件失败: {:?}", path))?;

    let mut session = SuiteSession::new().with_regroup(config.suite.regroup_scenarios);
    session.install(suite);
    Ok(session)
}

/// 写入文本文件，必要时创建父目录
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).with_context(|| format!("写入文件失败: {:?}", path))
}

/// 创建父目录
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("创建目录失败: {:?}", parent))?;
    }
    Ok(())
}

/// 打印 "已写入" 提示
pub fn print_written(label: &str, path: &Path) {
    println!("{} {}: {}", "✓".green().bold(), label, path.display().to_string().cyan());
}
