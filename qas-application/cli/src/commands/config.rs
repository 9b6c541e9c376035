//! 配置管理命令

use anyhow::Result;
use colored::Colorize;
use qas_generator::resolve_api_key;

use super::common::print_written;
use crate::config::AppConfig;
use crate::ConfigAction;

pub fn handle(config: &AppConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(config),
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("配置文件已存在: {:?} (使用 --force 覆盖)", path);
            }
            AppConfig::default().save_to_file(&path)?;
            print_written("配置文件", &path);
            Ok(())
        }
    }
}

fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);

    let key_state = if resolve_api_key(&config.generator.api_key_env).is_some() {
        "已设置".green()
    } else {
        "未设置".red()
    };
    println!(
        "\n# API Key ({}): {}",
        config.generator.api_key_env, key_state
    );
    if let Err(e) = config.validate() {
        println!("{} {}", "✗".red(), e);
    }
    Ok(())
}
