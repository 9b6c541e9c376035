//! QAS CLI 应用

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "qas")]
#[command(about = "QA Suite - 测试用例生成、投影与结果回填", long_about = None)]
#[command(version)]
struct Cli {
    /// 日志级别 (默认取配置文件或 info)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 调用 AI 为目标网站生成测试套件
    Generate {
        /// 目标网站 URL
        url: String,

        /// 输出文件 (默认写入输出目录，文件名带时间戳)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 查看测试套件
    Show {
        /// 套件 JSON 文件
        suite: PathBuf,

        /// 输出格式 (table/json/yaml)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },

    /// 导出投影
    Export {
        #[command(subcommand)]
        action: ExportAction,
    },

    /// 导入 Playwright JSON 报告并回填执行结果
    Import {
        /// 套件 JSON 文件
        suite: PathBuf,

        /// Playwright JSON 报告 (--reporter=json)
        report: PathBuf,

        /// 输出文件 (默认覆盖套件文件)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 配置管理
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ExportAction {
    /// 导出 Excel 工作簿
    Excel {
        /// 套件 JSON 文件
        suite: PathBuf,

        /// 输出文件
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 工作表名称
        #[arg(long)]
        sheet: Option<String>,
    },

    /// 导出 Playwright 脚本与 package.json
    Script {
        /// 套件 JSON 文件
        suite: PathBuf,

        /// 输出目录
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// 导出缩进 JSON (未指定输出文件时打印到终端)
    Json {
        /// 套件 JSON 文件
        suite: PathBuf,

        /// 输出文件
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 导出 YAML (未指定输出文件时打印到终端)
    Yaml {
        /// 套件 JSON 文件
        suite: PathBuf,

        /// 输出文件
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// 显示当前生效的配置
    Show,

    /// 生成默认配置文件
    Init {
        /// 配置文件路径 (扩展名决定格式)
        #[arg(short, long, default_value = "qas.toml")]
        path: PathBuf,

        /// 覆盖已有文件
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 先加载配置，日志级别可能来自配置文件
    let loaded = AppConfig::load(cli.config.as_deref());
    let level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_logging(&level);

    let config = loaded?;
    if !matches!(cli.command, Commands::Config { .. }) {
        config.validate()?;
    }

    info!("QAS CLI 启动");

    match cli.command {
        Commands::Generate { url, output } => commands::generate::handle(&config, &url, output).await?,
        Commands::Show { suite, format } => commands::show::handle(&config, &suite, &format)?,
        Commands::Export { action } => commands::export::handle(&config, action)?,
        Commands::Import {
            suite,
            report,
            output,
        } => commands::import::handle(&config, &suite, &report, output)?,
        Commands::Config { action } => commands::config::handle(&config, action)?,
    }

    Ok(())
}
