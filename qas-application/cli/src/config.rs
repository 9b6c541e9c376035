//! CLI 配置管理
//!
//! 优先级: 环境变量 > 配置文件 > 默认值。
//! 配置文件格式按扩展名选择 (toml / yaml / json)。

use anyhow::{Context, Result};
use qas_generator::{resolve_api_key, GeneratorConfig};
use qas_projection::{DEFAULT_SHEET_NAME, DEFAULT_WORKBOOK_NAME};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub export: ExportSection,

    #[serde(default)]
    pub suite: SuiteSection,
}

/// AI 生成配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// 存放 API Key 的环境变量名，配置文件中不保存密钥本身
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_true")]
    pub search_grounding: bool,
}

/// 导出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_workbook_name")]
    pub workbook_name: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_script_name")]
    pub script_name: String,

    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,
}

/// 套件处理配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteSection {
    /// 加载时把同一场景的用例重排为相邻
    #[serde(default)]
    pub regroup_scenarios: bool,
}

// ============================================
// 默认值函数
// ============================================

fn default_log_level() -> String {
    "info".to_string()
}
fn default_api_base() -> String {
    GeneratorConfig::default().api_base
}
fn default_model() -> String {
    GeneratorConfig::default().model
}
fn default_api_key_env() -> String {
    "API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    GeneratorConfig::default().timeout_secs
}
fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_workbook_name() -> String {
    DEFAULT_WORKBOOK_NAME.to_string()
}
fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}
fn default_script_name() -> String {
    "e2e.spec.ts".to_string()
}
fn default_manifest_name() -> String {
    "package.json".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            generator: GeneratorSection::default(),
            export: ExportSection::default(),
            suite: SuiteSection::default(),
        }
    }
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            search_grounding: default_true(),
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            workbook_name: default_workbook_name(),
            sheet_name: default_sheet_name(),
            script_name: default_script_name(),
            manifest_name: default_manifest_name(),
        }
    }
}

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

fn file_format(path: &Path) -> Result<FileFormat> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => Ok(FileFormat::Toml),
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        _ => anyhow::bail!("不支持的配置文件格式: {:?}", path),
    }
}

fn parse_as<T: DeserializeOwned>(content: &str, format: FileFormat, path: &Path) -> Result<T> {
    match format {
        FileFormat::Toml => toml::from_str(content)
            .with_context(|| format!("解析 TOML 配置失败: {:?}", path)),
        FileFormat::Yaml => serde_yaml::from_str(content)
            .with_context(|| format!("解析 YAML 配置失败: {:?}", path)),
        FileFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("解析 JSON 配置失败: {:?}", path)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// 从多个源加载配置，`explicit` 为命令行指定的文件
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // 1. 从默认值开始
        let mut config = Self::default();

        // 2. 尝试加载配置文件
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(),
        };
        if let Some(path) = path {
            tracing::debug!("加载配置文件: {:?}", path);
            config = Self::load_from_file(&path)?;
        } else {
            tracing::debug!("未找到配置文件，使用默认值");
        }

        // 3. 从环境变量覆盖
        config.apply_env_vars()?;

        Ok(config)
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        parse_as(&content, file_format(path)?, path)
    }

    /// 查找配置文件 (按优先级搜索)
    fn find_config_file() -> Option<PathBuf> {
        // 1. 环境变量指定的路径
        if let Ok(path) = env::var("QAS_CONFIG") {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
        }

        // 2. 当前目录
        let paths = [
            PathBuf::from("./qas.toml"),
            PathBuf::from("./qas.yaml"),
            PathBuf::from("./qas.json"),
        ];
        if let Some(path) = paths.iter().find(|p| p.exists()) {
            return Some(path.clone());
        }

        // 3. 用户配置目录
        Self::user_config_path().filter(|p| p.exists())
    }

    /// 用户级配置文件路径
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("qas").join("config.toml"))
    }

    /// 从环境变量覆盖配置
    fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(model) = env::var("QAS_MODEL") {
            self.generator.model = model;
        }
        if let Ok(api_base) = env::var("QAS_API_BASE") {
            self.generator.api_base = api_base;
        }
        if let Ok(dir) = env::var("QAS_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }
        if let Ok(level) = env::var("QAS_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(regroup) = env::var("QAS_REGROUP") {
            self.suite.regroup_scenarios = parse_bool(&regroup)
                .with_context(|| format!("QAS_REGROUP 取值无效: {}", regroup))?;
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if self.generator.model.trim().is_empty() {
            anyhow::bail!("generator.model 不能为空");
        }
        if self.generator.api_base.trim().is_empty() {
            anyhow::bail!("generator.api_base 不能为空");
        }
        if self.generator.timeout_secs == 0 {
            anyhow::bail!("generator.timeout_secs 必须大于 0");
        }

        let names = [
            ("export.workbook_name", &self.export.workbook_name),
            ("export.sheet_name", &self.export.sheet_name),
            ("export.script_name", &self.export.script_name),
            ("export.manifest_name", &self.export.manifest_name),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                anyhow::bail!("{} 不能为空", key);
            }
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建配置目录失败: {:?}", parent))?;
        }

        let content = self.render(file_format(path)?)?;
        fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

        Ok(())
    }

    /// 序列化为 TOML 文本
    pub fn to_toml(&self) -> Result<String> {
        self.render(FileFormat::Toml)
    }

    fn render(&self, format: FileFormat) -> Result<String> {
        match format {
            FileFormat::Toml => toml::to_string_pretty(self).context("序列化 TOML 失败"),
            FileFormat::Yaml => serde_yaml::to_string(self).context("序列化 YAML 失败"),
            FileFormat::Json => serde_json::to_string_pretty(self).context("序列化 JSON 失败"),
        }
    }

    /// 生成器配置，API Key 从环境变量读取
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            api_base: self.generator.api_base.clone(),
            model: self.generator.model.clone(),
            api_key: resolve_api_key(&self.generator.api_key_env),
            timeout_secs: self.generator.timeout_secs,
            search_grounding: self.generator.search_grounding,
        }
    }

    /// 输出目录下的文件路径
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.export.output_dir.join(file_name)
    }
}
