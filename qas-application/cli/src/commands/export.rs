//! 投影导出命令

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::common::{load_session, print_written, write_text};
use crate::config::AppConfig;
use crate::ExportAction;

pub fn handle(config: &AppConfig, action: ExportAction) -> Result<()> {
    match action {
        ExportAction::Excel {
            suite,
            output,
            sheet,
        } => export_excel(config, &suite, output, sheet),
        ExportAction::Script { suite, output_dir } => export_script(config, &suite, output_dir),
        ExportAction::Json { suite, output } => export_raw(config, &suite, output.as_deref(), false),
        ExportAction::Yaml { suite, output } => export_raw(config, &suite, output.as_deref(), true),
    }
}

fn export_excel(
    config: &AppConfig,
    suite: &Path,
    output: Option<PathBuf>,
    sheet: Option<String>,
) -> Result<()> {
    let session = load_session(config, suite)?;
    let path = output.unwrap_or_else(|| config.output_path(&config.export.workbook_name));
    let sheet = sheet.unwrap_or_else(|| config.export.sheet_name.clone());

    super::common::ensure_parent(&path)?;
    if session
        .write_workbook(&path, &sheet)
        .with_context(|| format!("写入 Excel 失败: {:?}", path))?
    {
        print_written("Excel 工作簿", &path);
    }
    Ok(())
}

fn export_script(config: &AppConfig, suite: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let session = load_session(config, suite)?;
    let dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());

    let Some(script) = session.script() else {
        return Ok(());
    };
    let script_path = dir.join(&config.export.script_name);
    write_text(&script_path, &script)?;
    print_written("Playwright 脚本", &script_path);

    let manifest_path = dir.join(&config.export.manifest_name);
    write_text(&manifest_path, &session.manifest())?;
    print_written("package.json", &manifest_path);

    println!(
        "\n运行: npm install && npx playwright test {} --reporter=json > results.json",
        config.export.script_name
    );
    Ok(())
}

fn export_raw(config: &AppConfig, suite: &Path, output: Option<&Path>, yaml: bool) -> Result<()> {
    let session = load_session(config, suite)?;
    let text = if yaml {
        session.raw_yaml()?
    } else {
        session.raw_json()?
    };
    let Some(text) = text else {
        return Ok(());
    };

    match output {
        Some(path) => {
            write_text(path, &text)?;
            print_written(if yaml { "YAML" } else { "JSON" }, path);
        }
        None => println!("{}", text),
    }
    Ok(())
}
