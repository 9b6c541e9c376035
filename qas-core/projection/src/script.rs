//! Playwright 脚本投影
//!
//! 每个 `HTTP_SMOKE` / `UI_E2E` 用例生成一个 `test(...)` 块，标题固定为
//! `[<id>] <title>`。回填执行结果时依赖这个方括号前缀，格式不能改动。
//! 用例 ID 同时以 `case-id` 注解的形式写入测试元数据。

use qas_model::{AutomationPlan, TestCase, TestSuite};
use std::fmt::Write;
use tracing::debug;

/// 测试注解类型，值为用例 ID
pub const CASE_ID_ANNOTATION: &str = "case-id";

/// 固定的 package.json
pub const PLAYWRIGHT_MANIFEST: &str = r#"{
  "name": "qa-automation-suite",
  "version": "1.0.0",
  "scripts": {
    "test": "playwright test",
    "report": "playwright show-report"
  },
  "devDependencies": {
    "@playwright/test": "^1.42.0",
    "@types/node": "^20.11.0"
  }
}"#;

/// 转义为 JS 单引号字符串内容
fn js_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// 转义为 JS 模板字符串内容
fn js_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// 多行文本逐行写成注释
fn push_comment_lines(out: &mut String, first_prefix: &str, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        let line = line.trim_end_matches('\r');
        if i == 0 {
            let _ = writeln!(out, "    // {}{}", first_prefix, line);
        } else {
            let _ = writeln!(out, "    // {}", line);
        }
    }
}

/// 生成单个测试块，非自动化用例返回 `None`
fn test_block(case: &TestCase) -> Option<String> {
    let automation = case.automation.as_ref()?;
    let plan = automation.plan();
    if plan == AutomationPlan::None {
        return None;
    }

    let mut block = String::new();
    let _ = writeln!(
        block,
        "  test('[{}] {}', {{ annotation: {{ type: '{}', description: '{}' }} }}, async ({{ page, request }}) => {{",
        js_single_quoted(&case.id),
        js_single_quoted(&case.title),
        CASE_ID_ANNOTATION,
        js_single_quoted(&case.id),
    );

    for step in case.steps_lines() {
        let _ = writeln!(block, "    // {}", step);
    }
    push_comment_lines(&mut block, "Expected: ", &case.expected_result);

    match plan {
        AutomationPlan::HttpSmoke { method, url_path } => {
            let _ = writeln!(
                block,
                "    const response = await request.{}(`${{BASE_URL}}{}`);",
                method.request_fn(),
                js_template(url_path)
            );
            block.push_str("    expect(response.status()).toBe(200);\n");
        }
        AutomationPlan::UiE2e { notes: Some(notes) } => {
            // AI 提供的代码片段原样写入，不解析也不校验
            block.push_str("    // Implementation Code:\n");
            let _ = writeln!(block, "    {}", notes);
        }
        AutomationPlan::UiE2e { notes: None } => {
            block.push_str("    // TODO: Write manual steps here\n");
        }
        AutomationPlan::None => {}
    }

    block.push_str("  });\n\n");
    Some(block)
}

/// 生成 Playwright 测试模块源码
pub fn generate_script(suite: &TestSuite) -> String {
    let mut script = String::new();
    script.push_str("import { test, expect } from '@playwright/test';\n\n");
    let _ = writeln!(script, "const BASE_URL = '{}';\n", js_single_quoted(&suite.base_url));
    let _ = writeln!(script, "test.describe('{}', () => {{\n", js_single_quoted(&suite.title));
    script.push_str("  test.beforeEach(async ({ page }) => {\n");
    script.push_str("    await page.goto(BASE_URL);\n");
    script.push_str("  });\n\n");

    let mut emitted = 0;
    for block in suite.cases.iter().filter_map(test_block) {
        script.push_str(&block);
        emitted += 1;
    }

    script.push_str("});");
    debug!("生成 Playwright 脚本: {} 个测试块", emitted);
    script
}

/// 生成固定的项目描述文件 (package.json)，与套件内容无关
pub fn generate_manifest() -> String {
    PLAYWRIGHT_MANIFEST.to_string()
}
