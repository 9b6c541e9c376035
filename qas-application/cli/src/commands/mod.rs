//! CLI 命令处理模块

pub mod common; // 公共工具函数
pub mod config;
pub mod export;
pub mod generate;
pub mod import;
pub mod output;
pub mod show;
