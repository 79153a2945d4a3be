//! 应用配置
//!
//! 配置来源按优先级从低到高：`config.toml`、`config.{APP_ENV}.toml`、
//! `ONLINECOURSE_*` 环境变量以及少量约定俗成的环境变量。

mod r#impl;
mod structs;

pub use structs::*;
