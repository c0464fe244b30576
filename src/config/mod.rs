//! 配置管理
//!
//! 配置来源优先级（由低到高）：内置默认值、`config.toml`、`config.{APP_ENV}.toml`、
//! `SRMS_` 前缀环境变量、常用的独立环境变量（`DATABASE_URL` 等）。

mod r#impl;
mod structs;

pub use structs::*;
