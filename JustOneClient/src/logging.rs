// JustOneClient/src/logging.rs

//! 日志服务初始化。
//!
//! 日志必须在加载配置之前就绪，否则配置加载过程中的警告会被丢弃。因此分两步：
//! 先以 `RUST_LOG`（未设置时为全部级别）初始化 env_logger，
//! 配置加载完成后再用配置中的级别收紧全局最大级别。

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::AppConfig;

/// 初始化 env_logger。应在程序启动后最先调用。
pub fn init_logger() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .parse_default_env()
        .try_init()
        .context("初始化 env_logger 日志服务失败")
}

/// 配置加载完成后应用配置中的日志级别。设置了 `RUST_LOG` 时以环境变量为准，不做修改。
pub fn apply_config_level(config: &AppConfig) {
    let env_set = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some_and(|v| !v.is_empty());
    if let Some(level) = configured_max_level(config, env_set) {
        log::set_max_level(level);
    }
}

/// 应当设置的全局最大级别；环境变量优先时返回 `None`。
pub fn configured_max_level(config: &AppConfig, env_filter_set: bool) -> Option<LevelFilter> {
    if env_filter_set {
        None
    } else {
        Some(config.level_filter())
    }
}
