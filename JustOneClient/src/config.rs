// JustOneClient/src/config.rs

//! `JustOneClient` 的配置管理模块。
//!
//! 定义客户端运行所需的配置 (`AppConfig`)，并提供从 JSON 文件加载 / 保存配置的逻辑。
//! 配置文件默认位于 `config/justone_client_config.json`，可通过环境变量
//! `JUSTONE_CONFIG` 指定其他路径。

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::DEFAULT_LANGUAGE;

/// 覆盖配置文件路径的环境变量。
pub const CONFIG_PATH_ENV: &str = "JUSTONE_CONFIG";
/// 默认配置目录。
pub const DEFAULT_CONFIG_DIR: &str = "config";
/// 默认配置文件名。
pub const DEFAULT_CONFIG_FILE: &str = "justone_client_config.json";

/// 客户端配置。
///
/// 缺失的字段取默认值，因此旧版本的配置文件仍可加载。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// 持久化键值存储文件（保存客户端 ID）。
    pub storage_path: PathBuf,
    /// 缓存根目录，每个子目录是一个具名缓存。
    pub cache_root: PathBuf,
    /// 日志级别: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`。
    pub log_level: String,
    /// 新会话使用的语言代码。
    pub default_language: String,
    /// 显示名称。
    pub username: String,
    /// 启动时加入的房间号，空字符串表示不加入。
    pub room_code: String,
    /// 揭示单词前的倒计时秒数。
    pub countdown_seconds: u32,
    /// 长按揭示所需的时长（毫秒）。
    pub hold_duration_ms: u64,
    /// 长按进度动画的帧间隔（毫秒）。
    pub hold_frame_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data").join("local_storage.json"),
            cache_root: PathBuf::from("data").join("caches"),
            log_level: "info".to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            username: String::new(),
            room_code: String::new(),
            countdown_seconds: 3,
            hold_duration_ms: 500,
            hold_frame_interval_ms: 16,
        }
    }
}

impl AppConfig {
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }

    /// 帧间隔至少 1 毫秒，避免零间隔的计时器。
    pub fn hold_frame_interval(&self) -> Duration {
        Duration::from_millis(self.hold_frame_interval_ms.max(1))
    }

    /// 解析日志级别，无法识别时退回 `Info`。
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            warn!("[客户端配置] 无法识别的日志级别 '{}'，使用 info。", self.log_level);
            log::LevelFilter::Info
        })
    }
}

/// 配置文件路径：优先使用 `JUSTONE_CONFIG` 环境变量。
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE),
    }
}

/// 加载配置。
///
/// - 文件不存在：写入默认配置并返回它。
/// - 文件内容无法解析：记录警告并返回默认配置，不覆盖原文件。
/// - 文件无法读取或默认配置无法写入：返回带上下文的错误。
pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        info!(
            "[客户端配置] 配置文件 '{}' 未找到，将使用默认配置并创建新文件。",
            path.display()
        );
        let config = AppConfig::default();
        save_app_config(path, &config)?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件 '{}'", path.display()))?;

    match serde_json::from_str::<AppConfig>(&content) {
        Ok(config) => {
            info!("[客户端配置] 已从 '{}' 加载配置。", path.display());
            Ok(config)
        }
        Err(e) => {
            warn!(
                "[客户端配置] 解析配置文件 '{}' 失败: {}。将使用默认配置（原文件保留）。",
                path.display(),
                e
            );
            Ok(AppConfig::default())
        }
    }
}

/// 以格式化 JSON 保存配置，必要时创建父目录。
pub fn save_app_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建配置目录 '{}' 失败", parent.display()))?;
        }
    }
    let content = serde_json::to_string_pretty(config).context("序列化客户端配置失败")?;
    fs::write(path, content).with_context(|| format!("写入配置文件 '{}' 失败", path.display()))?;
    info!("[客户端配置] 配置已保存至 '{}'。", path.display());
    Ok(())
}
