// JustOneClient/src/error.rs

//! `JustOneClient` 的自定义错误类型。
//!
//! 会话本身的逻辑从不失败（`validate` 只返回描述列表）；这里只定义身份存储相关的错误。
//! 配置加载和命令行入口使用 `anyhow` 附加上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 客户端身份存储错误。
#[derive(Error, Debug)]
pub enum IdentityError {
    /// 无法读取存储文件。
    #[error("读取身份存储 {path:?} 失败: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 无法写入存储文件。
    #[error("写入身份存储 {path:?} 失败: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 存储文件不是合法的 JSON 键值表。
    #[error("身份存储 {path:?} 内容损坏: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 序列化存储内容失败。
    #[error("序列化身份存储失败: {0}")]
    Serialization(#[from] serde_json::Error),
}
