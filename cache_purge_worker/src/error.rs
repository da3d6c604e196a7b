// cache_purge_worker/src/error.rs

//! 定义缓存清理 worker 相关的错误类型。

use thiserror::Error;

/// 缓存清理 worker 的统一错误类型。
///
/// 激活流程中的单步失败只会被记录到日志和 `PurgeReport`，不会中断后续步骤；
/// 这里的错误主要由各个能力实现（缓存存储、注册信息、网络直通）返回。
#[derive(Error, Debug)]
pub enum PurgeError {
    /// 无法列出现有的缓存名称。
    #[error("枚举缓存失败: {0}")]
    CacheEnumeration(String),

    /// 删除某个具名缓存失败。
    #[error("删除缓存 '{name}' 失败: {reason}")]
    CacheDeletion { name: String, reason: String },

    /// 缓存名称不合法（例如包含路径分隔符）。
    #[error("无效的缓存名称: '{0}'")]
    InvalidCacheName(String),

    /// 接管已打开的客户端失败。
    #[error("接管客户端失败: {0}")]
    ClaimFailed(String),

    /// 注销 worker 注册信息失败。
    #[error("注销失败: {0}")]
    UnregisterFailed(String),

    /// 直通网络请求失败。
    #[error("网络请求失败: {0}")]
    FetchFailed(String),

    /// 底层 I/O 错误。
    #[error("I/O错误: {0}")]
    IoError(#[from] std::io::Error),
}
