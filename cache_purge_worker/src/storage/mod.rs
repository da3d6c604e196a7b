// cache_purge_worker/src/storage/mod.rs

//! worker 依赖的能力接口及其实现。
//!
//! - `CacheStorage`: 具名缓存的枚举与删除。
//! - `ClientsHandle`: 接管已打开的应用实例。
//! - `WorkerRegistration`: worker 自身的注册信息（跳过等待、注销）。
//!
//! `dir` 子模块提供基于文件系统的实现，`memory` 子模块提供内存实现（测试与演示用）。

use std::future::Future;

use crate::error::PurgeError;

pub mod dir;
pub mod memory;

/// 具名缓存存储。
pub trait CacheStorage: Send + Sync {
    /// 列出当前所有缓存的名称。
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, PurgeError>> + Send;

    /// 删除指定名称的缓存。返回 `Ok(false)` 表示该缓存本就不存在。
    fn delete(&self, name: &str) -> impl Future<Output = Result<bool, PurgeError>> + Send;
}

/// 已打开的应用实例集合。
pub trait ClientsHandle: Send + Sync {
    /// 立即接管所有已打开的实例，返回被接管的数量。
    fn claim(&self) -> impl Future<Output = Result<usize, PurgeError>> + Send;
}

/// worker 的注册信息。
pub trait WorkerRegistration: Send + Sync {
    /// 跳过常规等待期，立即进入激活阶段。
    fn skip_waiting(&self) -> impl Future<Output = Result<(), PurgeError>> + Send;

    /// 注销自身，之后不再运行。返回 `Ok(false)` 表示此前已经注销。
    fn unregister(&self) -> impl Future<Output = Result<bool, PurgeError>> + Send;
}
