//! `cache_purge_worker` 是一个一次性的缓存清理 worker。
//!
//! 它的唯一任务是强制清除应用此前缓存的所有版本，然后注销自身，不留任何缓存残留。
//! 与会话状态没有任何共享数据。
//!
//! 主要模块包括：
//! - `worker`: install / activate / fetch 三个生命周期钩子。
//! - `storage`: 缓存存储、客户端集合、注册信息等能力接口与实现。
//! - `fetch`: 直通网络请求的结构与网络能力接口。
//! - `error`: 统一错误类型 `PurgeError`。

pub mod error;
pub mod fetch;
pub mod storage;
pub mod worker;

pub use error::PurgeError;
pub use fetch::{FetchRequest, FetchResponse, NetworkFetcher, OfflineFetcher};
pub use storage::{CacheStorage, ClientsHandle, WorkerRegistration};
pub use worker::{CacheFailure, CachePurgeWorker, PurgeReport, WorkerEvent, WorkerOutcome};
