// cache_purge_worker/src/worker.rs

//! 缓存清理 worker 的生命周期逻辑。
//!
//! worker 只有三个钩子：
//! - **install**: 跳过等待期，立即激活。
//! - **activate**: 删除所有具名缓存 -> 接管已打开的实例 -> 注销自身。
//!   每一步的失败都只记录日志并写入 `PurgeReport`，随后继续执行，没有回滚。
//! - **fetch**: 永远直通网络，从不读取缓存。

use futures_util::future::join_all;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::error::PurgeError;
use crate::fetch::{FetchRequest, FetchResponse, NetworkFetcher};
use crate::storage::{CacheStorage, ClientsHandle, WorkerRegistration};

/// worker 可以收到的生命周期事件。
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    Fetch(FetchRequest),
}

/// 对应事件的处理结果。
#[derive(Debug)]
pub enum WorkerOutcome {
    Installed,
    Activated(PurgeReport),
    Fetched(Result<FetchResponse, PurgeError>),
}

/// 单个缓存删除失败的记录。
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CacheFailure {
    pub name: String,
    pub reason: String,
}

/// 一次激活清理的结果汇总。
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// 已删除的缓存。
    pub deleted: Vec<String>,
    /// 枚举时存在、删除时已不存在的缓存。
    pub missing: Vec<String>,
    /// 删除失败的缓存。
    pub failed: Vec<CacheFailure>,
    pub enumeration_error: Option<String>,
    pub clients_claimed: usize,
    pub claim_error: Option<String>,
    pub unregistered: bool,
    pub unregister_error: Option<String>,
}

impl PurgeReport {
    /// 所有步骤都没有出错。
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
            && self.enumeration_error.is_none()
            && self.claim_error.is_none()
            && self.unregister_error.is_none()
    }
}

/// 缓存清理 worker。
///
/// 不持有任何自身状态，所有副作用都通过注入的四个能力完成。
#[derive(Debug)]
pub struct CachePurgeWorker<S, C, R, F> {
    caches: S,
    clients: C,
    registration: R,
    fetcher: F,
}

impl<S, C, R, F> CachePurgeWorker<S, C, R, F>
where
    S: CacheStorage,
    C: ClientsHandle,
    R: WorkerRegistration,
    F: NetworkFetcher,
{
    pub fn new(caches: S, clients: C, registration: R, fetcher: F) -> Self {
        Self {
            caches,
            clients,
            registration,
            fetcher,
        }
    }

    pub fn caches(&self) -> &S {
        &self.caches
    }

    pub fn clients(&self) -> &C {
        &self.clients
    }

    pub fn registration(&self) -> &R {
        &self.registration
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// 将生命周期事件分发到对应的钩子。
    pub async fn handle(&self, event: WorkerEvent) -> WorkerOutcome {
        match event {
            WorkerEvent::Install => {
                if let Err(e) = self.on_install().await {
                    warn!("[缓存清理] install 阶段跳过等待失败: {}", e);
                }
                WorkerOutcome::Installed
            }
            WorkerEvent::Activate => WorkerOutcome::Activated(self.on_activate().await),
            WorkerEvent::Fetch(request) => WorkerOutcome::Fetched(self.on_fetch(request).await),
        }
    }

    /// install: 跳过等待期，立即进入激活阶段。
    pub async fn on_install(&self) -> Result<(), PurgeError> {
        info!("[缓存清理] install: 跳过等待期。");
        self.registration.skip_waiting().await
    }

    /// activate: 删除所有缓存，接管客户端，然后注销自身。
    ///
    /// 所有删除并发执行并全部等待完成后才进行接管与注销。
    pub async fn on_activate(&self) -> PurgeReport {
        let mut report = PurgeReport::default();

        let names = match self.caches.keys().await {
            Ok(names) => names,
            Err(e) => {
                error!("[缓存清理] 枚举缓存失败，跳过删除步骤: {}", e);
                report.enumeration_error = Some(e.to_string());
                Vec::new()
            }
        };

        let deletions = names.iter().map(|name| async move {
            info!("[缓存清理] 正在删除缓存: {}", name);
            (name.clone(), self.caches.delete(name).await)
        });

        for (name, result) in join_all(deletions).await {
            match result {
                Ok(true) => report.deleted.push(name),
                Ok(false) => {
                    debug!("[缓存清理] 缓存 '{}' 在删除前已消失。", name);
                    report.missing.push(name);
                }
                Err(e) => {
                    warn!("[缓存清理] 删除缓存 '{}' 失败: {}", name, e);
                    report.failed.push(CacheFailure {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        match self.clients.claim().await {
            Ok(count) => {
                debug!("[缓存清理] 已接管 {} 个客户端。", count);
                report.clients_claimed = count;
            }
            Err(e) => {
                error!("[缓存清理] 接管客户端失败: {}", e);
                report.claim_error = Some(e.to_string());
            }
        }

        match self.registration.unregister().await {
            Ok(was_registered) => {
                report.unregistered = was_registered;
                info!("[缓存清理] 缓存清理完成，worker 已注销。");
            }
            Err(e) => {
                error!("[缓存清理] 注销 worker 失败: {}", e);
                report.unregister_error = Some(e.to_string());
            }
        }

        report
    }

    /// fetch: 直接交给网络，从不使用缓存。
    pub async fn on_fetch(&self, request: FetchRequest) -> Result<FetchResponse, PurgeError> {
        debug!("[缓存清理] fetch 直通: {} {}", request.method, request.url);
        self.fetcher.fetch(request).await
    }
}
