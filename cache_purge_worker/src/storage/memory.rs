// cache_purge_worker/src/storage/memory.rs

//! 内存中的能力实现。
//!
//! 主要用于测试，也可在没有持久缓存的环境中作为占位实现。支持注入失败，
//! 以验证激活流程"记录并继续"的行为。

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex as TokioMutex;

use super::{CacheStorage, ClientsHandle, WorkerRegistration};
use crate::error::PurgeError;
use crate::fetch::{FetchRequest, FetchResponse, NetworkFetcher};

/// 内存缓存集合：缓存名 -> 已缓存的 URL 列表。
#[derive(Debug, Default)]
pub struct InMemoryCacheStorage {
    caches: TokioMutex<BTreeMap<String, Vec<String>>>,
    failing: HashSet<String>,
}

impl InMemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定的缓存名预置内容。
    pub fn with_caches<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let caches = names.into_iter().map(|n| (n.into(), Vec::new())).collect();
        Self {
            caches: TokioMutex::new(caches),
            failing: HashSet::new(),
        }
    }

    /// 让指定缓存的删除操作总是失败。
    pub fn fail_deleting(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }

    pub async fn put(&self, cache: &str, url: &str) {
        self.caches
            .lock()
            .await
            .entry(cache.to_string())
            .or_default()
            .push(url.to_string());
    }
}

impl CacheStorage for InMemoryCacheStorage {
    async fn keys(&self) -> Result<Vec<String>, PurgeError> {
        Ok(self.caches.lock().await.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<bool, PurgeError> {
        if self.failing.contains(name) {
            return Err(PurgeError::CacheDeletion {
                name: name.to_string(),
                reason: "注入的删除失败".to_string(),
            });
        }
        Ok(self.caches.lock().await.remove(name).is_some())
    }
}

/// 已打开的应用实例：实例 ID -> 是否已被 worker 接管。
#[derive(Debug, Default)]
pub struct InMemoryClients {
    clients: TokioMutex<BTreeMap<String, bool>>,
}

impl InMemoryClients {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, id: impl Into<String>) {
        self.clients.lock().await.insert(id.into(), false);
    }

    /// 返回已被接管的实例 ID。
    pub async fn controlled(&self) -> Vec<String> {
        self.clients
            .lock()
            .await
            .iter()
            .filter(|(_, controlled)| **controlled)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl ClientsHandle for InMemoryClients {
    async fn claim(&self) -> Result<usize, PurgeError> {
        let mut clients = self.clients.lock().await;
        for controlled in clients.values_mut() {
            *controlled = true;
        }
        Ok(clients.len())
    }
}

/// 内存注册信息。
#[derive(Debug)]
pub struct InMemoryRegistration {
    registered: AtomicBool,
    skipped_waiting: AtomicBool,
    fail_unregister: bool,
}

impl Default for InMemoryRegistration {
    fn default() -> Self {
        Self {
            registered: AtomicBool::new(true),
            skipped_waiting: AtomicBool::new(false),
            fail_unregister: false,
        }
    }
}

impl InMemoryRegistration {
    /// 新建一个已注册的实例。
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_unregister() -> Self {
        Self {
            fail_unregister: true,
            ..Self::default()
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    pub fn has_skipped_waiting(&self) -> bool {
        self.skipped_waiting.load(Ordering::SeqCst)
    }
}

impl WorkerRegistration for InMemoryRegistration {
    async fn skip_waiting(&self) -> Result<(), PurgeError> {
        self.skipped_waiting.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn unregister(&self) -> Result<bool, PurgeError> {
        if self.fail_unregister {
            return Err(PurgeError::UnregisterFailed("注入的注销失败".to_string()));
        }
        Ok(self.registered.swap(false, Ordering::SeqCst))
    }
}

/// 记录所有请求并返回固定响应的网络实现。
#[derive(Debug)]
pub struct RecordingFetcher {
    status: u16,
    body: Vec<u8>,
    calls: AtomicUsize,
    seen: TokioMutex<Vec<FetchRequest>>,
}

impl RecordingFetcher {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
            seen: TokioMutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<FetchRequest> {
        self.seen.lock().await.clone()
    }
}

impl NetworkFetcher for RecordingFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, PurgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().await.push(request);
        Ok(FetchResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
