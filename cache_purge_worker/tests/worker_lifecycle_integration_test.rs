// cache_purge_worker/tests/worker_lifecycle_integration_test.rs

use cache_purge_worker::storage::dir::{DirCacheStorage, FileRegistration};
use cache_purge_worker::storage::memory::{InMemoryCacheStorage, InMemoryClients, InMemoryRegistration};
use cache_purge_worker::{CachePurgeWorker, CacheStorage, OfflineFetcher, WorkerEvent, WorkerOutcome};
use log::{info, LevelFilter};
use std::path::PathBuf;

// 辅助函数：初始化日志，仅用于测试，避免多次初始化
fn init_test_logger() {
    let _ = env_logger::builder().filter_level(LevelFilter::Debug).is_test(true).try_init();
}

fn temp_root(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cache_purge_it_{}_{}", tag, uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_full_lifecycle_on_disk() {
    init_test_logger();

    let root = temp_root("lifecycle");
    let cache_root = root.join("caches");
    for name in ["justone-v1", "justone-v2", "fonts"] {
        tokio::fs::create_dir_all(cache_root.join(name)).await.expect("无法创建缓存目录");
        tokio::fs::write(cache_root.join(name).join("index.html"), b"<html></html>")
            .await
            .expect("无法写入缓存文件");
    }

    let registration = FileRegistration::new(root.join("worker.registered"));
    registration.register().await.expect("无法写入注册标记");

    let clients = InMemoryClients::new();
    clients.open("tab-1").await;
    clients.open("tab-2").await;

    let worker = CachePurgeWorker::new(DirCacheStorage::new(&cache_root), clients, registration, OfflineFetcher);

    assert!(matches!(worker.handle(WorkerEvent::Install).await, WorkerOutcome::Installed));
    assert!(worker.registration().has_skipped_waiting());

    let report = match worker.handle(WorkerEvent::Activate).await {
        WorkerOutcome::Activated(report) => report,
        other => panic!("意外的处理结果: {:?}", other),
    };
    info!("[Test Main] 清理报告: {:?}", report);

    assert!(report.is_clean());
    assert_eq!(report.deleted, vec!["fonts", "justone-v1", "justone-v2"]);
    assert_eq!(report.clients_claimed, 2);
    assert!(report.unregistered);

    assert!(worker.caches().keys().await.unwrap().is_empty(), "激活后不应残留任何缓存");
    assert_eq!(worker.clients().controlled().await, vec!["tab-1", "tab-2"]);
    assert!(!worker.registration().is_registered().await);

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_failed_deletion_does_not_stop_activation() {
    init_test_logger();

    let storage = InMemoryCacheStorage::with_caches(["a", "b", "c"]).fail_deleting("b");
    let clients = InMemoryClients::new();
    clients.open("only-tab").await;
    let worker = CachePurgeWorker::new(storage, clients, InMemoryRegistration::new(), OfflineFetcher);

    let report = worker.on_activate().await;

    assert_eq!(report.deleted, vec!["a", "c"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "b");
    assert!(!report.is_clean());
    // 删除失败之后仍然接管客户端并注销
    assert_eq!(report.clients_claimed, 1);
    assert!(report.unregistered);
    assert!(!worker.registration().is_registered());
    // 失败的缓存保留下来，没有回滚已删除的缓存
    assert_eq!(worker.caches().keys().await.unwrap(), vec!["b"]);
}

#[tokio::test]
async fn test_second_activation_is_harmless() {
    init_test_logger();

    let worker = CachePurgeWorker::new(
        InMemoryCacheStorage::with_caches(["old"]),
        InMemoryClients::new(),
        InMemoryRegistration::new(),
        OfflineFetcher,
    );

    let first = worker.on_activate().await;
    assert!(first.unregistered);

    let second = worker.on_activate().await;
    assert!(second.deleted.is_empty());
    assert!(!second.unregistered, "已经注销后再次激活不应报告注销");
    assert!(second.is_clean());
}
