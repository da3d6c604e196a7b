// JustOneClient/src/main.rs

//! `justone-client` 命令行入口。
//!
//! 子命令：
//! - `status`（默认）: 获取客户端身份并打印当前会话快照。
//! - `demo-round`: 以持词者身份走完一局（长按揭示 -> 松开 -> 重置），打印各阶段快照。
//! - `purge-caches`: 运行一次性缓存清理 worker（install -> activate），打印清理报告。

use anyhow::{bail, Context, Result};
use log::{info, warn};

use cache_purge_worker::storage::dir::{DirCacheStorage, FileRegistration};
use cache_purge_worker::storage::memory::InMemoryClients;
use cache_purge_worker::{CachePurgeWorker, OfflineFetcher, WorkerEvent, WorkerOutcome};
use common_models::UserRole;
use justone_client::config::{self, AppConfig};
use justone_client::identity::FileIdentityStore;
use justone_client::{logging, GameClient};

/// 清理 worker 的注册标记文件名（位于缓存根目录下，不会被当作缓存枚举）。
const PURGE_WORKER_MARKER: &str = ".purge-worker.registered";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logger()?;

    let config_path = config::config_path();
    let config = config::load_app_config(&config_path)?;
    logging::apply_config_level(&config);

    info!("JustOne 客户端正在启动... 配置文件: {}", config_path.display());

    let command = std::env::args().nth(1).unwrap_or_else(|| "status".to_string());
    match command.as_str() {
        "status" => run_status(config),
        "demo-round" => run_demo_round(config).await,
        "purge-caches" => run_cache_purge(&config).await,
        other => bail!("未知的子命令 '{}'。可用: status, demo-round, purge-caches", other),
    }
}

fn bootstrap_client(config: AppConfig) -> GameClient {
    let mut store = FileIdentityStore::new(config.storage_path.clone());
    GameClient::bootstrap(config, &mut store)
}

fn run_status(config: AppConfig) -> Result<()> {
    let client = bootstrap_client(config);
    println!("{}", client.snapshot_json().context("序列化会话快照失败")?);
    Ok(())
}

async fn run_demo_round(config: AppConfig) -> Result<()> {
    let mut client = bootstrap_client(config);
    let language = client.config().default_language.clone();

    client.start_new_game("apple", language, UserRole::WordHolder);
    client.begin_hold();
    while client.session().game.is_holding {
        if client.next_timer_event().await.is_none() {
            break;
        }
    }
    println!("{}", client.snapshot_json()?);

    client.end_hold();
    let violations = client.session().validate();
    if !violations.is_empty() {
        warn!("会话状态不一致: {:?}", violations);
    }
    println!("{}", client.snapshot_json()?);

    client.reset();
    println!("{}", client.snapshot_json()?);
    Ok(())
}

async fn run_cache_purge(config: &AppConfig) -> Result<()> {
    let registration = FileRegistration::new(config.cache_root.join(PURGE_WORKER_MARKER));
    registration
        .register()
        .await
        .context("写入清理 worker 注册标记失败")?;

    let clients = InMemoryClients::new();
    clients.open("justone-client-cli").await;

    let worker = CachePurgeWorker::new(
        DirCacheStorage::new(&config.cache_root),
        clients,
        registration,
        OfflineFetcher,
    );

    worker.handle(WorkerEvent::Install).await;
    match worker.handle(WorkerEvent::Activate).await {
        WorkerOutcome::Activated(report) => {
            if !report.is_clean() {
                warn!("缓存清理未完全成功，详情见报告。");
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        other => bail!("激活阶段返回了意外结果: {:?}", other),
    }
}
