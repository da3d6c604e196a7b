//! `JustOneClient` 猜词派对游戏客户端的核心逻辑。
//!
//! - `state`: 会话状态与回合计时器。
//! - `identity`: 客户端 ID 的生成与持久化。
//! - `app`: 持有会话的根控制器。
//! - `config` / `error` / `event` / `transport`: 配置、错误、计时事件与传输层句柄。
//! - `logging`: 日志服务初始化。

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod identity;
pub mod logging;
pub mod state;
pub mod transport;

pub use app::GameClient;
pub use state::Session;
