// JustOneClient/src/state/mod.rs

//! `JustOne` 客户端的会话状态管理模块。
//!
//! - `session`: 会话记录本身（回合、界面、网络、提交、计分）以及查询和状态转换。
//! - `timers`: 会话持有的三个作用域计时任务（倒计时、长按、长按动画帧）。
//!
//! 会话不是全局单例：它由根控制器 `crate::app::GameClient` 创建并独占持有，
//! 需要读取或修改它的模块通过引用获得。

pub mod session;
pub mod timers;

pub use session::{
    NetworkSnapshot, NetworkState, RoundSnapshot, RoundState, ScoringState, Session, SessionSnapshot,
    ViewState, DEFAULT_LANGUAGE,
};
pub use timers::TimerSlot;
