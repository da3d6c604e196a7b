// JustOneClient/src/event.rs

//! 回合计时器发出的事件。
//!
//! 计时任务运行在 tokio 上，从不直接修改会话；它们只通过无界通道发送 `RoundTimerEvent`，
//! 由持有会话的根控制器调用 `Session::apply_timer_event` 应用。
//! 每个事件都携带其所属计时槽的代次 (`generation`)，计时槽被取消或替换后，
//! 旧代次的事件会被会话忽略。

use serde::Serialize;
use tokio::sync::mpsc;

/// 计时事件发送端。
pub type TimerEventSender = mpsc::UnboundedSender<RoundTimerEvent>;
/// 计时事件接收端。
pub type TimerEventReceiver = mpsc::UnboundedReceiver<RoundTimerEvent>;

/// 会话拥有的三个计时槽。
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerKind {
    /// 重复触发的倒计时。
    Countdown,
    /// 长按手势的一次性计时。
    Hold,
    /// 驱动长按进度动画的逐帧回调。
    HoldFrame,
}

/// 计时任务发往会话的事件。
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoundTimerEvent {
    /// 倒计时走过一秒，`remaining` 为剩余秒数。
    CountdownTick { generation: u64, remaining: u32 },
    /// 倒计时结束。
    CountdownFinished { generation: u64 },
    /// 长按进度更新（0-100）。
    HoldProgress { generation: u64, percent: u8 },
    /// 长按达到所需时长。
    HoldCompleted { generation: u64 },
}

impl RoundTimerEvent {
    /// 事件来自哪个计时槽。
    pub fn kind(&self) -> TimerKind {
        match self {
            RoundTimerEvent::CountdownTick { .. } | RoundTimerEvent::CountdownFinished { .. } => {
                TimerKind::Countdown
            }
            RoundTimerEvent::HoldProgress { .. } => TimerKind::HoldFrame,
            RoundTimerEvent::HoldCompleted { .. } => TimerKind::Hold,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            RoundTimerEvent::CountdownTick { generation, .. }
            | RoundTimerEvent::CountdownFinished { generation }
            | RoundTimerEvent::HoldProgress { generation, .. }
            | RoundTimerEvent::HoldCompleted { generation } => *generation,
        }
    }
}

/// 创建一对计时事件通道。
pub fn timer_channel() -> (TimerEventSender, TimerEventReceiver) {
    mpsc::unbounded_channel()
}
