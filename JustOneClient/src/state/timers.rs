// JustOneClient/src/state/timers.rs

//! 回合计时器：作用域任务句柄 (`TimerSlot`) 以及三个计时任务的启动函数。
//!
//! 每个计时槽最多持有一个 tokio 任务。获取新任务之前总会先释放旧任务；
//! 取消一个空槽是无操作；槽被丢弃时也会中止其任务，因此任何退出路径都不会遗留
//! 仍在重复触发的回调。

use log::debug;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::event::{RoundTimerEvent, TimerEventSender};

/// 长按揭示单词所需的默认时长。
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(500);
/// 长按进度动画的默认帧间隔（约 60fps）。
pub const DEFAULT_HOLD_FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// 倒计时的步长。
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// 会话持有的作用域任务句柄。
#[derive(Debug, Default)]
pub struct TimerSlot {
    handle: Option<JoinHandle<()>>,
    /// 每次取消或替换都会递增，用于识别过期事件。
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 槽中是否持有任务句柄（任务可能已经自然结束但尚未被会话确认）。
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 先释放旧任务，再用当前代次启动新任务。
    pub fn acquire<F>(&mut self, spawn: F)
    where
        F: FnOnce(u64) -> JoinHandle<()>,
    {
        self.cancel();
        self.handle = Some(spawn(self.generation));
    }

    /// 中止并清空。返回是否确实中止了一个任务。
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// 任务已自然结束：清空句柄，使之后的同代事件失效。
    pub fn finish(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.handle = None;
    }

    /// 该事件代次是否属于当前持有的任务。
    pub fn accepts(&self, generation: u64) -> bool {
        self.handle.is_some() && self.generation == generation
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// 启动倒计时任务：每个 `tick` 发送一次剩余秒数，归零后发送结束事件。
///
/// 必须在 tokio 运行时上下文中调用。
pub fn spawn_countdown(
    generation: u64,
    seconds: u32,
    tick: Duration,
    tx: TimerEventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + tick, tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut remaining = seconds;
        while remaining > 0 {
            interval.tick().await;
            remaining -= 1;
            if tx.send(RoundTimerEvent::CountdownTick { generation, remaining }).is_err() {
                debug!("[回合计时] 事件接收端已关闭，倒计时任务提前退出。");
                return;
            }
        }
        let _ = tx.send(RoundTimerEvent::CountdownFinished { generation });
    })
}

/// 启动一次性长按计时：`duration` 后发送完成事件。
pub fn spawn_hold_timer(generation: u64, duration: Duration, tx: TimerEventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        time::sleep(duration).await;
        let _ = tx.send(RoundTimerEvent::HoldCompleted { generation });
    })
}

/// 启动长按进度动画：每帧按已经过时间占 `duration` 的比例发送进度，到 100 为止。
pub fn spawn_hold_frames(
    generation: u64,
    duration: Duration,
    frame_interval: Duration,
    tx: TimerEventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let started = Instant::now();
        let mut frames = time::interval_at(started + frame_interval, frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            frames.tick().await;
            let percent = hold_percent(started.elapsed(), duration);
            if tx.send(RoundTimerEvent::HoldProgress { generation, percent }).is_err() {
                return;
            }
            if percent >= 100 {
                return;
            }
        }
    })
}

/// 已长按时间对应的进度百分比，截断在 0-100。
pub fn hold_percent(elapsed: Duration, duration: Duration) -> u8 {
    if duration.is_zero() {
        return 100;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    (ratio * 100.0).clamp(0.0, 100.0) as u8
}
