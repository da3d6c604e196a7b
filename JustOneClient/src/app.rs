// JustOneClient/src/app.rs

//! 根控制器 `GameClient`。
//!
//! `GameClient` 独占持有唯一的 `Session`、加载好的配置以及计时事件通道。
//! UI 层通过它读取会话查询、在回合边界调用 `start_new_game` / `reset`，
//! 并驱动计时事件的应用。

use log::{error, info};

use common_models::{ClientId, UserRole};

use crate::config::AppConfig;
use crate::event::{timer_channel, RoundTimerEvent, TimerEventReceiver, TimerEventSender};
use crate::identity::{get_or_create_client_id, IdentityStore};
use crate::state::timers::COUNTDOWN_TICK;
use crate::state::Session;

/// 应用根控制器。
#[derive(Debug)]
pub struct GameClient {
    session: Session,
    config: AppConfig,
    timer_tx: TimerEventSender,
    timer_rx: TimerEventReceiver,
}

impl GameClient {
    /// 用已知的客户端 ID 创建控制器。用户名、房间号和语言取自配置。
    pub fn new(config: AppConfig, client_id: ClientId) -> Self {
        let mut session = Session::new(client_id);
        session.game.language = config.default_language.clone();
        session.network.username = config.username.clone();
        session.network.room_code = config.room_code.clone();

        let (timer_tx, timer_rx) = timer_channel();
        info!(
            "[根控制器] 会话已创建。客户端 ID: {}, 用户名: '{}'",
            session.network.client_id, session.network.username
        );
        Self {
            session,
            config,
            timer_tx,
            timer_rx,
        }
    }

    /// 从身份存储获取客户端 ID 后创建控制器。
    ///
    /// 存储不可用时记录错误并使用一个未保存的新 ID，本次运行仍可继续。
    pub fn bootstrap<S: IdentityStore + ?Sized>(config: AppConfig, store: &mut S) -> Self {
        let client_id = match get_or_create_client_id(store) {
            Ok(id) => id,
            Err(e) => {
                error!("[根控制器] 获取持久化客户端 ID 失败，本次运行使用临时 ID: {}", e);
                ClientId::generate()
            }
        };
        Self::new(config, client_id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn start_new_game(&mut self, word: impl Into<String>, language: impl Into<String>, role: UserRole) {
        self.session.start_new_game(word, language, role);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// 按配置的秒数开始揭示倒计时。
    pub fn start_countdown(&mut self) {
        let seconds = self.config.countdown_seconds;
        self.session.start_countdown(seconds, COUNTDOWN_TICK, &self.timer_tx);
    }

    /// 按配置的时长开始长按揭示。
    pub fn begin_hold(&mut self) {
        let duration = self.config.hold_duration();
        let frame_interval = self.config.hold_frame_interval();
        self.session.begin_hold(duration, frame_interval, &self.timer_tx);
    }

    pub fn end_hold(&mut self) {
        self.session.end_hold();
    }

    /// 等待下一个计时事件并应用，返回该事件及是否被应用。
    ///
    /// 控制器自身持有发送端，因此通道不会关闭；没有运行中的计时任务时会一直等待。
    pub async fn next_timer_event(&mut self) -> Option<(RoundTimerEvent, bool)> {
        let event = self.timer_rx.recv().await?;
        let applied = self.session.apply_timer_event(event.clone());
        Some((event, applied))
    }

    /// 应用所有已到达的计时事件，返回被应用的数量（过期事件不计入）。
    pub fn drain_timer_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.timer_rx.try_recv() {
            if self.session.apply_timer_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// 会话快照的 JSON 形式，供 UI 层渲染。
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.session.snapshot())
    }
}
