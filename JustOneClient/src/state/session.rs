// JustOneClient/src/state/session.rs

//! 会话状态：回合数据、当前界面、网络/身份信息、线索提交列表与计分。
//!
//! `Session` 由根控制器 (`GameClient`) 独占持有，并以引用形式传给需要它的模块；
//! 所有修改都是同步的，不需要加锁。
//!
//! 只有两个状态转换入口：`start_new_game` 与 `reset`。不变式不由它们强制，
//! 而是由 `validate` 以建议性的方式报告。

use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;

use common_models::{ClientId, SessionStatus, Submission, UserRole, ViewScreen, WordDisplay};

use super::timers::{self, TimerSlot};
use crate::event::{RoundTimerEvent, TimerEventSender, TimerKind};
use crate::transport::TransportHandle;

/// 未指定语言时使用的语言代码。
pub const DEFAULT_LANGUAGE: &str = "en";

/// 回合数据。
#[derive(Debug)]
pub struct RoundState {
    /// 当前单词，空字符串表示没有。
    pub word: String,
    /// 持词者的显示名称。
    pub word_holder_username: String,
    pub language: String,
    pub word_display: WordDisplay,
    /// 打乱后的单词列表中的当前位置。属于房间级别的连续性，`reset` 不会清除。
    pub word_index: usize,
    /// 倒计时剩余秒数。
    pub countdown_remaining: u32,
    /// 长按进度（0-100）。
    pub hold_progress: u8,
    pub is_holding: bool,
    pub(crate) countdown_timer: TimerSlot,
    pub(crate) hold_timer: TimerSlot,
    pub(crate) hold_animation_frame: TimerSlot,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            word: String::new(),
            word_holder_username: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            word_display: WordDisplay::Hidden,
            word_index: 0,
            countdown_remaining: 0,
            hold_progress: 0,
            is_holding: false,
            countdown_timer: TimerSlot::new(),
            hold_timer: TimerSlot::new(),
            hold_animation_frame: TimerSlot::new(),
        }
    }
}

impl RoundState {
    pub fn countdown_active(&self) -> bool {
        self.countdown_timer.is_active()
    }

    pub fn hold_timer_active(&self) -> bool {
        self.hold_timer.is_active()
    }

    pub fn hold_animation_active(&self) -> bool {
        self.hold_animation_frame.is_active()
    }

    /// 某类计时事件对应的计时槽。
    pub fn timer_slot(&self, kind: TimerKind) -> &TimerSlot {
        match kind {
            TimerKind::Countdown => &self.countdown_timer,
            TimerKind::Hold => &self.hold_timer,
            TimerKind::HoldFrame => &self.hold_animation_frame,
        }
    }
}

/// 界面状态。
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub current: ViewScreen,
}

/// 网络 / 身份信息。
#[derive(Debug, Default)]
pub struct NetworkState {
    pub status: SessionStatus,
    pub room_code: String,
    /// 设备级的稳定标识，首次运行时生成并持久化。
    pub client_id: ClientId,
    pub username: String,
    pub user_role: Option<UserRole>,
    /// 传输层控制器。会话只存放和清除，从不调用它。
    pub controller: Option<TransportHandle>,
}

/// 累计计分。只增不减；两个状态转换都不会修改它，也不做持久化。
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringState {
    pub total_score: u64,
    pub total_games: u64,
}

/// 客户端会话。
#[derive(Debug, Default)]
pub struct Session {
    pub game: RoundState,
    pub view: ViewState,
    pub network: NetworkState,
    pub submissions: Vec<Submission>,
    pub scoring: ScoringState,
}

/// 会话中所有纯数据字段的可序列化视图（不含计时句柄和控制器）。
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub game: RoundSnapshot,
    pub view: ViewState,
    pub network: NetworkSnapshot,
    pub submissions: Vec<Submission>,
    pub scoring: ScoringState,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub word: String,
    pub word_holder_username: String,
    pub language: String,
    pub word_display: WordDisplay,
    pub word_index: usize,
    pub countdown_remaining: u32,
    pub hold_progress: u8,
    pub is_holding: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSnapshot {
    pub status: SessionStatus,
    pub room_code: String,
    pub client_id: ClientId,
    pub username: String,
    pub user_role: Option<UserRole>,
    pub has_controller: bool,
}

impl Session {
    /// 以给定的客户端 ID 创建一个空闲会话。
    pub fn new(client_id: ClientId) -> Self {
        let mut session = Self::default();
        session.network.client_id = client_id;
        session
    }

    // --- 查询 ---

    pub fn is_offline(&self) -> bool {
        self.network.status == SessionStatus::Offline
    }

    pub fn is_in_progress(&self) -> bool {
        self.network.status == SessionStatus::InProgress
    }

    pub fn is_word_holder(&self) -> bool {
        self.network.user_role == Some(UserRole::WordHolder)
    }

    pub fn is_clue_giver(&self) -> bool {
        self.network.user_role == Some(UserRole::ClueGiver)
    }

    /// 本客户端是否已提交线索。
    pub fn has_submitted(&self) -> bool {
        self.has_submitted_by(&self.network.client_id)
    }

    pub fn has_submitted_by(&self, client_id: &ClientId) -> bool {
        self.submissions.iter().any(|s| s.is_from(client_id))
    }

    /// 本客户端的提交（若有）。
    pub fn get_own_submission(&self) -> Option<&Submission> {
        self.submissions
            .iter()
            .find(|s| s.is_from(&self.network.client_id))
    }

    /// 列出所有违反的不变式。一致时返回空列表；从不失败。
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.is_in_progress() && self.game.word.is_empty() {
            errors.push("Game in progress but no word set".to_string());
        }

        if self.is_word_holder() && !self.submissions.is_empty() {
            errors.push("Word holder should not have submissions".to_string());
        }

        if self.is_in_progress() && self.network.user_role.is_none() {
            errors.push("Game in progress but no user role assigned".to_string());
        }

        if self.network.user_role.is_some() && self.network.status == SessionStatus::Ended {
            errors.push("User role set but game is ended".to_string());
        }

        errors
    }

    // --- 状态转换 ---

    /// 进入新的一局。
    ///
    /// 不校验输入：空单词也会被接受，之后由 `validate` 报告。
    /// 不触碰界面、计时器和连接字段。
    pub fn start_new_game(&mut self, word: impl Into<String>, language: impl Into<String>, role: UserRole) {
        self.game.word = word.into();
        self.game.language = language.into();
        self.network.status = SessionStatus::InProgress;
        self.network.user_role = Some(role);
        self.submissions.clear();
        info!(
            "[会话状态] 新一局开始。角色: {}, 语言: {}, 房间: '{}'",
            role, self.game.language, self.network.room_code
        );
    }

    /// 回到空闲 / 已结束状态。
    ///
    /// 保留客户端 ID、用户名、房间号、控制器、单词索引、语言、界面与计分。
    /// 连续调用两次与调用一次的结果相同。
    pub fn reset(&mut self) {
        self.game.word.clear();
        self.game.word_holder_username.clear();
        self.game.word_display = WordDisplay::Hidden;
        self.game.countdown_remaining = 0;

        self.cleanup_timers();

        self.game.hold_progress = 0;
        self.game.is_holding = false;

        self.network.user_role = None;
        if self.network.status != SessionStatus::Offline {
            self.network.status = SessionStatus::Ended;
        }

        self.submissions.clear();
        debug!("[会话状态] 会话已重置，当前状态: {}", self.network.status);
    }

    /// 无条件释放三个计时槽。对已清空的槽是无操作。
    pub fn cleanup_timers(&mut self) {
        let mut cancelled = 0;
        for slot in [
            &mut self.game.countdown_timer,
            &mut self.game.hold_timer,
            &mut self.game.hold_animation_frame,
        ] {
            if slot.cancel() {
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            debug!("[会话状态] 已取消 {} 个回合计时任务。", cancelled);
        }
    }

    // --- 其他操作 ---

    /// 追加一条从传输层收到的线索提交。
    pub fn add_submission(&mut self, submission: Submission) {
        if self.is_word_holder() {
            warn!(
                "[会话状态] 持词者收到了来自 '{}' 的线索提交，仍按原样记录。",
                submission.username
            );
        }
        self.submissions.push(submission);
    }

    /// 把单词索引推进到列表中的下一个位置（循环）。空列表时不变。
    pub fn advance_word_index(&mut self, list_len: usize) -> usize {
        if list_len > 0 {
            self.game.word_index = (self.game.word_index + 1) % list_len;
        }
        self.game.word_index
    }

    pub fn set_controller(&mut self, controller: TransportHandle) {
        self.network.controller = Some(controller);
    }

    /// 取出控制器引用。会话不会关闭它，生命周期属于网络模块。
    pub fn take_controller(&mut self) -> Option<TransportHandle> {
        self.network.controller.take()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game: RoundSnapshot {
                word: self.game.word.clone(),
                word_holder_username: self.game.word_holder_username.clone(),
                language: self.game.language.clone(),
                word_display: self.game.word_display,
                word_index: self.game.word_index,
                countdown_remaining: self.game.countdown_remaining,
                hold_progress: self.game.hold_progress,
                is_holding: self.game.is_holding,
            },
            view: self.view.clone(),
            network: NetworkSnapshot {
                status: self.network.status,
                room_code: self.network.room_code.clone(),
                client_id: self.network.client_id.clone(),
                username: self.network.username.clone(),
                user_role: self.network.user_role,
                has_controller: self.network.controller.is_some(),
            },
            submissions: self.submissions.clone(),
            scoring: self.scoring,
        }
    }

    // --- 回合计时 ---

    /// 开始揭示倒计时。`seconds` 为 0 时立即显示单词。
    ///
    /// 必须在 tokio 运行时上下文中调用。
    pub fn start_countdown(&mut self, seconds: u32, tick: Duration, tx: &TimerEventSender) {
        if seconds == 0 {
            self.game.countdown_timer.cancel();
            self.game.countdown_remaining = 0;
            self.game.word_display = WordDisplay::Visible;
            return;
        }
        self.game.word_display = WordDisplay::Countdown;
        self.game.countdown_remaining = seconds;
        let tx = tx.clone();
        self.game
            .countdown_timer
            .acquire(|generation| timers::spawn_countdown(generation, seconds, tick, tx));
    }

    /// 按下：启动一次性长按计时与进度动画。长按进行中时重复按下被忽略。
    ///
    /// 必须在 tokio 运行时上下文中调用。
    pub fn begin_hold(&mut self, duration: Duration, frame_interval: Duration, tx: &TimerEventSender) {
        if self.game.is_holding {
            return;
        }
        self.game.is_holding = true;
        self.game.hold_progress = 0;

        let hold_tx = tx.clone();
        self.game
            .hold_timer
            .acquire(|generation| timers::spawn_hold_timer(generation, duration, hold_tx));
        let frame_tx = tx.clone();
        self.game.hold_animation_frame.acquire(|generation| {
            timers::spawn_hold_frames(generation, duration, frame_interval, frame_tx)
        });
    }

    /// 松开：长按未完成时取消并清零进度；单词已经显示时改为模糊显示。
    pub fn end_hold(&mut self) {
        if self.game.is_holding {
            self.game.hold_timer.cancel();
            self.game.hold_animation_frame.cancel();
            self.game.is_holding = false;
            self.game.hold_progress = 0;
        } else if self.game.word_display == WordDisplay::Visible {
            self.game.word_display = WordDisplay::Blurred;
        }
    }

    /// 应用一个计时事件。返回 `false` 表示事件已过期并被忽略。
    pub fn apply_timer_event(&mut self, event: RoundTimerEvent) -> bool {
        let kind = event.kind();
        if !self.game.timer_slot(kind).accepts(event.generation()) {
            debug!("[会话状态] 忽略过期的计时事件 ({:?}): {:?}", kind, event);
            return false;
        }
        match event {
            RoundTimerEvent::CountdownTick { remaining, .. } => {
                self.game.countdown_remaining = remaining;
            }
            RoundTimerEvent::CountdownFinished { .. } => {
                self.game.countdown_timer.finish();
                self.game.countdown_remaining = 0;
                self.game.word_display = WordDisplay::Visible;
            }
            RoundTimerEvent::HoldProgress { percent, .. } => {
                self.game.hold_progress = percent.min(100);
                if percent >= 100 {
                    self.game.hold_animation_frame.finish();
                }
            }
            RoundTimerEvent::HoldCompleted { .. } => {
                self.game.hold_timer.finish();
                self.game.hold_animation_frame.cancel();
                self.game.hold_progress = 100;
                self.game.is_holding = false;
                self.game.word_display = WordDisplay::Visible;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::timer_channel;

    fn own_id() -> ClientId {
        ClientId::from("11111111-1111-4111-8111-111111111111")
    }

    fn populated_session() -> Session {
        let mut session = Session::new(own_id());
        session.network.username = "alice".to_string();
        session.network.room_code = "ABCD".to_string();
        session.set_controller(TransportHandle::new(42u32));
        session.game.word_index = 7;
        session.game.word_holder_username = "bob".to_string();
        session
    }

    #[test]
    fn test_fresh_session_is_idle_and_consistent() {
        let session = Session::new(own_id());
        assert_eq!(session.network.status, SessionStatus::Ended);
        assert_eq!(session.game.language, "en");
        assert_eq!(session.view.current, ViewScreen::Menu);
        assert!(!session.is_in_progress());
        assert!(!session.is_offline());
        assert!(session.validate().is_empty());
    }

    #[test]
    fn test_start_new_game_sets_round() {
        let mut session = populated_session();
        session.view.current = ViewScreen::Word;
        session.submissions.push(Submission::new("old", ClientId::from("x"), "x"));

        session.start_new_game("apple", "fr", UserRole::ClueGiver);

        assert_eq!(session.network.status, SessionStatus::InProgress);
        assert_eq!(session.game.word, "apple");
        assert_eq!(session.game.language, "fr");
        assert_eq!(session.network.user_role, Some(UserRole::ClueGiver));
        assert!(session.submissions.is_empty());
        // 界面与连接字段不受影响
        assert_eq!(session.view.current, ViewScreen::Word);
        assert_eq!(session.network.room_code, "ABCD");
        assert!(session.validate().is_empty());
    }

    #[test]
    fn test_start_new_game_overrides_offline() {
        let mut session = populated_session();
        session.network.status = SessionStatus::Offline;
        session.start_new_game("river", "en", UserRole::WordHolder);
        assert!(session.is_in_progress());
    }

    #[test]
    fn test_reset_clears_round_and_preserves_identity() {
        let mut session = populated_session();
        let controller = session.network.controller.clone().unwrap();
        session.start_new_game("apple", "en", UserRole::ClueGiver);
        session.game.word_display = WordDisplay::Visible;
        session.game.hold_progress = 60;
        session.game.is_holding = true;
        session.scoring.total_score = 12;
        session.add_submission(Submission::new("fruit", own_id(), "alice"));

        session.reset();

        assert_eq!(session.game.word, "");
        assert_eq!(session.game.word_holder_username, "");
        assert_eq!(session.game.word_display, WordDisplay::Hidden);
        assert_eq!(session.game.hold_progress, 0);
        assert!(!session.game.is_holding);
        assert_eq!(session.network.user_role, None);
        assert_eq!(session.network.status, SessionStatus::Ended);
        assert!(session.submissions.is_empty());

        assert_eq!(session.network.client_id, own_id());
        assert_eq!(session.network.username, "alice");
        assert_eq!(session.network.room_code, "ABCD");
        assert!(session.network.controller.as_ref().unwrap().same_controller(&controller));
        assert_eq!(session.game.word_index, 7);
        assert_eq!(session.scoring.total_score, 12);
        assert!(session.validate().is_empty());
    }

    #[test]
    fn test_reset_keeps_offline() {
        let mut session = populated_session();
        session.network.status = SessionStatus::Offline;
        session.network.user_role = Some(UserRole::WordHolder);
        session.reset();
        assert!(session.is_offline());
        assert_eq!(session.network.user_role, None);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = populated_session();
        session.start_new_game("apple", "en", UserRole::WordHolder);
        session.reset();
        let once = session.snapshot();
        session.reset();
        assert_eq!(session.snapshot(), once);
    }

    #[test]
    fn test_own_submission_queries_agree() {
        let mut session = Session::new(own_id());
        assert!(!session.has_submitted());
        assert!(session.get_own_submission().is_none());

        session.add_submission(Submission::new("leaf", ClientId::from("someone-else"), "carol"));
        assert!(!session.has_submitted());
        assert!(session.get_own_submission().is_none());
        assert!(session.has_submitted_by(&ClientId::from("someone-else")));

        session.add_submission(Submission::new("green", own_id(), "alice"));
        assert!(session.has_submitted());
        assert_eq!(session.get_own_submission().map(|s| s.word.as_str()), Some("green"));
    }

    #[test]
    fn test_validate_reports_each_violation() {
        let mut session = Session::new(own_id());

        session.network.status = SessionStatus::InProgress;
        assert_eq!(
            session.validate(),
            vec![
                "Game in progress but no word set".to_string(),
                "Game in progress but no user role assigned".to_string(),
            ]
        );

        session.start_new_game("", "en", UserRole::WordHolder);
        session.submissions.push(Submission::new("clue", own_id(), "alice"));
        assert_eq!(
            session.validate(),
            vec![
                "Game in progress but no word set".to_string(),
                "Word holder should not have submissions".to_string(),
            ]
        );

        session.submissions.clear();
        session.game.word = "apple".to_string();
        session.network.status = SessionStatus::Ended;
        assert_eq!(session.validate(), vec!["User role set but game is ended".to_string()]);

        session.reset();
        assert!(session.validate().is_empty());
    }

    #[test]
    fn test_advance_word_index_wraps() {
        let mut session = Session::new(own_id());
        assert_eq!(session.advance_word_index(3), 1);
        assert_eq!(session.advance_word_index(3), 2);
        assert_eq!(session.advance_word_index(3), 0);
        assert_eq!(session.advance_word_index(0), 0);
    }

    #[test]
    fn test_controller_is_only_stored() {
        let mut session = Session::new(own_id());
        assert!(!session.snapshot().network.has_controller);
        session.set_controller(TransportHandle::new(String::from("socket")));
        assert!(session.snapshot().network.has_controller);
        let taken = session.take_controller().unwrap();
        assert_eq!(taken.downcast_ref::<String>().unwrap(), "socket");
        assert!(session.network.controller.is_none());
    }

    #[test]
    fn test_snapshot_uses_frontend_literals() {
        let mut session = populated_session();
        session.start_new_game("apple", "en", UserRole::WordHolder);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["network"]["status"], "IN_PROGRESS");
        assert_eq!(json["network"]["userRole"], "wordHolder");
        assert_eq!(json["game"]["wordDisplay"], "hidden");
        assert_eq!(json["view"]["current"], "menu");
        assert_eq!(json["scoring"]["totalGames"], 0);
    }

    #[test]
    fn test_word_holder_scenario() {
        let mut session = Session::default();
        session.start_new_game("apple", "en", UserRole::WordHolder);
        assert!(session.is_word_holder());
        assert!(!session.is_clue_giver());
        assert!(session.is_in_progress());
        assert_eq!(session.submissions.len(), 0);

        session.reset();
        assert!(!session.is_in_progress());
        assert_eq!(session.network.user_role, None);
        assert_eq!(session.game.word, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_running_timers() {
        let (tx, mut rx) = timer_channel();
        let mut session = Session::new(own_id());
        session.start_new_game("apple", "en", UserRole::WordHolder);
        session.start_countdown(3, timers::COUNTDOWN_TICK, &tx);
        session.begin_hold(timers::DEFAULT_HOLD_DURATION, timers::DEFAULT_HOLD_FRAME_INTERVAL, &tx);
        assert!(session.game.countdown_active());
        assert!(session.game.hold_timer_active());
        assert!(session.game.hold_animation_active());

        session.reset();
        assert!(!session.game.countdown_active());
        assert!(!session.game.hold_timer_active());
        assert!(!session.game.hold_animation_active());

        drop(tx);
        // 所有任务都已中止，通道随之关闭，不会有任何事件被应用
        while let Some(event) = rx.recv().await {
            assert!(!session.apply_timer_event(event), "reset 之后的事件必须被忽略");
        }
        assert_eq!(session.game.word_display, WordDisplay::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_reveals_word() {
        let (tx, mut rx) = timer_channel();
        let mut session = Session::new(own_id());
        session.start_new_game("apple", "en", UserRole::WordHolder);
        session.start_countdown(2, timers::COUNTDOWN_TICK, &tx);
        assert_eq!(session.game.word_display, WordDisplay::Countdown);
        assert_eq!(session.game.countdown_remaining, 2);

        while session.game.countdown_active() {
            let event = rx.recv().await.unwrap();
            assert!(session.apply_timer_event(event));
        }
        assert_eq!(session.game.word_display, WordDisplay::Visible);
        assert_eq!(session.game.countdown_remaining, 0);
    }

    #[test]
    fn test_zero_second_countdown_shows_immediately() {
        let (tx, _rx) = timer_channel();
        let mut session = Session::new(own_id());
        session.start_countdown(0, timers::COUNTDOWN_TICK, &tx);
        assert_eq!(session.game.word_display, WordDisplay::Visible);
        assert!(!session.game.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_to_reveal_then_release_blurs() {
        let (tx, mut rx) = timer_channel();
        let mut session = Session::new(own_id());
        session.start_new_game("apple", "en", UserRole::WordHolder);

        session.begin_hold(timers::DEFAULT_HOLD_DURATION, timers::DEFAULT_HOLD_FRAME_INTERVAL, &tx);
        assert!(session.game.is_holding);

        while session.game.is_holding {
            let event = rx.recv().await.unwrap();
            session.apply_timer_event(event);
        }
        assert_eq!(session.game.hold_progress, 100);
        assert_eq!(session.game.word_display, WordDisplay::Visible);
        assert!(!session.game.hold_timer_active());
        assert!(!session.game.hold_animation_active());

        session.end_hold();
        assert_eq!(session.game.word_display, WordDisplay::Blurred);
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_release_cancels_hold() {
        let (tx, mut rx) = timer_channel();
        let mut session = Session::new(own_id());
        session.begin_hold(timers::DEFAULT_HOLD_DURATION, timers::DEFAULT_HOLD_FRAME_INTERVAL, &tx);

        // 等到第一个进度帧
        let event = rx.recv().await.unwrap();
        assert!(session.apply_timer_event(event));
        assert!(session.game.hold_progress > 0);

        session.end_hold();
        assert!(!session.game.is_holding);
        assert_eq!(session.game.hold_progress, 0);
        assert_eq!(session.game.word_display, WordDisplay::Hidden);

        drop(tx);
        while let Some(event) = rx.recv().await {
            assert!(!session.apply_timer_event(event));
        }
        assert_eq!(session.game.hold_progress, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_events_are_routed_by_kind() {
        let (tx, _rx) = timer_channel();
        let mut session = Session::new(own_id());
        session.begin_hold(timers::DEFAULT_HOLD_DURATION, timers::DEFAULT_HOLD_FRAME_INTERVAL, &tx);
        let hold_generation = session.game.timer_slot(TimerKind::Hold).generation();

        let countdown_event = RoundTimerEvent::CountdownFinished { generation: hold_generation };
        assert_eq!(countdown_event.kind(), TimerKind::Countdown);
        // 代次相同但倒计时槽并未运行，事件不能借用长按槽的代次生效
        assert!(!session.apply_timer_event(countdown_event));
        assert_eq!(session.game.word_display, WordDisplay::Hidden);

        let hold_event = RoundTimerEvent::HoldCompleted { generation: hold_generation };
        assert_eq!(hold_event.kind(), TimerKind::Hold);
        assert!(session.apply_timer_event(hold_event));
        assert_eq!(session.game.word_display, WordDisplay::Visible);
        assert!(!session.game.timer_slot(TimerKind::HoldFrame).is_active());
    }
}
