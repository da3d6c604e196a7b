//! 通用枚举模块。
//!
//! 本模块定义了 `JustOne` 客户端各组件之间共享的枚举类型：会话连接状态、玩家角色、
//! 单词显示模式以及当前界面。
//!
//! 序列化后的字符串与前端约定的字面量保持一致（例如 `"IN_PROGRESS"`、`"wordHolder"`、`"clueIn"`），
//! 因此每个枚举都显式声明了 `serde(rename_all = ...)`。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 会话（网络层视角）的当前状态。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// 离线模式：不与房间同步，`reset` 不会把它改写为 `Ended`。
    Offline,
    /// 一局游戏正在进行。
    InProgress,
    /// 空闲 / 本局已结束。新建会话的初始状态。
    #[default]
    Ended,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Offline => "OFFLINE",
            SessionStatus::InProgress => "IN_PROGRESS",
            SessionStatus::Ended => "ENDED",
        };
        f.write_str(s)
    }
}

/// 本客户端在当前回合中被分配的角色。
///
/// "未分配" 用 `Option<UserRole>::None` 表示，而不是额外的枚举成员。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// 持词者：私下看到秘密单词，不提交线索。
    WordHolder,
    /// 线索提供者：为秘密单词写下一条线索。
    ClueGiver,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 与序列化字面量保持一致
        let s = match self {
            UserRole::WordHolder => "wordHolder",
            UserRole::ClueGiver => "clueGiver",
        };
        f.write_str(s)
    }
}

/// 秘密单词在持词者屏幕上的显示模式。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordDisplay {
    #[default]
    Hidden,
    Countdown,
    Visible,
    Blurred,
}

/// 当前显示的界面。纯 UI 路由，与回合数据没有不变式耦合。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ViewScreen {
    #[default]
    Menu,
    Word,
    ClueIn,
    Clue,
}
