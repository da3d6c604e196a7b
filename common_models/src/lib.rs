//! `common_models` 公共模型库 crate。
//!
//! 本 crate 集中定义了 `JustOne` 客户端各组件之间共享的核心数据结构和枚举类型：
//! - **通用枚举 (`enums`)**: 会话状态、玩家角色、单词显示模式、当前界面。
//! - **客户端标识 (`client_id`)**: 每台设备持久化的 v4 UUID 标识符。
//! - **线索提交 (`submission`)**: 提交列表中的单条记录。
//!
//! 所有模型都派生 `Serialize`/`Deserialize`/`Debug`/`Clone`，序列化字面量与前端约定一致。

pub mod client_id;
pub mod enums;
pub mod submission;

pub use client_id::ClientId;
pub use enums::{SessionStatus, UserRole, ViewScreen, WordDisplay};
pub use submission::Submission;
