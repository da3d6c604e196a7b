//! 客户端标识符模型。
//!
//! 客户端 ID 是每台设备首次运行时生成的随机 v4 UUID（`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`，
//! 小写十六进制，`y` 取 `8`/`9`/`a`/`b`），之后持久化并在每次启动时复用。
//! 生成与持久化逻辑位于客户端 crate 的 `identity` 模块，这里只定义类型本身。

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 格式化后的客户端 ID 长度（32 个十六进制字符 + 4 个连字符）。
pub const CLIENT_ID_LEN: usize = 36;

/// 客户端唯一标识符。
///
/// 序列化为裸字符串。空字符串表示尚未分配。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// 生成一个新的随机 v4 标识符。
    ///
    /// 随机源不要求密码学安全；跨设备唯一性是尽力而为的。
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 检查是否符合 `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx` 格式。
    ///
    /// 存储中读出的旧值即使不符合格式也会被原样复用，此方法仅用于诊断。
    pub fn is_well_formed(&self) -> bool {
        let bytes = self.0.as_bytes();
        if bytes.len() != CLIENT_ID_LEN {
            return false;
        }
        for (i, b) in bytes.iter().enumerate() {
            let ok = match i {
                8 | 13 | 18 | 23 => *b == b'-',
                14 => *b == b'4',
                19 => matches!(b, b'8' | b'9' | b'a' | b'b'),
                _ => b.is_ascii_digit() || (b'a'..=b'f').contains(b),
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
