// JustOneClient/src/identity.rs

//! 客户端身份的获取与持久化。
//!
//! 首次运行时生成一个随机 v4 标识符，并以固定键 `IDENTITY_STORAGE_KEY` 写入持久化存储；
//! 之后每次启动读出并复用同一个值，保证刷新/重启后身份不变。
//!
//! 存储被隔离在 `IdentityStore` 能力接口之后：
//! - `MemoryIdentityStore`: 内存实现，用于测试。
//! - `FileIdentityStore`: JSON 键值文件，相当于浏览器的本地存储。

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use common_models::ClientId;

use crate::error::IdentityError;

/// 持久化客户端 ID 使用的键。
pub const IDENTITY_STORAGE_KEY: &str = "justone-uuid";

/// 身份存储能力接口。
pub trait IdentityStore {
    /// 读取已保存的标识符。没有保存过时返回 `Ok(None)`。
    fn load_identity(&self) -> Result<Option<String>, IdentityError>;

    /// 保存标识符。
    fn save_identity(&mut self, client_id: &str) -> Result<(), IdentityError>;
}

/// 读取已保存的客户端 ID；不存在（或为空字符串）时生成新的 ID 并保存。
///
/// 已保存的非空值总是原样复用，即使格式不规范。存储内容损坏时视为不存在：
/// 生成新 ID 并写回，之后的启动即可复用它。
pub fn get_or_create_client_id<S: IdentityStore + ?Sized>(store: &mut S) -> Result<ClientId, IdentityError> {
    let stored = match store.load_identity() {
        Ok(stored) => stored,
        Err(e @ IdentityError::Corrupt { .. }) => {
            warn!("[客户端身份] {}，将重新生成客户端 ID。", e);
            None
        }
        Err(e) => return Err(e),
    };
    if let Some(stored) = stored {
        if !stored.is_empty() {
            let client_id = ClientId::from(stored);
            if !client_id.is_well_formed() {
                warn!("[客户端身份] 已保存的客户端 ID '{}' 格式不规范，仍继续使用。", client_id);
            }
            debug!("[客户端身份] 复用已保存的客户端 ID: {}", client_id);
            return Ok(client_id);
        }
    }

    let client_id = ClientId::generate();
    store.save_identity(client_id.as_str())?;
    info!("[客户端身份] 首次运行，已生成并保存新的客户端 ID: {}", client_id);
    Ok(client_id)
}

/// 内存中的身份存储。
#[derive(Debug, Default, Clone)]
pub struct MemoryIdentityStore {
    value: Option<String>,
    saves: usize,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            saves: 0,
        }
    }

    /// 已执行的写入次数。
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// 清空存储，模拟用户清除本地数据。
    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load_identity(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.value.clone())
    }

    fn save_identity(&mut self, client_id: &str) -> Result<(), IdentityError> {
        self.value = Some(client_id.to_string());
        self.saves += 1;
        Ok(())
    }
}

/// 文件中的一条存储记录。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// 文件中某个键的值。
///
/// 本客户端写入的是 `StoredEntry`；其他程序写入的纯字符串或任意 JSON 值也能读取，
/// 并在写回时原样保留。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StoredValue {
    Entry(StoredEntry),
    Plain(String),
    Other(serde_json::Value),
}

impl StoredValue {
    /// 该值的字符串形式；非字符串的 JSON 值没有字符串形式。
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Entry(entry) => Some(&entry.value),
            StoredValue::Plain(value) => Some(value),
            StoredValue::Other(_) => None,
        }
    }
}

/// 以 JSON 键值文件保存的身份存储。
///
/// 文件可以同时包含其他键，写入时会保留它们。
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, StoredValue>, IdentityError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| IdentityError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| IdentityError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl IdentityStore for FileIdentityStore {
    fn load_identity(&self) -> Result<Option<String>, IdentityError> {
        match self.read_entries()?.remove(IDENTITY_STORAGE_KEY) {
            None => Ok(None),
            Some(value) => match value.as_text() {
                Some(text) => Ok(Some(text.to_string())),
                None => {
                    warn!(
                        "[客户端身份] 存储文件 {:?} 中键 '{}' 的值不是字符串，视为未保存。",
                        self.path, IDENTITY_STORAGE_KEY
                    );
                    Ok(None)
                }
            },
        }
    }

    fn save_identity(&mut self, client_id: &str) -> Result<(), IdentityError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(IdentityError::Corrupt { .. }) => {
                warn!("[客户端身份] 存储文件 {:?} 已损坏，将被覆盖。", self.path);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(
            IDENTITY_STORAGE_KEY.to_string(),
            StoredValue::Entry(StoredEntry {
                value: client_id.to_string(),
                updated_at: Utc::now(),
            }),
        );

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| IdentityError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content).map_err(|source| IdentityError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
