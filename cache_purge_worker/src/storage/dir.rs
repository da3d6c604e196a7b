// cache_purge_worker/src/storage/dir.rs

//! 基于文件系统的能力实现。
//!
//! 缓存根目录下的每个子目录视为一个具名缓存；worker 的注册信息是一个标记文件，
//! 文件存在即表示已注册。

use log::{debug, info};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{CacheStorage, WorkerRegistration};
use crate::error::PurgeError;

/// 以目录形式保存的缓存集合。
#[derive(Debug, Clone)]
pub struct DirCacheStorage {
    root: PathBuf,
}

impl DirCacheStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn cache_path(&self, name: &str) -> Result<PathBuf, PurgeError> {
        // 名称只能是根目录下的单层目录名
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(PurgeError::InvalidCacheName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl CacheStorage for DirCacheStorage {
    async fn keys(&self) -> Result<Vec<String>, PurgeError> {
        if !tokio::fs::try_exists(&self.root).await? {
            debug!("[缓存清理] 缓存根目录 {:?} 不存在，视为没有缓存。", self.root);
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| PurgeError::CacheEnumeration(format!("读取 {:?} 失败: {}", self.root, e)))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PurgeError::CacheEnumeration(e.to_string()))?
        {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool, PurgeError> {
        let path = self.cache_path(name)?;
        if !tokio::fs::try_exists(&path).await? {
            return Ok(false);
        }
        tokio::fs::remove_dir_all(&path)
            .await
            .map_err(|e| PurgeError::CacheDeletion {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(true)
    }
}

/// 以标记文件表示的 worker 注册信息。
#[derive(Debug)]
pub struct FileRegistration {
    marker: PathBuf,
    skipped_waiting: AtomicBool,
}

impl FileRegistration {
    pub fn new(marker: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
            skipped_waiting: AtomicBool::new(false),
        }
    }

    /// 写入标记文件（必要时创建父目录）。
    pub async fn register(&self) -> Result<(), PurgeError> {
        if let Some(parent) = self.marker.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.marker, b"registered").await?;
        info!("[缓存清理] worker 已注册: {:?}", self.marker);
        Ok(())
    }

    pub async fn is_registered(&self) -> bool {
        tokio::fs::try_exists(&self.marker).await.unwrap_or(false)
    }

    pub fn has_skipped_waiting(&self) -> bool {
        self.skipped_waiting.load(Ordering::SeqCst)
    }
}

impl WorkerRegistration for FileRegistration {
    async fn skip_waiting(&self) -> Result<(), PurgeError> {
        self.skipped_waiting.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn unregister(&self) -> Result<bool, PurgeError> {
        match tokio::fs::remove_file(&self.marker).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PurgeError::UnregisterFailed(format!(
                "删除标记文件 {:?} 失败: {}",
                self.marker, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cache_purge_dir_{}_{}", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_keys_on_missing_root_is_empty() {
        let storage = DirCacheStorage::new(temp_root("missing"));
        assert!(storage.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_lists_only_directories() {
        let root = temp_root("keys");
        tokio::fs::create_dir_all(root.join("v2-assets")).await.unwrap();
        tokio::fs::create_dir_all(root.join("v1-assets")).await.unwrap();
        tokio::fs::write(root.join("stray.txt"), b"x").await.unwrap();

        let storage = DirCacheStorage::new(&root);
        assert_eq!(storage.keys().await.unwrap(), vec!["v1-assets", "v2-assets"]);

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let root = temp_root("delete");
        tokio::fs::create_dir_all(root.join("pages").join("nested")).await.unwrap();

        let storage = DirCacheStorage::new(&root);
        assert!(storage.delete("pages").await.unwrap());
        assert!(!storage.delete("pages").await.unwrap());
        assert!(storage.keys().await.unwrap().is_empty());

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_rejects_path_traversal() {
        let storage = DirCacheStorage::new(temp_root("traversal"));
        assert!(matches!(
            storage.delete("../etc").await,
            Err(PurgeError::InvalidCacheName(_))
        ));
        assert!(matches!(storage.delete("..").await, Err(PurgeError::InvalidCacheName(_))));
    }

    #[tokio::test]
    async fn test_file_registration_lifecycle() {
        let root = temp_root("registration");
        let registration = FileRegistration::new(root.join("worker.registered"));
        assert!(!registration.is_registered().await);

        registration.register().await.unwrap();
        assert!(registration.is_registered().await);

        registration.skip_waiting().await.unwrap();
        assert!(registration.has_skipped_waiting());

        assert!(registration.unregister().await.unwrap());
        assert!(!registration.is_registered().await);
        // 再次注销是无操作
        assert!(!registration.unregister().await.unwrap());

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
