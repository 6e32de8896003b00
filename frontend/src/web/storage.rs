//! LocalStorage 适配模块
//!
//! 直接使用 `web_sys::Storage`，按原样读写字符串，为会话存储提供持久化。
//! 存储不可用（无 window、隐私模式或被禁用）时读为空、写入报错，不会 panic。

use crate::session::{SessionStorage, StorageError};

/// 浏览器 LocalStorage
///
/// 无状态，每次操作都重新获取存储句柄。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

fn read(storage: Option<&web_sys::Storage>, key: &str) -> Option<String> {
    storage?.get_item(key).ok()?
}

fn write(storage: Option<&web_sys::Storage>, key: &str, value: &str) -> Result<(), StorageError> {
    let storage = storage.ok_or_else(|| StorageError::Write {
        key: key.to_string(),
        message: "localStorage is unavailable".to_string(),
    })?;
    storage
        .set_item(key, value)
        .map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
}

fn delete(storage: Option<&web_sys::Storage>, key: &str) {
    if let Some(storage) = storage {
        let _ = storage.remove_item(key);
    }
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        read(Self::storage().as_ref(), key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write(Self::storage().as_ref(), key, value)
    }

    fn remove(&self, key: &str) {
        delete(Self::storage().as_ref(), key)
    }
}
