//! カート状態の永続化アダプター

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::CartState;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize cart state: {0}")]
    Serde(#[from] serde_json::Error),
}

/// カートの状態全体をキーごとに保持するストレージ
pub trait CartStorage {
    /// `key` に保存された状態を読む（保存されていなければ `Ok(None)`）
    fn load(&self, key: &str) -> Result<Option<CartState>, StorageError>;

    /// `key` に状態を保存する（既存の値は置き換える）
    fn save(&mut self, key: &str, state: &CartState) -> Result<(), StorageError>;

    /// `key` の値を削除する（存在しなくてもエラーにしない）
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// シリアライズした JSON をプロセス内に保持するストレージ（ブラウザの local storage 相当）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `key` のシリアライズ済みの値
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// シリアライズを通さずに値を格納する
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<CartState>, StorageError> {
        self.entries.get(key).map(|raw| serde_json::from_str(raw)).transpose().map_err(Into::into)
    }

    fn save(&mut self, key: &str, state: &CartState) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), serde_json::to_string(state)?);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 各キーを `<dir>/<key>.json` として保存する
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<CartState>, StorageError> {
        let path = self.path_for(key)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, key: &str, state: &CartState) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, serde_json::to_string_pretty(state)?)?;
        tracing::trace!("Saved cart state to {:?}", path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::sample_state;

    #[googletest::test]
    fn memory_storage_round_trips_state() {
        let mut storage = MemoryStorage::new();
        let state = sample_state();

        storage.save("cart", &state).unwrap();

        assert_eq!(storage.load("cart").unwrap().as_ref(), Some(&state));
        assert!(storage.load("other").unwrap().is_none());
    }

    #[googletest::test]
    fn memory_storage_reports_malformed_value() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw("cart", "{ not json");

        expect_that!(matches!(storage.load("cart"), Err(StorageError::Serde(_))), eq(true));
    }

    #[googletest::test]
    fn memory_storage_persisted_shape() {
        let mut storage = MemoryStorage::new();
        storage.save("cart", &sample_state()).unwrap();

        let raw: serde_json::Value = serde_json::from_str(storage.raw("cart").unwrap()).unwrap();

        expect_that!(raw["venue"]["slug"].as_str(), some(eq("main-hall")));
        expect_that!(raw["items"][0]["menuItemId"].as_str(), some(eq("menu-1")));
        expect_that!(raw["items"][1]["passId"].as_str(), some(eq("pass-1")));
    }

    #[googletest::test]
    fn file_storage_round_trips_and_removes() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("state"));
        let state = sample_state();

        assert!(storage.load("cart").unwrap().is_none());

        storage.save("cart", &state).unwrap();
        expect_that!(dir.path().join("state/cart.json").exists(), eq(true));
        assert_eq!(storage.load("cart").unwrap().as_ref(), Some(&state));

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert!(storage.load("cart").unwrap().is_none());
    }

    #[rstest]
    #[case("")]
    #[case("../escape")]
    #[case("..")]
    fn file_storage_rejects_unsafe_keys(#[case] key: &str) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(storage.load(key), Err(StorageError::InvalidKey(_))));
    }
}
