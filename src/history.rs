//! 履歴ファイルの読み書き
//!
//! フォルダごとに `_scanned.json` と `_originals.json` を置く。
//! ファイルが無ければ空の履歴、壊れていればエラー。

use crate::error::{HistorySourceError, RenamerError, Result};
use media_renamer_common::{
    FolderHistory, OriginalNameLog, RenamedRecord, ORIGINALS_FILE_NAME, SCANNED_FILE_NAME,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// 履歴の保存先
pub trait HistoryStore {
    /// 履歴を読み込み（無ければ空）
    fn load(&self, folder: &Path) -> Result<FolderHistory>;

    /// 履歴を全体上書きで保存
    fn save(&self, folder: &Path, history: &FolderHistory) -> Result<()>;
}

/// フォルダ内のJSONファイル
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHistoryStore;

impl JsonHistoryStore {
    pub fn scanned_path(folder: &Path) -> PathBuf {
        folder.join(SCANNED_FILE_NAME)
    }

    pub fn originals_path(folder: &Path) -> PathBuf {
        folder.join(ORIGINALS_FILE_NAME)
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self, folder: &Path) -> Result<FolderHistory> {
        let renamed: RenamedRecord = read_json(&Self::scanned_path(folder))?.unwrap_or_default();
        let originals: OriginalNameLog =
            read_json(&Self::originals_path(folder))?.unwrap_or_default();

        if renamed.is_legacy_layout() {
            warn!(
                "{}: legacy flat layout, will be rewritten as pairs",
                Self::scanned_path(folder).display()
            );
        }
        if let Some(name) = renamed.unpaired() {
            warn!(
                "{}: trailing entry without a new name: {}",
                Self::scanned_path(folder).display(),
                name
            );
        }

        Ok(FolderHistory::new(renamed, originals))
    }

    fn save(&self, folder: &Path, history: &FolderHistory) -> Result<()> {
        write_json(&Self::scanned_path(folder), &history.renamed)?;
        write_json(&Self::originals_path(folder), &history.originals)?;
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let to_error = |source: HistorySourceError| RenamerError::HistoryRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| to_error(e.into()))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).map_err(|e| to_error(e.into()))?;
    Ok(Some(value))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let to_error = |source: HistorySourceError| RenamerError::HistoryWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| to_error(e.into()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| to_error(e.into()))?;
    writer.flush().map_err(|e| to_error(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let history = JsonHistoryStore.load(dir.path()).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut history = FolderHistory::default();
        history.record_rename("clip1.mp4", "Trip-2023-000.mp4");

        JsonHistoryStore.save(dir.path(), &history).unwrap();
        let loaded = JsonHistoryStore.load(dir.path()).unwrap();

        assert_eq!(loaded, history);
    }

    #[test]
    fn test_corrupted_history_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join(SCANNED_FILE_NAME), "{ invalid json }").unwrap();

        let result = JsonHistoryStore.load(dir.path());
        assert!(matches!(result, Err(RenamerError::HistoryRead { .. })));
    }

    #[test]
    fn test_save_to_missing_folder_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("gone");

        let result = JsonHistoryStore.save(&missing, &FolderHistory::default());
        assert!(matches!(result, Err(RenamerError::HistoryWrite { .. })));
    }
}
