//! 履歴ファイルのテスト
//!
//! `_scanned.json` / `_originals.json` の読み書きを検証

use media_renamer::error::RenamerError;
use media_renamer::history::{HistoryStore, JsonHistoryStore};
use media_renamer_common::{FolderHistory, HistoryStatus};
use tempfile::tempdir;

/// 履歴ファイルがない場合は空
#[test]
fn test_history_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let history = JsonHistoryStore.load(dir.path()).expect("読み込み失敗");

    assert!(history.is_empty());
    assert_eq!(history.status("anything.mp4"), HistoryStatus::New);
}

/// 保存と読み込み
#[test]
fn test_history_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut history = FolderHistory::default();
    history.record_rename("clip1.mp4", "Trip-2023-000.mp4");
    history.record_rename("clip2.mp4", "Trip-2023-001.mp4");
    JsonHistoryStore.save(dir.path(), &history).expect("履歴保存失敗");

    let loaded = JsonHistoryStore.load(dir.path()).expect("読み込み失敗");
    assert_eq!(loaded, history);
    assert_eq!(loaded.status("clip2.mp4"), HistoryStatus::StaleOriginal);
    assert_eq!(loaded.status("Trip-2023-001.mp4"), HistoryStatus::PreviouslyProcessed);
}

/// 保存形式の確認
#[test]
fn test_history_file_layout() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut history = FolderHistory::default();
    history.record_rename("clip1.mp4", "Trip-2023-000.mp4");
    JsonHistoryStore.save(dir.path(), &history).expect("履歴保存失敗");

    let scanned: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(JsonHistoryStore::scanned_path(dir.path())).unwrap(),
    )
    .unwrap();
    let originals: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(JsonHistoryStore::originals_path(dir.path())).unwrap(),
    )
    .unwrap();

    assert_eq!(
        scanned,
        serde_json::json!([{ "original": "clip1.mp4", "renamed": "Trip-2023-000.mp4" }])
    );
    assert_eq!(originals, serde_json::json!(["clip1.mp4"]));
}

/// 旧形式（平坦な配列）の読み込み
#[test]
fn test_history_legacy_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        JsonHistoryStore::scanned_path(dir.path()),
        r#"["clip1.mp4","Trip-2023-000.mp4","clip2.mp4","Trip-2023-001.mp4"]"#,
    )
    .unwrap();
    std::fs::write(
        JsonHistoryStore::originals_path(dir.path()),
        r#"["clip1.mp4","clip2.mp4"]"#,
    )
    .unwrap();

    let loaded = JsonHistoryStore.load(dir.path()).expect("読み込み失敗");
    assert!(loaded.renamed.is_legacy_layout());
    assert_eq!(loaded.renamed.len(), 2);
    assert_eq!(loaded.renamed.pairs()[1].original, "clip2.mp4");
    assert_eq!(loaded.renamed.pairs()[1].renamed, "Trip-2023-001.mp4");
}

/// 履歴ファイルが破損している場合はエラー
#[test]
fn test_history_corrupted_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(JsonHistoryStore::scanned_path(dir.path()), "{ invalid json }").unwrap();

    let result = JsonHistoryStore.load(dir.path());
    assert!(matches!(result, Err(RenamerError::HistoryRead { .. })));
}

/// 全体上書きで保存される
#[test]
fn test_history_overwrite() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut history = FolderHistory::default();
    history.record_rename("a.png", "G-000.png");
    JsonHistoryStore.save(dir.path(), &history).expect("履歴保存失敗");

    history.record_rename("b.png", "G-001.png");
    JsonHistoryStore.save(dir.path(), &history).expect("履歴保存失敗");

    let loaded = JsonHistoryStore.load(dir.path()).expect("読み込み失敗");
    assert_eq!(loaded.renamed.len(), 2);
    assert_eq!(loaded.originals.len(), 2);
}
