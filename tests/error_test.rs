//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use media_renamer::error::{HistorySourceError, RenamerError};
use media_renamer::fs::LocalFs;
use media_renamer::scanner;
use media_renamer_common::PlannerOptions;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないルートをスキャンした場合
#[test]
fn test_scan_nonexistent_root() {
    let result = scanner::list_folders(
        &LocalFs,
        Path::new("/nonexistent/path/12345"),
        &PlannerOptions::default(),
    );

    let err = result.unwrap_err();
    assert!(matches!(err, RenamerError::RootNotFound(_)));
    assert!(format!("{}", err).contains("not found!"));
}

/// 空のルートをスキャンした場合
#[test]
fn test_scan_empty_root() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::list_folders(&LocalFs, dir.path(), &PlannerOptions::default());

    // 空ルートはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// RenamerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let io = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let errors = vec![
        RenamerError::Config("テスト設定エラー".to_string()),
        RenamerError::RootNotFound(PathBuf::from("/captures/Video Clips")),
        RenamerError::NotADirectory(PathBuf::from("/captures/Video Clips/file.txt")),
        RenamerError::ListDir { path: PathBuf::from("/x"), source: io() },
        RenamerError::HistoryWrite {
            path: PathBuf::from("/x/_scanned.json"),
            source: HistorySourceError::Io(io()),
        },
        RenamerError::CollisionExhausted { file: PathBuf::from("/x/a.png"), limit: 1000 },
        RenamerError::TargetExists { from: PathBuf::from("/x/a.png"), to: PathBuf::from("/x/G-000.png") },
        RenamerError::Rename { from: PathBuf::from("/x/a.png"), to: PathBuf::from("/x/G-000.png"), source: io() },
        RenamerError::Delete { path: PathBuf::from("/x/a.png"), source: io() },
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 衝突上限エラーのメッセージ確認
#[test]
fn test_collision_exhausted_message() {
    let err = RenamerError::CollisionExhausted { file: PathBuf::from("/x/a.png"), limit: 1000 };
    let display = format!("{}", err);

    assert!(display.contains("/x/a.png"));
    assert!(display.contains("1000"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: RenamerError = io_err.into();

    assert!(matches!(err, RenamerError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: RenamerError = json_err.into();

    assert!(matches!(err, RenamerError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = media_renamer_common::Error::Config("probe_limit must be at least 1".to_string());
    let err: RenamerError = common_err.into();

    assert!(matches!(err, RenamerError::Common(_)));
    assert!(format!("{}", err).contains("probe_limit"));
}
