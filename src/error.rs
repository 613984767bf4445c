use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenamerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{} not found!", .0.display())]
    RootNotFound(PathBuf),

    #[error("ERROR: Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Error reading directory {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading {}: {source}", path.display())]
    HistoryRead {
        path: PathBuf,
        #[source]
        source: HistorySourceError,
    },

    #[error("Error writing {}: {source}", path.display())]
    HistoryWrite {
        path: PathBuf,
        #[source]
        source: HistorySourceError,
    },

    #[error("No free name for {} within {limit} attempts", file.display())]
    CollisionExhausted { file: PathBuf, limit: usize },

    #[error("Refusing to rename {} over existing {}", from.display(), to.display())]
    TargetExists { from: PathBuf, to: PathBuf },

    #[error("Error renaming {}: {source}", from.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error deleting {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] media_renamer_common::Error),
}

/// 履歴ファイルの読み書きエラーの原因
#[derive(Error, Debug)]
pub enum HistorySourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenamerError>;
