//! Media Renamer Common Library
//!
//! リネーム計画のロジックと履歴データ型（I/Oなし）

pub mod error;
pub mod history;
pub mod naming;
pub mod planner;

pub use error::{Error, Result};
pub use history::{
    FolderHistory, HistoryStatus, OriginalNameLog, RenamePair, RenamedRecord,
    ORIGINALS_FILE_NAME, SCANNED_FILE_NAME,
};
pub use naming::{candidate_name, file_extension, naming_prefix, natural_cmp};
pub use planner::{
    plan_folder, EntryKind, FileAction, FolderEntry, FolderPlan, PlanStats, PlannerOptions,
    RejectReason, DEFAULT_IGNORED, DEFAULT_PROBE_LIMIT,
};
