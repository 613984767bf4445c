//! リネーム計画
//!
//! フォルダ内の現在のファイル一覧と履歴を突き合わせ、ファイルごとに
//! リネーム・削除・スキップを決める。ファイルシステムには触れない。
//!
//! ## 判定
//! 1. `_scanned.json` にある名前
//!    - `_originals.json` にもある → 削除（リネーム済みの元ファイルが再び現れた）
//!    - それ以外 → 処理済みとしてスキップ
//! 2. 未処理の名前
//!    - 通常ファイル以外、`.db` で終わる名前 → 対象外（カウンタは進む）
//!    - それ以外 → `<接頭辞>-NNN.<拡張子>` にリネーム

use crate::error::{Error, Result};
use crate::history::{FolderHistory, HistoryStatus, ORIGINALS_FILE_NAME, SCANNED_FILE_NAME};
use crate::naming::{candidate_name, file_extension, naming_prefix, natural_cmp};
use std::collections::HashSet;
use std::fmt;

/// 衝突回避で試す番号の上限（デフォルト）
pub const DEFAULT_PROBE_LIMIT: usize = 1000;

/// 一覧から常に除外する名前
pub const DEFAULT_IGNORED: &[&str] = &[
    ".",
    "..",
    ".DS_Store",
    SCANNED_FILE_NAME,
    ORIGINALS_FILE_NAME,
];

/// リネーム対象外にする拡張子（大文字小文字を区別）
const DATABASE_SUFFIX: &str = ".db";

/// フォルダ内エントリの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// フォルダ内のエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl FolderEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }
}

/// 計画オプション
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// 衝突回避で試す番号の上限（0..probe_limit）
    pub probe_limit: usize,
    /// 一覧から除外する名前
    pub ignored: HashSet<String>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            probe_limit: DEFAULT_PROBE_LIMIT,
            ignored: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PlannerOptions {
    /// 除外名を追加
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_probe_limit(mut self, probe_limit: usize) -> Self {
        self.probe_limit = probe_limit;
        self
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.probe_limit == 0 {
            return Err(Error::Config("probe_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// リネーム対象外の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// 通常ファイルではない（ディレクトリなど）
    NotRegularFile,
    /// `.db` ファイル
    DatabaseFile,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotRegularFile => write!(f, "not a regular file"),
            RejectReason::DatabaseFile => write!(f, "database file"),
        }
    }
}

/// ファイルごとの処理内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// 新規ファイルをリネーム
    Rename {
        from: String,
        to: String,
        index: usize,
    },
    /// リネーム済みの元の名前が再び現れたので削除
    Delete { name: String },
    /// 処理済み
    Skip { name: String },
    /// 対象外（カウンタは進む）
    Reject { name: String, reason: RejectReason },
    /// 空き番号が見つからなかった
    Exhausted { name: String, limit: usize },
}

impl FileAction {
    /// 対象ファイルの現在の名前
    pub fn name(&self) -> &str {
        match self {
            FileAction::Rename { from, .. } => from,
            FileAction::Delete { name }
            | FileAction::Skip { name }
            | FileAction::Reject { name, .. }
            | FileAction::Exhausted { name, .. } => name,
        }
    }
}

/// 計画の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanStats {
    pub renamed: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub exhausted: usize,
}

impl PlanStats {
    pub fn total(&self) -> usize {
        self.renamed + self.deleted + self.skipped + self.rejected + self.exhausted
    }

    /// リネームも削除もない
    pub fn is_noop(&self) -> bool {
        self.renamed == 0 && self.deleted == 0
    }
}

/// フォルダ1つ分の計画
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPlan {
    /// 命名用の接頭辞
    pub prefix: String,
    /// 自然順に並んだファイルごとの処理
    pub actions: Vec<FileAction>,
    /// 処理後のカウンタ値
    pub next_counter: usize,
}

impl FolderPlan {
    pub fn stats(&self) -> PlanStats {
        let mut stats = PlanStats::default();
        for action in &self.actions {
            match action {
                FileAction::Rename { .. } => stats.renamed += 1,
                FileAction::Delete { .. } => stats.deleted += 1,
                FileAction::Skip { .. } => stats.skipped += 1,
                FileAction::Reject { .. } => stats.rejected += 1,
                FileAction::Exhausted { .. } => stats.exhausted += 1,
            }
        }
        stats
    }

    /// 計画どおり全てリネームできた場合に追記される履歴
    pub fn additions(&self) -> FolderHistory {
        let mut history = FolderHistory::default();
        for action in &self.actions {
            if let FileAction::Rename { from, to, .. } = action {
                history.record_rename(from, to);
            }
        }
        history
    }
}

fn reject_reason(entry: &FolderEntry) -> Option<RejectReason> {
    if entry.kind != EntryKind::File {
        Some(RejectReason::NotRegularFile)
    } else if entry.name.ends_with(DATABASE_SUFFIX) {
        Some(RejectReason::DatabaseFile)
    } else {
        None
    }
}

/// 空いている候補名を探す
///
/// まず `counter` 番を試し、使用中なら 0 から `probe_limit` 未満を順に試す。
fn next_free_name(
    prefix: &str,
    extension: Option<&str>,
    counter: usize,
    occupied: &HashSet<String>,
    probe_limit: usize,
) -> Option<(usize, String)> {
    let first = candidate_name(prefix, counter, extension);
    if !occupied.contains(&first) {
        return Some((counter, first));
    }

    (0..probe_limit)
        .map(|i| (i, candidate_name(prefix, i, extension)))
        .find(|(_, name)| !occupied.contains(name))
}

/// フォルダのリネーム計画を作る
///
/// # Arguments
/// * `folder_label` - フォルダ名（接頭辞の元）
/// * `entries` - フォルダ内の全エントリ（除外名を含んでよい）
/// * `history` - フォルダの履歴
/// * `options` - 計画オプション
pub fn plan_folder(
    folder_label: &str,
    entries: &[FolderEntry],
    history: &FolderHistory,
    options: &PlannerOptions,
) -> FolderPlan {
    let prefix = naming_prefix(folder_label);

    // 衝突判定は除外名も含めたフォルダ内の全ての名前で行う
    let mut occupied: HashSet<String> = entries.iter().map(|e| e.name.clone()).collect();

    let mut listed: Vec<&FolderEntry> = entries
        .iter()
        .filter(|e| !options.is_ignored(&e.name))
        .collect();
    listed.sort_by(|a, b| natural_cmp(&a.name, &b.name));

    let mut counter = 0;
    let mut actions = Vec::with_capacity(listed.len());

    for entry in listed {
        let name = entry.name.clone();

        let action = match history.status(&name) {
            HistoryStatus::StaleOriginal => {
                occupied.remove(&name);
                FileAction::Delete { name }
            }
            HistoryStatus::PreviouslyProcessed => FileAction::Skip { name },
            HistoryStatus::New => {
                if let Some(reason) = reject_reason(entry) {
                    counter += 1;
                    FileAction::Reject { name, reason }
                } else {
                    let extension = file_extension(&name);
                    match next_free_name(&prefix, extension, counter, &occupied, options.probe_limit) {
                        Some((index, to)) => {
                            occupied.remove(&name);
                            occupied.insert(to.clone());
                            counter = index + 1;
                            FileAction::Rename { from: name, to, index }
                        }
                        None => {
                            counter += 1;
                            FileAction::Exhausted {
                                name,
                                limit: options.probe_limit,
                            }
                        }
                    }
                }
            }
        };

        actions.push(action);
    }

    FolderPlan {
        prefix,
        actions,
        next_counter: counter,
    }
}
