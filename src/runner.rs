//! リネーム実行
//!
//! スキャンルート → フォルダ → 計画 → 適用 → 履歴保存 の順に処理する。
//! ファイル単位・フォルダ単位のエラーは記録して次へ進み、最後にまとめて返す。

use crate::error::{RenamerError, Result};
use crate::fs::{FileSystem, LocalFs};
use crate::history::{HistoryStore, JsonHistoryStore};
use crate::scanner;
use media_renamer_common::{
    plan_folder, EntryKind, FileAction, FolderHistory, PlanStats, PlannerOptions, RenamePair,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 実行オプション
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub planner: PlannerOptions,
    /// 計画を表示するだけで変更しない
    pub dry_run: bool,
    /// 1件処理するたびに履歴を保存する
    pub checkpoint: bool,
    /// フォルダごとの待ち時間
    pub folder_delay: Duration,
}

/// フォルダ1つ分の結果
#[derive(Debug)]
pub struct FolderReport {
    pub path: PathBuf,
    /// 計画の集計
    pub planned: PlanStats,
    /// 実際にリネームしたもの
    pub renamed: Vec<RenamePair>,
    /// 実際に削除したもの
    pub deleted: Vec<String>,
    pub errors: Vec<RenamerError>,
}

impl FolderReport {
    fn new(path: &Path, planned: PlanStats) -> Self {
        Self {
            path: path.to_path_buf(),
            planned,
            renamed: Vec::new(),
            deleted: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// 実行全体の結果
#[derive(Debug, Default)]
pub struct RunReport {
    pub folders: Vec<FolderReport>,
    /// ルート・フォルダ単位のエラー
    pub errors: Vec<RenamerError>,
}

impl RunReport {
    pub fn renamed_count(&self) -> usize {
        self.folders.iter().map(|f| f.renamed.len()).sum()
    }

    pub fn deleted_count(&self) -> usize {
        self.folders.iter().map(|f| f.deleted.len()).sum()
    }

    /// 全てのエラー（ルート・フォルダ・ファイル単位）
    pub fn all_errors(&self) -> impl Iterator<Item = &RenamerError> {
        self.errors
            .iter()
            .chain(self.folders.iter().flat_map(|f| f.errors.iter()))
    }

    pub fn error_count(&self) -> usize {
        self.all_errors().count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

pub struct Renamer<F = LocalFs, H = JsonHistoryStore> {
    fs: F,
    store: H,
    options: RunOptions,
}

impl Renamer {
    /// ローカルディスクとJSON履歴で作る
    pub fn local(options: RunOptions) -> Self {
        Self::new(LocalFs, JsonHistoryStore, options)
    }
}

impl<F: FileSystem, H: HistoryStore> Renamer<F, H> {
    pub fn new(fs: F, store: H, options: RunOptions) -> Self {
        Self { fs, store, options }
    }

    /// 全スキャンルートを処理
    pub fn run(&self, roots: &[PathBuf]) -> RunReport {
        let mut report = RunReport::default();

        if self.options.dry_run {
            info!("Dry run: no files will be renamed or deleted");
        }

        for root in roots {
            self.process_root(root, &mut report);
        }

        info!("[COMPLETED]");
        report
    }

    fn process_root(&self, root: &Path, report: &mut RunReport) {
        let folders = match scanner::list_folders(&self.fs, root, &self.options.planner) {
            Ok(folders) => folders,
            Err(e) => {
                warn!("{}", e);
                report.errors.push(e);
                return;
            }
        };

        for entry in folders {
            let path = root.join(&entry.name);
            info!("Scanning {}", path.display());

            if entry.kind != EntryKind::Directory {
                let e = RenamerError::NotADirectory(path);
                error!("{}", e);
                report.errors.push(e);
                continue;
            }

            match self.process_folder(&path) {
                Ok(folder_report) => report.folders.push(folder_report),
                Err(e) => {
                    error!("{}", e);
                    report.errors.push(e);
                }
            }

            if !self.options.folder_delay.is_zero() {
                std::thread::sleep(self.options.folder_delay);
            }
        }
    }

    /// フォルダ1つを処理
    ///
    /// 履歴の読み込みや一覧取得に失敗した場合は何も変更せずエラーを返す。
    /// それ以降のエラーは `FolderReport::errors` に入る。
    pub fn process_folder(&self, folder: &Path) -> Result<FolderReport> {
        let label = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| folder.to_string_lossy().to_string());

        let history = self.store.load(folder)?;
        let entries = scanner::list_entries(&self.fs, folder)?;
        let plan = plan_folder(&label, &entries, &history, &self.options.planner);

        let stats = plan.stats();
        let mut report = FolderReport::new(folder, stats);
        debug!(
            "Prefix: {} ({} entries, next counter {})",
            plan.prefix,
            stats.total(),
            plan.next_counter
        );
        if stats.is_noop() {
            debug!("Nothing to rename or delete");
        }

        // 実際にリネームできたものだけを追記する
        let mut applied = FolderHistory::default();

        for action in &plan.actions {
            let changed = match action {
                FileAction::Skip { name } => {
                    info!("Previously Processed: {}", name);
                    false
                }
                FileAction::Reject { name, reason } => {
                    info!("Ignored: {} ({})", name, reason);
                    false
                }
                FileAction::Exhausted { name, limit } => {
                    let e = RenamerError::CollisionExhausted {
                        file: folder.join(name),
                        limit: *limit,
                    };
                    error!("{}", e);
                    report.errors.push(e);
                    false
                }
                FileAction::Delete { name } => self.apply_delete(folder, name, &mut report),
                FileAction::Rename { from, to, index } => {
                    self.apply_rename(folder, from, to, *index, &mut applied, &mut report)
                }
            };

            if changed && self.options.checkpoint {
                if let Err(e) = self.store.save(folder, &merged(&history, &applied)) {
                    error!("{}", e);
                    report.errors.push(e);
                    return Ok(report);
                }
            }
        }

        if self.options.dry_run {
            info!(
                "Dry run: {} renames would be recorded",
                plan.additions().renamed.len()
            );
        } else if let Err(e) = self.store.save(folder, &merged(&history, &applied)) {
            error!("{}", e);
            report.errors.push(e);
        }

        debug!(
            "{}: renamed {}, deleted {}, errors {}",
            folder.display(),
            report.renamed.len(),
            report.deleted.len(),
            report.errors.len()
        );

        Ok(report)
    }

    fn apply_delete(&self, folder: &Path, name: &str, report: &mut FolderReport) -> bool {
        info!("DELETE: {}", name);
        if self.options.dry_run {
            return false;
        }

        let path = folder.join(name);
        match self.fs.remove_file(&path) {
            Ok(()) => {
                report.deleted.push(name.to_string());
                true
            }
            Err(source) => {
                let e = RenamerError::Delete { path, source };
                error!("{}", e);
                report.errors.push(e);
                false
            }
        }
    }

    fn apply_rename(
        &self,
        folder: &Path,
        from: &str,
        to: &str,
        index: usize,
        applied: &mut FolderHistory,
        report: &mut FolderReport,
    ) -> bool {
        if self.options.dry_run {
            info!("ADDING: {} <- {}", to, from);
            return false;
        }

        let source = folder.join(from);
        let target = folder.join(to);

        // 計画後に現れたファイルや大文字小文字を区別しないFSでの衝突は上書きしない
        if self.fs.exists(&target) {
            let e = RenamerError::TargetExists {
                from: source,
                to: target,
            };
            error!("{}", e);
            report.errors.push(e);
            return false;
        }

        match self.fs.rename(&source, &target) {
            Ok(()) => {
                info!("ADDING: {}", to);
                debug!("{} -> {} (index {})", from, to, index);
                applied.record_rename(from, to);
                report.renamed.push(RenamePair::new(from, to));
                true
            }
            Err(e) => {
                let e = RenamerError::Rename {
                    from: source,
                    to: target,
                    source: e,
                };
                error!("{}", e);
                report.errors.push(e);
                false
            }
        }
    }
}

/// 読み込んだ履歴に今回の分を追記したもの
fn merged(history: &FolderHistory, applied: &FolderHistory) -> FolderHistory {
    let mut merged = history.clone();
    merged.extend(applied);
    merged
}
