use crate::error::{RenamerError, Result};
use crate::fs::FileSystem;
use media_renamer_common::{natural_cmp, FolderEntry, PlannerOptions};
use std::path::Path;

/// スキャンルート直下のエントリを自然順で返す
///
/// ディレクトリ以外も含めて返す（呼び出し側で報告する）。
pub fn list_folders<F: FileSystem>(
    fs: &F,
    root: &Path,
    options: &PlannerOptions,
) -> Result<Vec<FolderEntry>> {
    if !fs.is_dir(root) {
        return Err(RenamerError::RootNotFound(root.to_path_buf()));
    }

    let mut entries: Vec<FolderEntry> = fs
        .list(root)
        .map_err(|source| RenamerError::ListDir {
            path: root.to_path_buf(),
            source,
        })?
        .into_iter()
        .filter(|e| !options.is_ignored(&e.name))
        .collect();

    entries.sort_by(|a, b| natural_cmp(&a.name, &b.name));

    Ok(entries)
}

/// フォルダ内の全エントリ（除外名を含む）
pub fn list_entries<F: FileSystem>(fs: &F, folder: &Path) -> Result<Vec<FolderEntry>> {
    fs.list(folder).map_err(|source| RenamerError::ListDir {
        path: folder.to_path_buf(),
        source,
    })
}
