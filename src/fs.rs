//! ファイルシステム操作
//!
//! リネーム処理はこのトレイト越しにファイルシステムを扱う。
//! テストでは失敗を注入したラッパーに差し替える。

use media_renamer_common::{EntryKind, FolderEntry};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub trait FileSystem {
    /// ディレクトリ直下のエントリ一覧（順序は不定）
    fn list(&self, dir: &Path) -> io::Result<Vec<FolderEntry>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// ローカルディスク
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<FolderEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            let name = entry.file_name().to_string_lossy().to_string();

            // シンボリックリンクはリンク先で判定
            let file_type = if entry.path_is_symlink() {
                std::fs::metadata(entry.path()).map(|m| m.file_type()).ok()
            } else {
                Some(entry.file_type())
            };

            let kind = match file_type {
                Some(t) if t.is_file() => EntryKind::File,
                Some(t) if t.is_dir() => EntryKind::Directory,
                _ => EntryKind::Other,
            };

            entries.push(FolderEntry::new(name, kind));
        }

        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_list_direct_children_only() {
        let dir = tempdir().expect("Failed to create temp dir");
        File::create(dir.path().join("a.mp4")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("nested.mp4")).unwrap();

        let mut entries = LocalFs.list(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![FolderEntry::file("a.mp4"), FolderEntry::directory("sub")]
        );
    }

    #[test]
    fn test_list_missing_dir() {
        let result = LocalFs.list(Path::new("/nonexistent/media-renamer/dir"));
        assert!(result.is_err());
    }

    #[test]
    fn test_rename_and_remove() {
        let dir = tempdir().expect("Failed to create temp dir");
        let from = dir.path().join("clip.mp4");
        let to = dir.path().join("Game-000.mp4");
        fs::write(&from, b"dummy").unwrap();

        LocalFs.rename(&from, &to).unwrap();
        assert!(!LocalFs.exists(&from));
        assert!(LocalFs.exists(&to));

        LocalFs.remove_file(&to).unwrap();
        assert!(!LocalFs.exists(&to));
    }
}
