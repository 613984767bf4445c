use crate::error::{RenamerError, Result};
use media_renamer_common::DEFAULT_PROBE_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// キャプチャの保存先候補（先に見つかったものを使う）
pub const CAPTURE_BASES: &[&str] = &["./PS5/CREATE", "./CREATE"];
/// 動画フォルダ名
pub const VIDEO_DIR_NAME: &str = "Video Clips";
/// スクリーンショットフォルダ名
pub const PICTURE_DIR_NAME: &str = "Screenshots";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// スキャンルート（空なら自動検出）
    pub roots: Vec<PathBuf>,
    /// 衝突回避で試す番号の上限
    pub probe_limit: usize,
    /// フォルダごとの待ち時間（ミリ秒）
    pub folder_delay_ms: u64,
    /// 追加の除外名
    pub extra_ignored: Vec<String>,
    /// 1件ごとに履歴を保存する
    pub checkpoint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            probe_limit: DEFAULT_PROBE_LIMIT,
            folder_delay_ms: 0,
            extra_ignored: Vec::new(),
            checkpoint: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// `run` 用に読み込む
    ///
    /// ルートが引数で指定されていれば、読めない設定はデフォルト値で代替する。
    pub fn load_for_run(roots_given: bool) -> Result<Self> {
        Self::fallback_for_run(Self::load(), roots_given)
    }

    pub fn load_for_run_from(config_path: &Path, roots_given: bool) -> Result<Self> {
        Self::fallback_for_run(Self::load_from(config_path), roots_given)
    }

    fn fallback_for_run(loaded: Result<Self>, roots_given: bool) -> Result<Self> {
        match loaded {
            Err(e) if roots_given => {
                warn!("{}; using default settings", e);
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RenamerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("media-renamer").join("config.json"))
    }

    pub fn add_root(&mut self, root: PathBuf) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    /// 実際にスキャンするルート
    pub fn resolve_roots(&self) -> Vec<PathBuf> {
        if !self.roots.is_empty() {
            return self.roots.clone();
        }

        let bases: Vec<PathBuf> = CAPTURE_BASES.iter().map(PathBuf::from).collect();
        detect_capture_roots(&bases)
    }
}

/// キャプチャの保存先を探して動画・スクリーンショットのフォルダを返す
///
/// 候補のうち `Video Clips` か `Screenshots` のどちらかを持つ最初のものを使う。
/// 見つからなければ最初の候補を使う（存在しないルートとして後で報告される）。
pub fn detect_capture_roots(bases: &[PathBuf]) -> Vec<PathBuf> {
    for base in bases {
        let video = base.join(VIDEO_DIR_NAME);
        let picture = base.join(PICTURE_DIR_NAME);

        if video.is_dir() || picture.is_dir() {
            info!("Found root directory: {}", base.display());
            return vec![video, picture];
        }
    }

    warn!("Could not find any capture directory");
    match bases.first() {
        Some(base) => vec![base.join(VIDEO_DIR_NAME), base.join(PICTURE_DIR_NAME)],
        None => Vec::new(),
    }
}
