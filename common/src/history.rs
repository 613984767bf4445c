//! フォルダ単位の処理履歴
//!
//! - `_scanned.json`: 元の名前と新しい名前のペア（追記のみ）
//! - `_originals.json`: リネーム済みの元の名前（追記のみ）
//!
//! 旧形式の `_scanned.json`（`["元1", "新1", "元2", "新2", ...]` の平坦な配列）も読み込める。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// リネーム履歴のファイル名
pub const SCANNED_FILE_NAME: &str = "_scanned.json";
/// 元ファイル名ログのファイル名
pub const ORIGINALS_FILE_NAME: &str = "_originals.json";

/// リネーム1件分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePair {
    /// 元の名前
    pub original: String,
    /// リネーム後の名前
    pub renamed: String,
}

impl RenamePair {
    pub fn new(original: impl Into<String>, renamed: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            renamed: renamed.into(),
        }
    }
}

/// ディスク上の `_scanned.json` の形式
#[derive(Deserialize)]
#[serde(untagged)]
enum RenamedRecordRepr {
    Pairs(Vec<RenamePair>),
    Flat(Vec<String>),
}

/// リネーム履歴（`_scanned.json`）
///
/// 元の名前・新しい名前のどちらかに一致すれば「処理済み」とみなす。
#[derive(Debug, Clone, Default)]
pub struct RenamedRecord {
    pairs: Vec<RenamePair>,
    names: HashSet<String>,
    legacy_layout: bool,
    unpaired: Option<String>,
}

impl RenamedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 平坦な配列（旧形式）から作る
    ///
    /// 要素数が奇数の場合、末尾の名前は元・新ともに同じ名前のペアとして残す。
    pub fn from_flat<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flat: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut record = Self {
            legacy_layout: true,
            ..Self::default()
        };

        for chunk in flat.chunks(2) {
            match chunk {
                [original, renamed] => record.push(RenamePair::new(original.clone(), renamed.clone())),
                [lone] => {
                    record.unpaired = Some(lone.clone());
                    record.push(RenamePair::new(lone.clone(), lone.clone()));
                }
                _ => {}
            }
        }

        record
    }

    /// 追加（重複チェックなし）
    pub fn push(&mut self, pair: RenamePair) {
        self.names.insert(pair.original.clone());
        self.names.insert(pair.renamed.clone());
        self.pairs.push(pair);
    }

    /// 元・新どちらかの名前として記録されているか
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn pairs(&self) -> &[RenamePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 旧形式（平坦な配列）から読み込まれたか
    pub fn is_legacy_layout(&self) -> bool {
        self.legacy_layout
    }

    /// 旧形式で対になっていなかった末尾の名前
    pub fn unpaired(&self) -> Option<&str> {
        self.unpaired.as_deref()
    }

    /// 平坦な配列に戻す（元, 新, 元, 新, ...）
    pub fn to_flat(&self) -> Vec<String> {
        self.pairs
            .iter()
            .flat_map(|p| [p.original.clone(), p.renamed.clone()])
            .collect()
    }
}

impl PartialEq for RenamedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl Eq for RenamedRecord {}

impl FromIterator<RenamePair> for RenamedRecord {
    fn from_iter<T: IntoIterator<Item = RenamePair>>(iter: T) -> Self {
        let mut record = Self::new();
        for pair in iter {
            record.push(pair);
        }
        record
    }
}

impl Serialize for RenamedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.pairs.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RenamedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RenamedRecordRepr::deserialize(deserializer)? {
            RenamedRecordRepr::Pairs(pairs) => pairs.into_iter().collect(),
            RenamedRecordRepr::Flat(names) => Self::from_flat(names),
        })
    }
}

/// 元ファイル名ログ（`_originals.json`）
#[derive(Debug, Clone, Default)]
pub struct OriginalNameLog {
    names: Vec<String>,
    index: HashSet<String>,
}

impl OriginalNameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.index.insert(name.clone());
        self.names.push(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl PartialEq for OriginalNameLog {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for OriginalNameLog {}

impl<S: Into<String>> FromIterator<S> for OriginalNameLog {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut log = Self::new();
        for name in iter {
            log.push(name);
        }
        log
    }
}

impl Serialize for OriginalNameLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OriginalNameLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}

/// 履歴上のファイルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStatus {
    /// 未処理
    New,
    /// 処理済み（リネーム後の名前など）
    PreviouslyProcessed,
    /// リネーム済みの元の名前が再び現れた
    StaleOriginal,
}

/// フォルダの履歴一式
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderHistory {
    pub renamed: RenamedRecord,
    pub originals: OriginalNameLog,
}

impl FolderHistory {
    pub fn new(renamed: RenamedRecord, originals: OriginalNameLog) -> Self {
        Self { renamed, originals }
    }

    /// ファイル名を履歴と照合する
    pub fn status(&self, name: &str) -> HistoryStatus {
        if !self.renamed.contains(name) {
            HistoryStatus::New
        } else if self.originals.contains(name) {
            HistoryStatus::StaleOriginal
        } else {
            HistoryStatus::PreviouslyProcessed
        }
    }

    /// リネーム1件を記録
    pub fn record_rename(&mut self, original: &str, renamed: &str) {
        self.originals.push(original);
        self.renamed.push(RenamePair::new(original, renamed));
    }

    /// 別の履歴を末尾に追記
    pub fn extend(&mut self, other: &FolderHistory) {
        for pair in other.renamed.pairs() {
            self.renamed.push(pair.clone());
        }
        for name in other.originals.names() {
            self.originals.push(name.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.originals.is_empty()
    }
}
