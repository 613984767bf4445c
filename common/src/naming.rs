//! 命名ルール
//!
//! - フォルダ名から接頭辞を作る（英数字と空白のみ残し、空白は `-` に）
//! - 連番付きの候補名 `<接頭辞>-NNN.<拡張子>`
//! - 大文字小文字を無視した自然順ソート

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::path::Path;

lazy_static! {
    /// 接頭辞に残さない文字
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^A-Za-z0-9 ]").unwrap();
    /// 自然順ソートの数値部分
    static ref DIGITS_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// フォルダ名から命名用の接頭辞を作る
///
/// `Trip #2023!` → `Trip-2023`
pub fn naming_prefix(folder_label: &str) -> String {
    NON_ALNUM_RE.replace_all(folder_label, "").replace(' ', "-")
}

/// ファイル名の拡張子（ドットなし）
///
/// 拡張子がない場合、または `name.` のように空の場合は `None`。
/// `.hidden` のような先頭ドットのみの名前も拡張子なしとして扱う。
pub fn file_extension(name: &str) -> Option<&str> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

/// 連番付きの候補名を作る
///
/// 番号は3桁ゼロ埋め。1000以上はそのままの桁数になる。
pub fn candidate_name(prefix: &str, index: usize, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}-{:03}.{}", prefix, index, ext),
        None => format!("{}-{:03}", prefix, index),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(String),
    Number(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in DIGITS_RE.find_iter(s) {
        out.push(Chunk::Text(s[last..m.start()].to_lowercase()));
        out.push(Chunk::Number(m.as_str()));
        last = m.end();
    }
    out.push(Chunk::Text(s[last..].to_lowercase()));
    out
}

/// 桁数の大きな数字列でもオーバーフローしない数値比較
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// 大文字小文字を無視した自然順比較
///
/// 数字の並びは数値として比較する（`clip2` < `clip10`）。
/// 同順位の場合は元の文字列のバイト順で決める。
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Text(l), Chunk::Text(r)) => l.cmp(r),
            (Chunk::Number(l), Chunk::Number(r)) => compare_digits(l, r),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_prefix_strips_punctuation() {
        assert_eq!(naming_prefix("Trip #2023!"), "Trip-2023");
        assert_eq!(naming_prefix("Trip 2023"), "Trip-2023");
    }

    #[test]
    fn test_naming_prefix_non_ascii() {
        assert_eq!(naming_prefix("ASTRO's PLAYROOM"), "ASTROs-PLAYROOM");
        assert_eq!(naming_prefix("Marvel’s Spider-Man 2™"), "Marvels-SpiderMan-2");
        assert_eq!(naming_prefix("原神"), "");
    }

    #[test]
    fn test_naming_prefix_keeps_repeated_spaces() {
        assert_eq!(naming_prefix("A  B"), "A--B");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("clip1.mp4"), Some("mp4"));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".hidden"), None);
    }

    #[test]
    fn test_candidate_name_padding() {
        assert_eq!(candidate_name("Trip-2023", 0, Some("mp4")), "Trip-2023-000.mp4");
        assert_eq!(candidate_name("Trip-2023", 42, Some("png")), "Trip-2023-042.png");
        assert_eq!(candidate_name("Trip-2023", 1234, Some("jpg")), "Trip-2023-1234.jpg");
        assert_eq!(candidate_name("Trip-2023", 7, None), "Trip-2023-007");
    }

    #[test]
    fn test_natural_cmp_numeric_runs() {
        assert_eq!(natural_cmp("clip2.mp4", "clip10.mp4"), Ordering::Less);
        assert_eq!(natural_cmp("clip10.mp4", "clip9.mp4"), Ordering::Greater);
        assert_eq!(natural_cmp("img007", "img7"), Ordering::Less);
    }

    #[test]
    fn test_natural_cmp_case_insensitive() {
        assert_eq!(natural_cmp("Beta.png", "alpha.png"), Ordering::Greater);
        assert_eq!(natural_cmp("ALPHA.png", "alpha.png"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_huge_numbers() {
        let a = "shot_99999999999999999999999.png";
        let b = "shot_100000000000000000000000.png";
        assert_eq!(natural_cmp(a, b), Ordering::Less);
    }
}
