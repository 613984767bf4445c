use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "media-renamer")]
#[command(about = "キャプチャ動画・スクリーンショットをフォルダ名ベースの連番にリネーム", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スキャンルート内の各フォルダをリネーム
    Run {
        /// スキャンルート（省略時は設定ファイル、無ければ自動検出）
        roots: Vec<PathBuf>,

        /// ドライラン（変更せずに計画だけ表示）
        #[arg(long)]
        dry_run: bool,

        /// フォルダごとの待ち時間（ミリ秒）
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 衝突回避で試す番号の上限
        #[arg(long)]
        probe_limit: Option<usize>,

        /// 1件ごとに履歴を保存
        #[arg(long)]
        checkpoint: bool,

        /// 終了前にENTER入力を待つ
        #[arg(long)]
        pause: bool,
    },

    /// 設定を表示/編集
    Config {
        /// スキャンルートを追加
        #[arg(long)]
        add_root: Vec<PathBuf>,

        /// スキャンルートを全て削除
        #[arg(long)]
        clear_roots: bool,

        /// 衝突回避で試す番号の上限を設定
        #[arg(long)]
        set_probe_limit: Option<usize>,

        /// フォルダごとの待ち時間（ミリ秒）を設定
        #[arg(long)]
        set_delay_ms: Option<u64>,

        /// 除外名を追加
        #[arg(long)]
        ignore: Vec<String>,

        /// 1件ごとの履歴保存を設定
        #[arg(long)]
        set_checkpoint: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// フォルダの履歴を表示
    History {
        /// 対象フォルダ
        #[arg(required = true)]
        folder: PathBuf,
    },
}
