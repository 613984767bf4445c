use anyhow::Context;
use clap::Parser;
use dialoguer::Input;
use media_renamer::cli::{Cli, Commands};
use media_renamer::config::Config;
use media_renamer::history::{HistoryStore, JsonHistoryStore};
use media_renamer::{logging, Renamer, RunOptions};
use media_renamer_common::PlannerOptions;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Commands::Run { roots, dry_run, delay_ms, probe_limit, checkpoint, pause } => {
            let config = Config::load_for_run(!roots.is_empty()).context("設定の読み込みに失敗しました")?;
            let roots = if roots.is_empty() { config.resolve_roots() } else { roots };

            let planner = PlannerOptions::default()
                .with_probe_limit(probe_limit.unwrap_or(config.probe_limit))
                .with_ignored(config.extra_ignored.iter().cloned())
                .with_ignored(own_executable_name());
            planner.validate()?;

            let options = RunOptions {
                planner,
                dry_run,
                checkpoint: checkpoint || config.checkpoint,
                folder_delay: Duration::from_millis(delay_ms.unwrap_or(config.folder_delay_ms)),
            };

            let report = Renamer::local(options).run(&roots);

            println!();
            println!("✔ フォルダ: {}", report.folders.len());
            println!("✔ リネーム: {}件 / 削除: {}件", report.renamed_count(), report.deleted_count());
            if report.has_errors() {
                println!("✘ エラー: {}件", report.error_count());
                for e in report.all_errors() {
                    println!("  - {}", e);
                }
            }

            if pause {
                wait_for_enter();
            }

            if report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Config { add_root, clear_roots, set_probe_limit, set_delay_ms, ignore, set_checkpoint, show } => {
            let mut config = Config::load().context("設定の読み込みに失敗しました")?;
            let mut changed = false;

            if clear_roots {
                config.roots.clear();
                changed = true;
            }
            for root in add_root {
                config.add_root(root);
                changed = true;
            }
            if let Some(limit) = set_probe_limit {
                PlannerOptions::default().with_probe_limit(limit).validate()?;
                config.probe_limit = limit;
                changed = true;
            }
            if let Some(ms) = set_delay_ms {
                config.folder_delay_ms = ms;
                changed = true;
            }
            for name in ignore {
                if !config.extra_ignored.contains(&name) {
                    config.extra_ignored.push(name);
                }
                changed = true;
            }
            if let Some(enabled) = set_checkpoint {
                config.checkpoint = enabled;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                if config.roots.is_empty() {
                    println!("  スキャンルート: (自動検出)");
                } else {
                    println!("  スキャンルート:");
                    for root in &config.roots {
                        println!("    {}", root.display());
                    }
                }
                println!("  番号の上限: {}", config.probe_limit);
                println!("  待ち時間: {}ms", config.folder_delay_ms);
                println!("  除外名: {}", config.extra_ignored.join(", "));
                println!("  1件ごとの保存: {}", if config.checkpoint { "有効" } else { "無効" });
            }
        }

        Commands::History { folder } => {
            let history = JsonHistoryStore
                .load(&folder)
                .with_context(|| format!("履歴を読み込めません: {}", folder.display()))?;

            println!("履歴: {}", folder.display());
            println!("  リネーム済み: {}件", history.renamed.len());
            println!("  元ファイル名: {}件", history.originals.len());
            for pair in history.renamed.pairs() {
                println!("    {} -> {}", pair.original, pair.renamed);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// 実行ファイル自身の名前（一覧から除外する）
fn own_executable_name() -> Option<String> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
}

fn wait_for_enter() {
    println!("\n{}", "=".repeat(50));
    let _ = Input::<String>::new()
        .with_prompt("Press ENTER to exit...")
        .allow_empty(true)
        .interact_text();
}
