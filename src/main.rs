use carddex_common::album::{locate, AlbumLayout};
use carddex_common::dex::Dex;
use carddex_common::language::LanguageCode;
use carddex_common::pipeline::ScanPipeline;
use clap::Parser;

use carddex_rust::{cli, collection, config, error, export, ocr, scanner};
use cli::{Cli, Commands};
use collection::ConfirmAction;
use config::Config;
use error::{CardDexError, Result};

use std::io::IsTerminal;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Scan {
            folder,
            dex,
            passes,
            ocr_cmd,
            no_cache,
            yes,
            collection: collection_override,
            labels,
        } => {
            println!("📸 carddex - カードスキャン照合\n");

            let dex_path = dex.unwrap_or_else(|| PathBuf::from(&config.dex_path));
            let collection_path = collection_override
                .unwrap_or_else(|| folder.join(collection::DEFAULT_COLLECTION_FILE));

            // 1. 図鑑マスタ読み込み
            println!("[1/4] 図鑑マスタを読み込み中...");
            let dex = Dex::from_file(&dex_path)?;
            println!("✔ {}件（No.1〜{}）\n", dex.len(), dex.max_no());

            let layout = config.layout()?;
            let pipeline = ScanPipeline::new(&dex, layout);

            // 2. スキャン対象の列挙
            println!("[2/4] スキャンフォルダを走査中...");
            let collection_name = collection_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let items = if labels {
                scanner::scan_label_files(&folder, &[collection_name.as_str()])?
            } else {
                scanner::scan_folder(&folder)?
            };
            println!("✔ {}件を検出\n", items.len());

            if items.is_empty() {
                return Err(CardDexError::NoScansFound(folder.display().to_string()));
            }

            // 3. 観測の収集
            println!(
                "[3/4] 観測を収集中...{}",
                if no_cache { " (キャッシュ無効)" } else { "" }
            );
            let all_observations = if labels {
                ocr::load_label_observations(&items)?
            } else {
                let langs = config.pass_languages(passes)?;
                let template = ocr_cmd.unwrap_or_else(|| config.ocr_command.clone());
                let engine = ocr::OcrEngine::new(template, langs);
                let mut cache = ocr::cache::CacheFile::load(&folder);
                let gathered =
                    ocr::gather_all(&engine, &items, &mut cache, !no_cache, cli.verbose).await?;
                cache.save(&folder)?;
                gathered
            };
            println!("✔ 観測収集完了\n");

            // 4. 照合と追記
            println!("[4/4] 照合中...");
            let interactive = !yes && std::io::stdin().is_terminal();
            let mut confirmed = Vec::new();
            let mut accept_all = false;
            let mut matched = 0usize;

            for (item, observations) in items.iter().zip(&all_observations) {
                let outcome = pipeline.run(observations);

                match collection::build_record(&outcome, &item.file_name) {
                    Some(record) => {
                        matched += 1;
                        println!(
                            "  {} → No.{:03} {}（{}） バインダー{} {}ページ {}スロット",
                            item.file_name,
                            record.no,
                            record.display_name,
                            record.language.label(),
                            record.binder,
                            record.page,
                            record.slot_on_page,
                        );

                        if accept_all || !interactive {
                            confirmed.push(record);
                            continue;
                        }

                        match collection::prompt_confirm(&record.display_name)? {
                            ConfirmAction::Accept => confirmed.push(record),
                            ConfirmAction::AcceptAll => {
                                confirmed.push(record);
                                accept_all = true;
                            }
                            ConfirmAction::Skip => println!("  → スキップ"),
                            ConfirmAction::Quit => {
                                println!("  → 中断");
                                break;
                            }
                        }
                    }
                    None => {
                        println!(
                            "  {} → ⚠️ 確信できる候補なし（再スキャン推奨）",
                            item.file_name
                        );
                    }
                }
            }

            if confirmed.is_empty() {
                println!("\n追記するレコードはありません");
            } else {
                let appended = confirmed.len();
                let total = collection::append_records(&collection_path, confirmed)?;
                println!(
                    "\n✔ {}件を追記: {}（計{}件）",
                    appended,
                    collection_path.display(),
                    total
                );
            }

            println!("\n✅ スキャン完了（照合 {}/{}件）", matched, items.len());
        }

        Commands::Locate {
            no,
            dex,
            slots_per_page,
            pages_per_binder,
        } => {
            println!("📍 carddex - 収納位置検索\n");

            let dex_path = dex.unwrap_or_else(|| PathBuf::from(&config.dex_path));
            let dex = Dex::from_file(&dex_path)?;

            let slots = slots_per_page.unwrap_or(config.slots_per_page);
            let pages = pages_per_binder.unwrap_or(config.pages_per_binder);
            let layout = AlbumLayout::new(slots, pages)?;

            let placement = locate(no, dex.max_no(), &layout)?;
            let name = dex
                .display_name(no, LanguageCode::default())
                .unwrap_or("-");

            println!("No.{:03} {}", no, name);
            println!("  バインダー: {}", placement.binder);
            println!("  ページ: {}", placement.page);
            println!(
                "  スロット: {}（バインダー内通し {}）",
                placement.slot_on_page, placement.slot_in_binder
            );
        }

        Commands::Ledger {
            collection: collection_path,
            output,
            dex,
        } => {
            println!("📒 carddex - 台帳生成\n");

            let dex_path = dex.unwrap_or_else(|| PathBuf::from(&config.dex_path));

            println!("[1/2] コレクションを読み込み中...");
            let records = collection::load_collection(&collection_path)?;
            println!("✔ {}件のレコード\n", records.len());

            if records.is_empty() {
                return Err(CardDexError::InvalidCollection(format!(
                    "レコードがありません: {}",
                    collection_path.display()
                )));
            }

            println!("[2/2] 台帳を生成中...");
            let dex = Dex::from_file(&dex_path)?;
            let layout = config.layout()?;
            export::export_ledger(&records, &layout, &dex, &output)?;
            println!("✔ 台帳出力: {}", output.display());

            println!("\n✅ 完了");
        }

        Commands::Config {
            set_dex,
            set_ocr_cmd,
            set_slots_per_page,
            set_pages_per_binder,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_dex {
                config.dex_path = path.display().to_string();
                changed = true;
            }
            if let Some(cmd) = set_ocr_cmd {
                config.ocr_command = cmd;
                changed = true;
            }
            if let Some(slots) = set_slots_per_page {
                config.slots_per_page = slots;
                changed = true;
            }
            if let Some(pages) = set_pages_per_binder {
                config.pages_per_binder = pages;
                changed = true;
            }

            if changed {
                // 保存前にレイアウト値を検証
                config.layout()?;
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  図鑑マスタ: {}", config.dex_path);
                println!("  OCRコマンド: {}", config.ocr_command);
                println!("  OCRパス: {}", config.passes.join(", "));
                println!("  スロット/ページ: {}", config.slots_per_page);
                println!("  ページ/バインダー: {}", config.pages_per_binder);
            }
        }

        Commands::Cache {
            clear,
            folder,
            info,
        } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = ocr::cache::CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = ocr::cache::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!(
                        "キャッシュファイルが存在しません: {}",
                        cache_path.display()
                    );
                }
            }

            if clear {
                match ocr::cache::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
