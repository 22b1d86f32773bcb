//! 観測収集モジュール
//!
//! 設定されたOCRコマンドテンプレートを言語ヒントごとに1回ずつ実行し、
//! 各実行のstdoutを1観測として集める:
//! - {image} → 画像ファイルのパス
//! - {lang} → 言語ヒントのコード（en/ja/ko等）
//!
//! どれか1パスでも失敗したらその画像の観測収集全体を失敗させる
//! （部分的な観測集合で投票しない）。

pub mod cache;

use crate::error::{CardDexError, Result};
use crate::scanner::ScanItem;
use cache::CacheFile;
use carddex_common::language::LanguageCode;
use carddex_common::types::{EntityLabel, Observation};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::Command;

/// OCR実行設定
#[derive(Debug, Clone)]
pub struct OcrEngine {
    command: String,
    passes: Vec<LanguageCode>,
}

impl OcrEngine {
    pub fn new(command: String, passes: Vec<LanguageCode>) -> Self {
        Self { command, passes }
    }

    pub fn passes(&self) -> &[LanguageCode] {
        &self.passes
    }

    /// 1画像の全パスを実行して観測を集める
    ///
    /// use_cache=false でもキャッシュへの書き込みは行う。
    pub async fn gather_observations(
        &self,
        item: &ScanItem,
        cache: &mut CacheFile,
        use_cache: bool,
        verbose: bool,
    ) -> Result<Vec<Observation>> {
        let file_size = std::fs::metadata(&item.path)?.len();
        let mut observations = Vec::with_capacity(self.passes.len());

        for &lang in &self.passes {
            let key = cache::compute_cache_key(&item.path, lang, &self.command)?;

            let cached = if use_cache {
                cache.get(&key).map(|t| t.to_string())
            } else {
                None
            };

            let text = match cached {
                Some(text) => {
                    if verbose {
                        println!("  [{}] キャッシュヒット: {}", lang, item.file_name);
                    }
                    text
                }
                None => {
                    let text = run_ocr_command(&self.command, &item.path, lang, verbose)?;
                    cache.insert(key, item.file_name.clone(), file_size, text.clone());
                    text
                }
            };

            observations.push(Observation::text(text, lang));
        }

        Ok(observations)
    }
}

/// 全スキャン対象の観測を集める（1件でも失敗したら全体を中断）
pub async fn gather_all(
    engine: &OcrEngine,
    items: &[ScanItem],
    cache: &mut CacheFile,
    use_cache: bool,
    verbose: bool,
) -> Result<Vec<Vec<Observation>>> {
    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut all = Vec::with_capacity(items.len());
    for item in items {
        pb.set_message(item.file_name.clone());
        let observations = engine
            .gather_observations(item, cache, use_cache, verbose)
            .await?;
        all.push(observations);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(all)
}

/// ラベルJSONファイルを観測として読み込む（OCRの代替経路）
///
/// 1ファイル = 1観測。[{"description": ..., "score": ...}] の配列形式。
pub fn load_label_observations(items: &[ScanItem]) -> Result<Vec<Vec<Observation>>> {
    let mut all = Vec::with_capacity(items.len());

    for item in items {
        let content = std::fs::read_to_string(&item.path)?;
        let entities: Vec<EntityLabel> = serde_json::from_str(&content)?;
        all.push(vec![Observation::labels(entities)]);
    }

    Ok(all)
}

/// テンプレートのプレースホルダを置換してコマンド行を組み立てる
fn build_command_args(template: &str, image: &Path, lang: LanguageCode) -> Vec<String> {
    template
        .split_whitespace()
        .map(|token| {
            token
                .replace("{image}", &image.display().to_string())
                .replace("{lang}", &lang.to_string())
        })
        .collect()
}

fn run_ocr_command(
    template: &str,
    image: &Path,
    lang: LanguageCode,
    verbose: bool,
) -> Result<String> {
    let args = build_command_args(template, image, lang);
    let program = match args.first() {
        Some(program) => program.clone(),
        None => {
            return Err(CardDexError::OcrCommand(
                "コマンドテンプレートが空です".into(),
            ))
        }
    };

    if verbose {
        println!("  [{}] 実行: {}", lang, args.join(" "));
    }

    let output = Command::new(&program)
        .args(&args[1..])
        .output()
        .map_err(|e| CardDexError::OcrCommand(format!("{} の起動に失敗: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CardDexError::OcrCommand(format!(
            "{} が失敗 (code {:?}): {}",
            program,
            output.status.code(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
