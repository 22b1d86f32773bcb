//! コレクションファイル管理モジュール
//!
//! 確定したスキャンレコードをコレクションJSONへ追記する。
//! ファイルはCLI側の所有物で、照合コアは関与しない。
//! 同一番号の重複追記は許容する（再スキャン。台帳側で最新のみ残す）。

use crate::error::{CardDexError, Result};
use carddex_common::pipeline::ScanOutcome;
use carddex_common::types::ScanRecord;
use dialoguer::Input;
use std::path::Path;

pub const DEFAULT_COLLECTION_FILE: &str = "carddex_collection.json";

/// 確認アクション
pub enum ConfirmAction {
    /// 追記する
    Accept,
    /// この1枚をスキップ
    Skip,
    /// 残りを全部追記
    AcceptAll,
    /// 中断（ここまでの確定分だけ保存）
    Quit,
}

/// コレクションを読み込み（ファイルがなければ空）
pub fn load_collection(path: &Path) -> Result<Vec<ScanRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CardDexError::InvalidCollection(format!("{}: {}", path.display(), e)))
}

/// レコードを追記して保存し、保存後の総件数を返す
pub fn append_records(path: &Path, new_records: Vec<ScanRecord>) -> Result<usize> {
    let mut records = load_collection(path)?;
    records.extend(new_records);

    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, json)?;

    Ok(records.len())
}

/// 照合結果から確定レコードを組み立てる（合意なしはNone）
pub fn build_record(outcome: &ScanOutcome, source_file: &str) -> Option<ScanRecord> {
    let no = outcome.consensus.no?;
    let placement = outcome.placement?;

    Some(ScanRecord {
        no,
        display_name: outcome.consensus.display_name.clone().unwrap_or_default(),
        language: outcome.consensus.language,
        binder: placement.binder,
        page: placement.page,
        slot_on_page: placement.slot_on_page,
        slot_in_binder: placement.slot_in_binder,
        source_file: source_file.to_string(),
        scanned_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

/// 1枚分の追記を対話で確認
pub fn prompt_confirm(display_name: &str) -> Result<ConfirmAction> {
    let input: String = Input::new()
        .with_prompt(format!(
            "  {} を追記 (Enter:追記 s:スキップ a:残り全部 q:中断)",
            display_name
        ))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CardDexError::CliExecution(e.to_string()))?;

    match input.trim() {
        "" | "y" | "Y" => Ok(ConfirmAction::Accept),
        "a" | "A" => Ok(ConfirmAction::AcceptAll),
        "q" | "Q" => Ok(ConfirmAction::Quit),
        _ => Ok(ConfirmAction::Skip),
    }
}
