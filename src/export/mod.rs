//! 台帳ファイル出力モジュール
//!
//! xlsx生成本体は carddex_common::export::ledger（バッファ生成）。
//! ここではファイルへの書き出しだけを担う。

use crate::error::{CardDexError, Result};
use carddex_common::album::AlbumLayout;
use carddex_common::dex::Dex;
use carddex_common::export::ledger;
use carddex_common::types::ScanRecord;
use std::path::Path;

/// コレクションを台帳xlsxとして書き出す
pub fn export_ledger(
    records: &[ScanRecord],
    layout: &AlbumLayout,
    dex: &Dex,
    output_path: &Path,
) -> Result<()> {
    let buffer =
        ledger::generate_ledger_buffer(records, layout, dex).map_err(CardDexError::LedgerGeneration)?;

    std::fs::write(output_path, buffer)?;
    Ok(())
}
