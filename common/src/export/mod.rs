//! 台帳出力の共通コア
//!
//! CLI側のファイル書き出しから再利用される。

#[cfg(feature = "excel")]
pub mod ledger;
