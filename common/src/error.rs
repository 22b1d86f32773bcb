//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dex error: {0}")]
    Dex(String),

    #[error("dex no {no} is out of range (valid: 1..={max})")]
    NoOutOfRange { no: u32, max: u32 },

    #[error("album layout error: {0}")]
    Layout(String),

    #[error("unsupported language code: {0}")]
    Language(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
