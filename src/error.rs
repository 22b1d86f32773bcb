use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardDexError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("スキャン対象が見つかりません: {0}")]
    NoScansFound(String),

    #[error("OCRコマンド実行エラー: {0}")]
    OcrCommand(String),

    #[error("コレクションファイルが不正: {0}")]
    InvalidCollection(String),

    #[error("台帳生成エラー: {0}")]
    LedgerGeneration(String),

    #[error("照合エンジンエラー: {0}")]
    Core(#[from] carddex_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, CardDexError>;
