use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carddex")]
#[command(about = "ポケモンカードOCR照合・カードファイル台帳生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スキャンフォルダを照合してコレクションへ追記
    Scan {
        /// スキャン画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 図鑑マスタJSONファイル（省略時は設定値）
        #[arg(short, long)]
        dex: Option<PathBuf>,

        /// OCRパス数（設定のパス言語リストの先頭からN個）
        #[arg(short, long)]
        passes: Option<usize>,

        /// OCRコマンドテンプレート（{image}と{lang}を置換）
        #[arg(long)]
        ocr_cmd: Option<String>,

        /// キャッシュを読まず再OCR（結果は書き込む）
        #[arg(long)]
        no_cache: bool,

        /// 確認プロンプトなしで追記
        #[arg(short = 'y', long)]
        yes: bool,

        /// コレクションファイル（デフォルト: フォルダ内 carddex_collection.json）
        #[arg(short, long)]
        collection: Option<PathBuf>,

        /// 入力をVision APIラベルJSONとして照合
        #[arg(long)]
        labels: bool,
    },

    /// 図鑑番号の収納位置を表示
    Locate {
        /// 図鑑番号（1始まり）
        #[arg(required = true)]
        no: u32,

        /// 図鑑マスタJSONファイル（省略時は設定値）
        #[arg(short, long)]
        dex: Option<PathBuf>,

        /// 1ページあたりのスロット数
        #[arg(long)]
        slots_per_page: Option<u32>,

        /// 1バインダーあたりのページ数
        #[arg(long)]
        pages_per_binder: Option<u32>,
    },

    /// コレクションから台帳Excelを生成
    Ledger {
        /// コレクションファイル
        #[arg(short, long, default_value = "carddex_collection.json")]
        collection: PathBuf,

        /// 出力xlsxファイル
        #[arg(short, long, default_value = "carddex_ledger.xlsx")]
        output: PathBuf,

        /// 図鑑マスタJSONファイル（省略時は設定値）
        #[arg(short, long)]
        dex: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 図鑑マスタのパスを設定
        #[arg(long)]
        set_dex: Option<PathBuf>,

        /// OCRコマンドテンプレートを設定
        #[arg(long)]
        set_ocr_cmd: Option<String>,

        /// 1ページあたりのスロット数を設定
        #[arg(long)]
        set_slots_per_page: Option<u32>,

        /// 1バインダーあたりのページ数を設定
        #[arg(long)]
        set_pages_per_binder: Option<u32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// OCRキャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
