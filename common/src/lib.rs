//! CardDex Common Library
//!
//! CLIと将来のUIフロントエンドで共有される照合エンジンと型
//!
//! 処理の流れ:
//! 1. language: 生テキストから言語を推定
//! 2. matcher: 言語テーブルに対して正規化＋曖昧照合
//! 3. voting: 観測集合を言語→個体の二段多数決で畳む
//! 4. album: 図鑑番号を（バインダー, ページ, スロット）へ変換

pub mod album;
pub mod dex;
pub mod entity;
pub mod error;
pub mod export;
pub mod language;
pub mod matcher;
pub mod pipeline;
pub mod types;
pub mod voting;

pub use album::{locate, AlbumLayout, Placement};
pub use dex::{Dex, NameRow, NameTable};
pub use entity::{extract_candidates, match_entities};
pub use error::{Error, Result};
pub use language::{detect_language, LanguageCode};
pub use matcher::{find_best_match, find_exact_match, normalize_text, MatchOptions};
pub use pipeline::{ScanOutcome, ScanPipeline};
pub use types::{ConsensusResult, DexEntry, EntityLabel, MatchResult, Observation, ScanRecord};
pub use voting::{run_voting_pipeline, vote_identity, vote_language};
