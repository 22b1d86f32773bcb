//! スキャンパイプライン
//!
//! 1回のスキャン試行（観測の束）を合意結果と配置先に変換する。
//! 永続化もUIも知らず、呼び出し間で状態を持たない。

use crate::album::{locate, AlbumLayout, Placement};
use crate::dex::Dex;
use crate::entity::match_entities;
use crate::language::{detect_language, LanguageCode};
use crate::matcher::find_best_match;
use crate::types::{ConsensusResult, Observation};
use crate::voting::run_voting_pipeline;
use serde::{Deserialize, Serialize};

/// 1スキャンの最終出力
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub consensus: ConsensusResult,
    /// 合意番号が得られた場合のみ
    pub placement: Option<Placement>,
}

/// スキャンパイプライン
///
/// 図鑑マスタとアルバムレイアウトを束ねた照合の入口。
/// テキスト観測は言語投票 → 勝者言語のテーブルで照合、
/// ラベル観測は常にデフォルト言語のテーブルで照合する。
#[derive(Debug, Clone)]
pub struct ScanPipeline<'a> {
    dex: &'a Dex,
    layout: AlbumLayout,
}

impl<'a> ScanPipeline<'a> {
    pub fn new(dex: &'a Dex, layout: AlbumLayout) -> Self {
        ScanPipeline { dex, layout }
    }

    pub fn dex(&self) -> &Dex {
        self.dex
    }

    pub fn layout(&self) -> &AlbumLayout {
        &self.layout
    }

    /// 観測の束を合意結果と配置先に畳み込む
    pub fn run(&self, observations: &[Observation]) -> ScanOutcome {
        let dex = self.dex;

        let consensus = run_voting_pipeline(
            observations,
            detect_language,
            |obs, table| match obs {
                Observation::Text { raw, .. } => find_best_match(raw, table),
                Observation::Labels { entities } => {
                    match_entities(entities, dex.table_or_default(LanguageCode::default()))
                }
            },
            |lang| dex.table_or_default(lang),
        );

        // 合意番号はマスタ由来なので必ず範囲内
        let placement = consensus
            .no
            .and_then(|no| locate(no, dex.max_no(), &self.layout).ok());

        ScanOutcome {
            consensus,
            placement,
        }
    }
}
