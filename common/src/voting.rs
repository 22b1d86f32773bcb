//! 多数決集計モジュール
//!
//! 複数の独立した読み取り結果を1つの合意に畳み込む:
//! - vote_language: 言語の多数決
//! - vote_identity: 図鑑番号の多数決
//! - run_voting_pipeline: 言語投票 → 勝者言語で再照合 → 番号投票の2段構え
//!
//! 同数の場合は常に先に現れた方を採用する。

use crate::dex::NameTable;
use crate::language::LanguageCode;
use crate::types::{ConsensusResult, MatchResult, Observation};

/// 言語の多数決
///
/// 出現回数が最大の言語を返す。同数は先に現れた言語が勝つ。
/// 空ならデフォルト言語。
pub fn vote_language(samples: &[LanguageCode]) -> LanguageCode {
    let mut counts: Vec<(LanguageCode, usize)> = Vec::new();
    for &lang in samples {
        match counts.iter_mut().find(|(l, _)| *l == lang) {
            Some((_, count)) => *count += 1,
            None => counts.push((lang, 1)),
        }
    }

    let mut best: Option<(LanguageCode, usize)> = None;
    for (lang, count) in counts {
        let replace = match best {
            None => true,
            Some((_, best_count)) => count > best_count,
        };
        if replace {
            best = Some((lang, count));
        }
    }

    best.map(|(lang, _)| lang).unwrap_or_default()
}

/// 図鑑番号の多数決
///
/// 番号ごとの出現回数（confidenceの合計ではない）で数え、最多の番号の
/// 最初に現れたMatchResultを代表として返す。同数は先に現れた番号が勝つ。
/// 空ならNone。
pub fn vote_identity(matches: &[MatchResult]) -> Option<MatchResult> {
    let mut groups: Vec<(u32, usize, &MatchResult)> = Vec::new();
    for result in matches {
        match groups.iter_mut().find(|(no, _, _)| *no == result.no) {
            Some((_, count, _)) => *count += 1,
            None => groups.push((result.no, 1, result)),
        }
    }

    let mut best: Option<(usize, &MatchResult)> = None;
    for (_, count, repr) in groups {
        let replace = match best {
            None => true,
            Some((best_count, _)) => count > best_count,
        };
        if replace {
            best = Some((count, repr));
        }
    }

    best.map(|(_, repr)| repr.clone())
}

/// 2段階の投票パイプライン
///
/// 1. テキスト観測ごとに `detect_fn` で言語を推定（ラベル観測は言語投票に
///    参加しない）
/// 2. `vote_language` で合意言語を決定
/// 3. `table_fn` で合意言語のテーブルを引き直し、**全観測**を `match_fn` で
///    そのテーブルに対して照合する（観測ごとの推定言語は使わない。
///    全サンプルを単一の解釈に揃えるため）
/// 4. `vote_identity` で合意番号を決定
///
/// 関数を注入する形にしてあるので、テストでは決定的なスタブを渡せる。
pub fn run_voting_pipeline<'a, D, M, T>(
    observations: &[Observation],
    detect_fn: D,
    match_fn: M,
    table_fn: T,
) -> ConsensusResult
where
    D: Fn(&str) -> LanguageCode,
    M: Fn(&Observation, &NameTable) -> Option<MatchResult>,
    T: Fn(LanguageCode) -> &'a NameTable,
{
    // フェーズ1: 言語の推定と投票
    let guesses: Vec<LanguageCode> = observations
        .iter()
        .filter_map(|obs| obs.raw_text().map(|raw| detect_fn(raw)))
        .collect();
    let language = vote_language(&guesses);

    // フェーズ2: 勝者言語のテーブルで全観測を照合し直して投票
    let table = table_fn(language);
    let matches: Vec<MatchResult> = observations
        .iter()
        .filter_map(|obs| match_fn(obs, table))
        .collect();
    let winner = vote_identity(&matches);

    ConsensusResult {
        language,
        no: winner.as_ref().map(|w| w.no),
        display_name: winner.map(|w| w.display_name),
    }
}
