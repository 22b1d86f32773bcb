//! エンティティラベル照合モジュール
//!
//! Vision API系のWebエンティティ応答（description + score の列）から
//! 候補語を切り出し、デフォルト言語のネームテーブルと照合する。
//! この経路は完全一致（部分文字列）のみで、あいまい一致は行わない。

use crate::dex::NameTable;
use crate::matcher::find_exact_match;
use crate::types::{EntityLabel, MatchResult};
use regex::Regex;
use std::collections::HashSet;

/// ラベルのdescriptionから照合候補語を切り出す
///
/// 抽出順:
/// 1. 句読点・括弧・ダッシュ類で区切った断片（出現順）
/// 2. 末尾1〜3語の窓（短い順）
///
/// 重複は最初の1件のみ残す。
///
/// # Arguments
/// * `description` - ラベルのdescription文字列
///
/// # Returns
/// * 候補語のリスト（抽出順。空文字列は含まない）
///
/// # Examples
/// ```
/// use carddex_common::entity::extract_candidates;
///
/// let candidates = extract_candidates("Pokemon card (Charizard)");
/// assert!(candidates.contains(&"Charizard".to_string()));
/// ```
pub fn extract_candidates(description: &str) -> Vec<String> {
    lazy_static::lazy_static! {
        // 句読点・括弧・ダッシュ類
        static ref SPLIT_RE: Regex =
            Regex::new(r#"[,.;:!?()\[\]{}"'・、。｜|/\-–—]+"#).unwrap();
    }

    let mut candidates: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    // 区切り文字で切った断片
    for segment in SPLIT_RE.split(description) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if seen.insert(segment.to_string()) {
            candidates.push(segment.to_string());
        }
    }

    // 末尾1〜3語の窓
    let words: Vec<&str> = description.split_whitespace().collect();
    for n in 1..=3usize {
        if words.len() < n {
            break;
        }
        let window = words[words.len() - n..].join(" ");
        if !window.chars().any(|c| c.is_alphanumeric()) {
            continue;
        }
        if seen.insert(window.clone()) {
            candidates.push(window);
        }
    }

    candidates
}

/// エンティティラベル列をネームテーブルと照合する
///
/// ラベルをスコア降順（同点は元の順）に並べ、descriptionごとに候補語を
/// 抽出して順に完全一致照合する。最初にヒットした候補の結果を即座に
/// 返す（以降のラベル・候補は走査しない）。
///
/// `table` にはデフォルト言語のテーブルを渡すこと。ラベル応答は
/// デフォルト言語で返る前提であり、合意言語には左右されない。
///
/// # Arguments
/// * `labels` - エンティティラベル列
/// * `table` - デフォルト言語のネームテーブル
///
/// # Returns
/// * `Some(MatchResult)` - 最初にヒットした照合結果
/// * `None` - どの候補語もヒットしない場合
pub fn match_entities(labels: &[EntityLabel], table: &NameTable) -> Option<MatchResult> {
    let mut sorted: Vec<&EntityLabel> = labels.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for label in sorted {
        for candidate in extract_candidates(&label.description) {
            if let Some(result) = find_exact_match(&candidate, table) {
                return Some(result);
            }
        }
    }

    None
}
