//! 名称照合モジュール
//!
//! OCRテキストと図鑑ネームテーブルの照合:
//! - normalize_text: 言語別の表記正規化（テーブル構築側と共通）
//! - find_best_match: 完全一致（部分文字列）+ あいまい一致（編集距離）
//!
//! スコアは同一テーブル内の順位付け専用。完全一致には大きなボーナスを
//! 加算し、あいまい一致が完全一致を上回ることはない。

use crate::dex::NameTable;
use crate::language::LanguageCode;
use crate::types::MatchResult;
use regex::Regex;

/// 照合パラメータ
///
/// 経験的に調整された値であり、導出式はない。既定値を変える場合は
/// `find_best_match_with` に渡す。
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// 完全一致に加算するボーナス（あいまい一致の最大スコアより大きいこと）
    pub exact_bonus: f64,
    /// この文字数以下の候補は短名扱い
    pub short_len: usize,
    /// 短名候補の許容編集距離
    pub short_tolerance: usize,
    /// 通常候補の許容編集距離
    pub tolerance: usize,
    /// スコア計算時の距離ペナルティ係数
    pub distance_weight: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            exact_bonus: 100.0,
            short_len: 3,
            short_tolerance: 1,
            tolerance: 2,
            distance_weight: 1.5,
        }
    }
}

/// 言語に応じてテキストを正規化する
///
/// CJK系（ja/ko/zh）は空白が語区切りとして意味を持たないため全空白を
/// 除去する。スペース区切り言語は全角英数字を半角に揃えてから小文字化し、
/// 連続空白を単一スペースにまとめて前後を切り詰める。
/// 生テキストとテーブル側の名前は必ず同じ正規化を通すこと。
pub fn normalize_text(text: &str, lang: LanguageCode) -> String {
    if lang.is_cjk() {
        return text.chars().filter(|c| !c.is_whitespace()).collect();
    }

    lazy_static::lazy_static! {
        static ref WS_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let folded = fold_fullwidth_ascii(text);
    let lowered = folded.to_lowercase();
    WS_RE.replace_all(lowered.trim(), " ").to_string()
}

/// 全角英数字を半角に変換（OCRは全角で返すことが多い）
fn fold_fullwidth_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'Ａ'..='Ｚ' => (((c as u32) - ('Ａ' as u32) + ('A' as u32)) as u8) as char,
            'ａ'..='ｚ' => (((c as u32) - ('ａ' as u32) + ('a' as u32)) as u8) as char,
            '０'..='９' => (((c as u32) - ('０' as u32) + ('0' as u32)) as u8) as char,
            _ => c,
        })
        .collect()
}

/// 生テキストに最も合う図鑑エントリを探す
///
/// テーブル全行を走査し、最高スコアの1件を返す。スコアが同点の場合は
/// 先に見つかった行（= 図鑑番号の小さい方）を保持する。
/// 空テキスト・空テーブルは走査せずNone。
pub fn find_best_match(raw_text: &str, table: &NameTable) -> Option<MatchResult> {
    find_best_match_with(raw_text, table, &MatchOptions::default())
}

/// パラメータ指定付きの照合
pub fn find_best_match_with(
    raw_text: &str,
    table: &NameTable,
    options: &MatchOptions,
) -> Option<MatchResult> {
    if table.is_empty() {
        return None;
    }

    let normalized = normalize_text(raw_text, table.language());
    if normalized.is_empty() {
        return None;
    }
    let text_chars: Vec<char> = normalized.chars().collect();

    let mut best: Option<(f64, u32, &str)> = None;
    for row in table.rows() {
        let score = match score_candidate(&normalized, &text_chars, &row.normalized, options) {
            Some(score) => score,
            None => continue,
        };

        // 同点は先勝ち（挿入順 = 図鑑番号順）
        let replace = match best {
            None => true,
            Some((best_score, _, _)) => score > best_score,
        };
        if replace {
            best = Some((score, row.no, row.display.as_str()));
        }
    }

    best.map(|(score, no, display)| MatchResult {
        no,
        display_name: display.to_string(),
        confidence: score,
    })
}

/// 完全一致（部分文字列）のみの照合
///
/// エンティティラベル経路用。あいまい一致フェーズを持たない以外は
/// `find_best_match` と同じ規則（最高スコア1件、同点は先勝ち）。
pub fn find_exact_match(raw_text: &str, table: &NameTable) -> Option<MatchResult> {
    if table.is_empty() {
        return None;
    }

    let normalized = normalize_text(raw_text, table.language());
    if normalized.is_empty() {
        return None;
    }

    let bonus = MatchOptions::default().exact_bonus;
    let mut best: Option<(f64, u32, &str)> = None;
    for row in table.rows() {
        if !normalized.contains(row.normalized.as_str()) {
            continue;
        }
        let score = row.normalized.chars().count() as f64 + bonus;
        let replace = match best {
            None => true,
            Some((best_score, _, _)) => score > best_score,
        };
        if replace {
            best = Some((score, row.no, row.display.as_str()));
        }
    }

    best.map(|(score, no, display)| MatchResult {
        no,
        display_name: display.to_string(),
        confidence: score,
    })
}

/// 候補1件のスコアを計算（閾値を超えなければNone）
fn score_candidate(
    text: &str,
    text_chars: &[char],
    candidate: &str,
    options: &MatchOptions,
) -> Option<f64> {
    let cand_chars: Vec<char> = candidate.chars().collect();
    let cand_len = cand_chars.len();

    // 1. 完全一致（部分文字列）
    if text.contains(candidate) {
        return Some(cand_len as f64 + options.exact_bonus);
    }

    // 2. あいまい一致: 候補と同じ長さの窓との最小編集距離
    let distance = min_window_distance(text_chars, &cand_chars);
    let tolerance = if cand_len <= options.short_len {
        options.short_tolerance
    } else {
        options.tolerance
    };

    if distance <= tolerance {
        Some(cand_len as f64 - distance as f64 * options.distance_weight)
    } else {
        None
    }
}

/// テキスト上をスライドする同長窓と候補の最小編集距離
///
/// 候補がテキストより長い場合はテキスト全体と直接比較する。
fn min_window_distance(text: &[char], candidate: &[char]) -> usize {
    if candidate.len() > text.len() {
        return levenshtein(text, candidate);
    }

    text.windows(candidate.len())
        .map(|window| levenshtein(window, candidate))
        .min()
        .unwrap_or(usize::MAX)
}

/// レーベンシュタイン距離（挿入・削除・置換コスト各1）
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for i in 0..=a_len {
        matrix[i][0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
