//! 言語判定モジュール
//!
//! - LanguageCode: 対応言語の閉じた列挙
//! - detect_language: 文字種の単一パススキャンによる言語判定
//!
//! 新しい言語の追加は、ここの文字種定義と図鑑データの名前列の追加だけで
//! 完結する（照合ロジック側の変更は不要）。

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 対応言語コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// 英語（デフォルト）
    En,
    /// 日本語
    Ja,
    /// 韓国語
    Ko,
    /// 中国語
    Zh,
    /// フランス語
    Fr,
    /// ドイツ語
    De,
}

impl LanguageCode {
    /// 全対応言語（図鑑テーブル構築順）
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::En,
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Zh,
        LanguageCode::Fr,
        LanguageCode::De,
    ];

    /// 判定時の優先順位（スクリプト系 > アクセント系 > デフォルト）
    const DETECT_PRIORITY: [LanguageCode; 5] = [
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Zh,
        LanguageCode::Fr,
        LanguageCode::De,
    ];

    /// 単語間スペースが意味を持たない言語か（CJK系）
    pub fn is_cjk(self) -> bool {
        matches!(self, LanguageCode::Ja | LanguageCode::Ko | LanguageCode::Zh)
    }

    /// 表示用の日本語ラベル
    pub fn label(self) -> &'static str {
        match self {
            LanguageCode::En => "英語",
            LanguageCode::Ja => "日本語",
            LanguageCode::Ko => "韓国語",
            LanguageCode::Zh => "中国語",
            LanguageCode::Fr => "フランス語",
            LanguageCode::De => "ドイツ語",
        }
    }

    fn code(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Ja => "ja",
            LanguageCode::Ko => "ko",
            LanguageCode::Zh => "zh",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
        }
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        LanguageCode::En
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(LanguageCode::En),
            "ja" | "jp" => Ok(LanguageCode::Ja),
            "ko" | "kr" => Ok(LanguageCode::Ko),
            "zh" | "cn" => Ok(LanguageCode::Zh),
            "fr" => Ok(LanguageCode::Fr),
            "de" => Ok(LanguageCode::De),
            other => Err(Error::Language(other.to_string())),
        }
    }
}

/// ひらがな・カタカナ（半角カナ含む）
fn is_japanese_kana(c: char) -> bool {
    let code = c as u32;
    (0x3040..=0x309F).contains(&code)        // ひらがな
        || (0x30A0..=0x30FF).contains(&code) // カタカナ
        || (0x31F0..=0x31FF).contains(&code) // カタカナ拡張
        || (0xFF66..=0xFF9F).contains(&code) // 半角カナ
}

/// ハングル（音節・字母）
fn is_hangul(c: char) -> bool {
    let code = c as u32;
    (0xAC00..=0xD7A3).contains(&code)        // ハングル音節
        || (0x1100..=0x11FF).contains(&code) // ハングル字母
        || (0x3130..=0x318F).contains(&code) // ハングル互換字母
}

/// CJK統合漢字（拡張A含む）
fn is_cjk_ideograph(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code) || (0x3400..=0x4DBF).contains(&code)
}

/// フランス語のアクセント文字
const FRENCH_ACCENTS: &str = "àâæçéèêëîïôœùûÀÂÆÇÉÈÊËÎÏÔŒÙÛ";

/// ドイツ語のウムラウト・エスツェット
const GERMAN_ACCENTS: &str = "äöüßÄÖÜ";

/// テキストの言語を判定する
///
/// 全文字を1回だけ走査し、各文字を高々1つの文字種（スクリプト範囲を
/// アクセント集合より優先）に分類する。走査後、出現した文字種のうち
/// 優先順（Ja > Ko > Zh > Fr > De）で最初の言語を返す。
/// どの文字種も出現しなければ（空文字・空白のみ・ASCIIのみを含む）
/// デフォルトの英語を返す。
///
/// 出現の有無のみを見る（頻度は数えない）ため、かな1文字でも含まれば
/// 漢字主体のテキストでも日本語と判定される。
pub fn detect_language(text: &str) -> LanguageCode {
    let mut seen = [false; 5]; // DETECT_PRIORITY と同順

    for c in text.chars() {
        if is_japanese_kana(c) {
            seen[0] = true;
        } else if is_hangul(c) {
            seen[1] = true;
        } else if is_cjk_ideograph(c) {
            seen[2] = true;
        } else if FRENCH_ACCENTS.contains(c) {
            seen[3] = true;
        } else if GERMAN_ACCENTS.contains(c) {
            seen[4] = true;
        }
    }

    for (i, lang) in LanguageCode::DETECT_PRIORITY.iter().enumerate() {
        if seen[i] {
            return *lang;
        }
    }
    LanguageCode::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_empty_is_default() {
        // 空文字・空白のみはデフォルト言語
        assert_eq!(detect_language(""), LanguageCode::En);
        assert_eq!(detect_language("   \t\n"), LanguageCode::En);
    }

    #[test]
    fn test_detect_ascii_is_default() {
        // アクセントなしASCIIは英語
        assert_eq!(detect_language("charmander appears here"), LanguageCode::En);
        assert_eq!(detect_language("No.004 HP 70"), LanguageCode::En);
    }

    #[test]
    fn test_detect_japanese_kana() {
        assert_eq!(detect_language("ヒトカゲ"), LanguageCode::Ja);
        assert_eq!(detect_language("ひとかげ"), LanguageCode::Ja);
        // 半角カナ
        assert_eq!(detect_language("ﾋﾄｶｹﾞ"), LanguageCode::Ja);
    }

    #[test]
    fn test_detect_japanese_beats_ideographs() {
        // 漢字混じりでもかなが1文字あれば日本語
        assert_eq!(detect_language("炎のポケモン"), LanguageCode::Ja);
    }

    #[test]
    fn test_detect_korean() {
        assert_eq!(detect_language("파이리"), LanguageCode::Ko);
        assert_eq!(detect_language("피카츄 HP70"), LanguageCode::Ko);
    }

    #[test]
    fn test_detect_chinese_ideographs_only() {
        // かな・ハングルなしの漢字のみは中国語
        assert_eq!(detect_language("小火龍"), LanguageCode::Zh);
        assert_eq!(detect_language("皮卡丘"), LanguageCode::Zh);
    }

    #[test]
    fn test_detect_french_accents() {
        assert_eq!(detect_language("Salamèche"), LanguageCode::Fr);
        assert_eq!(detect_language("Dracaufeu évolué"), LanguageCode::Fr);
    }

    #[test]
    fn test_detect_german_umlauts() {
        assert_eq!(detect_language("Glurak für Sammler"), LanguageCode::De);
        assert_eq!(detect_language("Größe 1,7m"), LanguageCode::De);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for lang in LanguageCode::ALL {
            let parsed: LanguageCode = lang.to_string().parse().unwrap();
            assert_eq!(parsed, lang);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("jp".parse::<LanguageCode>().unwrap(), LanguageCode::Ja);
        assert_eq!("KR".parse::<LanguageCode>().unwrap(), LanguageCode::Ko);
        assert!("xx".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LanguageCode::Ja).unwrap();
        assert_eq!(json, "\"ja\"");
        let back: LanguageCode = serde_json::from_str("\"ko\"").unwrap();
        assert_eq!(back, LanguageCode::Ko);
    }
}
