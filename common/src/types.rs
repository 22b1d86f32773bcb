//! 照合結果の型定義
//!
//! CLIとUIフロントエンドで共有される型:
//! - DexEntry: 図鑑マスタの1エントリ
//! - Observation: 1回分のノイズ込み読み取り（OCRテキスト or ラベル）
//! - MatchResult: 1観測に対する照合結果
//! - ConsensusResult: 多数決後の合意結果
//! - ScanRecord: コレクションに追記する確定レコード

use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 図鑑マスタの1エントリ
///
/// `no` は 1..=N の図鑑番号。`names` は言語ごとの表示名で、
/// 一部言語の名前が欠けていてもよい（デフォルト言語へフォールバック）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DexEntry {
    pub no: u32,
    pub names: HashMap<LanguageCode, String>,
}

impl DexEntry {
    /// 指定言語の表示名（なければNone）
    pub fn name(&self, lang: LanguageCode) -> Option<&str> {
        self.names.get(&lang).map(|s| s.as_str())
    }
}

/// Vision APIのエンティティラベル1件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityLabel {
    pub description: String,
    pub score: f64,
}

/// 1回分の独立した読み取り
///
/// 同じカードに対してOCRパスやフレームごとに複数作られ、
/// 多数決でノイズを打ち消す。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Observation {
    /// OCRテキスト読み取り（hintは読み取り時に指定した言語ヒント）
    Text {
        raw: String,
        #[serde(default)]
        hint: LanguageCode,
    },
    /// ラベルベース読み取り（デフォルト言語で返る前提）
    Labels { entities: Vec<EntityLabel> },
}

impl Observation {
    pub fn text(raw: impl Into<String>, hint: LanguageCode) -> Self {
        Observation::Text {
            raw: raw.into(),
            hint,
        }
    }

    pub fn labels(entities: Vec<EntityLabel>) -> Self {
        Observation::Labels { entities }
    }

    /// テキスト観測の生テキスト（ラベル観測はNone）
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Observation::Text { raw, .. } => Some(raw.as_str()),
            Observation::Labels { .. } => None,
        }
    }
}

/// 1観測に対する照合結果
///
/// confidenceは同一観測内の順位付け専用の相対スコア。
/// 言語間・照合方式間で比較してはいけない。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchResult {
    pub no: u32,
    pub display_name: String,
    pub confidence: f64,
}

/// 観測集合を多数決で畳み込んだ合意結果
///
/// `no` がNoneの場合は「確信できる候補なし」（エラーではない）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsensusResult {
    pub language: LanguageCode,
    pub no: Option<u32>,
    pub display_name: Option<String>,
}

/// コレクションファイルに追記する確定レコード
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRecord {
    pub no: u32,
    pub display_name: String,
    pub language: LanguageCode,
    pub binder: u32,
    pub page: u32,
    pub slot_on_page: u32,
    pub slot_in_binder: u32,
    pub source_file: String,
    /// 記録日時（YYYY-MM-DD HH:MM:SS）
    pub scanned_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dex_entry_default() {
        let entry = DexEntry::default();
        assert_eq!(entry.no, 0);
        assert!(entry.names.is_empty());
    }

    #[test]
    fn test_dex_entry_deserialize() {
        let json = r#"{
            "no": 4,
            "names": {"en": "Charmander", "ja": "ヒトカゲ", "ko": "파이리"}
        }"#;

        let entry: DexEntry = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(entry.no, 4);
        assert_eq!(entry.name(LanguageCode::En), Some("Charmander"));
        assert_eq!(entry.name(LanguageCode::Ja), Some("ヒトカゲ"));
        assert_eq!(entry.name(LanguageCode::Fr), None);
    }

    #[test]
    fn test_observation_text_serialize() {
        let obs = Observation::text("ヒトカゲ HP70", LanguageCode::Ja);
        let json = serde_json::to_string(&obs).expect("シリアライズ失敗");
        assert!(json.contains("\"kind\":\"text\""));
        assert!(json.contains("\"hint\":\"ja\""));
    }

    #[test]
    fn test_observation_labels_roundtrip() {
        let obs = Observation::labels(vec![EntityLabel {
            description: "charmander pokemon card".to_string(),
            score: 0.92,
        }]);

        let json = serde_json::to_string(&obs).expect("シリアライズ失敗");
        let restored: Observation = serde_json::from_str(&json).expect("デシリアライズ失敗");
        match restored {
            Observation::Labels { entities } => {
                assert_eq!(entities.len(), 1);
                assert_eq!(entities[0].description, "charmander pokemon card");
            }
            _ => panic!("ラベル観測で復元されるはず"),
        }
    }

    #[test]
    fn test_observation_text_hint_defaults_to_en() {
        // hint省略時はデフォルト言語
        let json = r#"{"kind": "text", "raw": "pikachu"}"#;
        let obs: Observation = serde_json::from_str(json).expect("デシリアライズ失敗");
        match obs {
            Observation::Text { hint, .. } => assert_eq!(hint, LanguageCode::En),
            _ => panic!("テキスト観測で復元されるはず"),
        }
    }

    #[test]
    fn test_match_result_serialize() {
        let result = MatchResult {
            no: 4,
            display_name: "Charmander".to_string(),
            confidence: 110.0,
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"no\":4"));
        assert!(json.contains("\"displayName\":\"Charmander\""));
    }

    #[test]
    fn test_consensus_result_default() {
        let consensus = ConsensusResult::default();
        assert_eq!(consensus.language, LanguageCode::En);
        assert!(consensus.no.is_none());
        assert!(consensus.display_name.is_none());
    }

    #[test]
    fn test_scan_record_roundtrip() {
        let original = ScanRecord {
            no: 25,
            display_name: "ピカチュウ".to_string(),
            language: LanguageCode::Ja,
            binder: 1,
            page: 3,
            slot_on_page: 7,
            slot_in_binder: 25,
            source_file: "scan_025.jpg".to_string(),
            scanned_at: "2026-08-25 10:30:00".to_string(),
        };

        let json = serde_json::to_string(&original).expect("シリアライズ失敗");
        assert!(json.contains("\"slotOnPage\":7"));
        assert!(json.contains("\"scannedAt\""));

        let restored: ScanRecord = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(restored.no, original.no);
        assert_eq!(restored.display_name, original.display_name);
        assert_eq!(restored.slot_in_binder, original.slot_in_binder);
    }

    #[test]
    fn test_scan_record_deserialize_missing_fields() {
        // 旧フォーマットのレコードも読めることを確認
        let json = r#"{"no": 7, "displayName": "Squirtle"}"#;

        let record: ScanRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.no, 7);
        assert_eq!(record.language, LanguageCode::En); // デフォルト値
        assert_eq!(record.binder, 0); // デフォルト値
    }
}
