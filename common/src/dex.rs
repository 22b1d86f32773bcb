//! 図鑑マスタモジュール
//!
//! カード識別に使用する図鑑マスタデータを管理する。
//! JSONから読み込み、言語ごとのネームテーブルを事前構築する。
//! マスタはプロセス起動時に一度読み込まれ、以後は読み取り専用。

use crate::error::{Error, Result};
use crate::language::LanguageCode;
use crate::matcher::normalize_text;
use crate::types::DexEntry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// ネームテーブルの1行
#[derive(Debug, Clone)]
pub struct NameRow {
    /// 正規化済みの名前（照合キー）
    pub normalized: String,
    /// 元の表示名
    pub display: String,
    /// 図鑑番号
    pub no: u32,
}

/// 言語別ネームテーブル
///
/// 行は図鑑番号順。構築後は不変。
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    language: LanguageCode,
    rows: Vec<NameRow>,
}

impl NameTable {
    /// エントリ集合から構築
    ///
    /// 指定言語の名前を持たないエントリは飛ばす。正規化後に同じキーに
    /// なる名前はマスタ側のデータ不備であり、先勝ちで確定する
    /// （実行時エラーにはしない）。
    pub fn build(entries: &[DexEntry], language: LanguageCode) -> Self {
        let mut rows = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for entry in entries {
            let name = match entry.name(language) {
                Some(name) => name,
                None => continue,
            };

            let normalized = normalize_text(name, language);
            if normalized.is_empty() {
                continue;
            }

            // 衝突は先勝ち
            if !seen.insert(normalized.clone()) {
                continue;
            }

            rows.push(NameRow {
                normalized,
                display: name.to_string(),
                no: entry.no,
            });
        }

        Self { language, rows }
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// 全行を取得（挿入順 = 図鑑番号順）
    pub fn rows(&self) -> &[NameRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 図鑑マスタ全体
///
/// エントリは図鑑番号順に保持し、全対応言語のネームテーブルを
/// 構築時に作る。
#[derive(Debug, Clone)]
pub struct Dex {
    entries: Vec<DexEntry>,
    tables: HashMap<LanguageCode, NameTable>,
}

impl Dex {
    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 図鑑番号が 1..=N の密な連番であること（0・重複・欠番の不在）を
    /// 検証する。違反はマスタデータの不備としてエラーで返す。
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut entries: Vec<DexEntry> = serde_json::from_str(content)?;

        if entries.is_empty() {
            return Err(Error::Dex("図鑑データが空です".to_string()));
        }

        entries.sort_by_key(|e| e.no);

        if entries[0].no == 0 {
            return Err(Error::Dex("図鑑No 0 は使用できません（1始まり）".to_string()));
        }

        for (i, entry) in entries.iter().enumerate() {
            let expected = (i + 1) as u32;
            if entry.no == expected {
                continue;
            }
            if entry.no < expected {
                return Err(Error::Dex(format!("図鑑No {} が重複しています", entry.no)));
            }
            return Err(Error::Dex(format!("図鑑No {} が欠番です", expected)));
        }

        let mut tables = HashMap::new();
        for lang in LanguageCode::ALL {
            tables.insert(lang, NameTable::build(&entries, lang));
        }

        Ok(Self { entries, tables })
    }

    /// 図鑑番号の上限N
    pub fn max_no(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全エントリ（図鑑番号順）
    pub fn entries(&self) -> &[DexEntry] {
        &self.entries
    }

    /// 図鑑番号からエントリを引く
    pub fn entry(&self, no: u32) -> Option<&DexEntry> {
        if no == 0 {
            return None;
        }
        self.entries.get((no - 1) as usize)
    }

    /// 指定言語のネームテーブル
    ///
    /// 全対応言語分のテーブルは構築時に必ず作られる（名前が1件もない
    /// 言語は空テーブルになる）。
    pub fn table(&self, lang: LanguageCode) -> &NameTable {
        &self.tables[&lang]
    }

    /// 指定言語のテーブル（空ならデフォルト言語にフォールバック）
    pub fn table_or_default(&self, lang: LanguageCode) -> &NameTable {
        let table = self.table(lang);
        if table.is_empty() {
            self.table(LanguageCode::default())
        } else {
            table
        }
    }

    /// 図鑑番号の表示名（指定言語に無ければデフォルト言語で引く）
    pub fn display_name(&self, no: u32, lang: LanguageCode) -> Option<&str> {
        let entry = self.entry(no)?;
        entry
            .name(lang)
            .or_else(|| entry.name(LanguageCode::default()))
    }
}
