use crate::error::{CardDexError, Result};
use carddex_common::album::AlbumLayout;
use carddex_common::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ユーザー設定（~/.config/carddex/config.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 図鑑マスタJSONのパス
    pub dex_path: String,
    /// OCRコマンドテンプレート（{image}と{lang}を置換）
    pub ocr_command: String,
    /// OCRパスの言語ヒント（先頭から--passes個を使用）
    pub passes: Vec<String>,
    pub slots_per_page: u32,
    pub pages_per_binder: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dex_path: "master/dex_sample.json".into(),
            ocr_command: "tesseract {image} stdout -l {lang}".into(),
            passes: vec!["en".into(), "ja".into(), "ko".into()],
            slots_per_page: 9,
            pages_per_binder: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CardDexError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("carddex").join("config.json"))
    }

    /// パス言語リストを解析（limitで先頭N個に制限）
    pub fn pass_languages(&self, limit: Option<usize>) -> Result<Vec<LanguageCode>> {
        let take = limit.unwrap_or(self.passes.len());
        let langs: Vec<LanguageCode> = self
            .passes
            .iter()
            .take(take)
            .map(|s| s.parse::<LanguageCode>().map_err(CardDexError::from))
            .collect::<Result<_>>()?;

        if langs.is_empty() {
            return Err(CardDexError::Config(
                "OCRパスの言語が設定されていません".into(),
            ));
        }
        Ok(langs)
    }

    /// 設定値からアルバムレイアウトを構築
    pub fn layout(&self) -> Result<AlbumLayout> {
        Ok(AlbumLayout::new(self.slots_per_page, self.pages_per_binder)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.slots_per_page, 9);
        assert_eq!(config.pages_per_binder, 30);
        assert_eq!(config.passes, vec!["en", "ja", "ko"]);
        assert!(config.ocr_command.contains("{image}"));
    }

    #[test]
    fn test_config_partial_json() {
        // 欠けたフィールドはデフォルトで補完される
        let config: Config = serde_json::from_str(r#"{"slots_per_page": 4}"#).unwrap();
        assert_eq!(config.slots_per_page, 4);
        assert_eq!(config.pages_per_binder, 30);
        assert_eq!(config.dex_path, "master/dex_sample.json");
    }

    #[test]
    fn test_pass_languages() {
        let config = Config::default();

        let all = config.pass_languages(None).unwrap();
        assert_eq!(
            all,
            vec![LanguageCode::En, LanguageCode::Ja, LanguageCode::Ko]
        );

        let first = config.pass_languages(Some(1)).unwrap();
        assert_eq!(first, vec![LanguageCode::En]);
    }

    #[test]
    fn test_pass_languages_invalid_code() {
        let config = Config {
            passes: vec!["en".into(), "klingon".into()],
            ..Default::default()
        };
        assert!(config.pass_languages(None).is_err());
    }

    #[test]
    fn test_pass_languages_empty() {
        let config = Config {
            passes: vec![],
            ..Default::default()
        };
        assert!(config.pass_languages(None).is_err());
    }

    #[test]
    fn test_layout_rejects_zero() {
        let config = Config {
            slots_per_page: 0,
            ..Default::default()
        };
        assert!(config.layout().is_err());
    }
}
