//! 対応言語の定義

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

/// 翻訳を提供する言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

/// 対応言語に含まれない言語タグ
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language tag '{0}'")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    /// 対応言語の一覧（表示順）
    pub const ALL: [Self; 3] = [Self::En, Self::Es, Self::Fr];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    /// 言語コードと完全一致する場合のみ言語を返す
    ///
    /// 翻訳の解決と設定値の検証に使う。`EN` や `es-MX` は対応言語として扱わない。
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// ファイルパスの一部から言語を推定する
    ///
    /// 大文字小文字を区別せず、地域サブタグ（`en-US`, `es_MX`）は無視する。
    /// 翻訳ファイルの配置から言語を判定する用途に限る。
    #[must_use]
    pub fn from_path_part(part: &str) -> Option<Self> {
        let primary = part.split(['-', '_']).next().unwrap_or_default();
        Self::ALL.into_iter().find(|lang| lang.code().eq_ignore_ascii_case(primary))
    }

    /// 翻訳ファイルのパスから言語を検出する
    ///
    /// パスを区切り文字と `.` で分割し、末尾から順に言語タグとして解釈できる部分を探す。
    ///
    /// # 例
    /// - `locales/en.json` → `En`
    /// - `locales/fr-CA/common.json` → `Fr`
    /// - `locales/es/fr.json` → `Fr` （末尾側が優先）
    #[must_use]
    pub fn detect_from_path(path: &Path) -> Option<Self> {
        path.components()
            .rev()
            .filter_map(|component| component.as_os_str().to_str())
            .flat_map(|part| part.rsplit('.'))
            .find_map(Self::from_path_part)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}
