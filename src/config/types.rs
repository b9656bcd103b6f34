use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::i18n::Language;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// 項目の JSON パス（例: "translations.includePatterns[0]"）
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration file {0:?} must contain a JSON object")]
    NotAnObject(PathBuf),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowbondSettings {
    /// 指定言語が不明、またはキーがない場合に参照する言語
    pub default_language: String,

    pub translations: TranslationFilesConfig,

    pub cart: CartConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// 翻訳ファイルのディレクトリ（ワークスペースルートからの相対パス）
    pub directory: String,

    /// `directory` からの相対パスに対する glob パターン
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartConfig {
    /// カートの状態を保存するキー
    pub storage_key: String,

    /// カートを保存するディレクトリ（ワークスペースルートからの相対パス）
    pub storage_dir: String,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            directory: "locales".to_string(),
            include_patterns: vec!["**/*.json".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { storage_key: "flowbond-cart".to_string(), storage_dir: ".flowbond".to_string() }
    }
}

impl Default for FlowbondSettings {
    fn default() -> Self {
        Self {
            default_language: Language::En.code().to_string(),
            translations: TranslationFilesConfig::default(),
            cart: CartConfig::default(),
        }
    }
}

impl FlowbondSettings {
    /// 設定されたデフォルト言語
    ///
    /// 対応言語でない値は英語として扱う（`validate` で事前に弾かれる）。
    #[must_use]
    pub fn default_language(&self) -> Language {
        Language::from_code(&self.default_language).unwrap_or_default()
    }

    /// 設定値を検証する
    ///
    /// # Errors
    /// - 対応していないデフォルト言語
    /// - 空または不正な glob パターン
    /// - ファイル名として使えない保存キー
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if Language::from_code(&self.default_language).is_none() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "Unsupported language '{}'. Supported languages: {}",
                    self.default_language,
                    Language::ALL.iter().map(|l| l.code()).collect::<Vec<_>>().join(", ")
                ),
            ));
        }

        if self.translations.directory.is_empty() {
            errors.push(ValidationError::new(
                "translations.directory",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.translations.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translations.includePatterns",
                "At least one pattern is required. Example: [\"**/*.json\"]",
            ));
        }

        for (index, pattern) in self.translations.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translations.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.translations.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translations.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        let key = &self.cart.storage_key;
        if key.is_empty() {
            errors.push(ValidationError::new(
                "cart.storageKey",
                "The storage key cannot be empty. Example: \"flowbond-cart\"",
            ));
        } else if key.contains(['/', '\\']) || key == "." || key == ".." {
            errors.push(ValidationError::new(
                "cart.storageKey",
                format!("Invalid storage key '{key}': path separators are not allowed"),
            ));
        }

        if self.cart.storage_dir.is_empty() {
            errors.push(ValidationError::new(
                "cart.storageDir",
                "The directory cannot be empty. Example: \".flowbond\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
