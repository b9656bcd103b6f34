//! 翻訳の読み込みとカート永続化の設定
mod loader;
mod manager;
mod matcher;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    TranslationFileMatcher,
};
pub use types::{
    CartConfig,
    ConfigError,
    FlowbondSettings,
    TranslationFilesConfig,
    ValidationError,
};
