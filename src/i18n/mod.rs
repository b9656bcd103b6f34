//! 翻訳ツリーとキーの解決
mod language;
mod loader;
mod store;
mod template;
mod tree;

pub use language::{
    Language,
    UnsupportedLanguage,
};
pub use loader::{
    TranslationLoadError,
    load_translation_file,
    load_translations,
};
pub use store::{
    TranslationStore,
    Translator,
};
pub use template::{
    ParamValue,
    Params,
    Segment,
    Template,
    interpolate,
    params,
};
pub use tree::TranslationNode;
