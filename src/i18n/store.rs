//! 言語ごとの翻訳の解決

use std::collections::HashMap;

use super::template::{
    Params,
    interpolate,
};
use super::{
    Language,
    TranslationNode,
};

/// 全対応言語の翻訳ツリーを保持する（読み込み後は不変）
///
/// [`Language::ALL`] のすべての言語がエントリを持ち、データのない言語は空のツリーになる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStore {
    trees: HashMap<Language, TranslationNode>,
    default_language: Language,
}

impl Default for TranslationStore {
    fn default() -> Self {
        Self::new(Language::default(), HashMap::new())
    }
}

impl TranslationStore {
    /// ストアを作成する（`trees` にない言語は空のツリーで埋める）
    #[must_use]
    pub fn new(default_language: Language, mut trees: HashMap<Language, TranslationNode>) -> Self {
        for language in Language::ALL {
            trees.entry(language).or_default();
        }
        Self { trees, default_language }
    }

    #[must_use]
    pub const fn default_language(&self) -> Language {
        self.default_language
    }

    /// `language` の翻訳ツリー
    #[must_use]
    pub fn tree(&self, language: Language) -> Option<&TranslationNode> {
        self.trees.get(&language)
    }

    /// 言語タグの解決先
    ///
    /// 対応言語のコードと完全一致すればその言語、それ以外はデフォルト言語。
    #[must_use]
    pub fn language_for(&self, tag: Option<&str>) -> Language {
        tag.and_then(Language::from_code).unwrap_or(self.default_language)
    }

    /// `key` の補間前テンプレートを探す（`language` になければデフォルト言語を参照）
    #[must_use]
    pub fn lookup(&self, key: &str, language: Language) -> Option<&str> {
        self.lookup_in(key, language).or_else(|| {
            if language == self.default_language {
                return None;
            }
            tracing::trace!(key, %language, fallback = %self.default_language, "Falling back");
            self.lookup_in(key, self.default_language)
        })
    }

    fn lookup_in(&self, key: &str, language: Language) -> Option<&str> {
        self.trees.get(&language)?.lookup(key)
    }

    /// `key` を補間済みの文字列に解決する
    ///
    /// 指定言語、デフォルト言語の順に探し、どちらにもなければ `key` をそのまま返す。
    /// 失敗はしない。
    ///
    /// # 例
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use serde_json::json;
    /// use flowbond::i18n::{Language, TranslationNode, TranslationStore, params};
    ///
    /// let store = TranslationStore::new(
    ///     Language::En,
    ///     HashMap::from([(
    ///         Language::En,
    ///         TranslationNode::from_json(&json!({ "cart": { "count": "{{count}} items" } })),
    ///     )]),
    /// );
    ///
    /// let p = params([("count", 2.into())]);
    /// assert_eq!(store.resolve("cart.count", Some("fr"), &p), "2 items");
    /// assert_eq!(store.resolve("cart.missing", None, &p), "cart.missing");
    /// ```
    #[must_use]
    pub fn resolve(&self, key: &str, language: Option<&str>, params: &Params) -> String {
        let language = self.language_for(language);
        self.lookup(key, language)
            .map_or_else(|| key.to_string(), |template| interpolate(template, params).into_owned())
    }

    /// 1 つの言語に固定したハンドル
    #[must_use]
    pub const fn translator(&self, language: Language) -> Translator<'_> {
        Translator { store: self, language }
    }

    /// `language` のツリーの全キー（ドット区切り）
    #[must_use]
    pub fn keys(&self, language: Language) -> Vec<String> {
        self.trees.get(&language).map(TranslationNode::keys).unwrap_or_default()
    }

    /// デフォルト言語にあって `language` にないキー
    #[must_use]
    pub fn missing_keys(&self, language: Language) -> Vec<String> {
        let Some(tree) = self.trees.get(&language) else {
            return self.keys(self.default_language);
        };
        self.keys(self.default_language)
            .into_iter()
            .filter(|key| tree.lookup(key).is_none())
            .collect()
    }
}

/// 単一言語の翻訳ハンドル
#[derive(Debug, Clone, Copy)]
pub struct Translator<'s> {
    store: &'s TranslationStore,
    language: Language,
}

impl Translator<'_> {
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &Params::new())
    }

    #[must_use]
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.store.resolve(key, Some(self.language.code()), params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };
    use serde_json::json;

    use super::*;
    use crate::i18n::params;

    #[fixture]
    fn store() -> TranslationStore {
        TranslationStore::new(
            Language::En,
            HashMap::from([
                (
                    Language::En,
                    TranslationNode::from_json(&json!({
                        "common": { "welcome": "Welcome, {{name}}!", "close": "Close" },
                        "errors": { "notFound": "Not found" },
                        "quests": { "progress": "{{done}} of {{total}} tasks" }
                    })),
                ),
                (
                    Language::Es,
                    TranslationNode::from_json(&json!({
                        "common": { "welcome": "¡Bienvenido, {{name}}!" },
                        "errors": { "notFound": "No encontrado" }
                    })),
                ),
            ]),
        )
    }

    #[rstest]
    #[case("errors.notFound", Some("en"), "Not found")]
    #[case("errors.notFound", Some("es"), "No encontrado")]
    #[case("errors.notFound", Some("es-MX"), "Not found")]
    #[case("errors.notFound", Some("ES"), "Not found")]
    #[case("errors.notFound", None, "Not found")]
    #[case("errors.notFound", Some("de"), "Not found")]
    #[case("common.close", Some("es"), "Close")]
    #[case("common.close", Some("fr"), "Close")]
    #[case("common.missing", Some("es"), "common.missing")]
    #[case("common", Some("en"), "common")]
    #[case("", Some("en"), "")]
    fn resolve_cases(
        store: TranslationStore,
        #[case] key: &str,
        #[case] language: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(store.resolve(key, language, &Params::new()), expected);
    }

    #[rstest]
    fn resolve_interpolates_params(store: TranslationStore) {
        let p = params([("name", "Ana".into())]);

        assert_eq!(store.resolve("common.welcome", Some("es"), &p), "¡Bienvenido, Ana!");
        assert_eq!(
            store.resolve("quests.progress", Some("fr"), &params([("done", 2.into())])),
            "2 of {{total}} tasks"
        );
    }

    #[rstest]
    fn resolve_missing_key_is_not_interpolated(store: TranslationStore) {
        let p = params([("name", "Ana".into())]);

        assert_eq!(store.resolve("{{name}}", Some("en"), &p), "{{name}}");
    }

    #[rstest]
    fn every_language_has_a_tree(store: TranslationStore) {
        for language in Language::ALL {
            assert!(store.tree(language).is_some());
        }
        assert!(store.tree(Language::Fr).unwrap().is_empty());
    }

    #[rstest]
    fn translator_binds_language(store: TranslationStore) {
        let t = store.translator(Language::Es);

        assert_eq!(t.language(), Language::Es);
        assert_eq!(t.t("errors.notFound"), "No encontrado");
        assert_eq!(t.t_with("common.welcome", &params([("name", "Luis".into())])), "¡Bienvenido, Luis!");
    }

    #[rstest]
    fn missing_keys_lists_default_language_gaps(store: TranslationStore) {
        assert_that!(store.missing_keys(Language::Es), elements_are![eq("common.close"), eq("quests.progress")]);
        assert_that!(store.missing_keys(Language::Fr), len(eq(4)));
        assert_that!(store.missing_keys(Language::En), is_empty());
    }

    #[rstest]
    fn default_store_is_empty_but_complete() {
        let store = TranslationStore::default();

        assert_eq!(store.default_language(), Language::En);
        assert_eq!(store.resolve("anything", Some("fr"), &Params::new()), "anything");
        assert!(store.keys(Language::Es).is_empty());
    }
}
