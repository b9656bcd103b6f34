//! 入れ子の翻訳ツリー

use std::collections::BTreeMap;

use serde_json::Value;

/// 翻訳ツリーのノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Leaf(String),
    Branch(BTreeMap<String, TranslationNode>),
}

impl Default for TranslationNode {
    fn default() -> Self {
        Self::Branch(BTreeMap::new())
    }
}

impl TranslationNode {
    /// パース済みの JSON からツリーを作る
    ///
    /// 文字列は葉になり、その他のスカラー値は JSON 表記の文字列を持つ葉になる。
    /// 配列は添字をキーとする枝になり、`null` は捨てる。
    ///
    /// # 例
    /// ```
    /// use serde_json::json;
    /// use flowbond::i18n::TranslationNode;
    ///
    /// let tree = TranslationNode::from_json(&json!({
    ///     "errors": { "notFound": "Not found" }
    /// }));
    /// assert_eq!(tree.lookup("errors.notFound"), Some("Not found"));
    /// ```
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        Self::from_json_value(json).unwrap_or_default()
    }

    fn from_json_value(json: &Value) -> Option<Self> {
        match json {
            Value::Object(map) => Some(Self::Branch(
                map.iter()
                    .filter_map(|(key, value)| {
                        Self::from_json_value(value).map(|node| (key.clone(), node))
                    })
                    .collect(),
            )),
            Value::Array(arr) => Some(Self::Branch(
                arr.iter()
                    .enumerate()
                    .filter_map(|(index, value)| {
                        Self::from_json_value(value).map(|node| (index.to_string(), node))
                    })
                    .collect(),
            )),
            Value::String(s) => Some(Self::Leaf(s.clone())),
            Value::Null => None,
            other => Some(Self::Leaf(other.to_string())),
        }
    }

    /// ドット区切りのキーをたどり、葉の文字列を返す
    ///
    /// 途中のセグメントがない場合、途中で葉に当たった場合、枝で終わった場合は `None`。
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let node = key.split('.').try_fold(self, |node, segment| match node {
            Self::Branch(children) => children.get(segment),
            Self::Leaf(_) => None,
        })?;

        match node {
            Self::Leaf(text) => Some(text),
            Self::Branch(_) => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Branch(children) if children.is_empty())
    }

    /// `other` を深くマージする（衝突時は `other` が優先）
    pub fn merge(&mut self, other: Self) {
        match (self, other) {
            (Self::Branch(ours), Self::Branch(theirs)) => {
                for (key, node) in theirs {
                    match ours.get_mut(&key) {
                        Some(existing) => existing.merge(node),
                        None => {
                            ours.insert(key, node);
                        }
                    }
                }
            }
            (this, other) => *this = other,
        }
    }

    /// `namespace` の下に配置したツリーを返す
    #[must_use]
    pub fn mounted_at(self, namespace: &str) -> Self {
        Self::Branch(BTreeMap::from([(namespace.to_string(), self)]))
    }

    /// 全ての葉のキー（ドット区切り、ソート済み）
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut result = Vec::new();
        self.collect_keys(None, &mut result);
        result
    }

    fn collect_keys(&self, prefix: Option<&str>, result: &mut Vec<String>) {
        match self {
            Self::Branch(children) => {
                for (key, node) in children {
                    let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                    node.collect_keys(Some(&full_key), result);
                }
            }
            Self::Leaf(_) => {
                if let Some(key) = prefix {
                    result.push(key.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn sample_tree() -> TranslationNode {
        TranslationNode::from_json(&json!({
            "common": {
                "hello": "Hello",
                "goodbye": "Goodbye"
            },
            "errors": {
                "notFound": "Not found"
            },
            "title": "FlowBond"
        }))
    }

    #[rstest]
    #[case("common.hello", Some("Hello"))]
    #[case("errors.notFound", Some("Not found"))]
    #[case("title", Some("FlowBond"))]
    #[case("common", None)]
    #[case("title.sub", None)]
    #[case("common.missing", None)]
    #[case("", None)]
    fn lookup_cases(#[case] key: &str, #[case] expected: Option<&str>) {
        assert_eq!(sample_tree().lookup(key), expected);
    }

    #[googletest::test]
    fn from_json_non_string_values() {
        let tree = TranslationNode::from_json(&json!({
            "number": 42,
            "boolean": true,
            "nothing": null
        }));

        expect_that!(tree.lookup("number"), some(eq("42")));
        expect_that!(tree.lookup("boolean"), some(eq("true")));
        expect_that!(tree.lookup("nothing"), none());
        expect_that!(tree.keys(), elements_are![eq("boolean"), eq("number")]);
    }

    #[googletest::test]
    fn from_json_arrays_are_indexed() {
        let tree = TranslationNode::from_json(&json!({
            "steps": ["Scan", "Pay", { "label": "Collect" }]
        }));

        expect_that!(tree.lookup("steps.0"), some(eq("Scan")));
        expect_that!(tree.lookup("steps.1"), some(eq("Pay")));
        expect_that!(tree.lookup("steps.2.label"), some(eq("Collect")));
    }

    #[googletest::test]
    fn from_json_non_object_root_is_leaf() {
        expect_that!(TranslationNode::from_json(&json!("text")).is_empty(), eq(false));
        expect_that!(TranslationNode::from_json(&json!(null)).is_empty(), eq(true));
    }

    #[googletest::test]
    fn merge_is_deep_and_other_wins() {
        let mut tree = sample_tree();
        tree.merge(TranslationNode::from_json(&json!({
            "common": { "hello": "Hi", "welcome": "Welcome" }
        })));

        expect_that!(tree.lookup("common.hello"), some(eq("Hi")));
        expect_that!(tree.lookup("common.goodbye"), some(eq("Goodbye")));
        expect_that!(tree.lookup("common.welcome"), some(eq("Welcome")));
        expect_that!(tree.lookup("title"), some(eq("FlowBond")));
    }

    #[googletest::test]
    fn mounted_at_prefixes_keys() {
        let tree = TranslationNode::from_json(&json!({ "checkout": "Checkout" }))
            .mounted_at("cart");

        expect_that!(tree.lookup("cart.checkout"), some(eq("Checkout")));
        expect_that!(tree.lookup("checkout"), none());
    }

    #[googletest::test]
    fn keys_are_flattened_and_sorted() {
        expect_that!(
            sample_tree().keys(),
            elements_are![eq("common.goodbye"), eq("common.hello"), eq("errors.notFound"), eq("title")]
        );
    }
}
