//! `{{name}}` プレースホルダーを含むテンプレート

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// プレースホルダーに埋め込む値
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// プレースホルダー名 → 値
pub type Params = HashMap<String, ParamValue>;

/// `(name, value)` の組から [`Params`] を作る
///
/// ```
/// use flowbond::i18n::params;
///
/// let p = params([("name", "Ana".into()), ("count", 3.into())]);
/// assert_eq!(p.len(), 2);
/// ```
pub fn params<'a>(pairs: impl IntoIterator<Item = (&'a str, ParamValue)>) -> Params {
    pairs.into_iter().map(|(name, value)| (name.to_string(), value)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    Literal(&'t str),
    Placeholder(&'t str),
}

/// リテラルとプレースホルダーに分割したテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    segments: Vec<Segment<'t>>,
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl<'t> Template<'t> {
    /// `source` を分割する
    ///
    /// 名前が ASCII 英数字と `_` のみの `{{name}}` をプレースホルダーとし、
    /// 閉じていない `{{` を含むそれ以外はリテラルのまま残す。
    #[must_use]
    pub fn parse(source: &'t str) -> Self {
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(offset) = source.get(cursor..).and_then(|rest| rest.find(OPEN)) {
            let open = cursor + offset;
            let name_start = open + OPEN.len();
            let Some(close) = source.get(name_start..).and_then(|rest| rest.find(CLOSE)) else {
                break;
            };
            let name_end = name_start + close;
            let name = source.get(name_start..name_end).unwrap_or_default();

            if is_placeholder_name(name) {
                if let Some(text) = source.get(literal_start..open).filter(|t| !t.is_empty()) {
                    segments.push(Segment::Literal(text));
                }
                segments.push(Segment::Placeholder(name));
                cursor = name_end + CLOSE.len();
                literal_start = cursor;
            } else {
                // `{{{name}}}` は次の `{` から始まるプレースホルダーとして扱う
                cursor = open + 1;
            }
        }

        if let Some(text) = source.get(literal_start..).filter(|t| !t.is_empty()) {
            segments.push(Segment::Literal(text));
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment<'t>] {
        &self.segments
    }

    /// `params` を埋め込む（値のないプレースホルダーは `{{name}}` のまま残す）
    #[must_use]
    pub fn render(&self, params: &Params) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match params.get(*name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push_str(OPEN);
                        out.push_str(name);
                        out.push_str(CLOSE);
                    }
                },
            }
        }
        out
    }
}

/// `template` に `params` を埋め込む（変化がなければ借用のまま返す）
#[must_use]
pub fn interpolate<'t>(template: &'t str, params: &Params) -> Cow<'t, str> {
    if params.is_empty() || !template.contains(OPEN) {
        return Cow::Borrowed(template);
    }
    Cow::Owned(Template::parse(template).render(params))
}
