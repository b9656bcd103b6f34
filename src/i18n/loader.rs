//! 翻訳ファイルの探索と読み込み

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use super::{
    Language,
    TranslationNode,
    TranslationStore,
};
use crate::config::{
    MatcherError,
    TranslationFileMatcher,
    TranslationFilesConfig,
};

/// 翻訳ファイル 1 件の読み込みエラー
#[derive(Error, Debug)]
pub enum TranslationLoadError {
    #[error("Failed to read translation file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 翻訳ファイルを 1 件読み込んでパースする
pub fn load_translation_file(path: &Path) -> Result<TranslationNode, TranslationLoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| TranslationLoadError::Read { path: path.to_path_buf(), source })?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|source| TranslationLoadError::Parse { path: path.to_path_buf(), source })?;

    Ok(TranslationNode::from_json(&json))
}

/// 翻訳ディレクトリからの相対パスから名前空間を検出する
///
/// 言語コードは名前空間として扱わない。
///
/// # 例
/// - `en/common.json` -> Some("common") （ファイル名が名前空間）
/// - `common/en.json` -> Some("common") （ディレクトリ名が名前空間）
/// - `en.json` -> None （単一ファイル）
fn detect_namespace(relative_path: &Path) -> Option<String> {
    let file_stem = relative_path.file_stem()?.to_string_lossy().to_string();

    if !file_stem.split('.').any(|part| Language::from_path_part(part).is_some()) {
        return Some(file_stem);
    }

    let parent_name = relative_path.parent()?.file_name()?.to_string_lossy().to_string();
    if Language::from_path_part(&parent_name).is_none() {
        return Some(parent_name);
    }

    None
}

/// マッチャーの起点配下の翻訳ファイルをパス順に集める
fn find_translation_files(matcher: &TranslationFileMatcher) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(matcher.root())
        .standard_filters(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_translation_file(entry.path()) {
            found_files.push(entry.into_path());
        }
    }

    found_files.sort();
    found_files
}

/// `directory` 配下の翻訳ファイルをすべて読み込んでストアを作る
///
/// 言語を判定できないファイルは無視する。読み込みやパースに失敗したファイルは
/// 警告を出して読み飛ばし、内容のない言語は空のツリーになる。
///
/// # Errors
/// 設定された glob パターンが不正な場合
pub fn load_translations(
    directory: &Path,
    config: &TranslationFilesConfig,
    default_language: Language,
) -> Result<TranslationStore, MatcherError> {
    tracing::debug!(directory = %directory.display(), "Loading translations");
    let matcher = TranslationFileMatcher::new(directory.to_path_buf(), config)?;

    let mut trees: HashMap<Language, TranslationNode> = HashMap::new();
    for path in find_translation_files(&matcher) {
        let relative_path = path.strip_prefix(directory).unwrap_or(&path);

        let Some(language) = Language::detect_from_path(relative_path) else {
            tracing::debug!("Skipping file without a supported language: {:?}", path);
            continue;
        };

        let tree = match load_translation_file(&path) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(%language, "{e}");
                continue;
            }
        };

        let tree = match detect_namespace(relative_path) {
            Some(namespace) => tree.mounted_at(&namespace),
            None => tree,
        };
        tracing::debug!(%language, "Loaded translation file {:?}", path);
        trees.entry(language).or_default().merge(tree);
    }

    for language in Language::ALL {
        if !trees.contains_key(&language) {
            tracing::warn!(%language, "No translations loaded, using an empty tree");
        }
    }

    Ok(TranslationStore::new(default_language, trees))
}
