//! `.flowbond.json` の読み込み

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use super::{
    ConfigError,
    FlowbondSettings,
};

/// ワークスペースルートに置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".flowbond.json";

/// ワークスペースルートの設定ファイルを読む
///
/// ファイルがなければ `Ok(None)`。トップレベルが JSON オブジェクトでない場合は
/// 省略された項目を既定値で補えないため [`ConfigError::NotAnObject`] を返す。
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<FlowbondSettings>, ConfigError> {
    let path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let value: Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject(path));
    }

    let settings: FlowbondSettings = serde_json::from_value(value)?;
    tracing::debug!(
        path = %path.display(),
        default_language = %settings.default_language,
        translations = %settings.translations.directory,
        "Read settings file"
    );
    Ok(Some(settings))
}
