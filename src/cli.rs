//! `flowbond` コマンドの引数定義と実行

use std::io::Write;
use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;

use crate::cart::{
    CartStore,
    FileStorage,
};
use crate::config::{
    ConfigError,
    ConfigManager,
    MatcherError,
};
use crate::i18n::{
    Language,
    ParamValue,
    Params,
    TranslationStore,
    load_translations,
};

/// 実行時エラー（引数のエラーは clap が報告する）
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// コマンドライン引数
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "flowbond")]
#[command(about = "Resolve FlowBond translations and inspect the persisted cart")]
pub struct Cli {
    #[arg(long, default_value = ".", help = "Workspace root holding .flowbond.json")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// サブコマンド
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    #[command(about = "Resolve a translation key")]
    T {
        key: String,

        #[arg(short, long, help = "Language code; unknown codes fall back to the default")]
        lang: Option<String>,

        #[arg(value_parser = parse_param, help = "Interpolation parameters as name=value")]
        params: Vec<(String, ParamValue)>,
    },
    #[command(about = "List translation keys of a language")]
    Keys { lang: Option<Language> },
    #[command(about = "Report keys missing per language")]
    Check,
    #[command(about = "Inspect the persisted cart")]
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
}

/// `cart` サブコマンドの操作
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCommand {
    #[command(about = "Print the persisted cart")]
    Show,
    #[command(about = "Empty the persisted cart")]
    Clear,
}

/// `name=value` を補間パラメータに変換する（整数として読めれば整数値）
fn parse_param(arg: &str) -> Result<(String, ParamValue), String> {
    let (name, value) =
        arg.split_once('=').ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
    if name.is_empty() {
        return Err(format!("missing parameter name in '{arg}'"));
    }
    let value = value.parse::<i64>().map_or_else(|_| ParamValue::from(value), ParamValue::from);
    Ok((name.to_string(), value))
}

/// 最小通貨単位の金額を `units.cents` 形式にする
fn format_price(minor: u64) -> String {
    format!("{}.{:02}", minor / 100, minor % 100)
}

/// コマンドを実行し、結果を `out` に書き出す
///
/// # Errors
/// - 設定ファイルの読み込み・検証エラー
/// - 翻訳ファイルのパターンエラー
/// - 出力の書き込み・フラッシュのエラー
pub fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.root))?;
    let settings = config_manager.get_settings();

    match cli.command {
        Command::T { key, lang, params } => {
            let store = load_store(&config_manager)?;
            let params: Params = params.into_iter().collect();
            writeln!(out, "{}", store.resolve(&key, lang.as_deref(), &params))?;
        }
        Command::Keys { lang } => {
            let store = load_store(&config_manager)?;
            for key in store.keys(lang.unwrap_or(store.default_language())) {
                writeln!(out, "{key}")?;
            }
        }
        Command::Check => {
            let store = load_store(&config_manager)?;
            for language in Language::ALL {
                let missing = store.missing_keys(language);
                writeln!(out, "{language}: {} missing", missing.len())?;
                for key in missing {
                    writeln!(out, "  {key}")?;
                }
            }
        }
        Command::Cart { action } => {
            let storage = FileStorage::new(config_manager.cart_storage_dir());
            let mut cart = CartStore::open(storage, settings.cart.storage_key.clone());
            if action == CartCommand::Clear {
                cart.clear();
            }
            match cart.venue() {
                Some(venue) => writeln!(out, "venue: {} ({})", venue.name, venue.slug)?,
                None => writeln!(out, "venue: -")?,
            }
            for item in cart.items() {
                writeln!(
                    out,
                    "{} x {} @ {} [{:?}]",
                    item.quantity,
                    item.name,
                    format_price(item.price),
                    item.source
                )?;
            }
            writeln!(out, "items: {}", cart.item_count())?;
            writeln!(out, "total: {}", format_price(cart.total()))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_store(config_manager: &ConfigManager) -> Result<TranslationStore, MatcherError> {
    let settings = config_manager.get_settings();
    load_translations(
        &config_manager.translations_dir(),
        &settings.translations,
        settings.default_language(),
    )
}
