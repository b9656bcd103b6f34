//! flowbond
//!
//! FlowBond の翻訳リゾルバと会場単位のカートストア

pub mod cart;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod i18n;

#[cfg(test)]
mod test_utils;

pub use cart::CartStore;
pub use i18n::TranslationStore;
