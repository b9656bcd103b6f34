//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::cart::{
    CartState,
    IdGenerator,
    NewCartItem,
    PassRedemption,
    VenueScope,
};

/// 決まった順序の ID（`item-1`, `item-2`, ...）
#[derive(Debug, Default)]
pub(crate) struct SequentialIds {
    /// 発行済みの件数
    issued: u32,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("item-{}", self.issued)
    }
}

/// テスト用の会場を作成する
pub(crate) fn venue(id: &str) -> VenueScope {
    VenueScope { id: id.to_string(), name: "Main Hall".to_string(), slug: "main-hall".to_string() }
}

/// 購入品と引換済みパスを 1 件ずつ含むカート
pub(crate) fn sample_state() -> CartState {
    let mut ids = SequentialIds::default();
    CartState::default()
        .set_venue(venue("venue-1"))
        .add_item(NewCartItem::new("menu-1", "Lager", 650, 2).with_notes("no ice"), &mut ids)
        .redeem_pass(PassRedemption::new("pass-1", "menu-2", "Free soda"), &mut ids)
}
