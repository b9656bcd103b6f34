//! カートの状態と状態遷移
//!
//! 各遷移は現在の状態を消費し、次の状態を返す。

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    CartItem,
    ItemSource,
    NewCartItem,
    PassRedemption,
    VenueScope,
};

/// カート項目の ID を生成する
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// UUID v4 による ID 生成
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// カート全体（追加順の項目と、紐づく会場）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub venue: Option<VenueScope>,
}

impl CartState {
    /// カートを会場に紐づける
    ///
    /// 別の会場が既に設定されている場合のみ項目を破棄する。
    /// 同じ会場 ID なら名前と slug だけを更新し、会場未設定なら項目を保持する。
    #[must_use]
    pub fn set_venue(mut self, venue: VenueScope) -> Self {
        if self.venue.as_ref().is_some_and(|current| current.id != venue.id) {
            self.items.clear();
        }
        self.venue = Some(venue);
        self
    }

    /// 購入項目を追加する（同じメニュー項目の購入行があれば数量を加算）
    #[must_use]
    pub fn add_item(mut self, item: NewCartItem, ids: &mut impl IdGenerator) -> Self {
        if item.quantity == 0 {
            return self;
        }

        let existing = self.items.iter_mut().find(|line| {
            line.source == ItemSource::Purchased && line.menu_item_id == item.menu_item_id
        });

        match existing {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item.into_purchased(ids.next_id())),
        }
        self
    }

    #[must_use]
    pub fn remove_item(mut self, id: &str) -> Self {
        self.items.retain(|item| item.id != id);
        self
    }

    /// 数量を上書きする（`quantity <= 0` なら項目を削除）
    #[must_use]
    pub fn update_quantity(mut self, id: &str, quantity: i64) -> Self {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
        self
    }

    /// パスを価格 0 の項目として追加する（同じパスが既にあれば何もしない）
    #[must_use]
    pub fn redeem_pass(mut self, redemption: PassRedemption, ids: &mut impl IdGenerator) -> Self {
        if self.has_redeemed_pass(&redemption.pass_id) {
            return self;
        }
        self.items.push(redemption.into_redeemed(ids.next_id()));
        self
    }

    /// 項目と会場をすべて消去する
    #[must_use]
    pub fn clear(self) -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_redeemed_pass(&self, pass_id: &str) -> bool {
        self.items.iter().any(|item| item.is_redeemed_pass(pass_id))
    }

    #[must_use]
    pub fn find_item(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 全項目の `price * quantity` の合計
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().fold(0, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// 全項目の数量の合計
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn purchased_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|item| item.source == ItemSource::Purchased)
    }

    pub fn redeemed_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|item| item.source == ItemSource::Redeemed)
    }
}
