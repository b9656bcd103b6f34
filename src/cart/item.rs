//! カートの項目と会場

use serde::{
    Deserialize,
    Serialize,
};

/// 項目がカートに入った経緯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemSource {
    Purchased,
    Redeemed,
}

/// メニュー項目の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Food,
    Drink,
    Merchandise,
    #[default]
    #[serde(other)]
    Other,
}

/// カートが紐づく会場
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueScope {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// カートの 1 行
///
/// `price` は最小通貨単位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub item_type: ItemType,
    pub source: ItemSource,
    /// 引換項目のみ設定される
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_id: Option<String>,
}

impl CartItem {
    /// `price * quantity`（飽和演算）
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }

    #[must_use]
    pub fn is_redeemed_pass(&self, pass_id: &str) -> bool {
        self.source == ItemSource::Redeemed && self.pass_id.as_deref() == Some(pass_id)
    }
}

/// 追加する購入品（ID と由来はカート側で付与する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub menu_item_id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub item_type: ItemType,
}

impl NewCartItem {
    /// メモや画像なしで `quantity` 個を購入する
    #[must_use]
    pub fn new(
        menu_item_id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        quantity: u32,
    ) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            name: name.into(),
            price,
            quantity,
            notes: None,
            image_url: None,
            item_type: ItemType::default(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub const fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub(crate) fn into_purchased(self, id: String) -> CartItem {
        CartItem {
            id,
            menu_item_id: self.menu_item_id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            notes: self.notes,
            image_url: self.image_url,
            item_type: self.item_type,
            source: ItemSource::Purchased,
            pass_id: None,
        }
    }
}

/// 価格 0 の項目と引き換えるパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRedemption {
    pub pass_id: String,
    pub menu_item_id: String,
    pub item_name: String,
    pub image_url: Option<String>,
    pub item_type: ItemType,
}

impl PassRedemption {
    #[must_use]
    pub fn new(
        pass_id: impl Into<String>,
        menu_item_id: impl Into<String>,
        item_name: impl Into<String>,
    ) -> Self {
        Self {
            pass_id: pass_id.into(),
            menu_item_id: menu_item_id.into(),
            item_name: item_name.into(),
            image_url: None,
            item_type: ItemType::Other,
        }
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub const fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub(crate) fn into_redeemed(self, id: String) -> CartItem {
        CartItem {
            id,
            menu_item_id: self.menu_item_id,
            name: self.item_name,
            price: 0,
            quantity: 1,
            notes: None,
            image_url: self.image_url,
            item_type: self.item_type,
            source: ItemSource::Redeemed,
            pass_id: Some(self.pass_id),
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

    #[rstest]
    fn cart_item_serializes_camel_case() {
        let item = NewCartItem::new("menu-1", "Lager", 650, 2)
            .with_item_type(ItemType::Drink)
            .into_purchased("item-1".to_string());

        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "item-1",
                "menuItemId": "menu-1",
                "name": "Lager",
                "price": 650,
                "quantity": 2,
                "itemType": "DRINK",
                "source": "PURCHASED"
            })
        );
    }

    #[googletest::test]
    fn unknown_item_type_reads_as_other() {
        let item: CartItem = serde_json::from_value(json!({
            "id": "item-1",
            "menuItemId": "menu-1",
            "name": "Tote bag",
            "price": 1500,
            "quantity": 1,
            "itemType": "TICKET",
            "source": "PURCHASED"
        }))
        .unwrap();

        expect_that!(item.item_type, eq(ItemType::Other));
        expect_that!(item.notes, none());
    }

    #[googletest::test]
    fn redeemed_item_is_free_single_unit() {
        let item = PassRedemption::new("pass-9", "menu-3", "Free soda")
            .with_image_url("/img/soda.png")
            .into_redeemed("item-2".to_string());

        expect_that!(item.price, eq(0));
        expect_that!(item.quantity, eq(1));
        expect_that!(item.source, eq(ItemSource::Redeemed));
        expect_that!(item.item_type, eq(ItemType::Other));
        expect_that!(item.is_redeemed_pass("pass-9"), eq(true));
        expect_that!(item.is_redeemed_pass("pass-1"), eq(false));
    }

    #[rstest]
    #[case(500, 2, 1000)]
    #[case(0, 7, 0)]
    #[case(u64::MAX, 2, u64::MAX)]
    fn line_total_saturates(#[case] price: u64, #[case] quantity: u32, #[case] expected: u64) {
        let item = NewCartItem::new("m", "x", price, quantity).into_purchased("i".to_string());

        assert_eq!(item.line_total(), expected);
    }
}
