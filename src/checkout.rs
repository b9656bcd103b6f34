//! 注文エンドポイントとやり取りするペイロード

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::cart::{
    CartState,
    VenueScope,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is not bound to a venue")]
    NoVenue,

    #[error("Cart is empty")]
    EmptyCart,
}

/// 注文リクエストの 1 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub menu_item_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_id: Option<String>,
}

/// カートの会場へ注文するときのリクエスト本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub venue_id: String,
    pub items: Vec<OrderLineRequest>,
}

impl CheckoutRequest {
    /// `cart` から注文リクエストを作る
    ///
    /// # Errors
    /// - [`CheckoutError::NoVenue`]: 会場が未設定
    /// - [`CheckoutError::EmptyCart`]: 項目がない
    pub fn from_cart(cart: &CartState) -> Result<Self, CheckoutError> {
        let venue = cart.venue.as_ref().ok_or(CheckoutError::NoVenue)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items = cart
            .items
            .iter()
            .map(|item| OrderLineRequest {
                menu_item_id: item.menu_item_id.clone(),
                quantity: item.quantity,
                notes: item.notes.clone(),
                pass_id: item.pass_id.clone(),
            })
            .collect();

        Ok(Self { venue_id: venue.id.clone(), items })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
}

/// 注文後にエンドポイントが返す注文内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub total: u64,
    pub venue: VenueScope,
    pub items: Vec<OrderLine>,
}

impl OrderSummary {
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
