//! 永続化とリスナー通知を行うカートストア

use std::fmt;

use super::{
    CartItem,
    CartState,
    CartStorage,
    IdGenerator,
    NewCartItem,
    PassRedemption,
    UuidGenerator,
    VenueScope,
};

/// [`CartStore::subscribe`] が返す登録ハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CartState)>;

/// カートの状態を保持し、変更をストレージへ反映する
///
/// 変更操作は状態全体を置き換える。状態が変わった場合のみ保存してからリスナーへ通知する。
/// 空かつ会場未設定になった状態は保存せず、保存済みの値を削除する。
/// ストレージのエラーはログに記録し、カート操作の結果には影響させない。
pub struct CartStore<S, G = UuidGenerator> {
    state: CartState,
    storage: S,
    key: String,
    ids: G,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<S: CartStorage> CartStore<S> {
    /// `key` に保存されたカートを開く
    ///
    /// 保存済みの状態がない、または読み込めない場合は空のカートから始める。
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        Self::with_id_generator(storage, key, UuidGenerator)
    }
}

impl<S: CartStorage, G: IdGenerator> CartStore<S, G> {
    /// ID 生成器を指定してカートを開く
    pub fn with_id_generator(storage: S, key: impl Into<String>, ids: G) -> Self {
        let key = key.into();
        let state = match storage.load(&key) {
            Ok(Some(state)) => {
                tracing::debug!(key = %key, items = state.items.len(), "Restored cart");
                state
            }
            Ok(None) => CartState::default(),
            Err(e) => {
                tracing::warn!(key = %key, "Discarding unreadable cart state: {e}");
                CartState::default()
            }
        };

        Self { state, storage, key, ids, listeners: Vec::new(), next_listener_id: 0 }
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// 状態が変わるたびに新しい状態で呼ばれるコールバックを登録する
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// 登録を解除する（未登録の `id` なら `false`）
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn set_venue(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> &CartState {
        let venue = VenueScope { id: id.into(), name: name.into(), slug: slug.into() };
        self.apply(|state, _| state.set_venue(venue))
    }

    pub fn add_item(&mut self, item: NewCartItem) -> &CartState {
        self.apply(|state, ids| state.add_item(item, ids))
    }

    pub fn remove_item(&mut self, id: &str) -> &CartState {
        self.apply(|state, _| state.remove_item(id))
    }

    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> &CartState {
        self.apply(|state, _| state.update_quantity(id, quantity))
    }

    pub fn redeem_pass(&mut self, redemption: PassRedemption) -> &CartState {
        self.apply(|state, ids| state.redeem_pass(redemption, ids))
    }

    /// カートを初期状態に戻し、保存済みの値も削除する
    pub fn clear(&mut self) -> &CartState {
        self.apply(|state, _| state.clear())
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.state.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    #[must_use]
    pub const fn venue(&self) -> Option<&VenueScope> {
        self.state.venue.as_ref()
    }

    fn apply(&mut self, transition: impl FnOnce(CartState, &mut G) -> CartState) -> &CartState {
        let next = transition(self.state.clone(), &mut self.ids);
        if next == self.state {
            return &self.state;
        }
        self.state = next;

        self.persist();
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        &self.state
    }

    fn persist(&mut self) {
        let result = if self.state == CartState::default() {
            self.storage.remove(&self.key)
        } else {
            self.storage.save(&self.key, &self.state)
        };
        if let Err(e) = result {
            tracing::warn!(key = %self.key, "Failed to persist cart: {e}");
        }
    }
}

impl<S: fmt::Debug, G> fmt::Debug for CartStore<S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
