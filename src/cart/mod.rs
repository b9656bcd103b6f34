//! 会場単位のカート
mod item;
mod state;
mod storage;
mod store;

pub use item::{
    CartItem,
    ItemSource,
    ItemType,
    NewCartItem,
    PassRedemption,
    VenueScope,
};
pub use state::{
    CartState,
    IdGenerator,
    UuidGenerator,
};
pub use storage::{
    CartStorage,
    FileStorage,
    MemoryStorage,
    StorageError,
};
pub use store::{
    CartStore,
    ListenerId,
};
