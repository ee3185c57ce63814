pub mod config;
pub mod model;
pub mod persist;
pub mod store;

pub use config::AppConfig;
pub use model::{EditTarget, Item, SubmitOutcome, Theme};
pub use persist::{Database, MemoryStore, PersistError, PersistedState, Persistence};
pub use store::TodoStore;
