pub mod board_io;
pub mod config_io;
pub mod log;
pub mod store;

pub use board_io::{BOARD_KEY, ModelStore, THEME_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
