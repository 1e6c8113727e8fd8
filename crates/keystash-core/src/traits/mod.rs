//! Core traits defined in `keystash-core` and implemented by other crates.

pub mod options;
pub mod store;

pub use options::RedisOptionsFactory;
pub use store::{KeyExpiry, KeyValueStore};
