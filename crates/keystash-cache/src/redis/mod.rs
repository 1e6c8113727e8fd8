//! Redis-backed key-value store.

pub mod client;
pub mod operations;

pub use client::RedisClient;
