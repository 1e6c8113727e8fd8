//! # keystash-core
//!
//! Core crate for Keystash. Contains the store and options-factory traits,
//! configuration schemas, the TTL grammar, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Keystash crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod ttl;

pub use error::AppError;
pub use result::AppResult;
pub use ttl::TtlSpec;
