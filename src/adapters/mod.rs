//! Adapters to externally-owned services
//!
//! The selector never talks to persistence directly; everything goes
//! through the trait seams defined here so hosts can substitute their own
//! backends.

pub mod store;

pub use store::{AuthStore, JsonFileAuthStore, MemoryAuthStore};
