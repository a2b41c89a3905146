//! uidl - UI message DTO generator
//!
//! Parses `.dto` schema files describing the commands, events and queries
//! exchanged between a server-side UI model and its browser renderer, and
//! generates serde-ready Rust types for them. Per-type metadata is memoized
//! in a lock-free copy-on-write cache ([`cache::CopyOnWriteLeakyCache`]).

pub mod cache;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod ui;

pub use error::{UidlError, UidlResult};
