//! In-process memo caches
//!
//! Provides [`CopyOnWriteLeakyCache`], a grow-only key/value memo whose
//! readers never take a lock. Each miss publishes a fresh immutable map.
//!
//! # Publish Policies
//!
//! | Policy | Duplicate computation | Lost updates |
//! |--------|-----------------------|--------------|
//! | `blind` | possible | possible (another key's fresh entry) |
//! | `compare_and_swap` | possible | never |

pub mod leaky;
pub mod stats;

pub use leaky::{CopyOnWriteLeakyCache, PublishPolicy};
pub use stats::CacheStats;
