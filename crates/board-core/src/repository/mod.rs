//! Repository Layer
//!
//! Key-value storage abstraction and the typed preference repository.

mod preferences;
mod traits;


pub use preferences::*;
pub use traits::{KeyValueStore, MemoryStore};
