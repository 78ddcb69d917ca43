//! Key-value backend abstraction for keyform.
//!
//! keyform never talks to a network store directly. Everything it needs from
//! the backend is expressed by the [`KeyValueStore`] trait: plain strings,
//! lists, sets, sorted sets and hashes, each addressed by a fully-qualified
//! key. The keys themselves are composed by [`KeySpace`], which is shared by
//! the collection proxies and by whatever persists whole-model attributes.
//!
//! # Storage Backends
//!
//! - [`InMemoryStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every operation is a synchronous round trip; nothing is buffered.
//! 2. A key holds exactly one structure kind; mixing kinds is an error.
//! 3. Emptied structures disappear, so `exists` means "has data".
//! 4. Backend errors are propagated, never retried here.

pub mod error;
pub mod keys;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use keys::{KeySpace, DEFAULT_SEPARATOR, ESCAPE};
pub use memory::InMemoryStore;
pub use traits::KeyValueStore;
