//! Domain layer: the stored record and the storage seam.
//!
//! [`Record`] is the only entity. [`RecordStore`] is the trait the HTTP
//! handlers depend on; [`MemoryStore`] is the in-process implementation.

pub mod record;
pub mod record_store;

pub use record::Record;
pub use record_store::{MemoryStore, RecordStore};
