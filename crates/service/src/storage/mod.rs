//! Storage abstractions for service layer
//!
//! Holds the in-memory record store and the trait a record type implements
//! to be stored in it.

pub mod memory_store;
pub mod record;

pub use memory_store::Store;
pub use record::Record;
