//! Service layer: the generic in-memory record store.
//! - `Store<T>` holds any record type implementing `Record`.
//! - No knowledge of HTTP or serialization lives here.

pub mod storage;
