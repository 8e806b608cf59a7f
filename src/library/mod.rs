//! Read-only snapshots supplied by the external data layer.
//!
//! The core never mutates these; commands load them once and pass borrowed
//! slices to the pure functions in `core` and `validate`.

pub mod catalog;
pub mod snapshot;

pub use catalog::{Catalog, LookupError};
pub use snapshot::Snapshot;
