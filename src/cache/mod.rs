//! Cache module for the aggregated snapshot
//!
//! A single serialized snapshot is kept on disk and reused for up to two
//! hours, so re-running the widget inside that window makes no network
//! calls at all. Staleness is a pure age check against the file timestamp;
//! stale entries are ignored, not deleted.

mod store;

pub use store::CacheStore;
