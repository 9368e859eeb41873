//! Catalog core: store-record normalization and the filter/search engine.
//! Everything here is synchronous and free of I/O.

pub mod adapter;
pub mod filter;
pub mod slug;
pub mod views;

pub use adapter::{adapt, Attachment, RawFields, RawRecord};
pub use filter::{filter_entries, search_entries, FilterCriteria};
pub use slug::slugify;
