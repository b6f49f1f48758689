//! Common type definitions.

pub mod pagination;

pub use pagination::{PageMeta, PageQuery, Paginated, SortKey};
