//! `folio-query`: listing queries shared by every list-style endpoint.
//!
//! Provides:
//! - Typed filter predicates (`Equals`, `Gte`, `Gt`, `Lte`, `Lt`) evaluated against JSON documents
//! - Explicit `(field, direction)` sort keys
//! - Field projection
//! - Page arithmetic and response metadata
//! - `build()` turning raw query parameters into a `ListQuery`

pub mod builder;
pub mod filter;
pub mod pagination;
pub mod projection;
pub mod sort;

pub use builder::{build, ListQuery, ListingProfile, RESERVED_PARAMS};
pub use filter::{Comparison, Condition, Filter, FilterValue};
pub use pagination::{total_pages, PageInfo, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use projection::{Projection, VERSION_FIELD};
pub use sort::{compare_documents, parse_sort, Direction, SortKey};
