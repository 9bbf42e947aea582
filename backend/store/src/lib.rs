//! In-memory implementation of the Folio document stores.
//!
//! Documents are held as typed values and evaluated through their JSON form,
//! so the same `Filter` / `SortKey` / `Projection` semantics apply to every
//! collection.

pub mod collection;
pub mod database;
pub mod seed;

pub use collection::MemoryCollection;
pub use database::Database;
pub use seed::{load_seed_file, sample_projects, SeedData};
