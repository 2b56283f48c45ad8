// Document storage: trait, in-memory implementation and seed format

pub mod in_memory;
pub mod seed;
pub mod traits;

pub use in_memory::InMemoryStorage;
pub use seed::{SeedData, SeedSummary};
pub use traits::Storage;
