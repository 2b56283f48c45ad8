//! Application services between the HTTP layer and storage.

pub mod accounts;
pub mod catalog;
pub mod packlists;
pub mod reviews;

pub use accounts::AccountService;
pub use catalog::{Catalog, FactCollection};
pub use packlists::PacklistService;
pub use reviews::ReviewService;
