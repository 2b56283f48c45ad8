use crate::resolver::CountryResolver;
use crate::services::{AccountService, Catalog, PacklistService, ReviewService};
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub reviews: Arc<ReviewService>,
    pub packlists: Arc<PacklistService>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, resolver: Arc<CountryResolver>) -> Self {
        let catalog = Arc::new(Catalog::new(storage.clone(), resolver));
        Self {
            reviews: Arc::new(ReviewService::new(catalog.clone())),
            packlists: Arc::new(PacklistService::new(storage.clone())),
            accounts: Arc::new(AccountService::new(storage)),
            catalog,
        }
    }
}
