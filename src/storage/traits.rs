use crate::domain::*;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Document store behind the API.
///
/// Read collections return documents in insertion order; the resolver relies
/// on that order for tie-breaks.
#[async_trait]
pub trait Storage: Send + Sync {
    // Read-only travel collections
    async fn get_all_countries(&self) -> Result<Vec<Country>>;
    async fn get_all_attraction_documents(&self) -> Result<Vec<AttractionDocument>>;
    async fn get_all_foods(&self) -> Result<Vec<Food>>;
    async fn get_all_culture(&self) -> Result<Vec<Culture>>;
    async fn get_all_best_times(&self) -> Result<Vec<BestTime>>;
    async fn get_all_local_phrases(&self) -> Result<Vec<LocalPhrase>>;
    async fn get_all_fun_facts(&self) -> Result<Vec<FunFact>>;
    async fn get_all_emergency(&self) -> Result<Vec<Emergency>>;
    async fn get_all_destinations(&self) -> Result<Vec<Destination>>;

    // Review operations
    async fn get_all_reviews(&self) -> Result<Vec<Review>>;
    async fn get_review_by_id(&self, review_id: Uuid) -> Result<Option<Review>>;
    async fn create_review(&self, review: &mut Review) -> Result<()>;
    async fn update_review(&self, review: &Review) -> Result<()>;
    async fn delete_review(&self, review_id: Uuid) -> Result<bool>;

    // Packlist operations
    async fn get_packlist_by_user(&self, user_id: &str) -> Result<Option<Packlist>>;
    /// Insert or replace the list owned by `packlist.user_id`.
    async fn save_packlist(&self, packlist: &mut Packlist) -> Result<()>;
    async fn delete_packlist(&self, user_id: &str) -> Result<bool>;

    // Signup operations
    async fn create_signup(&self, signup: &mut Signup) -> Result<()>;
    async fn get_signup_by_email(&self, email: &str) -> Result<Option<Signup>>;
    async fn get_signup_by_id(&self, signup_id: Uuid) -> Result<Option<Signup>>;
    async fn get_all_signups(&self) -> Result<Vec<Signup>>;
}
