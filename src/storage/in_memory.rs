use super::seed::SeedData;
use super::traits::Storage;
use crate::config::StorageConfig;
use crate::domain::*;
use crate::error::{GuideError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// In-memory document store, optionally persisted to a JSON snapshot after
/// every mutation. Collections keep insertion order.
pub struct InMemoryStorage {
    countries: Mutex<Vec<Country>>,
    attractions: Mutex<Vec<AttractionDocument>>,
    foods: Mutex<Vec<Food>>,
    culture: Mutex<Vec<Culture>>,
    best_time: Mutex<Vec<BestTime>>,
    local_phrases: Mutex<Vec<LocalPhrase>>,
    fun_facts: Mutex<Vec<FunFact>>,
    emergency: Mutex<Vec<Emergency>>,
    destinations: Mutex<Vec<Destination>>,
    reviews: Mutex<Vec<Review>>,
    packlists: Mutex<Vec<Packlist>>,
    signups: Mutex<Vec<Signup>>,
    snapshot_path: Option<PathBuf>,
    /// Held for a whole mutation, snapshot write included.
    writer: tokio::sync::Mutex<()>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// `snapshot.json` -> `snapshot.json.tmp`, in the same directory so the
/// final rename stays on one filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn lock<T>(collection: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    collection
        .lock()
        .map_err(|_| GuideError::Storage("collection lock poisoned".to_string()))
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::from_seed(SeedData::default())
    }

    pub fn from_seed(mut seed: SeedData) -> Self {
        seed.assign_ids();
        Self {
            countries: Mutex::new(seed.countries),
            attractions: Mutex::new(seed.attractions),
            foods: Mutex::new(seed.foods),
            culture: Mutex::new(seed.culture),
            best_time: Mutex::new(seed.best_time),
            local_phrases: Mutex::new(seed.local_phrases),
            fun_facts: Mutex::new(seed.fun_facts),
            emergency: Mutex::new(seed.emergency),
            destinations: Mutex::new(seed.destinations),
            reviews: Mutex::new(seed.reviews),
            packlists: Mutex::new(seed.packlists),
            signups: Mutex::new(seed.signups),
            snapshot_path: None,
            writer: tokio::sync::Mutex::new(()),
        }
    }

    /// Open the store described by `config`. An existing snapshot wins over
    /// the seed file so mutations survive restarts.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let seed = match (&config.snapshot_file, &config.seed_file) {
            (Some(snapshot), _) if snapshot.exists() => {
                info!("Restoring from snapshot {}", snapshot.display());
                SeedData::load(snapshot)?
            }
            (_, Some(seed)) => SeedData::load(seed)?,
            _ => {
                warn!("No seed file configured, starting with empty collections");
                SeedData::default()
            }
        };

        let storage = Self::from_seed(seed);
        Ok(match &config.snapshot_file {
            Some(path) => storage.with_snapshot(path),
            None => storage,
        })
    }

    /// Write the full dataset to `path` after each mutation.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Copy of every collection, in the seed file format.
    pub fn snapshot(&self) -> Result<SeedData> {
        Ok(SeedData {
            countries: lock(&self.countries)?.clone(),
            attractions: lock(&self.attractions)?.clone(),
            foods: lock(&self.foods)?.clone(),
            culture: lock(&self.culture)?.clone(),
            best_time: lock(&self.best_time)?.clone(),
            local_phrases: lock(&self.local_phrases)?.clone(),
            fun_facts: lock(&self.fun_facts)?.clone(),
            emergency: lock(&self.emergency)?.clone(),
            destinations: lock(&self.destinations)?.clone(),
            reviews: lock(&self.reviews)?.clone(),
            packlists: lock(&self.packlists)?.clone(),
            signups: lock(&self.signups)?.clone(),
        })
    }

    async fn persist(&self) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&self.snapshot()?)?;
        let staging = staging_path(path);

        let written = async {
            tokio::fs::write(&staging, content).await?;
            tokio::fs::rename(&staging, path).await
        }
        .await;
        if let Err(e) = written {
            warn!("Failed to write snapshot {}: {}", path.display(), e);
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(GuideError::Storage(format!("failed to write snapshot: {e}")));
        }

        debug!("Wrote snapshot to {}", path.display());
        Ok(())
    }

    /// Apply `change` to one collection, then persist. Mutations run one at a
    /// time; if the snapshot cannot be written the collection is restored.
    async fn mutate<T, R, F>(&self, collection: &Mutex<Vec<T>>, change: F) -> Result<R>
    where
        T: Clone + Send,
        R: Send,
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send,
    {
        let _writer = self.writer.lock().await;
        let (previous, outcome) = {
            let mut documents = lock(collection)?;
            let previous = self.snapshot_path.as_ref().map(|_| documents.clone());
            let outcome = change(&mut documents)?;
            (previous, outcome)
        };

        if let Some(previous) = previous {
            if let Err(e) = self.persist().await {
                *lock(collection)? = previous;
                return Err(e);
            }
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_all_countries(&self) -> Result<Vec<Country>> {
        Ok(lock(&self.countries)?.clone())
    }

    async fn get_all_attraction_documents(&self) -> Result<Vec<AttractionDocument>> {
        Ok(lock(&self.attractions)?.clone())
    }

    async fn get_all_foods(&self) -> Result<Vec<Food>> {
        Ok(lock(&self.foods)?.clone())
    }

    async fn get_all_culture(&self) -> Result<Vec<Culture>> {
        Ok(lock(&self.culture)?.clone())
    }

    async fn get_all_best_times(&self) -> Result<Vec<BestTime>> {
        Ok(lock(&self.best_time)?.clone())
    }

    async fn get_all_local_phrases(&self) -> Result<Vec<LocalPhrase>> {
        Ok(lock(&self.local_phrases)?.clone())
    }

    async fn get_all_fun_facts(&self) -> Result<Vec<FunFact>> {
        Ok(lock(&self.fun_facts)?.clone())
    }

    async fn get_all_emergency(&self) -> Result<Vec<Emergency>> {
        Ok(lock(&self.emergency)?.clone())
    }

    async fn get_all_destinations(&self) -> Result<Vec<Destination>> {
        Ok(lock(&self.destinations)?.clone())
    }

    async fn get_all_reviews(&self) -> Result<Vec<Review>> {
        Ok(lock(&self.reviews)?.clone())
    }

    async fn get_review_by_id(&self, review_id: Uuid) -> Result<Option<Review>> {
        let reviews = lock(&self.reviews)?;
        Ok(reviews.iter().find(|r| r.id == Some(review_id)).cloned())
    }

    async fn create_review(&self, review: &mut Review) -> Result<()> {
        let id = Uuid::new_v4();
        review.id = Some(id);
        let stored = review.clone();
        self.mutate(&self.reviews, move |reviews| {
            reviews.push(stored);
            Ok(())
        })
        .await?;

        debug!("Created review for {} with id {}", review.country, id);
        Ok(())
    }

    async fn update_review(&self, review: &Review) -> Result<()> {
        let review_id = review.id.ok_or_else(|| {
            GuideError::Storage("Cannot update review without ID".to_string())
        })?;
        let updated = review.clone();
        self.mutate(&self.reviews, move |reviews| {
            let slot = reviews
                .iter_mut()
                .find(|r| r.id == Some(review_id))
                .ok_or_else(|| GuideError::not_found("Review not found"))?;
            *slot = updated;
            Ok(())
        })
        .await?;

        debug!("Updated review {}", review_id);
        Ok(())
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<bool> {
        let removed = self
            .mutate(&self.reviews, move |reviews| {
                let before = reviews.len();
                reviews.retain(|r| r.id != Some(review_id));
                Ok(reviews.len() != before)
            })
            .await?;

        if removed {
            debug!("Deleted review {}", review_id);
        }
        Ok(removed)
    }

    async fn get_packlist_by_user(&self, user_id: &str) -> Result<Option<Packlist>> {
        let packlists = lock(&self.packlists)?;
        Ok(packlists.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn save_packlist(&self, packlist: &mut Packlist) -> Result<()> {
        self.mutate(&self.packlists, |packlists| {
            match packlists.iter_mut().find(|p| p.user_id == packlist.user_id) {
                Some(existing) => {
                    packlist.id = existing.id.or(packlist.id);
                    *existing = packlist.clone();
                }
                None => {
                    packlist.id.get_or_insert_with(Uuid::new_v4);
                    packlists.push(packlist.clone());
                }
            }
            Ok(())
        })
        .await?;

        debug!("Saved packlist for user {}", packlist.user_id);
        Ok(())
    }

    async fn delete_packlist(&self, user_id: &str) -> Result<bool> {
        let removed = self
            .mutate(&self.packlists, |packlists| {
                let before = packlists.len();
                packlists.retain(|p| p.user_id != user_id);
                Ok(packlists.len() != before)
            })
            .await?;

        if removed {
            debug!("Deleted packlist for user {}", user_id);
        }
        Ok(removed)
    }

    async fn create_signup(&self, signup: &mut Signup) -> Result<()> {
        self.mutate(&self.signups, |signups| {
            if signups.iter().any(|s| s.email == signup.email) {
                return Err(GuideError::Conflict(
                    "User with this email already exists".to_string(),
                ));
            }
            signup.id = Some(Uuid::new_v4());
            signups.push(signup.clone());
            Ok(())
        })
        .await?;

        debug!("Created signup {}", signup.email);
        Ok(())
    }

    async fn get_signup_by_email(&self, email: &str) -> Result<Option<Signup>> {
        let signups = lock(&self.signups)?;
        Ok(signups.iter().find(|s| s.email == email).cloned())
    }

    async fn get_signup_by_id(&self, signup_id: Uuid) -> Result<Option<Signup>> {
        let signups = lock(&self.signups)?;
        Ok(signups.iter().find(|s| s.id == Some(signup_id)).cloned())
    }

    async fn get_all_signups(&self) -> Result<Vec<Signup>> {
        Ok(lock(&self.signups)?.clone())
    }
}
