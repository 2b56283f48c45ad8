//! Read side of the travel collections. Every country-scoped lookup goes
//! through the shared `CountryResolver`.

use crate::domain::*;
use crate::error::{GuideError, Result};
use crate::metrics::ResolverMetrics;
use crate::resolver::{
    CountryKeyed, CountryResolver, FlatSource, Locator, NestedSource, RecordSource, Resolution,
};
use crate::storage::Storage;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A flat collection served as stored: list, lookup by country, lookup by id.
pub trait FactCollection: CountryKeyed + Clone + Serialize + Send + Sync + 'static {
    const DOMAIN: Domain;

    fn id(&self) -> Option<Uuid>;

    fn fetch(storage: &dyn Storage) -> BoxFuture<'_, Result<Vec<Self>>>;
}

macro_rules! fact_collection {
    ($ty:ty, $domain:expr, $fetch:ident) => {
        impl FactCollection for $ty {
            const DOMAIN: Domain = $domain;

            fn id(&self) -> Option<Uuid> {
                self.id
            }

            fn fetch(storage: &dyn Storage) -> BoxFuture<'_, Result<Vec<Self>>> {
                storage.$fetch()
            }
        }
    };
}

fact_collection!(Culture, Domain::Culture, get_all_culture);
fact_collection!(BestTime, Domain::Besttime, get_all_best_times);
fact_collection!(LocalPhrase, Domain::Localphrase, get_all_local_phrases);
fact_collection!(FunFact, Domain::Funfacts, get_all_fun_facts);
fact_collection!(Emergency, Domain::Emergency, get_all_emergency);

/// Turn a miss into the `NotFound` error for `domain`.
pub fn found<R>(domain: Domain, resolution: Resolution<R>) -> Result<Resolution<R>> {
    if resolution.is_miss() {
        return Err(GuideError::country_not_found(
            domain.not_found_message(&resolution.name),
            resolution.name,
        ));
    }
    Ok(resolution)
}

fn sort_by_country<T: CountryKeyed>(records: &mut [T]) {
    records.sort_by(|a, b| a.country_name().cmp(b.country_name()));
}

pub struct Catalog {
    storage: Arc<dyn Storage>,
    resolver: Arc<CountryResolver>,
}

impl Catalog {
    pub fn new(storage: Arc<dyn Storage>, resolver: Arc<CountryResolver>) -> Self {
        Self { storage, resolver }
    }

    pub fn resolver(&self) -> &CountryResolver {
        &self.resolver
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Resolve against `source`, recording the outcome.
    pub fn lookup<S: RecordSource>(
        &self,
        domain: Domain,
        locator: &Locator,
        source: &S,
    ) -> Resolution<S::Record> {
        let resolution = self.resolver.resolve_locator(locator, source);
        match resolution.tier {
            Some(tier) => {
                ResolverMetrics::record_match(domain, tier);
                info!(
                    "Resolved {} '{}' as '{}' via {} ({} records)",
                    domain,
                    locator.raw(),
                    resolution.name,
                    tier.as_str(),
                    resolution.records.len()
                );
            }
            None => {
                ResolverMetrics::record_miss(domain);
                info!("No {} found for '{}' ('{}')", domain, resolution.name, locator.raw());
            }
        }
        resolution
    }

    // Countries

    pub async fn countries(&self) -> Result<Vec<Country>> {
        let mut countries = self.storage.get_all_countries().await?;
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    /// Single-result lookup: the first match in collection order.
    pub async fn country(&self, locator: &Locator) -> Result<Country> {
        let source = FlatSource::new(self.storage.get_all_countries().await?);
        let resolution = found(
            Domain::Countries,
            self.lookup(Domain::Countries, locator, &source),
        )?;
        resolution
            .records
            .into_iter()
            .next()
            .ok_or_else(|| GuideError::not_found("Country not found"))
    }

    // Attractions (nested shape)

    async fn attraction_source(&self) -> Result<NestedSource<AttractionItem>> {
        let documents = self.storage.get_all_attraction_documents().await?;
        Ok(NestedSource::new(AttractionDocument::into_groups(documents)))
    }

    /// Every attraction, highest rated first. Equal ratings keep stored order.
    pub async fn attractions(&self) -> Result<Vec<Attraction>> {
        let mut attractions = self.attraction_source().await?.all_records();
        attractions.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(attractions)
    }

    pub async fn attractions_for(&self, locator: &Locator) -> Result<Resolution<Attraction>> {
        let source = self.attraction_source().await?;
        found(
            Domain::Attractions,
            self.lookup(Domain::Attractions, locator, &source),
        )
    }

    pub async fn attraction_by_id(&self, id: Uuid) -> Result<Attraction> {
        self.attraction_source()
            .await?
            .all_records()
            .into_iter()
            .find(|attraction| attraction.id == id)
            .ok_or_else(|| GuideError::not_found("Attraction not found"))
    }

    // Foods (flat shape with declared defaults)

    pub async fn foods(&self) -> Result<Vec<FoodView>> {
        let mut foods: Vec<FoodView> = self
            .storage
            .get_all_foods()
            .await?
            .iter()
            .map(Food::view)
            .collect();
        foods.sort_by(|a, b| a.country.cmp(&b.country));
        Ok(foods)
    }

    pub async fn foods_for(&self, locator: &Locator) -> Result<Resolution<FoodView>> {
        let source = FlatSource::with_presenter(self.storage.get_all_foods().await?, Food::view);
        found(Domain::Foods, self.lookup(Domain::Foods, locator, &source))
    }

    pub async fn food_by_id(&self, id: Uuid) -> Result<FoodView> {
        self.storage
            .get_all_foods()
            .await?
            .iter()
            .find(|food| food.id == Some(id))
            .map(Food::view)
            .ok_or_else(|| GuideError::not_found("Food not found"))
    }

    // Flat fact collections

    pub async fn facts<T: FactCollection>(&self) -> Result<Vec<T>> {
        let mut facts = T::fetch(self.storage.as_ref()).await?;
        sort_by_country(&mut facts);
        Ok(facts)
    }

    pub async fn facts_for<T: FactCollection>(&self, locator: &Locator) -> Result<Resolution<T>> {
        let source = FlatSource::new(T::fetch(self.storage.as_ref()).await?);
        found(T::DOMAIN, self.lookup(T::DOMAIN, locator, &source))
    }

    pub async fn fact_by_id<T: FactCollection>(&self, id: Uuid) -> Result<T> {
        T::fetch(self.storage.as_ref())
            .await?
            .into_iter()
            .find(|fact| fact.id() == Some(id))
            .ok_or_else(|| {
                GuideError::not_found(format!("{} entry not found", T::DOMAIN.noun()))
            })
    }

    /// One fun fact picked uniformly among those resolved for `locator`.
    pub async fn random_fun_fact(&self, locator: &Locator) -> Result<FunFact> {
        let resolution = self.facts_for::<FunFact>(locator).await?;
        resolution
            .records
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| {
                GuideError::country_not_found(
                    Domain::Funfacts.not_found_message(&resolution.name),
                    resolution.name.clone(),
                )
            })
    }

    // Destinations

    /// Destinations whose name contains `query`, ignoring case.
    pub async fn search_destinations(&self, query: &str) -> Result<Vec<Destination>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(GuideError::InputMissing(
                "Search query is required".to_string(),
            ));
        }
        let results: Vec<Destination> = self
            .storage
            .get_all_destinations()
            .await?
            .into_iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .collect();
        debug!("Destination search '{}' returned {}", needle, results.len());
        Ok(results)
    }

    /// Resolve `locator` in `domain` and return the outcome as JSON.
    pub async fn resolve_json(&self, domain: Domain, locator: &Locator) -> Result<serde_json::Value> {
        let value = match domain {
            Domain::Countries => {
                let source = FlatSource::new(self.storage.get_all_countries().await?);
                serde_json::to_value(self.lookup(domain, locator, &source))?
            }
            Domain::Attractions => {
                let source = self.attraction_source().await?;
                serde_json::to_value(self.lookup(domain, locator, &source))?
            }
            Domain::Foods => {
                let source =
                    FlatSource::with_presenter(self.storage.get_all_foods().await?, Food::view);
                serde_json::to_value(self.lookup(domain, locator, &source))?
            }
            Domain::Culture => self.resolve_facts_json::<Culture>(locator).await?,
            Domain::Besttime => self.resolve_facts_json::<BestTime>(locator).await?,
            Domain::Localphrase => self.resolve_facts_json::<LocalPhrase>(locator).await?,
            Domain::Funfacts => self.resolve_facts_json::<FunFact>(locator).await?,
            Domain::Emergency => self.resolve_facts_json::<Emergency>(locator).await?,
            Domain::Reviews => {
                let source = FlatSource::new(self.storage.get_all_reviews().await?);
                serde_json::to_value(self.lookup(domain, locator, &source))?
            }
        };
        Ok(value)
    }

    async fn resolve_facts_json<T: FactCollection>(
        &self,
        locator: &Locator,
    ) -> Result<serde_json::Value> {
        let source = FlatSource::new(T::fetch(self.storage.as_ref()).await?);
        Ok(serde_json::to_value(self.lookup(T::DOMAIN, locator, &source))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStorage, SeedData};
    use serde_json::json;

    fn catalog(seed: serde_json::Value) -> Catalog {
        let seed: SeedData = serde_json::from_value(seed).unwrap();
        Catalog::new(
            Arc::new(InMemoryStorage::from_seed(seed)),
            Arc::new(CountryResolver::default()),
        )
    }

    #[tokio::test]
    async fn test_foods_for_fills_defaults() {
        let catalog = catalog(json!({
            "foods": [
                { "country": "Japan", "name": "Sushi" },
                { "country": "Italy", "name": "Pizza", "category": "Street food" }
            ]
        }));
        let resolution = catalog.foods_for(&Locator::new("japan")).await.unwrap();
        assert_eq!(resolution.records.len(), 1);
        assert_eq!(resolution.records[0].name, "Sushi");
        assert_eq!(resolution.records[0].kind, "Traditional");
    }

    #[tokio::test]
    async fn test_miss_reports_normalized_name() {
        let catalog = catalog(json!({ "culture": [] }));
        let err = catalog
            .facts_for::<Culture>(&Locator::new("new-zealand"))
            .await
            .unwrap_err();
        match err {
            GuideError::NotFound { message, country } => {
                assert_eq!(country.as_deref(), Some("New Zealand"));
                assert_eq!(message, "No culture information found for New Zealand");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attractions_sorted_by_rating_with_stable_ties() {
        let catalog = catalog(json!({
            "attractions": [{
                "countries": [
                    { "name": "France", "slug": "france", "attractions": [
                        { "title": "Louvre", "rating": 4.7 },
                        { "title": "Versailles" }
                    ]},
                    { "name": "Peru", "slug": "peru", "attractions": [
                        { "title": "Machu Picchu", "rating": 4.9 },
                        { "title": "Lake Titicaca", "rating": 4.5 }
                    ]}
                ]
            }]
        }));
        let titles: Vec<String> = catalog
            .attractions()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Machu Picchu", "Louvre", "Versailles", "Lake Titicaca"]);
    }

    #[tokio::test]
    async fn test_attraction_by_synthetic_id() {
        let catalog = catalog(json!({
            "attractions": [{
                "countries": [{ "name": "Belgium", "slug": "belgium", "attractions": [
                    { "title": "Atomium" }
                ]}]
            }]
        }));
        let id = crate::resolver::synthetic_id("Belgium", 0);
        let attraction = catalog.attraction_by_id(id).await.unwrap();
        assert_eq!(attraction.title, "Atomium");
    }

    #[tokio::test]
    async fn test_every_attraction_reachable_by_id() {
        let catalog = catalog(json!({
            "attractions": [
                { "country": "France", "title": "Louvre" },
                { "country": "France", "title": "Eiffel Tower" },
                { "countries": [{ "name": "Peru", "attractions": [{ "title": "Machu Picchu" }] }] },
                { "countries": [{ "name": "Peru", "attractions": [{ "title": "Nazca Lines" }] }] }
            ]
        }));

        let attractions = catalog.attractions().await.unwrap();
        assert_eq!(attractions.len(), 4);
        let mut ids: Vec<Uuid> = attractions.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        for attraction in &attractions {
            let fetched = catalog.attraction_by_id(attraction.id).await.unwrap();
            assert_eq!(fetched.title, attraction.title);
        }
    }

    #[tokio::test]
    async fn test_country_single_result_takes_first() {
        let catalog = catalog(json!({
            "countries": [
                { "name": "Guinea", "description": "West Africa" },
                { "name": "Guinea-Bissau" },
                { "name": "Equatorial Guinea" }
            ]
        }));
        let country = catalog.country(&Locator::new("guinea")).await.unwrap();
        assert_eq!(country.name, "Guinea");

        let substring = catalog.country(&Locator::new("equatorial")).await.unwrap();
        assert_eq!(substring.name, "Equatorial Guinea");
    }

    #[tokio::test]
    async fn test_random_fun_fact_comes_from_resolved_country() {
        let catalog = catalog(json!({
            "funFacts": [
                { "country": "Iceland", "funFact": "No mosquitoes" },
                { "country": "Iceland", "funFact": "No army" },
                { "country": "Norway", "funFact": "Fjords" }
            ]
        }));
        for _ in 0..10 {
            let fact = catalog.random_fun_fact(&Locator::new("iceland")).await.unwrap();
            assert_eq!(fact.country, "Iceland");
        }
    }

    #[tokio::test]
    async fn test_destination_search() {
        let catalog = catalog(json!({
            "destinations": [
                { "name": "Paris", "country": "France" },
                { "name": "Cape Town", "country": "South Africa" }
            ]
        }));
        let hits = catalog.search_destinations("PAR").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(catalog.search_destinations("  ").await.is_err());
    }
}
