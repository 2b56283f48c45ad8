//! Seed / snapshot file format: every collection as a JSON array.

use crate::domain::*;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedData {
    pub countries: Vec<Country>,
    pub attractions: Vec<AttractionDocument>,
    pub foods: Vec<Food>,
    pub culture: Vec<Culture>,
    #[serde(alias = "besttime")]
    pub best_time: Vec<BestTime>,
    #[serde(alias = "localphrase")]
    pub local_phrases: Vec<LocalPhrase>,
    #[serde(alias = "funfacts")]
    pub fun_facts: Vec<FunFact>,
    pub emergency: Vec<Emergency>,
    pub destinations: Vec<Destination>,
    pub reviews: Vec<Review>,
    #[serde(alias = "packlist")]
    pub packlists: Vec<Packlist>,
    #[serde(alias = "signup")]
    pub signups: Vec<Signup>,
}

/// Per-collection document counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub countries: usize,
    pub attraction_groups: usize,
    pub attractions: usize,
    pub foods: usize,
    pub culture: usize,
    pub best_time: usize,
    pub local_phrases: usize,
    pub fun_facts: usize,
    pub emergency: usize,
    pub destinations: usize,
    pub reviews: usize,
    pub packlists: usize,
    pub signups: usize,
}

fn fill_id(id: &mut Option<Uuid>) {
    if id.is_none() {
        *id = Some(Uuid::new_v4());
    }
}

impl SeedData {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut seed = Self::from_json(&content)?;
        seed.assign_ids();
        info!("Loaded seed file {}: {:?}", path.display(), seed.summary());
        Ok(seed)
    }

    /// Give every top-level document an id, legacy flat attractions included.
    /// Items inside umbrella documents are left alone; they receive
    /// deterministic ids when served.
    pub fn assign_ids(&mut self) {
        self.countries.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.foods.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.culture.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.best_time.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.local_phrases.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.fun_facts.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.emergency.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.destinations.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.reviews.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.packlists.iter_mut().for_each(|d| fill_id(&mut d.id));
        self.signups.iter_mut().for_each(|d| fill_id(&mut d.id));
        for document in &mut self.attractions {
            match document {
                AttractionDocument::Nested { id, .. } => fill_id(id),
                AttractionDocument::Flat { item, .. } => fill_id(&mut item.id),
            }
        }
    }

    pub fn summary(&self) -> SeedSummary {
        let groups = AttractionDocument::into_groups(self.attractions.clone());
        SeedSummary {
            countries: self.countries.len(),
            attraction_groups: groups.len(),
            attractions: groups.iter().map(|g| g.items.len()).sum(),
            foods: self.foods.len(),
            culture: self.culture.len(),
            best_time: self.best_time.len(),
            local_phrases: self.local_phrases.len(),
            fun_facts: self.fun_facts.len(),
            emergency: self.emergency.len(),
            destinations: self.destinations.len(),
            reviews: self.reviews.len(),
            packlists: self.packlists.len(),
            signups: self.signups.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_accepts_collection_aliases_and_assigns_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "foods": [{{ "country": "Japan", "name": "Sushi" }}],
                "besttime": [{{ "country": "Japan", "bestTime": "Spring", "details": "Cherry blossoms", "tip": "Book early" }}],
                "funfacts": [{{ "country": "Japan", "funFact": "Vending machines everywhere" }}],
                "attractions": [{{ "countries": [{{ "name": "Japan", "slug": "japan", "attractions": [{{ "title": "Fushimi Inari" }}] }}] }}]
            }}"#
        )
        .unwrap();

        let seed = SeedData::load(file.path()).unwrap();
        let summary = seed.summary();
        assert_eq!(summary.foods, 1);
        assert_eq!(summary.best_time, 1);
        assert_eq!(summary.fun_facts, 1);
        assert_eq!(summary.attraction_groups, 1);
        assert_eq!(summary.attractions, 1);
        assert!(seed.foods[0].id.is_some());
        assert!(matches!(
            &seed.attractions[0],
            AttractionDocument::Nested { id: Some(_), .. }
        ));
    }

    #[test]
    fn test_malformed_seed_is_an_error() {
        assert!(SeedData::from_json("{ \"foods\": 3 }").is_err());
    }
}
