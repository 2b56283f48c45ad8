use super::defaults::{self, rating_or_default, text_or};
use crate::resolver::{CountryGroup, NestedItem};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An attraction inside a country group of an umbrella document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionItem {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Stored attraction documents. Umbrella documents group attractions per
/// country; legacy documents are one attraction carrying its own country.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttractionDocument {
    Nested {
        #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
        id: Option<Uuid>,
        countries: Vec<CountryGroup<AttractionItem>>,
    },
    Flat {
        country: String,
        #[serde(flatten)]
        item: AttractionItem,
    },
}

impl AttractionDocument {
    /// Country groups in document order. Legacy flat documents become
    /// single-item groups without a slug.
    pub fn into_groups(documents: Vec<AttractionDocument>) -> Vec<CountryGroup<AttractionItem>> {
        documents
            .into_iter()
            .flat_map(|document| match document {
                AttractionDocument::Nested { countries, .. } => countries,
                AttractionDocument::Flat { country, item } => vec![CountryGroup {
                    name: country,
                    slug: None,
                    items: vec![item],
                }],
            })
            .collect()
    }
}

/// An attraction as served, with its country resolved and defaults filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: Uuid,
    pub country: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub best_time: String,
    pub tips: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl NestedItem for AttractionItem {
    type Record = Attraction;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn place(&self, id: Uuid, country: &str) -> Attraction {
        Attraction {
            id,
            country: country.to_string(),
            title: self.title.clone(),
            city: self.city.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            rating: rating_or_default(self.rating),
            best_time: text_or(&[&self.best_time], defaults::ATTRACTION_BEST_TIME),
            tips: text_or(&[&self.tips], defaults::ATTRACTION_TIPS),
            location: self.location.clone(),
            category: self.category.clone(),
            price: self.price.clone(),
            opening_hours: self.opening_hours.clone(),
            contact: self.contact.clone(),
            website: self.website.clone(),
        }
    }
}
