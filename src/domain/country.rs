use crate::resolver::CountryKeyed;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl CountryKeyed for Country {
    fn country_name(&self) -> &str {
        &self.name
    }
}

/// A city-level destination shown in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl CountryKeyed for Destination {
    fn country_name(&self) -> &str {
        &self.country
    }
}
