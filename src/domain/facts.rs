//! Flat one-fact-per-document collections.

use crate::resolver::CountryKeyed;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub aspect: String,
    pub description: String,
    #[serde(default)]
    pub tip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTime {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub best_time: String,
    pub details: String,
    #[serde(default)]
    pub tip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalPhrase {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub phrase: String,
    pub translation: String,
    #[serde(default)]
    pub usage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFact {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub fun_fact: String,
}

macro_rules! country_keyed {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl CountryKeyed for $ty {
                fn country_name(&self) -> &str {
                    &self.country
                }
            }
        )+
    };
}

country_keyed!(Culture, BestTime, LocalPhrase, FunFact);
