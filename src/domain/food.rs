use super::defaults::{self, rating_or_default, text_or};
use crate::resolver::CountryKeyed;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dish as stored in the `foods` collection.
///
/// Older documents use `type`/`price`/`tips`, newer ones
/// `category`/`priceRange`/`tip`; both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl CountryKeyed for Food {
    fn country_name(&self) -> &str {
        &self.country
    }
}

/// A dish as served to the frontend, defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: String,
    pub best_place: String,
    pub tips: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub rating: f64,
}

impl Food {
    pub fn view(&self) -> FoodView {
        FoodView {
            id: self.id,
            country: self.country.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            kind: text_or(&[&self.category, &self.kind], defaults::FOOD_TYPE),
            price: text_or(&[&self.price_range, &self.price], defaults::FOOD_PRICE),
            best_place: text_or(&[&self.best_place], defaults::FOOD_BEST_PLACE),
            tips: text_or(&[&self.tip, &self.tips], defaults::FOOD_TIPS),
            cuisine: self.cuisine.clone(),
            difficulty: self.difficulty.clone(),
            cooking_time: self.cooking_time.clone(),
            ingredients: self.ingredients.clone(),
            season: self.season.clone(),
            rating: rating_or_default(self.rating),
        }
    }
}
