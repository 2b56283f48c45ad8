//! Declared fallbacks for optional fields. Served records never carry gaps
//! for these; the values are substituted, not inferred.

pub const RATING: f64 = 4.5;

pub const FOOD_TYPE: &str = "Traditional";
pub const FOOD_PRICE: &str = "Varies";
pub const FOOD_BEST_PLACE: &str = "Local restaurants";
pub const FOOD_TIPS: &str = "Best enjoyed fresh and hot";

pub const ATTRACTION_BEST_TIME: &str = "All day";
pub const ATTRACTION_TIPS: &str = "Visit during off-peak hours for better experience";

pub const PACKLIST_TITLE: &str = "My Packing List";
pub const PACK_ITEM_CATEGORY: &str = "General";
pub const PACK_ITEM_QUANTITY: u32 = 1;

/// Pick the first present, non-blank value, else the fallback.
pub(crate) fn text_or(values: &[&Option<String>], fallback: &str) -> String {
    values
        .iter()
        .filter_map(|value| value.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Ratings of zero or absent ratings fall back to the default.
pub(crate) fn rating_or_default(rating: Option<f64>) -> f64 {
    match rating {
        Some(value) if value > 0.0 => value,
        _ => RATING,
    }
}
