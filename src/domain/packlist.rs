use super::defaults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's packing list. One per user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packlist {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub items: Vec<PackItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackItem {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub packed: bool,
}

fn default_title() -> String {
    defaults::PACKLIST_TITLE.to_string()
}

impl Packlist {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id: user_id.into(),
            title: default_title(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn item_mut(&mut self, item_id: Uuid) -> Option<&mut PackItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Remove an item, reporting whether it was present.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() != before
    }
}
