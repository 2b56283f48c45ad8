use crate::domain::defaults;
use crate::domain::{PackItem, Packlist};
use crate::error::{GuideError, Result};
use crate::storage::Storage;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Item fields as sent by clients. Absent fields take their defaults on
/// creation and are left untouched on update.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackItemInput {
    #[serde(default, alias = "_id")]
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub packed: Option<bool>,
}

impl PackItemInput {
    fn into_item(self) -> Result<PackItem> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| GuideError::InputMissing("Item name is required".to_string()))?;
        Ok(PackItem {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name,
            category: self
                .category
                .unwrap_or_else(|| defaults::PACK_ITEM_CATEGORY.to_string()),
            quantity: self.quantity.unwrap_or(defaults::PACK_ITEM_QUANTITY),
            packed: self.packed.unwrap_or(false),
        })
    }

    fn apply_to(self, item: &mut PackItem) {
        if let Some(name) = self.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(packed) = self.packed {
            item.packed = packed;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePacklist {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub items: Option<serde_json::Value>,
}

pub struct PacklistService {
    storage: Arc<dyn Storage>,
}

impl PacklistService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    async fn existing(&self, user_id: &str) -> Result<Packlist> {
        self.storage
            .get_packlist_by_user(user_id)
            .await?
            .ok_or_else(|| GuideError::not_found("No packlist found for this user"))
    }

    pub async fn get(&self, user_id: &str) -> Result<Packlist> {
        self.existing(user_id).await
    }

    /// Replace the user's list, creating it if needed.
    pub async fn save(&self, input: SavePacklist) -> Result<Packlist> {
        let user_id = input
            .user_id
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| GuideError::InputMissing("User ID is required".to_string()))?;
        let items = match input.items {
            Some(items @ serde_json::Value::Array(_)) => {
                serde_json::from_value::<Vec<PackItemInput>>(items)
                    .map_err(|e| GuideError::Validation(format!("Invalid items: {e}")))?
            }
            _ => {
                return Err(GuideError::Validation(
                    "Items must be an array".to_string(),
                ))
            }
        };
        let items = items
            .into_iter()
            .map(PackItemInput::into_item)
            .collect::<Result<Vec<_>>>()?;

        let mut packlist = match self.storage.get_packlist_by_user(&user_id).await? {
            Some(existing) => existing,
            None => Packlist::new(user_id),
        };
        packlist.items = items;
        if let Some(title) = input.title.filter(|t| !t.trim().is_empty()) {
            packlist.title = title;
        }
        packlist.updated_at = Utc::now();

        self.storage.save_packlist(&mut packlist).await?;
        info!(
            "Saved packlist for {} with {} items",
            packlist.user_id,
            packlist.items.len()
        );
        Ok(packlist)
    }

    pub async fn add_item(&self, user_id: &str, input: PackItemInput) -> Result<Packlist> {
        let item = input.into_item()?;
        let mut packlist = match self.storage.get_packlist_by_user(user_id).await? {
            Some(existing) => existing,
            None => Packlist::new(user_id),
        };
        packlist.items.push(item);
        packlist.updated_at = Utc::now();
        self.storage.save_packlist(&mut packlist).await?;
        Ok(packlist)
    }

    pub async fn update_item(
        &self,
        user_id: &str,
        item_id: Uuid,
        input: PackItemInput,
    ) -> Result<Packlist> {
        let mut packlist = self.existing(user_id).await?;
        let item = packlist
            .item_mut(item_id)
            .ok_or_else(|| GuideError::not_found("Item not found"))?;
        input.apply_to(item);
        packlist.updated_at = Utc::now();
        self.storage.save_packlist(&mut packlist).await?;
        Ok(packlist)
    }

    pub async fn delete_item(&self, user_id: &str, item_id: Uuid) -> Result<Packlist> {
        let mut packlist = self.existing(user_id).await?;
        if !packlist.remove_item(item_id) {
            return Err(GuideError::not_found("Item not found"));
        }
        packlist.updated_at = Utc::now();
        self.storage.save_packlist(&mut packlist).await?;
        Ok(packlist)
    }

    pub async fn delete(&self, user_id: &str) -> Result<()> {
        if !self.storage.delete_packlist(user_id).await? {
            return Err(GuideError::not_found("No packlist found for this user"));
        }
        info!("Deleted packlist for {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use serde_json::json;

    fn service() -> PacklistService {
        PacklistService::new(Arc::new(InMemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_save_fills_item_defaults() {
        let service = service();
        let saved = service
            .save(SavePacklist {
                user_id: Some("u1".to_string()),
                title: None,
                items: Some(json!([{ "name": "Passport" }, { "name": "Socks", "quantity": 4 }])),
            })
            .await
            .unwrap();

        assert_eq!(saved.title, "My Packing List");
        assert_eq!(saved.items[0].category, "General");
        assert_eq!(saved.items[0].quantity, 1);
        assert!(!saved.items[0].packed);
        assert_eq!(saved.items[1].quantity, 4);
    }

    #[tokio::test]
    async fn test_save_rejects_non_array_items() {
        let err = service()
            .save(SavePacklist {
                user_id: Some("u1".to_string()),
                title: None,
                items: Some(json!("passport")),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GuideError::Validation(_)));
    }

    #[tokio::test]
    async fn test_item_operations() {
        let service = service();
        let packlist = service
            .add_item(
                "u2",
                PackItemInput {
                    name: Some("Charger".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let item_id = packlist.items[0].id;

        let updated = service
            .update_item(
                "u2",
                item_id,
                PackItemInput {
                    packed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.items[0].packed);
        assert_eq!(updated.items[0].name, "Charger");

        let emptied = service.delete_item("u2", item_id).await.unwrap();
        assert!(emptied.items.is_empty());
        assert!(service.delete_item("u2", item_id).await.is_err());

        service.delete("u2").await.unwrap();
        assert!(matches!(
            service.get("u2").await.unwrap_err(),
            GuideError::NotFound { .. }
        ));
    }
}
