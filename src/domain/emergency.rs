use crate::resolver::CountryKeyed;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emergency {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub emergency_numbers: EmergencyNumbers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embassy: Option<Embassy>,
    #[serde(default)]
    pub hospitals: Vec<Hospital>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyNumbers {
    pub police: String,
    pub ambulance: String,
    pub fire: String,
    pub general: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embassy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CountryKeyed for Emergency {
    fn country_name(&self) -> &str {
        &self.country
    }
}
