//! Travel domain documents as stored and as served.

pub mod attraction;
pub mod country;
pub mod defaults;
pub mod emergency;
pub mod facts;
pub mod food;
pub mod packlist;
pub mod review;
pub mod signup;

pub use attraction::{Attraction, AttractionDocument, AttractionItem};
pub use country::{Country, Destination};
pub use emergency::{Embassy, Emergency, EmergencyNumbers, Hospital};
pub use facts::{BestTime, Culture, FunFact, LocalPhrase};
pub use food::{Food, FoodView};
pub use packlist::{PackItem, Packlist};
pub use review::{Review, ReviewStats};
pub use signup::{PublicUser, Signup};

use serde::{Deserialize, Serialize};

/// Country-scoped lookup families, used for routing labels and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Countries,
    Attractions,
    Foods,
    Culture,
    Besttime,
    Localphrase,
    Emergency,
    Funfacts,
    Reviews,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Countries => "countries",
            Domain::Attractions => "attractions",
            Domain::Foods => "foods",
            Domain::Culture => "culture",
            Domain::Besttime => "besttime",
            Domain::Localphrase => "localphrase",
            Domain::Emergency => "emergency",
            Domain::Funfacts => "funfacts",
            Domain::Reviews => "reviews",
        }
    }

    /// Message for a country-scoped lookup that matched nothing.
    pub fn not_found_message(&self, name: &str) -> String {
        match self {
            Domain::Countries => format!("Country not found: {name}"),
            Domain::Emergency => format!("Emergency information not found for {name}"),
            _ => format!("No {} found for {name}", self.noun()),
        }
    }

    /// Noun used in "not found" messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Domain::Countries => "country",
            Domain::Attractions => "attractions",
            Domain::Foods => "foods",
            Domain::Culture => "culture information",
            Domain::Besttime => "best time information",
            Domain::Localphrase => "local phrases",
            Domain::Emergency => "emergency information",
            Domain::Funfacts => "fun facts",
            Domain::Reviews => "reviews",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
