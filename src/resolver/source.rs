//! Collection-shape adapters.
//!
//! The matching engine only sees `candidates()`; each shape decides how
//! matched candidates turn into uniform records.

use super::matching::CountryKeyed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A searchable collection, independent of how it is stored.
pub trait RecordSource {
    /// What the matching tiers compare against.
    type Candidate: CountryKeyed;
    /// What callers receive.
    type Record;

    fn candidates(&self) -> &[Self::Candidate];

    /// Expand matched candidates into records, preserving their order.
    fn records_of(&self, matched: &[&Self::Candidate]) -> Vec<Self::Record>;

    /// Every record in collection order, bypassing matching.
    fn all_records(&self) -> Vec<Self::Record> {
        let everything: Vec<&Self::Candidate> = self.candidates().iter().collect();
        self.records_of(&everything)
    }
}

/// One document per fact, each carrying its own country field.
pub struct FlatSource<T, V = T> {
    records: Vec<T>,
    present: fn(&T) -> V,
}

impl<T: Clone> FlatSource<T, T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            present: T::clone,
        }
    }
}

impl<T, V> FlatSource<T, V> {
    /// Use `present` to turn stored documents into records, e.g. to fill
    /// declared defaults for absent fields.
    pub fn with_presenter(records: Vec<T>, present: fn(&T) -> V) -> Self {
        Self { records, present }
    }
}

impl<T: CountryKeyed, V> RecordSource for FlatSource<T, V> {
    type Candidate = T;
    type Record = V;

    fn candidates(&self) -> &[T] {
        &self.records
    }

    fn records_of(&self, matched: &[&T]) -> Vec<V> {
        matched.iter().map(|record| (self.present)(*record)).collect()
    }
}

/// A per-country group inside an umbrella document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryGroup<T> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, alias = "attractions")]
    pub items: Vec<T>,
}

impl<T> CountryKeyed for CountryGroup<T> {
    fn country_name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

/// An entry of a nested group that becomes a flat record once placed.
pub trait NestedItem {
    type Record;

    fn id(&self) -> Option<Uuid>;

    /// Build the record, with the group's name injected as its country.
    fn place(&self, id: Uuid, country: &str) -> Self::Record;
}

const SYNTHETIC_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_8d4b_4c57_a0e3_5b7d_91c2_44f8);

/// Deterministic id for a nested item stored without one. `ordinal` counts
/// the items of every group sharing `group_name`, in collection order.
pub fn synthetic_id(group_name: &str, ordinal: usize) -> Uuid {
    Uuid::new_v5(
        &SYNTHETIC_ID_NAMESPACE,
        format!("{}#{}", group_name.trim().to_lowercase(), ordinal).as_bytes(),
    )
}

/// Umbrella documents holding arrays of country groups. Items are paired
/// with their id (stored or synthetic) when the source is built.
pub struct NestedSource<T> {
    groups: Vec<CountryGroup<(Uuid, T)>>,
}

impl<T: NestedItem> NestedSource<T> {
    pub fn new(groups: Vec<CountryGroup<T>>) -> Self {
        let mut ordinals: HashMap<String, usize> = HashMap::new();
        let groups = groups
            .into_iter()
            .map(|group| {
                let next = ordinals.entry(group.name.trim().to_lowercase()).or_insert(0);
                let items = group
                    .items
                    .into_iter()
                    .map(|item| {
                        let id = item.id().unwrap_or_else(|| synthetic_id(&group.name, *next));
                        *next += 1;
                        (id, item)
                    })
                    .collect();
                CountryGroup {
                    name: group.name,
                    slug: group.slug,
                    items,
                }
            })
            .collect();
        Self { groups }
    }
}

impl<T: NestedItem> RecordSource for NestedSource<T> {
    type Candidate = CountryGroup<(Uuid, T)>;
    type Record = T::Record;

    fn candidates(&self) -> &[CountryGroup<(Uuid, T)>] {
        &self.groups
    }

    fn records_of(&self, matched: &[&CountryGroup<(Uuid, T)>]) -> Vec<T::Record> {
        matched
            .iter()
            .copied()
            .flat_map(|group| {
                group
                    .items
                    .iter()
                    .map(move |(id, item)| item.place(*id, &group.name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::CountryResolver;

    #[derive(Clone)]
    struct Fact {
        country: String,
        text: &'static str,
    }

    impl CountryKeyed for Fact {
        fn country_name(&self) -> &str {
            &self.country
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Option<Uuid>,
        title: &'static str,
    }

    #[derive(Debug, PartialEq)]
    struct Placed {
        id: Uuid,
        country: String,
        title: &'static str,
    }

    impl NestedItem for Item {
        type Record = Placed;

        fn id(&self) -> Option<Uuid> {
            self.id
        }

        fn place(&self, id: Uuid, country: &str) -> Placed {
            Placed {
                id,
                country: country.to_string(),
                title: self.title,
            }
        }
    }

    fn fact(country: &str, text: &'static str) -> Fact {
        Fact {
            country: country.to_string(),
            text,
        }
    }

    #[test]
    fn test_flat_source_presenter() {
        let source = FlatSource::with_presenter(
            vec![fact("France", "baguette"), fact("Japan", "sushi")],
            |f: &Fact| f.text.to_uppercase(),
        );
        let resolution = CountryResolver::default().resolve("japan", &source);
        assert_eq!(resolution.records, vec!["SUSHI".to_string()]);
        assert_eq!(source.all_records().len(), 2);
    }

    #[test]
    fn test_nested_source_injects_group_name() {
        let explicit = Uuid::new_v4();
        let source = NestedSource::new(vec![
            CountryGroup {
                name: "Netherlands".to_string(),
                slug: Some("netherlands".to_string()),
                items: vec![Item { id: None, title: "Rijksmuseum" }],
            },
            CountryGroup {
                name: "Belgium".to_string(),
                slug: Some("belgium".to_string()),
                items: vec![
                    Item { id: Some(explicit), title: "Grand Place" },
                    Item { id: None, title: "Atomium" },
                ],
            },
        ]);

        let resolution = CountryResolver::default().resolve("belgium", &source);
        assert_eq!(resolution.records.len(), 2);
        assert!(resolution.records.iter().all(|r| r.country == "Belgium"));
        assert_eq!(resolution.records[0].id, explicit);
        assert_eq!(resolution.records[1].id, synthetic_id("Belgium", 1));
    }

    #[test]
    fn test_synthetic_ids_are_stable() {
        assert_eq!(synthetic_id("Belgium", 0), synthetic_id("belgium ", 0));
        assert_ne!(synthetic_id("Belgium", 0), synthetic_id("Belgium", 1));
        assert_ne!(synthetic_id("Belgium", 0), synthetic_id("France", 0));
    }

    #[test]
    fn test_synthetic_ids_unique_across_same_named_groups() {
        let source = NestedSource::new(vec![
            CountryGroup {
                name: "Peru".to_string(),
                slug: None,
                items: vec![Item { id: None, title: "Machu Picchu" }],
            },
            CountryGroup {
                name: "Chile".to_string(),
                slug: None,
                items: vec![Item { id: None, title: "Atacama" }],
            },
            CountryGroup {
                name: "peru".to_string(),
                slug: None,
                items: vec![Item { id: None, title: "Nazca Lines" }],
            },
        ]);

        let records = CountryResolver::default().resolve("peru", &source).records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, synthetic_id("Peru", 0));
        assert_eq!(records[1].id, synthetic_id("Peru", 1));
        assert_ne!(records[0].id, records[1].id);
    }
}
