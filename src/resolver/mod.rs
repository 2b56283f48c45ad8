//! Country-name resolution shared by every country-scoped endpoint.
//!
//! A raw locator (URL slug or free text) is normalized, then matched against
//! a collection through tiers: exact, raw exact, slug, substring and finally
//! the alternate-name table. Collections come in two shapes (flat documents
//! and nested country groups) behind the `RecordSource` trait so the tiers
//! never care which one they are searching.

pub mod alternate_names;
pub mod matching;
pub mod normalize;
pub mod source;

pub use alternate_names::AlternateNameTable;
pub use matching::{CountryKeyed, CountryResolver, MatchTier, Matched, Resolution};
pub use normalize::{decode_locator, normalize, Locator};
pub use source::{synthetic_id, CountryGroup, FlatSource, NestedItem, NestedSource, RecordSource};
