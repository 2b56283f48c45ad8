//! Tiered country matching.
//!
//! Tiers are tried in a fixed order and the first tier producing at least one
//! hit wins. Hits keep the order of the candidate slice, so identical input
//! over identical data always yields the same result.

use super::alternate_names::AlternateNameTable;
use super::normalize::Locator;
use super::source::RecordSource;
use serde::Serialize;
use std::sync::Arc;

/// Anything that can be identified by a country name.
pub trait CountryKeyed {
    fn country_name(&self) -> &str;

    /// URL slug, only carried by nested country groups.
    fn slug(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Normalized name equals the stored name, ignoring case.
    Exact,
    /// Raw locator equals the stored name, ignoring case.
    RawExact,
    /// Raw locator equals the stored slug.
    Slug,
    /// Normalized name is contained in the stored name.
    Substring,
    /// One of the above succeeded for an alias from the alternate-name table.
    Alternate,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::RawExact => "raw_exact",
            MatchTier::Slug => "slug",
            MatchTier::Substring => "substring",
            MatchTier::Alternate => "alternate",
        }
    }
}

const DIRECT_TIERS: [MatchTier; 4] = [
    MatchTier::Exact,
    MatchTier::RawExact,
    MatchTier::Slug,
    MatchTier::Substring,
];

/// Aliases shorter than this (`US`, `SA`, `UAE`) only match whole names;
/// as substrings they hit unrelated countries.
pub const MIN_ALIAS_SUBSTRING_CHARS: usize = 4;

/// Candidates selected for a locator, borrowed from the searched slice.
#[derive(Debug)]
pub struct Matched<'a, C> {
    pub tier: Option<MatchTier>,
    /// Alias that produced the hits when `tier` is `Alternate`.
    pub alias: Option<String>,
    pub hits: Vec<&'a C>,
}

impl<C> Matched<'_, C> {
    fn miss() -> Self {
        Self {
            tier: None,
            alias: None,
            hits: Vec::new(),
        }
    }
}

/// Outcome of a resolution against a record source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution<R> {
    /// The `NormalizedName` that was attempted.
    pub name: String,
    pub tier: Option<MatchTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub records: Vec<R>,
}

impl<R> Resolution<R> {
    pub fn is_miss(&self) -> bool {
        self.records.is_empty()
    }

    /// First record in stable collection order, for single-result lookups.
    pub fn first(&self) -> Option<&R> {
        self.records.first()
    }
}

/// Lowercased view of the strings a single tier pass compares against.
struct Needle {
    name: String,
    raw: String,
}

impl Needle {
    fn new(name: &str, raw: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            raw: raw.trim().to_lowercase(),
        }
    }

    fn accepts<C: CountryKeyed>(&self, tier: MatchTier, candidate: &C) -> bool {
        let stored = candidate.country_name().trim().to_lowercase();
        match tier {
            MatchTier::Exact => stored == self.name,
            // Same comparison as Exact when the raw input is already canonical.
            MatchTier::RawExact => self.raw != self.name && stored == self.raw,
            MatchTier::Slug => candidate
                .slug()
                .map(|slug| slug.trim().to_lowercase() == self.raw)
                .unwrap_or(false),
            MatchTier::Substring => stored.contains(&self.name),
            MatchTier::Alternate => false,
        }
    }

    fn hits<'a, C: CountryKeyed>(&self, tier: MatchTier, candidates: &'a [C]) -> Vec<&'a C> {
        if self.name.is_empty() {
            return Vec::new();
        }
        candidates
            .iter()
            .filter(|candidate| self.accepts(tier, *candidate))
            .collect()
    }
}

/// Country-name resolver shared by every country-scoped lookup.
#[derive(Debug, Clone)]
pub struct CountryResolver {
    aliases: Arc<AlternateNameTable>,
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self::new(Arc::new(AlternateNameTable::builtin()))
    }
}

impl CountryResolver {
    pub fn new(aliases: Arc<AlternateNameTable>) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AlternateNameTable {
        &self.aliases
    }

    /// Select candidates for `locator` using the tier order.
    pub fn match_candidates<'a, C: CountryKeyed>(
        &self,
        locator: &Locator,
        candidates: &'a [C],
    ) -> Matched<'a, C> {
        if locator.name().is_empty() {
            return Matched::miss();
        }

        let needle = Needle::new(locator.name(), locator.raw());
        for tier in DIRECT_TIERS {
            let hits = needle.hits(tier, candidates);
            if !hits.is_empty() {
                return Matched {
                    tier: Some(tier),
                    alias: None,
                    hits,
                };
            }
        }

        // Tier-major over aliases: an exact hit on any alias beats a
        // substring hit on an earlier alias.
        let variants = self.aliases.variants_of(locator.name());
        let needles: Vec<(&str, Needle)> = variants
            .iter()
            .map(|alias| (*alias, Needle::new(alias, alias)))
            .collect();
        for tier in DIRECT_TIERS {
            for (alias, needle) in &needles {
                if tier == MatchTier::Substring
                    && needle.name.chars().count() < MIN_ALIAS_SUBSTRING_CHARS
                {
                    continue;
                }
                let hits = needle.hits(tier, candidates);
                if !hits.is_empty() {
                    return Matched {
                        tier: Some(MatchTier::Alternate),
                        alias: Some(alias.to_string()),
                        hits,
                    };
                }
            }
        }

        Matched::miss()
    }

    /// Resolve a raw locator string. Empty or unmatched input yields an empty
    /// record list.
    pub fn resolve<S: RecordSource>(&self, locator: &str, source: &S) -> Resolution<S::Record> {
        self.resolve_locator(&Locator::new(locator), source)
    }

    pub fn resolve_locator<S: RecordSource>(
        &self,
        locator: &Locator,
        source: &S,
    ) -> Resolution<S::Record> {
        let matched = self.match_candidates(locator, source.candidates());
        let records = if matched.hits.is_empty() {
            Vec::new()
        } else {
            source.records_of(&matched.hits)
        };

        Resolution {
            name: locator.name().to_string(),
            tier: matched.tier,
            alias: matched.alias,
            records,
        }
    }
}
