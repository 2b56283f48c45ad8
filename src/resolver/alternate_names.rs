//! Static alias table consulted when every direct matching tier misses.

use super::normalize::normalize;
use std::collections::HashMap;

/// Canonical country name -> known aliases, in lookup order.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("United States", &["USA", "America", "US"]),
    ("United Kingdom", &["UK", "England", "Britain", "Great Britain"]),
    ("South Korea", &["Korea"]),
    ("United Arab Emirates", &["UAE", "Emirates"]),
    ("New Zealand", &["NZ"]),
    ("Czech Republic", &["Czechia"]),
    ("South Africa", &["SA"]),
    ("Dominican Republic", &["Dominican"]),
    ("Costa Rica", &["Costa"]),
    ("Sri Lanka", &["Ceylon"]),
    ("Myanmar", &["Burma"]),
    ("Eswatini", &["Swaziland"]),
    ("North Macedonia", &["Macedonia"]),
    ("Bosnia And Herzegovina", &["Bosnia", "Bosnia and Herzegovina"]),
    ("Trinidad And Tobago", &["Trinidad", "Trinidad and Tobago"]),
    ("Antigua And Barbuda", &["Antigua", "Antigua and Barbuda"]),
    ("Saint Vincent And The Grenadines", &["Saint Vincent", "St. Vincent"]),
    ("Saint Kitts And Nevis", &["Saint Kitts", "St. Kitts"]),
    ("Saint Lucia", &["St. Lucia"]),
    ("Papua New Guinea", &["Papua", "PNG"]),
    ("Solomon Islands", &["Solomon"]),
    ("Marshall Islands", &["Marshall"]),
    ("Federated States Of Micronesia", &["Micronesia"]),
    ("Palau", &["Belau"]),
    ("Samoa", &["Western Samoa"]),
    ("Tonga", &["Friendly Islands"]),
    ("Vanuatu", &["New Hebrides"]),
    ("Fiji", &["Republic of Fiji"]),
    ("Kiribati", &["Gilbert Islands"]),
    ("Tuvalu", &["Ellice Islands"]),
    ("Nauru", &["Pleasant Island"]),
];

#[derive(Debug, Clone)]
struct Entry {
    canonical: String,
    aliases: Vec<String>,
}

/// Immutable alias table. Built once at start-up and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AlternateNameTable {
    entries: Vec<Entry>,
    /// lowercased normalized canonical name -> entry index
    by_canonical: HashMap<String, usize>,
    /// lowercased alias -> entry index (first registration wins)
    by_alias: HashMap<String, usize>,
}

fn key(name: &str) -> String {
    normalize(name).to_lowercase()
}

impl AlternateNameTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the service.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ALIASES.iter().map(|(canonical, aliases)| {
            (
                canonical.to_string(),
                aliases.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
            )
        }))
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Self::empty().with_entries(entries)
    }

    /// Merge extra entries. Aliases for an existing canonical name are
    /// appended after the ones already registered; duplicates are dropped.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        for (canonical, aliases) in entries {
            let canonical_key = key(&canonical);
            if canonical_key.is_empty() {
                continue;
            }

            let index = match self.by_canonical.get(&canonical_key) {
                Some(&index) => index,
                None => {
                    self.entries.push(Entry {
                        canonical: normalize(&canonical),
                        aliases: Vec::new(),
                    });
                    let index = self.entries.len() - 1;
                    self.by_canonical.insert(canonical_key, index);
                    index
                }
            };

            for alias in aliases {
                let alias = alias.trim().to_string();
                if alias.is_empty() {
                    continue;
                }
                let entry = &mut self.entries[index];
                if entry
                    .aliases
                    .iter()
                    .any(|existing| existing.eq_ignore_ascii_case(&alias))
                {
                    continue;
                }
                self.by_alias.entry(alias.to_lowercase()).or_insert(index);
                entry.aliases.push(alias);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aliases registered for a canonical name.
    pub fn aliases_of(&self, name: &str) -> &[String] {
        self.by_canonical
            .get(&key(name))
            .map(|&index| self.entries[index].aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Names to retry when `name` matched nothing directly.
    ///
    /// For a canonical name this is its alias list. When `name` is itself an
    /// alias, the canonical name comes first, followed by its sibling aliases.
    pub fn variants_of(&self, name: &str) -> Vec<&str> {
        if let Some(&index) = self.by_canonical.get(&key(name)) {
            return self.entries[index]
                .aliases
                .iter()
                .map(String::as_str)
                .collect();
        }

        let lowered = name.trim().to_lowercase();
        let index = self
            .by_alias
            .get(&lowered)
            .or_else(|| self.by_alias.get(&key(name)));
        match index {
            Some(&index) => {
                let entry = &self.entries[index];
                std::iter::once(entry.canonical.as_str())
                    .chain(
                        entry
                            .aliases
                            .iter()
                            .filter(|alias| alias.to_lowercase() != lowered)
                            .map(String::as_str),
                    )
                    .collect()
            }
            None => Vec::new(),
        }
    }
}
