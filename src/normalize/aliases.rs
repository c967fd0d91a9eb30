//! Declarative column-alias resolution.
//!
//! Headers are compared in a normalized form (trimmed, inner whitespace
//! collapsed, lowercased). Each relation has a static alias table mapping
//! an alternate header onto a canonical one; an alias only applies when
//! the canonical header itself is absent.

use std::collections::HashMap;

use crate::error::{AllotError, AllotResult};
use crate::table::Relation;

/// Canonical header keys, in normalized form.
pub mod canonical {
    pub const UNIQUE_ID: &str = "uniqueid";
    pub const NAME: &str = "name";
    pub const GENDER: &str = "gender";
    pub const CATEGORY: &str = "category";
    pub const RANK: &str = "rank";
    pub const COLLEGE_ID: &str = "collegeid";
    pub const INSTITUTION: &str = "institution";
    pub const PREF_NUMBER: &str = "prefnumber";
    pub const TOTAL_SEATS: &str = "total seats";
    pub const TOTAL_ADMITTED: &str = "total admitted";
    pub const ORPHAN_QUOTA: &str = "orphan quota";
    pub const PHC_QUOTA: &str = "phc quota";
}

/// An alternate header and the canonical header it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAlias {
    pub alias: &'static str,
    pub canonical: &'static str,
}

const fn alias(alias: &'static str, canonical: &'static str) -> ColumnAlias {
    ColumnAlias { alias, canonical }
}

/// Student header aliases.
pub const STUDENT_ALIASES: &[ColumnAlias] = &[alias("caste", canonical::CATEGORY)];

/// Seat header aliases (verbose seat-matrix headers).
pub const SEAT_ALIASES: &[ColumnAlias] = &[
    alias("total no. of seats", canonical::TOTAL_SEATS),
    alias("total no. of students admitted", canonical::TOTAL_ADMITTED),
    alias("no. of students joined in orphan quota", canonical::ORPHAN_QUOTA),
    alias("no. of students joined in phc quota", canonical::PHC_QUOTA),
];

/// Preference header aliases.
pub const PREFERENCE_ALIASES: &[ColumnAlias] = &[];

/// Returns the alias table of a relation.
pub fn aliases_for(relation: Relation) -> &'static [ColumnAlias] {
    match relation {
        Relation::Students => STUDENT_ALIASES,
        Relation::Seats => SEAT_ALIASES,
        Relation::Preferences | Relation::Results => PREFERENCE_ALIASES,
    }
}

/// Normalizes a header for comparison.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical header → column index for one relation.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    relation: Relation,
    index: HashMap<String, usize>,
}

impl ColumnMap {
    /// Resolves headers against the relation's alias table.
    ///
    /// When a header appears twice, the first occurrence wins.
    pub fn resolve(relation: Relation, headers: &[String]) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (i, h) in headers.iter().enumerate() {
            index.entry(normalize_header(h)).or_insert(i);
        }

        for a in aliases_for(relation) {
            if index.contains_key(a.canonical) {
                continue;
            }
            if let Some(&i) = index.get(a.alias) {
                index.insert(a.canonical.to_string(), i);
            }
        }

        Self { relation, index }
    }

    /// Column index of a canonical (or already normalized) header.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(&normalize_header(key)).copied()
    }

    /// Like [`get`](Self::get), failing with a missing-column error.
    ///
    /// `display` is the header name shown to the user.
    pub fn require(&self, key: &str, display: &'static str) -> AllotResult<usize> {
        self.get(key)
            .ok_or_else(|| AllotError::missing_column(self.relation, display))
    }
}
