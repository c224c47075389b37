use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::matcher::{MatchPair, MatchVariant};
use crate::metadata::MediaEntry;

/// How a group key is built from the lower-index entry of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// `"{title} ({year})"`, or just the title when the entry has no year.
    TitleAndYear,
    /// `"{title}"`.
    TitleOnly,
}

impl KeyStrategy {
    pub fn default_for(variant: MatchVariant) -> Self {
        match variant {
            MatchVariant::Directory => KeyStrategy::TitleAndYear,
            MatchVariant::File => KeyStrategy::TitleOnly,
        }
    }

    pub fn key_for(&self, entry: &MediaEntry) -> String {
        match (self, entry.year) {
            (KeyStrategy::TitleAndYear, Some(year)) => format!("{} ({})", entry.cleaned_name, year),
            _ => entry.cleaned_name.clone(),
        }
    }
}

/// Group key to its sorted, unique member paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateGroups {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl DuplicateGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(key)
    }

    /// Groups in key order, members in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.groups.iter()
    }

    pub fn member_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }
}

/// Collect matching pairs into groups. Only groups with at least two distinct
/// paths are returned.
///
/// No transitive closure is performed: an entry ends up under every key that
/// one of its pairs produced.
pub fn group(
    entries: &[MediaEntry],
    pairs: &[MatchPair],
    strategy: KeyStrategy,
) -> DuplicateGroups {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for pair in pairs {
        let (a, b) = (&entries[pair.i], &entries[pair.j]);
        let members = groups.entry(strategy.key_for(a)).or_default();
        members.insert(a.path_string());
        members.insert(b.path_string());
    }

    groups.retain(|_, members| members.len() >= 2);

    DuplicateGroups { groups }
}
