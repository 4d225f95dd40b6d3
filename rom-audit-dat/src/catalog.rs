//! Dialect-neutral definition model built from a parsed DAT.
//!
//! The catalog is constructed once when the SDK loads a DAT and is read-only
//! afterwards, so it can be shared freely between scans.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Metadata from the DAT `<header>` element. Not consulted by the matcher.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatHeader {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// One required or declared sub-file inside an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubRomFile {
    /// Path as recorded in the DAT.
    pub name: String,
    /// Alias used when the file is inherited from a parent (`merge` attribute).
    pub merge_name: String,
    /// Declared uncompressed size. 0 means unspecified.
    pub size: u64,
    /// Declared CRC-32, lowercase and zero-padded to 8 hex digits.
    /// Empty means unspecified.
    pub crc: String,
    /// Derived: the set is still considered repairable without this file.
    pub optional: bool,
}

impl SubRomFile {
    /// The name matching operates on: `merge_name` if non-blank, else `name`.
    pub fn normalized_name(&self) -> &str {
        if self.merge_name.trim().is_empty() {
            &self.name
        } else {
            &self.merge_name
        }
    }
}

/// One game entry from the DAT: an archive and the sub-files it must contain.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RomDefinition {
    /// Archive basename sans extension, as declared in the DAT.
    pub name: String,
    /// Trimmed `romof` value. Empty for a root set.
    pub parent: String,
    /// Sub-files in DAT declaration order.
    pub roms: Vec<SubRomFile>,
}

/// Immutable map from game name to its definition.
///
/// Game names are case-sensitive, exactly as declared in the DAT.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCatalog {
    pub header: DatHeader,
    games: HashMap<String, RomDefinition>,
}

impl DefinitionCatalog {
    pub fn new(header: DatHeader, games: HashMap<String, RomDefinition>) -> Self {
        Self { header, games }
    }

    pub fn get(&self, name: &str) -> Option<&RomDefinition> {
        self.games.get(name)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RomDefinition> {
        self.games.values()
    }

    /// Walk `romof` links from `def` outwards, nearest parent first.
    ///
    /// A parent missing from the catalog is still appended (callers report it
    /// as not-found). A repeated name ends the walk without being re-appended,
    /// so the chain never contains case-insensitive duplicates.
    pub fn parent_chain(&self, def: &RomDefinition) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(def.name.to_lowercase());

        let mut next = def.parent.clone();
        while !next.is_empty() {
            if !seen.insert(next.to_lowercase()) {
                break;
            }
            chain.push(next.clone());
            match self.games.get(&next) {
                Some(parent_def) => next = parent_def.parent.clone(),
                None => break,
            }
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, parent: &str) -> RomDefinition {
        RomDefinition {
            name: name.into(),
            parent: parent.into(),
            roms: Vec::new(),
        }
    }

    fn catalog(defs: Vec<RomDefinition>) -> DefinitionCatalog {
        let games = defs.into_iter().map(|d| (d.name.clone(), d)).collect();
        DefinitionCatalog::new(DatHeader::default(), games)
    }

    #[test]
    fn normalized_name_prefers_merge_name() {
        let sub = SubRomFile {
            name: "clone_a.bin".into(),
            merge_name: "a.bin".into(),
            ..Default::default()
        };
        assert_eq!(sub.normalized_name(), "a.bin");

        let blank_merge = SubRomFile {
            name: "a.bin".into(),
            merge_name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(blank_merge.normalized_name(), "a.bin");
    }

    #[test]
    fn chain_walks_to_root() {
        let cat = catalog(vec![
            def("clone", "parent"),
            def("parent", "bios"),
            def("bios", ""),
        ]);
        let chain = cat.parent_chain(cat.get("clone").unwrap());
        assert_eq!(chain, vec!["parent".to_string(), "bios".to_string()]);
    }

    #[test]
    fn chain_keeps_absent_parent() {
        let cat = catalog(vec![def("clone", "ghost")]);
        let chain = cat.parent_chain(cat.get("clone").unwrap());
        assert_eq!(chain, vec!["ghost".to_string()]);
    }

    #[test]
    fn chain_breaks_cycle_without_reappending() {
        let cat = catalog(vec![def("a", "b"), def("b", "a")]);
        let chain = cat.parent_chain(cat.get("a").unwrap());
        assert_eq!(chain, vec!["b".to_string()]);
    }

    #[test]
    fn chain_cycle_detection_is_case_insensitive() {
        let cat = catalog(vec![def("a", "B"), def("B", "A")]);
        // "A" only differs from the starting set by case, so the walk stops.
        let chain = cat.parent_chain(cat.get("a").unwrap());
        assert_eq!(chain, vec!["B".to_string()]);
    }

    #[test]
    fn chain_empty_for_root_set() {
        let cat = catalog(vec![def("root", "")]);
        assert!(cat.parent_chain(cat.get("root").unwrap()).is_empty());
    }

    #[test]
    fn chain_self_reference_is_empty() {
        let cat = catalog(vec![def("a", "a")]);
        assert!(cat.parent_chain(cat.get("a").unwrap()).is_empty());
    }
}
