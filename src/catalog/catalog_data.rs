//! Catalog Data - name to model hash tables and the invalid hash list

use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;

/// Flat name -> hash table, in file order.
/// Inserting an existing name keeps the first value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    order: Vec<String>,
    hashes: FxHashMap<String, i32>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is already present. Returns whether it was inserted.
    pub fn insert(&mut self, name: impl Into<String>, hash: i32) -> bool {
        let name = name.into();
        if self.hashes.contains_key(&name) {
            return false;
        }
        self.hashes.insert(name.clone(), hash);
        self.order.push(name);
        true
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.hashes.get(name).copied()
    }

    /// First name registered for a hash
    pub fn name_of(&self, hash: i32) -> Option<&str> {
        self.order
            .iter()
            .find(|name| self.hashes.get(*name) == Some(&hash))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.order
            .iter()
            .filter_map(|name| self.hashes.get(name).map(|hash| (name.as_str(), *hash)))
    }
}

/// The three model tables the editor offers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    pub props: NameTable,
    pub vehicles: NameTable,
    pub peds: NameTable,
}

impl ModelCatalog {
    /// Name of a model, searching props, then vehicles, then peds
    pub fn name_of(&self, hash: i32) -> Option<&str> {
        self.props
            .name_of(hash)
            .or_else(|| self.vehicles.name_of(hash))
            .or_else(|| self.peds.name_of(hash))
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.vehicles.is_empty() && self.peds.is_empty()
    }
}

/// Hashes known not to resolve. Persisted so later sessions skip them.
#[derive(Debug, Clone, Default)]
pub struct InvalidHashList {
    pub(crate) hashes: FxHashSet<i32>,
    pub(crate) order: Vec<i32>,
    /// Backing file; `None` keeps the list in memory only
    pub(crate) path: Option<PathBuf>,
}

impl InvalidHashList {
    /// In-memory list without a backing file
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn contains(&self, hash: i32) -> bool {
        self.hashes.contains(&hash)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.order.iter().copied()
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let mut table = NameTable::new();
        assert!(table.insert("a", 1));
        assert!(!table.insert("a", 2));
        assert_eq!(table.get("a"), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_reverse_lookup_prefers_first_name() {
        let mut table = NameTable::new();
        table.insert("prop_a", 5);
        table.insert("prop_alias", 5);
        assert_eq!(table.name_of(5), Some("prop_a"));
        assert_eq!(table.name_of(6), None);
    }

    #[test]
    fn test_catalog_search_order() {
        let mut catalog = ModelCatalog::default();
        catalog.vehicles.insert("adder", 9);
        catalog.peds.insert("ped_nine", 9);
        assert_eq!(catalog.name_of(9), Some("adder"));
    }
}
