use std::slice;
use std::vec;

use linked_hash_map::LinkedHashMap;
use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::{EntryError, Result};

/// One key/value pair of a [`Dictionary`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DictionaryItem {
    key: String,
    value: Entry,
}

impl DictionaryItem {
    pub fn new(key: String, value: Entry) -> DictionaryItem {
        DictionaryItem { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Entry {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Entry {
        &mut self.value
    }

    pub fn into_pair(self) -> (String, Entry) {
        (self.key, self.value)
    }
}

/// An ordered association list from text keys to entries.
///
/// Pairs stay in insertion order until [`Dictionary::sort`] puts them in canonical
/// (lexicographic by key) order. Lookups are linear scans; torrent metadata dictionaries
/// hold a few dozen keys at most.
///
/// Keys are unique: every way of adding a pair replaces the value of an existing key
/// in place instead of appending a duplicate.
///
/// Equality compares pairs in their current order, so two dictionaries holding the same
/// pairs in different orders are only equal once both are sorted.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Dictionary {
    items: Vec<DictionaryItem>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    /// Returns the value stored under `key`, appending `(key, Undefined)` at the end first
    /// if the key is missing.
    ///
    /// Never fails. Repeated calls with the same key return the same slot.
    pub fn at_mut(&mut self, key: &str) -> &mut Entry {
        let idx = match self.position(key) {
            Some(idx) => idx,
            None => {
                trace!(key, "appending dictionary key");
                self.items.push(DictionaryItem::new(key.to_string(), Entry::Undefined));
                self.items.len() - 1
            }
        };
        &mut self.items[idx].value
    }

    /// Returns the value stored under `key`, failing with [`EntryError::KeyNotFound`]
    /// when it is missing. Use [`Dictionary::find`] to test for presence instead.
    pub fn at(&self, key: &str) -> Result<&Entry> {
        self.find(key)
            .ok_or_else(|| EntryError::KeyNotFound(key.to_string()))
    }

    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.items.iter()
            .find(|item| item.key == key)
            .map(|item| &item.value)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.items.iter_mut()
            .find(|item| item.key == key)
            .map(|item| &mut item.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// An existing key keeps its position and the previous value is returned; a new key
    /// is appended at the end.
    pub fn insert(&mut self, key: impl Into<String>, value: Entry) -> Option<Entry> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.items[idx].value, value)),
            None => {
                self.items.push(DictionaryItem::new(key, value));
                None
            }
        }
    }

    /// Removes `key`, keeping the relative order of the remaining pairs.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let idx = self.position(key)?;
        Some(self.items.remove(idx).value)
    }

    /// Puts the pairs in canonical order: lexicographic by the bytes of the key.
    ///
    /// Only this dictionary is reordered. Dictionaries nested in its values keep their
    /// order and must be sorted individually when the whole tree has to be canonical.
    pub fn sort(&mut self) {
        debug!(len = self.items.len(), "sorting dictionary");
        self.items.sort_by(|a, b| a.key.cmp(&b.key));
    }

    pub fn is_sorted(&self) -> bool {
        self.items.windows(2).all(|pair| pair[0].key <= pair[1].key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }

    pub fn iter(&self) -> slice::Iter<'_, DictionaryItem> {
        self.items.iter()
    }

    // Only values are reachable mutably through DictionaryItem, so keys stay unique.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, DictionaryItem> {
        self.items.iter_mut()
    }
}

impl<K: Into<String>> FromIterator<(K, Entry)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Entry)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<String>> Extend<(K, Entry)> for Dictionary {
    fn extend<I: IntoIterator<Item = (K, Entry)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Dictionary {
    type Item = DictionaryItem;
    type IntoIter = vec::IntoIter<DictionaryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryItem;
    type IntoIter = slice::Iter<'a, DictionaryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Dictionary {
    type Item = &'a mut DictionaryItem;
    type IntoIter = slice::IterMut<'a, DictionaryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

// A LinkedHashMap already has unique keys, so its order carries over as is.
impl From<LinkedHashMap<String, Entry>> for Dictionary {
    fn from(map: LinkedHashMap<String, Entry>) -> Self {
        Dictionary {
            items: map.into_iter()
                .map(|(key, value)| DictionaryItem::new(key, value))
                .collect()
        }
    }
}

impl From<Dictionary> for LinkedHashMap<String, Entry> {
    fn from(dict: Dictionary) -> Self {
        dict.items.into_iter()
            .map(DictionaryItem::into_pair)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pairs(dict: &Dictionary) -> Vec<(&str, &Entry)> {
        dict.iter().map(|item| (item.key(), item.value())).collect()
    }

    #[test]
    pub fn at_mut_appends_missing_key() {
        let mut dict = Dictionary::new();
        dict.insert("b", Entry::Integer(1));

        assert_eq!(&mut Entry::Undefined, dict.at_mut("a"));
        assert_eq!(vec!["b", "a"], dict.keys().collect::<Vec<_>>());
    }

    #[test]
    pub fn at_mut_returns_same_slot() {
        let mut dict = Dictionary::new();
        *dict.at_mut("length") = Entry::Integer(1024);
        *dict.at_mut("length") = Entry::Integer(2048);

        assert_eq!(1, dict.len());
        assert_eq!(Some(&Entry::Integer(2048)), dict.find("length"));
    }

    #[test]
    pub fn at_fails_on_missing_key() {
        let mut dict = Dictionary::new();
        dict.insert("name", Entry::from("file.txt"));

        assert_eq!(Ok(&Entry::from("file.txt")), dict.at("name"));
        assert_eq!(Err(EntryError::KeyNotFound("length".to_string())), dict.at("length"));
        assert_eq!(None, dict.find("length"));
        // Read-only lookups never insert
        assert_eq!(1, dict.len());
    }

    #[test]
    pub fn find_mut_edits_in_place() {
        let mut dict = Dictionary::new();
        dict.insert("a", Entry::Integer(1));

        if let Some(value) = dict.find_mut("a") {
            *value = Entry::Integer(5);
        }
        assert_eq!(None, dict.find_mut("missing"));
        assert_eq!(Some(&Entry::Integer(5)), dict.find("a"));
    }

    #[test]
    pub fn insert_replaces_in_place() {
        let mut dict = Dictionary::new();
        assert_eq!(None, dict.insert("a", Entry::Integer(1)));
        assert_eq!(None, dict.insert("b", Entry::Integer(2)));
        assert_eq!(Some(Entry::Integer(1)), dict.insert("a", Entry::Integer(3)));

        assert_eq!(vec![("a", &Entry::Integer(3)), ("b", &Entry::Integer(2))], pairs(&dict));
    }

    #[test]
    pub fn remove_keeps_order() {
        let mut dict: Dictionary = vec![
            ("c", Entry::Integer(1)),
            ("a", Entry::Integer(2)),
            ("b", Entry::Integer(3)),
        ].into_iter().collect();

        assert_eq!(Some(Entry::Integer(2)), dict.remove("a"));
        assert_eq!(None, dict.remove("a"));
        assert_eq!(vec!["c", "b"], dict.keys().collect::<Vec<_>>());
        assert!(!dict.contains_key("a"));
    }

    #[test]
    pub fn sort_orders_by_key() {
        let mut dict: Dictionary = vec![
            ("b", Entry::Integer(1)),
            ("a", Entry::Integer(2)),
            ("c", Entry::Integer(3)),
        ].into_iter().collect();
        assert!(!dict.is_sorted());

        dict.sort();
        assert!(dict.is_sorted());
        assert_eq!(vec![
            ("a", &Entry::Integer(2)),
            ("b", &Entry::Integer(1)),
            ("c", &Entry::Integer(3)),
        ], pairs(&dict));

        let sorted = dict.clone();
        dict.sort();
        assert_eq!(sorted, dict);
    }

    #[test]
    pub fn sort_compares_bytes() {
        let mut dict: Dictionary = vec![
            ("piece length", Entry::Integer(1)),
            ("Z", Entry::Integer(2)),
            ("pieces", Entry::Integer(3)),
            ("a", Entry::Integer(4)),
        ].into_iter().collect();
        dict.sort();

        assert_eq!(vec!["Z", "a", "piece length", "pieces"], dict.keys().collect::<Vec<_>>());
    }

    #[test]
    pub fn sort_is_shallow() {
        let inner: Dictionary = vec![("y", Entry::Integer(1)), ("x", Entry::Integer(2))]
            .into_iter()
            .collect();
        let mut dict = Dictionary::new();
        dict.insert("z", Entry::Dictionary(inner.clone()));
        dict.insert("info", Entry::Dictionary(inner.clone()));
        dict.sort();

        assert_eq!(vec!["info", "z"], dict.keys().collect::<Vec<_>>());
        assert_eq!(Some(&Entry::Dictionary(inner)), dict.find("info"));
    }

    #[test]
    pub fn equality_follows_order() {
        let mut ab: Dictionary = vec![("a", Entry::Integer(1)), ("b", Entry::Integer(2))]
            .into_iter()
            .collect();
        let mut ba: Dictionary = vec![("b", Entry::Integer(2)), ("a", Entry::Integer(1))]
            .into_iter()
            .collect();
        assert_ne!(ab, ba);

        ab.sort();
        ba.sort();
        assert_eq!(ab, ba);
    }

    #[test]
    pub fn collect_deduplicates_keys() {
        let dict: Dictionary = vec![
            ("a", Entry::Integer(1)),
            ("b", Entry::Integer(2)),
            ("a", Entry::Integer(3)),
        ].into_iter().collect();

        assert_eq!(vec![("a", &Entry::Integer(3)), ("b", &Entry::Integer(2))], pairs(&dict));
    }

    #[test]
    pub fn iter_mut_edits_values() {
        let mut dict: Dictionary = vec![("a", Entry::Integer(1)), ("b", Entry::Integer(2))]
            .into_iter()
            .collect();
        for item in &mut dict {
            if let Entry::Integer(i) = item.value_mut() {
                *i *= 10;
            }
        }

        assert_eq!(vec![("a", &Entry::Integer(10)), ("b", &Entry::Integer(20))], pairs(&dict));
    }

    #[test]
    pub fn linked_hash_map_round_trip_keeps_order() {
        let mut map = LinkedHashMap::new();
        map.insert("zeta".to_string(), Entry::Integer(1));
        map.insert("alpha".to_string(), Entry::from("x"));

        let dict = Dictionary::from(map);
        assert_eq!(vec!["zeta", "alpha"], dict.keys().collect::<Vec<_>>());

        let map: LinkedHashMap<String, Entry> = dict.into();
        assert_eq!(vec!["zeta", "alpha"], map.keys().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    pub fn into_iter_yields_pairs_in_order() {
        let dict: Dictionary = vec![("x", Entry::Integer(1)), ("w", Entry::Integer(2))]
            .into_iter()
            .collect();
        let owned: Vec<(String, Entry)> = dict.into_iter().map(DictionaryItem::into_pair).collect();

        assert_eq!(vec![
            ("x".to_string(), Entry::Integer(1)),
            ("w".to_string(), Entry::Integer(2)),
        ], owned);
    }
}
