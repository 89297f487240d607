use crate::tag::key::{TagKey, TagScheme};
use crate::tag::table;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The canonical tags decoded from one tag block. A later value for the same key replaces the
/// earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagMap {
    tags: BTreeMap<TagKey, String>,
}

impl TagMap {
    /// Creates an empty map.
    pub fn new() -> TagMap {
        TagMap::default()
    }

    /// Stores the value, returning the value it replaced.
    pub fn insert(&mut self, key: TagKey, value: impl Into<String>) -> Option<String> {
        self.tags.insert(key, value.into())
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: TagKey) -> Option<&str> {
        self.tags.get(&key).map(String::as_str)
    }

    /// Returns true if a value is stored for `key`.
    pub fn contains(&self, key: TagKey) -> bool {
        self.tags.contains_key(&key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, TagKey, String> {
        self.tags.iter()
    }
}

impl<'a> IntoIterator for &'a TagMap {
    type Item = (&'a TagKey, &'a String);
    type IntoIter = btree_map::Iter<'a, TagKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl FromIterator<(TagKey, String)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (TagKey, String)>>(iter: I) -> TagMap {
        TagMap {
            tags: iter.into_iter().collect(),
        }
    }
}

/// Routes decoded fields either into the canonical map or, when the scheme has no mapping for
/// the name, into the side channel of unprocessed tags keyed by the raw name.
pub(crate) struct TagSink<'a> {
    scheme: TagScheme,
    tags: TagMap,
    unprocessed: Option<&'a mut BTreeMap<String, String>>,
}

impl<'a> TagSink<'a> {
    pub fn new(
        scheme: TagScheme,
        unprocessed: Option<&'a mut BTreeMap<String, String>>,
    ) -> TagSink<'a> {
        TagSink {
            scheme,
            tags: TagMap::new(),
            unprocessed,
        }
    }

    /// Adds a field. `base` and `sub` must already be upper-cased; `raw_name` is the name as it
    /// appeared in the file.
    pub fn add(&mut self, base: &str, sub: Option<&str>, raw_name: &str, value: String) {
        match table::lookup(self.scheme, base, sub) {
            Some(key) => {
                self.tags.insert(key, value);
            }
            None => {
                log::trace!("{}: unmapped field {:?}", self.scheme, raw_name);
                if let Some(unprocessed) = self.unprocessed.as_deref_mut() {
                    unprocessed.insert(raw_name.to_string(), value);
                }
            }
        }
    }

    pub fn key_for(&self, base: &str, sub: Option<&str>) -> Option<TagKey> {
        table::lookup(self.scheme, base, sub)
    }

    /// Stores a value under an already resolved key.
    pub fn insert(&mut self, key: TagKey, value: String) {
        self.tags.insert(key, value);
    }

    pub fn contains(&self, key: TagKey) -> bool {
        self.tags.contains(key)
    }

    pub fn into_tags(self) -> TagMap {
        self.tags
    }
}
