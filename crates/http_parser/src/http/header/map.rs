use std::collections::{BTreeMap, btree_map};

/// Header fields of a request, keyed by lowercase field name.
///
/// A field that occurs more than once keeps a single entry whose value is the
/// comma joined list of every occurrence, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    /// Inserts `value` under `name`, appending after a bare `,` if the field already exists
    pub fn set(&mut self, name: &str, value: &str) {
        match self.map.entry(name.to_ascii_lowercase()) {
            btree_map::Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.push(',');
                existing.push_str(value);
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value.to_owned());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over `(name, value)` pairs ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
