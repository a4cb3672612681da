//! Ordered element attribute map.

/// Element attributes parsed from CDP's flat alternating key/value array.
///
/// Keeps first-seen key order; a duplicate key overwrites the value in place,
/// so the last value seen wins without disturbing iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    /// Parse `[k1, v1, k2, v2, ...]`. A trailing key without a value is dropped.
    pub fn from_flat(flat: &[String]) -> Self {
        let mut map = Self::default();
        for pair in flat.chunks_exact(2) {
            map.insert(&pair[0], &pair[1]);
        }
        map
    }

    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
