//! Request parameters - an order-preserving string multimap
//!
//! Query strings may repeat a key (`name=foo&name=bar`), and filter keys are
//! free-form, so parameters are kept as a key -> string-list mapping rather
//! than a typed struct. Insertion order is preserved so generated SQL is
//! deterministic.

use std::fmt;

/// Transient request parameters: a mapping of keys to one or more values
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, Vec<String>)>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (`limit=25&name=foo&name=bar`),
    /// percent-decoding keys and values
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.append(&key, &value);
        }
        params
    }

    /// Build a parameter set from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key.as_ref(), value.as_ref());
        }
        params
    }

    /// Add one value under a key, keeping earlier values for the same key
    pub fn append(&mut self, key: &str, value: &str) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            values.push(value.to_string());
        } else {
            self.entries
                .push((key.to_string(), vec![value.to_string()]));
        }
    }

    /// First value for a key, if any
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, values)| values.first().map(String::as_str))
    }

    /// Every value recorded for a key (empty when the key is absent)
    pub fn all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the key appeared in the request at all
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over keys and their value lists, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys were recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, values) in self.iter() {
            for value in values {
                if !first {
                    f.write_str("&")?;
                }
                write!(f, "{}={}", key, value)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
