use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only access to a feature's tag dictionary.
///
/// Conditions only ever look tags up by key; the rule index additionally walks
/// the keys that are present. Implemented for [`Tags`] and for plain
/// `HashMap`/`BTreeMap` dictionaries so callers can pass what they already hold.
pub trait TagSource {
    /// Value stored under `key`, if any.
    fn tag(&self, key: &str) -> Option<&str>;

    /// Keys present in the dictionary, in no particular order.
    fn keys(&self) -> impl Iterator<Item = &str> + '_;
}

/// An owned tag dictionary for a single feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    data: HashMap<String, String>,
}

impl Tags {
    /// Create an empty tag dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a tag (mutable reference version).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl TagSource for Tags {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key)
    }

    fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }
}

impl<S: BuildHasher> TagSource for HashMap<String, String, S> {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        HashMap::keys(self).map(String::as_str)
    }
}

impl TagSource for BTreeMap<String, String> {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        BTreeMap::keys(self).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for Tags {
    fn from(data: HashMap<String, String>) -> Self {
        Self { data }
    }
}
