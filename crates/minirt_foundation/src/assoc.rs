//! Associative map with an explicit uninitialized state.
//!
//! A thin wrapper around the `im` crate's persistent hash map. The wrapper
//! adds one piece of state the backing map cannot express: whether the map
//! was ever initialized. A never-touched map and an initialized empty map
//! both have no entries, but only the first reports
//! [`is_initialized`](AssocMap::is_initialized) as false.

use std::fmt;
use std::hash::Hash;

/// Storage state of an [`AssocMap`].
#[derive(Clone)]
enum State<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    Uninitialized,
    Initialized(im::HashMap<K, V>),
}

/// Hash map that distinguishes "never initialized" from "empty".
///
/// Cloning is O(1); the clone is an independent map that shares structure
/// with the original.
#[derive(Clone)]
pub struct AssocMap<K, V>(State<K, V>)
where
    K: Clone + Eq + Hash,
    V: Clone;

impl<K: Clone + Eq + Hash, V: Clone> AssocMap<K, V> {
    /// Creates an uninitialized map.
    #[must_use]
    pub fn uninit() -> Self {
        Self(State::Uninitialized)
    }

    /// Creates an initialized, empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(State::Initialized(im::HashMap::new()))
    }

    /// Returns true once the map has been initialized.
    ///
    /// Deleting or clearing entries never returns a map to the
    /// uninitialized state.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(self.0, State::Initialized(_))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0 {
            State::Uninitialized => 0,
            State::Initialized(map) => map.len(),
        }
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a reference to the value for `key`.
    #[must_use]
    pub fn lookup(&self, key: &K) -> Option<&V> {
        match &self.0 {
            State::Uninitialized => None,
            State::Initialized(map) => map.get(key),
        }
    }

    /// Returns true if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Inserts or overwrites the entry for `key`, initializing the map first
    /// if needed. Returns the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.0 {
            State::Initialized(map) => map.insert(key, value),
            State::Uninitialized => {
                self.0 = State::Initialized(im::HashMap::unit(key, value));
                None
            }
        }
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// Does nothing on an uninitialized map or a missing key.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        match &mut self.0 {
            State::Uninitialized => None,
            State::Initialized(map) => map.remove(key),
        }
    }

    /// Removes every entry, keeping the initialized state.
    pub fn clear(&mut self) {
        if let State::Initialized(map) = &mut self.0 {
            map.clear();
        }
    }

    /// Returns an iterator over key-value pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries().into_iter().flat_map(|map| map.iter())
    }

    /// Returns an iterator over keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over values in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    fn entries(&self) -> Option<&im::HashMap<K, V>> {
        match &self.0 {
            State::Uninitialized => None,
            State::Initialized(map) => Some(map),
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Default> AssocMap<K, V> {
    /// Looks up `key`, returning `(value, found)`.
    ///
    /// A missing key, or any key of an uninitialized map, yields
    /// `(V::default(), false)`.
    #[must_use]
    pub fn get(&self, key: &K) -> (V, bool) {
        match self.lookup(key) {
            Some(value) => (value.clone(), true),
            None => (V::default(), false),
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Default for AssocMap<K, V> {
    fn default() -> Self {
        Self::uninit()
    }
}

impl<K: Clone + Eq + Hash + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug for AssocMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            State::Uninitialized => f.write_str("AssocMap(uninit)"),
            State::Initialized(map) => f.debug_map().entries(map.iter()).finish(),
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone + PartialEq> PartialEq for AssocMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (State::Uninitialized, State::Uninitialized) => true,
            (State::Initialized(a), State::Initialized(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Eq> Eq for AssocMap<K, V> {}

impl<K: Clone + Eq + Hash, V: Clone> FromIterator<(K, V)> for AssocMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(State::Initialized(im::HashMap::from_iter(iter)))
    }
}

impl<K: Clone + Eq + Hash, V: Clone, const N: usize> From<[(K, V); N]> for AssocMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for AssocMap<K, V>
where
    K: Clone + Eq + Hash + serde::Serialize,
    V: Clone + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            State::Uninitialized => serializer.serialize_none(),
            State::Initialized(map) => serializer.serialize_some(map),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for AssocMap<K, V>
where
    K: Clone + Eq + Hash + serde::Deserialize<'de>,
    V: Clone + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries =
            <Option<im::HashMap<K, V>> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self(entries.map_or(State::Uninitialized, State::Initialized)))
    }
}
