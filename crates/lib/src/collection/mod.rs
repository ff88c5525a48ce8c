//! Ordered key-value collection with array ergonomics.
//!
//! This module provides the main public interface of the crate. The
//! [`Collection`] type layers dictionary-style access, array-like positional
//! operations, iteration, serialization, and bulk mutation over a single
//! insertion-ordered mapping.
//!
//! # Usage
//!
//! ```
//! use satchel::Collection;
//!
//! let mut bag = Collection::new();
//! bag.set("name", "Alice").set("age", 30);
//! bag.push("first").push("second");
//!
//! assert_eq!(bag.get_as::<&str>("name"), Some("Alice"));
//! assert_eq!(bag.len(), 4);
//! ```

use indexmap::IndexMap;
use tracing::trace;

// Submodules
pub mod encode;
pub mod errors;
pub mod key;
pub mod traits;
pub mod value;

// Convenience re-exports for core collection types
pub use encode::EncodeOptions;
pub use errors::{CollectionError, EncodeError};
pub use key::Key;
pub use traits::{Structured, Touchable};
pub use value::Value;

/// The plain entry mapping underlying every collection.
///
/// Insertion order is the iteration order. This is the form structured
/// values flatten into, see [`Structured`].
pub type Items = IndexMap<Key, Value>;

/// An insertion-ordered key-value container with array ergonomics.
///
/// A `Collection` holds entries keyed by either text names or positional
/// integer indexes, in one mapping whose iteration order is the insertion
/// order. Dictionary-style access (`set`, `get`, `remove`) and array-style
/// access (`push`, `pop`, `push_front`, `pop_front`) operate on the same
/// entries.
///
/// # Core Operations
///
/// - **Lookup**: [`get`](Self::get), [`get_as`](Self::get_as),
///   [`contains_key`](Self::contains_key)
/// - **Mutation**: [`set`](Self::set), [`remove`](Self::remove), the
///   positional stack/queue operations, [`reverse`](Self::reverse)
/// - **Bulk operations**: [`merge`](Self::merge),
///   [`map_values`](Self::map_values)
/// - **Conversion**: [`to_plain`](Self::to_plain), [`to_json`](Self::to_json)
///
/// Mutating operations that have nothing to report return `&mut Self`, so
/// edits chain:
///
/// ```
/// # use satchel::Collection;
/// let mut bag = Collection::new();
/// bag.push("a").push("b").push_front("z").reverse();
///
/// let values: Vec<_> = bag.values().cloned().collect();
/// assert_eq!(values, ["b", "a", "z"]);
/// ```
///
/// # Positional keys
///
/// `push` appends under the next free integer index, one past the largest
/// index present. `push_front` prepends under index `0` and renumbers the
/// other positional keys sequentially, exactly as an array prepend would;
/// text keys keep their names and relative order throughout.
///
/// ```
/// # use satchel::{Collection, Key};
/// let mut bag = Collection::new();
/// bag.set("title", "log").push("first");
/// bag.push_front("zeroth");
///
/// let keys: Vec<_> = bag.keys().cloned().collect();
/// assert_eq!(keys, [Key::Index(0), Key::Text("title".into()), Key::Index(1)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// Entries in insertion order, keys unique
    items: Items,
}

impl Collection {
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self {
            items: Items::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Items::with_capacity(capacity),
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection holds no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the collection contains the given key
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into())
    }

    /// Gets a value by key.
    ///
    /// Returns `None` only when the key is absent. A key that is present
    /// with a [`Value::Null`] entry yields `Some(&Value::Null)`; explicit
    /// presence wins over any caller-side default.
    ///
    /// ```
    /// # use satchel::{Collection, Value};
    /// let mut bag = Collection::new();
    /// bag.set("note", Value::Null);
    ///
    /// assert_eq!(bag.get("note"), Some(&Value::Null));
    /// assert_eq!(bag.get("missing"), None);
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.items.get(&key.into())
    }

    /// Gets a mutable reference to a value by key
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.items.get_mut(&key.into())
    }

    /// Gets a value by key with automatic type conversion.
    ///
    /// Returns `Some(T)` if the key exists and the stored value converts to
    /// `T`, `None` otherwise.
    ///
    /// ```
    /// # use satchel::Collection;
    /// let mut bag = Collection::new();
    /// bag.set("name", "Alice").set("age", 30);
    ///
    /// assert_eq!(bag.get_as::<&str>("name"), Some("Alice"));
    /// assert_eq!(bag.get_as::<i64>("age"), Some(30));
    /// assert_eq!(bag.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: impl Into<Key>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = CollectionError>,
    {
        let value = self.get(key)?;
        T::try_from(value).ok()
    }

    /// Sets a value at the given key.
    ///
    /// An existing key is overwritten in place without changing its
    /// position; a new key is appended at the end.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Sets every entry from `entries`, equivalent to calling
    /// [`set`](Self::set) once per pair in order.
    ///
    /// ```
    /// # use satchel::Collection;
    /// let mut bag = Collection::new();
    /// bag.set_many([("x", 1), ("y", 2)]);
    ///
    /// assert_eq!(bag.get_as::<i64>("x"), Some(1));
    /// assert_eq!(bag.get_as::<i64>("y"), Some(2));
    /// ```
    pub fn set_many<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
        self
    }

    /// Builder method to set a value and return self
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes a key, returning the old value if it was present.
    ///
    /// Removing an absent key is a no-op. The relative order of the
    /// remaining entries is unchanged.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.items.shift_remove(&key.into())
    }

    /// Appends a value at the next integer position.
    ///
    /// The new key is one past the largest positional index present, or `0`
    /// when there is none.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let next = self
            .items
            .keys()
            .filter_map(Key::as_index)
            .max()
            .map_or(0, |largest| largest.saturating_add(1).max(0));
        self.items.insert(Key::Index(next), value.into());
        self
    }

    /// Removes and returns the last entry in iteration order.
    ///
    /// Returns `None` when the collection is empty. Remaining keys are not
    /// renumbered.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop().map(|(_, value)| value)
    }

    /// Inserts a value at the front under index `0`, renumbering the other
    /// positional keys sequentially as an array prepend would.
    ///
    /// ```
    /// # use satchel::Collection;
    /// let mut bag = Collection::new();
    /// bag.push("a").push("b").push_front("z");
    ///
    /// let values: Vec<_> = bag.values().cloned().collect();
    /// assert_eq!(values, ["z", "a", "b"]);
    /// ```
    pub fn push_front(&mut self, value: impl Into<Value>) -> &mut Self {
        let prior = std::mem::take(&mut self.items);
        let mut fronted = Items::with_capacity(prior.len() + 1);
        fronted.insert(Key::Index(0), value.into());
        self.items = renumber_positional(fronted, prior, 1);
        self
    }

    /// Removes and returns the first entry in iteration order, renumbering
    /// positional keys from zero.
    ///
    /// Returns `None` when the collection is empty.
    pub fn pop_front(&mut self) -> Option<Value> {
        let (_, first) = self.items.shift_remove_index(0)?;
        let prior = std::mem::take(&mut self.items);
        self.items = renumber_positional(Items::with_capacity(prior.len()), prior, 0);
        Some(first)
    }

    /// Reverses the iteration order of all entries in place, keeping keys.
    ///
    /// Reversing twice restores the original order.
    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Merges entries from a value into this collection.
    ///
    /// The source must be structured: another collection, or a plain entry
    /// mapping converted through `Into<Value>`. Anything else fails with
    /// [`CollectionError::MergeUnsupported`]. Incoming entries win on key
    /// conflicts and lead the resulting order; existing entries survive only
    /// for keys absent from the incoming set, following in their original
    /// order.
    ///
    /// ```
    /// # use satchel::Collection;
    /// let mut ours = Collection::new();
    /// ours.set("b", 3).set("c", 4);
    ///
    /// let mut theirs = Collection::new();
    /// theirs.set("a", 1).set("b", 2);
    ///
    /// ours.merge(theirs)?;
    /// assert_eq!(ours.get_as::<i64>("a"), Some(1));
    /// assert_eq!(ours.get_as::<i64>("b"), Some(2)); // incoming wins
    /// assert_eq!(ours.get_as::<i64>("c"), Some(4)); // survivor
    /// # Ok::<(), satchel::CollectionError>(())
    /// ```
    pub fn merge(&mut self, source: impl Into<Value>) -> Result<&mut Self, CollectionError> {
        match source.into() {
            Value::Collection(collection) => Ok(self.merge_items(collection.items)),
            other => Err(CollectionError::MergeUnsupported {
                found: other.type_name(),
            }),
        }
    }

    /// Merges entries from any [`Structured`] source.
    ///
    /// Same precedence as [`merge`](Self::merge); infallible because the
    /// source proves it carries an entry mapping by implementing the
    /// capability.
    pub fn merge_structured(&mut self, source: &(impl Structured + ?Sized)) -> &mut Self {
        self.merge_items(source.to_plain_map())
    }

    fn merge_items(&mut self, incoming: Items) -> &mut Self {
        trace!(
            incoming = incoming.len(),
            existing = self.items.len(),
            "merging entries"
        );
        let prior = std::mem::replace(&mut self.items, incoming);
        for (key, value) in prior {
            self.items.entry(key).or_insert(value);
        }
        self
    }

    /// Applies a transform to every value in place, keys and order kept.
    ///
    /// ```
    /// # use satchel::{Collection, Value};
    /// let mut bag = Collection::new();
    /// bag.push(1).push(2).push(3);
    ///
    /// bag.map_values(|value| match value {
    ///     Value::Int(n) => Value::Int(n * 10),
    ///     other => other,
    /// });
    ///
    /// assert_eq!(bag.get_as::<i64>(1), Some(20));
    /// ```
    pub fn map_values(&mut self, mut transform: impl FnMut(Value) -> Value) -> &mut Self {
        for value in self.items.values_mut() {
            let current = std::mem::replace(value, Value::Null);
            *value = transform(current);
        }
        self
    }

    /// Touches every stored value that implements [`Touchable`].
    ///
    /// Values without the capability are skipped silently; results are
    /// discarded. Nested collections cascade the touch to their own values.
    pub fn touch_each(&mut self) -> &mut Self {
        for value in self.items.values_mut() {
            if let Some(touchable) = value.as_touchable_mut() {
                touchable.touch();
            }
        }
        self
    }

    /// Returns the raw underlying mapping.
    ///
    /// This is a live view, not a copy; callers must not assume isolation
    /// from later mutations of the collection.
    pub fn items(&self) -> &Items {
        &self.items
    }

    /// Returns the raw underlying mapping mutably
    pub fn items_mut(&mut self) -> &mut Items {
        &mut self.items
    }

    /// Consumes the collection, returning the underlying mapping
    pub fn into_items(self) -> Items {
        self.items
    }

    /// Returns an iterator over all key-value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.items.iter()
    }

    /// Returns an iterator over all keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.items.keys()
    }

    /// Returns an iterator over all values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items.values()
    }

    /// Returns a mutable iterator over all values in insertion order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.items.values_mut()
    }
}

/// Moves `prior` entries into `into`, reassigning positional keys
/// sequentially starting at `next`. Text keys are kept as they are.
fn renumber_positional(mut into: Items, prior: Items, mut next: i64) -> Items {
    for (key, value) in prior {
        match key {
            Key::Index(_) => {
                into.insert(Key::Index(next), value);
                next += 1;
            }
            text @ Key::Text(_) => {
                into.insert(text, value);
            }
        }
    }
    into
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl From<Items> for Collection {
    fn from(items: Items) -> Self {
        Self { items }
    }
}

impl From<Items> for Value {
    fn from(items: Items) -> Self {
        Value::Collection(Collection::from(items))
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut collection = Collection::new();
        collection.set_many(iter);
        collection
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut collection = Collection::new();
        for value in iter {
            collection.push(value);
        }
        collection
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Collection {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.set_many(iter);
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Collection {
    type Item = (&'a Key, &'a mut Value);
    type IntoIter = indexmap::map::IterMut<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl std::ops::Index<&str> for Collection {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).expect("no entry found for key")
    }
}

impl std::ops::Index<i64> for Collection {
    type Output = Value;

    fn index(&self, key: i64) -> &Value {
        self.get(key).expect("no entry found for key")
    }
}

// Capability implementations
impl Structured for Collection {
    fn to_plain_map(&self) -> Items {
        self.items.clone()
    }
}

impl Touchable for Collection {
    /// A touched collection cascades the broadcast to its own values
    fn touch(&mut self) {
        self.touch_each();
    }
}
