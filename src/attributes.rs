use crate::any_value::AnyValue;
use crate::defaults::default_of;
use crate::error::AttributeError;
use std::any::{self, Any};
use std::collections::HashMap;

/// A heterogeneous, string-keyed store of attributes attached to a context
///
/// Each key maps to one type-erased [`AnyValue`]. Typed reads check the stored
/// type tag against the requested type. [`get`](Attributes::get) is lenient: a
/// missing key or a wrong type yields the default value of the requested type,
/// the latter also logging a `bad type` error. [`try_get`](Attributes::try_get)
/// reports both cases as errors instead.
///
/// `Attributes` carries no synchronization of its own. To share one between
/// components use [`SharedAttributes`](crate::SharedAttributes), or wrap it in
/// your own lock when crossing threads.
///
/// # Examples
///
/// ```
/// use sovran_attributes::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.insert("user_id", 42i32);
///
/// assert_eq!(*attrs.get::<i32>("user_id"), 42);
/// // Wrong type: logs an error and falls back to the default
/// assert_eq!(attrs.get::<String>("user_id"), "");
///
/// attrs.erase("user_id");
/// assert!(!attrs.contains("user_id"));
/// ```
#[derive(Debug)]
pub struct Attributes {
    items: HashMap<String, AnyValue>,
}

impl Attributes {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Gets the value stored under `key` as a `T`
    ///
    /// When the key is absent, or holds a value of another type, a reference to
    /// the shared default instance of `T` is returned. There is one such
    /// instance per type for the whole process; types with interior mutability
    /// must not be mutated through it. A type mismatch is logged at error level.
    pub fn get<T>(&self, key: &str) -> &T
    where
        T: Default + Any + Send + Sync,
    {
        if let Some(cell) = self.items.get(key) {
            if let Some(value) = cell.downcast_ref::<T>() {
                return value;
            }
            tracing::error!(
                key,
                expected = any::type_name::<T>(),
                found = cell.type_name(),
                "bad type"
            );
        }
        default_of::<T>()
    }

    /// Gets the value stored under `key`, reporting why it is unavailable
    ///
    /// # Errors
    ///
    /// - Returns `AttributeError::KeyNotFound` if the key doesn't exist
    /// - Returns `AttributeError::TypeMismatch` if the stored value is not a `T`
    pub fn try_get<T: Any>(&self, key: &str) -> Result<&T, AttributeError> {
        let cell = self
            .items
            .get(key)
            .ok_or_else(|| AttributeError::KeyNotFound(key.to_string()))?;
        cell.downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(key, cell.type_name()))
    }

    /// Mutable counterpart of [`try_get`](Attributes::try_get)
    ///
    /// # Errors
    ///
    /// - Returns `AttributeError::KeyNotFound` if the key doesn't exist
    /// - Returns `AttributeError::TypeMismatch` if the stored value is not a `T`
    pub fn try_get_mut<T: Any>(&mut self, key: &str) -> Result<&mut T, AttributeError> {
        let cell = self
            .items
            .get_mut(key)
            .ok_or_else(|| AttributeError::KeyNotFound(key.to_string()))?;
        let found = cell.type_name();
        cell.downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(key, found))
    }

    /// Returns the cell for `key`, inserting an empty one if it is absent
    ///
    /// The cell can be inspected, or assigned a value of any type:
    ///
    /// ```
    /// use sovran_attributes::Attributes;
    ///
    /// let mut attrs = Attributes::new();
    /// attrs.raw_access("retries").set(3u8);
    /// assert_eq!(*attrs.get::<u8>("retries"), 3);
    /// ```
    pub fn raw_access(&mut self, key: &str) -> &mut AnyValue {
        self.items.entry(key.to_string()).or_default()
    }

    /// Returns the cell for `key` without creating one
    pub fn raw(&self, key: &str) -> Option<&AnyValue> {
        self.items.get(key)
    }

    /// Stores `value` under `key`, replacing any previous value and its type
    ///
    /// The value is moved in. To keep a copy, clone it first:
    /// `attrs.insert("user", user.clone())`.
    pub fn insert<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.insert_value(key, AnyValue::new(value));
    }

    /// Stores an already type-erased cell under `key`
    ///
    /// `AnyValue` is not `Clone`, so the cell is always moved in.
    pub fn insert_value(&mut self, key: impl Into<String>, value: AnyValue) {
        self.items.insert(key.into(), value);
    }

    /// Removes the value stored under `key`
    ///
    /// Returns `true` if the key was present and removed, `false` if not present.
    pub fn erase(&mut self, key: &str) -> bool {
        self.items.remove(key).is_some()
    }

    /// Returns true if a value of any type is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Removes every attribute
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of attributes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store holds no attributes
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch<T: Any>(key: &str, found: &'static str) -> AttributeError {
    AttributeError::TypeMismatch {
        key: key.to_string(),
        expected: any::type_name::<T>(),
        found,
    }
}
