use crate::attributes::Attributes;
use crate::error::AttributeError;
use std::any::Any;
use parking_lot::RwLock;
use std::sync::Arc;

/// A reference-counted handle to one [`Attributes`] store
///
/// Cloning the handle shares the store; it is dropped when the last handle
/// goes away. Handles are `Send + Sync` and may be moved to other threads.
/// Access never waits: a write while another access is in progress, or a
/// read while a write is in progress, fails with `AttributeError::Borrowed`.
/// Callers that need to wait for each other wrap the handle in their own
/// `Arc<Mutex<_>>`.
///
/// # Examples
///
/// ```
/// use sovran_attributes::{AttributeError, SharedAttributes};
///
/// let attrs = SharedAttributes::new();
/// let handle = attrs.clone();
///
/// handle.insert("request_id", 7u64)?;
/// assert_eq!(attrs.get::<u64>("request_id")?, 7);
///
/// let len = attrs.with(|a| a.len())?;
/// assert_eq!(len, 1);
/// # Ok::<(), AttributeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedAttributes {
    inner: Arc<RwLock<Attributes>>,
}

impl SharedAttributes {
    /// Creates a handle to a new, empty store
    pub fn new() -> Self {
        Self::from(Attributes::new())
    }

    /// Runs `f` with read access to the store
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is being written to.
    pub fn with<F, R>(&self, f: F) -> Result<R, AttributeError>
    where
        F: FnOnce(&Attributes) -> R,
    {
        let attrs = self.inner.try_read().ok_or(AttributeError::Borrowed)?;
        Ok(f(&*attrs))
    }

    /// Runs `f` with write access to the store
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is already being accessed.
    pub fn with_mut<F, R>(&self, f: F) -> Result<R, AttributeError>
    where
        F: FnOnce(&mut Attributes) -> R,
    {
        let mut attrs = self.inner.try_write().ok_or(AttributeError::Borrowed)?;
        Ok(f(&mut *attrs))
    }

    /// Retrieves a clone of the value stored under `key`
    ///
    /// Follows [`Attributes::get`]: a missing key or a wrong type yields the
    /// default value.
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is being written to.
    pub fn get<T>(&self, key: &str) -> Result<T, AttributeError>
    where
        T: Default + Clone + Any + Send + Sync,
    {
        self.with(|attrs| attrs.get::<T>(key).clone())
    }

    /// Stores `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is already being accessed.
    pub fn insert<T>(&self, key: impl Into<String>, value: T) -> Result<(), AttributeError>
    where
        T: Any + Send + Sync,
    {
        self.with_mut(|attrs| attrs.insert(key, value))
    }

    /// Removes the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is already being accessed.
    pub fn erase(&self, key: &str) -> Result<bool, AttributeError> {
        self.with_mut(|attrs| attrs.erase(key))
    }

    /// Returns true if a value is stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is being written to.
    pub fn contains(&self, key: &str) -> Result<bool, AttributeError> {
        self.with(|attrs| attrs.contains(key))
    }

    /// Removes every attribute
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is already being accessed.
    pub fn clear(&self) -> Result<(), AttributeError> {
        self.with_mut(Attributes::clear)
    }

    /// Returns the number of attributes
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is being written to.
    pub fn len(&self) -> Result<usize, AttributeError> {
        self.with(Attributes::len)
    }

    /// Returns true if the store holds no attributes
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::Borrowed` if the store is being written to.
    pub fn is_empty(&self) -> Result<bool, AttributeError> {
        self.with(Attributes::is_empty)
    }

    /// Number of live handles to this store
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns true if both handles refer to the same store
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Attributes> for SharedAttributes {
    fn from(attrs: Attributes) -> Self {
        Self {
            inner: Arc::new(RwLock::new(attrs)),
        }
    }
}
