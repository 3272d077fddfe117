use std::any::{self, Any, TypeId};

/// A type-erased cell that remembers the type of the value it holds
///
/// A cell is either empty or holds exactly one value. The recorded type tag is
/// set together with the value and only changes when a new value is written.
/// An empty cell reports `()` as its type and never matches a typed access.
///
/// # Examples
///
/// ```
/// use sovran_attributes::AnyValue;
///
/// let mut cell = AnyValue::new(42u32);
/// assert!(cell.is_type::<u32>());
/// assert_eq!(cell.downcast_ref::<u32>(), Some(&42));
/// assert_eq!(cell.downcast_ref::<i64>(), None);
///
/// cell.set("now a string".to_string());
/// assert!(cell.is_type::<String>());
/// ```
#[derive(Debug)]
pub struct AnyValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Option<Box<dyn Any + Send + Sync>>,
}

impl AnyValue {
    /// Create a cell holding `value`
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            value: Some(Box::new(value)),
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self {
            type_id: TypeId::of::<()>(),
            type_name: any::type_name::<()>(),
            value: None,
        }
    }

    /// Returns true if the cell holds no value
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// The `TypeId` of the held value, or of `()` when empty
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name of the held value, for diagnostics only
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if the cell holds a value of type T
    pub fn is_type<T: 'static>(&self) -> bool {
        self.value.is_some() && self.type_id == TypeId::of::<T>()
    }

    /// Get a reference to the held value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref::<T>()
    }

    /// Get a mutable reference to the held value if it is of type T
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.value.as_mut()?.downcast_mut::<T>()
    }

    /// Replace the held value, and its type tag, with `value`
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        *self = Self::new(value);
    }

    /// Move the held value out if it is of type T, leaving the cell empty
    ///
    /// On a type mismatch the cell is left untouched and `None` is returned.
    pub fn take<T: 'static>(&mut self) -> Option<T> {
        if !self.is_type::<T>() {
            return None;
        }
        let boxed = self.value.take()?;
        self.reset();
        boxed.downcast::<T>().ok().map(|value| *value)
    }

    /// Drop the held value, leaving the cell empty
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

impl Default for AnyValue {
    fn default() -> Self {
        Self::empty()
    }
}
