use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;

type Registry = HashMap<TypeId, &'static (dyn Any + Send + Sync)>;

static DEFAULTS: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(HashMap::new()));

fn lookup<T: Any>(registry: &Registry) -> Option<&'static T> {
    registry
        .get(&TypeId::of::<T>())
        .copied()
        .and_then(|value| value.downcast_ref::<T>())
}

/// Returns the process-wide default instance of `T`
///
/// The instance is built on the first call for each type and lives until the
/// process exits. It is only ever handed out as a shared reference.
pub(crate) fn default_of<T>() -> &'static T
where
    T: Default + Any + Send + Sync,
{
    if let Some(value) = lookup::<T>(&DEFAULTS.read()) {
        return value;
    }

    // Built outside the lock: a Default impl is free to touch attributes.
    let fresh = T::default();

    let mut registry = DEFAULTS.write();
    if let Some(value) = lookup::<T>(&registry) {
        return value;
    }
    let value: &'static T = Box::leak(Box::new(fresh));
    registry.insert(TypeId::of::<T>(), value);
    value
}
