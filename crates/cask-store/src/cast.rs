//! Typed views over stored values.
//!
//! The store keeps values opaque. A caller that wants a specific type asks
//! for it at read time; if the stored value cannot be viewed as that type the
//! read reports [`StoreStatus::InvalidCast`](cask_types::StoreStatus::InvalidCast).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

/// Conversion of a stored value into a caller-requested type.
pub trait ValueCast<T> {
    /// Returns `None` when the value cannot be viewed as `T`.
    fn cast(&self) -> Option<T>;
}

impl<T: DeserializeOwned> ValueCast<T> for serde_json::Value {
    fn cast(&self) -> Option<T> {
        T::deserialize(self).ok()
    }
}

/// A type-erased value, for stores shared by callers of different types.
#[derive(Clone)]
pub struct AnyValue(Arc<dyn Any + Send + Sync>);

impl AnyValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl<T: Any + Clone> ValueCast<T> for AnyValue {
    fn cast(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue").finish_non_exhaustive()
    }
}
