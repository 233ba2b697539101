//! Bound views
//!
//! A [`BoundView`] is the materialized result of binding: an immutable map
//! from accessor name to validated value. Reading from it never converts or
//! validates again.

use std::collections::HashMap;
use std::sync::Arc;

use propbind_core::{FromPropertyValue, PropertyValue};

/// Read-only, map-backed implementation of a contract
#[derive(Debug, Clone, PartialEq)]
pub struct BoundView {
    contract: Arc<str>,
    values: Arc<HashMap<String, PropertyValue>>,
}

impl BoundView {
    pub(crate) fn new(contract: &str, values: HashMap<String, PropertyValue>) -> Self {
        Self {
            contract: Arc::from(contract),
            values: Arc::new(values),
        }
    }

    /// Name of the contract this view implements
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Raw value behind an accessor
    pub fn value(&self, accessor: &str) -> Option<&PropertyValue> {
        self.values.get(accessor)
    }

    /// Typed value behind an accessor, if present and of type `T`
    pub fn try_get<T: FromPropertyValue>(&self, accessor: &str) -> Option<T> {
        self.value(accessor).and_then(T::from_property_value)
    }

    /// Typed value behind an accessor
    ///
    /// # Panics
    ///
    /// Panics if the accessor was not bound or holds a different type. Both
    /// mean the view is being read through a contract it was not bound for.
    pub fn get<T: FromPropertyValue>(&self, accessor: &str) -> T {
        match self.value(accessor) {
            Some(value) => T::from_property_value(value).unwrap_or_else(|| {
                panic!(
                    "accessor '{}' of contract '{}' holds {} value {}, not {}",
                    accessor,
                    self.contract,
                    value.property_type(),
                    value,
                    std::any::type_name::<T>()
                )
            }),
            None => panic!(
                "accessor '{}' is not bound in contract '{}'",
                accessor, self.contract
            ),
        }
    }

    /// Bound accessor names, in no particular order
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
