//! Property value validators

use crate::types::PropertyValue;

/// Decides whether a materialized value is acceptable
///
/// Validators see the value after conversion, so they can rely on it having
/// the property's native type. `is_valid` must be total: return `false`
/// rather than panic on unexpected input.
///
/// # Example
///
/// ```
/// use propbind_core::{PropertyValidator, PropertyValue};
///
/// #[derive(Default)]
/// struct EngineThresholdValidator;
///
/// impl PropertyValidator for EngineThresholdValidator {
///     fn is_valid(&self, value: &PropertyValue) -> bool {
///         value.as_f64().map_or(false, |v| v > 250.0)
///     }
/// }
///
/// assert!(!EngineThresholdValidator.is_valid(&PropertyValue::Double(249.0)));
/// ```
pub trait PropertyValidator: Send + Sync {
    fn is_valid(&self, value: &PropertyValue) -> bool;
}

/// Default validator: accepts every value
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllValidator;

impl PropertyValidator for AcceptAllValidator {
    fn is_valid(&self, _value: &PropertyValue) -> bool {
        true
    }
}
