//! Name extraction strategies
//!
//! An extractor decides which accessors of a contract are configuration
//! properties and splits an accessor name into the ordered, lowercase words
//! that make up the property name.

use crate::contract::Accessor;
use crate::property::Word;
use crate::types::PropertyType;

/// Accessor eligibility and name splitting
pub trait NameExtractor: Send + Sync {
    /// Whether `accessor` denotes a configuration property
    fn is_eligible(&self, accessor: &Accessor) -> bool;

    /// Split an eligible accessor's name into words
    fn split_name(&self, accessor_name: &str) -> Vec<Word>;
}

/// Split at every uppercase character except the first, lowercasing each fragment
///
/// The trailing fragment is always emitted, so a name without an internal
/// uppercase boundary yields a single word.
pub fn split_camel_case(name: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start = 0;

    for (idx, ch) in name.char_indices() {
        if idx > 0 && ch.is_uppercase() {
            words.push(Word::new(name[start..idx].to_lowercase()));
            start = idx;
        }
    }

    words.push(Word::new(name[start..].to_lowercase()));
    words
}

fn has_property_type(accessor: &Accessor) -> bool {
    PropertyType::from_representation(&accessor.return_type()).is_some()
}

/// Default extractor for `getXxx` style accessors
///
/// Eligible accessors take no parameters, return a property type and are named
/// `get` followed by at least one more character. `getMyCoolName` becomes
/// `["my", "cool", "name"]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GetterNameExtractor;

impl GetterNameExtractor {
    pub const PREFIX: &'static str = "get";
}

impl NameExtractor for GetterNameExtractor {
    fn is_eligible(&self, accessor: &Accessor) -> bool {
        let name = accessor.name();
        // a bare "get" has no property name
        let valid_name = name.starts_with(Self::PREFIX) && name.len() > Self::PREFIX.len();

        valid_name && accessor.parameter_count() == 0 && has_property_type(accessor)
    }

    fn split_name(&self, accessor_name: &str) -> Vec<Word> {
        let stripped = accessor_name
            .strip_prefix(Self::PREFIX)
            .unwrap_or(accessor_name);
        split_camel_case(stripped)
    }
}

/// Accepts every zero-argument accessor and splits its whole name
///
/// `engineThreshold` becomes `["engine", "threshold"]`. Return types are not
/// checked here, so a contract bound with this extractor must only declare
/// property-typed accessors.
#[derive(Debug, Default, Clone, Copy)]
pub struct CamelCaseNameExtractor;

impl NameExtractor for CamelCaseNameExtractor {
    fn is_eligible(&self, accessor: &Accessor) -> bool {
        accessor.parameter_count() == 0
    }

    fn split_name(&self, accessor_name: &str) -> Vec<Word> {
        split_camel_case(accessor_name)
    }
}

/// Extractor for snake_case accessor names
///
/// Eligible accessors take no parameters and return a property type.
/// `engine_threshold` becomes `["engine", "threshold"]`; empty fragments from
/// leading, trailing or doubled underscores are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCaseNameExtractor;

impl NameExtractor for SnakeCaseNameExtractor {
    fn is_eligible(&self, accessor: &Accessor) -> bool {
        accessor.parameter_count() == 0
            && accessor.name().split('_').any(|part| !part.is_empty())
            && has_property_type(accessor)
    }

    fn split_name(&self, accessor_name: &str) -> Vec<Word> {
        accessor_name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| Word::new(part.to_lowercase()))
            .collect()
    }
}
