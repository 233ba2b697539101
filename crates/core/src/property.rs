//! Property descriptors and contract metadata

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::strategy::{ConverterRef, TranslatorRef, ValidatorRef};
use crate::types::PropertyType;

/// A single lowercase token of a property name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(String);

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One configuration property implied by an eligible accessor
///
/// Two descriptors are equal iff accessor name, words, type and validator are
/// all equal. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDescriptor {
    accessor_name: String,
    words: Vec<Word>,
    property_type: PropertyType,
    validator: ValidatorRef,
}

impl PropertyDescriptor {
    /// Create a descriptor
    ///
    /// Fails if the accessor name is empty, or the words are empty or all blank.
    pub fn new(
        accessor_name: impl Into<String>,
        words: Vec<Word>,
        property_type: PropertyType,
        validator: ValidatorRef,
    ) -> Result<Self> {
        let accessor_name = accessor_name.into();

        if accessor_name.is_empty() {
            return Err(Error::InvalidDescriptor(
                "accessor name can't be empty".to_string(),
            ));
        }

        if words.iter().all(Word::is_empty) {
            return Err(Error::InvalidDescriptor(format!(
                "accessor '{}' has no property name words",
                accessor_name
            )));
        }

        Ok(Self {
            accessor_name,
            words,
            property_type,
            validator,
        })
    }

    /// Create a descriptor using the type's default validator
    pub fn with_default_validator(
        accessor_name: impl Into<String>,
        words: Vec<Word>,
        property_type: PropertyType,
    ) -> Result<Self> {
        Self::new(
            accessor_name,
            words,
            property_type,
            property_type.default_validator(),
        )
    }

    /// Name of the accessor this property came from
    pub fn accessor_name(&self) -> &str {
        &self.accessor_name
    }

    /// Property name in words
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn validator(&self) -> ValidatorRef {
        self.validator
    }

    /// Converter for this property, derived from its type
    pub fn converter(&self) -> ConverterRef {
        self.property_type.default_converter()
    }
}

/// Resolved shape of one contract: translator plus property descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    translator: TranslatorRef,
    properties: HashSet<PropertyDescriptor>,
}

impl Metadata {
    pub fn new(translator: TranslatorRef, properties: HashSet<PropertyDescriptor>) -> Self {
        Self {
            translator,
            properties,
        }
    }

    pub fn translator(&self) -> TranslatorRef {
        self.translator
    }

    /// Properties, in no particular order
    pub fn properties(&self) -> &HashSet<PropertyDescriptor> {
        &self.properties
    }

    /// Descriptor for an accessor, if that accessor is a property
    pub fn descriptor(&self, accessor_name: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|p| p.accessor_name() == accessor_name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
