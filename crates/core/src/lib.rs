//! Core types and traits for typed property binding
//!
//! This crate provides the building blocks used by `propbind-config`:
//! - Property type model and runtime values
//! - Property descriptors and resolved contract metadata
//! - Contract shapes (accessors, inheritance, strategy overrides)
//! - Strategy traits (extraction, translation, conversion, validation)
//!   with their built-in implementations
//! - Error types

pub mod contract;
pub mod error;
pub mod property;
pub mod strategy;
pub mod traits;
pub mod types;

pub use contract::{Accessor, ContractKind, ContractShape, StrategyOverride};
pub use error::{Error, Result};
pub use property::{Metadata, PropertyDescriptor, Word};
pub use strategy::{ConverterRef, ExtractorRef, StrategyRef, TranslatorRef, ValidatorRef};
pub use types::{FromPropertyValue, PropertyType, PropertyValue, Representation};

// Trait re-exports
pub use traits::{
    // Extraction
    split_camel_case, CamelCaseNameExtractor, GetterNameExtractor, NameExtractor,
    SnakeCaseNameExtractor,
    // Translation
    join_words, DottedNameTranslator, EnvironmentNameTranslator, HyphenatedNameTranslator,
    NameTranslator, UnderscoredNameTranslator,
    // Conversion
    BooleanConverter, ByteConverter, CharConverter, ConversionError, DoubleConverter,
    FloatConverter, IntegerConverter, LongConverter, PropertyConverter, ShortConverter,
    StringConverter,
    // Validation
    AcceptAllValidator, PropertyValidator,
};
