//! Strategy traits for property binding
//!
//! Every step of binding that a caller may want to change is a trait:
//!
//! ```text
//! Metadata resolution:
//!   - NameExtractor: Which accessors are properties, accessor name → words
//!   - NameTranslator: Words → source lookup key
//!
//! Binding:
//!   - PropertyConverter: Text → native value
//!   - PropertyValidator: Native value → accepted or rejected
//! ```
//!
//! Built-in implementations live next to each trait. Contracts refer to
//! implementations through [`crate::StrategyRef`] handles.

mod converter;
mod extractor;
mod translator;
mod validator;

pub use converter::{
    BooleanConverter, ByteConverter, CharConverter, ConversionError, DoubleConverter,
    FloatConverter, IntegerConverter, LongConverter, PropertyConverter, ShortConverter,
    StringConverter,
};
pub use extractor::{
    split_camel_case, CamelCaseNameExtractor, GetterNameExtractor, NameExtractor,
    SnakeCaseNameExtractor,
};
pub use translator::{
    join_words, DottedNameTranslator, EnvironmentNameTranslator, HyphenatedNameTranslator,
    NameTranslator, UnderscoredNameTranslator,
};
pub use validator::{AcceptAllValidator, PropertyValidator};
