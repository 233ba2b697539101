//! Text-to-value converters
//!
//! One converter per [`PropertyType`]. Converters only run when a raw source
//! value does not already have the property's native representation.

use thiserror::Error;

use crate::types::{PropertyType, PropertyValue};

/// Converter failure, before the binder attaches the property key
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot parse \"{text}\" as {target}: {reason}")]
pub struct ConversionError {
    pub target: PropertyType,
    pub text: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(target: PropertyType, text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// Parses the textual form of a value into a native property value
///
/// Implementations must be stateless: one instance is shared by every
/// binding in the process.
pub trait PropertyConverter: Send + Sync {
    /// Type produced by this converter
    fn target(&self) -> PropertyType;

    /// Parse `text` into a value of [`Self::target`]
    fn convert_from_text(&self, text: &str) -> Result<PropertyValue, ConversionError>;
}

/// `true` / `false`, ASCII case-insensitive
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanConverter;

impl PropertyConverter for BooleanConverter {
    fn target(&self) -> PropertyType {
        PropertyType::Boolean
    }

    fn convert_from_text(&self, text: &str) -> Result<PropertyValue, ConversionError> {
        if text.eq_ignore_ascii_case("true") {
            Ok(PropertyValue::Boolean(true))
        } else if text.eq_ignore_ascii_case("false") {
            Ok(PropertyValue::Boolean(false))
        } else {
            Err(ConversionError::new(
                PropertyType::Boolean,
                text,
                "expected \"true\" or \"false\"",
            ))
        }
    }
}

/// Exactly one character
#[derive(Debug, Default, Clone, Copy)]
pub struct CharConverter;

impl PropertyConverter for CharConverter {
    fn target(&self) -> PropertyType {
        PropertyType::Char
    }

    fn convert_from_text(&self, text: &str) -> Result<PropertyValue, ConversionError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(PropertyValue::Char(c)),
            _ => Err(ConversionError::new(
                PropertyType::Char,
                text,
                "expected exactly one character",
            )),
        }
    }
}

/// Identity conversion
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl PropertyConverter for StringConverter {
    fn target(&self) -> PropertyType {
        PropertyType::String
    }

    fn convert_from_text(&self, text: &str) -> Result<PropertyValue, ConversionError> {
        Ok(PropertyValue::String(text.to_string()))
    }
}

// Numeric converters use `str::parse` as-is: no trimming, no locale handling.
macro_rules! parse_converter {
    ($name:ident, $native:ty, $variant:ident) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl PropertyConverter for $name {
            fn target(&self) -> PropertyType {
                PropertyType::$variant
            }

            fn convert_from_text(&self, text: &str) -> Result<PropertyValue, ConversionError> {
                text.parse::<$native>()
                    .map(PropertyValue::$variant)
                    .map_err(|e| ConversionError::new(PropertyType::$variant, text, e.to_string()))
            }
        }
    };
}

parse_converter!(ByteConverter, i8, Byte);
parse_converter!(ShortConverter, i16, Short);
parse_converter!(IntegerConverter, i32, Integer);
parse_converter!(LongConverter, i64, Long);
parse_converter!(FloatConverter, f32, Float);
parse_converter!(DoubleConverter, f64, Double);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_converter() {
        let converter = BooleanConverter;
        assert_eq!(
            converter.convert_from_text("true").unwrap(),
            PropertyValue::Boolean(true)
        );
        assert_eq!(
            converter.convert_from_text("FALSE").unwrap(),
            PropertyValue::Boolean(false)
        );
        assert!(converter.convert_from_text("yes").is_err());
    }

    #[test]
    fn test_numeric_converters() {
        assert_eq!(
            ByteConverter.convert_from_text("100").unwrap(),
            PropertyValue::Byte(100)
        );
        assert_eq!(
            ShortConverter.convert_from_text("1000").unwrap(),
            PropertyValue::Short(1000)
        );
        assert_eq!(
            LongConverter.convert_from_text("1000000").unwrap(),
            PropertyValue::Long(1_000_000)
        );
        assert_eq!(
            FloatConverter.convert_from_text("128.128").unwrap(),
            PropertyValue::Float(128.128)
        );
        assert_eq!(
            DoubleConverter.convert_from_text("256.256").unwrap(),
            PropertyValue::Double(256.256)
        );
    }

    #[test]
    fn test_numeric_overflow_is_error() {
        let err = ByteConverter.convert_from_text("300").unwrap_err();
        assert_eq!(err.target, PropertyType::Byte);
        assert_eq!(err.text, "300");
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = DoubleConverter
            .convert_from_text("we should pass double value here")
            .unwrap_err();
        assert_eq!(err.target, PropertyType::Double);
        assert!(IntegerConverter.convert_from_text(" 42").is_err());
    }

    #[test]
    fn test_char_converter() {
        assert_eq!(
            CharConverter.convert_from_text("x").unwrap(),
            PropertyValue::Char('x')
        );
        assert!(CharConverter.convert_from_text("").is_err());
        assert!(CharConverter.convert_from_text("xy").is_err());
    }

    #[test]
    fn test_string_converter_is_identity() {
        assert_eq!(
            StringConverter.convert_from_text("foo bar").unwrap(),
            PropertyValue::from("foo bar")
        );
    }
}
