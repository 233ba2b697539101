//! Property type model
//!
//! A closed set of scalar types that a configuration property may have.
//! Each type knows its native Rust representation plus the converter and
//! validator used when a contract does not say otherwise.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::strategy::{ConverterRef, ValidatorRef};
use crate::traits::{
    AcceptAllValidator, BooleanConverter, ByteConverter, CharConverter, DoubleConverter,
    FloatConverter, IntegerConverter, LongConverter, ShortConverter, StringConverter,
};

/// Identity of a native Rust type
///
/// Used both as the declared return type of an accessor and as the native
/// representation of a [`PropertyType`]. Two representations are equal iff they
/// describe the exact same type.
#[derive(Clone, Copy)]
pub struct Representation {
    id: TypeId,
    name: &'static str,
}

impl Representation {
    /// Representation of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name, for diagnostics only
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Representation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Representation {}

impl Hash for Representation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Representation({})", self.name)
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Supported property types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Char,
    String,
}

impl PropertyType {
    /// All variants, in declaration order
    pub const ALL: [PropertyType; 9] = [
        PropertyType::Boolean,
        PropertyType::Byte,
        PropertyType::Short,
        PropertyType::Integer,
        PropertyType::Long,
        PropertyType::Float,
        PropertyType::Double,
        PropertyType::Char,
        PropertyType::String,
    ];

    /// Native Rust representation of this type
    pub fn representation(&self) -> Representation {
        match self {
            PropertyType::Boolean => Representation::of::<bool>(),
            PropertyType::Byte => Representation::of::<i8>(),
            PropertyType::Short => Representation::of::<i16>(),
            PropertyType::Integer => Representation::of::<i32>(),
            PropertyType::Long => Representation::of::<i64>(),
            PropertyType::Float => Representation::of::<f32>(),
            PropertyType::Double => Representation::of::<f64>(),
            PropertyType::Char => Representation::of::<char>(),
            PropertyType::String => Representation::of::<String>(),
        }
    }

    /// Converter used to parse textual values of this type
    pub fn default_converter(&self) -> ConverterRef {
        match self {
            PropertyType::Boolean => ConverterRef::of::<BooleanConverter>(),
            PropertyType::Byte => ConverterRef::of::<ByteConverter>(),
            PropertyType::Short => ConverterRef::of::<ShortConverter>(),
            PropertyType::Integer => ConverterRef::of::<IntegerConverter>(),
            PropertyType::Long => ConverterRef::of::<LongConverter>(),
            PropertyType::Float => ConverterRef::of::<FloatConverter>(),
            PropertyType::Double => ConverterRef::of::<DoubleConverter>(),
            PropertyType::Char => ConverterRef::of::<CharConverter>(),
            PropertyType::String => ConverterRef::of::<StringConverter>(),
        }
    }

    /// Validator used when the accessor carries no override
    pub fn default_validator(&self) -> ValidatorRef {
        ValidatorRef::of::<AcceptAllValidator>()
    }

    /// Find the type whose native representation is exactly `representation`
    ///
    /// Returns `None` when the representation is not a recognized
    /// configuration property type.
    pub fn from_representation(representation: &Representation) -> Option<PropertyType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.representation() == *representation)
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Boolean => "boolean",
            PropertyType::Byte => "byte",
            PropertyType::Short => "short",
            PropertyType::Integer => "integer",
            PropertyType::Long => "long",
            PropertyType::Float => "float",
            PropertyType::Double => "double",
            PropertyType::Char => "char",
            PropertyType::String => "string",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value, either read from a source or materialized by binding
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
}

impl PropertyValue {
    /// Property type this value already has
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Byte(_) => PropertyType::Byte,
            PropertyValue::Short(_) => PropertyType::Short,
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Long(_) => PropertyType::Long,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Double(_) => PropertyType::Double,
            PropertyValue::Char(_) => PropertyType::Char,
            PropertyValue::String(_) => PropertyType::String,
        }
    }

    /// Runtime representation of the held value
    pub fn representation(&self) -> Representation {
        self.property_type().representation()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value, widened to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Byte(v) => Some(i64::from(*v)),
            PropertyValue::Short(v) => Some(i64::from(*v)),
            PropertyValue::Integer(v) => Some(i64::from(*v)),
            PropertyValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Any numeric value as `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(f64::from(*v)),
            PropertyValue::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            PropertyValue::Char(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(v) => write!(f, "{}", v),
            PropertyValue::Byte(v) => write!(f, "{}", v),
            PropertyValue::Short(v) => write!(f, "{}", v),
            PropertyValue::Integer(v) => write!(f, "{}", v),
            PropertyValue::Long(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Double(v) => write!(f, "{}", v),
            PropertyValue::Char(v) => write!(f, "{}", v),
            PropertyValue::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

/// Native types that can be read back out of a [`PropertyValue`]
pub trait FromPropertyValue: Sized + 'static {
    fn from_property_value(value: &PropertyValue) -> Option<Self>;
}

macro_rules! native_property {
    ($native:ty, $variant:ident) => {
        impl From<$native> for PropertyValue {
            fn from(value: $native) -> Self {
                PropertyValue::$variant(value)
            }
        }

        impl FromPropertyValue for $native {
            fn from_property_value(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

native_property!(bool, Boolean);
native_property!(i8, Byte);
native_property!(i16, Short);
native_property!(i32, Integer);
native_property!(i64, Long);
native_property!(f32, Float);
native_property!(f64, Double);
native_property!(char, Char);
native_property!(String, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_representation_known_types() {
        assert_eq!(
            PropertyType::from_representation(&Representation::of::<f64>()),
            Some(PropertyType::Double)
        );
        assert_eq!(
            PropertyType::from_representation(&Representation::of::<String>()),
            Some(PropertyType::String)
        );
        assert_eq!(
            PropertyType::from_representation(&Representation::of::<char>()),
            Some(PropertyType::Char)
        );
    }

    #[test]
    fn test_from_representation_unknown_types() {
        assert_eq!(PropertyType::from_representation(&Representation::of::<u32>()), None);
        assert_eq!(PropertyType::from_representation(&Representation::of::<&str>()), None);
        assert_eq!(
            PropertyType::from_representation(&Representation::of::<Vec<String>>()),
            None
        );
    }

    #[test]
    fn test_representation_is_unambiguous() {
        for ty in PropertyType::ALL {
            let matches = PropertyType::ALL
                .iter()
                .filter(|other| other.representation() == ty.representation())
                .count();
            assert_eq!(matches, 1, "{} maps to more than one variant", ty);
            assert_eq!(PropertyType::from_representation(&ty.representation()), Some(ty));
        }
    }

    #[test]
    fn test_value_representation_matches_type() {
        assert_eq!(PropertyValue::from(1.5f32).property_type(), PropertyType::Float);
        assert_eq!(
            PropertyValue::from("foo").representation(),
            PropertyType::String.representation()
        );
        assert_ne!(
            PropertyValue::from(10i32).representation(),
            PropertyType::Long.representation()
        );
    }

    #[test]
    fn test_value_display_is_textual_form() {
        assert_eq!(PropertyValue::from(true).to_string(), "true");
        assert_eq!(PropertyValue::from('x').to_string(), "x");
        assert_eq!(PropertyValue::from(1_000_000i32).to_string(), "1000000");
        assert_eq!(PropertyValue::from(256.256f64).to_string(), "256.256");
        assert_eq!(PropertyValue::from("foo bar").to_string(), "foo bar");
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(PropertyValue::from(100i8).as_i64(), Some(100));
        assert_eq!(PropertyValue::from(300.0f64).as_f64(), Some(300.0));
        assert_eq!(PropertyValue::from(7i16).as_f64(), Some(7.0));
        assert_eq!(PropertyValue::from("7").as_f64(), None);
    }

    #[test]
    fn test_from_property_value_exact_only() {
        assert_eq!(i32::from_property_value(&PropertyValue::Integer(5)), Some(5));
        assert_eq!(i64::from_property_value(&PropertyValue::Integer(5)), None);
        assert_eq!(
            String::from_property_value(&PropertyValue::from("abc")),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_property_type_serde_name() {
        let json = serde_json::to_string(&PropertyType::Double).unwrap();
        assert_eq!(json, "\"double\"");
        let back: PropertyType = serde_json::from_str("\"char\"").unwrap();
        assert_eq!(back, PropertyType::Char);
    }
}
