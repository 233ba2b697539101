//! Typed binding of flat property sources
//!
//! Binds a string-keyed property source to a typed access contract:
//! - Property sources built in memory or loaded from
//!   `.properties`/JSON/YAML/TOML files
//! - Metadata resolution (eligible accessors, property names, types, validators)
//! - Process-wide converter, validator, extractor and translator caches
//! - Binding into read-only views and typed [`Contract`] wrappers
//!
//! ```
//! use propbind_config::{contract, from_properties, PropertySource};
//!
//! contract! {
//!     pub struct EngineConfig: EngineProperties {
//!         fn getEngineThreshold() -> f64;
//!         fn getVendorName() -> String;
//!     }
//! }
//!
//! let source = PropertySource::from_properties_str(
//!     "engine-threshold = 300.0\nvendor-name = FooBar",
//! )
//! .unwrap();
//!
//! let config: EngineConfig = from_properties(&source).unwrap();
//! assert_eq!(config.getEngineThreshold(), 300.0);
//! assert_eq!(config.getVendorName(), "FooBar");
//! ```

pub mod binder;
pub mod cache;
pub mod contract;
pub mod resolver;
pub mod source;
pub mod view;

pub use binder::{bind_shape, from_properties, Binder};
pub use cache::{converters, extractors, translators, validators, StrategyCache};
pub use contract::{Contract, Extends};
pub use resolver::MetadataResolver;
pub use source::PropertySource;
pub use view::BoundView;

// Core re-exports, also used by `contract!`
pub use propbind_core::{
    Accessor, AcceptAllValidator, CamelCaseNameExtractor, ContractKind, ContractShape,
    ConverterRef, DottedNameTranslator, EnvironmentNameTranslator, Error, ExtractorRef,
    FromPropertyValue, GetterNameExtractor, HyphenatedNameTranslator, Metadata, NameExtractor,
    NameTranslator, PropertyConverter, PropertyDescriptor, PropertyType, PropertyValidator,
    PropertyValue, Representation, Result, SnakeCaseNameExtractor, StrategyRef, TranslatorRef,
    UnderscoredNameTranslator, ValidatorRef, Word,
};
