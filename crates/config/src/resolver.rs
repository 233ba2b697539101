//! Metadata resolution
//!
//! Turns a [`ContractShape`] into [`Metadata`]: which accessors are
//! properties, the words of each property name, its type and validator, and
//! the translator used to build lookup keys.

use std::collections::HashSet;

use propbind_core::{
    ContractShape, Error, ExtractorRef, GetterNameExtractor, HyphenatedNameTranslator, Metadata,
    PropertyDescriptor, PropertyType, Result, TranslatorRef,
};

use crate::cache;

/// Resolves contract metadata
///
/// Strategy overrides are read from the contract passed in only; overrides
/// declared on parent contracts do not apply.
#[derive(Debug, Clone, Copy)]
pub struct MetadataResolver {
    default_extractor: ExtractorRef,
    default_translator: TranslatorRef,
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self {
            default_extractor: ExtractorRef::of::<GetterNameExtractor>(),
            default_translator: TranslatorRef::of::<HyphenatedNameTranslator>(),
        }
    }
}

impl MetadataResolver {
    /// Resolver with [`GetterNameExtractor`] and [`HyphenatedNameTranslator`] defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different defaults for contracts that declare no override
    pub fn with_defaults(extractor: ExtractorRef, translator: TranslatorRef) -> Self {
        Self {
            default_extractor: extractor,
            default_translator: translator,
        }
    }

    pub fn default_extractor(&self) -> ExtractorRef {
        self.default_extractor
    }

    pub fn default_translator(&self) -> TranslatorRef {
        self.default_translator
    }

    /// Resolve metadata for `shape`
    ///
    /// Ineligible accessors are skipped. Fails with [`Error::ContractShape`]
    /// if the shape itself is invalid, or if the extractor accepts an accessor
    /// whose return type is not a property type.
    pub fn resolve(&self, shape: &ContractShape) -> Result<Metadata> {
        shape.validate()?;

        let strategies = shape.strategies();
        let extractor_ref = strategies.extractor.unwrap_or(self.default_extractor);
        let translator_ref = strategies.translator.unwrap_or(self.default_translator);
        let extractor = cache::extractors().get_or_create(&extractor_ref);

        let mut properties = HashSet::new();

        for accessor in shape.all_accessors() {
            if !extractor.is_eligible(accessor) {
                tracing::trace!(
                    contract = shape.name(),
                    accessor = accessor.name(),
                    "Skipping ineligible accessor"
                );
                continue;
            }

            let property_type = PropertyType::from_representation(&accessor.return_type())
                .ok_or_else(|| {
                    Error::contract_shape(
                        shape.name(),
                        format!(
                            "accessor '{}' returns {}, which is not a property type",
                            accessor.name(),
                            accessor.return_type()
                        ),
                    )
                })?;

            let validator = shape
                .validator_override(accessor.name())
                .unwrap_or_else(|| property_type.default_validator());

            let descriptor = PropertyDescriptor::new(
                accessor.name(),
                extractor.split_name(accessor.name()),
                property_type,
                validator,
            )
            .map_err(|e| Error::contract_shape(shape.name(), e.to_string()))?;

            properties.insert(descriptor);
        }

        tracing::debug!(
            contract = shape.name(),
            extractor = extractor_ref.short_name(),
            translator = translator_ref.short_name(),
            properties = properties.len(),
            "Resolved contract metadata"
        );

        Ok(Metadata::new(translator_ref, properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propbind_core::{
        Accessor, AcceptAllValidator, CamelCaseNameExtractor, DottedNameTranslator,
        NameTranslator, PropertyValidator, PropertyValue, Representation, ValidatorRef, Word,
    };

    fn words(values: &[&str]) -> Vec<Word> {
        values.iter().map(|v| Word::new(*v)).collect()
    }

    fn property(accessor: &str, name: &[&str], ty: PropertyType) -> PropertyDescriptor {
        PropertyDescriptor::with_default_validator(accessor, words(name), ty).unwrap()
    }

    fn basic_config() -> ContractShape {
        ContractShape::interface("BasicConfig")
            .getter::<f32>("getMyFloat")
            .getter::<f64>("getMyDouble")
            .getter::<i8>("getMyByte")
            .getter::<i16>("getMyShort")
            .getter::<i32>("getMyInteger")
            .getter::<i64>("getMyLong")
            .getter::<char>("getMyChar")
            .getter::<String>("getMyString")
            .getter::<bool>("getMyBoolean")
            .getter::<String>("get")
            .getter::<bool>("nonConventionalName")
    }

    #[derive(Default)]
    struct MyCoolDoubleValidator;

    impl PropertyValidator for MyCoolDoubleValidator {
        fn is_valid(&self, _value: &PropertyValue) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct BlankTranslator;

    impl NameTranslator for BlankTranslator {
        fn translate(&self, _words: &[Word]) -> String {
            String::new()
        }
    }

    #[test]
    fn test_resolve_basic() {
        let metadata = MetadataResolver::new().resolve(&basic_config()).unwrap();

        let expected: HashSet<_> = [
            property("getMyBoolean", &["my", "boolean"], PropertyType::Boolean),
            property("getMyByte", &["my", "byte"], PropertyType::Byte),
            property("getMyShort", &["my", "short"], PropertyType::Short),
            property("getMyInteger", &["my", "integer"], PropertyType::Integer),
            property("getMyLong", &["my", "long"], PropertyType::Long),
            property("getMyFloat", &["my", "float"], PropertyType::Float),
            property("getMyDouble", &["my", "double"], PropertyType::Double),
            property("getMyChar", &["my", "char"], PropertyType::Char),
            property("getMyString", &["my", "string"], PropertyType::String),
        ]
        .into_iter()
        .collect();

        assert_eq!(metadata.properties(), &expected);
        assert_eq!(
            metadata.translator(),
            TranslatorRef::of::<HyphenatedNameTranslator>()
        );
    }

    #[test]
    fn test_resolve_with_inheritance() {
        let base = ContractShape::interface("BaseConfig").getter::<char>("getSomeChar");
        let sub = ContractShape::interface("SubConfig")
            .getter::<f32>("getMySubFloat")
            .getter::<bool>("getAnotherBoolean")
            .extends(base);

        let metadata = MetadataResolver::new().resolve(&sub).unwrap();

        let expected: HashSet<_> = [
            property("getSomeChar", &["some", "char"], PropertyType::Char),
            property("getMySubFloat", &["my", "sub", "float"], PropertyType::Float),
            property("getAnotherBoolean", &["another", "boolean"], PropertyType::Boolean),
        ]
        .into_iter()
        .collect();

        assert_eq!(metadata.properties(), &expected);
    }

    #[test]
    fn test_resolve_with_validator_override() {
        let shape = ContractShape::interface("BasicAnnotatedConfig")
            .getter::<f64>("getCoolDouble")
            .getter::<i16>("getNormalShort")
            .validate_with("getCoolDouble", ValidatorRef::of::<MyCoolDoubleValidator>());

        let metadata = MetadataResolver::new().resolve(&shape).unwrap();

        let expected: HashSet<_> = [
            PropertyDescriptor::new(
                "getCoolDouble",
                words(&["cool", "double"]),
                PropertyType::Double,
                ValidatorRef::of::<MyCoolDoubleValidator>(),
            )
            .unwrap(),
            property("getNormalShort", &["normal", "short"], PropertyType::Short),
        ]
        .into_iter()
        .collect();

        assert_eq!(metadata.properties(), &expected);
    }

    #[test]
    fn test_resolve_blank_config() {
        let metadata = MetadataResolver::new()
            .resolve(&ContractShape::interface("BlankConfig"))
            .unwrap();

        assert_eq!(
            metadata.translator(),
            TranslatorRef::of::<HyphenatedNameTranslator>()
        );
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_resolve_custom_translator() {
        let shape = ContractShape::interface("CustomTranslatorConfig")
            .with_translator(TranslatorRef::of::<BlankTranslator>());

        let metadata = MetadataResolver::new().resolve(&shape).unwrap();

        assert_eq!(metadata.translator(), TranslatorRef::of::<BlankTranslator>());
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_parent_strategy_override_ignored() {
        let base = ContractShape::interface("DottedBase")
            .getter::<String>("getVendorName")
            .with_translator(TranslatorRef::of::<DottedNameTranslator>());
        let sub = ContractShape::interface("Sub").extends(base);

        let metadata = MetadataResolver::new().resolve(&sub).unwrap();

        assert_eq!(
            metadata.translator(),
            TranslatorRef::of::<HyphenatedNameTranslator>()
        );
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_resolver_defaults_configurable() {
        let resolver = MetadataResolver::with_defaults(
            ExtractorRef::of::<CamelCaseNameExtractor>(),
            TranslatorRef::of::<DottedNameTranslator>(),
        );
        let shape = ContractShape::interface("Engine").getter::<f64>("engineThreshold");

        let metadata = resolver.resolve(&shape).unwrap();

        assert_eq!(metadata.translator(), TranslatorRef::of::<DottedNameTranslator>());
        assert_eq!(
            metadata.descriptor("engineThreshold").map(|d| d.words().to_vec()),
            Some(words(&["engine", "threshold"]))
        );
    }

    #[test]
    fn test_permissive_extractor_with_unsupported_type() {
        let shape = ContractShape::interface("Hosts")
            .accessor(Accessor::new("hosts", 0, Representation::of::<Vec<String>>()))
            .with_extractor(ExtractorRef::of::<CamelCaseNameExtractor>());

        assert!(matches!(
            MetadataResolver::new().resolve(&shape),
            Err(Error::ContractShape { .. })
        ));
    }

    #[test]
    fn test_concrete_shape_rejected() {
        let shape = ContractShape::concrete("Settings").getter::<i32>("getPort");
        assert!(matches!(
            MetadataResolver::new().resolve(&shape),
            Err(Error::ContractShape { .. })
        ));
    }

    #[test]
    fn test_default_validator_is_accept_all() {
        let shape = ContractShape::interface("Port").getter::<i32>("getPort");
        let metadata = MetadataResolver::new().resolve(&shape).unwrap();

        assert_eq!(
            metadata.descriptor("getPort").map(|d| d.validator()),
            Some(ValidatorRef::of::<AcceptAllValidator>())
        );
    }
}
