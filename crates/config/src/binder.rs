//! Binding property sources to contracts
//!
//! For every resolved property the binder builds the lookup key, fetches the
//! raw value, converts it when it is not already of the native type,
//! validates it, and records it under the accessor name. The first failing
//! property aborts the whole call; partial views are never returned.

use std::collections::HashMap;

use propbind_core::{
    ContractShape, Error, NameTranslator, PropertyDescriptor, PropertyValue, Result,
};

use crate::cache;
use crate::contract::Contract;
use crate::resolver::MetadataResolver;
use crate::source::PropertySource;
use crate::view::BoundView;

/// Binds sources to contracts
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder {
    resolver: MetadataResolver,
}

impl Binder {
    /// Binder with the default resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Binder using a custom resolver
    pub fn with_resolver(resolver: MetadataResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// Bind `source` to a typed contract
    pub fn bind<C: Contract>(&self, source: &PropertySource) -> Result<C> {
        let shape = C::shape();
        self.bind_shape(source, &shape).map(C::from_view)
    }

    /// Bind `source` to a contract shape
    pub fn bind_shape(&self, source: &PropertySource, shape: &ContractShape) -> Result<BoundView> {
        self.try_bind_shape(source, shape).map_err(|e| {
            tracing::debug!(contract = shape.name(), error = %e, "Binding failed");
            e
        })
    }

    fn try_bind_shape(&self, source: &PropertySource, shape: &ContractShape) -> Result<BoundView> {
        let metadata = self.resolver.resolve(shape)?;
        let translator = cache::translators().get_or_create(&metadata.translator());

        // fixed order so the reported error does not depend on hashing
        let mut properties: Vec<&PropertyDescriptor> = metadata.properties().iter().collect();
        properties.sort_by(|a, b| a.accessor_name().cmp(b.accessor_name()));

        let mut values = HashMap::with_capacity(properties.len());
        for descriptor in properties {
            let value = bind_property(source, translator.as_ref(), descriptor)?;
            values.insert(descriptor.accessor_name().to_string(), value);
        }

        tracing::debug!(
            contract = shape.name(),
            properties = values.len(),
            "Bound contract"
        );

        Ok(BoundView::new(shape.name(), values))
    }
}

fn bind_property(
    source: &PropertySource,
    translator: &dyn NameTranslator,
    descriptor: &PropertyDescriptor,
) -> Result<PropertyValue> {
    let key = translator.translate(descriptor.words());
    let raw = source
        .get(&key)
        .ok_or_else(|| Error::MissingProperty { key: key.clone() })?;

    let property_type = descriptor.property_type();

    // native values are used as-is
    let value = if raw.representation() == property_type.representation() {
        raw.clone()
    } else {
        let converter = cache::converters().get_or_create(&descriptor.converter());
        let text = raw.to_string();

        tracing::trace!(key = %key, from = %raw.property_type(), to = %property_type, "Converting property");

        converter
            .convert_from_text(&text)
            .map_err(|e| Error::ConversionFailure {
                key: key.clone(),
                expected: property_type,
                value: text,
                reason: e.reason,
            })?
    };

    let validator = cache::validators().get_or_create(&descriptor.validator());
    if !validator.is_valid(&value) {
        return Err(Error::InvalidProperty {
            key,
            value: value.to_string(),
        });
    }

    Ok(value)
}

/// Bind `source` to a contract shape with the default binder
pub fn bind_shape(source: &PropertySource, shape: &ContractShape) -> Result<BoundView> {
    Binder::new().bind_shape(source, shape)
}

/// Bind `source` to a typed contract with the default binder
pub fn from_properties<C: Contract>(source: &PropertySource) -> Result<C> {
    Binder::new().bind(source)
}
