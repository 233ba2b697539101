//! Access contract shapes
//!
//! A [`ContractShape`] is the plain-data description of a caller's typed
//! configuration interface: its zero-argument accessors, the contracts it
//! extends, and any strategy overrides. Overrides are data on the shape, so
//! resolution never needs to inspect attributes or annotations.
//!
//! # Example
//!
//! ```
//! use propbind_core::{ContractShape, DottedNameTranslator, TranslatorRef};
//!
//! let base = ContractShape::interface("BaseConfig").getter::<char>("getSomeChar");
//! let shape = ContractShape::interface("SubConfig")
//!     .getter::<f32>("getMySubFloat")
//!     .getter::<bool>("getAnotherBoolean")
//!     .extends(base)
//!     .with_translator(TranslatorRef::of::<DottedNameTranslator>());
//!
//! assert_eq!(shape.all_accessors().len(), 3);
//! assert!(shape.validate().is_ok());
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::strategy::{ExtractorRef, TranslatorRef, ValidatorRef};
use crate::types::Representation;

/// One named read operation of a contract
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    name: String,
    parameter_count: usize,
    return_type: Representation,
}

impl Accessor {
    pub fn new(name: impl Into<String>, parameter_count: usize, return_type: Representation) -> Self {
        Self {
            name: name.into(),
            parameter_count,
            return_type,
        }
    }

    /// Zero-argument accessor returning `T`
    pub fn getter<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new(name, 0, Representation::of::<T>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Declared return type
    pub fn return_type(&self) -> Representation {
        self.return_type
    }
}

/// What kind of declaration a shape describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContractKind {
    /// Pure accessor declaration; the only bindable kind
    #[default]
    Interface,
    /// A concrete type with its own state
    Concrete,
}

/// Extractor and translator declared on a contract
///
/// Either half may be set on its own; the unset half falls back to the
/// default strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyOverride {
    pub extractor: Option<ExtractorRef>,
    pub translator: Option<TranslatorRef>,
}

impl StrategyOverride {
    pub fn is_empty(&self) -> bool {
        self.extractor.is_none() && self.translator.is_none()
    }
}

/// Declared shape of an access contract
#[derive(Debug, Clone, Default)]
pub struct ContractShape {
    name: String,
    kind: ContractKind,
    accessors: Vec<Accessor>,
    parents: Vec<ContractShape>,
    strategies: StrategyOverride,
    validators: HashMap<String, ValidatorRef>,
}

impl ContractShape {
    /// New interface-like contract
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ContractKind::Interface,
            ..Default::default()
        }
    }

    /// New concrete shape; rejected by [`Self::validate`]
    pub fn concrete(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ContractKind::Concrete,
            ..Default::default()
        }
    }

    /// Add an accessor
    pub fn accessor(mut self, accessor: Accessor) -> Self {
        self.accessors.push(accessor);
        self
    }

    /// Add a zero-argument accessor returning `T`
    pub fn getter<T: ?Sized + 'static>(self, name: impl Into<String>) -> Self {
        self.accessor(Accessor::getter::<T>(name))
    }

    /// Inherit every accessor of `parent`
    pub fn extends(mut self, parent: ContractShape) -> Self {
        self.parents.push(parent);
        self
    }

    /// Use a non-default extraction strategy
    pub fn with_extractor(mut self, extractor: ExtractorRef) -> Self {
        self.strategies.extractor = Some(extractor);
        self
    }

    /// Use a non-default translation strategy
    pub fn with_translator(mut self, translator: TranslatorRef) -> Self {
        self.strategies.translator = Some(translator);
        self
    }

    /// Validate the property behind `accessor_name` with `validator`
    pub fn validate_with(mut self, accessor_name: impl Into<String>, validator: ValidatorRef) -> Self {
        self.validators.insert(accessor_name.into(), validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Accessors declared directly on this contract
    pub fn declared_accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    pub fn parents(&self) -> &[ContractShape] {
        &self.parents
    }

    /// Strategy override declared on this contract itself
    ///
    /// Overrides on parent contracts are not consulted.
    pub fn strategies(&self) -> &StrategyOverride {
        &self.strategies
    }

    /// Validator override for an accessor, searching this contract then its parents
    pub fn validator_override(&self, accessor_name: &str) -> Option<ValidatorRef> {
        self.validators.get(accessor_name).copied().or_else(|| {
            self.parents
                .iter()
                .find_map(|p| p.validator_override(accessor_name))
        })
    }

    fn collect_accessors<'a>(&'a self, out: &mut Vec<&'a Accessor>) {
        out.extend(self.accessors.iter());
        for parent in &self.parents {
            parent.collect_accessors(out);
        }
    }

    fn collect_override_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(self.validators.keys().map(String::as_str));
        for parent in &self.parents {
            parent.collect_override_names(out);
        }
    }

    /// Every accessor reachable from this contract, inheritance flattened
    ///
    /// Own accessors come first, then each parent's, depth-first. An accessor
    /// reached through more than one path is listed once.
    pub fn all_accessors(&self) -> Vec<&Accessor> {
        let mut all = Vec::new();
        self.collect_accessors(&mut all);

        let mut seen = HashSet::new();
        all.retain(|accessor| seen.insert(*accessor));
        all
    }

    /// Check that this is a bindable accessor shape
    pub fn validate(&self) -> Result<()> {
        self.validate_kind()?;

        let mut signatures: HashMap<&str, &Accessor> = HashMap::new();
        for accessor in self.all_accessors() {
            if accessor.name().is_empty() {
                return Err(Error::contract_shape(
                    &self.name,
                    "accessor names can't be empty",
                ));
            }

            if let Some(existing) = signatures.insert(accessor.name(), accessor) {
                return Err(Error::contract_shape(
                    &self.name,
                    format!(
                        "accessor '{}' is declared with conflicting signatures ({} vs {})",
                        accessor.name(),
                        existing.return_type(),
                        accessor.return_type()
                    ),
                ));
            }
        }

        let mut overrides = Vec::new();
        self.collect_override_names(&mut overrides);
        for name in overrides {
            if !signatures.contains_key(name) {
                return Err(Error::contract_shape(
                    &self.name,
                    format!("validator declared for unknown accessor '{}'", name),
                ));
            }
        }

        Ok(())
    }

    fn validate_kind(&self) -> Result<()> {
        if self.kind != ContractKind::Interface {
            return Err(Error::contract_shape(
                &self.name,
                "contract must be an interface-like accessor shape",
            ));
        }
        self.parents.iter().try_for_each(ContractShape::validate_kind)
    }
}
