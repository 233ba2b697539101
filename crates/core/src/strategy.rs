//! Strategy handles
//!
//! A [`StrategyRef`] names a strategy implementation by its concrete type and
//! knows how to construct it. Contracts and descriptors carry handles rather
//! than instances, so equality of descriptors is equality of strategy identity,
//! and instances can be shared through a process-wide cache.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::traits::{NameExtractor, NameTranslator, PropertyConverter, PropertyValidator};

/// Handle to a strategy implementation of trait object type `S`
pub struct StrategyRef<S: ?Sized> {
    id: TypeId,
    name: &'static str,
    create: fn() -> Arc<S>,
}

/// Handle to a value converter
pub type ConverterRef = StrategyRef<dyn PropertyConverter>;
/// Handle to a value validator
pub type ValidatorRef = StrategyRef<dyn PropertyValidator>;
/// Handle to a name extraction strategy
pub type ExtractorRef = StrategyRef<dyn NameExtractor>;
/// Handle to a name translation strategy
pub type TranslatorRef = StrategyRef<dyn NameTranslator>;

impl<S: ?Sized> StrategyRef<S> {
    /// Identity of the implementing type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Implementing type name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Short type name without the module path
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// Construct a fresh instance
    pub fn instantiate(&self) -> Arc<S> {
        (self.create)()
    }
}

macro_rules! strategy_ref_ctor {
    ($trait_:ident, $ctor:ident) => {
        fn $ctor<T: $trait_ + Default + 'static>() -> Arc<dyn $trait_> {
            Arc::new(T::default())
        }

        impl StrategyRef<dyn $trait_> {
            /// Handle for implementation `T`
            pub fn of<T: $trait_ + Default + 'static>() -> Self {
                Self {
                    id: TypeId::of::<T>(),
                    name: std::any::type_name::<T>(),
                    create: $ctor::<T>,
                }
            }
        }
    };
}

strategy_ref_ctor!(PropertyConverter, create_converter);
strategy_ref_ctor!(PropertyValidator, create_validator);
strategy_ref_ctor!(NameExtractor, create_extractor);
strategy_ref_ctor!(NameTranslator, create_translator);

impl<S: ?Sized> Clone for StrategyRef<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for StrategyRef<S> {}

impl<S: ?Sized> PartialEq for StrategyRef<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S: ?Sized> Eq for StrategyRef<S> {}

impl<S: ?Sized> Hash for StrategyRef<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<S: ?Sized> fmt::Debug for StrategyRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrategyRef({})", self.name)
    }
}

impl<S: ?Sized> fmt::Display for StrategyRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
