//! Process-wide strategy instance caches
//!
//! Strategies are stateless, so one instance per implementation type is shared
//! by every binding. Instances are created on first use; concurrent callers
//! racing on the same handle still end up with a single instance.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use propbind_core::{
    NameExtractor, NameTranslator, PropertyConverter, PropertyValidator, StrategyRef,
};

/// Cache of strategy instances keyed by implementation identity
pub struct StrategyCache<S: ?Sized> {
    instances: RwLock<HashMap<TypeId, Arc<S>>>,
}

impl<S: ?Sized> StrategyCache<S> {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Shared instance for `strategy`, constructing it on first use
    pub fn get_or_create(&self, strategy: &StrategyRef<S>) -> Arc<S> {
        if let Some(instance) = self.instances.read().get(&strategy.id()) {
            return Arc::clone(instance);
        }

        let mut instances = self.instances.write();
        let instance = instances.entry(strategy.id()).or_insert_with(|| {
            tracing::debug!(strategy = strategy.name(), "Instantiating strategy");
            strategy.instantiate()
        });
        Arc::clone(instance)
    }

    pub fn contains(&self, strategy: &StrategyRef<S>) -> bool {
        self.instances.read().contains_key(&strategy.id())
    }

    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }

    /// Drop every cached instance
    pub fn clear(&self) {
        self.instances.write().clear();
    }
}

impl<S: ?Sized> Default for StrategyCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

static CONVERTERS: Lazy<StrategyCache<dyn PropertyConverter>> = Lazy::new(StrategyCache::new);
static VALIDATORS: Lazy<StrategyCache<dyn PropertyValidator>> = Lazy::new(StrategyCache::new);
static EXTRACTORS: Lazy<StrategyCache<dyn NameExtractor>> = Lazy::new(StrategyCache::new);
static TRANSLATORS: Lazy<StrategyCache<dyn NameTranslator>> = Lazy::new(StrategyCache::new);

/// Global converter cache
pub fn converters() -> &'static StrategyCache<dyn PropertyConverter> {
    &CONVERTERS
}

/// Global validator cache
pub fn validators() -> &'static StrategyCache<dyn PropertyValidator> {
    &VALIDATORS
}

/// Global extractor cache
pub fn extractors() -> &'static StrategyCache<dyn NameExtractor> {
    &EXTRACTORS
}

/// Global translator cache
pub fn translators() -> &'static StrategyCache<dyn NameTranslator> {
    &TRANSLATORS
}
