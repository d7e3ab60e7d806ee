//! Adapter lookup by event category.

use std::collections::HashMap;
use std::sync::Arc;

use rsvpbot_config::TimingConfig;
use rsvpbot_protocols::Category;
use thiserror::Error;

use super::{EventbriteAdapter, SiteAdapter, SplashthatAdapter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("An adapter for {0} events is already registered")]
    AlreadyRegistered(Category),
}

/// Registry of site adapters, at most one per category.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<Category, Arc<dyn SiteAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in site family.
    pub fn with_defaults(timing: &TimingConfig) -> Self {
        let mut registry = Self::new();
        registry.adapters.insert(
            Category::Eventbrite,
            Arc::new(EventbriteAdapter::new(timing)),
        );
        registry.adapters.insert(
            Category::Splashthat,
            Arc::new(SplashthatAdapter::new(timing)),
        );
        registry
    }

    /// Register an adapter for the category it serves.
    pub fn register(&mut self, adapter: Arc<dyn SiteAdapter>) -> Result<(), RegistryError> {
        let category = adapter.category();
        if self.adapters.contains_key(&category) {
            return Err(RegistryError::AlreadyRegistered(category));
        }
        self.adapters.insert(category, adapter);
        Ok(())
    }

    pub fn get(&self, category: Category) -> Option<Arc<dyn SiteAdapter>> {
        self.adapters.get(&category).cloned()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.adapters.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
