/*
 * store.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template storage seams.
//!
//! [`TemplateStore`] is the lookup-only surface the rendering pipeline and
//! the parameter resolver consume. [`TemplateRepository`] adds the mutations
//! the service layer drives. Persistence, durability and pagination belong to
//! implementations, not to the engine.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::definition::TemplateDefinition;

/// Read-only template lookup.
///
/// Implementations must filter soft-deleted definitions.
pub trait TemplateStore: Send + Sync {
    /// Look up a non-deleted definition by identity.
    fn lookup(&self, template_id: &str, language: &str) -> Option<TemplateDefinition>;
}

/// Mutable template storage driven by the service layer.
pub trait TemplateRepository: TemplateStore {
    /// Insert or replace a definition under its `(template_id, language)`
    /// identity.
    fn save(&self, definition: TemplateDefinition);

    /// Remove a definition outright (identity changes). Returns whether an
    /// entry existed.
    fn remove(&self, template_id: &str, language: &str) -> bool;

    /// All definitions, soft-deleted included.
    fn list(&self) -> Vec<TemplateDefinition>;
}

/// In-memory store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<(String, String), TemplateDefinition>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for MemoryStore {
    fn lookup(&self, template_id: &str, language: &str) -> Option<TemplateDefinition> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .get(&(template_id.to_string(), language.to_string()))
            .filter(|definition| !definition.is_deleted)
            .cloned()
    }
}

impl TemplateRepository for MemoryStore {
    fn save(&self, definition: TemplateDefinition) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.insert(
            (definition.template_id.clone(), definition.language.clone()),
            definition,
        );
    }

    fn remove(&self, template_id: &str, language: &str) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .remove(&(template_id.to_string(), language.to_string()))
            .is_some()
    }

    fn list(&self) -> Vec<TemplateDefinition> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.values().cloned().collect()
    }
}
