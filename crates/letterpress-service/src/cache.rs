/*
 * cache.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Compiled-template cache.
//!
//! Maps a template identity to its compiled AST with at-most-one successful
//! compilation per key under concurrent first access. The cache holds no
//! reference to storage: callers must invalidate a key on every content
//! update, delete, or identity rename (old and new key).
//!
//! Structure: a mutex-protected map of key to per-key slot. The map lock is
//! held only to fetch or insert a slot, never across a compile; the slot
//! mutex serializes the first compilation so racers on the same key block
//! until the winner has stored the result. A failed compile is not cached:
//! the failing slot is discarded from the map so any later caller retries
//! against current content.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use letterpress_template::{Template, TemplateResult};
use tracing::debug;

/// Composite identity of a cached compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    template_id: String,
    language: String,
}

impl CacheKey {
    pub fn new(template_id: impl Into<String>, language: impl Into<String>) -> Self {
        CacheKey {
            template_id: template_id.into(),
            language: language.into(),
        }
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.template_id, self.language)
    }
}

type Slot = Arc<Mutex<Option<Arc<Template>>>>;

/// Concurrency-safe cache of compiled templates.
#[derive(Debug, Default)]
pub struct TemplateCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl TemplateCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached compiled template for `key`, compiling `content` on
    /// a miss.
    ///
    /// Under a race on an absent key exactly one caller parses; the others
    /// observe the same resulting template. Compile failures are returned to
    /// every waiting caller and never cached.
    pub fn get_or_compile(&self, key: &CacheKey, content: &str) -> TemplateResult<Arc<Template>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(key.clone()).or_default().clone()
        };

        let mut compiled = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(template) = compiled.as_ref() {
            return Ok(Arc::clone(template));
        }

        debug!(key = %key, "compiling template");
        match Template::compile(content) {
            Ok(template) => {
                let template = Arc::new(template);
                *compiled = Some(Arc::clone(&template));
                Ok(template)
            }
            Err(err) => {
                // Drop the failing slot, unless an invalidation already
                // replaced it, so later callers compile fresh content.
                let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
                if let Some(current) = slots.get(key) {
                    if Arc::ptr_eq(current, &slot) {
                        slots.remove(key);
                    }
                }
                Err(err)
            }
        }
    }

    /// Remove any cached entry for `key`. Subsequent `get_or_compile` calls
    /// recompile from the content they are given.
    pub fn invalidate(&self, key: &CacheKey) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.remove(key).is_some() {
            debug!(key = %key, "invalidated cached template");
        }
    }

    /// Empty the cache entirely.
    pub fn clear(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.clear();
    }

    /// Number of keys currently tracked (compiled or compiling).
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
