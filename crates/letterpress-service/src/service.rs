/*
 * service.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! The template service façade.
//!
//! Owns the repository seam, the compiled-template cache and the service
//! configuration, and wires them into the management operations
//! (create/get/update/delete/rename) and the render pipeline:
//! lookup, `template_*` parameter resolution, required-parameter validation,
//! cached compilation, evaluation.
//!
//! Cache invalidation is this layer's responsibility: every content update,
//! delete and identity rename invalidates the affected key(s) before the
//! next render can observe stale output.

use std::sync::Arc;

use chrono::Utc;
use letterpress_template::{extract_default_schema, ParamSchema, Template};
use tracing::{info, warn};

use crate::cache::{CacheKey, TemplateCache};
use crate::config::ServiceConfig;
use crate::definition::{
    CreateTemplateRequest, TemplateDefinition, TemplateMetadata, UpdateTemplateRequest,
};
use crate::error::{ServiceError, ServiceResult};
use crate::resolver::resolve_params;
use crate::store::{TemplateRepository, TemplateStore};
use crate::validator::check_required_params;

/// Stores, compiles, caches and renders templates.
pub struct TemplateService {
    store: Arc<dyn TemplateRepository>,
    cache: TemplateCache,
    config: ServiceConfig,
}

impl TemplateService {
    /// Create a service over the given repository.
    pub fn new(store: Arc<dyn TemplateRepository>, config: ServiceConfig) -> Self {
        TemplateService {
            store,
            cache: TemplateCache::new(),
            config,
        }
    }

    /// Create a service with the default configuration.
    pub fn with_defaults(store: Arc<dyn TemplateRepository>) -> Self {
        Self::new(store, ServiceConfig::default())
    }

    fn effective_language<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        language.unwrap_or(&self.config.default_language)
    }

    fn lookup(&self, template_id: &str, language: &str) -> ServiceResult<TemplateDefinition> {
        self.store
            .lookup(template_id, language)
            .ok_or_else(|| ServiceError::TemplateNotFound {
                template_id: template_id.to_string(),
                language: language.to_string(),
            })
    }

    /// Compile-check template content without storing anything.
    pub fn validate_syntax(&self, content: &str) -> ServiceResult<()> {
        Template::compile(content)
            .map(|_| ())
            .map_err(|source| ServiceError::InvalidSyntax { source })
    }

    /// Infer a default parameter schema from raw template content.
    pub fn extract_default_schema(&self, content: &str) -> ParamSchema {
        extract_default_schema(content)
    }

    /// Create a new template definition.
    ///
    /// The content must compile; when no schema is supplied, one is inferred
    /// from the content.
    pub fn create_template(
        &self,
        request: CreateTemplateRequest,
    ) -> ServiceResult<TemplateDefinition> {
        let language = request
            .language
            .unwrap_or_else(|| self.config.default_language.clone());

        if self.store.lookup(&request.template_id, &language).is_some() {
            return Err(ServiceError::TemplateExists {
                template_id: request.template_id,
                language,
            });
        }

        self.validate_syntax(&request.content)?;

        let param_schema = match request.param_schema {
            Some(schema) if !schema.is_empty() => schema,
            _ => extract_default_schema(&request.content),
        };

        let now = Utc::now();
        let definition = TemplateDefinition {
            template_id: request.template_id,
            language,
            name: request.name,
            description: request.description,
            category: request.category,
            content: request.content,
            param_schema,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            created_by: request.created_by.clone(),
            updated_by: request.created_by,
        };
        self.store.save(definition.clone());

        info!(
            template_id = %definition.template_id,
            language = %definition.language,
            "created template"
        );
        Ok(definition)
    }

    /// Fetch a definition, falling back to the default language.
    pub fn get_template(
        &self,
        template_id: &str,
        language: Option<&str>,
    ) -> ServiceResult<TemplateDefinition> {
        let language = self.effective_language(language);
        self.lookup(template_id, language)
    }

    /// Fetch definition metadata without the content body.
    pub fn get_metadata(
        &self,
        template_id: &str,
        language: Option<&str>,
    ) -> ServiceResult<TemplateMetadata> {
        let language = self.effective_language(language);
        let definition = self.lookup(template_id, language)?;
        Ok(TemplateMetadata::from(&definition))
    }

    /// All non-deleted definitions.
    pub fn list_templates(&self) -> Vec<TemplateDefinition> {
        self.store
            .list()
            .into_iter()
            .filter(|definition| !definition.is_deleted)
            .collect()
    }

    /// Apply a partial update. A content change revalidates syntax,
    /// re-infers the schema when none is supplied, and invalidates the
    /// cached compilation.
    pub fn update_template(
        &self,
        template_id: &str,
        language: Option<&str>,
        request: UpdateTemplateRequest,
    ) -> ServiceResult<TemplateDefinition> {
        let language = self.effective_language(language);
        let mut definition = self.lookup(template_id, language)?;

        let mut content_changed = false;

        if let Some(name) = request.name {
            definition.name = name;
        }
        if let Some(description) = request.description {
            definition.description = Some(description);
        }
        if let Some(category) = request.category {
            definition.category = Some(category);
        }
        if let Some(content) = request.content {
            self.validate_syntax(&content)?;
            definition.content = content;
            content_changed = true;
        }

        if let Some(schema) = request.param_schema {
            definition.param_schema = schema;
        } else if content_changed {
            definition.param_schema = extract_default_schema(&definition.content);
        }

        definition.updated_at = Utc::now();
        if let Some(updated_by) = request.updated_by {
            definition.updated_by = Some(updated_by);
        }
        self.store.save(definition.clone());

        if content_changed {
            self.cache.invalidate(&CacheKey::new(template_id, language));
        }

        info!(template_id = %template_id, language = %language, "updated template");
        Ok(definition)
    }

    /// Soft-delete a definition and invalidate its cached compilation.
    pub fn delete_template(&self, template_id: &str, language: Option<&str>) -> ServiceResult<()> {
        let language = self.effective_language(language);
        let mut definition = self.lookup(template_id, language)?;

        definition.is_deleted = true;
        definition.updated_at = Utc::now();
        self.store.save(definition);

        self.cache.invalidate(&CacheKey::new(template_id, language));

        info!(template_id = %template_id, language = %language, "deleted template");
        Ok(())
    }

    /// Change a template's id, invalidating both the old and the new cache
    /// key.
    pub fn rename_template(
        &self,
        template_id: &str,
        new_template_id: &str,
        language: Option<&str>,
    ) -> ServiceResult<TemplateDefinition> {
        let language = self.effective_language(language);

        if self.store.lookup(new_template_id, language).is_some() {
            return Err(ServiceError::TemplateExists {
                template_id: new_template_id.to_string(),
                language: language.to_string(),
            });
        }

        let mut definition = self.lookup(template_id, language)?;
        self.store.remove(template_id, language);
        definition.template_id = new_template_id.to_string();
        definition.updated_at = Utc::now();
        self.store.save(definition.clone());

        self.cache.invalidate(&CacheKey::new(template_id, language));
        self.cache
            .invalidate(&CacheKey::new(new_template_id, language));

        info!(
            template_id = %template_id,
            new_template_id = %new_template_id,
            language = %language,
            "renamed template"
        );
        Ok(definition)
    }

    /// Render a stored template against caller-supplied parameters.
    ///
    /// Pipeline: lookup, `template_*` reference expansion, required-parameter
    /// validation, cached compilation, evaluation.
    pub fn render(
        &self,
        template_id: &str,
        language: Option<&str>,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> ServiceResult<String> {
        let language = self.effective_language(language);
        let definition = self.lookup(template_id, language)?;

        let store: &dyn TemplateStore = self.store.as_ref();
        let tree = resolve_params(store, &self.config.default_language, params)?;
        check_required_params(&definition.param_schema, &tree)?;

        let key = CacheKey::new(template_id, language);
        let template = self
            .cache
            .get_or_compile(&key, &definition.content)
            .map_err(|source| ServiceError::CompilationFailed {
                key: key.to_string(),
                source,
            })?;

        template.render(&tree).map_err(|source| {
            warn!(key = %key, error = %source, "template rendering failed");
            ServiceError::RenderingFailed {
                key: key.to_string(),
                source,
            }
        })
    }

    /// Remove one cached compilation.
    pub fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key);
    }

    /// Empty the compiled-template cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
