/*
 * definition.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template definitions and mutation request types.

use chrono::{DateTime, Utc};
use letterpress_template::ParamSchema;
use serde::{Deserialize, Serialize};

/// A stored, versioned-by-language template.
///
/// Identity is the `(template_id, language)` pair, unique among non-deleted
/// definitions. The engine reads `content` and `param_schema`; everything
/// else is descriptive metadata owned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub template_id: String,
    pub language: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Raw template text.
    pub content: String,
    pub param_schema: ParamSchema,
    /// Soft-delete flag; deleted definitions are invisible to lookup.
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// Request payload for creating a template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTemplateRequest {
    pub template_id: String,
    /// Defaults to the service's configured default language.
    pub language: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub content: String,
    /// When absent or empty, a default schema is inferred from the content.
    pub param_schema: Option<ParamSchema>,
    pub created_by: Option<String>,
}

/// Request payload for a partial template update. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub param_schema: Option<ParamSchema>,
    pub updated_by: Option<String>,
}

/// Template metadata without the content body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateMetadata {
    pub template_id: String,
    pub language: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub param_schema: ParamSchema,
}

impl From<&TemplateDefinition> for TemplateMetadata {
    fn from(definition: &TemplateDefinition) -> Self {
        TemplateMetadata {
            template_id: definition.template_id.clone(),
            language: definition.language.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            category: definition.category.clone(),
            param_schema: definition.param_schema.clone(),
        }
    }
}
