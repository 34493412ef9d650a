/*
 * error.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Service error taxonomy.
//!
//! Every variant carries a stable reason code and an HTTP-equivalent status
//! so callers embedding the engine behind a transport can map errors without
//! string matching.

use letterpress_template::TemplateError;
use thiserror::Error;

/// Errors surfaced by the template service.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// A template with the same identity already exists.
    #[error("Template '{template_id}' with language '{language}' already exists")]
    TemplateExists {
        template_id: String,
        language: String,
    },

    /// No non-deleted template with this identity.
    #[error("Template '{template_id}' with language '{language}' not found")]
    TemplateNotFound {
        template_id: String,
        language: String,
    },

    /// Template content failed syntax validation at create/update time.
    #[error("Invalid template syntax: {source}")]
    InvalidSyntax { source: TemplateError },

    /// Compilation failed while populating the cache. Never cached.
    #[error("Failed to compile template '{key}': {source}")]
    CompilationFailed { key: String, source: TemplateError },

    /// Unexpected failure during evaluation. Rendering is deterministic, so a
    /// retry without an input change cannot succeed.
    #[error("Failed to render template '{key}': {source}")]
    RenderingFailed { key: String, source: TemplateError },

    /// Required parameters missing from the resolved parameter tree.
    #[error("Missing required parameters: {}", params.join(", "))]
    MissingRequiredParams { params: Vec<String> },
}

impl ServiceError {
    /// Stable machine-readable reason code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ServiceError::TemplateExists { .. } => "template.exists",
            ServiceError::TemplateNotFound { .. } => "template.not_found",
            ServiceError::InvalidSyntax { .. } => "template.invalid_syntax",
            ServiceError::CompilationFailed { .. } => "template.compilation_failed",
            ServiceError::RenderingFailed { .. } => "template.rendering_failed",
            ServiceError::MissingRequiredParams { .. } => "template.missing_params",
        }
    }

    /// HTTP-equivalent status for this error class.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::TemplateExists { .. } => 409,
            ServiceError::TemplateNotFound { .. } => 404,
            ServiceError::InvalidSyntax { .. } => 400,
            ServiceError::CompilationFailed { .. } => 400,
            ServiceError::RenderingFailed { .. } => 500,
            ServiceError::MissingRequiredParams { .. } => 400,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
