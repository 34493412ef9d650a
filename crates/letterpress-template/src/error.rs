/*
 * error.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Error types for template parsing and evaluation.

use thiserror::Error;

/// Errors that can occur during template operations.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    /// Error parsing the template syntax.
    ///
    /// `offset` is the byte offset of the offending marker in the source text.
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// Unexpected internal failure during evaluation.
    ///
    /// Rendering is a pure traversal, so this indicates a bug rather than bad
    /// input; a retry with the same inputs cannot succeed.
    #[error("Render error: {message}")]
    Render { message: String },
}

impl TemplateError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        TemplateError::Syntax {
            offset,
            message: message.into(),
        }
    }
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
