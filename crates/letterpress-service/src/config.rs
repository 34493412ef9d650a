/*
 * config.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Service configuration.

use serde::Deserialize;

/// Language used when a caller does not specify one, and for resolving
/// `template_*` parameter references.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for [`crate::service::TemplateService`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub default_language: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
