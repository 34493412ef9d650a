/*
 * validator.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Pre-render parameter validation.
//!
//! Enforces `required` from the stored schema against the resolved parameter
//! tree. Declared-but-optional and inferred-but-undeclared parameters are
//! never checked.

use letterpress_template::{ParamSchema, TemplateValue};

use crate::error::{ServiceError, ServiceResult};

/// Fail when any schema entry with `required = true` has no corresponding
/// top-level key in the parameter tree.
///
/// Every offender is reported, in schema iteration order. An empty schema
/// always passes.
pub fn check_required_params(schema: &ParamSchema, params: &TemplateValue) -> ServiceResult<()> {
    if schema.is_empty() {
        return Ok(());
    }

    let missing: Vec<String> = schema
        .iter()
        .filter(|(name, spec)| spec.required && !has_top_level_key(params, name))
        .map(|(name, _)| name.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::MissingRequiredParams { params: missing })
    }
}

fn has_top_level_key(params: &TemplateValue, name: &str) -> bool {
    matches!(params, TemplateValue::Mapping(m) if m.contains_key(name))
}
