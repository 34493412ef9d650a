/*
 * resolver.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Render-parameter resolution.
//!
//! Turns the caller-supplied JSON parameter map into a render-ready
//! [`TemplateValue`] tree. Any top-level key starting with the reserved
//! `template_` prefix is a template reference: the prefix is stripped to
//! obtain a template id, and the value is replaced by that template's raw
//! content (default language). The substituted content is an opaque string;
//! it is neither re-parsed nor recursively resolved.

use letterpress_template::TemplateValue;
use std::collections::HashMap;

use crate::error::{ServiceError, ServiceResult};
use crate::store::TemplateStore;

/// Reserved prefix marking a parameter as a template reference.
pub const TEMPLATE_REF_PREFIX: &str = "template_";

/// Resolve caller-supplied parameters into a render-ready tree.
///
/// Fails with [`ServiceError::TemplateNotFound`] if any referenced template
/// cannot be found; no partial substitution is produced.
pub fn resolve_params(
    store: &dyn TemplateStore,
    default_language: &str,
    params: serde_json::Map<String, serde_json::Value>,
) -> ServiceResult<TemplateValue> {
    let mut resolved = HashMap::with_capacity(params.len());

    for (key, value) in params {
        if let Some(referenced) = key.strip_prefix(TEMPLATE_REF_PREFIX) {
            let definition = store.lookup(referenced, default_language).ok_or_else(|| {
                ServiceError::TemplateNotFound {
                    template_id: referenced.to_string(),
                    language: default_language.to_string(),
                }
            })?;
            resolved.insert(key, TemplateValue::String(definition.content));
        } else {
            resolved.insert(key, TemplateValue::from(value));
        }
    }

    Ok(TemplateValue::Mapping(resolved))
}
