/*
 * value.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template value types.
//!
//! [`TemplateValue`] is the resolved, render-ready parameter tree a template
//! is evaluated against. It is a tagged variant rather than raw JSON so that
//! truthiness and stringification rules are explicit.

use std::collections::HashMap;

/// A value that can be used in template evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// A string value.
    String(String),

    /// A numeric value. Backed by [`serde_json::Number`] so integers
    /// stringify without a decimal point.
    Number(serde_json::Number),

    /// A boolean value.
    Bool(bool),

    /// A sequence of values.
    Sequence(Vec<TemplateValue>),

    /// A mapping of string keys to values.
    Mapping(HashMap<String, TemplateValue>),

    /// A null/missing value.
    Null,
}

impl TemplateValue {
    /// Check if this value is "truthy" for section evaluation.
    ///
    /// Falsy: `Null`, `Bool(false)`, the empty string, numeric zero, and the
    /// empty sequence. Mappings are always truthy, including empty ones.
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Bool(b) => *b,
            TemplateValue::String(s) => !s.is_empty(),
            TemplateValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            TemplateValue::Sequence(items) => !items.is_empty(),
            TemplateValue::Mapping(_) => true,
            TemplateValue::Null => false,
        }
    }

    /// Get a nested field by path, walking nested mappings.
    ///
    /// A missing intermediate key or a path into a non-mapping resolves to
    /// `None` rather than an error.
    pub fn get_path(&self, path: &[String]) -> Option<&TemplateValue> {
        if path.is_empty() {
            return Some(self);
        }

        match self {
            TemplateValue::Mapping(m) => {
                m.get(path[0].as_str()).and_then(|v| v.get_path(&path[1..]))
            }
            _ => None,
        }
    }

    /// Render this value as output text using the canonical formats.
    ///
    /// - String: as-is
    /// - Number: decimal (`serde_json::Number` display)
    /// - Bool: `true` / `false`
    /// - Sequence: concatenation of rendered elements
    /// - Mapping, Null: empty string
    pub fn render_text(&self) -> String {
        match self {
            TemplateValue::String(s) => s.clone(),
            TemplateValue::Number(n) => n.to_string(),
            TemplateValue::Bool(b) => b.to_string(),
            TemplateValue::Sequence(items) => items.iter().map(|v| v.render_text()).collect(),
            TemplateValue::Mapping(_) => String::new(),
            TemplateValue::Null => String::new(),
        }
    }
}

impl Default for TemplateValue {
    fn default() -> Self {
        TemplateValue::Null
    }
}

impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            serde_json::Value::Number(n) => TemplateValue::Number(n),
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::Sequence(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(entries) => TemplateValue::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}
