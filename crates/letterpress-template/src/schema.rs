/*
 * schema.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Parameter schema types and default-schema extraction.
//!
//! Extraction is a lexical pass over the raw template text, independent of
//! the parser: a template can pass extraction and still fail strict
//! compilation. The produced schema is advisory and is used only when the
//! caller supplies no explicit schema.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Declared parameter type. Purely descriptive metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Number,
    Boolean,
}

/// Descriptive metadata for one template parameter.
///
/// Only `required` is enforced at render time; `type` and `pattern` are
/// advisory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSpec {
    pub required: bool,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// A parameter schema: name to spec, in declaration order.
pub type ParamSchema = IndexMap<String, ParamSpec>;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").unwrap());

/// Infer a default parameter schema from raw template text.
///
/// Scans every `{{...}}` marker, skips section/partial/comment/builtin
/// markers and the current-context names, takes the top-level path segment of
/// each remaining variable, and produces one optional string-typed spec per
/// distinct name in first-occurrence order.
pub fn extract_default_schema(content: &str) -> ParamSchema {
    let mut schema = ParamSchema::new();

    for capture in MARKER.captures_iter(content) {
        let marker = capture[1].trim();
        if marker.is_empty() || is_non_variable(marker) {
            continue;
        }

        let name = marker.split('.').next().unwrap_or(marker);
        schema.entry(name.to_string()).or_default();
    }

    schema
}

fn is_non_variable(marker: &str) -> bool {
    marker.starts_with(['#', '/', '^', '>', '@', '!'])
        || marker == "this"
        || marker == "."
}
