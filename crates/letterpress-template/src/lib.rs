/*
 * lib.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Mustache-style template engine for Letterpress.
//!
//! This crate is the pure core of the Letterpress template service. It
//! supports:
//!
//! - Variable interpolation: `{{name}}` (HTML-escaped) and `{{{name}}}` (raw)
//! - Dotted path navigation: `{{user.firstName}}`
//! - Sections: `{{#items}}...{{/items}}` (conditional or iterating)
//! - Negated sections: `{{^items}}...{{/items}}`
//! - Partial references: `{{>name}}` (pass-through; inclusion happens at the
//!   parameter-resolution stage, outside this crate)
//! - Comments: `{{! note}}`
//! - Current-context names `this` / `.` and loop metadata `@index`,
//!   `@first`, `@last`
//!
//! # Architecture
//!
//! Compilation is a pure function from source text to an immutable
//! [`Template`]; rendering is a read-only traversal against a
//! [`TemplateValue`] parameter tree. Caching, storage lookup and parameter
//! resolution live in `letterpress-service`.
//!
//! # Example
//!
//! ```
//! use letterpress_template::{Template, TemplateValue};
//!
//! let template = Template::compile("Hello, {{name}}!").unwrap();
//! let params = TemplateValue::from(serde_json::json!({"name": "World"}));
//! assert_eq!(template.render(&params).unwrap(), "Hello, World!");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod schema;
pub mod value;

// Re-export main types at crate root
pub use ast::{Node, Partial, Section, VarPath, Variable};
pub use error::{TemplateError, TemplateResult};
pub use parser::Template;
pub use schema::{extract_default_schema, ParamSchema, ParamSpec, ParamType};
pub use value::TemplateValue;
