/*
 * ast.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template AST types.
//!
//! This module defines the abstract syntax tree for parsed templates: literal
//! text, variable interpolations, conditional/iterating sections, and partial
//! references.

use std::fmt;

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text to be output as-is.
    Literal(String),

    /// Variable interpolation: `{{name}}`, `{{name.path}}` or `{{{name}}}`.
    Variable(Variable),

    /// Section: `{{#name}}...{{/name}}` or `{{^name}}...{{/name}}`.
    Section(Section),

    /// Partial reference: `{{>name}}`.
    ///
    /// Partials are a pass-through construct: they parse but produce no
    /// output. Cross-template inclusion happens before rendering, at the
    /// parameter-resolution stage.
    Partial(Partial),
}

/// A variable interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The dotted path being interpolated.
    pub path: VarPath,
    /// Whether the rendered value is HTML-escaped (`{{x}}` yes, `{{{x}}}` no).
    pub escaped: bool,
}

/// A conditional or iterating section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// The dotted path whose value drives the section.
    pub path: VarPath,
    /// Negated sections (`{{^name}}`) render only when the value is falsy.
    pub negated: bool,
    /// The section body.
    pub body: Vec<Node>,
}

/// A partial reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    /// Partial name.
    pub name: String,
}

/// A dotted variable path, e.g. `user.firstName`.
///
/// The reserved names `this` and `.` refer to the current context and parse
/// to an empty segment list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarPath {
    segments: Vec<String>,
}

impl VarPath {
    /// Parse a raw marker name into a path.
    ///
    /// The caller is expected to have validated the name; this split never
    /// fails.
    pub fn parse(raw: &str) -> Self {
        if raw == "this" || raw == "." {
            return VarPath {
                segments: Vec::new(),
            };
        }
        VarPath {
            segments: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// Whether this path refers to the current context (`this` or `.`).
    pub fn is_current(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path segments. Empty for the current-context path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The builtin name (without `@`) when this path is loop metadata such as
    /// `@index`.
    pub fn builtin(&self) -> Option<&str> {
        match self.segments.first() {
            Some(first) => first.strip_prefix('@'),
            None => None,
        }
    }
}

impl fmt::Display for VarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "this")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let path = VarPath::parse("name");
        assert_eq!(path.segments(), ["name"]);
        assert!(!path.is_current());
        assert_eq!(path.builtin(), None);
    }

    #[test]
    fn test_parse_dotted_path() {
        let path = VarPath::parse("user.firstName");
        assert_eq!(path.segments(), ["user", "firstName"]);
        assert_eq!(path.to_string(), "user.firstName");
    }

    #[test]
    fn test_this_and_dot_are_current_context() {
        assert!(VarPath::parse("this").is_current());
        assert!(VarPath::parse(".").is_current());
        assert_eq!(VarPath::parse(".").to_string(), "this");
    }

    #[test]
    fn test_builtin_detection() {
        assert_eq!(VarPath::parse("@index").builtin(), Some("index"));
        assert_eq!(VarPath::parse("@first").builtin(), Some("first"));
        assert_eq!(VarPath::parse("index").builtin(), None);
    }
}
