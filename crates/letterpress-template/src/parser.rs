/*
 * parser.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template parser.
//!
//! A single left-to-right scan over the source text, recognizing `{{name}}`,
//! `{{{name}}}`, `{{#name}}...{{/name}}`, `{{^name}}...{{/name}}`,
//! `{{>name}}` and `{{!comment}}` markers. Everything else is literal text.
//! Section nesting is tracked with an explicit stack; open/close mismatches
//! are compile errors carrying the byte offset of the offending marker.

use crate::ast::{Node, Partial, Section, Variable, VarPath};
use crate::error::{TemplateError, TemplateResult};

/// A compiled template ready for evaluation.
///
/// Immutable after compilation; safe to share across concurrent renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// The parsed template AST.
    pub(crate) nodes: Vec<Node>,

    /// Original source (retained for diagnostics).
    source: String,
}

impl Template {
    /// Compile a template from source text.
    pub fn compile(source: &str) -> TemplateResult<Self> {
        let nodes = parse(source)?;
        Ok(Template {
            nodes,
            source: source.to_string(),
        })
    }

    /// Get the AST nodes of this template.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get the original source text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A section whose close marker has not been seen yet.
struct OpenSection {
    path: VarPath,
    negated: bool,
    /// Byte offset of the opening marker, for unclosed-section errors.
    offset: usize,
    body: Vec<Node>,
}

fn parse(source: &str) -> TemplateResult<Vec<Node>> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find("{{") {
        let start = pos + found;
        if found > 0 {
            push_node(
                &mut root,
                &mut stack,
                Node::Literal(source[pos..start].to_string()),
            );
        }

        if source[start..].starts_with("{{{") {
            // Unescaped variable: {{{name}}}
            let after = start + 3;
            let close = source[after..]
                .find("}}}")
                .ok_or_else(|| TemplateError::syntax(start, "unterminated '{{{' marker"))?;
            let path = parse_name(source[after..after + close].trim(), start)?;
            push_node(
                &mut root,
                &mut stack,
                Node::Variable(Variable {
                    path,
                    escaped: false,
                }),
            );
            pos = after + close + 3;
            continue;
        }

        let after = start + 2;
        let close = source[after..]
            .find("}}")
            .ok_or_else(|| TemplateError::syntax(start, "unterminated '{{' marker"))?;
        let inner = source[after..after + close].trim();
        pos = after + close + 2;

        let Some(sigil) = inner.chars().next() else {
            return Err(TemplateError::syntax(start, "empty marker"));
        };

        match sigil {
            '#' | '^' => {
                let path = parse_name(inner[1..].trim(), start)?;
                stack.push(OpenSection {
                    path,
                    negated: sigil == '^',
                    offset: start,
                    body: Vec::new(),
                });
            }
            '/' => {
                let path = parse_name(inner[1..].trim(), start)?;
                let open = stack.pop().ok_or_else(|| {
                    TemplateError::syntax(
                        start,
                        format!("section close '{path}' without matching open"),
                    )
                })?;
                if open.path != path {
                    return Err(TemplateError::syntax(
                        start,
                        format!(
                            "section close '{path}' does not match open section '{}'",
                            open.path
                        ),
                    ));
                }
                push_node(
                    &mut root,
                    &mut stack,
                    Node::Section(Section {
                        path: open.path,
                        negated: open.negated,
                        body: open.body,
                    }),
                );
            }
            '>' => {
                let name = inner[1..].trim();
                if name.is_empty() {
                    return Err(TemplateError::syntax(start, "partial marker without a name"));
                }
                push_node(
                    &mut root,
                    &mut stack,
                    Node::Partial(Partial {
                        name: name.to_string(),
                    }),
                );
            }
            '!' => {
                // Comment: parsed, produces no node.
            }
            c if is_name_start(c) => {
                let path = parse_name(inner, start)?;
                push_node(
                    &mut root,
                    &mut stack,
                    Node::Variable(Variable {
                        path,
                        escaped: true,
                    }),
                );
            }
            c => {
                return Err(TemplateError::syntax(
                    start,
                    format!("unknown marker sigil '{c}'"),
                ));
            }
        }
    }

    if pos < source.len() {
        push_node(&mut root, &mut stack, Node::Literal(source[pos..].to_string()));
    }

    if let Some(open) = stack.pop() {
        return Err(TemplateError::syntax(
            open.offset,
            format!("unclosed section '{}'", open.path),
        ));
    }

    Ok(root)
}

/// Append a node to the innermost open section, or to the root.
fn push_node(root: &mut Vec<Node>, stack: &mut [OpenSection], node: Node) {
    match stack.last_mut() {
        Some(open) => open.body.push(node),
        None => root.push(node),
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '@' || c == '.'
}

/// Validate a marker name and parse it into a path.
///
/// Names are dotted sequences of non-empty segments made of alphanumerics,
/// `_` and `-`, optionally starting with `@` (builtin metadata). `this` and
/// `.` are the current-context path.
fn parse_name(raw: &str, offset: usize) -> TemplateResult<VarPath> {
    if raw.is_empty() {
        return Err(TemplateError::syntax(offset, "empty marker name"));
    }
    if raw == "this" || raw == "." {
        return Ok(VarPath::parse(raw));
    }

    for (i, c) in raw.char_indices() {
        let valid = c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || (c == '@' && i == 0);
        if !valid {
            return Err(TemplateError::syntax(
                offset,
                format!("invalid character '{c}' in marker name '{raw}'"),
            ));
        }
    }
    if raw.split('.').any(str::is_empty) {
        return Err(TemplateError::syntax(
            offset,
            format!("empty path segment in marker name '{raw}'"),
        ));
    }

    Ok(VarPath::parse(raw))
}
