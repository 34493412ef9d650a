/*
 * evaluator.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template evaluation.
//!
//! Walks a compiled AST against a context stack of [`TemplateValue`] frames.
//! Lookup follows mustache scoping: the innermost frame owning the first path
//! segment wins, and the rest of the path is walked within that frame. Absent
//! paths render as empty text and test falsy in sections. The traversal is
//! read-only; a compiled template can be rendered concurrently.

use crate::ast::{Node, Section, Variable, VarPath};
use crate::error::TemplateResult;
use crate::parser::Template;
use crate::value::TemplateValue;

impl Template {
    /// Render this template against a resolved parameter tree.
    pub fn render(&self, params: &TemplateValue) -> TemplateResult<String> {
        let mut scopes = vec![params];
        let mut loops = Vec::new();
        let mut out = String::new();
        render_nodes(&self.nodes, &mut scopes, &mut loops, &mut out)?;
        Ok(out)
    }
}

/// Iteration metadata for the innermost sequence section.
struct LoopMeta {
    index: usize,
    len: usize,
}

fn render_nodes<'a>(
    nodes: &[Node],
    scopes: &mut Vec<&'a TemplateValue>,
    loops: &mut Vec<LoopMeta>,
    out: &mut String,
) -> TemplateResult<()> {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Variable(var) => render_variable(var, scopes, loops, out),
            Node::Section(section) => render_section(section, scopes, loops, out)?,
            // Pass-through: inclusion happens at the resolver stage, before
            // rendering.
            Node::Partial(_) => {}
        }
    }
    Ok(())
}

fn render_variable(
    var: &Variable,
    scopes: &[&TemplateValue],
    loops: &[LoopMeta],
    out: &mut String,
) {
    let text = match resolve_builtin(&var.path, loops) {
        Some(value) => value.render_text(),
        None => match lookup(scopes, &var.path) {
            Some(value) => value.render_text(),
            None => return,
        },
    };

    if var.escaped {
        escape_html_into(&text, out);
    } else {
        out.push_str(&text);
    }
}

fn render_section<'a>(
    section: &Section,
    scopes: &mut Vec<&'a TemplateValue>,
    loops: &mut Vec<LoopMeta>,
    out: &mut String,
) -> TemplateResult<()> {
    if let Some(builtin) = resolve_builtin(&section.path, loops) {
        // Loop metadata tested as a plain scalar; no new context frame.
        if builtin.is_truthy() != section.negated {
            render_nodes(&section.body, scopes, loops, out)?;
        }
        return Ok(());
    }

    let value = lookup(scopes, &section.path);
    let truthy = value.map(TemplateValue::is_truthy).unwrap_or(false);

    if section.negated {
        if !truthy {
            render_nodes(&section.body, scopes, loops, out)?;
        }
        return Ok(());
    }

    if !truthy {
        return Ok(());
    }

    match value {
        Some(TemplateValue::Sequence(items)) => {
            let len = items.len();
            for (index, item) in items.iter().enumerate() {
                scopes.push(item);
                loops.push(LoopMeta { index, len });
                let result = render_nodes(&section.body, scopes, loops, out);
                loops.pop();
                scopes.pop();
                result?;
            }
        }
        Some(value) => {
            scopes.push(value);
            let result = render_nodes(&section.body, scopes, loops, out);
            scopes.pop();
            result?;
        }
        None => {}
    }

    Ok(())
}

/// Resolve a path against the context stack.
///
/// The innermost frame whose mapping contains the first segment is selected;
/// the remaining segments are walked within it. A miss anywhere resolves to
/// absent.
fn lookup<'a>(scopes: &[&'a TemplateValue], path: &VarPath) -> Option<&'a TemplateValue> {
    if path.is_current() {
        return scopes.last().copied();
    }

    let segments = path.segments();
    let first = segments[0].as_str();
    for scope in scopes.iter().rev() {
        if let TemplateValue::Mapping(m) = scope {
            if let Some(value) = m.get(first) {
                return value.get_path(&segments[1..]);
            }
        }
    }
    None
}

/// Resolve `@`-prefixed loop metadata for the innermost sequence section.
fn resolve_builtin(path: &VarPath, loops: &[LoopMeta]) -> Option<TemplateValue> {
    let name = path.builtin()?;
    let meta = loops.last()?;
    match name {
        "index" => Some(TemplateValue::Number(serde_json::Number::from(meta.index))),
        "first" => Some(TemplateValue::Bool(meta.index == 0)),
        "last" => Some(TemplateValue::Bool(meta.index + 1 == meta.len)),
        _ => None,
    }
}

/// HTML-escape `& < > " '` into the output buffer.
fn escape_html_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
}
