//! LESS variables, imports and mixins.
//!
//! `@name: value;` declares a variable at any nesting depth. A detached
//! ruleset (`@name: { ... }`) is a variable whose value is the block text.
//! Parametric mixin definitions (`.name(@a; @b) { }`) are recorded as mixins.

use super::statements::{self, Node, Syntax};
use super::{
    ImportRef, Mixin, SymbolParser, SymbolTable, Variable, at_rule, import_path, parse_failure,
};
use crate::core::{Dialect, StyleError};
use std::path::Path;

const SYNTAX: Syntax = Syntax {
    line_comments: true,
    interpolation: Some(b'@'),
};

/// Parser for LESS stylesheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct LessParser;

impl SymbolParser for LessParser {
    fn dialect(&self) -> Dialect {
        Dialect::Less
    }

    fn parse(&self, text: &str, source: &Path) -> Result<SymbolTable, StyleError> {
        let nodes =
            statements::scan(text, SYNTAX).map_err(|e| parse_failure(source, Dialect::Less, e))?;
        let mut table = SymbolTable::default();

        statements::walk(&nodes, &mut |node| match node {
            Node::Statement {
                text,
                offset,
            } => {
                if let Some(("import", params)) = at_rule(text) {
                    table.imports.push(ImportRef::new(import_path(strip_import_options(params))));
                } else if let Some(variable) = variable(text, *offset) {
                    table.variables.push(variable);
                }
            }
            Node::Block {
                prelude,
                offset,
                body,
                ..
            } => {
                if let Some(name) = detached_ruleset_name(prelude) {
                    table.variables.push(Variable::new(name, body.trim(), *offset));
                } else if let Some(mixin) = mixin(prelude, *offset) {
                    table.mixins.push(mixin);
                }
            }
        });

        Ok(table)
    }
}

fn variable(statement: &str, offset: usize) -> Option<Variable> {
    let (prop, value) = statements::split_declaration(statement)?;
    let name = prop.strip_prefix('@')?;
    if !statements::is_identifier(name) {
        return None;
    }
    let value = statements::strip_block_comments(value);
    if value.is_empty() {
        return None;
    }
    Some(Variable::new(name, value, offset))
}

fn detached_ruleset_name(prelude: &str) -> Option<&str> {
    let name = prelude.strip_suffix(':')?.trim_end().strip_prefix('@')?;
    statements::is_identifier(name).then_some(name)
}

/// `@import (reference, optional) "x";` -> `"x"`
fn strip_import_options(params: &str) -> &str {
    if params.starts_with('(') {
        if let Some(close) = params.find(')') {
            return params[close + 1..].trim_start();
        }
    }
    params
}

fn mixin(prelude: &str, offset: usize) -> Option<Mixin> {
    if !(prelude.starts_with('.') || prelude.starts_with('#')) {
        return None;
    }
    let open = prelude.find('(')?;
    let name = prelude[..open].trim_end();
    if !statements::is_identifier(&name[1..]) {
        return None;
    }
    // guards (`when (...)`) follow the parameter list
    let params_end = matching_paren(prelude, open)?;
    Some(Mixin {
        name: name.to_string(),
        parameters: prelude[open + 1..params_end].trim().to_string(),
        offset,
    })
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
