//! SCSS variables, module imports, mixins and functions.
//!
//! `$name: value;` declares a variable at any nesting depth; `!default` and
//! `!global` flags are dropped from the value. `@import`, `@use` and
//! `@forward` all bring another stylesheet's symbols into scope. Built-in
//! `sass:` modules have no file behind them and are skipped.

use super::statements::{self, Node, Syntax};
use super::{
    ImportRef, Mixin, SymbolParser, SymbolTable, Variable, at_rule, import_path, parse_failure,
    quoted_strings,
};
use crate::core::{Dialect, StyleError};
use std::path::Path;

const SYNTAX: Syntax = Syntax {
    line_comments: true,
    interpolation: Some(b'#'),
};

const FLAGS: &[&str] = &["!default", "!global"];

/// Parser for SCSS stylesheets (indented `.sass` files are routed here too).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssParser;

impl SymbolParser for ScssParser {
    fn dialect(&self) -> Dialect {
        Dialect::Scss
    }

    fn parse(&self, text: &str, source: &Path) -> Result<SymbolTable, StyleError> {
        let nodes =
            statements::scan(text, SYNTAX).map_err(|e| parse_failure(source, Dialect::Scss, e))?;
        let mut table = SymbolTable::default();

        statements::walk(&nodes, &mut |node| match node {
            Node::Statement {
                text,
                offset,
            } => match at_rule(text) {
                Some(("import", params)) => {
                    let paths = quoted_strings(params);
                    if paths.is_empty() {
                        table.imports.push(ImportRef::new(import_path(params)));
                    } else {
                        table.imports.extend(paths.into_iter().map(ImportRef::new));
                    }
                }
                Some(("use" | "forward", params)) => {
                    if let Some(path) = quoted_strings(params).into_iter().next() {
                        if !path.starts_with("sass:") {
                            table.imports.push(ImportRef::new(path));
                        }
                    }
                }
                Some(_) => {}
                None => {
                    if let Some(variable) = variable(text, *offset) {
                        table.variables.push(variable);
                    }
                }
            },
            Node::Block {
                prelude,
                offset,
                ..
            } => match at_rule(prelude) {
                Some(("mixin", signature)) => table.mixins.extend(callable(signature, *offset)),
                Some(("function", signature)) => {
                    table.functions.extend(callable(signature, *offset));
                }
                _ => {}
            },
        });

        Ok(table)
    }
}

fn variable(statement: &str, offset: usize) -> Option<Variable> {
    let (prop, value) = statements::split_declaration(statement)?;
    let name = prop.strip_prefix('$')?;
    if !statements::is_identifier(name) {
        return None;
    }

    let mut value = statements::strip_block_comments(value);
    while let Some(flag) = FLAGS.iter().find(|flag| value.ends_with(**flag)) {
        value.truncate(value.len() - flag.len());
        value = value.trim_end().to_string();
    }
    if value.is_empty() {
        return None;
    }
    Some(Variable::new(name, value, offset))
}

/// `name($a, $b: 1)` or bare `name`.
fn callable(signature: &str, offset: usize) -> Option<Mixin> {
    let (name, parameters) = match signature.find('(') {
        Some(open) => {
            let close = signature.rfind(')').filter(|&c| c > open)?;
            (signature[..open].trim(), signature[open + 1..close].trim())
        }
        None => (signature.trim(), ""),
    };
    statements::is_identifier(name).then(|| Mixin {
        name: name.to_string(),
        parameters: parameters.to_string(),
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SymbolTable {
        ScssParser.parse(text, Path::new("test.scss")).unwrap()
    }

    #[test]
    fn test_variables_and_flags() {
        let table = parse("$a: red !default;\n.x { $b: $a !global; width: 1px; }");
        assert_eq!(table.variables, vec![Variable::new("a", "red", 0), Variable::new("b", "$a", 23)]);
    }

    #[test]
    fn test_maps_and_interpolation() {
        let table = parse("$map: (a: 1, b: 2);\n.icon-#{$n} { $c: #{$n}px; }");
        assert_eq!(table.variables[0].value, "(a: 1, b: 2)");
        assert_eq!(table.variables[1].name, "c");
        assert_eq!(table.variables[1].value, "#{$n}px");
    }

    #[test]
    fn test_module_imports() {
        let text = r#"
            @use "sass:math";
            @use "config" as cfg;
            @forward "src/list" hide list-reset;
            @import "a", 'b';
            @import url(plain.css);
        "#;
        let imports: Vec<_> = parse(text).imports.into_iter().map(|i| i.path).collect();
        assert_eq!(imports, vec!["config", "src/list", "a", "b", "plain.css"]);
    }

    #[test]
    fn test_mixins_and_functions() {
        let text = "@mixin theme($bg: #fff, $fg) { color: $fg; }\n@mixin reset { margin: 0 }\n@function double($n) { @return $n * 2; }";
        let table = parse(text);

        let mixins: Vec<_> = table.mixins.iter().map(|m| (m.name.as_str(), m.parameters.as_str())).collect();
        assert_eq!(mixins, vec![("theme", "$bg: #fff, $fg"), ("reset", "")]);
        assert_eq!(table.functions[0].name, "double");
        assert_eq!(table.functions[0].offset, 72);
    }

    #[test]
    fn test_include_arguments_are_not_variables() {
        let table = parse(".a { @include theme($fg: red); }");
        assert!(table.variables.is_empty());
    }
}
