//! CSS custom properties and imports.
//!
//! Only custom properties declared directly in a top-level `:root` rule are
//! variables; a `--x` inside any other rule is scoped to that rule's
//! elements and is not a project-wide symbol. `@import` is collected at any
//! depth.

use super::statements::{self, Node, Syntax};
use super::{ImportRef, SymbolParser, SymbolTable, Variable, at_rule, import_path, parse_failure};
use crate::core::{Dialect, StyleError};
use std::path::Path;

const SYNTAX: Syntax = Syntax {
    line_comments: false,
    interpolation: None,
};

/// Parser for plain CSS (and PostCSS files).
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl SymbolParser for CssParser {
    fn dialect(&self) -> Dialect {
        Dialect::Css
    }

    fn parse(&self, text: &str, source: &Path) -> Result<SymbolTable, StyleError> {
        let nodes =
            statements::scan(text, SYNTAX).map_err(|e| parse_failure(source, Dialect::Css, e))?;
        let mut table = SymbolTable::default();

        for node in &nodes {
            if let Node::Block {
                prelude,
                children,
                ..
            } = node
            {
                if statements::strip_block_comments(prelude) == ":root" {
                    table.variables.extend(children.iter().filter_map(custom_property));
                }
            }
        }

        statements::walk(&nodes, &mut |node| {
            if let Node::Statement {
                text,
                ..
            } = node
            {
                if let Some(("import", params)) = at_rule(text) {
                    table.imports.push(ImportRef::new(import_path(params)));
                }
            }
        });

        Ok(table)
    }
}

fn custom_property(node: &Node<'_>) -> Option<Variable> {
    let Node::Statement {
        text,
        offset,
    } = node
    else {
        return None;
    };
    let (prop, value) = statements::split_declaration(text)?;
    let name = prop.strip_prefix("--")?;
    let value = statements::strip_block_comments(value);
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some(Variable::new(name, value, *offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SymbolTable {
        CssParser.parse(text, Path::new("test.css")).unwrap()
    }

    #[test]
    fn test_root_custom_property() {
        let table = parse(":root{--c: #fff;}");
        assert_eq!(table.variables, vec![Variable::new("c", "#fff", 6)]);
    }

    #[test]
    fn test_only_top_level_single_root_selector() {
        let text = r"
            :root, .dark { --a: 1px; }
            .card { --b: 2px; }
            @media print { :root { --c: 3px; } }
            :root { --d: 4px; color: red; --empty: ; }
        ";
        let names: Vec<_> = parse(text).variables.into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["d"]);
    }

    #[test]
    fn test_value_keeps_inner_colons_and_drops_comments() {
        let table = parse(":root {\n  --bg: url(data:image/png;base64,AA) /* hero */;\n}");
        assert_eq!(table.variables[0].value, "url(data:image/png;base64,AA)");
        assert_eq!(table.variables[0].offset, Some(10));
    }

    #[test]
    fn test_imports_at_any_depth() {
        let text = "@import 'a.css';\n@import url(\"b.css\") screen;\n@supports (display:grid) { @import c.css; }";
        let imports: Vec<_> = parse(text).imports.into_iter().map(|i| i.path).collect();
        assert_eq!(imports, vec!["a.css", "b.css", "c.css"]);
    }

    #[test]
    fn test_line_comment_is_not_special() {
        // `//` is not a comment in CSS, so it stays part of the selector
        let table = parse("// x\n:root { --a: 1; }");
        assert!(table.variables.is_empty());
    }

    #[test]
    fn test_root_selector_with_comment() {
        let table = parse(":root /* theme */ {\n  --a: 1px;\n}\n/* lead */ :root { --b: 2px; }");
        assert_eq!(
            table.variables,
            vec![Variable::new("a", "1px", 22), Variable::new("b", "2px", 53)]
        );
    }
}
