//! Reference scenarios for the symbol engine.

use crate::common::TestProject;
use std::path::Path;
use stylescope::core::Dialect;
use stylescope::embedded::extract;
use stylescope::parser::parse_symbols;
use stylescope::symbols::{ResolveOptions, SymbolRoot, resolve_terminal};

#[test]
fn test_css_root_custom_property() {
    let table = parse_symbols(":root{--c: #fff;}", Path::new("a.css"), Dialect::Css);

    assert_eq!(table.variables.len(), 1);
    let variable = &table.variables[0];
    assert_eq!(variable.name, "c");
    assert_eq!(variable.value, "#fff");
    assert_eq!(variable.offset, Some(6));
    assert!(table.imports.is_empty());
}

#[tokio::test]
async fn test_less_alias_resolves_to_terminal_value() {
    let project = TestProject::new().unwrap();
    let file = project.write("theme.less", "@primary: @accent;\n@accent: #112233;").unwrap();

    let map = project
        .graph()
        .resolve_closure(&[SymbolRoot::Path(file)], &ResolveOptions::default())
        .await;
    let values = map.flatten(None);

    assert_eq!(resolve_terminal("primary", &values).as_deref(), Some("#112233"));
}

#[test]
fn test_scss_block_projection_keeps_offsets() {
    let text = "<template><div>hi</div></template><style lang=\"scss\">$a: red;</style>";
    let model = extract(text);

    assert_eq!(model.languages_present(), vec![Dialect::Scss]);

    let projection = model.project(Dialect::Scss, false);
    assert_eq!(projection.len(), text.len());

    let start = text.find("$a: red;").unwrap();
    let end = start + "$a: red;".len();
    assert_eq!(&projection[start..end], "$a: red;");
    assert!(projection[..start].bytes().all(|b| b == b' '));
    assert!(projection[end..].bytes().all(|b| b == b' '));

    let table = parse_symbols(&projection, Path::new("App.vue"), Dialect::Scss);
    assert_eq!(table.variables[0].offset, Some(start));
}

#[tokio::test]
async fn test_missing_import_is_skipped() {
    let project = TestProject::new().unwrap();
    let a = project.write("a.css", "@import './b.css';\n:root { --a: 1px; }").unwrap();

    let map = project
        .graph()
        .resolve_closure(&[SymbolRoot::Path(a.clone())], &ResolveOptions::default())
        .await;

    assert_eq!(map.len(), 1);
    assert!(map.get(&a).is_some());
    assert!(map.get(&project.root().join("b.css")).is_none());
}
