//! Import closures across files, aliases and packages.

use crate::common::TestProject;
use stylescope::config::AliasMap;
use stylescope::core::Dialect;
use stylescope::symbols::{ResolveOptions, SymbolRoot, resolve_terminal, try_resolve_terminal};

#[tokio::test]
async fn test_second_walk_reads_nothing() {
    let project = TestProject::new().unwrap();
    project.write("base.less", "@brand: #123456;").unwrap();
    project.write("mixins.less", "@import 'base';\n.m(@x) { color: @x; }").unwrap();
    let main = project.write("main.less", "@import 'mixins';\n@link: @brand;").unwrap();
    let graph = project.graph();
    let roots = [SymbolRoot::Path(main)];

    let first = graph.resolve_closure(&roots, &ResolveOptions::default()).await;
    let after_first = graph.cache().stats();
    let second = graph.resolve_closure(&roots, &ResolveOptions::default()).await;
    let after_second = graph.cache().stats();

    assert_eq!(after_first.loads, 3);
    assert_eq!(after_second.loads, after_first.loads);
    assert_eq!(after_second.hits, after_first.hits + 3);
    assert_eq!(
        first.paths().collect::<Vec<_>>(),
        second.paths().collect::<Vec<_>>()
    );
    assert_eq!(first.flatten(None), second.flatten(None));
    assert_eq!(resolve_terminal("link", &second.flatten(None)).as_deref(), Some("#123456"));
}

#[tokio::test]
async fn test_import_cycle_terminates() {
    let project = TestProject::new().unwrap();
    let a = project.write("a.scss", "@import 'b';\n$a: $b;").unwrap();
    let b = project.write("b.scss", "@import 'a';\n$b: $a;").unwrap();

    let map = project
        .graph()
        .resolve_closure(&[SymbolRoot::Path(a.clone())], &ResolveOptions::default())
        .await;

    assert_eq!(map.paths().collect::<Vec<_>>(), vec![b.as_path(), a.as_path()]);

    // the variables alias each other too
    let values = map.flatten(None);
    assert_eq!(resolve_terminal("a", &values), None);
    assert!(try_resolve_terminal("b", &values).is_err());
}

#[tokio::test]
async fn test_alias_and_partial_resolution() {
    let project = TestProject::new().unwrap();
    let vars = project.write("src/styles/_vars.scss", "$gap: 8px;").unwrap();
    let index = project.write("src/theme/_index.scss", "$brand: teal;").unwrap();
    let main = project
        .write("pages/home.scss", "@use '@/styles/vars';\n@forward '@/theme';\n@use 'sass:math';")
        .unwrap();

    let aliases = AliasMap::from_pairs([("@", "src")]);
    let map = project
        .graph_with_aliases(aliases)
        .resolve_closure(&[SymbolRoot::Path(main.clone())], &ResolveOptions::default())
        .await;

    assert_eq!(map.paths().collect::<Vec<_>>(), vec![vars.as_path(), index.as_path(), main.as_path()]);
    let values = map.flatten(Some(Dialect::Scss));
    assert_eq!(values["gap"], "8px");
    assert_eq!(values["brand"], "teal");
}

#[tokio::test]
async fn test_package_lookup() {
    let project = TestProject::new().unwrap();
    let package = project.write("node_modules/design/tokens.less", "@radius: 4px;").unwrap();
    let main = project.write("src/app.less", "@import '~design/tokens';").unwrap();

    let map = project
        .graph()
        .resolve_closure(&[SymbolRoot::Path(main)], &ResolveOptions::default())
        .await;

    assert!(map.get(&package).is_some());
    assert_eq!(map.flatten(None)["radius"], "4px");
}

#[tokio::test]
async fn test_dialect_filter_skips_foreign_imports() {
    let project = TestProject::new().unwrap();
    let css = project.write("reset.css", ":root { --base: 16px; }").unwrap();
    let less = project.write("theme.less", "@import (css) 'reset.css';\n@size: 2px;").unwrap();
    let graph = project.graph();

    let options = ResolveOptions::default().with_filter([Dialect::Less]);
    let map = graph.resolve_closure(&[SymbolRoot::Path(less.clone())], &options).await;

    assert_eq!(map.paths().collect::<Vec<_>>(), vec![less.as_path()]);
    assert!(!graph.cache().contains(&css));

    let all = graph.resolve_closure(&[SymbolRoot::Path(less)], &ResolveOptions::default()).await;
    assert_eq!(all.len(), 2);
    assert_eq!(all.flatten(Some(Dialect::Css))["base"], "16px");
}

#[tokio::test]
async fn test_malformed_file_contributes_empty_table() {
    let project = TestProject::new().unwrap();
    let broken = project.write("broken.scss", "$a: 1;\n.x { color: red;").unwrap();
    let main = project.write("main.scss", "@import 'broken';\n$b: 2;").unwrap();

    let map = project
        .graph()
        .resolve_closure(&[SymbolRoot::Path(main)], &ResolveOptions::default())
        .await;

    assert_eq!(map.len(), 2);
    assert!(map.get(&broken).unwrap().is_empty());
    assert_eq!(map.flatten(None)["b"], "2");
}
