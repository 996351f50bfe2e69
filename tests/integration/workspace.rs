//! The editor-facing workspace across configuration and file events.

use crate::common::TestProject;
use std::time::Duration;
use stylescope::config::WorkspaceConfig;
use stylescope::core::StyleError;
use stylescope::document::{Position, TextDocument};
use stylescope::services::{StyleWorkspace, color_map};

const APP: &str = "<template>\n  <button class=\"btn\" style=\"color: var(--fg)\">ok</button>\n</template>\n\
<style lang=\"scss\">\n@use '@/tokens';\n$btn-bg: $brand;\n.btn { background: $btn-bg; }\n</style>\n";

#[tokio::test]
async fn test_configured_workspace_end_to_end() {
    let project = TestProject::new().unwrap();
    project.write("src/_tokens.scss", "$brand: #3366ff;\n$space: 4px;").unwrap();
    project.write("styles/global.css", ":root { --fg: white; }").unwrap();
    project
        .fixture
        .write_config("global_style = [\"styles\"]\n\n[aliases]\n\"@\" = \"src\"\n")
        .unwrap();

    let config = WorkspaceConfig::load(project.root()).await.unwrap();
    let mut workspace = StyleWorkspace::new(WorkspaceConfig::default());
    assert_eq!(workspace.apply_config(config).await, 1);

    let uri = project.uri("App.vue");
    let doc = TextDocument::new(&uri, "vue", 1, APP);

    let colors = color_map(&workspace.visible_symbols(&doc, None).await.unwrap(), None);
    assert_eq!(colors.get("btn-bg").map(String::as_str), Some("#3366ff"));
    assert_eq!(colors.get("fg").map(String::as_str), Some("white"));
    assert!(!colors.contains_key("space"));

    // line 6 is ".btn { background: $btn-bg; }"
    let location = workspace.definition(&doc, Position::new(6, 22)).await.unwrap().unwrap();
    assert_eq!(location.path, project.root().join("App.vue"));
    assert_eq!((location.line, location.character), (5, 0));

    let hover = workspace.hover(&doc, Position::new(5, 11)).await.unwrap().unwrap();
    assert_eq!(hover.name, "brand");
    assert_eq!(hover.path, project.root().join("src/_tokens.scss"));

    // the CSS attribute region sees the global custom property
    let location = workspace.definition(&doc, Position::new(1, 43)).await.unwrap().unwrap();
    assert_eq!(location.path, project.root().join("styles/global.css"));

    workspace.dispose();
}

#[tokio::test]
async fn test_file_change_is_visible_after_refresh() {
    let project = TestProject::new().unwrap();
    let tokens = project.write("tokens.less", "@accent: red;").unwrap();
    let workspace = StyleWorkspace::new(project.config());
    let doc = TextDocument::new(project.uri("a.less"), "less", 1, "@import 'tokens';\n@link: @accent;");

    let before = color_map(&workspace.document_symbols(&doc, None).await.unwrap(), None);
    assert_eq!(before["link"], "red");

    project.write("tokens.less", "@accent: blue;").unwrap();
    let stale = color_map(&workspace.document_symbols(&doc, None).await.unwrap(), None);
    assert_eq!(stale["link"], "red");

    assert_eq!(workspace.files_changed(&[tokens.clone()]).await.unwrap(), 1);
    let after = color_map(&workspace.document_symbols(&doc, None).await.unwrap(), None);
    assert_eq!(after["link"], "blue");

    std::fs::remove_file(&tokens).unwrap();
    assert_eq!(workspace.files_changed(&[tokens]).await.unwrap(), 0);
    let gone = workspace.document_symbols(&doc, None).await.unwrap();
    assert!(!color_map(&gone, None).contains_key("link"));
}

#[tokio::test]
async fn test_model_cache_follows_document_lifecycle() {
    let project = TestProject::new().unwrap();
    let mut config = project.config();
    config.model_cache.max_entries = 2;
    let workspace = StyleWorkspace::new(config);

    for (i, name) in ["a.vue", "b.vue", "c.vue"].iter().enumerate() {
        let doc = TextDocument::new(project.uri(name), "vue", 1, "<style>:root{--x: red}</style>");
        workspace.document_symbols(&doc, None).await.unwrap();
        if i < 2 {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    let cache = workspace.model_cache();
    assert_eq!(cache.len(), 2);
    assert!(!cache.contains(&project.uri("a.vue")));

    let edited = TextDocument::new(project.uri("c.vue"), "vue", 2, "<style>:root{--x: blue}</style>");
    workspace.document_symbols(&edited, None).await.unwrap();
    assert_eq!(cache.cached_version(&project.uri("c.vue")), Some(2));

    assert!(workspace.document_closed(&project.uri("c.vue")));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_features_need_a_root() {
    let mut workspace = StyleWorkspace::new(WorkspaceConfig::default());
    let doc = TextDocument::new("file:///x.scss", "scss", 1, "$a: 1;\n.a { b: $a; }");

    let error = workspace.definition(&doc, Position::new(1, 9)).await.unwrap_err();
    assert!(matches!(error, StyleError::RootDirNotConfigured));

    // nothing to warm without a root
    assert_eq!(workspace.apply_config(WorkspaceConfig::default()).await, 0);
    assert!(workspace.symbol_cache().is_empty());
}
