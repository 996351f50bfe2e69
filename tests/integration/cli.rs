//! The `stylescope` binary.

use crate::common::TestProject;
use assert_cmd::Command;
use predicates::prelude::*;

const APP: &str = "<template>\n  <p style=\"color: red\">x</p>\n</template>\n\
<style lang=\"less\">\n@import '@/vars';\n@primary: @accent;\n.a { color: @primary; }\n</style>\n";

fn project() -> TestProject {
    let project = TestProject::new().unwrap();
    project.write("src/vars.less", "@accent: #112233;\n@gap: 4px;").unwrap();
    project.write("App.vue", APP).unwrap();
    project.fixture.write_config("[aliases]\n\"@\" = \"src\"\n").unwrap();
    project
}

fn stylescope(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("stylescope").unwrap();
    cmd.current_dir(project.root()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_symbols_prints_closure() {
    let project = project();
    stylescope(&project)
        .args(["symbols", "App.vue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vars.less (less)"))
        .stdout(predicate::str::contains("@accent: #112233"))
        .stdout(predicate::str::contains("@primary: @accent"));
}

#[test]
fn test_symbols_json() {
    let project = project();
    let output = stylescope(&project).args(["symbols", "src/vars.less", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["dialect"], "less");
    assert_eq!(entries[0]["symbols"]["variables"][1]["name"], "gap");
}

#[test]
fn test_regions() {
    let project = project();
    stylescope(&project)
        .args(["regions", "App.vue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(attribute)"))
        .stdout(predicate::str::contains("dialects: css, less"));
}

#[test]
fn test_project_preserves_length() {
    let project = project();
    let output = stylescope(&project)
        .args(["project", "App.vue", "--dialect", "less"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.len(), APP.len());

    let projection = String::from_utf8(output.stdout).unwrap();
    let start = APP.find("@primary: @accent;").unwrap();
    assert_eq!(&projection[start..start + 18], "@primary: @accent;");
    assert!(!projection.contains("template"));
}

#[test]
fn test_colors() {
    let project = project();
    let out = project.run(&["colors", "App.vue"]).unwrap();
    assert!(out.success, "{}", out.stderr);
    assert!(out.stdout.contains("primary: #112233"));
    assert!(out.stdout.contains("accent: #112233"));
    assert!(!out.stdout.contains("gap"));
}

#[test]
fn test_lenses() {
    let project = project();
    project.write("src/card.less", "@import './vars.less';\n.card { margin: 4px; padding: @gap; }").unwrap();

    stylescope(&project)
        .args(["lenses", "src/card.less"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2:17 use variable @gap (stylescope.convert-value-to-variable)"))
        .stdout(predicate::str::contains("use value").not());

    stylescope(&project)
        .args(["lenses", "src/card.less", "--variable-to-value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2:31 use value 4px"));
}

#[test]
fn test_definition() {
    let project = project();
    // line 7, column 14 is inside "@primary" in ".a { color: @primary; }"
    stylescope(&project)
        .args(["definition", "App.vue", "7", "14"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(":6:1\n"));

    stylescope(&project)
        .args(["definition", "App.vue", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No variable definition found"));
}

#[test]
fn test_malformed_config_is_reported() {
    let project = project();
    project.fixture.write_config("[aliases\n").unwrap();
    stylescope(&project)
        .args(["symbols", "App.vue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_missing_input_file() {
    let project = project();
    stylescope(&project).args(["regions", "missing.vue"]).assert().failure().stderr(
        predicate::str::contains("missing.vue"),
    );
}
