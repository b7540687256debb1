use predicates::prelude::*;

use folio_cli::test_utils::ProjectsFixture;

use crate::common::TestSite;

/// Valid files in the working directory are found without arguments
#[test]
fn test_validate_default_files() {
    let site = TestSite::portfolio().unwrap();

    let output = site.run_folio(&["validate"]);
    output
        .assert_success()
        .assert_stdout_contains("✓")
        .assert_stdout_contains("Found 2 projects and 2 tools")
        .assert_stdout_contains("unknown tool 'ts'");
}

#[test]
fn test_validate_explicit_paths() {
    let site = TestSite::empty().unwrap();
    site.write_file("data/mine.yaml", "projects:\n  - name: Solo\n    description: Just one\n")
        .unwrap();
    site.write_file("data/stack.yaml", "tools: []\n").unwrap();

    site.folio()
        .args(["validate", "data/mine.yaml", "data/stack.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 projects"));
}

#[test]
fn test_validate_paths_from_environment() {
    let site = TestSite::empty().unwrap();
    site.write_file("env/p.yaml", "projects: []\n").unwrap();
    site.write_file("env/t.yaml", "tools: []\n").unwrap();

    site.folio()
        .env("FOLIO_PROJECTS", "env/p.yaml")
        .env("FOLIO_TOOLS", "env/t.yaml")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 projects"));
}

#[test]
fn test_validate_missing_file() {
    let site = TestSite::empty().unwrap();

    let output = site.run_folio(&["validate"]);
    output
        .assert_failure()
        .assert_stdout_contains("✗")
        .assert_stderr_contains("Cannot read source file projects.yaml");
}

#[test]
fn test_validate_malformed_projects() {
    let site = TestSite::portfolio().unwrap();
    site.write_projects(&ProjectsFixture::malformed().content).unwrap();

    let output = site.run_folio(&["validate"]);
    output.assert_failure().assert_stderr_contains("Validation failed for projects.yaml");
}

#[test]
fn test_validate_missing_description() {
    let site = TestSite::portfolio().unwrap();
    site.write_projects(&ProjectsFixture::missing_description().content).unwrap();

    let output = site.run_folio(&["validate"]);
    output.assert_failure().assert_stderr_contains("projects[0].description: missing field");
}

#[test]
fn test_validate_numeric_name() {
    let site = TestSite::portfolio().unwrap();
    site.write_projects("projects:\n  - name: 123\n    description: Numbers\n").unwrap();

    let output = site.run_folio(&["validate"]);
    output.assert_failure().assert_stderr_contains("projects[0].name: expected a string");
}

#[test]
fn test_validate_empty_projects_file() {
    let site = TestSite::portfolio().unwrap();
    site.write_projects("").unwrap();

    let output = site.run_folio(&["validate"]);
    output.assert_failure().assert_stderr_contains("document is empty");
}

#[test]
fn test_validate_empty_description() {
    let site = TestSite::portfolio().unwrap();
    site.write_projects("projects:\n  - name: Blank\n    description: \"\"\n").unwrap();

    let output = site.run_folio(&["validate"]);
    output.assert_failure().assert_stderr_contains("projects[0].description must not be empty");
}

#[test]
fn test_validate_invalid_tool_catalog() {
    let site = TestSite::portfolio().unwrap();
    site.write_tools("tools:\n  - id: py\n    name: Python\n").unwrap();

    let output = site.run_folio(&["validate"]);
    output.assert_failure().assert_stderr_contains("tools.yaml");
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let site = TestSite::portfolio().unwrap();

    let output = site.run_folio(&["validate", "--strict"]);
    output
        .assert_failure()
        .assert_stdout_contains("Strict mode")
        .assert_stdout_contains("unknown tool 'ts'");
}

#[test]
fn test_validate_strict_duplicate_tool_id() {
    let site = TestSite::portfolio().unwrap();
    site.write_projects("projects:\n  - name: Clean\n    description: No dangling refs\n    tools: [py]\n")
        .unwrap();
    site.write_tools(&folio_cli::test_utils::ToolsFixture::with_duplicate().content).unwrap();

    site.run_folio(&["validate"]).assert_success().assert_stdout_contains("'py' is defined more than once");
    site.run_folio(&["validate", "--strict"]).assert_failure();
}

#[test]
fn test_validate_json_output() {
    let site = TestSite::portfolio().unwrap();

    let output = site.run_folio(&["validate", "--format", "json"]);
    output.assert_success();

    let json: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["project_count"], 2);
    assert_eq!(json["tool_count"], 2);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_validate_json_output_on_failure() {
    let site = TestSite::empty().unwrap();

    let output = site.run_folio(&["validate", "--format", "json"]);
    output.assert_failure();

    let json: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert!(!json["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_validate_list_shows_resolved_tools() {
    let site = TestSite::portfolio().unwrap();

    site.run_folio(&["validate", "--list"])
        .assert_success()
        .assert_stdout_contains("1. Portfolio Site")
        .assert_stdout_contains("Tools: Python")
        .assert_stdout_contains("Tools: Rust, Python");
}

#[test]
fn test_validate_quiet() {
    let site = TestSite::portfolio().unwrap();

    site.folio().args(["--quiet", "validate"]).assert().success().stdout(predicate::str::is_empty());
}
