use predicates::prelude::*;

use crate::common::{TestSite, assert_file_contains};

#[test]
fn test_build_default_output_dir() {
    let site = TestSite::portfolio().unwrap();

    site.run_folio(&["build"])
        .assert_success()
        .assert_stdout_contains("Static site built successfully");

    assert_file_contains(site.join("build/index.html"), "Portfolio Site");
    assert_file_contains(site.join("build/index.html"), "href=\"project/1.html\"");
    assert_file_contains(site.join("build/project/0.html"), "Python");
    assert_file_contains(site.join("build/project/1.html"), "Log Shipper");
}

/// The exporter creates a missing output directory, including parents
#[test]
fn test_build_into_nonexistent_directory() {
    let site = TestSite::portfolio().unwrap();
    let output = site.join("deeply/nested/out");
    assert!(!output.exists());

    site.folio().args(["build", "-o", "deeply/nested/out"]).assert().success();

    assert!(output.join("index.html").is_file());
    assert!(output.join("project/0.html").is_file());
}

#[test]
fn test_build_drops_unknown_tool_reference() {
    let site = TestSite::portfolio().unwrap();

    site.run_folio(&["build"]).assert_success();

    let page = std::fs::read_to_string(site.join("build/project/0.html")).unwrap();
    assert!(page.contains("devicon-python-plain"));
    assert!(!page.contains(">ts<"));
}

#[test]
fn test_build_copies_static_assets() {
    let site = TestSite::portfolio().unwrap();
    site.write_file("static/css/style.css", "body { margin: 0; }").unwrap();

    site.run_folio(&["build"]).assert_success();

    assert_file_contains(site.join("build/static/css/style.css"), "margin: 0");
}

#[test]
fn test_build_uses_site_config() {
    let site = TestSite::portfolio().unwrap();
    site.write_file("folio.toml", "title = \"Jane Doe\"\nauthor = \"Jane\"\noutput_dir = \"public\"\n")
        .unwrap();

    site.run_folio(&["build"]).assert_success();

    assert!(!site.join("build").exists());
    assert_file_contains(site.join("public/index.html"), "<title>Jane Doe</title>");
}

#[test]
fn test_build_output_flag_overrides_site_config() {
    let site = TestSite::portfolio().unwrap();
    site.write_file("folio.toml", "output_dir = \"public\"\n").unwrap();

    site.folio().env("FOLIO_OUTPUT", "from-env").arg("build").assert().success();
    assert!(site.join("from-env/index.html").is_file());

    site.folio()
        .env("FOLIO_OUTPUT", "from-env")
        .args(["build", "--output", "from-flag"])
        .assert()
        .success();
    assert!(site.join("from-flag/index.html").is_file());
}

#[test]
fn test_build_template_override() {
    let site = TestSite::portfolio().unwrap();
    site.write_file(
        "theme/index.html",
        "<ul>{% for p in projects %}<li>{{ p.name }}</li>{% endfor %}</ul>",
    )
    .unwrap();

    site.run_folio(&["build", "--templates", "theme"]).assert_success();

    let index = std::fs::read_to_string(site.join("build/index.html")).unwrap();
    assert_eq!(index, "<ul><li>Portfolio Site</li><li>Log Shipper</li></ul>");
    // Not overridden: still the built-in page
    assert_file_contains(site.join("build/project/0.html"), "Live project");
}

#[test]
fn test_build_invalid_site_config() {
    let site = TestSite::portfolio().unwrap();
    site.write_file("folio.toml", "unknown_key = true\n").unwrap();

    site.folio()
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
    assert!(!site.join("build").exists());
}

#[test]
fn test_build_broken_template_writes_nothing() {
    let site = TestSite::portfolio().unwrap();
    site.write_file("theme/project.html", "{% if %}").unwrap();

    site.folio()
        .args(["build", "--templates", "theme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to render template"));
    assert!(!site.join("build/index.html").exists());
}

#[test]
fn test_build_missing_tools_file() {
    let site = TestSite::portfolio().unwrap();
    std::fs::remove_file(site.join("tools.yaml")).unwrap();

    site.folio()
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("tools.yaml"));
}
