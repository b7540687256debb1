use predicates::prelude::*;

use crate::common::TestSite;

#[test]
fn test_help_lists_commands() {
    let site = TestSite::empty().unwrap();

    site.folio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help_shows_options() {
    let site = TestSite::empty().unwrap();

    site.folio()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--no-server"))
        .stdout(predicate::str::contains("--watch-all"));
}

#[test]
fn test_unknown_command() {
    let site = TestSite::empty().unwrap();

    site.folio().arg("deploy").assert().failure();
}

#[test]
fn test_invalid_format_value() {
    let site = TestSite::portfolio().unwrap();

    site.folio()
        .args(["validate", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
