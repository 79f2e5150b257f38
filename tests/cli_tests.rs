//! CLI surface tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn a_missing_configuration_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    Command::cargo_bin("appshell_bundler")
        .unwrap()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn help_describes_the_bundler() {
    Command::cargo_bin("appshell_bundler")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("native OS bundles"));
}
