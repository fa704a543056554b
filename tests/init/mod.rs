use crate::common::command::{repository_dir, run_twig_command, stdout_of};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_creates_the_repository_layout(repository_dir: TempDir) {
    let twig_path = repository_dir.path().canonicalize().unwrap().join(".twig");

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Initialized empty twig repository in {}",
            twig_path.display()
        )));

    repository_dir.child(".twig/objects").assert(predicate::path::is_dir());
    repository_dir
        .child(".twig/HEAD")
        .assert("ref: refs/heads/master\n");
    repository_dir
        .child(".twig/refs/heads/master")
        .assert(predicate::str::is_match(r"^[0-9a-f]{40}\n$").unwrap());
}

#[rstest]
fn init_records_the_root_commit(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let log = stdout_of(repository_dir.path(), &["log"]);

    assert!(log.starts_with("===\ncommit "));
    assert!(log.ends_with("Date: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"));
}

#[rstest]
fn init_twice_is_refused(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .code(1)
        .stderr("A version-control system already exists in the current directory.\n");
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["branch", "dev"])]
#[case(&["commit", "message"])]
fn commands_outside_a_repository_are_refused(repository_dir: TempDir, #[case] args: &[&str]) {
    run_twig_command(repository_dir.path(), args)
        .assert()
        .code(1)
        .stderr("Not in an initialized version-control directory.\n");
}
