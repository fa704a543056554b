use crate::common::command::{init_repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_stages_the_removal_and_deletes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "a/b/3.txt"]).assert().success();

    init_repository_dir
        .child("a/b")
        .assert(predicate::path::missing());
    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Removed Files ===\na/b/3.txt\n\n"));
    assert!(status.contains("=== Untracked Files ===\n\n"));
}

#[rstest]
fn removing_a_staged_only_file_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();

    run_twig_command(dir, &["rm", "new.txt"]).assert().success();

    init_repository_dir.child("new.txt").assert("new\n");
    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\nnew.txt\n\n"));
}

#[rstest]
fn removing_an_unknown_file_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("loose.txt"), "loose\n".to_string()));

    run_twig_command(dir, &["rm", "loose.txt"])
        .assert()
        .code(1)
        .stderr("No reason to remove the file.\n");

    init_repository_dir.child("loose.txt").assert("loose\n");
}

#[rstest]
fn committed_removal_stops_tracking(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    run_twig_command(dir, &["commit", "drop one"])
        .assert()
        .success();

    run_twig_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .code(1)
        .stderr("File does not exist in that commit.\n");
}
