use crate::common::command::{
    commit_all, head_commit_id, init_repository_dir, logged_commit_ids, run_twig_command,
    stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::{fixture, rstest};

/// `init_repository_dir` plus branch `feature`, which edits `1.txt`, adds
/// `feature.txt` and deletes `a/b/3.txt`; master stays checked out
#[fixture]
fn feature_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    run_twig_command(dir, &["checkout", "feature"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "feature one\n".to_string()));
    write_file(FileSpec::new(dir.join("feature.txt"), "feature\n".to_string()));
    run_twig_command(dir, &["rm", "a/b/3.txt"]).assert().success();
    commit_all(dir, "Feature work");

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    init_repository_dir
}

#[rstest]
fn checkout_head_file_restores_committed_content(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "scratch\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    run_twig_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
    // staging is left alone
    assert!(stdout_of(dir, &["status"]).contains("=== Staged Files ===\n1.txt\n\n"));
}

#[rstest]
fn checkout_file_accepts_abbreviated_commit_ids(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    commit_all(dir, "Translate one");

    run_twig_command(dir, &["checkout", &first[..8], "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
}

#[rstest]
#[case("0000000000000000000000000000000000000000")]
#[case("abc")]
fn checkout_file_from_an_unknown_commit_is_refused(
    init_repository_dir: TempDir,
    #[case] commit: &str,
) {
    run_twig_command(init_repository_dir.path(), &["checkout", commit, "--", "1.txt"])
        .assert()
        .code(1)
        .stderr("No commit with that id exists.\n");
}

#[rstest]
fn checkout_file_missing_from_the_commit_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = logged_commit_ids(dir)[1].clone();

    run_twig_command(dir, &["checkout", &root, "--", "1.txt"])
        .assert()
        .code(1)
        .stderr("File does not exist in that commit.\n");
}

#[rstest]
fn checkout_branch_rewrites_the_working_directory(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();

    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Switched to branch 'feature'"));

    feature_repository_dir.child("1.txt").assert("feature one\n");
    feature_repository_dir.child("feature.txt").assert("feature\n");
    feature_repository_dir
        .child("a/b")
        .assert(predicate::path::missing());
    feature_repository_dir
        .child(".twig/HEAD")
        .assert("ref: refs/heads/feature\n");
    assert!(
        stdout_of(dir, &["status"])
            .contains("=== Modifications Not Staged For Commit ===\n\n=== Untracked Files ===\n\n")
    );

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    feature_repository_dir.child("a/b/3.txt").assert("three\n");
    feature_repository_dir
        .child("feature.txt")
        .assert(predicate::path::missing());
}

#[rstest]
fn checkout_branch_keeps_untracked_files_outside_the_change(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    write_file(FileSpec::new(dir.join("notes.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["checkout", "feature"]).assert().success();

    feature_repository_dir.child("notes.txt").assert("mine\n");
}

#[rstest]
fn checkout_branch_refuses_to_overwrite_untracked_files(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    write_file(FileSpec::new(dir.join("feature.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // nothing was touched
    feature_repository_dir.child("feature.txt").assert("mine\n");
    feature_repository_dir.child("1.txt").assert("one\n");
    feature_repository_dir
        .child(".twig/HEAD")
        .assert("ref: refs/heads/master\n");
}

#[rstest]
fn checkout_branch_refuses_to_lose_unsaved_edits(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "unsaved\n".to_string()));

    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("You have uncommitted changes."));

    feature_repository_dir.child("1.txt").assert("unsaved\n");
}

#[rstest]
fn checkout_branch_refuses_to_lose_edits_both_branches_share(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/2.txt"), "unsaved\n".to_string()));

    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .code(1)
        .stderr("You have uncommitted changes.\n");

    feature_repository_dir.child("a/2.txt").assert("unsaved\n");
    feature_repository_dir.child("1.txt").assert("one\n");
    feature_repository_dir
        .child(".twig/HEAD")
        .assert("ref: refs/heads/master\n");
}

#[rstest]
fn checkout_branch_restores_missing_files_both_branches_share(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();

    run_twig_command(dir, &["checkout", "feature"]).assert().success();

    feature_repository_dir.child("a/2.txt").assert("two\n");
    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn checkout_branch_accepts_files_already_matching_the_target(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    write_file(FileSpec::new(dir.join("feature.txt"), "feature\n".to_string()));

    run_twig_command(dir, &["checkout", "feature"]).assert().success();
}

#[rstest]
fn checkout_of_a_missing_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout", "nowhere"])
        .assert()
        .code(1)
        .stderr("A branch with that name does not exist.\n");
}

#[rstest]
fn checkout_of_the_current_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .code(1)
        .stderr("No need to checkout the current branch.\n");
}

#[rstest]
fn checkout_branch_clears_staging(feature_repository_dir: TempDir) {
    let dir = feature_repository_dir.path();
    write_file(FileSpec::new(dir.join("draft.txt"), "draft\n".to_string()));
    run_twig_command(dir, &["add", "draft.txt"]).assert().success();

    run_twig_command(dir, &["checkout", "feature"]).assert().success();

    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\ndraft.txt\n\n"));
}
