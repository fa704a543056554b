use crate::common::command::{
    branch_commit_id, commit_all, head_commit_id, init_repository_dir, run_twig_command,
    stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn reset_moves_the_branch_and_the_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    write_file(FileSpec::new(dir.join("later.txt"), "later\n".to_string()));
    commit_all(dir, "Later work");
    write_file(FileSpec::new(dir.join("notes.txt"), "mine\n".to_string()));
    write_file(FileSpec::new(dir.join("draft.txt"), "draft\n".to_string()));
    run_twig_command(dir, &["add", "draft.txt"]).assert().success();

    run_twig_command(dir, &["reset", &first[..6]])
        .assert()
        .success();

    assert_eq!(branch_commit_id(dir, "master"), first);
    init_repository_dir.child("1.txt").assert("one\n");
    init_repository_dir
        .child("later.txt")
        .assert(predicate::path::missing());
    init_repository_dir.child("notes.txt").assert("mine\n");
    assert!(stdout_of(dir, &["status"]).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn reset_to_an_unknown_commit_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["reset", "deadbeef"])
        .assert()
        .code(1)
        .stderr("No commit with that id exists.\n");
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("kept.txt"), "kept\n".to_string()));
    commit_all(dir, "Add kept");
    let with_kept = head_commit_id(dir);
    run_twig_command(dir, &["rm", "kept.txt"]).assert().success();
    run_twig_command(dir, &["commit", "Drop kept"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("kept.txt"), "other\n".to_string()));
    let head = head_commit_id(dir);

    run_twig_command(dir, &["reset", &with_kept])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(head_commit_id(dir), head);
    init_repository_dir.child("kept.txt").assert("other\n");
}

#[rstest]
fn reset_restores_tracked_files_removed_from_disk(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);
    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    std::fs::remove_file(dir.join("a/2.txt")).expect("Failed to delete file");

    run_twig_command(dir, &["reset", &head]).assert().success();

    init_repository_dir.child("1.txt").assert("one\n");
    init_repository_dir.child("a/2.txt").assert("two\n");
    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn reset_refuses_to_lose_edits_to_unchanged_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("a/2.txt"), "unsaved\n".to_string()));

    run_twig_command(dir, &["reset", &head])
        .assert()
        .code(1)
        .stderr("You have uncommitted changes.\n");

    init_repository_dir.child("a/2.txt").assert("unsaved\n");
}
