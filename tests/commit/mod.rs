use crate::common::command::{
    branch_commit_id, head_commit_id, init_repository_dir, logged_commit_ids, run_twig_command,
    twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn commit_advances_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let parent = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    let output = twig_commit(dir, "Translate one").assert().success();

    let head = head_commit_id(dir);
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, format!("[master {}] Translate one\n", &head[..7]));
    assert_eq!(branch_commit_id(dir, "master"), head);
    assert_eq!(logged_commit_ids(dir)[1], parent);
}

#[rstest]
fn commit_without_staged_changes_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    twig_commit(dir, "Nothing here")
        .assert()
        .code(1)
        .stderr("No changes added to the commit.\n");

    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
#[case("")]
#[case("   ")]
fn commit_with_a_blank_message_is_refused(init_repository_dir: TempDir, #[case] message: &str) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    twig_commit(dir, message)
        .assert()
        .code(1)
        .stderr("Please enter a commit message.\n");
}

#[rstest]
fn commit_keeps_files_it_did_not_stage(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    twig_commit(dir, "Translate one").assert().success();

    write_file(FileSpec::new(dir.join("a/2.txt"), "scribble\n".to_string()));
    run_twig_command(dir, &["checkout", "--", "a/2.txt"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(dir.join("a/2.txt")).unwrap(), "two\n");
}

#[rstest]
fn committed_content_survives_later_edits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notes.txt"), "staged bytes\n".to_string()));
    run_twig_command(dir, &["add", "notes.txt"]).assert().success();
    twig_commit(dir, "Add notes").assert().success();

    write_file(FileSpec::new(dir.join("notes.txt"), "edited later\n".to_string()));
    run_twig_command(dir, &["checkout", "--", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        std::fs::read_to_string(dir.join("notes.txt")).unwrap(),
        "staged bytes\n"
    );
}
