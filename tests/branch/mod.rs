use crate::common::command::{
    branch_commit_id, commit_all, head_commit_id, init_repository_dir, run_twig_command,
    stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn branch_points_at_the_head_without_switching(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "dev"]).assert().success();

    assert_eq!(branch_commit_id(dir, "dev"), head_commit_id(dir));
    init_repository_dir
        .child(".twig/HEAD")
        .assert("ref: refs/heads/master\n");
}

#[rstest]
fn branch_with_an_existing_name_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();

    run_twig_command(dir, &["branch", "dev"])
        .assert()
        .code(1)
        .stderr("A branch with that name already exists.\n");
}

#[rstest]
fn branch_names_cannot_nest_under_existing_branches(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    run_twig_command(dir, &["branch", "feature"])
        .assert()
        .code(1)
        .stderr("Invalid branch name: feature\n");

    run_twig_command(dir, &["branch", "dev"]).assert().success();
    run_twig_command(dir, &["branch", "dev/next"])
        .assert()
        .code(1)
        .stderr("Invalid branch name: dev/next\n");
}

#[rstest]
#[case("bad..name")]
#[case("trailing/")]
#[case("with space")]
fn invalid_branch_names_are_refused(init_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .code(1)
        .stderr(format!("Invalid branch name: {name}\n"));
}

#[rstest]
fn rm_branch_deletes_only_the_pointer(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();
    run_twig_command(dir, &["checkout", "dev"]).assert().success();
    write_file(FileSpec::new(dir.join("dev.txt"), "dev\n".to_string()));
    commit_all(dir, "Dev work");
    let dev_tip = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["rm-branch", "dev"])
        .assert()
        .success()
        .stdout(format!("Deleted branch dev (was {}).\n", &dev_tip[..7]));

    init_repository_dir
        .child(".twig/refs/heads/dev")
        .assert(predicate::path::missing());
    run_twig_command(dir, &["checkout", &dev_tip, "--", "dev.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("dev.txt")), "dev\n");
}

#[rstest]
fn rm_branch_of_the_current_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .code(1)
        .stderr("Cannot remove the current branch.\n");
}

#[rstest]
fn rm_branch_of_a_missing_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .code(1)
        .stderr("A branch with that name does not exist.\n");
}

#[rstest]
fn hierarchical_branches_are_listed_and_pruned(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    assert!(
        stdout_of(dir, &["status"]).starts_with("=== Branches ===\nfeature/login\n*master\n\n")
    );

    run_twig_command(dir, &["rm-branch", "feature/login"])
        .assert()
        .success();
    init_repository_dir
        .child(".twig/refs/heads/feature")
        .assert(predicate::path::missing());
}
