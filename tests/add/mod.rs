use crate::common::command::{init_repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use rstest::rstest;

fn staged_section(status: &str) -> Vec<String> {
    status
        .split("=== Staged Files ===\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\n").next())
        .map(|section| section.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[rstest]
fn add_stages_a_new_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));

    run_twig_command(dir, &["add", "new.txt"]).assert().success();

    let status = stdout_of(dir, &["status"]);
    assert_eq!(staged_section(&status), vec!["new.txt"]);
}

#[rstest]
fn add_expands_directories(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let files = write_generated_files(&dir.join("docs"), 3);

    run_twig_command(dir, &["add", "docs"]).assert().success();

    let mut expected = files
        .iter()
        .map(|file| {
            file.path
                .strip_prefix(dir)
                .unwrap()
                .display()
                .to_string()
        })
        .collect::<Vec<_>>();
    expected.sort();
    assert_eq!(staged_section(&stdout_of(dir, &["status"])), expected);
}

#[rstest]
fn adding_a_missing_file_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .code(1)
        .stderr("File does not exist.\n");
}

#[rstest]
fn adding_content_equal_to_the_head_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "changed\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    assert_eq!(staged_section(&stdout_of(dir, &["status"])), vec!["1.txt"]);

    write_file(FileSpec::new(dir.join("1.txt"), "one\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    assert!(staged_section(&stdout_of(dir, &["status"])).is_empty());
    run_twig_command(dir, &["commit", "nothing"])
        .assert()
        .code(1)
        .stderr("No changes added to the commit.\n");
}

#[rstest]
fn adding_a_removed_file_back_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(staged_section(&status).is_empty());
}
