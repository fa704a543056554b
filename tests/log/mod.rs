use crate::common::command::{
    READABLE_COMMIT_DATE, branch_commit_id, commit_all, head_commit_id, init_repository_dir,
    logged_commit_ids, run_twig_command, stdout_of, twig_commit_at,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_prints_the_first_parent_chain(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let initial_files = head_commit_id(dir);
    let root = logged_commit_ids(dir)[1].clone();

    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    commit_all(dir, "Translate one");
    let translated = head_commit_id(dir);

    let expected = format!(
        "===\ncommit {translated}\nDate: {READABLE_COMMIT_DATE}\nTranslate one\n\n\
         ===\ncommit {initial_files}\nDate: {READABLE_COMMIT_DATE}\nInitial files\n\n\
         ===\ncommit {root}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"
    );
    assert_eq!(stdout_of(dir, &["log"]), expected);
}

#[rstest]
fn log_shows_both_parents_of_a_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();

    write_file(FileSpec::new(dir.join("master.txt"), "m\n".to_string()));
    commit_all(dir, "Master work");
    let master_tip = head_commit_id(dir);

    run_twig_command(dir, &["checkout", "side"]).assert().success();
    write_file(FileSpec::new(dir.join("side.txt"), "s\n".to_string()));
    commit_all(dir, "Side work");
    let side_tip = head_commit_id(dir);

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    run_twig_command(dir, &["merge", "side"]).assert().success();

    let log = stdout_of(dir, &["log"]);
    assert!(log.contains(&format!(
        "Merge: {} {}\nDate: {READABLE_COMMIT_DATE}\nMerged side into master.\n",
        &master_tip[..7],
        &side_tip[..7]
    )));
    // first parents only
    assert!(!log.contains("Side work"));
}

#[rstest]
fn global_log_lists_every_branch_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();

    write_file(FileSpec::new(dir.join("master.txt"), "m\n".to_string()));
    run_twig_command(dir, &["add", "master.txt"]).assert().success();
    twig_commit_at(dir, "Master work", "2023-01-03 09:00:00 +0000")
        .assert()
        .success();

    run_twig_command(dir, &["checkout", "side"]).assert().success();
    write_file(FileSpec::new(dir.join("side.txt"), "s\n".to_string()));
    run_twig_command(dir, &["add", "side.txt"]).assert().success();
    twig_commit_at(dir, "Side work", "2023-01-02 09:00:00 +0000")
        .assert()
        .success();

    let messages = stdout_of(dir, &["global-log"])
        .split("===\n")
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.lines().nth(2).map(str::to_string))
        .collect::<Vec<_>>();

    assert_eq!(
        messages,
        vec!["Master work", "Side work", "Initial files", "initial commit"]
    );
}

#[rstest]
fn find_matches_whole_messages_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "x\n".to_string()));
    commit_all(dir, "Shared message");

    run_twig_command(dir, &["checkout", "side"]).assert().success();
    write_file(FileSpec::new(dir.join("y.txt"), "y\n".to_string()));
    commit_all(dir, "Shared message");

    let mut expected = vec![
        branch_commit_id(dir, "master"),
        branch_commit_id(dir, "side"),
    ];
    expected.sort();

    let found = stdout_of(dir, &["find", "Shared message"])
        .lines()
        .map(str::to_string)
        .collect::<Vec<_>>();
    assert_eq!(found, expected);

    run_twig_command(dir, &["find", "Shared"])
        .assert()
        .code(1)
        .stderr("Found no commit with that message.\n");
}

#[rstest]
fn find_keeps_surrounding_whitespace_of_messages(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("x.txt"), "x\n".to_string()));
    commit_all(dir, " fix bug ");
    let fixed = head_commit_id(dir);

    assert_eq!(stdout_of(dir, &["find", " fix bug "]), format!("{fixed}\n"));
    run_twig_command(dir, &["find", "fix bug"])
        .assert()
        .code(1)
        .stderr("Found no commit with that message.\n");
}
