//! CLI tests for the full `bookbuild test` run and its sync gate.

use std::process::Command;

use bookbuild::exit_codes;
use bookbuild::test_support::FakeBook;

fn bookbuild(book: &FakeBook, args: &[&str]) -> std::process::ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_bookbuild"))
        .current_dir(book.root())
        .args(args)
        .status()
        .expect("run bookbuild")
}

#[test]
fn test_builds_syncs_then_runs_suite() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");
    // Both steps append to a shared log so ordering is observable.
    book.write_tool("sync", "echo sync >> order.log\n").expect("tool");
    book.write_tool("suite", "echo suite >> order.log\n").expect("tool");

    let status = bookbuild(&book, &["test"]);
    assert_eq!(status.code(), Some(exit_codes::OK));

    assert!(book.root().join("chapter_01.html").exists());
    assert_eq!(book.log_lines("order.log"), vec!["sync", "suite"]);
}

#[test]
fn sync_failure_aborts_before_any_test() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");
    book.write_tool("sync", "exit 1\n").expect("tool");

    let status = bookbuild(&book, &["test"]);
    assert_eq!(status.code(), Some(exit_codes::SYNC_FAILED));
    assert!(book.log_lines("suite.log").is_empty());
}

#[test]
fn suite_failure_exits_with_tests_failed() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");
    book.write_tool("suite", "exit 1\n").expect("tool");

    let status = bookbuild(&book, &["test"]);
    assert_eq!(status.code(), Some(exit_codes::TESTS_FAILED));
}

#[test]
fn suite_receives_fixed_hash_seed() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");
    book.write_tool("suite", "echo \"$PYTHONHASHSEED\" > seed.log\n")
        .expect("tool");

    let status = bookbuild(&book, &["test"]);
    assert_eq!(status.code(), Some(exit_codes::OK));
    assert_eq!(book.log_lines("seed.log"), vec!["0"]);
}
