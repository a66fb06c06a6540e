//! CLI tests for `bookbuild build` and `bookbuild clean`.
//!
//! Spawns the harness binary against a fabricated book directory whose
//! external tools are shell scripts recording their invocations.

use std::process::Command;

use bookbuild::test_support::FakeBook;

fn bookbuild(book: &FakeBook, args: &[&str]) -> std::process::ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_bookbuild"))
        .current_dir(book.root())
        .args(args)
        .status()
        .expect("run bookbuild")
}

#[test]
fn build_produces_a_page_per_source() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");
    book.add_chapter("02", "Chapter two").expect("chapter");

    let status = bookbuild(&book, &["build"]);
    assert!(status.success());
    assert!(book.root().join("chapter_01.html").exists());
    assert!(book.root().join("chapter_02.html").exists());
    assert_eq!(
        book.log_lines("compile.log"),
        vec!["chapter_01.asciidoc", "chapter_02.asciidoc"]
    );
}

#[test]
fn rebuild_skips_fresh_pages() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");

    assert!(bookbuild(&book, &["build"]).success());
    assert!(bookbuild(&book, &["build"]).success());
    // One compiler invocation total: the second build found the page fresh.
    assert_eq!(book.log_lines("compile.log").len(), 1);

    book.age_output("chapter_01").expect("age output");
    assert!(bookbuild(&book, &["build"]).success());
    assert_eq!(book.log_lines("compile.log").len(), 2);
}

#[test]
fn build_fails_when_compiler_fails() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.write_tool("compile", "echo 'syntax error' >&2\nexit 1\n")
        .expect("tool");
    book.add_chapter("01", "Chapter one").expect("chapter");

    let status = bookbuild(&book, &["build"]);
    assert_eq!(status.code(), Some(bookbuild::exit_codes::INVALID));
}

#[test]
fn clean_removes_only_generated_pages() {
    let book = FakeBook::new().expect("book");
    book.install_fake_tools().expect("tools");
    book.add_chapter("01", "Chapter one").expect("chapter");
    std::fs::write(book.root().join("cover.html"), "<html></html>").expect("write");

    assert!(bookbuild(&book, &["build"]).success());
    assert!(bookbuild(&book, &["clean"]).success());

    assert!(!book.root().join("chapter_01.html").exists());
    assert!(book.root().join("chapter_01.asciidoc").exists());
    assert!(book.root().join("cover.html").exists());
}
