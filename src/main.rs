//! Book build/test harness CLI.
//!
//! Compiles chapter markup into HTML pages through the configured document
//! compiler, and runs per-chapter test files through the configured test
//! runner after syncing the example-source repository. All commands run
//! relative to the current directory (the book root).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bookbuild::build::build_all;
use bookbuild::clean::clean;
use bookbuild::exit_codes;
use bookbuild::io::compiler::CommandCompiler;
use bookbuild::io::config::load_config;
use bookbuild::io::init::{HarnessPaths, InitOptions, init_harness};
use bookbuild::io::sync::ScriptSync;
use bookbuild::io::test_runner::CommandTestRunner;
use bookbuild::logging;
use bookbuild::status::status;
use bookbuild::suite::{SuiteOutcome, test_all, test_chapter};

#[derive(Parser)]
#[command(
    name = "bookbuild",
    version,
    about = "Build and test harness for book chapters"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default `harness.toml` and the `.harness/` directory.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Compile every stale chapter source into its HTML page.
    Build {
        /// Print a machine-readable build report.
        #[arg(long)]
        json: bool,
    },
    /// Build, sync the example-source repository, then run the full suite.
    Test,
    /// Build one chapter, sync, then run exactly that chapter's test file.
    TestChapter {
        /// Chapter number (matches `chapter_N.asciidoc`, padded or not).
        number: u32,
        /// Capture test output to `.harness/logs/` instead of the terminal.
        #[arg(long)]
        silent: bool,
    },
    /// Remove generated HTML pages; sources are untouched.
    Clean,
    /// Report page freshness and test-file presence per source.
    Status {
        /// Print a machine-readable status report.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve book root")?;
    let paths = HarnessPaths::new(&root);

    match cli.command {
        Command::Init { force } => {
            init_harness(&root, &InitOptions { force })?;
            Ok(exit_codes::OK)
        }
        Command::Build { json } => {
            let cfg = load_config(&paths.config_path)?;
            let compiler = CommandCompiler::from_config(&cfg.compiler);
            let report = build_all(&root, &compiler)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for stem in &report.built {
                    println!("built {stem}.html");
                }
                println!(
                    "{} built, {} up to date",
                    report.built.len(),
                    report.skipped.len()
                );
            }
            Ok(exit_codes::OK)
        }
        Command::Test => {
            let cfg = load_config(&paths.config_path)?;
            let outcome = test_all(
                &root,
                &CommandCompiler::from_config(&cfg.compiler),
                &ScriptSync::from_config(&cfg.sync),
                &CommandTestRunner::from_config(&cfg.tests),
            )?;
            Ok(suite_exit_code(outcome))
        }
        Command::TestChapter { number, silent } => {
            let cfg = load_config(&paths.config_path)?;
            let outcome = test_chapter(
                &root,
                &CommandCompiler::from_config(&cfg.compiler),
                &ScriptSync::from_config(&cfg.sync),
                &CommandTestRunner::from_config(&cfg.tests),
                number,
                silent,
            )?;
            Ok(suite_exit_code(outcome))
        }
        Command::Clean => {
            let removed = clean(&root)?;
            for page in &removed {
                println!("removed {page}");
            }
            println!("{} pages removed", removed.len());
            Ok(exit_codes::OK)
        }
        Command::Status { json } => {
            let report = status(&root)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for doc in &report {
                    let page = if doc.fresh { "fresh" } else { "stale" };
                    let test = if doc.has_test { "test" } else { "-" };
                    println!("{:<24} {:<6} {}", doc.stem, page, test);
                }
            }
            Ok(exit_codes::OK)
        }
    }
}

fn suite_exit_code(outcome: SuiteOutcome) -> i32 {
    match outcome {
        SuiteOutcome::Passed => exit_codes::OK,
        SuiteOutcome::SyncFailed => exit_codes::SYNC_FAILED,
        SuiteOutcome::TestsFailed => exit_codes::TESTS_FAILED,
    }
}
