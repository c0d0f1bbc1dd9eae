//! Developer tasks, invoked as `cargo xtask <task>`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Developer tasks for the vitrine workspace")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// The full gate: formatting, lints, tests, and the doc build
    Check,
    /// Verify formatting without rewriting files
    Fmt,
    /// Lint every target with warnings denied
    Clippy,
    /// Run the workspace test suites
    Test,
    /// Build API docs for the workspace crates only
    Doc,
    /// Compile every workspace member
    Build,
}

const FMT: &[&str] = &["fmt", "--all", "--", "--check"];
const CLIPPY: &[&str] = &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"];
const TEST: &[&str] = &["test", "--workspace"];
const DOC: &[&str] = &["doc", "--workspace", "--no-deps"];
const BUILD: &[&str] = &["build", "--workspace"];

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Check => {
            cargo(FMT)?;
            cargo(CLIPPY)?;
            cargo(TEST)?;
            cargo(DOC)?;
        }
        Task::Fmt => cargo(FMT)?,
        Task::Clippy => cargo(CLIPPY)?,
        Task::Test => cargo(TEST)?,
        Task::Doc => cargo(DOC)?,
        Task::Build => cargo(BUILD)?,
    }

    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    anyhow::ensure!(status.success(), "cargo {} failed", args[0]);
    Ok(())
}
