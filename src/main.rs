#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # oop-grader
//!
//! Grades Java programming assignments from the command line.
//!
//! ```text
//! oop-grader grade pa2 ./submissions
//! oop-grader list
//! oop-grader inspect LoanAccount.java
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use bpaf::*;
use dotenvy::dotenv;
use oop_grader::{
    assignments, config,
    grade::{
        Grader,
        report::{ReportOptions, render_result, render_summary},
    },
    java::{JavaToolchain, SourceFile},
    submissions,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade every submission under a path
    Grade {
        /// print results as JSON
        json:       bool,
        /// include source, compiler output, and debug logs
        verbose:    bool,
        /// leave out the expected/actual diff
        no_diff:    bool,
        /// run limit in seconds, overriding the environment
        timeout:    Option<u64>,
        /// assignment id, e.g. `pa1`
        assignment: String,
        /// a `.java` file or a directory of submissions
        path:       PathBuf,
    },
    /// List registered assignments
    List,
    /// Print the facts extracted from one file
    Inspect(PathBuf),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let json = long("json").help("Print results as JSON").switch();
    let verbose = short('v')
        .long("verbose")
        .help("Include source code and compiler output")
        .switch();
    let no_diff = long("no-diff")
        .help("Do not show a diff of expected and actual output")
        .switch();
    let timeout = long("timeout")
        .help("Seconds each submission may run before it is killed")
        .argument::<u64>("SECS")
        .optional();
    let assignment = positional::<String>("ASSIGNMENT").help("Assignment id, e.g. pa1");
    let path = positional::<PathBuf>("PATH").help("A .java file or a directory of submissions");

    let grade = construct!(Cmd::Grade {
        json,
        verbose,
        no_diff,
        timeout,
        assignment,
        path
    })
    .to_options()
    .command("grade")
    .help("Grade submissions for an assignment");

    let list = pure(Cmd::List)
        .to_options()
        .command("list")
        .help("List available assignments");

    let file = positional::<PathBuf>("FILE").help("Java file to inspect");
    let inspect = construct!(Cmd::Inspect(file))
        .to_options()
        .command("inspect")
        .help("Print the structure extracted from a Java file as JSON");

    let cmd = construct!([grade, list, inspect]);

    cmd.to_options()
        .descr("Autograder for object-oriented Java assignments")
        .run()
}

/// Installs the log subscriber, at DEBUG when `verbose`.
fn init_logging(verbose: bool) {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();
}

/// Grades every submission under `path` and prints the results.
async fn grade(
    assignment: &str,
    path: &Path,
    json: bool,
    options: ReportOptions,
) -> Result<()> {
    let Some(assignment) = assignments::lookup(assignment) else {
        let known: Vec<&str> = assignments::list().iter().map(|a| a.id()).collect();
        bail!("Unknown assignment `{assignment}` (known: {})", known.join(", "));
    };

    let found = submissions::discover(path)?;
    if found.is_empty() {
        bail!("No submissions found under {}", path.display());
    }
    tracing::info!("Grading {} submission(s) for {}", found.len(), assignment.title());

    let grader = Grader::from_config(assignment, JavaToolchain::from_config());
    let mut results = Vec::with_capacity(found.len());
    for entry in &found {
        results.push(grader.grade_discovered(entry).await);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("Could not serialize results")?
        );
        return Ok(());
    }

    for result in &results {
        println!("{}", render_result(result, options));
    }
    if results.len() > 1 {
        print!("{}", render_summary(&results));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cmd = options();
    let verbose = matches!(cmd, Cmd::Grade { verbose: true, .. });
    init_logging(verbose);

    match cmd {
        Cmd::Grade {
            json,
            verbose,
            no_diff,
            timeout,
            assignment,
            path,
        } => {
            if let Some(secs) = timeout {
                let state = (*config::get()).clone();
                config::install(state.with_java_timeout(Duration::from_secs(secs)))?;
            }
            let options = ReportOptions {
                verbose,
                show_diff: !no_diff,
            };
            grade(&assignment, &path, json, options).await?;
        }
        Cmd::List => {
            for assignment in assignments::list() {
                println!("{:<6}{}", assignment.id(), assignment.title());
            }
        }
        Cmd::Inspect(path) => {
            let file = SourceFile::read(&path)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&file.facts().report())
                    .context("Could not serialize facts")?
            );
        }
    };

    Ok(())
}
