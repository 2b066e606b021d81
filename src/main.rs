#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # smartschool
//!
//! Lists your evaluation results from a Smartschool portal.
//!
//! Set `SMARTSCHOOL_URL` to your school's portal and `SMARTSCHOOL_COOKIE` to
//! the `Cookie` header of a logged-in browser session, either in the
//! environment or in a `.env` file next to where you run the command.

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use smartschool::{
    HttpSession, ResultDetail, Results, ResultWithoutDetails,
    report::{detail_table, results_table},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// List all results, optionally as JSON
    Results(bool),
    /// Show the details of one result, optionally as JSON
    Result(bool, String),
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Opts {
    /// Log every request
    verbose: bool,
    /// Command to run
    cmd:     Cmd,
}

/// Parse the command line arguments and return the options
fn options() -> Opts {
    /// parses the JSON output switch
    fn j() -> impl Parser<bool> {
        long("json").help("Print JSON instead of a table").switch()
    }

    /// parses a result identifier
    fn i() -> impl Parser<String> {
        positional("ID").help("Identifier of the result, as printed by `results --json`")
    }

    let results = construct!(Cmd::Results(j()))
        .to_options()
        .command("results")
        .help("List all your results");

    let result = construct!(Cmd::Result(j(), i()))
        .to_options()
        .command("result")
        .help("Show the details of a single result");

    let verbose = short('v')
        .long("verbose")
        .help("Log every request made to the portal")
        .switch();
    let cmd = construct!([results, result]);

    construct!(Opts { verbose, cmd })
        .to_options()
        .descr("Smartschool results from the command line")
        .run()
}

fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();

    let level = if opts.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();

    let session = HttpSession::from_env()?;

    match opts.cmd {
        Cmd::Results(as_json) => {
            let results = Results::new(&session)
                .iter()
                .collect::<Result<Vec<ResultWithoutDetails>, _>>()
                .context("Could not fetch your results")?;
            tracing::info!("Fetched {} results", results.len());

            if as_json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{}", results_table(&results));
            }
        }
        Cmd::Result(as_json, id) => {
            let detail = ResultDetail::new(&session, id.as_str())
                .get()
                .with_context(|| format!("Could not fetch result {id}"))?;

            if as_json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{}", detail_table(&detail));
            }
        }
    };

    Ok(())
}
