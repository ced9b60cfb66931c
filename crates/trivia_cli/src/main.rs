//! Command-line front end for the trivia catalog.
//!
//! # Responsibility
//! - Turn one `<METHOD> <PATH> [--body JSON]` invocation into an `ApiRequest`.
//! - Print the JSON envelope on stdout and exit non-zero for non-2xx status.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use trivia_core::db::open_db;
use trivia_core::{
    default_log_level, init_logging, ApiRequest, ApiResponse, Method, TriviaApi,
};

#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(version)]
#[command(about = "Query and edit a trivia question catalog", long_about = None)]
struct Args {
    /// Request verb (GET, POST, DELETE, ...)
    method: Method,

    /// Request path with optional query, e.g. /questions?page=2
    path: String,

    /// JSON request body
    #[arg(long)]
    body: Option<String>,

    /// SQLite database file
    #[arg(long, env = "TRIVIA_DB", default_value = "trivia.sqlite3")]
    db: PathBuf,

    /// Seed for quiz selection; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = default_log_level())]
    log_level: String,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()
                .context("resolving current directory")?
                .join(log_dir)
        };
        init_logging(&args.log_level, &log_dir.to_string_lossy())
            .context("initializing logging")?;
    }

    let response = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    info!(
        "event=cli_exit module=cli status={} seeded={}",
        response.status,
        args.seed.is_some()
    );

    Ok(exit_code(&response))
}

/// Opens the store named by `args` and runs one request through it.
fn run(args: &Args) -> Result<ApiResponse> {
    let mut request = ApiRequest::new(args.method, args.path.as_str());
    if let Some(raw) = &args.body {
        let body: Value = serde_json::from_str(raw).context("parsing --body as JSON")?;
        request = request.with_body(body);
    }

    let conn = open_db(&args.db)
        .with_context(|| format!("opening database {}", args.db.display()))?;
    let api = TriviaApi::try_new(&conn).context("preparing repositories")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(api.handle(&request, &mut rng))
}

fn exit_code(response: &ApiResponse) -> ExitCode {
    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
