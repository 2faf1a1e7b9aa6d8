//! Demo data loader.
//!
//! # Responsibility
//! - Seed the database with three demo events and their weekly workshops.
//! - Optionally delete every existing event and workshop first (`--clean`).
//!
//! Exit status is SUCCESS only when the seeding transaction committed.

use anyhow::{bail, Context};
use log::error;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use volunteer_core::db::open_db;
use volunteer_core::{init_logging, init_stderr_logging, AppConfig, EventService};

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    clean: bool,
    database: Option<PathBuf>,
    help: bool,
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!();
            print_help();
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => {
            println!("Loaded.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=load_dummy_data module=cli status=error error={err:#}");
            eprintln!("Loading failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(path) = &args.database {
        config.database_path = path.clone();
    }

    let logging = match &config.log_dir {
        Some(dir) => init_logging(&config.log_level, dir),
        None => init_stderr_logging(&config.log_level),
    };
    logging.context("failed to initialize logging")?;

    let scheduler = config.scheduler()?;
    let mut conn = open_db(&config.database_path).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database_path.display()
        )
    })?;

    let mut service = EventService::new(&mut conn, scheduler);
    service
        .seed_demo_data(args.clean)
        .context("failed to load dummy data")?;
    Ok(())
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut raw = raw.into_iter();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--clean" => args.clean = true,
            "--database" => match raw.next() {
                Some(path) => args.database = Some(PathBuf::from(path)),
                None => bail!("--database requires a path"),
            },
            "-h" | "--help" => args.help = true,
            unknown => bail!("Unknown argument: {unknown}"),
        }
    }
    Ok(args)
}

fn print_help() {
    println!("Load dummy event and workshop objects into the database");
    println!();
    println!("USAGE:");
    println!("    load_dummy_data [--clean] [--database <PATH>]");
    println!();
    println!("OPTIONS:");
    println!("    --clean            Delete existing data before adding dummy data");
    println!("    --database <PATH>  SQLite file (overrides VOLUNTEER_DATABASE)");
    println!("    -h, --help         Print this help");
}
