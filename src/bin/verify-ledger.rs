use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::error;

use vote_ledger::ledger::{find_tampered_entries, load_entries_from_file, validate_entries};

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("verify-ledger")
        .version("0.1.0")
        .about("Verify the integrity of an exported vote ledger")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Ledger export: the chain endpoint's JSON or a bare array of entries")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("List every entry and every tampered index"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress output except errors"),
        )
        .get_matches();

    let path = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .unwrap_or_default();
    let verbose = matches.get_flag("verbose");
    let quiet = matches.get_flag("quiet");

    // Set log level based on flags
    let level = if quiet {
        tracing::Level::ERROR
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let entries = load_entries_from_file(&path)?;
    let report = validate_entries(&entries);

    if verbose {
        for entry in &entries {
            println!("{}", entry.summary());
        }

        let tampered = find_tampered_entries(&entries);
        if !tampered.is_empty() {
            println!("Entries with altered content: {:?}", tampered);
        }
    }

    if !report.valid {
        error!("{}", report.summary());
        std::process::exit(1);
    }

    if !quiet {
        println!("✓ {}", report.summary());
    }

    Ok(())
}
