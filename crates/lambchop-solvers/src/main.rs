//! CLI entry point for the puzzle solvers.
//!
//! Usage:
//!   lambchop access-codes <codes.json> [--naive] [--unchecked]
//!   lambchop escape <map.json> [--no-prune] [--no-early-exit] [--unchecked]
//!   lambchop checksum <start> <length> [--naive] [--unchecked]
//!
//! `access-codes` and `escape` read from stdin with `--stdin`. Results are
//! printed as JSON; set `RUST_LOG=debug` for search progress on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use serde::{Deserialize, Serialize};

use lambchop_solvers::{
    checkpoint_checksum, checkpoint_checksum_naive, count_lucky_triples,
    count_lucky_triples_naive, find_escape_route, AccessCodes, Bounds, Checkpoint, EscapeConfig,
    PuzzleError, StationMap,
};

#[derive(Parser)]
#[command(name = "lambchop")]
#[command(about = "Solvers for the access-code, bunny-escape and checkpoint puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count lucky triples in an access-code list
    AccessCodes {
        /// Path to a JSON list of codes (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read codes from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Use the cubic reference count
        #[arg(long)]
        naive: bool,

        /// Skip input bound checks
        #[arg(long)]
        unchecked: bool,
    },

    /// Find the shortest escape route with at most one wall removed
    Escape {
        /// Path to a JSON matrix of 0/1 cells (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the map from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Try every wall, not only walls joining two open cells
        #[arg(long)]
        no_prune: bool,

        /// Keep searching after a route of Manhattan length is found
        #[arg(long)]
        no_early_exit: bool,

        /// Skip input bound checks
        #[arg(long)]
        unchecked: bool,
    },

    /// Compute the checkpoint checksum
    Checksum {
        /// ID of the first worker in line
        start: u64,

        /// Number of workers the line holds
        length: u64,

        /// XOR every ID instead of using the closed form
        #[arg(long)]
        naive: bool,

        /// Skip input bound checks
        #[arg(long)]
        unchecked: bool,
    },
}

/// Access codes, bare or as `{"codes": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum CodesInput {
    Wrapped { codes: AccessCodes },
    Bare(AccessCodes),
}

/// Station map, bare or as `{"map": [[...]]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum MapInput {
    Wrapped { map: StationMap },
    Bare(StationMap),
}

#[derive(Debug, Serialize)]
struct TriplesOutput {
    triples: u64,
}

#[derive(Debug, Serialize)]
struct ChecksumOutput {
    checksum: u64,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), PuzzleError> {
    let bounds = Bounds::default();

    let json = match command {
        Commands::AccessCodes {
            file,
            stdin,
            naive,
            unchecked,
        } => {
            let codes = match serde_json::from_str::<CodesInput>(&read_input(file, stdin)?)? {
                CodesInput::Wrapped { codes } | CodesInput::Bare(codes) => codes.codes,
            };
            if !unchecked {
                bounds.check_codes(&codes)?;
            }
            info!("counting lucky triples in {} codes", codes.len());

            let triples = if naive {
                count_lucky_triples_naive(&codes)
            } else {
                count_lucky_triples(&codes)
            };
            serde_json::to_string_pretty(&TriplesOutput { triples })?
        }

        Commands::Escape {
            file,
            stdin,
            no_prune,
            no_early_exit,
            unchecked,
        } => {
            let map = match serde_json::from_str::<MapInput>(&read_input(file, stdin)?)? {
                MapInput::Wrapped { map } | MapInput::Bare(map) => map,
            };
            if !unchecked {
                bounds.check_map(&map)?;
            }
            info!("searching {}x{} map", map.width(), map.height());

            let config = EscapeConfig {
                prune_walls: !no_prune,
                stop_at_manhattan: !no_early_exit,
            };
            let route = find_escape_route(&map, &config)?;
            serde_json::to_string_pretty(&route)?
        }

        Commands::Checksum {
            start,
            length,
            naive,
            unchecked,
        } => {
            if !unchecked {
                bounds.check_checkpoint(&Checkpoint::new(start, length))?;
            }
            info!("checksumming line of {} from {}", length, start);

            let checksum = if naive {
                checkpoint_checksum_naive(start, length)
            } else {
                checkpoint_checksum(start, length)
            }
            .ok_or(PuzzleError::IdOverflow {
                last_id: None,
                max: u64::MAX,
            })?;
            serde_json::to_string_pretty(&ChecksumOutput { checksum })?
        }
    };

    println!("{}", json);
    Ok(())
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> Result<String, PuzzleError> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        Ok(fs::read_to_string(&path)?)
    } else {
        Err(PuzzleError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "must provide either a file path or --stdin",
        )))
    }
}
