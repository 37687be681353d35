//! Solvers for three of Commander Lambda's puzzles.
//!
//! - [`access_codes`] counts lucky triples in an access-code list.
//! - [`escape`] finds the shortest route out of the station when one wall may
//!   be removed.
//! - [`checkpoint`] computes the guards' XOR checksum without visiting every
//!   worker ID.
//!
//! Each solver is a pure function over its input; [`Bounds`] validates inputs
//! against the limits the puzzles are stated for.

pub mod access_codes;
pub mod checkpoint;
pub mod error;
pub mod escape;
pub mod pruning;
pub mod puzzle;

// Re-export main types
pub use access_codes::{count_lucky_triples, count_lucky_triples_naive};
pub use checkpoint::{checkpoint_checksum, checkpoint_checksum_naive, row_checksum};
pub use error::PuzzleError;
pub use escape::{
    find_escape_route, shortest_path_with_one_wall_removed, EscapeConfig, EscapeRoute,
};
pub use puzzle::{AccessCodes, Bounds, Cell, Checkpoint, Direction, Position, StationMap};
