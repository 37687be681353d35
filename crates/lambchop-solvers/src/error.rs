//! Error type shared by the solvers and the CLI.

use thiserror::Error;

use crate::puzzle::Position;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("access code list has {len} entries, expected {min}..={max}")]
    SequenceLength { len: usize, min: usize, max: usize },

    #[error("access code {value} at index {index} is outside {min}..={max}")]
    CodeOutOfRange {
        index: usize,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("map is {width}x{height}, each side must be within {min}..={max}")]
    MapDimensions {
        width: usize,
        height: usize,
        min: usize,
        max: usize,
    },

    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("endpoint ({}, {}) is a wall", .position.x, .position.y)]
    BlockedEndpoint { position: Position },

    /// No route exists even with one wall removed
    #[error("no escape route through the {width}x{height} map, even with one wall removed")]
    Unsolvable { width: usize, height: usize },

    #[error("first worker ID {start} exceeds {max}")]
    StartOutOfRange { start: u64, max: u64 },

    #[error("checkpoint line must hold at least one worker")]
    EmptyLine,

    #[error("last worker ID {} exceeds {max}", .last_id.map_or_else(|| "(overflow)".to_string(), |id| id.to_string()))]
    IdOverflow { last_id: Option<u64>, max: u64 },

    #[error("invalid puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
