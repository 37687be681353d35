//! Puzzle input types and their limits.
//!
//! These types deserialize directly from the JSON the CLI accepts: a map is a
//! matrix of `0`/`1`, access codes are a flat list of integers.

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// A single cell of a station map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    Open,
    Wall,
}

impl Cell {
    pub fn is_open(self) -> bool {
        self == Cell::Open
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Open),
            1 => Ok(Cell::Wall),
            other => Err(format!("cell must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Open => 0,
            Cell::Wall => 1,
        }
    }
}

/// Cardinal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Position on the map. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Position) -> usize {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as usize
    }
}

/// A station map: rows of open space and walls.
///
/// The prison door is the top-left cell, the escape pod the bottom-right one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationMap {
    pub rows: Vec<Vec<Cell>>,
}

impl StationMap {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a map from a `0`/`1` matrix. Any non-zero value is a wall.
    pub fn from_bits(rows: Vec<Vec<u8>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|bit| if bit == 0 { Cell::Open } else { Cell::Wall })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn start(&self) -> Position {
        Position::new(0, 0)
    }

    pub fn goal(&self) -> Position {
        Position::new(self.width() as i32 - 1, self.height() as i32 - 1)
    }

    /// Get the cell at a position (bounds-checked)
    pub fn get(&self, position: Position) -> Option<Cell> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.rows
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    pub fn count_walls(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_wall())
            .count()
    }
}

/// The list of codes from one of Commander Lambda's daily reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessCodes {
    pub codes: Vec<u32>,
}

/// The security checkpoint: first worker ID and line length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub start: u64,
    pub length: u64,
}

impl Checkpoint {
    pub fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// ID of the last worker standing in the queue, checked or not.
    /// `None` for an empty line or on overflow.
    pub fn last_worker_id(&self) -> Option<u64> {
        self.length
            .checked_mul(self.length)?
            .checked_add(self.start)?
            .checked_sub(1)
    }
}

/// Input limits the puzzles are stated for
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min_codes: usize,
    pub max_codes: usize,
    pub min_code: u32,
    pub max_code: u32,
    pub min_side: usize,
    pub max_side: usize,
    pub max_worker_id: u64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_codes: 2,
            max_codes: 2000,
            min_code: 1,
            max_code: 999_999,
            min_side: 2,
            max_side: 20,
            max_worker_id: 2_000_000_000,
        }
    }
}

impl Bounds {
    pub fn check_codes(&self, codes: &[u32]) -> Result<(), PuzzleError> {
        if codes.len() < self.min_codes || codes.len() > self.max_codes {
            return Err(PuzzleError::SequenceLength {
                len: codes.len(),
                min: self.min_codes,
                max: self.max_codes,
            });
        }
        if let Some((index, &value)) = codes
            .iter()
            .enumerate()
            .find(|&(_, &code)| code < self.min_code || code > self.max_code)
        {
            return Err(PuzzleError::CodeOutOfRange {
                index,
                value,
                min: self.min_code,
                max: self.max_code,
            });
        }
        Ok(())
    }

    pub fn check_map(&self, map: &StationMap) -> Result<(), PuzzleError> {
        let (width, height) = (map.width(), map.height());
        let sides = self.min_side..=self.max_side;
        if !sides.contains(&width) || !sides.contains(&height) {
            return Err(PuzzleError::MapDimensions {
                width,
                height,
                min: self.min_side,
                max: self.max_side,
            });
        }
        if let Some((row, cells)) = map
            .rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != width)
        {
            return Err(PuzzleError::RaggedMap {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        for position in [map.start(), map.goal()] {
            if !map.get(position).is_some_and(Cell::is_open) {
                return Err(PuzzleError::BlockedEndpoint { position });
            }
        }
        Ok(())
    }

    pub fn check_checkpoint(&self, checkpoint: &Checkpoint) -> Result<(), PuzzleError> {
        if checkpoint.start > self.max_worker_id {
            return Err(PuzzleError::StartOutOfRange {
                start: checkpoint.start,
                max: self.max_worker_id,
            });
        }
        if checkpoint.length == 0 {
            return Err(PuzzleError::EmptyLine);
        }
        match checkpoint.last_worker_id() {
            Some(last_id) if last_id <= self.max_worker_id => Ok(()),
            last_id => Err(PuzzleError::IdOverflow {
                last_id,
                max: self.max_worker_id,
            }),
        }
    }
}
