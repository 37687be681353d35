//! Candidate selection for the wall-removal search.
//!
//! Removing a wall can only shorten a route if the wall joins at least two
//! open cells. Walls with fewer open neighbours are skipped.

use smallvec::SmallVec;

use crate::puzzle::{Cell, Direction, Position, StationMap};

/// Open cells cardinally adjacent to `position`
pub fn open_neighbors(map: &StationMap, position: Position) -> SmallVec<[Position; 4]> {
    Direction::ALL
        .iter()
        .map(|&direction| position.step(direction))
        .filter(|&next| map.get(next) == Some(Cell::Open))
        .collect()
}

/// Check if removing the wall at `position` could join two open cells
pub fn is_useful_wall(map: &StationMap, position: Position) -> bool {
    map.get(position) == Some(Cell::Wall) && open_neighbors(map, position).len() > 1
}

/// Walls worth removing, in row-major order.
///
/// With `prune` unset every wall is returned.
pub fn candidate_walls(map: &StationMap, prune: bool) -> Vec<Position> {
    let mut walls = Vec::new();
    for (y, row) in map.rows.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if !cell.is_wall() {
                continue;
            }
            let position = Position::new(x as i32, y as i32);
            if !prune || is_useful_wall(map, position) {
                walls.push(position);
            }
        }
    }
    walls
}
