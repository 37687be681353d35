//! Shortest escape route search with at most one wall removed.
//!
//! The search runs a breadth-first pass over the map as given, then repeats it
//! once per candidate wall on a working copy where that wall is opened. Each
//! trial restores the wall before the next one starts, so the working copy
//! always matches the caller's map between trials.

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::pruning::{candidate_walls, open_neighbors};
use crate::puzzle::{Cell, Position, StationMap};

/// Configuration for the route search
#[derive(Debug, Clone)]
pub struct EscapeConfig {
    /// Only try walls that join at least two open cells
    pub prune_walls: bool,
    /// Stop once a route as short as the Manhattan distance is found
    pub stop_at_manhattan: bool,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            prune_walls: true,
            stop_at_manhattan: true,
        }
    }
}

/// Best route found by the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapeRoute {
    /// Number of cells on the route, counting both doors
    pub length: usize,
    /// Cells from the prison door to the escape pod
    pub path: Vec<Position>,
    /// Wall opened to produce this route, if any
    pub removed_wall: Option<Position>,
    /// Breadth-first searches run, including the one on the unmodified map
    pub trials: usize,
}

/// Discovery record for a visited cell
#[derive(Debug, Clone, Copy)]
struct Visit {
    /// Cells on the shortest route to here, inclusive
    nodes: usize,
    parent: Option<Position>,
}

/// Breadth-first search from `start` to `goal` through open cells.
///
/// Returns the cells of a shortest route, or `None` if the goal is unreachable.
pub fn shortest_route(map: &StationMap, start: Position, goal: Position) -> Option<Vec<Position>> {
    if map.get(start) != Some(Cell::Open) {
        return None;
    }

    let mut visited: HashMap<Position, Visit> = HashMap::new();
    visited.insert(
        start,
        Visit {
            nodes: 1,
            parent: None,
        },
    );
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(trace_back(&visited, goal));
        }
        let nodes = visited[&current].nodes + 1;
        for next in open_neighbors(map, current) {
            if visited.contains_key(&next) {
                continue;
            }
            visited.insert(
                next,
                Visit {
                    nodes,
                    parent: Some(current),
                },
            );
            queue.push_back(next);
        }
    }

    None
}

fn trace_back(visited: &HashMap<Position, Visit>, goal: Position) -> Vec<Position> {
    let mut path = Vec::with_capacity(visited.get(&goal).map_or(0, |visit| visit.nodes));
    let mut current = Some(goal);
    while let Some(position) = current {
        path.push(position);
        current = visited.get(&position).and_then(|visit| visit.parent);
    }
    path.reverse();
    path
}

fn set_cell(map: &mut StationMap, position: Position, cell: Cell) {
    if position.x < 0 || position.y < 0 {
        return;
    }
    if let Some(slot) = map
        .rows
        .get_mut(position.y as usize)
        .and_then(|row| row.get_mut(position.x as usize))
    {
        *slot = cell;
    }
}

/// Find the shortest escape route, opening at most one wall.
pub fn find_escape_route(
    map: &StationMap,
    config: &EscapeConfig,
) -> Result<EscapeRoute, PuzzleError> {
    let start = map.start();
    let goal = map.goal();
    // Fewest cells any route can have
    let floor = start.manhattan_distance(goal) + 1;

    let mut working = map.clone();
    let mut trials = 1;
    let mut best: Option<(Vec<Position>, Option<Position>)> =
        shortest_route(&working, start, goal).map(|path| (path, None));
    match &best {
        Some((path, _)) => debug!("unmodified map: route of {} cells", path.len()),
        None => debug!("unmodified map: no route"),
    }

    let walls = candidate_walls(map, config.prune_walls);
    debug!(
        "{} candidate walls of {} (pruning {})",
        walls.len(),
        map.count_walls(),
        if config.prune_walls { "on" } else { "off" }
    );

    for wall in walls {
        if config.stop_at_manhattan && best.as_ref().is_some_and(|(path, _)| path.len() <= floor) {
            debug!("route matches Manhattan distance, stopping after {} trials", trials);
            break;
        }

        set_cell(&mut working, wall, Cell::Open);
        let route = shortest_route(&working, start, goal);
        set_cell(&mut working, wall, Cell::Wall);
        trials += 1;

        let Some(path) = route else {
            trace!("wall ({}, {}): no route", wall.x, wall.y);
            continue;
        };
        trace!("wall ({}, {}): route of {} cells", wall.x, wall.y, path.len());
        if best.as_ref().map_or(true, |(current, _)| path.len() < current.len()) {
            debug!(
                "opening wall ({}, {}) gives a route of {} cells",
                wall.x,
                wall.y,
                path.len()
            );
            best = Some((path, Some(wall)));
        }
    }

    debug_assert_eq!(&working, map, "working map was not restored");

    match best {
        Some((path, removed_wall)) => Ok(EscapeRoute {
            length: path.len(),
            path,
            removed_wall,
            trials,
        }),
        None => Err(PuzzleError::Unsolvable {
            width: map.width(),
            height: map.height(),
        }),
    }
}

/// Length in cells of the shortest escape route with at most one wall removed.
pub fn shortest_path_with_one_wall_removed(map: &StationMap) -> Result<usize, PuzzleError> {
    find_escape_route(map, &EscapeConfig::default()).map(|route| route.length)
}
