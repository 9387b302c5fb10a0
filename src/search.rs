// Grid searches: flood-fill reachability and the food pathfinder.
//
// Both allocate tick-scoped working sets only; nothing here survives past a
// single decision.

use std::collections::HashSet;
use std::rc::Rc;

use crate::grid::GridModel;
use crate::types::{Coord, Direction};

/// Fixed neighbor enumeration order. Equidistant-food ties in the pathfinder
/// resolve by this order, which makes results reproducible.
pub const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Flood fill from `seed` over cells that are safe to enter.
///
/// The seed is always a member of the result, whether or not it is itself
/// safe: the set answers "how much space would I have standing here".
pub fn reachable_from(grid: &GridModel, seed: Coord) -> HashSet<Coord> {
    let mut reachable = HashSet::new();
    reachable.insert(seed);

    let mut frontier = vec![seed];
    while let Some(pos) = frontier.pop() {
        for dir in NEIGHBOR_ORDER {
            let neighbor = dir.translate(pos, 1);
            if !reachable.contains(&neighbor) && grid.is_safe_to_enter(neighbor) {
                reachable.insert(neighbor);
                frontier.push(neighbor);
            }
        }
    }
    reachable
}

/// Tick-scoped cache of reachable sets, one per candidate landing cell.
///
/// Candidate directions often collapse into the same open region; when a
/// landing cell is already contained in an earlier set, that set is reused
/// instead of re-running the fill.
pub struct ReachabilityAnalyzer<'a> {
    grid: &'a GridModel,
    sets: Vec<Rc<HashSet<Coord>>>,
}

impl<'a> ReachabilityAnalyzer<'a> {
    pub fn new(grid: &'a GridModel) -> Self {
        ReachabilityAnalyzer { grid, sets: Vec::new() }
    }

    /// Reachable set for `landing`, reusing any previously computed set that
    /// already contains it.
    pub fn set_for(&mut self, landing: Coord) -> Rc<HashSet<Coord>> {
        for set in &self.sets {
            if set.contains(&landing) {
                return Rc::clone(set);
            }
        }
        let set = Rc::new(reachable_from(self.grid, landing));
        self.sets.push(Rc::clone(&set));
        set
    }
}

/// Layered BFS from `start` toward the nearest food cell, returning the
/// first move of the shortest path, or None when no food is reachable.
///
/// Each frontier coordinate carries only the first move that reached it; the
/// search stops the instant a generated coordinate is food. Expansion
/// excludes coordinates present in the immediately preceding layer rather
/// than the full visited history. That narrower exclusion admits 2-cycles,
/// so the layer count is capped at width*height (no shortest path can be
/// longer) to guarantee termination on foodless boards.
pub fn shortest_first_move_to_food(grid: &GridModel, start: Coord) -> Option<Direction> {
    let food = grid.food_cells();
    if food.is_empty() {
        return None;
    }

    // Layer 1: the start's own neighbors, each recording its move.
    let mut frontier: Vec<(Coord, Direction)> = Vec::new();
    let mut frontier_set: HashSet<Coord> = HashSet::new();
    for dir in NEIGHBOR_ORDER {
        let neighbor = dir.translate(start, 1);
        if !grid.is_safe_to_enter(neighbor) {
            continue;
        }
        if food.contains(&neighbor) {
            return Some(dir);
        }
        if frontier_set.insert(neighbor) {
            frontier.push((neighbor, dir));
        }
    }

    let max_layers = (grid.width() * grid.height()) as usize;
    for _ in 1..max_layers {
        if frontier.is_empty() {
            return None;
        }

        let mut next: Vec<(Coord, Direction)> = Vec::new();
        let mut next_set: HashSet<Coord> = HashSet::new();
        for &(pos, first_move) in &frontier {
            for dir in NEIGHBOR_ORDER {
                let neighbor = dir.translate(pos, 1);
                if frontier_set.contains(&neighbor) || next_set.contains(&neighbor) {
                    continue;
                }
                if !grid.is_safe_to_enter(neighbor) {
                    continue;
                }
                if food.contains(&neighbor) {
                    return Some(first_move);
                }
                next_set.insert(neighbor);
                next.push((neighbor, first_move));
            }
        }

        frontier = next;
        frontier_set = next_set;
    }

    None
}
