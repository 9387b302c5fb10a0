// Wire types for the snake game snapshot protocol, plus the direction
// algebra the decision engine is built on.

use serde::{Deserialize, Serialize};

/// 2D coordinate on the board. x grows rightward, y grows downward.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Manhattan distance between two coordinates
    pub fn manhattan_distance_to(&self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Translates a coordinate `steps` cells in this direction.
    /// No bounds checking; the grid model validates bounds downstream.
    pub fn translate(&self, pos: Coord, steps: i32) -> Coord {
        match self {
            Direction::Left => Coord { x: pos.x - steps, y: pos.y },
            Direction::Right => Coord { x: pos.x + steps, y: pos.y },
            Direction::Up => Coord { x: pos.x, y: pos.y - steps },
            Direction::Down => Coord { x: pos.x, y: pos.y + steps },
        }
    }

    /// The direction 90 degrees clockwise of this one
    pub fn next(&self) -> Direction {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
        }
    }

    /// The direction 90 degrees counter-clockwise of this one
    pub fn last(&self) -> Direction {
        match self {
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
        }
    }
}

/// Which perpendicular turn the agent currently prefers when it has to leave
/// its heading. One bit of cross-tick memory used to dampen oscillation.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnBias {
    Left,
    Right,
}

impl TurnBias {
    pub fn flipped(&self) -> TurnBias {
        match self {
            TurnBias::Left => TurnBias::Right,
            TurnBias::Right => TurnBias::Left,
        }
    }
}

/// Typed player identifier. Snake identity comparisons go through this type
/// rather than raw string equality at call sites.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PlayerId(pub String);

/// One snake as reported in the snapshot. Index 0 of `positions` is the
/// head, the last index is the tail.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SnakeInfo {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
    pub positions: Vec<Coord>,
}

impl SnakeInfo {
    pub fn head(&self) -> Option<Coord> {
        self.positions.first().copied()
    }

    pub fn tail(&self) -> Option<Coord> {
        self.positions.last().copied()
    }
}

/// Board state for one tick: dimensions, food, obstacles, and all snakes
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub food_positions: Vec<Coord>,
    pub obstacle_positions: Vec<Coord>,
    pub snake_infos: Vec<SnakeInfo>,
}

impl Map {
    pub fn center(&self) -> Coord {
        Coord { x: self.width / 2, y: self.height / 2 }
    }
}

/// Complete per-tick game state received from the server
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game_id: String,
    pub game_tick: i32,
    pub player_id: PlayerId,
    pub map: Map,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_clockwise_cycle() {
        assert_eq!(Direction::Left.next(), Direction::Up);
        assert_eq!(Direction::Up.next(), Direction::Right);
        assert_eq!(Direction::Right.next(), Direction::Down);
        assert_eq!(Direction::Down.next(), Direction::Left);
    }

    #[test]
    fn test_last_inverts_next() {
        for dir in Direction::all() {
            assert_eq!(dir.next().last(), dir, "last(next({:?}))", dir);
            assert_eq!(dir.last().next(), dir, "next(last({:?}))", dir);
        }
    }

    #[test]
    fn test_translate_axes() {
        let origin = Coord { x: 4, y: 7 };
        assert_eq!(Direction::Left.translate(origin, 2), Coord { x: 2, y: 7 });
        assert_eq!(Direction::Right.translate(origin, 2), Coord { x: 6, y: 7 });
        // y grows downward: Up subtracts, Down adds
        assert_eq!(Direction::Up.translate(origin, 3), Coord { x: 4, y: 4 });
        assert_eq!(Direction::Down.translate(origin, 3), Coord { x: 4, y: 10 });
    }

    #[test]
    fn test_translate_does_not_clamp() {
        let corner = Coord { x: 0, y: 0 };
        assert_eq!(Direction::Left.translate(corner, 1), Coord { x: -1, y: 0 });
        assert_eq!(Direction::Up.translate(corner, 5), Coord { x: 0, y: -5 });
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Coord { x: 1, y: 2 };
        let b = Coord { x: 4, y: -2 };
        assert_eq!(a.manhattan_distance_to(b), 7);
        assert_eq!(b.manhattan_distance_to(a), 7);
        assert_eq!(a.manhattan_distance_to(a), 0);
    }

    #[test]
    fn test_turn_bias_flips() {
        assert_eq!(TurnBias::Left.flipped(), TurnBias::Right);
        assert_eq!(TurnBias::Right.flipped(), TurnBias::Left);
    }
}
