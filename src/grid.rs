// Per-tick grid model
//
// Builds a read-only view of one snapshot and answers point queries in O(1)
// via a dense tile vector. One instance is built per tick and discarded.

use std::collections::HashSet;

use crate::types::{Coord, Map, PlayerId};

/// Occupancy classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Food,
    Obstacle,
    SnakeBody,
    SnakeHead,
    OutOfBounds,
}

/// Read-only view of the current tick's board
pub struct GridModel {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    my_head: Coord,
    other_heads: HashSet<Coord>,
    other_tails: HashSet<Coord>,
    food: HashSet<Coord>,
}

impl GridModel {
    /// Builds the grid model from one snapshot.
    ///
    /// A snapshot that does not contain a living snake for `player_id` is a
    /// precondition violation and reported as an error; the decision core
    /// never runs against such input.
    pub fn build(map: &Map, player_id: &PlayerId) -> Result<GridModel, String> {
        let width = map.width;
        let height = map.height;
        if width <= 0 || height <= 0 {
            return Err(format!("Invalid map dimensions {}x{}", width, height));
        }

        let mut tiles = vec![Tile::Empty; (width * height) as usize];
        let index = |c: Coord| (c.y * width + c.x) as usize;
        let in_bounds = |c: Coord| c.x >= 0 && c.x < width && c.y >= 0 && c.y < height;

        for &food in &map.food_positions {
            if in_bounds(food) {
                tiles[index(food)] = Tile::Food;
            }
        }
        for &obstacle in &map.obstacle_positions {
            if in_bounds(obstacle) {
                tiles[index(obstacle)] = Tile::Obstacle;
            }
        }

        let mut other_heads = HashSet::new();
        let mut other_tails = HashSet::new();
        for snake in &map.snake_infos {
            if !snake.alive {
                continue;
            }
            for &segment in snake.positions.iter().skip(1) {
                if in_bounds(segment) {
                    tiles[index(segment)] = Tile::SnakeBody;
                }
            }
            if let Some(head) = snake.head() {
                if in_bounds(head) {
                    tiles[index(head)] = Tile::SnakeHead;
                }
                if snake.id != *player_id {
                    other_heads.insert(head);
                    if let Some(tail) = snake.tail() {
                        other_tails.insert(tail);
                    }
                }
            }
        }

        let my_head = map
            .snake_infos
            .iter()
            .find(|s| s.alive && s.id == *player_id)
            .and_then(|s| s.head())
            .ok_or_else(|| format!("Snake '{}' not found alive in snapshot", player_id.0))?;

        Ok(GridModel {
            width,
            height,
            tiles,
            my_head,
            other_heads,
            other_tails,
            food: map.food_positions.iter().copied().collect(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> Coord {
        Coord { x: self.width / 2, y: self.height / 2 }
    }

    /// Classification of the cell at `pos`
    pub fn tile_at(&self, pos: Coord) -> Tile {
        if pos.x < 0 || pos.x >= self.width || pos.y < 0 || pos.y >= self.height {
            return Tile::OutOfBounds;
        }
        self.tiles[(pos.y * self.width + pos.x) as usize]
    }

    /// Whether the agent may move into `pos` next tick without an immediate
    /// rule-violating collision. Another snake's head cell counts as safe;
    /// head-to-head risk is a ranking penalty, not a hard block. Tail cells
    /// are still occupied this tick and stay unsafe, and so does the agent's
    /// own head cell: the neck occupies it next tick.
    pub fn is_safe_to_enter(&self, pos: Coord) -> bool {
        if pos == self.my_head {
            return false;
        }
        !matches!(
            self.tile_at(pos),
            Tile::OutOfBounds | Tile::Obstacle | Tile::SnakeBody
        )
    }

    /// Heads of all living snakes other than the agent
    pub fn heads_of_other_snakes(&self) -> &HashSet<Coord> {
        &self.other_heads
    }

    /// Tail coordinates of all living snakes other than the agent
    pub fn tails_of_other_snakes(&self) -> &HashSet<Coord> {
        &self.other_tails
    }

    pub fn food_cells(&self) -> &HashSet<Coord> {
        &self.food
    }

    pub fn my_head(&self) -> Coord {
        self.my_head
    }
}
