// Per-tick decision engine
//
// One decision per snapshot: try the food pathfinder first, fall back to the
// layered heuristic ranking over the three candidate directions (straight
// ahead plus the two perpendicular turns). The heading and turn bias are
// threaded explicitly through `decide_move`; the engine holds no state.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::grid::GridModel;
use crate::search::{shortest_first_move_to_food, ReachabilityAnalyzer};
use crate::types::{Coord, Direction, TurnBias};

/// One ranking layer of the heuristic selector. Layers are applied in the
/// configured order as stable sorts, so each layer only refines the ties the
/// earlier layers left.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicLayer {
    /// Prefer landing cells closer to the board center
    CenterDistance,
    /// Prefer landing cells with all three forward neighbors open
    MaximalFreedom,
    /// Prefer the direction preserving the largest reachable region
    ReachableSpace,
    /// Prefer landing cells with fewer enemy heads among forward neighbors
    HeadProximity,
    /// Push landing cells with no open forward neighbor last
    DeadEndAvoidance,
    /// Push directions that are not a legal single-step move last of all
    BaseSafety,
}

impl HeuristicLayer {
    /// The full chain in its canonical order
    pub fn default_chain() -> Vec<HeuristicLayer> {
        vec![
            HeuristicLayer::CenterDistance,
            HeuristicLayer::MaximalFreedom,
            HeuristicLayer::ReachableSpace,
            HeuristicLayer::HeadProximity,
            HeuristicLayer::DeadEndAvoidance,
            HeuristicLayer::BaseSafety,
        ]
    }
}

/// How the committed move was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    FoodPath,
    Heuristic,
}

/// Output of one tick's decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub turn_bias: TurnBias,
    pub source: DecisionSource,
}

/// Precomputed metrics for one candidate direction
#[derive(Debug, Clone)]
struct Candidate {
    direction: Direction,
    center_distance: i32,
    open_moves: usize,
    reachable_size: usize,
    head_threats: usize,
    legal: bool,
}

/// Decides the move for one tick.
///
/// The pathfinder's first move is committed as-is when a food path exists
/// (it lands on a safe cell by construction). Otherwise the heuristic
/// selector ranks the three candidates; committing the bias-side turn flips
/// the bias for the next tick.
pub fn decide_move(
    grid: &GridModel,
    heading: Direction,
    turn_bias: TurnBias,
    config: &Config,
) -> Decision {
    if config.pathfinding.enabled {
        if let Some(direction) = shortest_first_move_to_food(grid, grid.my_head()) {
            return Decision {
                direction,
                turn_bias,
                source: DecisionSource::FoodPath,
            };
        }
    }

    let bias_turn = match turn_bias {
        TurnBias::Left => heading.last(),
        TurnBias::Right => heading.next(),
    };
    let off_bias_turn = match turn_bias {
        TurnBias::Left => heading.next(),
        TurnBias::Right => heading.last(),
    };

    let ranked = rank_candidates(
        grid,
        [heading, bias_turn, off_bias_turn],
        &config.heuristics.layers,
    );

    let committed = ranked[0].direction;
    let new_bias = if committed == bias_turn {
        turn_bias.flipped()
    } else {
        turn_bias
    };

    Decision {
        direction: committed,
        turn_bias: new_bias,
        source: DecisionSource::Heuristic,
    }
}

/// Ranks the candidate directions through the configured layer chain and
/// returns them best-first.
fn rank_candidates(
    grid: &GridModel,
    candidates: [Direction; 3],
    layers: &[HeuristicLayer],
) -> Vec<Candidate> {
    let mut analyzer = ReachabilityAnalyzer::new(grid);
    let mut ranked: Vec<Candidate> = candidates
        .iter()
        .map(|&direction| score_candidate(grid, direction, &mut analyzer))
        .collect();

    for layer in layers {
        match layer {
            HeuristicLayer::CenterDistance => ranked.sort_by_key(|c| c.center_distance),
            HeuristicLayer::MaximalFreedom => {
                ranked.sort_by_key(|c| if c.open_moves == 3 { 0 } else { 1 })
            }
            HeuristicLayer::ReachableSpace => {
                ranked.sort_by_key(|c| std::cmp::Reverse(c.reachable_size))
            }
            HeuristicLayer::HeadProximity => ranked.sort_by_key(|c| c.head_threats),
            HeuristicLayer::DeadEndAvoidance => {
                ranked.sort_by_key(|c| if c.open_moves == 0 { 1 } else { 0 })
            }
            HeuristicLayer::BaseSafety => ranked.sort_by_key(|c| if c.legal { 0 } else { 1 }),
        }
    }
    ranked
}

fn score_candidate(
    grid: &GridModel,
    direction: Direction,
    analyzer: &mut ReachabilityAnalyzer,
) -> Candidate {
    let landing = direction.translate(grid.my_head(), 1);

    Candidate {
        direction,
        center_distance: landing.manhattan_distance_to(grid.center()),
        open_moves: forward_neighbors(landing, direction)
            .iter()
            .filter(|&&pos| grid.is_safe_to_enter(pos))
            .count(),
        reachable_size: analyzer.set_for(landing).len(),
        head_threats: forward_neighbors(landing, direction)
            .iter()
            .filter(|&&pos| grid.heads_of_other_snakes().contains(&pos))
            .count(),
        legal: grid.is_safe_to_enter(landing),
    }
}

/// The three cells one step ahead of a landing cell reached via `direction`:
/// the perpendiculars and straight on. The cell behind is never inspected.
fn forward_neighbors(landing: Coord, direction: Direction) -> [Coord; 3] {
    [
        direction.last().translate(landing, 1),
        direction.translate(landing, 1),
        direction.next().translate(landing, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Map, PlayerId, SnakeInfo};

    fn snake(id: &str, positions: Vec<Coord>) -> SnakeInfo {
        SnakeInfo {
            id: PlayerId(id.to_string()),
            name: id.to_string(),
            alive: true,
            positions,
        }
    }

    fn grid(map: &Map) -> GridModel {
        GridModel::build(map, &PlayerId("me".to_string())).unwrap()
    }

    fn open_map(width: i32, height: i32, my_positions: Vec<Coord>) -> Map {
        Map {
            width,
            height,
            food_positions: vec![],
            obstacle_positions: vec![],
            snake_infos: vec![snake("me", my_positions)],
        }
    }

    #[test]
    fn test_food_path_wins_over_heuristics() {
        let mut map = open_map(10, 10, vec![Coord { x: 5, y: 5 }, Coord { x: 4, y: 5 }]);
        map.food_positions.push(Coord { x: 8, y: 5 });
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        assert_eq!(decision.direction, Direction::Right);
        assert_eq!(decision.source, DecisionSource::FoodPath);
        // Food moves leave the bias untouched
        assert_eq!(decision.turn_bias, TurnBias::Left);
    }

    #[test]
    fn test_heuristic_used_when_no_food() {
        let map = open_map(10, 10, vec![Coord { x: 5, y: 5 }, Coord { x: 4, y: 5 }]);
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        assert_eq!(decision.source, DecisionSource::Heuristic);
    }

    #[test]
    fn test_pathfinding_can_be_disabled() {
        let mut map = open_map(10, 10, vec![Coord { x: 5, y: 5 }, Coord { x: 4, y: 5 }]);
        map.food_positions.push(Coord { x: 8, y: 5 });
        let grid = grid(&map);
        let mut config = Config::default_hardcoded();
        config.pathfinding.enabled = false;

        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        assert_eq!(decision.source, DecisionSource::Heuristic);
    }

    #[test]
    fn test_base_safety_dominates_when_boxed_in() {
        // Head at (5,5), walls on UP, LEFT and DOWN; only RIGHT is legal.
        let mut map = open_map(11, 11, vec![Coord { x: 5, y: 5 }]);
        map.obstacle_positions = vec![
            Coord { x: 5, y: 4 },
            Coord { x: 4, y: 5 },
            Coord { x: 5, y: 6 },
        ];
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        for heading in [Direction::Up, Direction::Down, Direction::Right] {
            for bias in [TurnBias::Left, TurnBias::Right] {
                let decision = decide_move(&grid, heading, bias, &config);
                assert_eq!(
                    decision.direction,
                    Direction::Right,
                    "heading {:?} bias {:?}",
                    heading,
                    bias
                );
            }
        }
    }

    #[test]
    fn test_committed_move_prefers_center() {
        // Head above and right of center (5,5); no food. Landing cells:
        // straight (9,3) is 6 away, Up (8,2) is 6, Down (8,4) is 4. On an
        // otherwise uniform board the center layer alone decides.
        let map = open_map(11, 11, vec![Coord { x: 8, y: 3 }, Coord { x: 7, y: 3 }]);
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        assert_eq!(decision.direction, Direction::Down);
        // Down is the off-bias turn here (bias Left => bias turn is Up), so
        // the bias does not flip.
        assert_eq!(decision.turn_bias, TurnBias::Left);
    }

    #[test]
    fn test_bias_flips_when_bias_turn_committed() {
        // Straight ahead leads out of bounds, so a turn is forced.
        let map = open_map(11, 11, vec![Coord { x: 10, y: 5 }, Coord { x: 9, y: 5 }]);
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        // bias Left with heading Right means the bias turn is Up; both turns
        // tie on every layer here except ranking order, so Up (candidate 1)
        // stays ahead of Down and the bias flips.
        assert_eq!(decision.direction, Direction::Up);
        assert_eq!(decision.turn_bias, TurnBias::Right);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let mut map = open_map(11, 11, vec![Coord { x: 3, y: 3 }, Coord { x: 2, y: 3 }]);
        map.obstacle_positions.push(Coord { x: 3, y: 2 });
        map.snake_infos.push(snake(
            "foe",
            vec![Coord { x: 5, y: 3 }, Coord { x: 6, y: 3 }],
        ));
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        let first = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        let second = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        assert_eq!(first.direction, second.direction);
        assert_eq!(first.turn_bias, second.turn_bias);
    }

    #[test]
    fn test_no_safe_move_still_commits() {
        // Completely boxed in: every candidate is illegal, the least-bad
        // head of the ranking is still returned.
        let mut map = open_map(11, 11, vec![Coord { x: 5, y: 5 }]);
        map.obstacle_positions = vec![
            Coord { x: 5, y: 4 },
            Coord { x: 4, y: 5 },
            Coord { x: 5, y: 6 },
            Coord { x: 6, y: 5 },
        ];
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        let candidates = [Direction::Right, Direction::Up, Direction::Down];
        assert!(candidates.contains(&decision.direction));
    }

    #[test]
    fn test_head_proximity_breaks_reachability_ties() {
        // Two equally open turns, but an enemy head lurks next to the upper
        // landing cell's forward neighbors.
        let mut map = open_map(11, 11, vec![Coord { x: 10, y: 5 }, Coord { x: 9, y: 5 }]);
        map.snake_infos.push(snake(
            "foe",
            vec![Coord { x: 10, y: 3 }, Coord { x: 10, y: 2 }],
        ));
        let grid = grid(&map);
        let config = Config::default_hardcoded();

        // Heading Right at the wall: candidates Up, Down. The enemy head at
        // (10,3) is the forward neighbor of Up's landing cell (10,4).
        let decision = decide_move(&grid, Direction::Right, TurnBias::Left, &config);
        assert_eq!(decision.direction, Direction::Down);
    }
}
