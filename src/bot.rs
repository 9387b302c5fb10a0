// Bot facade over the decision engine
//
// Exposes methods corresponding to the HTTP endpoints and owns the only
// cross-tick state the agent has: per-game heading and turn bias. The
// decision itself is a pure function in the engine module.

use log::info;
use parking_lot::Mutex;
use rand::Rng;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine::{decide_move, DecisionSource};
use crate::grid::GridModel;
use crate::types::{Direction, GameState, TurnBias};

/// Cross-tick agent memory for one game: the last committed heading and the
/// currently preferred perpendicular turn.
#[derive(Debug, Clone, Copy)]
pub struct AgentMemory {
    pub heading: Direction,
    pub turn_bias: TurnBias,
}

impl AgentMemory {
    /// Fresh memory for a new game: a uniformly random heading, left bias.
    fn seeded() -> Self {
        let idx = rand::rng().random_range(0..4);
        AgentMemory {
            heading: Direction::all()[idx],
            turn_bias: TurnBias::Left,
        }
    }
}

/// The bot instance held in server managed state
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
    memory: Mutex<HashMap<String, AgentMemory>>,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
            memory: Mutex::new(HashMap::new()),
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "name": self.config.server.snake_name,
            "author": self.config.server.author,
            "color": self.config.server.color,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!("GAME START: {}", state.game_id);
        self.memory
            .lock()
            .insert(state.game_id.clone(), AgentMemory::seeded());
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        self.memory.lock().remove(&state.game_id);
        info!("GAME OVER: {}", state.game_id);
    }

    /// Computes the move for one tick
    /// Corresponds to POST /move endpoint
    ///
    /// Builds the per-tick grid model, runs the decision engine with the
    /// game's remembered heading and turn bias, and stores the updated
    /// memory. A snapshot without our living snake is a caller error.
    pub fn get_move(&self, state: &GameState) -> Result<Value, String> {
        let start_time = Instant::now();

        let grid = GridModel::build(&state.map, &state.player_id)?;

        // A /move without a preceding /start seeds memory on first use.
        let AgentMemory { heading, turn_bias } = *self
            .memory
            .lock()
            .entry(state.game_id.clone())
            .or_insert_with(AgentMemory::seeded);

        let decision = decide_move(&grid, heading, turn_bias, &self.config);

        self.memory.lock().insert(
            state.game_id.clone(),
            AgentMemory {
                heading: decision.direction,
                turn_bias: decision.turn_bias,
            },
        );

        self.debug_logger
            .log_move(state.clone(), heading, turn_bias, decision.direction);

        info!(
            "Tick {}: chose {} via {} ({}ms)",
            state.game_tick,
            decision.direction.as_str(),
            match decision.source {
                DecisionSource::FoodPath => "food path",
                DecisionSource::Heuristic => "heuristics",
            },
            start_time.elapsed().as_millis()
        );

        Ok(json!({
            "direction": decision.direction.as_str(),
            "game_tick": state.game_tick,
        }))
    }
}
