// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the decision engine on historical states
// 3. Compare expected vs actual moves
// 4. Generate analysis reports
//
// Replay is exact: each log entry carries the heading and turn bias the
// decision was made with, so re-running `decide_move` is deterministic.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::engine::decide_move;
use crate::grid::GridModel;
use crate::types::{Direction, GameState, TurnBias};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub game_tick: i32,
    pub heading: Direction,
    pub turn_bias: TurnBias,
    pub chosen_move: Direction,
    pub state: GameState,
    pub timestamp: String,
}

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub game_tick: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying tick {}...", entry.game_tick);
        }

        let grid = GridModel::build(&entry.state.map, &entry.state.player_id)?;

        let start_time = Instant::now();
        let decision = decide_move(&grid, entry.heading, entry.turn_bias, &self.config);
        let computation_time = start_time.elapsed().as_millis();

        let matches = decision.direction == entry.chosen_move;

        let result = ReplayResult {
            game_tick: entry.game_tick,
            original_move: entry.chosen_move,
            replayed_move: decision.direction,
            matches,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Tick {}: MATCH - {} ({}ms)",
                    entry.game_tick,
                    decision.direction.as_str(),
                    computation_time
                );
            } else {
                warn!(
                    "Tick {}: MISMATCH - Original: {}, Replayed: {} ({}ms)",
                    entry.game_tick,
                    entry.chosen_move.as_str(),
                    decision.direction.as_str(),
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", entry.game_tick, e);
                }
            }
        }

        results
    }

    /// Replays specific ticks from a log file
    pub fn replay_ticks(
        &self,
        entries: &[LogEntry],
        ticks: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for tick in ticks {
            let entry = entries
                .iter()
                .find(|e| e.game_tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log file", tick))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", tick, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_ticks - matches;
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_ticks,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n===========================================================");
        println!("                    REPLAY REPORT");
        println!("===========================================================");
        println!("Total Ticks:    {}", stats.total_ticks);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("===========================================================\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.2}ms\n", avg_time);
        }

        // Show mismatches in detail
        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("===========================================================");
            println!("                  DETAILED MISMATCHES");
            println!("===========================================================");

            for result in mismatches {
                println!(
                    "Tick {}: {} -> {} ({}ms)",
                    result.game_tick,
                    result.original_move.as_str(),
                    result.replayed_move.as_str(),
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (tick, acceptable_moves)
    ) -> Result<(), String> {
        for (tick, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.game_tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Tick {}: Expected one of {:?}, but got {}",
                    tick,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move.as_str()
                ));
            }
        }

        Ok(())
    }
}

/// Parses a direction name, case-insensitively
pub fn parse_direction(s: &str) -> Result<Direction, String> {
    match s.to_uppercase().as_str() {
        "UP" => Ok(Direction::Up),
        "DOWN" => Ok(Direction::Down),
        "LEFT" => Ok(Direction::Left),
        "RIGHT" => Ok(Direction::Right),
        _ => Err(format!("Invalid direction: {}", s)),
    }
}
