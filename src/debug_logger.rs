// Debug logging module for asynchronous game state logging
//
// Fire-and-forget async logging so the move response never waits on disk.
// Each tick's snapshot, agent memory and chosen move go to a JSONL file that
// the replay tool can re-run exactly.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Direction, GameState, TurnBias};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    game_tick: i32,
    heading: Direction,
    turn_bias: TurnBias,
    chosen_move: Direction,
    state: GameState,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(File::from_std(file)))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(
        &self,
        state: GameState,
        heading: Direction,
        turn_bias: TurnBias,
        chosen_move: Direction,
    ) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();

        // Spawn fire-and-forget task
        tokio::spawn(async move {
            Self::log_move_internal(file_handle, state, heading, turn_bias, chosen_move).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_move_internal(
        file_handle: Arc<Mutex<Option<File>>>,
        state: GameState,
        heading: Direction,
        turn_bias: TurnBias,
        chosen_move: Direction,
    ) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            let entry = DebugLogEntry {
                game_tick: state.game_tick,
                heading,
                turn_bias,
                chosen_move,
                state,
                timestamp: chrono::Utc::now().to_rfc3339(),
            };

            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
