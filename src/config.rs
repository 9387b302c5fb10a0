// Configuration module for reading Snake.toml
//
// The heuristic layer chain is configuration, not code: the four historical
// bot variants differed only in which layers ran and in what order, so one
// engine reads the chain from here.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::HeuristicLayer;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub heuristics: HeuristicsConfig,
    pub pathfinding: PathfindingConfig,
    pub debug: DebugConfig,
}

/// Bot identity reported on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub snake_name: String,
    pub author: String,
    pub color: String,
}

/// Heuristic selector configuration
///
/// `layers` is applied in order; an unknown layer name fails deserialization
/// and is therefore a startup configuration error.
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicsConfig {
    pub layers: Vec<HeuristicLayer>,
}

/// Food pathfinder configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PathfindingConfig {
    pub enabled: bool,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            server: ServerConfig {
                snake_name: "Snokas".to_string(),
                author: "snokas-maintainers".to_string(),
                color: "#00DEAD".to_string(),
            },
            heuristics: HeuristicsConfig {
                layers: HeuristicLayer::default_chain(),
            },
            pathfinding: PathfindingConfig { enabled: true },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snokas_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
