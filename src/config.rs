// Configuration module for reading Snake.toml
// This module provides configuration management for the autonomous snake runner

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub planning: PlanningConfig,
    pub run: RunConfig,
    pub trace: TraceConfig,
}

/// Board geometry and food rules
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub food_count: usize,
    pub grow_factor: u32,
}

impl BoardConfig {
    /// Total cell count; sizes every planning buffer
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

/// Planning policy knobs for the bot decision loop
#[derive(Debug, Deserialize, Clone)]
pub struct PlanningConfig {
    /// Snake length at which the goal switches from food to the own tail
    /// and the policy from shortest to longest path
    pub tail_goal_length: usize,
    /// Minimum fraction of free cells that must stay reachable from the
    /// goal after committing to a path
    pub reachable_fraction_threshold: f32,
    /// How many next-best frontier offsets to try before falling back
    pub max_offset_retries: usize,
}

/// Runner pacing constants
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// Sleep between ticks; frame pacing lives only in the outer loop
    pub tick_ms: u64,
    /// Stop after this many turns; 0 means run until the game ends
    pub max_turns: u64,
}

/// Decision trace configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TraceConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
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
            board: BoardConfig {
                width: 50,
                height: 50,
                food_count: 1,
                grow_factor: 3,
            },
            planning: PlanningConfig {
                tail_goal_length: 50,
                reachable_fraction_threshold: 0.8,
                max_offset_retries: 5,
            },
            run: RunConfig {
                tick_ms: 50,
                max_turns: 0,
            },
            trace: TraceConfig {
                enabled: false,
                log_file_path: "autosnake_trace.jsonl".to_string(),
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
