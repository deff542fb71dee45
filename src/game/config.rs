use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid side accepted; keeps cell coordinates and cell counts small
pub const MAX_GRID_SIDE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake, head included
    pub initial_snake_length: usize,

    /// Seconds per grid step at the start of a game
    pub initial_step_interval: f64,
    /// Multiplier applied to the step interval per apple eaten
    pub speed_factor: f64,
    /// Lower bound for the step interval
    pub min_step_interval: f64,

    /// Fixed RNG seed for apple placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 18,
            grid_height: 10,
            initial_snake_length: 3,
            initial_step_interval: 0.5,
            speed_factor: 0.9,
            min_step_interval: 0.05,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Builder-style seed setter
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::info!(?path, "loaded game config");
        Ok(config)
    }

    /// Reject configurations the engine cannot play
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            bail!(
                "Grid must be non-empty, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            bail!(
                "Grid sides are limited to {} cells, got {}x{}",
                MAX_GRID_SIDE,
                self.grid_width,
                self.grid_height
            );
        }
        if self.initial_snake_length == 0 {
            bail!("Initial snake length must be at least 1");
        }
        // The snake starts centred facing right, so its tail reaches back half the width.
        if self.initial_snake_length > self.grid_width / 2 + 1 {
            bail!(
                "Initial snake length {} does not fit in a grid {} cells wide",
                self.initial_snake_length,
                self.grid_width
            );
        }
        // The apple needs at least one free cell at the start.
        if self.initial_snake_length >= self.grid_width * self.grid_height {
            bail!(
                "Initial snake length {} leaves no room for the apple on a {}x{} grid",
                self.initial_snake_length,
                self.grid_width,
                self.grid_height
            );
        }
        if !self.initial_step_interval.is_finite() || !self.min_step_interval.is_finite() {
            bail!("Step intervals must be finite");
        }
        if self.initial_step_interval <= 0.0 || self.min_step_interval <= 0.0 {
            bail!("Step intervals must be positive");
        }
        if self.min_step_interval > self.initial_step_interval {
            bail!(
                "Minimum step interval {} exceeds initial interval {}",
                self.min_step_interval,
                self.initial_step_interval
            );
        }
        if !(self.speed_factor > 0.0 && self.speed_factor <= 1.0) {
            bail!("Speed factor must be in (0, 1], got {}", self.speed_factor);
        }
        Ok(())
    }
}
