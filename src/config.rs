//! Tunable game parameters.
//!
//! Defaults match the classic layout: a 500x500 field, 20px bubbles and a
//! 30ms simulation tick. An optional `config.json` in the user's config
//! directory can override any subset of them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with a loaded or hand-built configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bubble radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("projectile speed must be positive, got {0}")]
    InvalidSpeed(f32),
    #[error("tick period must be at least 1ms")]
    InvalidTick,
    #[error("adjacency slack must be in [0, radius), got {0}")]
    InvalidSlack(f32),
    #[error("field {width}x{height} is smaller than one bubble of radius {radius}")]
    FieldTooSmall { width: f32, height: f32, radius: f32 },
    #[error("shooter at ({x}, {y}) is outside the field")]
    ShooterOutside { x: f32, y: f32 },
    #[error("initial layout needs at least one row and one column, got {rows}x{cols}")]
    EmptyLayout { rows: u32, cols: u32 },
    #[error("initial layout of {cols} columns does not fit a field {width} wide")]
    LayoutTooWide { cols: u32, width: f32 },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All tunable values for a game session.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Radius of every bubble, in field units.
    pub bubble_radius: f32,
    /// Extra distance tolerated when deciding two bubbles touch.
    pub adjacency_slack: f32,
    pub field_width: f32,
    pub field_height: f32,
    /// Turret position in field coordinates (y grows downward).
    pub shooter_x: f32,
    pub shooter_y: f32,
    /// Projectile displacement per tick.
    pub projectile_speed: f32,
    pub tick_millis: u64,
    pub initial_rows: u32,
    pub initial_cols: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bubble_radius: 20.0,
            adjacency_slack: 1.0,
            field_width: 500.0,
            field_height: 500.0,
            shooter_x: 250.0,
            shooter_y: 480.0,
            projectile_speed: 8.0,
            tick_millis: 30,
            initial_rows: 5,
            initial_cols: 10,
        }
    }
}

impl GameConfig {
    /// Distance at which two same-colored bubbles count as connected.
    pub fn adjacency_distance(&self) -> f32 {
        self.bubble_radius * 2.0 + self.adjacency_slack
    }

    pub fn shooter_position(&self) -> Vec2 {
        Vec2::new(self.shooter_x, self.shooter_y)
    }

    /// Check that the values describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.bubble_radius;
        if radius.is_nan() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        if self.projectile_speed.is_nan() || self.projectile_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.projectile_speed));
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::InvalidTick);
        }
        if !(0.0..radius).contains(&self.adjacency_slack) {
            return Err(ConfigError::InvalidSlack(self.adjacency_slack));
        }
        let min_side = radius * 2.0;
        let (width, height) = (self.field_width, self.field_height);
        if width.is_nan() || height.is_nan() || width < min_side || height < min_side {
            return Err(ConfigError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
                radius,
            });
        }
        if !(0.0..=self.field_width).contains(&self.shooter_x)
            || !(0.0..=self.field_height).contains(&self.shooter_y)
        {
            return Err(ConfigError::ShooterOutside {
                x: self.shooter_x,
                y: self.shooter_y,
            });
        }
        if self.initial_rows == 0 || self.initial_cols == 0 {
            return Err(ConfigError::EmptyLayout {
                rows: self.initial_rows,
                cols: self.initial_cols,
            });
        }
        // Odd rows are shifted right by one radius.
        let shift = if self.initial_rows > 1 { radius } else { 0.0 };
        if self.initial_cols as f32 * radius * 2.0 + shift > self.field_width {
            return Err(ConfigError::LayoutTooWide {
                cols: self.initial_cols,
                width: self.field_width,
            });
        }
        Ok(())
    }

    /// Convert a field position (origin top-left, y down) to a world position
    /// (origin at the field center, y up).
    pub fn field_to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x - self.field_width / 2.0,
            self.field_height / 2.0 - point.y,
        )
    }

    /// Inverse of [`GameConfig::field_to_world`].
    pub fn world_to_field(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x + self.field_width / 2.0,
            self.field_height / 2.0 - point.y,
        )
    }

    /// Get the file path for the optional config override.
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bubble_shooter").join("config.json"))
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load the config override from disk, falling back to defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine config directory, using default config");
            return Self::default();
        };

        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
