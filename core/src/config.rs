//! Tunable parameters for a simulation session.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::ArenaBounds;

const DEFAULT_ENEMY_SPEED: f32 = 1.0;
const DEFAULT_PROJECTILE_SPEED: f32 = 5.0;
const DEFAULT_ENEMY_MAX_HEALTH: u32 = 100;
const DEFAULT_PROJECTILE_DAMAGE: u32 = 20;
const DEFAULT_SPAWN_INTERVAL_MS: u64 = 2_000;
const DEFAULT_TICK_MILLIS: f64 = 1_000.0 / 60.0;
const DEFAULT_RNG_SEED: u64 = 0x5eed_b457_10fe_a7e5;

/// Parameters describing the arena, its entities, and the simulation clock.
///
/// Every field has a default, so a TOML document only needs to list the
/// values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Extent of the play field.
    pub arena: ArenaBounds,
    /// Tower position; the arena centre when absent.
    pub tower: Option<Vec2>,
    /// Distance an enemy covers per unit of frame delta.
    pub enemy_speed: f32,
    /// Distance a projectile covers per unit of frame delta.
    pub projectile_speed: f32,
    /// Health every enemy spawns with.
    pub enemy_max_health: u32,
    /// Damage dealt by a single projectile hit.
    pub projectile_damage: u32,
    /// Minimum simulated time between scheduled spawns. Zero disables them.
    pub spawn_interval_ms: u64,
    /// Radius of the spawn circle around the arena centre; half the arena
    /// width when absent.
    pub spawn_radius: Option<f32>,
    /// Simulated milliseconds represented by one unit of frame delta.
    pub tick_millis: f64,
    /// Seed for the spawn angle generator.
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena: ArenaBounds::default(),
            tower: None,
            enemy_speed: DEFAULT_ENEMY_SPEED,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            enemy_max_health: DEFAULT_ENEMY_MAX_HEALTH,
            projectile_damage: DEFAULT_PROJECTILE_DAMAGE,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            spawn_radius: None,
            tick_millis: DEFAULT_TICK_MILLIS,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every parameter describes a playable simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaBounds { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        if !self.arena.contains(self.tower_position()) {
            return Err(ConfigError::TowerOutsideArena(self.tower_position()));
        }
        check_speed("enemy_speed", self.enemy_speed)?;
        check_speed("projectile_speed", self.projectile_speed)?;
        if self.enemy_max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth);
        }
        let radius = self.spawn_radius();
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(ConfigError::InvalidSpawnRadius(radius));
        }
        let _ = self.tick_duration()?;
        Ok(())
    }

    /// Resolved tower position.
    #[must_use]
    pub fn tower_position(&self) -> Vec2 {
        self.tower.unwrap_or_else(|| self.arena.center())
    }

    /// Resolved spawn circle radius.
    #[must_use]
    pub fn spawn_radius(&self) -> f32 {
        self.spawn_radius.unwrap_or(self.arena.width / 2.0)
    }

    /// Spawn cadence as a duration.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Simulated time represented by one unit of frame delta.
    ///
    /// Fails unless `tick_millis` converts to a non-zero [`Duration`].
    pub fn tick_duration(&self) -> Result<Duration, ConfigError> {
        match Duration::try_from_secs_f64(self.tick_millis / 1_000.0) {
            Ok(duration) if !duration.is_zero() => Ok(duration),
            _ => Err(ConfigError::InvalidTickLength(self.tick_millis)),
        }
    }
}

fn check_speed(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed { field, value })
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be deserialised.
    #[error("could not parse simulation config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The arena must have a positive, finite extent.
    #[error("arena must be positive and finite, got {width}x{height}")]
    InvalidArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The tower must stand inside the arena.
    #[error("tower at {0} lies outside the arena")]
    TowerOutsideArena(Vec2),
    /// Speeds must be finite and non-negative.
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidSpeed {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f32,
    },
    /// Enemies need at least one point of health.
    #[error("enemy_max_health must be greater than zero")]
    ZeroMaxHealth,
    /// The spawn radius must be finite and non-negative.
    #[error("spawn_radius must be finite and non-negative, got {0}")]
    InvalidSpawnRadius(f32),
    /// The tick length must be a positive, representable duration.
    #[error("tick_millis must be a positive, representable duration, got {0}")]
    InvalidTickLength(f64),
}
