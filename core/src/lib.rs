#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Bastion simulation.
//!
//! This crate defines the message surface that connects the authoritative
//! world, the systems that drive it, and the presenter adapters that show it.
//! Callers submit [`Command`] values describing entity creation and removal,
//! the world executes them through its `apply` entry point and appends
//! [`Event`] values describing what happened. Presentation is never owned by
//! the core: it is reached exclusively through the [`Presenter`] trait.

pub mod config;
pub mod geometry;

use std::{fmt, time::Duration};

pub use glam::Vec2;

pub use crate::config::{ConfigError, SimulationConfig};
pub use crate::geometry::{
    angle_between, bounding_boxes_overlap, ArenaBounds, Bearing, BoundingBox,
};

/// Identity allocated by a registry when an entity is created.
pub trait Handle: Copy + Eq + Ord + std::hash::Hash + fmt::Debug {
    /// Wraps a raw identity value.
    fn from_raw(raw: u64) -> Self;

    /// Retrieves the raw identity value.
    fn raw(self) -> u64;
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl Handle for EnemyId {
    fn from_raw(raw: u64) -> Self {
        Self::new(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u64);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl Handle for ProjectileId {
    fn from_raw(raw: u64) -> Self {
        Self::new(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

/// Identity of any entity a presenter may hold a visual for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityHandle {
    /// Visual attached to an enemy.
    Enemy(EnemyId),
    /// Visual attached to a projectile.
    Projectile(ProjectileId),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Creates an enemy at full health.
    SpawnEnemy {
        /// Point on the spawn circle where the enemy appears.
        position: Vec2,
        /// Fixed bearing toward the tower captured at spawn time.
        bearing: Bearing,
    },
    /// Fires a projectile from the tower toward the target point.
    FireProjectile {
        /// Point the projectile is aimed at.
        target: Vec2,
    },
    /// Removes an enemy outside of combat, for instance when it reaches the tower.
    DismissEnemy {
        /// Identifier of the enemy to remove.
        enemy: EnemyId,
    },
}

/// Events broadcast by the world and systems after mutating state.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Frame delta supplied by the driver, after normalisation.
        dt: f32,
        /// Simulated time elapsed since the session started.
        elapsed: Duration,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Spawn position.
        position: Vec2,
        /// Fixed bearing of the enemy.
        bearing: Bearing,
    },
    /// Reports that a projectile struck an enemy.
    EnemyDamaged {
        /// Identifier of the struck enemy.
        enemy: EnemyId,
        /// Projectile that delivered the hit.
        projectile: ProjectileId,
        /// Health remaining after the hit.
        health: u32,
    },
    /// Reports that an enemy ran out of health and was removed.
    EnemyKilled {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy was removed by an external command.
    EnemyDismissed {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Confirms that the tower fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Firing position.
        position: Vec2,
        /// Fixed bearing of the projectile.
        bearing: Bearing,
    },
    /// Reports that a projectile was consumed by its first hit.
    ProjectileSpent {
        /// Identifier of the consumed projectile.
        projectile: ProjectileId,
        /// Enemy that absorbed the hit.
        enemy: EnemyId,
    },
    /// Reports that a projectile left the arena and was removed.
    ProjectileCulled {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
    },
}

/// Collaborator that owns every visual representation of the simulation.
///
/// The core drives the presenter through callbacks and never inspects its
/// internals. Collision geometry comes from [`Presenter::bounding_box`], so the
/// footprint of an entity is whatever the presenter currently shows.
pub trait Presenter {
    /// Creates the visual for a freshly spawned enemy.
    fn attach_enemy_visual(&mut self, enemy: EnemyId, position: Vec2);

    /// Destroys the visual of a removed enemy.
    fn detach_enemy_visual(&mut self, enemy: EnemyId);

    /// Moves an enemy visual to the enemy's current position.
    fn place_enemy_visual(&mut self, enemy: EnemyId, position: Vec2);

    /// Creates the visual for a freshly fired projectile.
    fn attach_projectile_visual(&mut self, projectile: ProjectileId, position: Vec2);

    /// Destroys the visual of a removed projectile.
    fn detach_projectile_visual(&mut self, projectile: ProjectileId);

    /// Moves a projectile visual to the projectile's current position.
    fn place_projectile_visual(&mut self, projectile: ProjectileId, position: Vec2);

    /// Rescales an enemy's health indicator. `ratio` lies in `0.0..=1.0`.
    fn update_enemy_health_ratio(&mut self, enemy: EnemyId, ratio: f32);

    /// Current footprint of the entity's visual, if the presenter holds one.
    fn bounding_box(&self, entity: EntityHandle) -> Option<BoundingBox>;
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current position.
    pub position: Vec2,
    /// Fixed bearing toward the tower.
    pub bearing: Bearing,
    /// Remaining health.
    pub health: u32,
    /// Health the enemy spawned with.
    pub max_health: u32,
}

/// Read-only snapshot describing all enemies in the arena.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from snapshots already in registry order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EnemySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Current position.
    pub position: Vec2,
    /// Fixed bearing of travel.
    pub bearing: Bearing,
    /// Damage the projectile deals on impact.
    pub damage: u32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from snapshots already in registry order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ProjectileSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectiles were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Converts remaining health into the ratio shown by health indicators.
#[must_use]
pub fn health_ratio(health: u32, max_health: u32) -> f32 {
    if health == 0 || max_health == 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_round_trip_their_raw_value() {
        assert_eq!(EnemyId::from_raw(7).get(), 7);
        assert_eq!(ProjectileId::from_raw(9).raw(), 9);
    }

    #[test]
    fn health_ratio_is_zero_for_dead_enemies() {
        assert_eq!(health_ratio(0, 100), 0.0);
        assert_eq!(health_ratio(80, 100), 0.8);
        assert_eq!(health_ratio(100, 100), 1.0);
    }

    #[test]
    fn health_ratio_tolerates_zero_max_health() {
        assert_eq!(health_ratio(10, 0), 0.0);
    }
}
