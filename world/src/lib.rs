#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Bastion.
//!
//! The world owns both entity registries together with the fixed arena and
//! tower. Systems borrow the registries through [`World::registries_mut`];
//! callers mutate everything else through [`apply`].

mod enemy;
mod projectile;
mod registry;

use bastion_core::{ArenaBounds, Bearing, Command, Event, Presenter, SimulationConfig, Vec2};

pub use crate::enemy::{Enemy, EnemySeed};
pub use crate::projectile::{Projectile, ProjectileSeed};
pub use crate::registry::{Entity, Registry};

/// Registry owning every live enemy.
pub type EnemyRegistry = Registry<Enemy>;

/// Registry owning every live projectile.
pub type ProjectileRegistry = Registry<Projectile>;

/// Represents the authoritative Bastion world state.
#[derive(Debug)]
pub struct World {
    arena: ArenaBounds,
    tower: Vec2,
    enemies: EnemyRegistry,
    projectiles: ProjectileRegistry,
    enemy_speed: f32,
    enemy_max_health: u32,
    projectile_speed: f32,
    projectile_damage: u32,
}

impl World {
    /// Creates an empty arena with the tower placed as configured.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            arena: config.arena,
            tower: config.tower_position(),
            enemies: EnemyRegistry::new(),
            projectiles: ProjectileRegistry::new(),
            enemy_speed: config.enemy_speed,
            enemy_max_health: config.enemy_max_health,
            projectile_speed: config.projectile_speed,
            projectile_damage: config.projectile_damage,
        }
    }

    /// Live enemies.
    #[must_use]
    pub fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    /// Live projectiles.
    #[must_use]
    pub fn projectiles(&self) -> &ProjectileRegistry {
        &self.projectiles
    }

    /// Borrows both registries mutably at once for combat resolution.
    pub fn registries_mut(&mut self) -> (&mut EnemyRegistry, &mut ProjectileRegistry) {
        (&mut self.enemies, &mut self.projectiles)
    }

    /// Integrates every enemy along its bearing.
    pub fn advance_enemies(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        self.enemies.advance(dt, presenter);
    }

    /// Integrates every projectile along its bearing.
    pub fn advance_projectiles(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        self.projectiles.advance(dt, presenter);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(
    world: &mut World,
    command: Command,
    presenter: &mut dyn Presenter,
    out_events: &mut Vec<Event>,
) {
    match command {
        Command::SpawnEnemy { position, bearing } => {
            let enemy = world.enemies.spawn(
                EnemySeed {
                    position,
                    bearing,
                    speed: world.enemy_speed,
                    max_health: world.enemy_max_health,
                },
                presenter,
            );
            log::debug!(
                "enemy {} spawned at ({:.1}, {:.1}) heading {:.3} rad",
                enemy.get(),
                position.x,
                position.y,
                bearing.radians()
            );
            out_events.push(Event::EnemySpawned {
                enemy,
                position,
                bearing,
            });
        }
        Command::FireProjectile { target } => {
            let origin = world.tower;
            if !target.is_finite() || target == origin {
                log::warn!("fire target {target} has no defined heading; firing east");
            }
            let bearing = Bearing::toward(origin, target);
            let projectile = world.projectiles.spawn(
                ProjectileSeed {
                    position: origin,
                    bearing,
                    speed: world.projectile_speed,
                    damage: world.projectile_damage,
                },
                presenter,
            );
            log::trace!("projectile {} fired toward {target}", projectile.get());
            out_events.push(Event::ProjectileFired {
                projectile,
                position: origin,
                bearing,
            });
        }
        Command::DismissEnemy { enemy } => {
            if world.enemies.remove(enemy, presenter).is_some() {
                log::debug!("enemy {} dismissed", enemy.get());
                out_events.push(Event::EnemyDismissed { enemy });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use bastion_core::{ArenaBounds, EnemyView, ProjectileView, Vec2};

    use super::World;

    /// Play field bounds.
    #[must_use]
    pub fn arena(world: &World) -> ArenaBounds {
        world.arena
    }

    /// Fixed tower position.
    #[must_use]
    pub fn tower(world: &World) -> Vec2 {
        world.tower
    }

    /// Captures a read-only view of the enemies in registry order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the projectiles in registry order.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }
}
