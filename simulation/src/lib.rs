#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-driven coordinator for the Bastion simulation.
//!
//! [`Simulation`] owns the world and every system. The external driver calls
//! [`Simulation::tick`] once per frame with the frame delta; player input
//! arrives through [`Simulation::fire_projectile`] and
//! [`Simulation::spawn_enemy_now`] between ticks. Every entry point borrows the
//! simulation mutably, so input can never interleave with a tick in progress
//! and its effects are first integrated by the following tick.

mod stats;

use std::time::Duration;

use bastion_core::{Command, ConfigError, EnemyId, Event, Presenter, SimulationConfig, Vec2};
use bastion_system_combat::Combat;
use bastion_system_spawning::{self as spawning, Spawning};
use bastion_world::{self as world, query, World};

pub use crate::stats::SessionStats;

/// Authoritative simulation session.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    combat: Combat,
    tick_duration: Duration,
    elapsed: Duration,
    tick_index: u64,
    commands: Vec<Command>,
    stats: SessionStats,
}

impl Simulation {
    /// Creates a session with an empty arena after validating `config`.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(config),
            spawning: Spawning::new(spawning::Config::from_simulation(config)),
            combat: Combat::new(),
            tick_duration: config.tick_duration()?,
            elapsed: Duration::ZERO,
            tick_index: 0,
            commands: Vec::new(),
            stats: SessionStats::default(),
        })
    }

    /// Advances the simulation by one frame.
    ///
    /// `dt` is the frame delta reported by the driver, in frame units. The
    /// tick runs the spawn check, moves enemies, moves projectiles, resolves
    /// hits and finally culls projectiles that left the arena, in that order.
    pub fn tick(&mut self, dt: f32, presenter: &mut dyn Presenter, out_events: &mut Vec<Event>) {
        let dt = normalize_delta(dt);
        let first_event = out_events.len();

        self.tick_index += 1;
        self.elapsed = self.elapsed.saturating_add(self.frame_duration(dt));
        out_events.push(Event::TimeAdvanced {
            dt,
            elapsed: self.elapsed,
        });

        self.commands.clear();
        self.spawning.handle(
            self.elapsed,
            query::arena(&self.world),
            query::tower(&self.world),
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, presenter, out_events);
        }

        self.world.advance_enemies(dt, presenter);
        self.world.advance_projectiles(dt, presenter);

        let arena = query::arena(&self.world);
        let (enemies, projectiles) = self.world.registries_mut();
        self.combat
            .resolve_hits(enemies, projectiles, presenter, out_events);
        self.combat
            .cull_out_of_bounds(projectiles, arena, presenter, out_events);

        self.stats.record(&out_events[first_event..]);
    }

    /// Fires a projectile from the tower toward `target`.
    pub fn fire_projectile(
        &mut self,
        target: Vec2,
        presenter: &mut dyn Presenter,
        out_events: &mut Vec<Event>,
    ) {
        self.submit(Command::FireProjectile { target }, presenter, out_events);
    }

    /// Spawns an enemy immediately, outside the scheduled cadence.
    pub fn spawn_enemy_now(&mut self, presenter: &mut dyn Presenter, out_events: &mut Vec<Event>) {
        self.commands.clear();
        self.spawning.spawn_now(
            query::arena(&self.world),
            query::tower(&self.world),
            &mut self.commands,
        );
        let commands = std::mem::take(&mut self.commands);
        for command in commands {
            self.submit(command, presenter, out_events);
        }
    }

    /// Removes an enemy outside of combat. Unknown enemies are ignored.
    pub fn dismiss_enemy(
        &mut self,
        enemy: EnemyId,
        presenter: &mut dyn Presenter,
        out_events: &mut Vec<Event>,
    ) {
        self.submit(Command::DismissEnemy { enemy }, presenter, out_events);
    }

    /// Applies an arbitrary command between ticks.
    pub fn submit(
        &mut self,
        command: Command,
        presenter: &mut dyn Presenter,
        out_events: &mut Vec<Event>,
    ) {
        let first_event = out_events.len();
        world::apply(&mut self.world, command, presenter, out_events);
        self.stats.record(&out_events[first_event..]);
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Simulated time elapsed since the session started.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks run so far.
    #[must_use]
    pub const fn tick_index(&self) -> u64 {
        self.tick_index
    }

    /// Tally of the session's events.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    fn frame_duration(&self, dt: f32) -> Duration {
        Duration::try_from_secs_f64(self.tick_duration.as_secs_f64() * f64::from(dt))
            .unwrap_or(Duration::MAX)
    }
}

fn normalize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("ignoring invalid frame delta {dt}");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_deltas_collapse_to_zero() {
        assert_eq!(normalize_delta(f32::NAN), 0.0);
        assert_eq!(normalize_delta(f32::INFINITY), 0.0);
        assert_eq!(normalize_delta(-1.0), 0.0);
        assert_eq!(normalize_delta(1.5), 1.5);
    }

    #[test]
    fn frame_duration_scales_with_delta() {
        let config = SimulationConfig {
            tick_millis: 500.0,
            ..SimulationConfig::default()
        };
        let simulation = Simulation::new(&config).expect("valid config");
        assert_eq!(simulation.frame_duration(2.0), Duration::from_secs(1));
        assert_eq!(simulation.frame_duration(0.5), Duration::from_millis(250));
        assert_eq!(simulation.frame_duration(0.0), Duration::ZERO);
    }

    #[test]
    fn unrepresentable_tick_length_is_rejected() {
        let config = SimulationConfig {
            tick_millis: 1e300,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(&config),
            Err(ConfigError::InvalidTickLength(_))
        ));
    }
}
