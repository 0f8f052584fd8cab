#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-gated spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use bastion_core::{ArenaBounds, Bearing, Command, SimulationConfig, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    spawn_radius: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, circle radius and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, spawn_radius: f32, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            spawn_radius,
            rng_seed,
        }
    }

    /// Extracts the spawning parameters from a session configuration.
    #[must_use]
    pub fn from_simulation(config: &SimulationConfig) -> Self {
        Self::new(
            config.spawn_interval(),
            config.spawn_radius(),
            config.rng_seed,
        )
    }
}

/// System that introduces enemies on a circle around the arena centre.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    spawn_radius: f32,
    last_spawn: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    ///
    /// The cadence starts counting at simulated time zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            spawn_radius: config.spawn_radius,
            last_spawn: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits at most one spawn command once a full interval has elapsed since
    /// the previous scheduled spawn.
    ///
    /// However late the check runs, a single enemy is emitted and the cadence
    /// restarts from `now`.
    pub fn handle(
        &mut self,
        now: Duration,
        arena: ArenaBounds,
        tower: Vec2,
        out: &mut Vec<Command>,
    ) {
        if !self.is_due(now) {
            return;
        }
        self.last_spawn = now;
        out.push(self.next_spawn(arena, tower));
    }

    /// Emits a spawn command immediately, leaving the cadence untouched.
    pub fn spawn_now(&mut self, arena: ArenaBounds, tower: Vec2, out: &mut Vec<Command>) {
        out.push(self.next_spawn(arena, tower));
    }

    /// Reports whether a scheduled spawn would fire at `now`.
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        !self.spawn_interval.is_zero() && now.saturating_sub(self.last_spawn) >= self.spawn_interval
    }

    /// Simulated time of the last scheduled spawn.
    #[must_use]
    pub const fn last_spawn(&self) -> Duration {
        self.last_spawn
    }

    fn next_spawn(&mut self, arena: ArenaBounds, tower: Vec2) -> Command {
        let degrees: f32 = self.rng.gen_range(0.0..360.0);
        log::debug!("spawn angle {degrees:.2} degrees");
        perimeter_spawn(arena, self.spawn_radius, degrees, tower)
    }
}

/// Builds the spawn command for an enemy entering at `angle_degrees` on the
/// circle of `radius` around the arena centre, heading for the tower.
#[must_use]
pub fn perimeter_spawn(
    arena: ArenaBounds,
    radius: f32,
    angle_degrees: f32,
    tower: Vec2,
) -> Command {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let position = arena.center() + Vec2::new(cos, sin) * radius;
    Command::SpawnEnemy {
        position,
        bearing: Bearing::toward(position, tower),
    }
}
