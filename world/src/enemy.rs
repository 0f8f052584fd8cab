use bastion_core::{health_ratio, Bearing, EnemyId, EnemySnapshot, Presenter, Vec2};

use crate::registry::Entity;

/// Parameters describing an enemy about to enter the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySeed {
    /// Spawn position.
    pub position: Vec2,
    /// Fixed bearing toward the tower.
    pub bearing: Bearing,
    /// Distance covered per unit of frame delta.
    pub speed: f32,
    /// Health the enemy starts with.
    pub max_health: u32,
}

/// Enemy walking a straight line toward the tower.
#[derive(Clone, Debug)]
pub struct Enemy {
    id: EnemyId,
    position: Vec2,
    bearing: Bearing,
    speed: f32,
    health: u32,
    max_health: u32,
}

impl Enemy {
    /// Fixed bearing captured at spawn time.
    #[must_use]
    pub const fn bearing(&self) -> Bearing {
        self.bearing
    }

    /// Remaining health, never above [`Enemy::max_health`].
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Health the enemy spawned with.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Reports whether the enemy has no health left.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Deducts `amount` from the enemy's health and refreshes its indicator.
    ///
    /// Health saturates at zero. Returns `true` when the enemy has no health
    /// left after the hit.
    pub fn apply_damage(&mut self, amount: u32, presenter: &mut dyn Presenter) -> bool {
        self.health = self.health.saturating_sub(amount);
        presenter.update_enemy_health_ratio(self.id, health_ratio(self.health, self.max_health));
        self.health == 0
    }

    /// Captures an immutable snapshot of the enemy.
    #[must_use]
    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.position,
            bearing: self.bearing,
            health: self.health,
            max_health: self.max_health,
        }
    }
}

impl Entity for Enemy {
    type Id = EnemyId;
    type Seed = EnemySeed;

    fn from_seed(id: EnemyId, seed: EnemySeed) -> Self {
        Self {
            id,
            position: seed.position,
            bearing: seed.bearing,
            speed: seed.speed,
            health: seed.max_health,
            max_health: seed.max_health,
        }
    }

    fn id(&self) -> EnemyId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn advance(&mut self, dt: f32) {
        self.position += self.bearing.direction() * dt * self.speed;
    }

    fn attach_visual(&self, presenter: &mut dyn Presenter) {
        presenter.attach_enemy_visual(self.id, self.position);
    }

    fn place_visual(&self, presenter: &mut dyn Presenter) {
        presenter.place_enemy_visual(self.id, self.position);
    }

    fn detach_visual(&self, presenter: &mut dyn Presenter) {
        presenter.detach_enemy_visual(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bastion_presenter::{HeadlessPresenter, PresenterCall};

    fn enemy(max_health: u32) -> Enemy {
        Enemy::from_seed(
            EnemyId::new(0),
            EnemySeed {
                position: Vec2::new(1280.0, 360.0),
                bearing: Bearing::toward(Vec2::new(1280.0, 360.0), Vec2::new(640.0, 360.0)),
                speed: 1.0,
                max_health,
            },
        )
    }

    #[test]
    fn health_stays_within_bounds_for_any_damage_sequence() {
        let mut presenter = HeadlessPresenter::new();
        let sequences: [&[u32]; 4] = [
            &[0, 0, 0],
            &[1, 2, 3, 200],
            &[u32::MAX, 5],
            &[99, 1, 1, 0, 7],
        ];
        for sequence in sequences {
            let mut enemy = enemy(100);
            for &amount in sequence {
                let _ = enemy.apply_damage(amount, &mut presenter);
                assert!(enemy.health() <= enemy.max_health());
            }
        }
    }

    #[test]
    fn death_signal_matches_zero_health() {
        let mut presenter = HeadlessPresenter::new();
        for (health, damage) in [(100, 20), (20, 20), (20, 21), (1, 0), (5, u32::MAX), (0, 0)] {
            let mut enemy = enemy(100);
            let _ = enemy.apply_damage(100 - health, &mut presenter);
            let dead = enemy.apply_damage(damage, &mut presenter);
            assert_eq!(dead, enemy.health() == 0, "health {health} damage {damage}");
            assert_eq!(dead, health <= damage, "health {health} damage {damage}");
        }
    }

    #[test]
    fn damage_reports_health_ratio_sequence() {
        let mut presenter = HeadlessPresenter::recording();
        let mut enemy = enemy(100);

        for _ in 0..3 {
            assert!(!enemy.apply_damage(20, &mut presenter));
        }
        assert_eq!(enemy.health(), 40);
        assert!(enemy.apply_damage(40, &mut presenter));
        assert_eq!(enemy.health(), 0);
        assert!(enemy.is_dead());

        let ratios: Vec<f32> = presenter
            .calls()
            .iter()
            .filter_map(|call| match call {
                PresenterCall::EnemyHealthRatio(_, ratio) => Some(*ratio),
                _ => None,
            })
            .collect();
        assert_eq!(ratios.len(), 4);
        assert_relative_eq!(ratios[0], 0.8);
        assert_relative_eq!(ratios[1], 0.6);
        assert_relative_eq!(ratios[2], 0.4);
        assert_eq!(ratios[3], 0.0);
    }

    #[test]
    fn advance_moves_along_bearing_at_enemy_speed() {
        let mut enemy = enemy(100);
        enemy.advance(2.0);
        assert_relative_eq!(enemy.position().x, 1278.0, epsilon = 1e-3);
        assert_relative_eq!(enemy.position().y, 360.0, epsilon = 1e-3);
        assert_relative_eq!(enemy.bearing().radians(), std::f32::consts::PI);
    }
}
