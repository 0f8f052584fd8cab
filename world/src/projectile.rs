use bastion_core::{Bearing, Presenter, ProjectileId, ProjectileSnapshot, Vec2};

use crate::registry::Entity;

/// Parameters describing a projectile leaving the tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSeed {
    /// Firing position.
    pub position: Vec2,
    /// Fixed bearing toward the aimed point.
    pub bearing: Bearing,
    /// Distance covered per unit of frame delta.
    pub speed: f32,
    /// Damage dealt on impact.
    pub damage: u32,
}

/// Projectile flying in a straight line until it hits or leaves the arena.
#[derive(Clone, Debug)]
pub struct Projectile {
    id: ProjectileId,
    position: Vec2,
    bearing: Bearing,
    speed: f32,
    damage: u32,
}

impl Projectile {
    /// Fixed bearing captured when the projectile was fired.
    #[must_use]
    pub const fn bearing(&self) -> Bearing {
        self.bearing
    }

    /// Damage dealt on impact.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Captures an immutable snapshot of the projectile.
    #[must_use]
    pub fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            bearing: self.bearing,
            damage: self.damage,
        }
    }
}

impl Entity for Projectile {
    type Id = ProjectileId;
    type Seed = ProjectileSeed;

    fn from_seed(id: ProjectileId, seed: ProjectileSeed) -> Self {
        Self {
            id,
            position: seed.position,
            bearing: seed.bearing,
            speed: seed.speed,
            damage: seed.damage,
        }
    }

    fn id(&self) -> ProjectileId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn advance(&mut self, dt: f32) {
        self.position += self.bearing.direction() * dt * self.speed;
    }

    fn attach_visual(&self, presenter: &mut dyn Presenter) {
        presenter.attach_projectile_visual(self.id, self.position);
    }

    fn place_visual(&self, presenter: &mut dyn Presenter) {
        presenter.place_projectile_visual(self.id, self.position);
    }

    fn detach_visual(&self, presenter: &mut dyn Presenter) {
        presenter.detach_projectile_visual(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn advance_moves_along_bearing_at_projectile_speed() {
        let mut projectile = Projectile::from_seed(
            ProjectileId::new(3),
            ProjectileSeed {
                position: Vec2::new(640.0, 360.0),
                bearing: Bearing::from_degrees(90.0),
                speed: 5.0,
                damage: 20,
            },
        );

        projectile.advance(1.5);

        assert_relative_eq!(projectile.position().x, 640.0, epsilon = 1e-3);
        assert_relative_eq!(projectile.position().y, 367.5, epsilon = 1e-3);
        assert_eq!(projectile.damage(), 20);
    }
}
