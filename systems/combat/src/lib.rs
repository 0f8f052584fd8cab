#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision and damage resolution between projectiles and enemies.
//!
//! Every projectile is tested against every enemy, so a pass costs
//! `projectiles × enemies` bounding-box checks. Both registries are walked in
//! insertion order; when a projectile overlaps several enemies at once the
//! oldest of them takes the hit.

use bastion_core::{
    ArenaBounds, BoundingBox, EnemyId, EntityHandle, Event, Presenter, ProjectileId,
};
use bastion_world::{EnemyRegistry, Entity, Projectile, ProjectileRegistry};

/// Combat system that consumes projectiles on contact and removes spent entities.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<ProjectileId>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves this tick's projectile hits.
    ///
    /// A projectile is consumed by the first enemy it overlaps: it is removed,
    /// its damage is applied, and the enemy is removed if that left it without
    /// health. Projectiles or enemies the presenter has no footprint for are
    /// skipped.
    pub fn resolve_hits(
        &mut self,
        enemies: &mut EnemyRegistry,
        projectiles: &mut ProjectileRegistry,
        presenter: &mut dyn Presenter,
        out_events: &mut Vec<Event>,
    ) {
        self.scratch.clear();
        self.scratch.extend(projectiles.iter().map(Entity::id));

        for &projectile in &self.scratch {
            let Some(damage) = projectiles.get(projectile).map(Projectile::damage) else {
                continue;
            };
            let Some(bounds) = presenter.bounding_box(EntityHandle::Projectile(projectile)) else {
                continue;
            };
            let Some(enemy) = first_struck(enemies, &bounds, &*presenter) else {
                continue;
            };

            let _ = projectiles.remove(projectile, presenter);
            out_events.push(Event::ProjectileSpent { projectile, enemy });

            let Some(target) = enemies.get_mut(enemy) else {
                continue;
            };
            let dead = target.apply_damage(damage, presenter);
            out_events.push(Event::EnemyDamaged {
                enemy,
                projectile,
                health: target.health(),
            });

            if dead && enemies.remove(enemy, presenter).is_some() {
                log::debug!(
                    "enemy {} killed by projectile {}",
                    enemy.get(),
                    projectile.get()
                );
                out_events.push(Event::EnemyKilled { enemy });
            }
        }
    }

    /// Removes every projectile that left `[0, width] × [0, height]`.
    pub fn cull_out_of_bounds(
        &mut self,
        projectiles: &mut ProjectileRegistry,
        arena: ArenaBounds,
        presenter: &mut dyn Presenter,
        out_events: &mut Vec<Event>,
    ) {
        self.scratch.clear();
        self.scratch.extend(
            projectiles
                .iter()
                .filter(|projectile| !arena.contains(projectile.position()))
                .map(Entity::id),
        );

        for &projectile in &self.scratch {
            if projectiles.remove(projectile, presenter).is_some() {
                log::trace!("projectile {} left the arena", projectile.get());
                out_events.push(Event::ProjectileCulled { projectile });
            }
        }
    }
}

fn first_struck(
    enemies: &EnemyRegistry,
    bounds: &BoundingBox,
    presenter: &dyn Presenter,
) -> Option<EnemyId> {
    enemies.iter().map(Entity::id).find(|&enemy| {
        presenter
            .bounding_box(EntityHandle::Enemy(enemy))
            .is_some_and(|enemy_bounds| enemy_bounds.overlaps(bounds))
    })
}
