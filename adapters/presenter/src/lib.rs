#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Windowless presenter adapter for Bastion.
//!
//! [`HeadlessPresenter`] keeps the same bookkeeping a drawing backend would
//! (which visuals exist, where they stand, how full each health bar is) and
//! derives collision footprints from it, without touching a screen. Headless
//! runs and tests use it as the simulation's presenter, optionally recording
//! every callback for later inspection.

use std::collections::BTreeMap;

use bastion_core::{BoundingBox, EnemyId, EntityHandle, Presenter, ProjectileId, Vec2};

/// Rectangle drawn around an entity, relative to the entity's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    offset: Vec2,
    size: Vec2,
}

impl Footprint {
    /// Enemy body block: 50×50, hanging 20 units above and 30 below the pivot
    /// because the health bar sits on top of the body.
    pub const ENEMY_BODY: Self = Self::new(Vec2::new(-25.0, -20.0), Vec2::new(50.0, 50.0));

    /// Projectile disc with a radius of 5.
    pub const PROJECTILE: Self = Self::new(Vec2::new(-5.0, -5.0), Vec2::new(10.0, 10.0));

    /// Creates a footprint from the offset of its upper-left corner and its size.
    #[must_use]
    pub const fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// Bounding box of the footprint placed at `position`.
    #[must_use]
    pub fn at(&self, position: Vec2) -> BoundingBox {
        BoundingBox::from_min_size(position + self.offset, self.size)
    }
}

/// Presenter callback captured by a recording [`HeadlessPresenter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    /// `attach_enemy_visual` was invoked.
    AttachEnemy(EnemyId, Vec2),
    /// `detach_enemy_visual` was invoked.
    DetachEnemy(EnemyId),
    /// `place_enemy_visual` was invoked.
    PlaceEnemy(EnemyId, Vec2),
    /// `attach_projectile_visual` was invoked.
    AttachProjectile(ProjectileId, Vec2),
    /// `detach_projectile_visual` was invoked.
    DetachProjectile(ProjectileId),
    /// `place_projectile_visual` was invoked.
    PlaceProjectile(ProjectileId, Vec2),
    /// `update_enemy_health_ratio` was invoked.
    EnemyHealthRatio(EnemyId, f32),
}

#[derive(Clone, Copy, Debug)]
struct EnemyVisual {
    position: Vec2,
    health_ratio: f32,
}

/// Presenter that tracks visuals in memory.
#[derive(Debug)]
pub struct HeadlessPresenter {
    enemies: BTreeMap<EnemyId, EnemyVisual>,
    projectiles: BTreeMap<ProjectileId, Vec2>,
    enemy_footprint: Footprint,
    projectile_footprint: Footprint,
    calls: Option<Vec<PresenterCall>>,
}

impl Default for HeadlessPresenter {
    fn default() -> Self {
        Self {
            enemies: BTreeMap::new(),
            projectiles: BTreeMap::new(),
            enemy_footprint: Footprint::ENEMY_BODY,
            projectile_footprint: Footprint::PROJECTILE,
            calls: None,
        }
    }
}

impl HeadlessPresenter {
    /// Creates a presenter with the standard footprints that keeps no call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a presenter that records every callback it receives.
    #[must_use]
    pub fn recording() -> Self {
        Self {
            calls: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Overrides the footprints used to derive bounding boxes.
    #[must_use]
    pub fn with_footprints(mut self, enemy: Footprint, projectile: Footprint) -> Self {
        self.enemy_footprint = enemy;
        self.projectile_footprint = projectile;
        self
    }

    /// Callbacks recorded so far; empty unless created with [`HeadlessPresenter::recording`].
    #[must_use]
    pub fn calls(&self) -> &[PresenterCall] {
        self.calls.as_deref().unwrap_or(&[])
    }

    /// Drains the recorded callbacks.
    pub fn take_calls(&mut self) -> Vec<PresenterCall> {
        self.calls.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Number of enemy visuals currently attached.
    #[must_use]
    pub fn enemy_visual_count(&self) -> usize {
        self.enemies.len()
    }

    /// Number of projectile visuals currently attached.
    #[must_use]
    pub fn projectile_visual_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Where the enemy's visual currently stands.
    #[must_use]
    pub fn enemy_position(&self, enemy: EnemyId) -> Option<Vec2> {
        self.enemies.get(&enemy).map(|visual| visual.position)
    }

    /// Where the projectile's visual currently stands.
    #[must_use]
    pub fn projectile_position(&self, projectile: ProjectileId) -> Option<Vec2> {
        self.projectiles.get(&projectile).copied()
    }

    /// Fill ratio of the enemy's health bar.
    #[must_use]
    pub fn health_ratio(&self, enemy: EnemyId) -> Option<f32> {
        self.enemies.get(&enemy).map(|visual| visual.health_ratio)
    }

    fn record(&mut self, call: PresenterCall) {
        if let Some(calls) = self.calls.as_mut() {
            calls.push(call);
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn attach_enemy_visual(&mut self, enemy: EnemyId, position: Vec2) {
        let _ = self.enemies.insert(
            enemy,
            EnemyVisual {
                position,
                health_ratio: 1.0,
            },
        );
        self.record(PresenterCall::AttachEnemy(enemy, position));
    }

    fn detach_enemy_visual(&mut self, enemy: EnemyId) {
        let _ = self.enemies.remove(&enemy);
        self.record(PresenterCall::DetachEnemy(enemy));
    }

    fn place_enemy_visual(&mut self, enemy: EnemyId, position: Vec2) {
        if let Some(visual) = self.enemies.get_mut(&enemy) {
            visual.position = position;
        }
        self.record(PresenterCall::PlaceEnemy(enemy, position));
    }

    fn attach_projectile_visual(&mut self, projectile: ProjectileId, position: Vec2) {
        let _ = self.projectiles.insert(projectile, position);
        self.record(PresenterCall::AttachProjectile(projectile, position));
    }

    fn detach_projectile_visual(&mut self, projectile: ProjectileId) {
        let _ = self.projectiles.remove(&projectile);
        self.record(PresenterCall::DetachProjectile(projectile));
    }

    fn place_projectile_visual(&mut self, projectile: ProjectileId, position: Vec2) {
        if let Some(slot) = self.projectiles.get_mut(&projectile) {
            *slot = position;
        }
        self.record(PresenterCall::PlaceProjectile(projectile, position));
    }

    fn update_enemy_health_ratio(&mut self, enemy: EnemyId, ratio: f32) {
        let ratio = ratio.clamp(0.0, 1.0);
        if let Some(visual) = self.enemies.get_mut(&enemy) {
            visual.health_ratio = ratio;
        }
        self.record(PresenterCall::EnemyHealthRatio(enemy, ratio));
    }

    fn bounding_box(&self, entity: EntityHandle) -> Option<BoundingBox> {
        match entity {
            EntityHandle::Enemy(enemy) => self
                .enemy_position(enemy)
                .map(|position| self.enemy_footprint.at(position)),
            EntityHandle::Projectile(projectile) => self
                .projectile_position(projectile)
                .map(|position| self.projectile_footprint.at(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_footprint_hangs_below_pivot() {
        let bounds = Footprint::ENEMY_BODY.at(Vec2::new(100.0, 100.0));
        assert_eq!(bounds, BoundingBox::new(75.0, 80.0, 50.0, 50.0));
    }

    #[test]
    fn bounding_boxes_follow_placement() {
        let mut presenter = HeadlessPresenter::new();
        let projectile = ProjectileId::new(1);
        presenter.attach_projectile_visual(projectile, Vec2::new(10.0, 10.0));
        presenter.place_projectile_visual(projectile, Vec2::new(30.0, 40.0));

        assert_eq!(
            presenter.bounding_box(EntityHandle::Projectile(projectile)),
            Some(BoundingBox::new(25.0, 35.0, 10.0, 10.0))
        );
    }

    #[test]
    fn custom_footprints_shape_bounding_boxes() {
        let square = Footprint::new(Vec2::new(-10.0, -10.0), Vec2::new(20.0, 20.0));
        let mut presenter = HeadlessPresenter::new().with_footprints(square, square);
        let enemy = EnemyId::new(2);
        presenter.attach_enemy_visual(enemy, Vec2::new(50.0, 50.0));

        let bounds = presenter
            .bounding_box(EntityHandle::Enemy(enemy))
            .expect("enemy visual attached");
        assert_eq!(bounds.min(), Vec2::new(40.0, 40.0));
        assert_eq!(bounds.max(), Vec2::new(60.0, 60.0));
    }

    #[test]
    fn detached_visuals_have_no_bounding_box() {
        let mut presenter = HeadlessPresenter::new();
        let enemy = EnemyId::new(4);
        presenter.attach_enemy_visual(enemy, Vec2::ZERO);
        presenter.detach_enemy_visual(enemy);

        assert_eq!(presenter.bounding_box(EntityHandle::Enemy(enemy)), None);
        assert_eq!(presenter.enemy_visual_count(), 0);
    }

    #[test]
    fn recording_is_opt_in() {
        let mut quiet = HeadlessPresenter::new();
        quiet.attach_enemy_visual(EnemyId::new(0), Vec2::ZERO);
        assert!(quiet.calls().is_empty());

        let mut recording = HeadlessPresenter::recording();
        recording.attach_enemy_visual(EnemyId::new(0), Vec2::ZERO);
        recording.update_enemy_health_ratio(EnemyId::new(0), 0.5);
        assert_eq!(
            recording.take_calls(),
            vec![
                PresenterCall::AttachEnemy(EnemyId::new(0), Vec2::ZERO),
                PresenterCall::EnemyHealthRatio(EnemyId::new(0), 0.5),
            ]
        );
        assert!(recording.calls().is_empty());
        assert_eq!(recording.health_ratio(EnemyId::new(0)), Some(0.5));
    }
}
