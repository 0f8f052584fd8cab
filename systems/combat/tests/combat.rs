use bastion_core::{ArenaBounds, Bearing, EnemyId, Event, ProjectileId, Vec2};
use bastion_presenter::{Footprint, HeadlessPresenter, PresenterCall};
use bastion_system_combat::Combat;
use bastion_world::{EnemyRegistry, EnemySeed, ProjectileRegistry, ProjectileSeed};

struct Arena {
    enemies: EnemyRegistry,
    projectiles: ProjectileRegistry,
    presenter: HeadlessPresenter,
    combat: Combat,
    events: Vec<Event>,
}

impl Arena {
    fn new() -> Self {
        Self::with_presenter(HeadlessPresenter::recording())
    }

    fn with_presenter(presenter: HeadlessPresenter) -> Self {
        Self {
            enemies: EnemyRegistry::new(),
            projectiles: ProjectileRegistry::new(),
            presenter,
            combat: Combat::new(),
            events: Vec::new(),
        }
    }

    fn enemy(&mut self, x: f32, y: f32, max_health: u32) -> EnemyId {
        self.enemies.spawn(
            EnemySeed {
                position: Vec2::new(x, y),
                bearing: Bearing::EAST,
                speed: 1.0,
                max_health,
            },
            &mut self.presenter,
        )
    }

    fn projectile(&mut self, x: f32, y: f32, damage: u32) -> ProjectileId {
        self.projectiles.spawn(
            ProjectileSeed {
                position: Vec2::new(x, y),
                bearing: Bearing::EAST,
                speed: 5.0,
                damage,
            },
            &mut self.presenter,
        )
    }

    fn resolve(&mut self) {
        self.combat.resolve_hits(
            &mut self.enemies,
            &mut self.projectiles,
            &mut self.presenter,
            &mut self.events,
        );
    }

    fn cull(&mut self) {
        self.combat.cull_out_of_bounds(
            &mut self.projectiles,
            ArenaBounds::new(1280.0, 720.0),
            &mut self.presenter,
            &mut self.events,
        );
    }

    fn health(&self, enemy: EnemyId) -> Option<u32> {
        self.enemies.get(enemy).map(|enemy| enemy.health())
    }
}

#[test]
fn projectile_overlapping_two_enemies_damages_only_the_oldest() {
    let mut arena = Arena::new();
    let older = arena.enemy(100.0, 100.0, 100);
    let newer = arena.enemy(110.0, 100.0, 100);
    let projectile = arena.projectile(105.0, 100.0, 20);

    arena.resolve();

    assert_eq!(arena.health(older), Some(80));
    assert_eq!(arena.health(newer), Some(100));
    assert!(arena.projectiles.is_empty());
    assert_eq!(
        arena.events,
        vec![
            Event::ProjectileSpent {
                projectile,
                enemy: older,
            },
            Event::EnemyDamaged {
                enemy: older,
                projectile,
                health: 80,
            },
        ]
    );
}

#[test]
fn lethal_hit_removes_enemy_and_its_visual() {
    let mut arena = Arena::new();
    let enemy = arena.enemy(300.0, 300.0, 20);
    let projectile = arena.projectile(300.0, 300.0, 20);

    arena.resolve();

    assert!(arena.enemies.is_empty());
    assert!(arena.projectiles.is_empty());
    assert_eq!(arena.presenter.enemy_visual_count(), 0);
    assert_eq!(arena.presenter.projectile_visual_count(), 0);
    assert_eq!(
        arena.events,
        vec![
            Event::ProjectileSpent { projectile, enemy },
            Event::EnemyDamaged {
                enemy,
                projectile,
                health: 0,
            },
            Event::EnemyKilled { enemy },
        ]
    );
    let calls = arena.presenter.take_calls();
    let tail = &calls[calls.len() - 3..];
    assert_eq!(
        tail,
        &[
            PresenterCall::DetachProjectile(projectile),
            PresenterCall::EnemyHealthRatio(enemy, 0.0),
            PresenterCall::DetachEnemy(enemy),
        ]
    );
}

#[test]
fn projectile_after_a_kill_does_not_hit_the_removed_enemy() {
    let mut arena = Arena::new();
    let enemy = arena.enemy(300.0, 300.0, 20);
    let first = arena.projectile(300.0, 300.0, 20);
    let second = arena.projectile(302.0, 300.0, 20);

    arena.resolve();

    assert!(!arena.enemies.contains(enemy));
    assert!(!arena.projectiles.contains(first));
    assert!(arena.projectiles.contains(second), "nothing left to hit");
    let kills = arena
        .events
        .iter()
        .filter(|event| matches!(event, Event::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 1);
}

#[test]
fn two_projectiles_can_both_hit_a_surviving_enemy() {
    let mut arena = Arena::new();
    let enemy = arena.enemy(300.0, 300.0, 100);
    let _ = arena.projectile(300.0, 300.0, 20);
    let _ = arena.projectile(301.0, 300.0, 20);

    arena.resolve();

    assert_eq!(arena.health(enemy), Some(60));
    assert!(arena.projectiles.is_empty());
}

#[test]
fn distant_projectiles_fly_on() {
    let mut arena = Arena::new();
    let enemy = arena.enemy(300.0, 300.0, 100);
    let projectile = arena.projectile(600.0, 600.0, 20);

    arena.resolve();

    assert_eq!(arena.health(enemy), Some(100));
    assert!(arena.projectiles.contains(projectile));
    assert!(arena.events.is_empty());
}

#[test]
fn touching_footprints_do_not_collide() {
    let mut arena = Arena::new();
    // Enemy body spans x in [275, 325]; projectile disc spans [325, 335].
    let enemy = arena.enemy(300.0, 300.0, 100);
    let _ = arena.projectile(330.0, 300.0, 20);

    arena.resolve();

    assert_eq!(arena.health(enemy), Some(100));
    assert_eq!(arena.projectiles.len(), 1);
}

#[test]
fn collisions_follow_the_presenter_footprints() {
    let blast = Footprint::new(Vec2::new(-100.0, -100.0), Vec2::new(200.0, 200.0));
    let presenter = HeadlessPresenter::new().with_footprints(Footprint::ENEMY_BODY, blast);
    let mut arena = Arena::with_presenter(presenter);
    let enemy = arena.enemy(300.0, 300.0, 100);
    let _ = arena.projectile(400.0, 300.0, 20);

    arena.resolve();

    assert_eq!(arena.health(enemy), Some(80));
    assert!(arena.projectiles.is_empty());
}

#[test]
fn culling_removes_only_projectiles_outside_the_arena() {
    let mut arena = Arena::new();
    let inside = arena.projectile(640.0, 360.0, 20);
    let on_edge = arena.projectile(1280.0, 720.0, 20);
    let past_right = arena.projectile(1280.5, 360.0, 20);
    let above = arena.projectile(640.0, -1.0, 20);

    arena.cull();

    assert_eq!(arena.projectiles.ids(), vec![inside, on_edge]);
    assert_eq!(
        arena.events,
        vec![
            Event::ProjectileCulled {
                projectile: past_right,
            },
            Event::ProjectileCulled { projectile: above },
        ]
    );
    assert_eq!(arena.presenter.projectile_visual_count(), 2);
}
