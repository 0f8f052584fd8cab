use bastion_core::Event;

/// Running tally of what happened during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Enemies that entered the arena.
    pub enemies_spawned: u64,
    /// Enemies removed after running out of health.
    pub enemies_killed: u64,
    /// Enemies removed by external command.
    pub enemies_dismissed: u64,
    /// Projectiles fired from the tower.
    pub projectiles_fired: u64,
    /// Projectiles consumed by hitting an enemy.
    pub hits: u64,
    /// Projectiles removed after leaving the arena.
    pub projectiles_culled: u64,
}

impl SessionStats {
    /// Folds a batch of events into the tally.
    pub fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemySpawned { .. } => self.enemies_spawned += 1,
                Event::EnemyKilled { .. } => self.enemies_killed += 1,
                Event::EnemyDismissed { .. } => self.enemies_dismissed += 1,
                Event::ProjectileFired { .. } => self.projectiles_fired += 1,
                Event::ProjectileSpent { .. } => self.hits += 1,
                Event::ProjectileCulled { .. } => self.projectiles_culled += 1,
                Event::TimeAdvanced { .. } | Event::EnemyDamaged { .. } => {}
            }
        }
    }

    /// Projectiles still unaccounted for: fired but neither spent nor culled.
    #[must_use]
    pub fn projectiles_in_flight(&self) -> u64 {
        self.projectiles_fired
            .saturating_sub(self.hits)
            .saturating_sub(self.projectiles_culled)
    }
}
