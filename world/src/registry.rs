//! Ordered ownership of live entities.

use bastion_core::{Handle, Presenter, Vec2};

/// Behaviour shared by every entity stored in a [`Registry`].
pub trait Entity {
    /// Identity type allocated by the registry.
    type Id: Handle;
    /// Parameters required to construct the entity.
    type Seed;

    /// Builds the entity under the identity allocated by the registry.
    fn from_seed(id: Self::Id, seed: Self::Seed) -> Self;

    /// Identity of the entity.
    fn id(&self) -> Self::Id;

    /// Current position of the entity.
    fn position(&self) -> Vec2;

    /// Integrates the entity's motion over `dt` frame units.
    fn advance(&mut self, dt: f32);

    /// Asks the presenter to create the entity's visual.
    fn attach_visual(&self, presenter: &mut dyn Presenter);

    /// Asks the presenter to move the entity's visual to its position.
    fn place_visual(&self, presenter: &mut dyn Presenter);

    /// Asks the presenter to destroy the entity's visual.
    fn detach_visual(&self, presenter: &mut dyn Presenter);
}

/// Exclusive owner of one kind of live entity.
///
/// Entries keep insertion order, which is also ascending identity order since
/// identities are allocated here and never reused.
#[derive(Debug)]
pub struct Registry<E: Entity> {
    entries: Vec<E>,
    next_id: u64,
}

impl<E: Entity> Default for Registry<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: Entity> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity from `seed`, appends it, and attaches its visual.
    pub fn spawn(&mut self, seed: E::Seed, presenter: &mut dyn Presenter) -> E::Id {
        let id = E::Id::from_raw(self.next_id);
        self.next_id += 1;
        let entity = E::from_seed(id, seed);
        entity.attach_visual(presenter);
        self.entries.push(entity);
        id
    }

    /// Removes the entity and detaches its visual.
    ///
    /// Unknown identities are ignored: the call returns `None` and the
    /// presenter is not contacted.
    pub fn remove(&mut self, id: E::Id, presenter: &mut dyn Presenter) -> Option<E> {
        let index = self.index_of(id)?;
        let entity = self.entries.remove(index);
        entity.detach_visual(presenter);
        Some(entity)
    }

    /// Integrates every entity and reports the new placements.
    pub fn advance(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        for entity in &mut self.entries {
            entity.advance(dt);
            entity.place_visual(presenter);
        }
    }

    /// Snapshot of the live identities in iteration order.
    ///
    /// Callers that remove entities while walking the registry iterate this
    /// snapshot and look each identity up again.
    #[must_use]
    pub fn ids(&self) -> Vec<E::Id> {
        self.entries.iter().map(Entity::id).collect()
    }

    /// Visits every live entity in iteration order.
    pub fn for_each(&self, f: impl FnMut(&E)) {
        self.entries.iter().for_each(f);
    }

    /// Iterator over the live entities in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    /// Looks up a live entity.
    #[must_use]
    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.index_of(id).map(|index| &self.entries[index])
    }

    /// Looks up a live entity for mutation.
    pub fn get_mut(&mut self, id: E::Id) -> Option<&mut E> {
        let index = self.index_of(id)?;
        self.entries.get_mut(index)
    }

    /// Reports whether the identity belongs to a live entity.
    #[must_use]
    pub fn contains(&self, id: E::Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the registry holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Identities ascend with insertion order, so the entries stay sorted.
    fn index_of(&self, id: E::Id) -> Option<usize> {
        self.entries.binary_search_by_key(&id, Entity::id).ok()
    }
}
