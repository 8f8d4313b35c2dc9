//! Authoritative structure state management utilities.

use std::{collections::BTreeMap, time::Duration};

use nightfall_core::{progression, Health, StructureId, StructureKind, StructureSnapshot, Vec2};

/// State of a structure stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct StructureState {
    /// Identifier allocated by the world for the structure.
    pub(crate) id: StructureId,
    /// Kind of structure that was constructed.
    pub(crate) kind: StructureKind,
    /// Grid-snapped centre of the structure.
    pub(crate) position: Vec2,
    /// Remaining hit points.
    pub(crate) health: Health,
    /// Time until a tower may fire again.
    pub(crate) ready_in: Duration,
}

impl StructureState {
    pub(crate) fn size(&self) -> f32 {
        self.kind.size()
    }

    pub(crate) fn snapshot(&self) -> StructureSnapshot {
        StructureSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            size: self.size(),
            health: self.health,
            ready_in: self.ready_in,
        }
    }
}

/// Registry that stores structures in build order and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct StructureRegistry {
    entries: BTreeMap<StructureId, StructureState>,
    next_structure_id: StructureId,
}

impl StructureRegistry {
    /// Creates an empty structure registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_structure_id: StructureId::new(0),
        }
    }

    /// Reports whether a structure already stands on the grid-snapped position.
    pub(crate) fn is_occupied(&self, position: Vec2) -> bool {
        self.entries
            .values()
            .any(|structure| structure.position == position)
    }

    /// Stores a new structure at full health and returns its identifier.
    pub(crate) fn insert(
        &mut self,
        kind: StructureKind,
        position: Vec2,
        max_health: u32,
    ) -> StructureId {
        let id = self.next_structure_id;
        self.next_structure_id = StructureId::new(id.get().saturating_add(1));
        let previous = self.entries.insert(
            id,
            StructureState {
                id,
                kind,
                position,
                health: Health::full(max_health),
                ready_in: Duration::ZERO,
            },
        );
        debug_assert!(previous.is_none(), "structure identifiers are never reused");
        id
    }

    pub(crate) fn get(&self, id: StructureId) -> Option<&StructureState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: StructureId) -> Option<&mut StructureState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: StructureId) -> Option<StructureState> {
        self.entries.remove(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &StructureState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StructureState> {
        self.entries.values_mut()
    }

    /// Identifiers of every structure of the provided kind, in build order.
    pub(crate) fn ids_of(&self, kind: StructureKind) -> Vec<StructureId> {
        self.entries
            .values()
            .filter(|structure| structure.kind == kind)
            .map(|structure| structure.id)
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Raises the maximum health of every structure of the kind and heals it.
    pub(crate) fn reinforce(&mut self, kind: StructureKind, max_health: u32) {
        for structure in self.iter_mut().filter(|structure| structure.kind == kind) {
            structure.health.set_maximum(max_health);
            structure.health.heal(progression::UPGRADE_HEAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = StructureRegistry::new();
        let first = registry.insert(StructureKind::Wall, Vec2::new(0.0, 0.0), 100);
        let second = registry.insert(StructureKind::Tower, Vec2::new(50.0, 0.0), 125);

        assert_eq!(first, StructureId::new(0));
        assert_eq!(second, StructureId::new(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn occupancy_matches_exact_coordinates() {
        let mut registry = StructureRegistry::new();
        let _ = registry.insert(StructureKind::Trap, Vec2::new(100.0, 150.0), 150);

        assert!(registry.is_occupied(Vec2::new(100.0, 150.0)));
        assert!(!registry.is_occupied(Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn reinforce_heals_up_to_the_new_maximum() {
        let mut registry = StructureRegistry::new();
        let wall = registry.insert(StructureKind::Wall, Vec2::ZERO, 100);
        let tower = registry.insert(StructureKind::Tower, Vec2::new(50.0, 0.0), 125);
        if let Some(state) = registry.get_mut(wall) {
            state.health.damage(80);
        }

        registry.reinforce(StructureKind::Wall, 150);

        let wall_state = registry.get(wall).expect("wall");
        assert_eq!(wall_state.health.current(), 70);
        assert_eq!(wall_state.health.maximum(), 150);
        let tower_state = registry.get(tower).expect("tower");
        assert_eq!(tower_state.health.maximum(), 125);
    }

    #[test]
    fn removed_identifiers_are_not_reused() {
        let mut registry = StructureRegistry::new();
        let first = registry.insert(StructureKind::Wall, Vec2::ZERO, 100);
        assert!(registry.remove(first).is_some());
        let second = registry.insert(StructureKind::Wall, Vec2::ZERO, 100);
        assert_ne!(first, second);
        assert_eq!(registry.ids_of(StructureKind::Wall), vec![second]);
    }
}
