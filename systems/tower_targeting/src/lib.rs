#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.
//!
//! Only towers whose firing cooldown has elapsed are considered, so every
//! assignment it produces is a shot the world can take right away.

use nightfall_core::{
    progression, spatial, CreatureId, CreatureView, StructureId, StructureKind, StructureView,
    TowerTarget, Vec2,
};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
    creature_workspace: Vec<(CreatureId, Vec2)>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// Each tower looks at the single nearest creature, with the oldest
    /// creature winning ties, and only keeps it when it lies strictly inside
    /// the range granted by `tower_level`. A tower whose nearest creature is
    /// out of range gets no target even if a farther creature would be.
    /// Towers still cooling down are skipped entirely.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments.
    pub fn handle(
        &mut self,
        structures: &StructureView,
        creatures: &CreatureView,
        tower_level: u8,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if structures.is_empty() || creatures.is_empty() {
            return;
        }

        self.prepare_tower_workspace(structures);
        if self.tower_workspace.is_empty() {
            return;
        }

        self.creature_workspace.clear();
        self.creature_workspace.extend(
            creatures
                .iter()
                .map(|creature| (creature.id, creature.position)),
        );

        let range = progression::tower_range(tower_level);
        for tower in &self.tower_workspace {
            let nearest =
                spatial::select_nearest(tower.position, self.creature_workspace.iter().copied());
            let Some((creature, distance)) = nearest else {
                continue;
            };
            if distance >= range {
                continue;
            }

            let creature_position = creatures
                .get(creature)
                .map_or(tower.position, |snapshot| snapshot.position);
            out.push(TowerTarget {
                tower: tower.id,
                creature,
                tower_position: tower.position,
                creature_position,
            });
        }
    }

    fn prepare_tower_workspace(&mut self, structures: &StructureView) {
        self.tower_workspace.clear();
        let (lower, _) = structures.iter().size_hint();
        self.tower_workspace.reserve(lower);

        for snapshot in structures.iter() {
            if snapshot.kind != StructureKind::Tower || !snapshot.ready_in.is_zero() {
                continue;
            }
            self.tower_workspace.push(TowerWorkspace {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: StructureId,
    position: Vec2,
}
