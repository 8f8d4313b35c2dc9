#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that steers every creature toward its nearest target.
//!
//! Creatures consider the player and every wall or tower. Traps never attract
//! them. The nearest candidate wins, and on equal distance the player beats
//! structures and older structures beat newer ones.

use nightfall_core::{
    spatial, Command, CreatureTarget, CreatureView, PlayerSnapshot, StructureView, Vec2,
};

/// Creature steering system that reuses a scratch buffer of candidate targets.
#[derive(Debug, Default)]
pub struct CreatureAi {
    candidates: Vec<(CreatureTarget, Vec2)>,
}

impl CreatureAi {
    /// Creates a new creature steering system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::StepCreature` per creature, in spawn order.
    pub fn handle(
        &mut self,
        player: &PlayerSnapshot,
        creatures: &CreatureView,
        structures: &StructureView,
        out: &mut Vec<Command>,
    ) {
        if creatures.is_empty() {
            return;
        }

        self.prepare_candidates(player, structures);

        out.reserve(creatures.len());
        for creature in creatures.iter() {
            let nearest =
                spatial::select_nearest(creature.position, self.candidates.iter().copied());
            if let Some((target, _)) = nearest {
                out.push(Command::StepCreature {
                    creature: creature.id,
                    target,
                });
            }
        }
    }

    fn prepare_candidates(&mut self, player: &PlayerSnapshot, structures: &StructureView) {
        self.candidates.clear();
        self.candidates
            .push((CreatureTarget::Player, player.position));
        self.candidates.extend(
            structures
                .iter()
                .filter(|structure| structure.kind.attracts_creatures())
                .map(|structure| (CreatureTarget::Structure(structure.id), structure.position)),
        );
    }
}
