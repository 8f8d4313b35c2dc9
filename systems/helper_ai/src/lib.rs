#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks a target for every helper.
//!
//! A helper defends itself against the nearest creature closer than
//! [`progression::HELPER_AGGRO_RADIUS`]; otherwise it walks to the nearest
//! resource node and gathers from it.

use nightfall_core::{
    progression, spatial, Command, CreatureView, HelperTarget, HelperView, ResourceNodeView, Vec2,
};

/// Helper steering system that reuses scratch buffers of candidate targets.
#[derive(Debug, Default)]
pub struct HelperAi {
    creature_workspace: Vec<(HelperTarget, Vec2)>,
    node_workspace: Vec<(HelperTarget, Vec2)>,
}

impl HelperAi {
    /// Creates a new helper steering system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::StepHelper` per helper that has anything to pursue.
    pub fn handle(
        &mut self,
        helpers: &HelperView,
        creatures: &CreatureView,
        nodes: &ResourceNodeView,
        out: &mut Vec<Command>,
    ) {
        if helpers.is_empty() {
            return;
        }

        self.creature_workspace.clear();
        self.creature_workspace.extend(
            creatures
                .iter()
                .map(|creature| (HelperTarget::Creature(creature.id), creature.position)),
        );
        self.node_workspace.clear();
        self.node_workspace.extend(
            nodes
                .iter()
                .map(|node| (HelperTarget::Node(node.id), node.position)),
        );

        for helper in helpers.iter() {
            let origin = helper.position;
            let threat = spatial::select_nearest(
                origin,
                self.creature_workspace.iter().copied().filter(|(_, position)| {
                    spatial::distance(origin, *position) < progression::HELPER_AGGRO_RADIUS
                }),
            );
            let target = threat
                .or_else(|| spatial::select_nearest(origin, self.node_workspace.iter().copied()))
                .map(|(target, _)| target);

            if let Some(target) = target {
                out.push(Command::StepHelper {
                    helper: helper.id,
                    target,
                });
            }
        }
    }
}
