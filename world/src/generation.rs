//! Scatters resource nodes and nests across a fresh world.

use nightfall_core::{progression, Health, ResourceKind, Vec2};
use tracing::debug;

use crate::{
    entities::{Nest, ResourceNode},
    placement::place_random,
    World,
};

impl World {
    /// Places the configured nodes and nests.
    ///
    /// Nodes only avoid each other. Nests avoid everything already occupying
    /// the world. Placements that run out of attempts are skipped.
    pub(crate) fn populate(&mut self) {
        let extent = self.config.extent();
        let attempts = self.config.placement_attempts;

        for kind in ResourceKind::ALL {
            let count = match kind {
                ResourceKind::Wood => self.config.wood_nodes,
                ResourceKind::Stone => self.config.stone_nodes,
                ResourceKind::Gold => self.config.gold_nodes,
            };
            let size = self.config.node_size;
            for _ in 0..count {
                let occupied = self.node_bodies();
                if let Some(position) =
                    place_random(&mut self.rng, extent, size, &occupied, attempts)
                {
                    self.nodes.push(ResourceNode {
                        kind,
                        position,
                        size,
                        health: Health::full(progression::NODE_HEALTH),
                    });
                }
            }
        }

        let size = self.config.nest_size;
        for _ in 0..self.config.nests {
            let occupied = self.occupied_bodies();
            if let Some(position) = place_random(&mut self.rng, extent, size, &occupied, attempts) {
                self.nests.push(Nest { position, size });
            }
        }

        debug!(
            nodes = self.nodes.len(),
            nests = self.nests.len(),
            "world_generated"
        );
    }

    pub(crate) fn node_bodies(&self) -> Vec<(Vec2, f32)> {
        self.nodes
            .iter()
            .map(|node| (node.position, node.size))
            .collect()
    }

    /// Every static body in the world: nests, structures and resource nodes.
    pub(crate) fn occupied_bodies(&self) -> Vec<(Vec2, f32)> {
        self.nests
            .iter()
            .map(|nest| (nest.position, nest.size))
            .chain(
                self.structures
                    .iter()
                    .map(|structure| (structure.position, structure.size())),
            )
            .chain(self.nodes.iter().map(|node| (node.position, node.size)))
            .collect()
    }
}
