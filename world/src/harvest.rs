//! Resource gathering by the player and by helpers, plus helper movement.

use std::time::Duration;

use nightfall_core::{progression, spatial, EffectKind, Event, HelperId, HelperTarget, NodeId};

use crate::{placement::place_random, World};

const RESOURCE_EFFECT: Duration = Duration::from_millis(500);

impl World {
    /// Player melee harvest against every node currently touching the player.
    pub(crate) fn harvest_resources(&mut self, out_events: &mut Vec<Event>) {
        let level = self.levels.weapon;
        let (position, size) = (self.player.position, self.player.size);
        for index in 0..self.nodes.len() {
            let touching = self.nodes.get(index).is_some_and(|node| {
                spatial::in_contact(position, size, node.position, node.size)
            });
            if touching {
                self.harvest_node(
                    index,
                    progression::harvest_damage(level),
                    progression::harvest_yield(level),
                    out_events,
                );
            }
        }
    }

    /// Moves a helper one step toward its target, unless a creature blocks the
    /// way, then resolves contact. Creature kills by helpers pay no reward.
    pub(crate) fn step_helper(
        &mut self,
        id: HelperId,
        target: HelperTarget,
        out_events: &mut Vec<Event>,
    ) {
        let (target_position, target_size) = match target {
            HelperTarget::Creature(creature) => match self.creatures.get(&creature) {
                Some(creature) => (creature.position, creature.size),
                None => return,
            },
            HelperTarget::Node(node) => match self.nodes.get(node.get() as usize) {
                Some(node) => (node.position, node.size),
                None => return,
            },
        };
        let Some(helper) = self.helpers.get(&id) else {
            return;
        };

        let (size, mut position) = (helper.size, helper.position);
        let next = spatial::step_toward(position, target_position, helper.speed);
        if !self.blocked_by_creature(next, size, None) {
            position = next;
            if let Some(helper) = self.helpers.get_mut(&id) {
                helper.position = next;
            }
        }

        if !spatial::in_contact(position, size, target_position, target_size) {
            return;
        }

        match target {
            HelperTarget::Creature(creature) => {
                let depleted = match self.creatures.get_mut(&creature) {
                    Some(state) => {
                        state.health.damage(progression::HELPER_CREATURE_DAMAGE);
                        state.health.is_depleted()
                    }
                    None => false,
                };
                if depleted {
                    self.remove_creature(creature, false, out_events);
                }
            }
            HelperTarget::Node(node) => self.harvest_node(
                node.get() as usize,
                progression::HELPER_HARVEST_DAMAGE,
                progression::HELPER_HARVEST_YIELD,
                out_events,
            ),
        }
    }

    fn harvest_node(
        &mut self,
        index: usize,
        damage: u32,
        amount: u32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        node.health.damage(damage);
        let (kind, position, depleted) = (node.kind, node.position, node.health.is_depleted());

        self.player.wallet.deposit(kind, amount);
        self.push_effect(EffectKind::Resource, position, RESOURCE_EFFECT);
        out_events.push(Event::ResourceHarvested {
            node: NodeId::new(index as u32),
            kind,
            amount,
        });

        if depleted {
            self.respawn_node(index, out_events);
        }
    }

    /// Heals a depleted node and moves it somewhere clear of every node,
    /// itself included. It stays put when no free spot is found.
    fn respawn_node(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let occupied = self.node_bodies();
        let extent = self.config.extent();
        let attempts = self.config.placement_attempts;
        let Some(size) = self.nodes.get(index).map(|node| node.size) else {
            return;
        };
        let relocated = place_random(&mut self.rng, extent, size, &occupied, attempts);

        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        node.health.restore();
        if let Some(position) = relocated {
            node.position = position;
        }
        out_events.push(Event::NodeRespawned {
            node: NodeId::new(index as u32),
            position: node.position,
        });
    }

    #[cfg(test)]
    pub(crate) fn place_node_for_test(&mut self, index: usize, position: nightfall_core::Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use nightfall_core::{
        spatial, Command, CreatureKind, Event, HelperId, HelperTarget, NodeId, ResourceKind, Vec2,
    };

    use crate::{apply, query, World, WorldConfig};

    fn single_wood_world(width: f32) -> World {
        World::new(WorldConfig {
            width,
            height: width,
            wood_nodes: 1,
            starting_gold: 100,
            ..WorldConfig::empty(13)
        })
    }

    #[test]
    fn player_harvest_depletes_and_heals_node() {
        let mut world = single_wood_world(80.0);
        let mut events = Vec::new();
        let first = query::resource_nodes(&world)
            .iter()
            .next()
            .map(|node| node.position);
        assert_eq!(first, Some(Vec2::new(40.0, 40.0)));

        for _ in 0..66 {
            apply(&mut world, Command::HarvestResources, &mut events);
        }
        let nodes = query::resource_nodes(&world);
        let node = nodes.get(NodeId::new(0)).expect("node");
        assert_eq!(node.health.current(), 2);
        assert_eq!(query::player(&world).wallet.wood(), 150 + 132);

        apply(&mut world, Command::HarvestResources, &mut events);
        let nodes = query::resource_nodes(&world);
        let node = nodes.get(NodeId::new(0)).expect("node");
        assert_eq!(node.health.current(), 200);
        assert_eq!(node.kind, ResourceKind::Wood);
        assert_eq!(query::player(&world).wallet.wood(), 150 + 134);
        assert!(events.contains(&Event::NodeRespawned {
            node: NodeId::new(0),
            position: Vec2::new(40.0, 40.0),
        }));
    }

    #[test]
    fn depleted_node_relocates_clear_of_others() {
        let mut world = single_wood_world(4000.0);
        world.place_node_for_test(0, Vec2::new(2000.0, 2000.0));
        let mut events = Vec::new();

        for _ in 0..67 {
            apply(&mut world, Command::HarvestResources, &mut events);
        }

        let nodes = query::resource_nodes(&world);
        let node = nodes.get(NodeId::new(0)).expect("node");
        assert_eq!(node.health.current(), 200);
        assert!(node.position.distance(Vec2::new(2000.0, 2000.0)) >= 100.0);
    }

    fn helper_step(world: &mut World, events: &mut Vec<Event>) {
        apply(
            world,
            Command::StepHelper {
                helper: HelperId::new(0),
                target: HelperTarget::Node(NodeId::new(0)),
            },
            events,
        );
    }

    fn node_health(world: &World) -> u32 {
        query::resource_nodes(world)
            .get(NodeId::new(0))
            .map(|node| node.health.current())
            .expect("node")
    }

    #[test]
    fn helper_gathers_for_the_player() {
        let mut world = single_wood_world(4000.0);
        world.place_node_for_test(0, Vec2::new(2060.0, 2060.0));
        let mut events = Vec::new();
        apply(&mut world, Command::HireHelper, &mut events);
        assert!(events.contains(&Event::HelperHired {
            helper: HelperId::new(0)
        }));
        let wood_before = query::player(&world).wallet.wood();

        let mut walked = 0;
        loop {
            events.clear();
            helper_step(&mut world, &mut events);
            if !events.is_empty() {
                break;
            }
            walked += 1;
            assert!(walked < 200, "helper never reached the node");
        }

        assert_eq!(
            events,
            vec![Event::ResourceHarvested {
                node: NodeId::new(0),
                kind: ResourceKind::Wood,
                amount: 2,
            }]
        );
        assert_eq!(node_health(&world), 197);
        assert_eq!(query::player(&world).wallet.wood(), wood_before + 2);

        helper_step(&mut world, &mut events);
        assert_eq!(node_health(&world), 194);
        assert_eq!(query::player(&world).wallet.wood(), wood_before + 4);
    }

    #[test]
    fn creature_in_the_way_holds_the_helper() {
        let mut world = single_wood_world(4000.0);
        world.place_node_for_test(0, Vec2::new(2300.0, 2000.0));
        let mut events = Vec::new();
        apply(&mut world, Command::HireHelper, &mut events);
        let start = query::helpers(&world)
            .iter()
            .next()
            .map(|helper| helper.position)
            .expect("helper was hired");
        let next = spatial::step_toward(start, Vec2::new(2300.0, 2000.0), 1.0);
        apply(
            &mut world,
            Command::SpawnCreature {
                kind: CreatureKind::Standard,
                position: next,
                wave: 1,
            },
            &mut events,
        );

        helper_step(&mut world, &mut events);

        let helper = query::helpers(&world)
            .iter()
            .next()
            .map(|helper| helper.position);
        assert_eq!(helper, Some(start));
        assert_eq!(node_health(&world), 200);
    }
}
