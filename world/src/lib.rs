#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Nightfall.
//!
//! The world owns every entity collection and is mutated exclusively through
//! [`apply`]. Read access goes through the [`query`] module, which hands out
//! snapshots so callers never hold references into live collections.

mod clock;
mod combat;
mod config;
mod economy;
mod entities;
mod generation;
mod harvest;
mod placement;
mod structures;

use std::{collections::BTreeMap, time::Duration};

use nightfall_core::{
    progression, spatial, Command, CreatureId, CreatureKind, EffectKind, Event, HelperId, Levels,
    Rejection, ResourceKind, Vec2, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub use config::WorldConfig;

use clock::{DayNightClock, Transition};
use entities::{Creature, Effect, Helper, Nest, Player, Projectile, ResourceNode};
use structures::StructureRegistry;

/// Represents the authoritative Nightfall world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    rng: ChaCha8Rng,
    player: Player,
    levels: Levels,
    creatures: BTreeMap<CreatureId, Creature>,
    next_creature_id: CreatureId,
    structures: StructureRegistry,
    helpers: BTreeMap<HelperId, Helper>,
    next_helper_id: HelperId,
    nodes: Vec<ResourceNode>,
    nests: Vec<Nest>,
    projectiles: Vec<Projectile>,
    effects: Vec<Effect>,
    clock: DayNightClock,
    game_over: bool,
}

impl World {
    /// Creates a new world and generates its initial layout.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: Player::spawn(&config),
            levels: starting_levels(),
            creatures: BTreeMap::new(),
            next_creature_id: CreatureId::new(0),
            structures: StructureRegistry::new(),
            helpers: BTreeMap::new(),
            next_helper_id: HelperId::new(0),
            nodes: Vec::new(),
            nests: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            clock: DayNightClock::new(config.cycle_duration),
            game_over: false,
            config,
        };
        world.populate();
        world
    }

    /// Restores every mutable value to its initial state and regenerates the
    /// layout. The random stream carries on, so each epoch gets a new layout.
    fn reset(&mut self) {
        self.player = Player::spawn(&self.config);
        self.levels = starting_levels();
        self.creatures.clear();
        self.next_creature_id = CreatureId::new(0);
        self.structures = StructureRegistry::new();
        self.helpers.clear();
        self.next_helper_id = HelperId::new(0);
        self.nodes.clear();
        self.nests.clear();
        self.projectiles.clear();
        self.effects.clear();
        self.clock = DayNightClock::new(self.config.cycle_duration);
        self.game_over = false;
        self.populate();
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        let extent = self.config.extent();
        let player = &mut self.player;
        player.weapon_cooldown = player.weapon_cooldown.saturating_sub(dt);
        player.mana = (player.mana + self.config.mana_regen_per_step).min(player.max_mana);
        let next = player.position + player.intent.vector() * player.speed;
        player.position = next.max(Vec2::ZERO).min(extent);

        for structure in self.structures.iter_mut() {
            structure.ready_in = structure.ready_in.saturating_sub(dt);
        }
        for creature in self.creatures.values_mut() {
            creature.attack_cooldown = creature.attack_cooldown.saturating_sub(dt);
        }
        for effect in &mut self.effects {
            effect.elapsed = effect.elapsed.saturating_add(dt);
        }
        self.effects.retain(|effect| !effect.is_expired());
    }

    fn advance_cycle(&mut self, out_events: &mut Vec<Event>) {
        match self.clock.advance() {
            Transition::None => {}
            Transition::Dusk { wave } => {
                info!(wave, next_wave = self.clock.wave(), "night_fell");
                out_events.push(Event::NightFell { wave });
            }
            Transition::Dawn => {
                let wave = self.clock.wave();
                info!(wave, "day_broke");
                out_events.push(Event::DayBroke { wave });
            }
        }

        let clock = self.clock.snapshot();
        out_events.push(Event::CycleAdvanced {
            cycle_time: clock.cycle_time,
            is_day: clock.is_day,
            wave: clock.wave,
        });
    }

    fn spawn_creature(
        &mut self,
        kind: CreatureKind,
        position: Vec2,
        wave: u32,
        out_events: &mut Vec<Event>,
    ) {
        let id = self.next_creature_id;
        self.next_creature_id = CreatureId::new(id.get().saturating_add(1));
        let _ = self
            .creatures
            .insert(id, Creature::new(id, kind, position, wave));
        out_events.push(Event::CreatureSpawned {
            creature: id,
            kind,
            position,
        });
    }

    /// Reports whether a body at `position` would overlap any creature other
    /// than `exclude`. The player is never subject to this check.
    fn blocked_by_creature(&self, position: Vec2, size: f32, exclude: Option<CreatureId>) -> bool {
        self.creatures.values().any(|creature| {
            Some(creature.id) != exclude
                && spatial::in_contact(position, size, creature.position, creature.size)
        })
    }

    fn push_effect(&mut self, kind: EffectKind, position: Vec2, duration: Duration) {
        self.effects.push(Effect::new(kind, position, duration));
    }

    /// Removes a creature whose health ran out, paying out the kill reward when
    /// `credited` is set.
    fn remove_creature(&mut self, id: CreatureId, credited: bool, out_events: &mut Vec<Event>) {
        if self.creatures.remove(&id).is_none() {
            return;
        }

        if credited {
            let (score, gold) = progression::kill_reward(self.clock.wave());
            self.player.score = self.player.score.saturating_add(score);
            self.player.wallet.deposit(ResourceKind::Gold, gold);
        }
        out_events.push(Event::CreatureKilled {
            creature: id,
            credited,
        });
    }

    fn end_epoch(&mut self, out_events: &mut Vec<Event>) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        info!(
            score = self.player.score,
            wave = self.clock.wave(),
            "game_over"
        );
        out_events.push(Event::GameOver {
            score: self.player.score,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

fn starting_levels() -> Levels {
    Levels {
        weapon: progression::STARTING_LEVEL,
        wall: progression::STARTING_LEVEL,
        tower: progression::STARTING_LEVEL,
    }
}

fn reject(reason: Rejection, out_events: &mut Vec<Event>) {
    debug!(?reason, "command_rejected");
    out_events.push(Event::CommandRejected { reason });
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the epoch has ended only [`Command::ResetWorld`] has any effect.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.game_over && !matches!(command, Command::ResetWorld) {
        return;
    }

    match command {
        Command::SetMoveIntent { intent } => {
            world.player.intent = intent;
        }
        Command::AimAndFire { target } => world.aim_and_fire(target, out_events),
        Command::CastSpell => world.cast_spell(out_events),
        Command::Build { kind } => world.build(kind, out_events),
        Command::HireHelper => world.hire_helper(out_events),
        Command::Upgrade { track } => world.upgrade(track, out_events),
        Command::ResetWorld => {
            world.reset();
            info!(
                nodes = world.nodes.len(),
                nests = world.nests.len(),
                "world_reset"
            );
            out_events.push(Event::WorldReset);
        }
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::StepCreature { creature, target } => {
            world.step_creature(creature, target, out_events);
        }
        Command::StepHelper { helper, target } => world.step_helper(helper, target, out_events),
        Command::AdvanceProjectiles => world.advance_projectiles(out_events),
        Command::HarvestResources => world.harvest_resources(out_events),
        Command::FireTowerProjectile { tower, target } => {
            world.fire_tower(tower, target, out_events);
        }
        Command::TriggerTraps => world.trigger_traps(out_events),
        Command::AdvanceCycle => world.advance_cycle(out_events),
        Command::SpawnCreature {
            kind,
            position,
            wave,
        } => world.spawn_creature(kind, position, wave, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use nightfall_core::{
        ClockSnapshot, CreatureView, EffectSnapshot, HelperView, Levels, NestId, NestSnapshot,
        NodeId, PlayerSnapshot, ProjectileSnapshot, ResourceNodeView, StructureView, Viewport,
    };

    use super::{World, WorldConfig};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Captures the player's position, wallet, score, mana and weapon state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot(world.levels.weapon)
    }

    /// Current level of each upgrade track.
    #[must_use]
    pub fn levels(world: &World) -> Levels {
        world.levels
    }

    /// Captures a read-only view of the creatures in spawn order.
    #[must_use]
    pub fn creatures(world: &World) -> CreatureView {
        CreatureView::from_snapshots(
            world
                .creatures
                .values()
                .map(|creature| creature.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the structures in build order.
    #[must_use]
    pub fn structures(world: &World) -> StructureView {
        StructureView::from_snapshots(
            world
                .structures
                .iter()
                .map(|structure| structure.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the helpers in hiring order.
    #[must_use]
    pub fn helpers(world: &World) -> HelperView {
        HelperView::from_snapshots(
            world
                .helpers
                .values()
                .map(|helper| helper.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the resource nodes.
    #[must_use]
    pub fn resource_nodes(world: &World) -> ResourceNodeView {
        ResourceNodeView::from_snapshots(
            world
                .nodes
                .iter()
                .enumerate()
                .map(|(index, node)| node.snapshot(NodeId::new(index as u32)))
                .collect(),
        )
    }

    /// Captures every projectile in flight, oldest first.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures every nest.
    #[must_use]
    pub fn nests(world: &World) -> Vec<NestSnapshot> {
        world
            .nests
            .iter()
            .enumerate()
            .map(|(index, nest)| nest.snapshot(NestId::new(index as u32)))
            .collect()
    }

    /// Captures the live cosmetic effects.
    #[must_use]
    pub fn effects(world: &World) -> Vec<EffectSnapshot> {
        world
            .effects
            .iter()
            .map(|effect| effect.snapshot())
            .collect()
    }

    /// Captures the day/night clock and wave counter.
    #[must_use]
    pub fn clock(world: &World) -> ClockSnapshot {
        world.clock.snapshot()
    }

    /// Reports whether a creature reached the player and the epoch ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Camera window centred on the player and clamped to the world.
    #[must_use]
    pub fn viewport(world: &World) -> Viewport {
        Viewport::following(
            world.player.position,
            world.config.viewport_size(),
            world.config.extent(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_core::{MoveIntent, StructureKind};

    fn empty_world() -> World {
        World::new(WorldConfig::empty(7))
    }

    #[test]
    fn new_world_starts_at_centre_with_starting_wallet() {
        let world = World::default();
        let player = query::player(&world);

        assert_eq!(player.position, Vec2::new(2000.0, 2000.0));
        assert_eq!(player.wallet, nightfall_core::Wallet::new(150, 150, 75));
        assert_eq!(player.mana, 100.0);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(query::levels(&world), starting_levels());
    }

    #[test]
    fn tick_moves_player_and_clamps_to_bounds() {
        let mut world = empty_world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetMoveIntent {
                intent: MoveIntent::from_keys(false, false, true, false),
            },
            &mut events,
        );

        for _ in 0..400 {
            apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_millis(16),
                },
                &mut events,
            );
        }

        let player = query::player(&world);
        assert_eq!(player.position, Vec2::new(0.0, 2000.0));
        assert_eq!(
            events.first(),
            Some(&Event::TimeAdvanced {
                dt: Duration::from_millis(16),
            })
        );
    }

    #[test]
    fn effects_expire_after_their_duration() {
        let mut world = empty_world();
        world.push_effect(EffectKind::Hit, Vec2::ZERO, Duration::from_millis(200));
        let mut events = Vec::new();

        for _ in 0..12 {
            apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_millis(16),
                },
                &mut events,
            );
        }
        assert_eq!(query::effects(&world).len(), 1);

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        assert!(query::effects(&world).is_empty());
    }

    #[test]
    fn game_over_ignores_everything_but_reset() {
        let mut world = empty_world();
        let mut events = Vec::new();
        world.end_epoch(&mut events);
        events.clear();

        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Wall,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert!(query::structures(&world).is_empty());

        apply(&mut world, Command::ResetWorld, &mut events);
        assert_eq!(events, vec![Event::WorldReset]);
        assert!(!query::is_game_over(&world));
    }

    #[test]
    fn cycle_advance_reports_transition_before_tick() {
        let config = WorldConfig {
            cycle_duration: 1,
            ..WorldConfig::empty(1)
        };
        let mut world = World::new(config);
        let mut events = Vec::new();

        apply(&mut world, Command::AdvanceCycle, &mut events);

        assert_eq!(
            events,
            vec![
                Event::NightFell { wave: 1 },
                Event::CycleAdvanced {
                    cycle_time: 0,
                    is_day: false,
                    wave: 2,
                },
            ]
        );
    }

    #[test]
    fn viewport_follows_player() {
        let world = empty_world();
        let viewport = query::viewport(&world);
        assert_eq!(viewport.origin(), Vec2::new(1400.0, 1600.0));
        assert_eq!(viewport.size(), Vec2::new(1200.0, 800.0));
    }
}
