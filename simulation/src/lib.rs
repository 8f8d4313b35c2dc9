#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-writer tick driver that runs the world and every system in a fixed
//! order.
//!
//! Each step applies queued player commands, advances time, lets creatures and
//! helpers move, resolves projectiles and player harvesting, then runs the
//! slower tower pass and the day/night scheduler on their own cadences. All of
//! it happens on the caller's thread; nothing touches the world between steps.

mod config;

use std::time::Duration;

use nightfall_core::{Command, Event, TowerTarget};
use nightfall_system_creature_ai::CreatureAi;
use nightfall_system_helper_ai::HelperAi;
use nightfall_system_spawning::Spawning;
use nightfall_system_tower_targeting::TowerTargeting;
use nightfall_world::{self as world, query, World};
use tracing::{trace, warn};

pub use config::{ConfigError, SimulationConfig};

/// Owns the world together with the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    step: Duration,
    max_frame_delta: Duration,
    max_steps_per_advance: u32,
    accumulator: Duration,
    structure_cadence: Cadence,
    pending: Vec<Command>,
    events: Vec<Event>,
    commands: Vec<Command>,
    tower_targets: Vec<TowerTarget>,
    creature_ai: CreatureAi,
    helper_ai: HelperAi,
    tower_targeting: TowerTargeting,
    spawning: Spawning,
}

impl Simulation {
    /// Builds a simulation and generates its world.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        let step = config.step();
        Self {
            world: World::new(config.world.clone()),
            step,
            max_frame_delta: config.max_frame_delta(),
            max_steps_per_advance: config.max_steps_per_advance.max(1),
            accumulator: Duration::ZERO,
            structure_cadence: Cadence::new(config.structure_interval()),
            pending: Vec::new(),
            events: Vec::new(),
            commands: Vec::new(),
            tower_targets: Vec::new(),
            creature_ai: CreatureAi::new(),
            helper_ai: HelperAi::new(),
            tower_targeting: TowerTargeting::new(),
            spawning: Spawning::new(config.spawning, config.world.extent()),
        }
    }

    /// Read-only access to the world for rendering and queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Queues a player command for the start of the next step.
    pub fn submit(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Events produced by the most recent `advance` or `step` call.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Reports whether the current epoch has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        query::is_game_over(&self.world)
    }

    /// Feeds wall-clock time into the fixed-step accumulator and runs every
    /// whole step that fits, up to the configured per-call limit.
    ///
    /// Returns the number of steps executed. Backlog beyond the limit is
    /// dropped rather than carried into later calls.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.events.clear();
        self.accumulator = self
            .accumulator
            .saturating_add(elapsed.min(self.max_frame_delta));

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_advance {
            self.accumulator = self.accumulator.saturating_sub(self.step);
            self.run_step();
            steps += 1;
        }

        if self.accumulator >= self.step {
            warn!(
                dropped_backlog_ms = self.accumulator.as_millis() as u64,
                max_steps = self.max_steps_per_advance,
                "step_backlog_dropped"
            );
            self.accumulator = Duration::ZERO;
        }
        trace!(steps, "advanced");
        steps
    }

    /// Runs exactly one step regardless of accumulated time.
    pub fn step(&mut self) {
        self.events.clear();
        self.run_step();
    }

    fn run_step(&mut self) {
        let first_event = self.events.len();
        for command in self.pending.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        if query::is_game_over(&self.world) {
            return;
        }

        world::apply(
            &mut self.world,
            Command::Tick { dt: self.step },
            &mut self.events,
        );

        self.commands.clear();
        self.creature_ai.handle(
            &query::player(&self.world),
            &query::creatures(&self.world),
            &query::structures(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        self.helper_ai.handle(
            &query::helpers(&self.world),
            &query::creatures(&self.world),
            &query::resource_nodes(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        world::apply(&mut self.world, Command::AdvanceProjectiles, &mut self.events);
        world::apply(&mut self.world, Command::HarvestResources, &mut self.events);

        if self.structure_cadence.advance(self.step) {
            self.tower_targeting.handle(
                &query::structures(&self.world),
                &query::creatures(&self.world),
                query::levels(&self.world).tower,
                &mut self.tower_targets,
            );
            for target in &self.tower_targets {
                self.commands.push(Command::FireTowerProjectile {
                    tower: target.tower,
                    target: target.creature,
                });
            }
            self.flush_commands();
            world::apply(&mut self.world, Command::TriggerTraps, &mut self.events);
        }

        self.run_scheduler(first_event);
    }

    /// Lets the spawning system react to this step's events. Cycle steps it
    /// requests are applied immediately and their events fed back once, so
    /// nest rolls and nightfall waves land in the same step.
    fn run_scheduler(&mut self, first_event: usize) {
        let player = query::player(&self.world).position;
        let nests = query::nests(&self.world);

        self.spawning.handle(
            &self.events[first_event..],
            player,
            &nests,
            &mut self.commands,
        );
        if self.commands.is_empty() {
            return;
        }

        let cycle_events = self.events.len();
        self.flush_commands();
        self.spawning.handle(
            &self.events[cycle_events..],
            player,
            &nests,
            &mut self.commands,
        );
        self.flush_commands();
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

/// Fixed-interval trigger driven by step durations.
#[derive(Clone, Copy, Debug)]
struct Cadence {
    interval: Duration,
    accumulator: Duration,
}

impl Cadence {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Adds `dt` and reports whether at least one interval has elapsed.
    /// Several elapsed intervals still trigger a single pass.
    fn advance(&mut self, dt: Duration) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.accumulator < self.interval {
            return false;
        }
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
        }
        true
    }
}
