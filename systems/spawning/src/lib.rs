#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that drives the day/night clock and emits
//! creature spawn commands.
//!
//! The system owns the cycle cadence: elapsed simulation time is accumulated
//! and one `Command::AdvanceCycle` is emitted per full interval. The events the
//! world answers with feed back into the system on the next call, where nests
//! roll for a spawn on every cycle step and nightfall releases a full wave
//! around the player.

use std::{f32::consts::TAU, time::Duration};

use nightfall_core::{Command, CreatureKind, Event, NestSnapshot, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::debug;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Seed of the spawning random stream.
    pub rng_seed: u64,
    /// Milliseconds of simulation time per cycle step.
    pub cycle_interval_ms: u64,
    /// Probability that a nest spawns a creature on a daytime cycle step.
    pub day_spawn_chance: f64,
    /// Probability that a nest spawns a creature on a night-time cycle step.
    pub night_spawn_chance: f64,
    /// Distance beyond half the larger world dimension at which a nightfall
    /// wave appears around the player.
    pub perimeter_margin: f32,
    /// Upper bound on standard creatures released at nightfall.
    pub max_wave_spawn: u32,
    /// Every wave divisible by this number also brings a boss.
    pub boss_interval: u32,
    /// Distance kept between a nest spawn and the nest's rim.
    pub nest_spawn_inset: f32,
}

impl Config {
    /// Creates a new configuration using the provided cycle cadence and seed.
    #[must_use]
    pub const fn new(cycle_interval: Duration, rng_seed: u64) -> Self {
        Self {
            rng_seed,
            cycle_interval_ms: cycle_interval.as_millis() as u64,
            day_spawn_chance: 0.05,
            night_spawn_chance: 0.10,
            perimeter_margin: 100.0,
            max_wave_spawn: 30,
            boss_interval: 5,
            nest_spawn_inset: 10.0,
        }
    }

    /// Cadence of cycle steps.
    #[must_use]
    pub const fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0x5eed_0f_d00d)
    }
}

/// Pure system that deterministically emits cycle and spawn commands.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    perimeter_radius: f32,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    ///
    /// Nightfall waves appear on a ring whose radius is half the larger
    /// dimension of `world_extent` plus the configured margin.
    #[must_use]
    pub fn new(config: Config, world_extent: Vec2) -> Self {
        Self {
            config,
            perimeter_radius: world_extent.max_element() / 2.0 + config.perimeter_margin,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and immutable views to emit cycle and spawn commands.
    ///
    /// `player_position` anchors nightfall waves and `nests` are the spawn
    /// points rolled on every cycle step.
    pub fn handle(
        &mut self,
        events: &[Event],
        player_position: Vec2,
        nests: &[NestSnapshot],
        out: &mut Vec<Command>,
    ) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::NightFell { wave } => self.release_wave(*wave, player_position, out),
                Event::CycleAdvanced { is_day, wave, .. } => {
                    self.roll_nests(*is_day, *wave, nests, out)
                }
                Event::WorldReset => self.accumulator = Duration::ZERO,
                _ => {}
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        for _ in 0..self.resolve_cycle_steps() {
            out.push(Command::AdvanceCycle);
        }
    }

    fn resolve_cycle_steps(&mut self) -> usize {
        let interval = self.config.cycle_interval();
        if interval.is_zero() {
            return 0;
        }

        let mut steps = 0;
        while self.accumulator >= interval {
            self.accumulator -= interval;
            steps += 1;
        }
        steps
    }

    fn roll_nests(
        &mut self,
        is_day: bool,
        wave: u32,
        nests: &[NestSnapshot],
        out: &mut Vec<Command>,
    ) {
        let chance = if is_day {
            self.config.day_spawn_chance
        } else {
            self.config.night_spawn_chance
        };

        for nest in nests {
            if self.rng.gen::<f64>() >= chance {
                continue;
            }
            let reach = (nest.size / 2.0 - self.config.nest_spawn_inset).max(0.0);
            let position = nest.position + self.random_direction() * reach;
            out.push(Command::SpawnCreature {
                kind: CreatureKind::Standard,
                position,
                wave,
            });
        }
    }

    fn release_wave(&mut self, wave: u32, player_position: Vec2, out: &mut Vec<Command>) {
        let count = wave.saturating_mul(2).min(self.config.max_wave_spawn);
        for _ in 0..count {
            let position = self.perimeter_point(player_position);
            out.push(Command::SpawnCreature {
                kind: CreatureKind::Standard,
                position,
                wave,
            });
        }

        let boss = self.config.boss_interval != 0 && wave % self.config.boss_interval == 0;
        if boss {
            let position = self.perimeter_point(player_position);
            out.push(Command::SpawnCreature {
                kind: CreatureKind::Boss,
                position,
                wave,
            });
        }
        debug!(wave, count, boss, "wave_released");
    }

    fn perimeter_point(&mut self, centre: Vec2) -> Vec2 {
        centre + self.random_direction() * self.perimeter_radius
    }

    fn random_direction(&mut self) -> Vec2 {
        let angle = self.rng.gen::<f32>() * TAU;
        Vec2::new(angle.cos(), angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_no_cycle_steps_without_interval() {
        let mut spawning = Spawning::new(Config::new(Duration::ZERO, 1), Vec2::splat(4000.0));
        spawning.accumulator = Duration::from_secs(10);
        assert_eq!(spawning.resolve_cycle_steps(), 0);
    }

    #[test]
    fn default_cadence_is_one_second() {
        assert_eq!(Config::default().cycle_interval(), Duration::from_secs(1));
    }

    #[test]
    fn wave_size_is_capped() {
        let mut spawning = Spawning::new(Config::default(), Vec2::splat(4000.0));
        let mut out = Vec::new();
        spawning.release_wave(21, Vec2::ZERO, &mut out);
        assert_eq!(out.len(), 30);
    }

    #[test]
    fn perimeter_follows_the_larger_world_dimension() {
        let spawning = Spawning::new(Config::default(), Vec2::new(1000.0, 600.0));
        assert_eq!(spawning.perimeter_radius, 600.0);

        let spawning = Spawning::new(Config::default(), Vec2::splat(4000.0));
        assert_eq!(spawning.perimeter_radius, 2100.0);
    }
}
