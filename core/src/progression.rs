//! Upgrade levels and the stat formulas that scale with them.

use std::time::Duration;

use crate::{Cost, CreatureKind};

/// Highest level any upgrade track can reach.
pub const MAX_LEVEL: u8 = 5;

/// Level every upgrade track starts at.
pub const STARTING_LEVEL: u8 = 1;

/// Hit points restored to existing structures when their track is upgraded.
pub const UPGRADE_HEAL: u32 = 50;

/// Hit points of a freshly built trap.
pub const TRAP_HEALTH: u32 = 150;

/// Damage a trap deals to each overlapping creature per trigger.
pub const TRAP_DAMAGE: u32 = 50;

/// Damage a trap takes itself for each creature it hits.
pub const TRAP_SELF_DAMAGE: u32 = 150;

/// Flat price of hiring a helper.
pub const HELPER_COST: Cost = Cost::new(0, 0, 100);

/// Hit points of a freshly hired helper.
pub const HELPER_HEALTH: u32 = 300;

/// Damage a helper deals to a touching creature per step.
pub const HELPER_CREATURE_DAMAGE: u32 = 10;

/// Damage a helper deals to a touching node per step.
pub const HELPER_HARVEST_DAMAGE: u32 = 3;

/// Resources a helper gathers per step of node contact.
pub const HELPER_HARVEST_YIELD: u32 = 2;

/// Distance within which a helper prefers creatures over nodes.
pub const HELPER_AGGRO_RADIUS: f32 = 100.0;

/// Hit points of a resource node.
pub const NODE_HEALTH: u32 = 200;

/// Mana spent per spell.
pub const SPELL_MANA_COST: f32 = 20.0;

/// Damage of a spell projectile.
pub const SPELL_DAMAGE: u32 = 50;

/// Minimum time between two hits by the same creature.
pub const CREATURE_ATTACK_INTERVAL: Duration = Duration::from_millis(1000);

/// Damage of a player shot at the provided weapon level.
#[must_use]
pub const fn weapon_damage(level: u8) -> u32 {
    15 * level as u32
}

/// Time the weapon needs between shots at the provided level.
#[must_use]
pub const fn weapon_cooldown(level: u8) -> Duration {
    Duration::from_micros(400_000 / clamp_level(level) as u64)
}

/// Node damage dealt per step of player contact.
#[must_use]
pub const fn harvest_damage(level: u8) -> u32 {
    3 * level as u32
}

/// Resources credited per step of player contact.
#[must_use]
pub const fn harvest_yield(level: u8) -> u32 {
    2 * level as u32
}

/// Maximum hit points of a wall at the provided level.
#[must_use]
pub const fn wall_health(level: u8) -> u32 {
    50 + 50 * level as u32
}

/// Maximum hit points of a tower at the provided level.
#[must_use]
pub const fn tower_health(level: u8) -> u32 {
    75 + 50 * level as u32
}

/// Range within which a tower engages creatures.
#[must_use]
pub fn tower_range(level: u8) -> f32 {
    200.0 + 30.0 * f32::from(level)
}

/// Time a tower needs between shots at the provided level.
#[must_use]
pub const fn tower_fire_interval(level: u8) -> Duration {
    Duration::from_micros(800_000 / clamp_level(level) as u64)
}

/// Damage of a tower projectile at the provided level.
#[must_use]
pub const fn tower_damage(level: u8) -> u32 {
    30 * level as u32
}

/// Score and gold paid for a credited kill during the provided wave.
#[must_use]
pub const fn kill_reward(wave: u32) -> (u64, u32) {
    (15 * wave as u64, wave)
}

const fn clamp_level(level: u8) -> u8 {
    if level == 0 {
        1
    } else {
        level
    }
}

/// Statistics of a creature spawned during a given wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreatureStats {
    /// Diameter of the creature.
    pub size: f32,
    /// Starting and maximum hit points.
    pub health: u32,
    /// Distance covered per step.
    pub speed: f32,
    /// Damage dealt to structures per hit.
    pub damage: u32,
}

impl CreatureStats {
    /// Scales the creature kind for the provided wave.
    #[must_use]
    pub fn for_wave(kind: CreatureKind, wave: u32) -> Self {
        match kind {
            CreatureKind::Standard => Self {
                size: 25.0,
                health: 60 + 10 * wave,
                speed: 0.9 + (0.025 * wave as f32).min(0.8),
                damage: 15 + 2 * wave,
            },
            CreatureKind::Boss => Self {
                size: 40.0,
                health: 500 + 50 * wave,
                speed: 0.7,
                damage: 20 + 2 * wave,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_creatures_scale_with_wave() {
        let stats = CreatureStats::for_wave(CreatureKind::Standard, 4);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.damage, 23);
        assert!((stats.speed - 1.0).abs() < 1e-6);
        assert_eq!(stats.size, 25.0);
    }

    #[test]
    fn creature_speed_bonus_is_capped() {
        let stats = CreatureStats::for_wave(CreatureKind::Standard, 100);
        assert!((stats.speed - 1.7).abs() < 1e-6);
    }

    #[test]
    fn boss_overrides_standard_stats() {
        let stats = CreatureStats::for_wave(CreatureKind::Boss, 5);
        assert_eq!(stats.health, 750);
        assert_eq!(stats.damage, 30);
        assert_eq!(stats.speed, 0.7);
        assert_eq!(stats.size, 40.0);
    }

    #[test]
    fn tower_progression_matches_level() {
        assert_eq!(tower_fire_interval(2), Duration::from_millis(400));
        assert_eq!(tower_fire_interval(3), Duration::from_micros(266_666));
        assert_eq!(tower_range(2), 260.0);
        assert_eq!(tower_damage(2), 60);
        assert_eq!(tower_health(1), 125);
    }

    #[test]
    fn weapon_progression_matches_level() {
        assert_eq!(weapon_cooldown(1), Duration::from_millis(400));
        assert_eq!(weapon_cooldown(4), Duration::from_millis(100));
        assert_eq!(weapon_damage(3), 45);
        assert_eq!(harvest_damage(1), 3);
        assert_eq!(harvest_yield(5), 10);
        assert_eq!(wall_health(5), 300);
    }
}
