//! Tunable parameters describing a freshly generated world.

use nightfall_core::{Vec2, Wallet};
use serde::Deserialize;

/// Parameters used to build and reset the world.
///
/// Every field has a default, so a partial TOML table only overrides what it
/// names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of the world random stream (generation, node respawns, helper offsets).
    pub seed: u64,
    /// Width of the world in world units.
    pub width: f32,
    /// Height of the world in world units.
    pub height: f32,
    /// Side length of a build grid cell.
    pub grid_cell: f32,
    /// Width of the camera window used for on-screen checks.
    pub viewport_width: f32,
    /// Height of the camera window used for on-screen checks.
    pub viewport_height: f32,
    /// Number of wood nodes to scatter.
    pub wood_nodes: u32,
    /// Number of stone nodes to scatter.
    pub stone_nodes: u32,
    /// Number of gold nodes to scatter.
    pub gold_nodes: u32,
    /// Number of nests to scatter.
    pub nests: u32,
    /// Rejection-sampling budget for each random placement.
    pub placement_attempts: u32,
    /// Diameter of a resource node.
    pub node_size: f32,
    /// Diameter of a nest.
    pub nest_size: f32,
    /// Diameter of the player.
    pub player_size: f32,
    /// Distance the player covers per step at full intent.
    pub player_speed: f32,
    /// Wood held at the start of an epoch.
    pub starting_wood: u32,
    /// Stone held at the start of an epoch.
    pub starting_stone: u32,
    /// Gold held at the start of an epoch.
    pub starting_gold: u32,
    /// Mana ceiling; the player starts full.
    pub max_mana: f32,
    /// Mana regained per step.
    pub mana_regen_per_step: f32,
    /// Scheduler ticks per half-cycle of day or night.
    pub cycle_duration: u32,
}

impl WorldConfig {
    /// Width and height of the world as a vector.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Dimensions of the camera window.
    #[must_use]
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Wallet handed to the player at the start of an epoch.
    #[must_use]
    pub fn starting_wallet(&self) -> Wallet {
        Wallet::new(self.starting_wood, self.starting_stone, self.starting_gold)
    }

    /// Returns a configuration without nodes or nests, handy for staged scenarios.
    #[must_use]
    pub fn empty(seed: u64) -> Self {
        Self {
            seed,
            wood_nodes: 0,
            stone_nodes: 0,
            gold_nodes: 0,
            nests: 0,
            ..Self::default()
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x6e69_6768_7466_616c,
            width: 4000.0,
            height: 4000.0,
            grid_cell: 50.0,
            viewport_width: 1200.0,
            viewport_height: 800.0,
            wood_nodes: 20,
            stone_nodes: 15,
            gold_nodes: 10,
            nests: 5,
            placement_attempts: 100,
            node_size: 80.0,
            nest_size: 100.0,
            player_size: 25.0,
            player_speed: 6.0,
            starting_wood: 150,
            starting_stone: 150,
            starting_gold: 75,
            max_mana: 100.0,
            mana_regen_per_step: 0.1,
            cycle_duration: 30,
        }
    }
}
