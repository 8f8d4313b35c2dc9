#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Nightfall engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

pub mod progression;
pub mod spatial;

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Nightfall. Gather by day, hold the line by night.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the player's desired movement direction.
    SetMoveIntent {
        /// Normalized direction the player wants to travel in.
        intent: MoveIntent,
    },
    /// Fires a player projectile toward the provided world point if the weapon is ready.
    AimAndFire {
        /// World-space point the shot is aimed at.
        target: Vec2,
    },
    /// Spends mana to launch a spell at the nearest on-screen creature.
    CastSpell,
    /// Builds a structure on the grid cell nearest to the player.
    Build {
        /// Type of structure to construct.
        kind: StructureKind,
    },
    /// Hires a helper next to the player.
    HireHelper,
    /// Raises one of the upgrade tracks by a single level.
    Upgrade {
        /// Track that should gain a level.
        track: UpgradeTrack,
    },
    /// Reinitializes all mutable state and regenerates the world.
    ResetWorld,
    /// Advances timers and integrates player movement by one simulation step.
    Tick {
        /// Duration of simulated time covered by the step.
        dt: Duration,
    },
    /// Moves a creature one step toward its chosen target and resolves contact.
    StepCreature {
        /// Creature attempting to move.
        creature: CreatureId,
        /// Target the creature is pursuing.
        target: CreatureTarget,
    },
    /// Moves a helper one step toward its chosen target and resolves contact.
    StepHelper {
        /// Helper attempting to move.
        helper: HelperId,
        /// Target the helper is pursuing.
        target: HelperTarget,
    },
    /// Moves every projectile and resolves the first creature each one hits.
    AdvanceProjectiles,
    /// Resolves melee harvesting for every node the player touches.
    HarvestResources,
    /// Requests that a tower shoots at the provided creature.
    FireTowerProjectile {
        /// Tower expected to fire.
        tower: StructureId,
        /// Creature the projectile is aimed at.
        target: CreatureId,
    },
    /// Resolves trap damage against every overlapping creature.
    TriggerTraps,
    /// Advances the day/night clock by one scheduler tick.
    AdvanceCycle,
    /// Creates a creature scaled for the provided wave.
    SpawnCreature {
        /// Variant of creature to create.
        kind: CreatureKind,
        /// World-space location of the new creature.
        position: Vec2,
        /// Wave number used to scale the creature's statistics.
        wave: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the step.
        dt: Duration,
    },
    /// Reports that a command was refused without altering state.
    CommandRejected {
        /// Policy that blocked the command.
        reason: Rejection,
    },
    /// Confirms that a structure was placed into the world.
    StructureBuilt {
        /// Identifier assigned to the structure.
        structure: StructureId,
        /// Type of structure that was built.
        kind: StructureKind,
        /// Grid-snapped position of the structure.
        position: Vec2,
    },
    /// Reports that a creature or trap trigger damaged a structure.
    StructureDamaged {
        /// Structure that lost health.
        structure: StructureId,
        /// Health left after the hit.
        remaining: u32,
    },
    /// Confirms that a structure was destroyed and removed.
    StructureDestroyed {
        /// Identifier of the removed structure.
        structure: StructureId,
        /// Type of the removed structure.
        kind: StructureKind,
    },
    /// Confirms that a helper joined the player.
    HelperHired {
        /// Identifier assigned to the helper.
        helper: HelperId,
    },
    /// Confirms that an upgrade track gained a level.
    Upgraded {
        /// Track that was raised.
        track: UpgradeTrack,
        /// Level reached after the upgrade.
        level: u8,
    },
    /// Reports that a projectile entered the world.
    ProjectileFired {
        /// Source of the projectile.
        origin: ProjectileOrigin,
        /// Launch position.
        position: Vec2,
        /// Direction of travel in radians.
        angle: f32,
    },
    /// Confirms that a creature entered the world.
    CreatureSpawned {
        /// Identifier assigned to the creature.
        creature: CreatureId,
        /// Variant of the creature.
        kind: CreatureKind,
        /// Spawn location.
        position: Vec2,
    },
    /// Reports that a creature's health was depleted and it was removed.
    CreatureKilled {
        /// Identifier of the removed creature.
        creature: CreatureId,
        /// Indicates whether the kill paid out score and gold.
        credited: bool,
    },
    /// Reports that a resource node yielded resources.
    ResourceHarvested {
        /// Node that was harvested.
        node: NodeId,
        /// Resource credited to the wallet.
        kind: ResourceKind,
        /// Amount credited to the wallet.
        amount: u32,
    },
    /// Reports that a depleted node was healed and moved.
    NodeRespawned {
        /// Node that respawned.
        node: NodeId,
        /// Position after relocation.
        position: Vec2,
    },
    /// Reports a scheduler tick of the day/night clock.
    CycleAdvanced {
        /// Scheduler ticks elapsed in the current half-cycle.
        cycle_time: u32,
        /// Indicates whether it is currently day.
        is_day: bool,
        /// Wave counter after the tick.
        wave: u32,
    },
    /// Announces the day to night transition.
    NightFell {
        /// Wave that was current at dusk; the night's mass spawn is scaled with it.
        wave: u32,
    },
    /// Announces the night to day transition.
    DayBroke {
        /// Wave counter at dawn.
        wave: u32,
    },
    /// Announces that a creature reached the player and the epoch ended.
    GameOver {
        /// Final score of the epoch.
        score: u64,
    },
    /// Confirms that the world was reinitialized.
    WorldReset,
}

/// Policies that can refuse a player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The wallet cannot cover the cost.
    InsufficientResources,
    /// A structure already occupies the grid cell.
    CellOccupied,
    /// The upgrade track is already at its maximum level.
    LevelCapReached,
    /// The player does not have enough mana.
    InsufficientMana,
    /// No valid target exists for the command.
    NoTarget,
    /// The weapon is still cooling down.
    WeaponCoolingDown,
}

/// Kinds of harvestable resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Wood gathered from trees.
    Wood,
    /// Stone gathered from rocks.
    Stone,
    /// Gold gathered from veins.
    Gold,
}

impl ResourceKind {
    /// All resource kinds in generation order.
    pub const ALL: [Self; 3] = [Self::Wood, Self::Stone, Self::Gold];
}

/// Types of structures the player can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Blocking wall that creatures attack.
    Wall,
    /// Tower that shoots at nearby creatures.
    Tower,
    /// Trap that damages creatures walking over it.
    Trap,
}

impl StructureKind {
    /// Resources required to build the structure.
    #[must_use]
    pub const fn cost(self) -> Cost {
        match self {
            Self::Wall => Cost::new(10, 10, 0),
            Self::Tower => Cost::new(20, 20, 10),
            Self::Trap => Cost::new(15, 0, 5),
        }
    }

    /// Diameter of the structure measured in world units.
    #[must_use]
    pub const fn size(self) -> f32 {
        match self {
            Self::Wall | Self::Tower => 50.0,
            Self::Trap => 40.0,
        }
    }

    /// Reports whether creatures select this structure as a target.
    #[must_use]
    pub const fn attracts_creatures(self) -> bool {
        matches!(self, Self::Wall | Self::Tower)
    }
}

/// Variants of hostile creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Regular creature spawned by nests and at nightfall.
    Standard,
    /// Slow, durable creature that joins every fifth night.
    Boss,
}

/// Sources of projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOrigin {
    /// Shot aimed by the player.
    Player,
    /// Automatic shot from a tower.
    Tower,
    /// Mana-powered spell.
    Spell,
}

/// Cosmetic effect categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Small flash where something was hit.
    Hit,
    /// Larger burst for spells, traps and destroyed structures.
    Explosion,
    /// Floating marker where resources were gathered.
    Resource,
}

/// Upgrade tracks purchasable with gold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeTrack {
    /// Player weapon: shot damage, fire rate and harvesting power.
    Weapon,
    /// Wall durability.
    Wall,
    /// Tower durability, range, fire rate and damage.
    Tower,
}

impl UpgradeTrack {
    /// Gold cost of raising the track by one level.
    #[must_use]
    pub const fn cost(self) -> Cost {
        match self {
            Self::Weapon => Cost::new(0, 0, 50),
            Self::Wall => Cost::new(0, 0, 20),
            Self::Tower => Cost::new(0, 0, 30),
        }
    }
}

/// Target a creature can pursue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CreatureTarget {
    /// The player; contact ends the epoch.
    Player,
    /// A wall or tower.
    Structure(StructureId),
}

/// Target a helper can pursue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HelperTarget {
    /// A creature close to the helper.
    Creature(CreatureId),
    /// A resource node to harvest.
    Node(NodeId),
}

/// Unique identifier assigned to a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(u32);

impl CreatureId {
    /// Creates a new creature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(u32);

impl StructureId {
    /// Creates a new structure identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HelperId(u32);

impl HelperId {
    /// Creates a new helper identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a resource node; stable for the node's whole life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new node identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a creature nest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NestId(u32);

impl NestId {
    /// Creates a new nest identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Resource amounts required by a purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cost {
    wood: u32,
    stone: u32,
    gold: u32,
}

impl Cost {
    /// Creates a cost from explicit resource amounts.
    #[must_use]
    pub const fn new(wood: u32, stone: u32, gold: u32) -> Self {
        Self { wood, stone, gold }
    }

    /// Wood required.
    #[must_use]
    pub const fn wood(&self) -> u32 {
        self.wood
    }

    /// Stone required.
    #[must_use]
    pub const fn stone(&self) -> u32 {
        self.stone
    }

    /// Gold required.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }
}

/// Resource counters held by the player. Counters never go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Wallet {
    wood: u32,
    stone: u32,
    gold: u32,
}

impl Wallet {
    /// Creates a wallet holding the provided amounts.
    #[must_use]
    pub const fn new(wood: u32, stone: u32, gold: u32) -> Self {
        Self { wood, stone, gold }
    }

    /// Wood held.
    #[must_use]
    pub const fn wood(&self) -> u32 {
        self.wood
    }

    /// Stone held.
    #[must_use]
    pub const fn stone(&self) -> u32 {
        self.stone
    }

    /// Gold held.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Amount held of the provided resource.
    #[must_use]
    pub const fn amount(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Gold => self.gold,
        }
    }

    /// Reports whether every counter covers the cost.
    #[must_use]
    pub const fn can_afford(&self, cost: Cost) -> bool {
        self.wood >= cost.wood && self.stone >= cost.stone && self.gold >= cost.gold
    }

    /// Debits the cost when affordable. Returns `false` and leaves the wallet
    /// untouched otherwise.
    pub fn try_spend(&mut self, cost: Cost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }

        self.wood -= cost.wood;
        self.stone -= cost.stone;
        self.gold -= cost.gold;
        true
    }

    /// Credits the provided resource.
    pub fn deposit(&mut self, kind: ResourceKind, amount: u32) {
        let counter = match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Gold => &mut self.gold,
        };
        *counter = counter.saturating_add(amount);
    }
}

/// Hit points of a damageable entity, always within `0..=maximum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Health {
    current: u32,
    maximum: u32,
}

impl Health {
    /// Creates full health with the provided maximum.
    #[must_use]
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Remaining health as a fraction of the maximum, for health bars.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.maximum == 0 {
            return 0.0;
        }
        self.current as f32 / self.maximum as f32
    }

    /// Removes hit points, stopping at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Adds hit points, stopping at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    /// Restores hit points to the maximum.
    pub fn restore(&mut self) {
        self.current = self.maximum;
    }

    /// Changes the maximum, clamping the current value into range.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }
}

/// Desired player movement direction with magnitude at most one.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MoveIntent(Vec2);

impl MoveIntent {
    /// Intent that keeps the player still.
    pub const IDLE: Self = Self(Vec2::ZERO);

    /// Creates an intent, normalizing vectors longer than one.
    #[must_use]
    pub fn new(direction: Vec2) -> Self {
        if !direction.is_finite() {
            return Self::IDLE;
        }

        let length = direction.length();
        if length > 1.0 {
            Self(direction / length)
        } else {
            Self(direction)
        }
    }

    /// Translates four directional key states into an intent.
    ///
    /// Diagonals are normalized so that moving along two axes is no faster
    /// than moving along one.
    #[must_use]
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut direction = Vec2::ZERO;
        if up {
            direction.y -= 1.0;
        }
        if down {
            direction.y += 1.0;
        }
        if left {
            direction.x -= 1.0;
        }
        if right {
            direction.x += 1.0;
        }
        Self::new(direction)
    }

    /// Underlying direction vector.
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        self.0
    }
}

/// Visible window onto the world that follows the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    origin: Vec2,
    size: Vec2,
}

impl Viewport {
    /// Creates a viewport from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Centres a viewport on `focus`, clamped so it never leaves the world.
    #[must_use]
    pub fn following(focus: Vec2, size: Vec2, world_extent: Vec2) -> Self {
        let x = (focus.x - size.x / 2.0).min(world_extent.x - size.x).max(0.0);
        let y = (focus.y - size.y / 2.0).min(world_extent.y - size.y).max(0.0);
        Self {
            origin: Vec2::new(x, y),
            size,
        }
    }

    /// Top-left corner in world space.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Width and height in world units.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Reports whether a body of the provided size is at least partially on screen.
    #[must_use]
    pub fn shows(&self, position: Vec2, size: f32) -> bool {
        let screen = position - self.origin;
        screen.x > -size
            && screen.x < self.size.x + size
            && screen.y > -size
            && screen.y < self.size.y + size
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position, always inside the world bounds.
    pub position: Vec2,
    /// Diameter of the player.
    pub size: f32,
    /// Distance covered per step at full intent.
    pub speed: f32,
    /// Current movement intent.
    pub intent: MoveIntent,
    /// Weapon level in `1..=5`.
    pub weapon_level: u8,
    /// Time until the weapon can fire again.
    pub weapon_cooldown: Duration,
    /// Resources held.
    pub wallet: Wallet,
    /// Score accumulated this epoch.
    pub score: u64,
    /// Current mana.
    pub mana: f32,
    /// Mana ceiling.
    pub max_mana: f32,
}

/// Immutable representation of a single creature's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreatureSnapshot {
    /// Unique identifier assigned to the creature.
    pub id: CreatureId,
    /// Variant of the creature.
    pub kind: CreatureKind,
    /// Current position.
    pub position: Vec2,
    /// Diameter of the creature.
    pub size: f32,
    /// Current hit points.
    pub health: Health,
    /// Distance covered per step.
    pub speed: f32,
    /// Damage dealt to structures per hit.
    pub damage: u32,
    /// Time until the creature may damage a structure again.
    pub attack_cooldown: Duration,
}

/// Read-only snapshot describing all creatures in spawn order.
#[derive(Clone, Debug, Default)]
pub struct CreatureView {
    snapshots: Vec<CreatureSnapshot>,
}

impl CreatureView {
    /// Creates a new creature view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CreatureSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured creature snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &CreatureSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a creature by identifier.
    #[must_use]
    pub fn get(&self, id: CreatureId) -> Option<&CreatureSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of creatures captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no creatures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<CreatureSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single structure's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructureSnapshot {
    /// Identifier allocated to the structure by the world.
    pub id: StructureId,
    /// Kind of structure that was built.
    pub kind: StructureKind,
    /// Grid-snapped position.
    pub position: Vec2,
    /// Diameter of the structure.
    pub size: f32,
    /// Current hit points.
    pub health: Health,
    /// Time until a tower may fire again; always zero for other kinds.
    pub ready_in: Duration,
}

/// Read-only snapshot describing all structures in build order.
#[derive(Clone, Debug, Default)]
pub struct StructureView {
    snapshots: Vec<StructureSnapshot>,
}

impl StructureView {
    /// Creates a new structure view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<StructureSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured structure snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &StructureSnapshot> {
        self.snapshots.iter()
    }

    /// Number of structures captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no structures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<StructureSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single helper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelperSnapshot {
    /// Identifier allocated to the helper by the world.
    pub id: HelperId,
    /// Current position.
    pub position: Vec2,
    /// Diameter of the helper.
    pub size: f32,
    /// Distance covered per step.
    pub speed: f32,
    /// Current hit points.
    pub health: Health,
}

/// Read-only snapshot describing all helpers in hiring order.
#[derive(Clone, Debug, Default)]
pub struct HelperView {
    snapshots: Vec<HelperSnapshot>,
}

impl HelperView {
    /// Creates a new helper view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HelperSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured helper snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &HelperSnapshot> {
        self.snapshots.iter()
    }

    /// Number of helpers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no helpers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single resource node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceNodeSnapshot {
    /// Identifier of the node.
    pub id: NodeId,
    /// Resource the node yields.
    pub kind: ResourceKind,
    /// Current position.
    pub position: Vec2,
    /// Diameter of the node.
    pub size: f32,
    /// Current hit points.
    pub health: Health,
}

/// Read-only snapshot describing all resource nodes.
#[derive(Clone, Debug, Default)]
pub struct ResourceNodeView {
    snapshots: Vec<ResourceNodeSnapshot>,
}

impl ResourceNodeView {
    /// Creates a new node view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ResourceNodeSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured node snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceNodeSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ResourceNodeSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of nodes captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Source of the projectile.
    pub origin: ProjectileOrigin,
    /// Current position.
    pub position: Vec2,
    /// Direction of travel in radians.
    pub angle: f32,
    /// Distance covered per step.
    pub speed: f32,
    /// Damage dealt on impact.
    pub damage: u32,
    /// Hit radius of the projectile.
    pub size: f32,
}

/// Immutable representation of a nest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NestSnapshot {
    /// Identifier of the nest.
    pub id: NestId,
    /// Centre of the nest.
    pub position: Vec2,
    /// Diameter of the nest.
    pub size: f32,
}

/// Immutable representation of a cosmetic effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSnapshot {
    /// Effect category.
    pub kind: EffectKind,
    /// Where the effect plays.
    pub position: Vec2,
    /// Total lifetime of the effect.
    pub duration: Duration,
    /// Time since the effect started.
    pub elapsed: Duration,
}

impl EffectSnapshot {
    /// Remaining opacity in `0.0..=1.0`, fading out over the lifetime.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (1.0 - self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// State of the day/night clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClockSnapshot {
    /// Wave counter.
    pub wave: u32,
    /// Indicates whether it is currently day.
    pub is_day: bool,
    /// Scheduler ticks elapsed in the current half-cycle.
    pub cycle_time: u32,
    /// Scheduler ticks per half-cycle.
    pub cycle_duration: u32,
}

impl ClockSnapshot {
    /// Scheduler ticks left before the next day/night flip.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.cycle_duration.saturating_sub(self.cycle_time)
    }
}

/// Current level of each upgrade track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Levels {
    /// Player weapon level.
    pub weapon: u8,
    /// Wall level.
    pub wall: u8,
    /// Tower level.
    pub tower: u8,
}

/// Assignment of a tower to the creature it should shoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that selected the target.
    pub tower: StructureId,
    /// Creature selected as the target.
    pub creature: CreatureId,
    /// Position of the tower.
    pub tower_position: Vec2,
    /// Position of the creature when it was selected.
    pub creature_position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_spend_is_all_or_nothing() {
        let mut wallet = Wallet::new(10, 9, 0);
        assert!(!wallet.try_spend(StructureKind::Wall.cost()));
        assert_eq!(wallet, Wallet::new(10, 9, 0));

        wallet.deposit(ResourceKind::Stone, 1);
        assert!(wallet.try_spend(StructureKind::Wall.cost()));
        assert_eq!(wallet, Wallet::new(0, 0, 0));
    }

    #[test]
    fn build_costs_match_price_list() {
        assert_eq!(StructureKind::Wall.cost(), Cost::new(10, 10, 0));
        assert_eq!(StructureKind::Tower.cost(), Cost::new(20, 20, 10));
        assert_eq!(StructureKind::Trap.cost(), Cost::new(15, 0, 5));
        assert_eq!(UpgradeTrack::Weapon.cost().gold(), 50);
        assert_eq!(UpgradeTrack::Wall.cost().gold(), 20);
        assert_eq!(UpgradeTrack::Tower.cost().gold(), 30);
    }

    #[test]
    fn health_stays_within_bounds() {
        let mut health = Health::full(200);
        health.damage(250);
        assert!(health.is_depleted());
        assert_eq!(health.current(), 0);

        health.heal(500);
        assert_eq!(health.current(), 200);

        health.set_maximum(150);
        assert_eq!(health.current(), 150);
        assert_eq!(health.maximum(), 150);
    }

    #[test]
    fn diagonal_intent_is_normalized() {
        let intent = MoveIntent::from_keys(true, false, false, true);
        assert!((intent.vector().length() - 1.0).abs() < 1e-6);

        let straight = MoveIntent::from_keys(false, true, false, false);
        assert_eq!(straight.vector(), Vec2::new(0.0, 1.0));

        let opposing = MoveIntent::from_keys(true, true, false, false);
        assert_eq!(opposing, MoveIntent::IDLE);
    }

    #[test]
    fn short_intent_is_preserved() {
        let intent = MoveIntent::new(Vec2::new(0.3, 0.4));
        assert_eq!(intent.vector(), Vec2::new(0.3, 0.4));
        assert_eq!(MoveIntent::new(Vec2::new(f32::NAN, 0.0)), MoveIntent::IDLE);
    }

    #[test]
    fn viewport_clamps_to_world_edges() {
        let extent = Vec2::new(4000.0, 4000.0);
        let size = Vec2::new(1200.0, 800.0);

        let centred = Viewport::following(Vec2::new(2000.0, 2000.0), size, extent);
        assert_eq!(centred.origin(), Vec2::new(1400.0, 1600.0));

        let corner = Viewport::following(Vec2::new(10.0, 3990.0), size, extent);
        assert_eq!(corner.origin(), Vec2::new(0.0, 3200.0));
        assert!(corner.shows(Vec2::new(-10.0, 3500.0), 25.0));
        assert!(!corner.shows(Vec2::new(1300.0, 3500.0), 25.0));
    }

    #[test]
    fn creature_view_lookup_uses_identifier() {
        let snapshot = |id: u32| CreatureSnapshot {
            id: CreatureId::new(id),
            kind: CreatureKind::Standard,
            position: Vec2::ZERO,
            size: 25.0,
            health: Health::full(70),
            speed: 1.0,
            damage: 17,
            attack_cooldown: Duration::ZERO,
        };
        let view = CreatureView::from_snapshots(vec![snapshot(4), snapshot(1)]);

        assert_eq!(view.len(), 2);
        assert_eq!(view.iter().next().map(|c| c.id), Some(CreatureId::new(1)));
        assert!(view.get(CreatureId::new(4)).is_some());
        assert!(view.get(CreatureId::new(2)).is_none());
    }
}
