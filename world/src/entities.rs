//! Mutable entity records owned by the world.

use std::time::Duration;

use nightfall_core::{
    progression::{self, CreatureStats},
    CreatureId, CreatureKind, CreatureSnapshot, EffectKind, EffectSnapshot, Health, HelperId,
    HelperSnapshot, MoveIntent, NestId, NestSnapshot, NodeId, PlayerSnapshot, ProjectileOrigin,
    ProjectileSnapshot, ResourceKind, ResourceNodeSnapshot, Vec2, Wallet,
};

use crate::config::WorldConfig;

const HELPER_SIZE: f32 = 20.0;
const HELPER_SPEED: f32 = 1.0;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) position: Vec2,
    pub(crate) size: f32,
    pub(crate) speed: f32,
    pub(crate) intent: MoveIntent,
    pub(crate) weapon_cooldown: Duration,
    pub(crate) wallet: Wallet,
    pub(crate) score: u64,
    pub(crate) mana: f32,
    pub(crate) max_mana: f32,
}

impl Player {
    pub(crate) fn spawn(config: &WorldConfig) -> Self {
        Self {
            position: config.extent() / 2.0,
            size: config.player_size,
            speed: config.player_speed,
            intent: MoveIntent::IDLE,
            weapon_cooldown: Duration::ZERO,
            wallet: config.starting_wallet(),
            score: 0,
            mana: config.max_mana,
            max_mana: config.max_mana,
        }
    }

    pub(crate) fn snapshot(&self, weapon_level: u8) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            size: self.size,
            speed: self.speed,
            intent: self.intent,
            weapon_level,
            weapon_cooldown: self.weapon_cooldown,
            wallet: self.wallet,
            score: self.score,
            mana: self.mana,
            max_mana: self.max_mana,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Creature {
    pub(crate) id: CreatureId,
    pub(crate) kind: CreatureKind,
    pub(crate) position: Vec2,
    pub(crate) size: f32,
    pub(crate) health: Health,
    pub(crate) speed: f32,
    pub(crate) damage: u32,
    pub(crate) attack_cooldown: Duration,
}

impl Creature {
    pub(crate) fn new(id: CreatureId, kind: CreatureKind, position: Vec2, wave: u32) -> Self {
        let stats = CreatureStats::for_wave(kind, wave);
        Self {
            id,
            kind,
            position,
            size: stats.size,
            health: Health::full(stats.health),
            speed: stats.speed,
            damage: stats.damage,
            attack_cooldown: Duration::ZERO,
        }
    }

    pub(crate) fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            size: self.size,
            health: self.health,
            speed: self.speed,
            damage: self.damage,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Helper {
    pub(crate) id: HelperId,
    pub(crate) position: Vec2,
    pub(crate) size: f32,
    pub(crate) speed: f32,
    pub(crate) health: Health,
}

impl Helper {
    pub(crate) fn new(id: HelperId, position: Vec2) -> Self {
        Self {
            id,
            position,
            size: HELPER_SIZE,
            speed: HELPER_SPEED,
            health: Health::full(progression::HELPER_HEALTH),
        }
    }

    pub(crate) fn snapshot(&self) -> HelperSnapshot {
        HelperSnapshot {
            id: self.id,
            position: self.position,
            size: self.size,
            speed: self.speed,
            health: self.health,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ResourceNode {
    pub(crate) kind: ResourceKind,
    pub(crate) position: Vec2,
    pub(crate) size: f32,
    pub(crate) health: Health,
}

impl ResourceNode {
    pub(crate) fn snapshot(&self, id: NodeId) -> ResourceNodeSnapshot {
        ResourceNodeSnapshot {
            id,
            kind: self.kind,
            position: self.position,
            size: self.size,
            health: self.health,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) origin: ProjectileOrigin,
    pub(crate) position: Vec2,
    pub(crate) angle: f32,
    pub(crate) speed: f32,
    pub(crate) damage: u32,
    pub(crate) size: f32,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            origin: self.origin,
            position: self.position,
            angle: self.angle,
            speed: self.speed,
            damage: self.damage,
            size: self.size,
        }
    }

    /// Effect played where the projectile lands.
    pub(crate) fn impact_effect(&self) -> EffectKind {
        match self.origin {
            ProjectileOrigin::Spell => EffectKind::Explosion,
            ProjectileOrigin::Player | ProjectileOrigin::Tower => EffectKind::Hit,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Nest {
    pub(crate) position: Vec2,
    pub(crate) size: f32,
}

impl Nest {
    pub(crate) fn snapshot(&self, id: NestId) -> NestSnapshot {
        NestSnapshot {
            id,
            position: self.position,
            size: self.size,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Effect {
    pub(crate) kind: EffectKind,
    pub(crate) position: Vec2,
    pub(crate) duration: Duration,
    pub(crate) elapsed: Duration,
}

impl Effect {
    pub(crate) fn new(kind: EffectKind, position: Vec2, duration: Duration) -> Self {
        Self {
            kind,
            position,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.elapsed > self.duration
    }

    pub(crate) fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            kind: self.kind,
            position: self.position,
            duration: self.duration,
            elapsed: self.elapsed,
        }
    }
}
