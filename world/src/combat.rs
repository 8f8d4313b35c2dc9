//! Shooting, projectile resolution, traps and creature contact.

use std::time::Duration;

use nightfall_core::{
    progression, spatial, CreatureId, CreatureTarget, EffectKind, Event, ProjectileOrigin,
    Rejection, StructureId, StructureKind, Vec2,
};
use tracing::debug;

use crate::{entities::Projectile, query, reject, World};

const SHOT_SPEED: f32 = 12.0;
const SHOT_SIZE: f32 = 5.0;
const SPELL_SIZE: f32 = 10.0;
const TOWER_SHOT_SPEED: f32 = 10.0;

const IMPACT_EFFECT: Duration = Duration::from_millis(300);
const STRUCTURE_HIT_EFFECT: Duration = Duration::from_millis(200);
const DESTRUCTION_EFFECT: Duration = Duration::from_millis(500);

impl World {
    pub(crate) fn aim_and_fire(&mut self, target: Vec2, out_events: &mut Vec<Event>) {
        if !self.player.weapon_cooldown.is_zero() {
            reject(Rejection::WeaponCoolingDown, out_events);
            return;
        }

        let level = self.levels.weapon;
        let origin = self.player.position;
        let angle = spatial::heading(origin, target);
        self.launch(
            Projectile {
                origin: ProjectileOrigin::Player,
                position: origin,
                angle,
                speed: SHOT_SPEED,
                damage: progression::weapon_damage(level),
                size: SHOT_SIZE,
            },
            out_events,
        );
        self.player.weapon_cooldown = progression::weapon_cooldown(level);
    }

    /// Launches a spell at the nearest creature inside the camera window.
    ///
    /// Mana is only spent when a target exists.
    pub(crate) fn cast_spell(&mut self, out_events: &mut Vec<Event>) {
        if self.player.mana < progression::SPELL_MANA_COST {
            reject(Rejection::InsufficientMana, out_events);
            return;
        }

        let viewport = query::viewport(self);
        let origin = self.player.position;
        let nearest = spatial::select_nearest(
            origin,
            self.creatures
                .values()
                .filter(|creature| viewport.shows(creature.position, creature.size))
                .map(|creature| (creature.position, creature.position)),
        );
        let Some((target, _)) = nearest else {
            reject(Rejection::NoTarget, out_events);
            return;
        };

        self.player.mana -= progression::SPELL_MANA_COST;
        self.launch(
            Projectile {
                origin: ProjectileOrigin::Spell,
                position: origin,
                angle: spatial::heading(origin, target),
                speed: SHOT_SPEED,
                damage: progression::SPELL_DAMAGE,
                size: SPELL_SIZE,
            },
            out_events,
        );
    }

    /// Fires a tower at a creature when the tower is ready and the creature
    /// is still within range.
    pub(crate) fn fire_tower(
        &mut self,
        tower: StructureId,
        target: CreatureId,
        out_events: &mut Vec<Event>,
    ) {
        let Some(state) = self.structures.get(tower) else {
            return;
        };
        if state.kind != StructureKind::Tower || !state.ready_in.is_zero() {
            return;
        }
        let Some(creature) = self.creatures.get(&target) else {
            return;
        };

        let level = self.levels.tower;
        let origin = state.position;
        if spatial::distance(origin, creature.position) >= progression::tower_range(level) {
            return;
        }

        let angle = spatial::heading(origin, creature.position);
        self.launch(
            Projectile {
                origin: ProjectileOrigin::Tower,
                position: origin,
                angle,
                speed: TOWER_SHOT_SPEED,
                damage: progression::tower_damage(level),
                size: SHOT_SIZE,
            },
            out_events,
        );
        if let Some(state) = self.structures.get_mut(tower) {
            state.ready_in = progression::tower_fire_interval(level);
        }
    }

    fn launch(&mut self, projectile: Projectile, out_events: &mut Vec<Event>) {
        out_events.push(Event::ProjectileFired {
            origin: projectile.origin,
            position: projectile.position,
            angle: projectile.angle,
        });
        self.projectiles.push(projectile);
    }

    /// Moves every projectile, resolving at most one creature hit per
    /// projectile and discarding projectiles that leave the world.
    pub(crate) fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let extent = self.config.extent();
        let in_flight = std::mem::take(&mut self.projectiles);
        let mut survivors = Vec::with_capacity(in_flight.len());

        for mut projectile in in_flight {
            projectile.position =
                spatial::advance_along(projectile.position, projectile.angle, projectile.speed);

            let hit = self
                .creatures
                .values()
                .find(|creature| {
                    spatial::distance(projectile.position, creature.position)
                        < creature.size / 2.0 + projectile.size
                })
                .map(|creature| creature.id);

            if let Some(id) = hit {
                self.push_effect(
                    projectile.impact_effect(),
                    projectile.position,
                    IMPACT_EFFECT,
                );
                let depleted = match self.creatures.get_mut(&id) {
                    Some(creature) => {
                        creature.health.damage(projectile.damage);
                        creature.health.is_depleted()
                    }
                    None => false,
                };
                if depleted {
                    self.remove_creature(id, true, out_events);
                }
                continue;
            }

            let position = projectile.position;
            if position.x < 0.0
                || position.x > extent.x
                || position.y < 0.0
                || position.y > extent.y
            {
                continue;
            }
            survivors.push(projectile);
        }

        survivors.append(&mut self.projectiles);
        self.projectiles = survivors;
    }

    /// Lets every trap damage the creatures standing on it.
    ///
    /// Each hit also wears the trap down; a trap stops as soon as it breaks.
    /// Trap kills pay no reward.
    pub(crate) fn trigger_traps(&mut self, out_events: &mut Vec<Event>) {
        for trap in self.structures.ids_of(StructureKind::Trap) {
            let Some(state) = self.structures.get(trap) else {
                continue;
            };
            let (trap_position, trap_size) = (state.position, state.size());
            let victims: Vec<CreatureId> = self
                .creatures
                .values()
                .filter(|creature| {
                    spatial::in_contact(trap_position, trap_size, creature.position, creature.size)
                })
                .map(|creature| creature.id)
                .collect();

            for victim in victims {
                let Some(creature) = self.creatures.get_mut(&victim) else {
                    continue;
                };
                creature.health.damage(progression::TRAP_DAMAGE);
                let (killed, position) = (creature.health.is_depleted(), creature.position);
                self.push_effect(EffectKind::Explosion, position, IMPACT_EFFECT);
                if killed {
                    self.remove_creature(victim, false, out_events);
                }

                if self.damage_structure(trap, progression::TRAP_SELF_DAMAGE, out_events) {
                    break;
                }
            }
        }
    }

    /// Moves a creature one step toward its target, then resolves contact:
    /// touching the player ends the epoch, touching a wall or tower damages it
    /// once per attack interval.
    pub(crate) fn step_creature(
        &mut self,
        id: CreatureId,
        target: CreatureTarget,
        out_events: &mut Vec<Event>,
    ) {
        let (target_position, target_size) = match target {
            CreatureTarget::Player => (self.player.position, self.player.size),
            CreatureTarget::Structure(structure) => match self.structures.get(structure) {
                Some(state) if state.kind.attracts_creatures() => (state.position, state.size()),
                _ => return,
            },
        };
        let Some(creature) = self.creatures.get(&id) else {
            return;
        };

        let next = spatial::step_toward(creature.position, target_position, creature.speed);
        let size = creature.size;
        if !self.blocked_by_creature(next, size, Some(id)) {
            if let Some(creature) = self.creatures.get_mut(&id) {
                creature.position = next;
            }
        }

        let Some(creature) = self.creatures.get_mut(&id) else {
            return;
        };
        if !spatial::in_contact(creature.position, size, target_position, target_size) {
            return;
        }

        match target {
            CreatureTarget::Player => self.end_epoch(out_events),
            CreatureTarget::Structure(structure) => {
                if !creature.attack_cooldown.is_zero() {
                    return;
                }
                creature.attack_cooldown = progression::CREATURE_ATTACK_INTERVAL;
                let damage = creature.damage;
                self.push_effect(EffectKind::Hit, target_position, STRUCTURE_HIT_EFFECT);
                let _ = self.damage_structure(structure, damage, out_events);
            }
        }
    }

    /// Applies damage to a structure, removing it when its health runs out.
    /// Returns `true` when the structure was destroyed.
    fn damage_structure(
        &mut self,
        id: StructureId,
        damage: u32,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(state) = self.structures.get_mut(id) else {
            return false;
        };
        state.health.damage(damage);
        out_events.push(Event::StructureDamaged {
            structure: id,
            remaining: state.health.current(),
        });
        if !state.health.is_depleted() {
            return false;
        }

        let Some(removed) = self.structures.remove(id) else {
            return false;
        };
        self.push_effect(EffectKind::Explosion, removed.position, DESTRUCTION_EFFECT);
        debug!(structure = id.get(), kind = ?removed.kind, "structure_destroyed");
        out_events.push(Event::StructureDestroyed {
            structure: id,
            kind: removed.kind,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nightfall_core::{
        Command, CreatureId, CreatureKind, CreatureTarget, Event, MoveIntent, ProjectileOrigin,
        Rejection, StructureKind, Vec2,
    };

    use crate::{apply, query, World, WorldConfig};

    fn world() -> World {
        World::new(WorldConfig::empty(5))
    }

    fn spawn(world: &mut World, position: Vec2, wave: u32) {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnCreature {
                kind: CreatureKind::Standard,
                position,
                wave,
            },
            &mut events,
        );
    }

    fn tick(world: &mut World, events: &mut Vec<Event>) {
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            events,
        );
    }

    #[test]
    fn weapon_cooldown_blocks_rapid_fire() {
        let mut world = world();
        let mut events = Vec::new();
        let target = Vec2::new(2100.0, 2000.0);

        apply(&mut world, Command::AimAndFire { target }, &mut events);
        apply(&mut world, Command::AimAndFire { target }, &mut events);

        assert_eq!(query::projectiles(&world).len(), 1);
        assert_eq!(
            events.last(),
            Some(&Event::CommandRejected {
                reason: Rejection::WeaponCoolingDown,
            })
        );
        assert_eq!(
            query::player(&world).weapon_cooldown,
            Duration::from_millis(400)
        );

        for _ in 0..25 {
            tick(&mut world, &mut events);
        }
        apply(&mut world, Command::AimAndFire { target }, &mut events);
        assert_eq!(query::projectiles(&world).len(), 2);
    }

    #[test]
    fn projectile_damages_only_the_first_creature() {
        let mut world = world();
        let mut events = Vec::new();
        spawn(&mut world, Vec2::new(2012.0, 2000.0), 1);
        spawn(&mut world, Vec2::new(2013.0, 2000.0), 1);

        apply(
            &mut world,
            Command::AimAndFire {
                target: Vec2::new(2500.0, 2000.0),
            },
            &mut events,
        );
        apply(&mut world, Command::AdvanceProjectiles, &mut events);

        let creatures = query::creatures(&world).into_vec();
        assert_eq!(creatures[0].health.current(), 70 - 15);
        assert_eq!(creatures[1].health.current(), 70);
        assert!(query::projectiles(&world).is_empty());
    }

    #[test]
    fn projectile_kill_pays_score_and_gold() {
        let mut world = world();
        let mut events = Vec::new();
        spawn(&mut world, Vec2::new(2012.0, 2000.0), 1);

        for _ in 0..2 {
            apply(&mut world, Command::CastSpell, &mut events);
            apply(&mut world, Command::AdvanceProjectiles, &mut events);
        }

        assert!(query::creatures(&world).is_empty());
        assert!(events.contains(&Event::CreatureKilled {
            creature: CreatureId::new(0),
            credited: true,
        }));
        let player = query::player(&world);
        assert_eq!(player.score, 15);
        assert_eq!(player.wallet.gold(), 76);
    }

    #[test]
    fn projectile_leaving_world_is_discarded() {
        let config = WorldConfig {
            width: 100.0,
            height: 100.0,
            ..WorldConfig::empty(2)
        };
        let mut world = World::new(config);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::AimAndFire {
                target: Vec2::new(200.0, 50.0),
            },
            &mut events,
        );
        for _ in 0..5 {
            apply(&mut world, Command::AdvanceProjectiles, &mut events);
        }

        assert!(query::projectiles(&world).is_empty());
        assert_eq!(query::player(&world).score, 0);
    }

    #[test]
    fn spell_without_visible_creature_keeps_mana() {
        let mut world = world();
        let mut events = Vec::new();
        spawn(&mut world, Vec2::new(100.0, 100.0), 1);

        apply(&mut world, Command::CastSpell, &mut events);

        assert_eq!(query::player(&world).mana, 100.0);
        assert_eq!(
            events.last(),
            Some(&Event::CommandRejected {
                reason: Rejection::NoTarget,
            })
        );
    }

    #[test]
    fn spell_targets_nearest_visible_creature() {
        let mut world = world();
        let mut events = Vec::new();
        spawn(&mut world, Vec2::new(2300.0, 2000.0), 1);
        spawn(&mut world, Vec2::new(2000.0, 1900.0), 1);

        apply(&mut world, Command::CastSpell, &mut events);

        let projectiles = query::projectiles(&world);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].origin, ProjectileOrigin::Spell);
        assert_eq!(projectiles[0].damage, 50);
        assert!((projectiles[0].angle + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(query::player(&world).mana, 80.0);
    }

    #[test]
    fn creature_touching_player_ends_epoch() {
        let mut world = world();
        let mut events = Vec::new();
        spawn(&mut world, Vec2::new(2025.5, 2000.0), 1);

        apply(
            &mut world,
            Command::StepCreature {
                creature: CreatureId::new(0),
                target: CreatureTarget::Player,
            },
            &mut events,
        );

        assert!(query::is_game_over(&world));
        assert!(matches!(events.last(), Some(Event::GameOver { score: 0 })));
    }

    #[test]
    fn creature_attacks_structure_once_per_second() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Wall,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetMoveIntent {
                intent: MoveIntent::new(Vec2::new(0.0, 1.0)),
            },
            &mut events,
        );
        for _ in 0..50 {
            tick(&mut world, &mut events);
        }
        spawn(&mut world, Vec2::new(2030.0, 2000.0), 1);
        let creature = CreatureId::new(0);
        let wall = query::structures(&world).into_vec()[0].id;
        let step = Command::StepCreature {
            creature,
            target: CreatureTarget::Structure(wall),
        };

        apply(&mut world, step.clone(), &mut events);
        apply(&mut world, step.clone(), &mut events);
        let health = query::structures(&world).into_vec()[0].health.current();
        assert_eq!(health, 100 - 17);

        for _ in 0..63 {
            tick(&mut world, &mut events);
            apply(&mut world, step.clone(), &mut events);
        }
        let health = query::structures(&world).into_vec()[0].health.current();
        assert_eq!(health, 100 - 2 * 17);
    }

    #[test]
    fn trap_hits_once_and_breaks() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Trap,
            },
            &mut events,
        );
        spawn(&mut world, Vec2::new(2000.0, 2010.0), 1);
        spawn(&mut world, Vec2::new(2000.0, 1990.0), 1);

        apply(&mut world, Command::TriggerTraps, &mut events);

        let creatures = query::creatures(&world).into_vec();
        assert_eq!(creatures[0].health.current(), 20);
        assert_eq!(creatures[1].health.current(), 70);
        assert!(query::structures(&world).is_empty());
        assert!(events.iter().any(|event| matches!(
            event,
            Event::StructureDestroyed {
                kind: StructureKind::Trap,
                ..
            }
        )));
    }
}
