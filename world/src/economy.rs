//! Purchases: building structures, hiring helpers and raising upgrade levels.

use nightfall_core::{
    progression, spatial, Event, HelperId, Rejection, StructureKind, UpgradeTrack, Vec2,
};
use rand::Rng;
use tracing::debug;

use crate::{entities::Helper, reject, World};

const HELPER_SCATTER: f32 = 25.0;

impl World {
    /// Places a structure on the grid cell nearest to the player.
    ///
    /// Affordability and cell occupancy are both checked before anything is
    /// debited.
    pub(crate) fn build(&mut self, kind: StructureKind, out_events: &mut Vec<Event>) {
        let cost = kind.cost();
        if !self.player.wallet.can_afford(cost) {
            reject(Rejection::InsufficientResources, out_events);
            return;
        }

        let position = spatial::snap_point(self.player.position, self.config.grid_cell);
        if self.structures.is_occupied(position) {
            reject(Rejection::CellOccupied, out_events);
            return;
        }

        if !self.player.wallet.try_spend(cost) {
            reject(Rejection::InsufficientResources, out_events);
            return;
        }

        let max_health = match kind {
            StructureKind::Wall => progression::wall_health(self.levels.wall),
            StructureKind::Tower => progression::tower_health(self.levels.tower),
            StructureKind::Trap => progression::TRAP_HEALTH,
        };
        let structure = self.structures.insert(kind, position, max_health);
        debug!(
            structure = structure.get(),
            ?kind,
            x = position.x,
            y = position.y,
            total = self.structures.len(),
            "structure_built"
        );
        out_events.push(Event::StructureBuilt {
            structure,
            kind,
            position,
        });
    }

    /// Hires a helper that appears next to the player.
    pub(crate) fn hire_helper(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.wallet.try_spend(progression::HELPER_COST) {
            reject(Rejection::InsufficientResources, out_events);
            return;
        }

        let offset = Vec2::new(
            self.rng.gen::<f32>() * HELPER_SCATTER * 2.0 - HELPER_SCATTER,
            self.rng.gen::<f32>() * HELPER_SCATTER * 2.0 - HELPER_SCATTER,
        );
        let id = self.next_helper_id;
        self.next_helper_id = HelperId::new(id.get().saturating_add(1));
        let _ = self
            .helpers
            .insert(id, Helper::new(id, self.player.position + offset));
        debug!(helper = id.get(), total = self.helpers.len(), "helper_hired");
        out_events.push(Event::HelperHired { helper: id });
    }

    /// Raises an upgrade track by one level.
    ///
    /// Wall and tower upgrades also raise the maximum health of every existing
    /// structure of that kind and heal it.
    pub(crate) fn upgrade(&mut self, track: UpgradeTrack, out_events: &mut Vec<Event>) {
        let level = match track {
            UpgradeTrack::Weapon => self.levels.weapon,
            UpgradeTrack::Wall => self.levels.wall,
            UpgradeTrack::Tower => self.levels.tower,
        };
        if level >= progression::MAX_LEVEL {
            reject(Rejection::LevelCapReached, out_events);
            return;
        }
        if !self.player.wallet.try_spend(track.cost()) {
            reject(Rejection::InsufficientResources, out_events);
            return;
        }

        let level = level + 1;
        match track {
            UpgradeTrack::Weapon => self.levels.weapon = level,
            UpgradeTrack::Wall => {
                self.levels.wall = level;
                self.structures
                    .reinforce(StructureKind::Wall, progression::wall_health(level));
            }
            UpgradeTrack::Tower => {
                self.levels.tower = level;
                self.structures
                    .reinforce(StructureKind::Tower, progression::tower_health(level));
            }
        }
        debug!(?track, level, "upgraded");
        out_events.push(Event::Upgraded { track, level });
    }
}

#[cfg(test)]
mod tests {
    use nightfall_core::{Command, Event, Rejection, StructureKind, UpgradeTrack, Vec2, Wallet};

    use crate::{apply, query, World, WorldConfig};

    fn world_with_wallet(wallet: Wallet) -> World {
        let config = WorldConfig {
            starting_wood: wallet.wood(),
            starting_stone: wallet.stone(),
            starting_gold: wallet.gold(),
            ..WorldConfig::empty(11)
        };
        World::new(config)
    }

    #[test]
    fn wall_costs_wood_and_stone() {
        let mut world = world_with_wallet(Wallet::new(150, 150, 75));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Wall,
            },
            &mut events,
        );

        assert_eq!(query::player(&world).wallet, Wallet::new(140, 140, 75));
        let structures = query::structures(&world).into_vec();
        assert_eq!(structures.len(), 1);
        assert_eq!(structures[0].position, Vec2::new(2000.0, 2000.0));
        assert_eq!(structures[0].health.maximum(), 100);
    }

    #[test]
    fn unaffordable_wall_changes_nothing() {
        let mut world = world_with_wallet(Wallet::new(10, 9, 0));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Wall,
            },
            &mut events,
        );

        assert_eq!(query::player(&world).wallet, Wallet::new(10, 9, 0));
        assert!(query::structures(&world).is_empty());
        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: Rejection::InsufficientResources,
            }]
        );
    }

    #[test]
    fn occupied_cell_is_not_charged() {
        let mut world = world_with_wallet(Wallet::new(150, 150, 75));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Tower,
            },
            &mut events,
        );
        let after_first = query::player(&world).wallet;
        apply(
            &mut world,
            Command::Build {
                kind: StructureKind::Trap,
            },
            &mut events,
        );

        assert_eq!(query::player(&world).wallet, after_first);
        assert_eq!(query::structures(&world).len(), 1);
        assert_eq!(
            events.last(),
            Some(&Event::CommandRejected {
                reason: Rejection::CellOccupied,
            })
        );
    }

    #[test]
    fn helper_appears_near_player() {
        let mut world = world_with_wallet(Wallet::new(0, 0, 250));
        let mut events = Vec::new();

        apply(&mut world, Command::HireHelper, &mut events);
        apply(&mut world, Command::HireHelper, &mut events);
        apply(&mut world, Command::HireHelper, &mut events);

        let helpers = query::helpers(&world);
        assert_eq!(helpers.len(), 2);
        assert_eq!(query::player(&world).wallet.gold(), 50);
        for helper in helpers.iter() {
            let offset = helper.position - Vec2::new(2000.0, 2000.0);
            assert!(offset.x.abs() <= 25.0 && offset.y.abs() <= 25.0);
            assert_eq!(helper.health.current(), 300);
        }
    }

    #[test]
    fn upgrades_stop_at_level_five() {
        let mut world = world_with_wallet(Wallet::new(0, 0, 10_000));
        let mut events = Vec::new();

        for _ in 0..10 {
            apply(
                &mut world,
                Command::Upgrade {
                    track: UpgradeTrack::Weapon,
                },
                &mut events,
            );
        }

        assert_eq!(query::levels(&world).weapon, 5);
        assert_eq!(query::player(&world).wallet.gold(), 10_000 - 4 * 50);
        assert_eq!(
            events.last(),
            Some(&Event::CommandRejected {
                reason: Rejection::LevelCapReached,
            })
        );
    }

    #[test]
    fn wall_upgrade_reinforces_existing_walls() {
        let mut world = world_with_wallet(Wallet::new(100, 100, 100));
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
            Command::Upgrade {
                track: UpgradeTrack::Wall,
            },
            &mut events,
        );

        let wall = query::structures(&world).into_vec().remove(0);
        assert_eq!(wall.health.maximum(), 150);
        assert_eq!(wall.health.current(), 150);
        assert_eq!(query::levels(&world).wall, 2);
        assert_eq!(query::player(&world).wallet.gold(), 80);
    }
}
