use std::time::Duration;

use nightfall_core::{
    Command, CreatureKind, Event, ProjectileOrigin, StructureKind, UpgradeTrack, Vec2,
};
use nightfall_system_tower_targeting::TowerTargeting;
use nightfall_world::{self as world, query, World, WorldConfig};

fn tower_shots(upgrades: usize, ticks: usize) -> usize {
    let mut world = World::new(WorldConfig::empty(9));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Build {
            kind: StructureKind::Tower,
        },
        &mut events,
    );
    for _ in 0..upgrades {
        world::apply(
            &mut world,
            Command::Upgrade {
                track: UpgradeTrack::Tower,
            },
            &mut events,
        );
    }
    world::apply(
        &mut world,
        Command::SpawnCreature {
            kind: CreatureKind::Boss,
            position: Vec2::new(2150.0, 2000.0),
            wave: 1,
        },
        &mut events,
    );
    events.clear();

    let mut targeting = TowerTargeting::new();
    let mut targets = Vec::new();
    let mut rejected = 0;
    for _ in 0..ticks {
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        targeting.handle(
            &query::structures(&world),
            &query::creatures(&world),
            query::levels(&world).tower,
            &mut targets,
        );
        for target in &targets {
            let before = events.len();
            world::apply(
                &mut world,
                Command::FireTowerProjectile {
                    tower: target.tower,
                    target: target.creature,
                },
                &mut events,
            );
            if events.len() == before {
                rejected += 1;
            }
        }
    }
    assert_eq!(rejected, 0, "every assignment names a tower ready to fire");

    events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::ProjectileFired {
                    origin: ProjectileOrigin::Tower,
                    ..
                }
            )
        })
        .count()
}

#[test]
fn level_one_tower_fires_every_eight_hundred_milliseconds() {
    assert_eq!(tower_shots(0, 20), 3);
}

#[test]
fn level_two_tower_fires_every_four_hundred_milliseconds() {
    assert_eq!(tower_shots(1, 20), 5);
}
