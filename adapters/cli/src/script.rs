//! Canned player behaviours for headless runs.

use clap::ValueEnum;
use nightfall_core::{spatial, Command, MoveIntent, StructureKind, Vec2};
use nightfall_world::{query, World};

/// Steps the builder walks before placing its wall.
const BUILDER_WALK_STEPS: u64 = 10;

/// Player behaviour driven by the command-line runner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Script {
    /// Stands still and does nothing.
    #[default]
    Idle,
    /// Builds a tower and a wall, then shoots at the nearest creature.
    Builder,
}

impl Script {
    /// Emits the commands the scripted player issues before step `step`.
    pub(crate) fn commands(self, step: u64, world: &World, out: &mut Vec<Command>) {
        match self {
            Self::Idle => {}
            Self::Builder => builder(step, world, out),
        }
    }
}

fn builder(step: u64, world: &World, out: &mut Vec<Command>) {
    match step {
        0 => {
            out.push(Command::Build {
                kind: StructureKind::Tower,
            });
            out.push(Command::SetMoveIntent {
                intent: MoveIntent::new(Vec2::X),
            });
        }
        BUILDER_WALK_STEPS => {
            out.push(Command::SetMoveIntent {
                intent: MoveIntent::IDLE,
            });
            out.push(Command::Build {
                kind: StructureKind::Wall,
            });
        }
        _ => {}
    }

    let player = query::player(world).position;
    let creatures = query::creatures(world);
    let nearest = spatial::select_nearest(
        player,
        creatures
            .iter()
            .map(|creature| (creature.position, creature.position)),
    );
    if let Some((target, _)) = nearest {
        out.push(Command::AimAndFire { target });
    }
}
