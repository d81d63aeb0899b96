//! Minimal one-dimensional arena the demo enemy lives in.
//!
//! The world is stored on the blackboard under [`WORLD_KEY`]; conditions read
//! it and actions mutate it.

use behavior_tree::{Blackboard, Status};

pub const WORLD_KEY: &str = "world";
pub const LAST_SEEN_KEY: &str = "lastKnownTarget";

const SIGHT_RANGE: i32 = 4;
const ATTACK_RANGE: i32 = 1;
const WAYPOINTS: [i32; 2] = [0, 8];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    pub enemy: i32,
    pub player: i32,
    pub player_hp: i32,
    pub waypoint: usize,
}

impl Default for World {
    fn default() -> Self {
        Self {
            enemy: 0,
            player: 12,
            player_hp: 3,
            waypoint: 1,
        }
    }
}

impl World {
    pub fn distance(&self) -> i32 {
        (self.player - self.enemy).abs()
    }

    /// Player wanders one step towards the enemy's side every other tick.
    pub fn advance(&mut self, tick: u64) {
        if tick % 2 == 0 && self.player > 0 {
            self.player -= 1;
        }
    }
}

fn with_world<R>(bb: &mut Blackboard, f: impl FnOnce(&mut World) -> R) -> Option<R> {
    bb.get_mut::<World>(WORLD_KEY).map(f)
}

pub fn sees_player(bb: &Blackboard) -> bool {
    bb.get_ref::<World>(WORLD_KEY)
        .is_some_and(|world| world.player_hp > 0 && world.distance() <= SIGHT_RANGE)
}

pub fn in_attack_range(bb: &Blackboard) -> bool {
    bb.get_ref::<World>(WORLD_KEY)
        .is_some_and(|world| world.player_hp > 0 && world.distance() <= ATTACK_RANGE)
}

pub fn attack(bb: &mut Blackboard) -> Status {
    with_world(bb, |world| {
        world.player_hp -= 1;
        tracing::info!("enemy attacks, player hp {}", world.player_hp);
        Status::Success
    })
    .unwrap_or(Status::Failure)
}

/// Moves one step towards the player; `Running` until adjacent.
pub fn chase(bb: &mut Blackboard) -> Status {
    let Some((status, target)) = with_world(bb, |world| {
        world.enemy += (world.player - world.enemy).signum();
        let status = if world.distance() <= ATTACK_RANGE {
            Status::Success
        } else {
            Status::Running
        };
        (status, world.player)
    }) else {
        return Status::Failure;
    };

    bb.set(LAST_SEEN_KEY, target);
    status
}

/// Walks towards the current waypoint; `Success` on arrival.
pub fn patrol(bb: &mut Blackboard) -> Status {
    with_world(bb, |world| {
        let goal = WAYPOINTS[world.waypoint];
        world.enemy += (goal - world.enemy).signum();
        if world.enemy == goal {
            world.waypoint = (world.waypoint + 1) % WAYPOINTS.len();
            Status::Success
        } else {
            Status::Running
        }
    })
    .unwrap_or(Status::Failure)
}
