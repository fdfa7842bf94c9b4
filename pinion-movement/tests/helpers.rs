/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */
#![allow(dead_code)]

//! Small in-memory levels to move around in.

use pinion_levels::collision::{HullRef, DIST_EPSILON};
use pinion_levels::traits::hulls::{ClipNode, HullChild};
use pinion_levels::traits::planes::{Plane, PlaneAxis};
use pinion_levels::types::{Contents, Vector3};
use pinion_movement::*;

pub const ROOM_MIN: [f32; 3] = [-128.0, -128.0, 0.0];
pub const ROOM_MAX: [f32; 3] = [128.0, 128.0, 256.0];

/// Half height of the standing player box
pub const STAND_HEIGHT: f32 = 36.0;

/// 16 unit high step across the middle of the room
pub const STEP: ([f32; 3], [f32; 3]) = ([32.0, -128.0, 0.0], [64.0, 128.0, 16.0]);

pub const SOLID: HullChild = HullChild::Contents(Contents::Solid);
pub const EMPTY: HullChild = HullChild::Contents(Contents::Empty);

/// A closed room, optionally with a step in it and water up to some height.
pub struct TestWorld {
    planes: Vec<Plane>,
    clipnodes: Vec<ClipNode>,
    point_head: HullChild,
    player_head: HullChild,
    player_mins: Vector3,
    player_maxs: Vector3,
}

/// A plane facing along `normal`, tagged axial if it points straight down an axis.
pub fn plane(normal: [f32; 3], dist: f32) -> Plane {
    let normal = Vector3::from(normal);
    let axis = match (normal.x, normal.y, normal.z) {
        (x, _, _) if x == 1.0 => PlaneAxis::X,
        (_, y, _) if y == 1.0 => PlaneAxis::Y,
        (_, _, z) if z == 1.0 => PlaneAxis::Z,
        (x, y, z) if x.abs() >= y.abs() && x.abs() >= z.abs() => PlaneAxis::AnyX,
        (_, y, z) if y.abs() >= z.abs() => PlaneAxis::AnyY,
        _ => PlaneAxis::AnyZ,
    };

    Plane { normal, dist, axis }
}

/// Clipnode splitting on `plane_idx`, with its front then back child.
pub fn split(plane_idx: u32, front: HullChild, back: HullChild) -> ClipNode {
    ClipNode {
        plane_idx,
        children: [front, back],
    }
}

fn add_plane(planes: &mut Vec<Plane>, axis: usize, dist: f32) -> u32 {
    let mut normal = Vector3::zeros();
    normal[axis] = 1.0;

    planes.push(Plane {
        normal,
        dist,
        axis: [PlaneAxis::X, PlaneAxis::Y, PlaneAxis::Z][axis],
    });

    (planes.len() - 1) as u32
}

/// Append 6 clipnodes checking if a point is in `mins..maxs`, returning the first.
fn clip_box(
    planes: &mut Vec<Plane>,
    nodes: &mut Vec<ClipNode>,
    mins: Vector3,
    maxs: Vector3,
    inside: HullChild,
    outside: HullChild,
) -> HullChild {
    let first = nodes.len() as u32;

    for i in 0..6 {
        let axis = i / 2;
        let next = if i == 5 {
            inside
        } else {
            HullChild::Node(first + i as u32 + 1)
        };

        let (plane_idx, children) = if i % 2 == 0 {
            (add_plane(planes, axis, mins[axis]), [next, outside])
        } else {
            (add_plane(planes, axis, maxs[axis]), [outside, next])
        };

        nodes.push(ClipNode {
            plane_idx,
            children,
        });
    }

    HullChild::Node(first)
}

fn build_hull(
    planes: &mut Vec<Plane>,
    nodes: &mut Vec<ClipNode>,
    hull_mins: Vector3,
    hull_maxs: Vector3,
    step: Option<([f32; 3], [f32; 3])>,
    water_top: Option<f32>,
) -> HullChild {
    let mut open = EMPTY;

    if let Some(top) = water_top {
        let plane_idx = add_plane(planes, 2, top);
        nodes.push(ClipNode {
            plane_idx,
            children: [open, HullChild::Contents(Contents::Water)],
        });
        open = HullChild::Node((nodes.len() - 1) as u32);
    }

    if let Some((mins, maxs)) = step {
        let mins = Vector3::from(mins) - hull_maxs;
        let maxs = Vector3::from(maxs) - hull_mins;
        open = clip_box(planes, nodes, mins, maxs, SOLID, open);
    }

    clip_box(
        planes,
        nodes,
        Vector3::from(ROOM_MIN) - hull_mins,
        Vector3::from(ROOM_MAX) - hull_maxs,
        open,
        SOLID,
    )
}

impl TestWorld {
    /// `player_box` is the player's (mins, maxs). All zeroes for a point.
    pub fn new(
        player_box: ([f32; 3], [f32; 3]),
        step: Option<([f32; 3], [f32; 3])>,
        water_top: Option<f32>,
    ) -> TestWorld {
        let mut planes = vec![];
        let mut clipnodes = vec![];
        let player_mins = Vector3::from(player_box.0);
        let player_maxs = Vector3::from(player_box.1);

        let point_head = build_hull(
            &mut planes,
            &mut clipnodes,
            Vector3::zeros(),
            Vector3::zeros(),
            step,
            water_top,
        );
        let player_head = build_hull(
            &mut planes,
            &mut clipnodes,
            player_mins,
            player_maxs,
            step,
            water_top,
        );

        TestWorld {
            planes,
            clipnodes,
            point_head,
            player_head,
            player_mins,
            player_maxs,
        }
    }

    /// Room for a standing player
    pub fn standing(step: Option<([f32; 3], [f32; 3])>, water_top: Option<f32>) -> TestWorld {
        TestWorld::new(
            ([-16.0, -16.0, -STAND_HEIGHT], [16.0, 16.0, STAND_HEIGHT]),
            step,
            water_top,
        )
    }

    /// Room for a point sized player
    pub fn point(step: Option<([f32; 3], [f32; 3])>) -> TestWorld {
        TestWorld::new(([0.0; 3], [0.0; 3]), step, None)
    }

    /// A point sized player in a hand built tree, rooted at clipnode 0.
    pub fn point_tree(planes: Vec<Plane>, clipnodes: Vec<ClipNode>) -> TestWorld {
        TestWorld {
            planes,
            clipnodes,
            point_head: HullChild::Node(0),
            player_head: HullChild::Node(0),
            player_mins: Vector3::zeros(),
            player_maxs: Vector3::zeros(),
        }
    }

    fn hull_ref(&self, head: HullChild, mins: Vector3, maxs: Vector3) -> HullRef<'_> {
        HullRef {
            planes: &self.planes,
            clipnodes: &self.clipnodes,
            head_node: head,
            first_clipnode: 0,
            last_clipnode: (self.clipnodes.len() - 1) as u32,
            clip_mins: mins,
            clip_maxs: maxs,
        }
    }

    pub fn hulls(&self) -> MoveHulls<'_> {
        MoveHulls {
            player: self.hull_ref(self.player_head, self.player_mins, self.player_maxs),
            point: self.hull_ref(self.point_head, Vector3::zeros(), Vector3::zeros()),
        }
    }
}

/// A player at `origin`, standing still.
pub fn player_at(x: f32, y: f32, z: f32) -> PlayerMove {
    PlayerMove {
        origin: Vector3::new(x, y, z),
        ..PlayerMove::default()
    }
}

/// Resting height for a standing player on a floor at `floor`
pub fn standing_z(floor: f32) -> f32 {
    floor + STAND_HEIGHT + DIST_EPSILON
}

pub fn idle() -> UserCommand {
    UserCommand::default()
}

pub fn forward(speed: f32) -> UserCommand {
    UserCommand {
        forward_move: speed,
        ..UserCommand::default()
    }
}

pub fn jump() -> UserCommand {
    UserCommand {
        buttons: Buttons::JUMP,
        ..UserCommand::default()
    }
}

/// Run `ticks` ticks of the same command.
pub fn run(world: &TestWorld, pm: &mut PlayerMove, cmd: &UserCommand, ticks: usize) {
    let vars = MoveVars::default();
    for _ in 0..ticks {
        player_move(&world.hulls(), &vars, pm, cmd).expect("move should succeed");
    }
}

/// Run `cmd` until `done` or `max` ticks pass. Returns how many ticks were run.
pub fn run_until<F: Fn(&PlayerMove) -> bool>(
    world: &TestWorld,
    pm: &mut PlayerMove,
    cmd: &UserCommand,
    max: usize,
    done: F,
) -> usize {
    let vars = MoveVars::default();
    for tick in 0..max {
        if done(pm) {
            return tick;
        }
        player_move(&world.hulls(), &vars, pm, cmd).expect("move should succeed");
    }

    max
}

pub fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}
