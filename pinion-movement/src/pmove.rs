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

//! The per-tick driver & the pieces shared by every move type

use log::warn;

use crate::command::{Buttons, UserCommand};
use crate::error::MoveError;
use crate::state::{MoveType, PlayerMove};
use crate::vars::MoveVars;
use pinion_levels::collision::{CollisionError, HullRef, Trace};
use pinion_levels::traits::HasHulls;
use pinion_levels::types::{Contents, Vector3};

/// Steepest surface that still counts as ground
pub(crate) const GROUND_NORMAL_Z: f32 = 0.7;

/// Rising faster than this never counts as being on the ground
const AIRBORNE_SPEED: f32 = 180.0;

/// How far below the origin to look for ground
const GROUND_PROBE: f32 = 2.0;

const DEAD_VIEW_HEIGHT: f32 = -8.0;

/// Jumping while faster than this times max speed gets slowed down
const BUNNY_JUMP_MAX_SPEED_FACTOR: f32 = 1.7;
const BUNNY_JUMP_DAMPING: f32 = 0.65;

/// The hulls a player collides with.
#[derive(Debug, Clone, Copy)]
pub struct MoveHulls<'a> {
    /// Hull matching the player's box
    pub player: HullRef<'a>,

    /// Point sized hull, for sampling what the player is standing in
    pub point: HullRef<'a>,
}

impl<'a> MoveHulls<'a> {
    /// Hull `hull` of the world, along with the point hull.
    pub fn for_world<L: HasHulls>(
        level: &'a L,
        hull: usize,
    ) -> Result<MoveHulls<'a>, CollisionError> {
        Ok(MoveHulls {
            player: level.world_hull(hull)?,
            point: level.world_hull(0)?,
        })
    }
}

/// State for one call of [`player_move`].
pub(crate) struct PmoveContext<'a> {
    pub(crate) hulls: MoveHulls<'a>,
    pub(crate) vars: &'a MoveVars,
    pub(crate) pm: &'a mut PlayerMove,

    pub(crate) forward_move: f32,
    pub(crate) side_move: f32,
    pub(crate) up_move: f32,
    pub(crate) buttons: Buttons,
    pub(crate) frame_time: f32,

    pub(crate) forward: Vector3,
    pub(crate) right: Vector3,
    pub(crate) up: Vector3,
}

/// Run one tick of movement for `pm`.
/// Fly mode isn't supported and leaves the state untouched.
pub fn player_move(
    hulls: &MoveHulls<'_>,
    vars: &MoveVars,
    pm: &mut PlayerMove,
    cmd: &UserCommand,
) -> Result<(), MoveError> {
    if pm.move_type == MoveType::Fly {
        warn!("Ignoring move for player in unimplemented mode {:?}", pm.move_type);
        return Err(MoveError::UnimplementedMode(pm.move_type));
    }

    let mut ctx = PmoveContext {
        hulls: *hulls,
        vars,
        pm,
        forward_move: cmd.forward_move,
        side_move: cmd.side_move,
        up_move: cmd.up_move,
        buttons: cmd.buttons,
        frame_time: cmd.frame_time,
        forward: Vector3::zeros(),
        right: Vector3::zeros(),
        up: Vector3::zeros(),
    };

    ctx.check_parameters(&cmd.view_angles);

    let (forward, right, up) = angle_vectors(&ctx.pm.angles);
    ctx.forward = forward;
    ctx.right = right;
    ctx.up = up;

    ctx.categorize_position()?;

    match ctx.pm.move_type {
        MoveType::NoClip => ctx.noclip(),
        _ => ctx.walk()?,
    }

    Ok(())
}

/// Forward, right & up vectors for pitch, yaw & roll in degrees.
pub fn angle_vectors(angles: &Vector3) -> (Vector3, Vector3, Vector3) {
    let (sp, cp) = angles.x.to_radians().sin_cos();
    let (sy, cy) = angles.y.to_radians().sin_cos();
    let (sr, cr) = angles.z.to_radians().sin_cos();

    let forward = Vector3::new(cp * cy, cp * sy, -sp);
    let right = Vector3::new(
        -sr * sp * cy + cr * sy,
        -sr * sp * sy - cr * cy,
        -sr * cp,
    );
    let up = Vector3::new(cr * sp * cy + sr * sy, cr * sp * sy - sr * cy, cr * cp);

    (forward, right, up)
}

/// Wrap an angle in degrees into (-180, 180].
fn wrap_angle(angle: f32) -> f32 {
    180.0 - (180.0 - angle).rem_euclid(360.0)
}

impl<'a> PmoveContext<'a> {
    /// Trace the player's box through the level.
    /// Starting inside solid counts as not getting anywhere.
    pub(crate) fn player_trace(&self, start: &Vector3, end: &Vector3) -> Result<Trace, MoveError> {
        let mut trace = self.hulls.player.trace(start, end)?;
        if trace.start_solid {
            trace.fraction = 0.0;
        }

        Ok(trace)
    }

    pub(crate) fn point_contents(&self, point: &Vector3) -> Result<Contents, MoveError> {
        Ok(self.hulls.point.point_contents(point)?)
    }

    /// Clamp the wish velocity, and take the view angles from the command.
    fn check_parameters(&mut self, view_angles: &Vector3) {
        let speed = (self.forward_move * self.forward_move
            + self.side_move * self.side_move
            + self.up_move * self.up_move)
            .sqrt();

        if speed != 0.0 && speed > self.vars.max_speed {
            let ratio = self.vars.max_speed / speed;
            self.forward_move *= ratio;
            self.side_move *= ratio;
            self.up_move *= ratio;
        }

        if self.pm.dead {
            self.forward_move = 0.0;
            self.side_move = 0.0;
            self.up_move = 0.0;
            self.pm.view_offset.z = DEAD_VIEW_HEIGHT;
        } else {
            self.pm.angles = Vector3::new(view_angles.x, wrap_angle(view_angles.y), 0.0);
        }
    }

    /// Work out the water level, and whether we're standing on something.
    pub(crate) fn categorize_position(&mut self) -> Result<(), MoveError> {
        self.check_water()?;

        if self.pm.velocity.z > AIRBORNE_SPEED {
            self.pm.on_ground = false;
            return Ok(());
        }

        let mut point = self.pm.origin;
        point.z -= GROUND_PROBE;

        let trace = self.player_trace(&self.pm.origin, &point)?;
        self.pm.on_ground = trace.hit_plane.normal.z >= GROUND_NORMAL_Z;

        if self.pm.on_ground {
            self.pm.water_jump_time = 0.0;

            // Stick to the ground
            if self.pm.water_level < 2 && !trace.start_solid && !trace.all_solid {
                self.pm.origin = trace.end_position;
            }
        }

        Ok(())
    }

    pub(crate) fn in_water(&self) -> bool {
        self.pm.water_level > 1
    }

    /// Half of this tick's gravity. The rest is added after moving.
    fn add_half_gravity(&mut self) {
        if self.pm.water_jump_time > 0.0 {
            return;
        }

        self.pm.velocity.z -=
            self.vars.entity_gravity * self.vars.gravity * 0.5 * self.frame_time;
        self.check_velocity();
    }

    /// Clamp every component to the max velocity, and get rid of NaNs.
    pub(crate) fn check_velocity(&mut self) {
        let max = self.vars.max_velocity;

        for i in 0..3 {
            if self.pm.velocity[i].is_nan() {
                warn!("Got a NaN velocity on axis {}", i);
                self.pm.velocity[i] = 0.0;
            }
            if self.pm.origin[i].is_nan() {
                warn!("Got a NaN origin on axis {}", i);
                self.pm.origin[i] = 0.0;
            }

            self.pm.velocity[i] = self.pm.velocity[i].max(-max).min(max);
        }
    }

    /// Handle the jump button. Only jumps on the tick it's pressed.
    fn jump(&mut self) {
        if self.pm.dead {
            self.pm.old_buttons |= Buttons::JUMP;
            return;
        }

        if self.pm.water_jump_time > 0.0 {
            self.pm.water_jump_time = (self.pm.water_jump_time - self.frame_time).max(0.0);
            return;
        }

        if self.pm.water_level >= 2 {
            // Swim up
            self.pm.on_ground = false;
            self.pm.velocity.z = match self.pm.water_type {
                Contents::Water => 100.0,
                Contents::Slime => 80.0,
                _ => 50.0,
            };
            return;
        }

        if !self.pm.on_ground {
            self.pm.old_buttons |= Buttons::JUMP;
            return;
        }

        if self.pm.old_buttons.contains(Buttons::JUMP) {
            return;
        }

        self.pm.on_ground = false;

        let max_scaled = BUNNY_JUMP_MAX_SPEED_FACTOR * self.vars.max_speed;
        let speed = self.pm.velocity.norm();
        if max_scaled > 0.0 && speed > max_scaled {
            self.pm.velocity *= (max_scaled / speed) * BUNNY_JUMP_DAMPING;
        }

        self.pm.velocity.z = (2.0 * self.vars.gravity * self.vars.jump_height).sqrt();
        self.add_half_gravity();

        self.pm.old_buttons |= Buttons::JUMP;
    }

    fn noclip(&mut self) {
        let mut wish_vel = self.forward.normalize() * self.forward_move
            + self.right.normalize() * self.side_move;
        wish_vel.z += self.up_move;

        self.pm.origin += wish_vel * self.frame_time;
        self.pm.velocity = Vector3::zeros();
    }

    fn walk(&mut self) -> Result<(), MoveError> {
        if !self.in_water() {
            self.add_half_gravity();
        }

        if self.in_water() {
            // Falling again, so not getting out of the water any more
            if self.pm.velocity.z < 0.0 && self.pm.water_jump_time > 0.0 {
                self.pm.water_jump_time = 0.0;
            }

            self.jump_or_release();
            self.water_move()?;
            self.categorize_position()?;

            return Ok(());
        }

        self.jump_or_release();

        if self.pm.on_ground {
            self.pm.velocity.z = 0.0;
            self.friction()?;
        }

        self.check_velocity();

        if self.pm.on_ground {
            self.walk_move()?;
        } else {
            self.air_move()?;
        }

        self.categorize_position()?;
        self.check_velocity();

        if !self.in_water() {
            self.add_half_gravity();
        }

        if self.pm.on_ground {
            self.pm.velocity.z = 0.0;
        }

        Ok(())
    }

    fn jump_or_release(&mut self) {
        if self.buttons.contains(Buttons::JUMP) {
            self.jump();
        } else {
            self.pm.old_buttons.remove(Buttons::JUMP);
        }
    }
}
