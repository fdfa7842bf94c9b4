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

//! Ground & air movement, and sliding along whatever gets in the way

use crate::error::MoveError;
use crate::pmove::{PmoveContext, GROUND_NORMAL_Z};
use crate::state::MoveType;
use pinion_levels::types::Vector3;

/// Velocity components smaller than this are snapped to 0 after clipping
const STOP_EPSILON: f32 = 0.1;

const MAX_CLIP_PLANES: usize = 5;
const MAX_BUMPS: usize = 4;

/// Air control only adds speed up to this along the wish direction
const AIR_WISH_SPEED_CAP: f32 = 30.0;

/// Where to look for a drop in front of the player
const EDGE_PROBE_AHEAD: f32 = 16.0;
const EDGE_PROBE_DEPTH: f32 = 34.0;

/// Remove the part of `velocity` going into a plane with the given normal.
/// An overbounce above 1 pushes back out of the plane.
pub fn clip_velocity(velocity: &Vector3, normal: &Vector3, overbounce: f32) -> Vector3 {
    let backoff = velocity.dot(normal) * overbounce;
    let mut out = velocity - normal * backoff;

    for i in 0..3 {
        if out[i] > -STOP_EPSILON && out[i] < STOP_EPSILON {
            out[i] = 0.0;
        }
    }

    out
}

/// `v` flattened onto the horizontal plane and normalised, or zero if it's vertical.
fn flat_normal(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, v.y, 0.0)
        .try_normalize(0.0)
        .unwrap_or_else(Vector3::zeros)
}

fn horizontal_dist_sq(a: &Vector3, b: &Vector3) -> f32 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

impl<'a> PmoveContext<'a> {
    /// Horizontal direction & speed the player wants to go in, capped to max speed.
    fn horizontal_wish(&self) -> (Vector3, f32) {
        let wish_vel =
            flat_normal(&self.forward) * self.forward_move + flat_normal(&self.right) * self.side_move;

        let wish_speed = wish_vel.norm();
        let wish_dir = if wish_speed > 0.0 {
            wish_vel / wish_speed
        } else {
            Vector3::zeros()
        };

        (wish_dir, wish_speed.min(self.vars.max_speed))
    }

    pub(crate) fn accelerate(&mut self, wish_dir: &Vector3, wish_speed: f32, accel: f32) {
        if self.pm.dead || self.pm.water_jump_time > 0.0 {
            return;
        }

        let add_speed = wish_speed - self.pm.velocity.dot(wish_dir);
        if add_speed <= 0.0 {
            return;
        }

        let accel_speed =
            (accel * self.frame_time * wish_speed * self.pm.friction).min(add_speed);
        self.pm.velocity += wish_dir * accel_speed;
    }

    /// Like [`accelerate`](Self::accelerate), but speed along the wish direction is capped low.
    /// This is what lets you steer while in the air without gaining much speed.
    fn air_accelerate(&mut self, wish_dir: &Vector3, wish_speed: f32, accel: f32) {
        if self.pm.dead || self.pm.water_jump_time > 0.0 {
            return;
        }

        let add_speed = wish_speed.min(AIR_WISH_SPEED_CAP) - self.pm.velocity.dot(wish_dir);
        if add_speed <= 0.0 {
            return;
        }

        let accel_speed =
            (accel * self.frame_time * wish_speed * self.pm.friction).min(add_speed);
        self.pm.velocity += wish_dir * accel_speed;
    }

    /// Slow down while on the ground, more so near a drop.
    pub(crate) fn friction(&mut self) -> Result<(), MoveError> {
        if self.pm.water_jump_time > 0.0 {
            return Ok(());
        }

        let speed = self.pm.velocity.norm();
        if speed < 0.1 {
            return Ok(());
        }

        let mut drop = 0.0;
        if self.pm.on_ground {
            let ahead = self.pm.velocity / speed * EDGE_PROBE_AHEAD;
            let start = Vector3::new(
                self.pm.origin.x + ahead.x,
                self.pm.origin.y + ahead.y,
                self.pm.origin.z + self.hulls.player.clip_mins.z,
            );
            let stop = Vector3::new(start.x, start.y, start.z - EDGE_PROBE_DEPTH);

            let trace = self.player_trace(&start, &stop)?;

            let mut friction = self.vars.friction;
            if trace.fraction == 1.0 {
                friction *= self.vars.edge_friction;
            }
            friction *= self.pm.friction;

            let control = speed.max(self.vars.stop_speed);
            drop += control * friction * self.frame_time;
        }

        let new_speed = (speed - drop).max(0.0);
        self.pm.velocity *= new_speed / speed;

        Ok(())
    }

    /// Move along the ground, stepping up stairs if that gets us further.
    pub(crate) fn walk_move(&mut self) -> Result<(), MoveError> {
        let (wish_dir, wish_speed) = self.horizontal_wish();

        self.pm.velocity.z = 0.0;
        self.accelerate(&wish_dir, wish_speed, self.vars.accelerate);
        self.pm.velocity.z = 0.0;

        if self.pm.velocity.norm() < 1.0 {
            self.pm.velocity = Vector3::zeros();
            return Ok(());
        }

        let was_on_ground = self.pm.on_ground;

        // Try moving straight there first
        let mut dest = self.pm.origin + self.pm.velocity * self.frame_time;
        dest.z = self.pm.origin.z;

        let trace = self.player_trace(&self.pm.origin, &dest)?;
        if trace.fraction == 1.0 {
            self.pm.origin = trace.end_position;
            return Ok(());
        }

        if !was_on_ground && self.pm.water_level == 0 {
            return Ok(());
        }
        if self.pm.water_jump_time > 0.0 {
            return Ok(());
        }

        let original = self.pm.origin;
        let original_velocity = self.pm.velocity;

        // Slide along the ground
        self.fly_move()?;
        let down = self.pm.origin;
        let down_velocity = self.pm.velocity;

        // Slide from a step higher, then drop back down
        self.pm.origin = original;
        self.pm.velocity = original_velocity;

        let mut dest = self.pm.origin;
        dest.z += self.vars.step_size;
        let trace = self.player_trace(&self.pm.origin, &dest)?;
        if !trace.start_solid && !trace.all_solid {
            self.pm.origin = trace.end_position;
        }

        self.fly_move()?;

        let mut dest = self.pm.origin;
        dest.z -= self.vars.step_size;
        let trace = self.player_trace(&self.pm.origin, &dest)?;

        // Stepped off onto something too steep to stand on
        if trace.hit_plane.normal.z < GROUND_NORMAL_Z {
            self.pm.origin = down;
            self.pm.velocity = down_velocity;
            return Ok(());
        }

        if !trace.start_solid && !trace.all_solid {
            self.pm.origin = trace.end_position;
        }

        let up = self.pm.origin;
        if horizontal_dist_sq(&down, &original) > horizontal_dist_sq(&up, &original) {
            self.pm.origin = down;
            self.pm.velocity = down_velocity;
        } else {
            self.pm.velocity.z = down_velocity.z;
        }

        Ok(())
    }

    pub(crate) fn air_move(&mut self) -> Result<(), MoveError> {
        let (wish_dir, wish_speed) = self.horizontal_wish();

        self.air_accelerate(&wish_dir, wish_speed, self.vars.air_accelerate);
        self.fly_move()
    }

    /// Move for the rest of the tick, sliding along up to [`MAX_CLIP_PLANES`] surfaces.
    pub(crate) fn fly_move(&mut self) -> Result<(), MoveError> {
        let mut planes = [Vector3::zeros(); MAX_CLIP_PLANES];
        let mut num_planes = 0;

        let primal_velocity = self.pm.velocity;
        let mut original_velocity = self.pm.velocity;

        let mut all_fraction = 0.0;
        let mut time_left = self.frame_time;

        for _ in 0..MAX_BUMPS {
            if self.pm.velocity == Vector3::zeros() {
                break;
            }

            let end = self.pm.origin + self.pm.velocity * time_left;
            let trace = self.player_trace(&self.pm.origin, &end)?;

            all_fraction += trace.fraction;

            // Trapped
            if trace.all_solid {
                self.pm.velocity = Vector3::zeros();
                return Ok(());
            }

            if trace.fraction > 0.0 {
                self.pm.origin = trace.end_position;
                original_velocity = self.pm.velocity;
                num_planes = 0;
            }

            if trace.fraction == 1.0 {
                break;
            }

            time_left -= time_left * trace.fraction;

            if num_planes >= MAX_CLIP_PLANES {
                self.pm.velocity = Vector3::zeros();
                break;
            }

            planes[num_planes] = trace.hit_plane.normal;
            num_planes += 1;

            if self.pm.move_type == MoveType::Walk
                && (!self.pm.on_ground || self.pm.friction != 1.0)
            {
                // Bounce off walls, land on floors
                let mut new_velocity = original_velocity;
                for plane in planes[..num_planes].iter() {
                    if plane.z > GROUND_NORMAL_Z {
                        new_velocity = clip_velocity(&original_velocity, plane, 1.0);
                        original_velocity = new_velocity;
                    } else {
                        new_velocity = clip_velocity(
                            &original_velocity,
                            plane,
                            1.0 + self.vars.bounce * (1.0 - self.pm.friction),
                        );
                    }
                }

                self.pm.velocity = new_velocity;
                original_velocity = new_velocity;
            } else {
                // Find a plane we can slide along without going into any of the others
                let mut found = false;
                for i in 0..num_planes {
                    let clipped = clip_velocity(&original_velocity, &planes[i], 1.0);
                    self.pm.velocity = clipped;

                    if (0..num_planes).all(|j| j == i || clipped.dot(&planes[j]) >= 0.0) {
                        found = true;
                        break;
                    }
                }

                if !found {
                    if num_planes != 2 {
                        self.pm.velocity = Vector3::zeros();
                        break;
                    }

                    // Go along the crease
                    let dir = planes[0].cross(&planes[1]);
                    self.pm.velocity = dir * dir.dot(&self.pm.velocity);
                }

                // Turned back on ourselves, so stop to avoid jittering in corners
                if self.pm.velocity.dot(&primal_velocity) <= 0.0 {
                    self.pm.velocity = Vector3::zeros();
                    break;
                }
            }
        }

        if all_fraction == 0.0 {
            self.pm.velocity = Vector3::zeros();
        }

        Ok(())
    }
}
