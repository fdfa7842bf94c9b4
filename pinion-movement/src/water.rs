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

//! Swimming

use crate::error::MoveError;
use crate::pmove::PmoveContext;
use pinion_levels::types::{Contents, Vector3};

/// How fast you sink when not pressing anything
const WATER_SINK_SPEED: f32 = 60.0;

/// Fraction of max speed you can swim at
const SWIM_SPEED_FACTOR: f32 = 0.8;

impl<'a> PmoveContext<'a> {
    /// Sample the liquid at the feet, the middle of the box, and the eyes.
    pub(crate) fn check_water(&mut self) -> Result<(), MoveError> {
        let mins = self.hulls.player.clip_mins;
        let maxs = self.hulls.player.clip_maxs;
        let origin = self.pm.origin;

        let mut point = Vector3::new(
            origin.x + (mins.x + maxs.x) * 0.5,
            origin.y + (mins.y + maxs.y) * 0.5,
            origin.z + mins.z + 1.0,
        );

        self.pm.water_level = 0;
        self.pm.water_type = Contents::Empty;

        let contents = self.point_contents(&point)?;
        if !contents.is_liquid() {
            return Ok(());
        }

        self.pm.water_type = contents;
        self.pm.water_level = 1;

        point.z = origin.z + (mins.z + maxs.z) * 0.5;
        if self.point_contents(&point)?.is_liquid() {
            self.pm.water_level = 2;

            point.z = origin.z + self.pm.view_offset.z;
            if self.point_contents(&point)?.is_liquid() {
                self.pm.water_level = 3;
            }
        }

        Ok(())
    }

    pub(crate) fn water_move(&mut self) -> Result<(), MoveError> {
        let mut wish_vel = self.forward * self.forward_move + self.right * self.side_move;

        if self.forward_move == 0.0 && self.side_move == 0.0 && self.up_move == 0.0 {
            wish_vel.z -= WATER_SINK_SPEED;
        } else {
            wish_vel.z += self.up_move;
        }

        let wish_dir = wish_vel.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
        let wish_speed = wish_vel.norm().min(self.vars.max_speed) * SWIM_SPEED_FACTOR;

        // Water friction
        let speed = self.pm.velocity.norm();
        let new_speed = if speed > 0.0 {
            let new_speed = (speed
                - self.frame_time * speed * self.vars.water_friction * self.pm.friction)
                .max(0.0);
            self.pm.velocity *= new_speed / speed;
            new_speed
        } else {
            0.0
        };

        if wish_speed < 0.1 {
            return Ok(());
        }

        let add_speed = wish_speed - new_speed;
        if add_speed > 0.0 {
            let accel_speed = (self.vars.water_accelerate
                * wish_speed
                * self.frame_time
                * self.pm.friction)
                .min(add_speed);
            self.pm.velocity += wish_dir * accel_speed;
        }

        // Assume it's a slope or stairs, so come down from a step above
        let dest = self.pm.origin + self.pm.velocity * self.frame_time;
        let mut start = dest;
        start.z += self.vars.step_size + 1.0;

        let trace = self.player_trace(&start, &dest)?;
        if !trace.start_solid && !trace.all_solid {
            self.pm.origin = trace.end_position;
            return Ok(());
        }

        self.fly_move()
    }
}
