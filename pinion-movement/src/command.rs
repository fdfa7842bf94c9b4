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

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use pinion_levels::types::Vector3;

bitflags! {
    /// Buttons held down during a command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Buttons: u32 {
        const ATTACK = 0x1;
        const JUMP = 0x2;
        const DUCK = 0x4;
        const USE = 0x20;
    }
}

/// Input for one tick of movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCommand {
    pub forward_move: f32,
    pub side_move: f32,
    pub up_move: f32,
    pub buttons: Buttons,

    /// Pitch, yaw & roll in degrees
    pub view_angles: Vector3,

    /// Length of the tick in seconds
    pub frame_time: f32,
}

impl Default for UserCommand {
    fn default() -> Self {
        UserCommand {
            forward_move: 0.0,
            side_move: 0.0,
            up_move: 0.0,
            buttons: Buttons::empty(),
            view_angles: Vector3::zeros(),
            frame_time: 1.0 / 60.0,
        }
    }
}
