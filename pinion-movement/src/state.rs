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

use serde::{Deserialize, Serialize};

use crate::command::Buttons;
use pinion_levels::types::{Contents, Vector3};

/// How the player moves this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveType {
    Walk,
    Fly,
    NoClip,
}

/// Everything about a player that carries over between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMove {
    pub origin: Vector3,
    pub velocity: Vector3,

    /// Pitch, yaw & roll in degrees
    pub angles: Vector3,
    pub view_offset: Vector3,
    pub on_ground: bool,

    /// Scales ground friction & acceleration
    pub friction: f32,

    /// 0 is dry, 1 feet, 2 waist, 3 eyes under
    pub water_level: u8,
    pub water_type: Contents,
    pub dead: bool,

    /// Buttons latched from previous ticks, to make jumping edge triggered
    pub old_buttons: Buttons,

    /// Seconds left of a jump out of water
    pub water_jump_time: f32,
    pub move_type: MoveType,
}

impl Default for PlayerMove {
    fn default() -> Self {
        PlayerMove {
            origin: Vector3::zeros(),
            velocity: Vector3::zeros(),
            angles: Vector3::zeros(),
            view_offset: Vector3::new(0.0, 0.0, 28.0),
            on_ground: false,
            friction: 1.0,
            water_level: 0,
            water_type: Contents::Empty,
            dead: false,
            old_buttons: Buttons::empty(),
            water_jump_time: 0.0,
            move_type: MoveType::Walk,
        }
    }
}
