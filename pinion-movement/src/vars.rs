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

/// Tunables shared by every player.
/// Anything missing when deserialising falls back to the classic defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveVars {
    pub gravity: f32,
    pub stop_speed: f32,
    pub max_speed: f32,
    pub accelerate: f32,
    pub air_accelerate: f32,
    pub water_accelerate: f32,
    pub friction: f32,

    /// Multiplies friction when there's a drop just ahead
    pub edge_friction: f32,
    pub water_friction: f32,
    pub entity_gravity: f32,
    pub bounce: f32,
    pub step_size: f32,
    pub max_velocity: f32,
    pub jump_height: f32,
}

impl Default for MoveVars {
    fn default() -> Self {
        MoveVars {
            gravity: 800.0,
            stop_speed: 100.0,
            max_speed: 320.0,
            accelerate: 10.0,
            air_accelerate: 10.0,
            water_accelerate: 10.0,
            friction: 4.0,
            edge_friction: 2.0,
            water_friction: 1.0,
            entity_gravity: 1.0,
            bounce: 1.0,
            step_size: 18.0,
            max_velocity: 2000.0,
            jump_height: 45.0,
        }
    }
}
