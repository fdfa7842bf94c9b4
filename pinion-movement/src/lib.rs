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

//! Per-tick player movement against a level's collision hulls.
//! Walking with gravity, friction, stair stepping & swimming, plus noclip.

mod command;
mod error;
mod pmove;
mod state;
mod vars;
mod walk;
mod water;

pub use crate::command::{Buttons, UserCommand};
pub use crate::error::MoveError;
pub use crate::pmove::{angle_vectors, player_move, MoveHulls};
pub use crate::state::{MoveType, PlayerMove};
pub use crate::vars::MoveVars;
pub use crate::walk::clip_velocity;
