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

use thiserror::Error;

use crate::state::MoveType;
use pinion_levels::collision::CollisionError;

/// An error encountered while moving a player.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MoveError {
    #[error("Move type {0:?} is not implemented")]
    UnimplementedMode(MoveType),

    #[error("Error tracing through the level: {0}")]
    Collision(#[from] CollisionError),
}
