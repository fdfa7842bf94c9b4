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

//! Parses BSP version 30 levels and answers spatial queries against them:
//! point location, potentially visible sets, and swept collision traces.

extern crate nalgebra as na;

pub mod collision;
pub mod helpers;
pub mod hl;
pub mod traits;
pub mod types;

pub mod prelude {
    pub use crate::collision::{HullRef, Trace};
    pub use crate::hl::HlBspFile;
    pub use crate::traits::*;
    pub use crate::types::{Contents, Vector3};
}
