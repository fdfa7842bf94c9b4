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

//! Traits for parts of files that can exist

pub mod entities;
pub mod hulls;
pub mod models;
pub mod planes;
pub mod tree;
pub mod visdata;

pub use self::entities::HasEntities;
pub use self::hulls::HasHulls;
pub use self::models::HasModels;
pub use self::planes::HasPlanes;
pub use self::tree::HasBspTree;
pub use self::visdata::HasVisData;
