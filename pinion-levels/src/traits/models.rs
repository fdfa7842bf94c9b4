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

use std::ops::Range;

use super::hulls::HullChild;
use super::HasPlanes;
use crate::types::Vector3;

#[derive(Debug, Clone)]
pub struct Model {
    pub mins: Vector3,
    pub maxs: Vector3,

    /// Applied externally when the model is moved
    pub origin: Vector3,

    /// Head node for each hull. Hull 0 indexes the render nodes, the rest index clipnodes.
    /// A model with nothing to clip against in a hull has contents here instead.
    pub head_nodes: [HullChild; 4],
    pub vis_leaves: u32,
    pub faces_idx: Range<u32>,
}

pub trait HasModels: HasPlanes {
    type ModelsIter<'a>: Iterator<Item = &'a Model>
    where
        Self: 'a;

    fn models_iter(&self) -> Self::ModelsIter<'_>;
    fn get_model(&self, index: u32) -> &Model;
    fn models_len(&self) -> u32;
}
