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

//! Collision hulls: coarser trees used only for clipping movement

use super::{HasModels, HasPlanes};
use crate::collision::{CollisionError, HullRef, Trace};
use crate::types::{Contents, Vector3};

/// Number of hulls each model has.
pub const MAX_HULLS: usize = 4;

/// One side of a clipnode: either another clipnode in the same hull, or what the space is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullChild {
    Node(u32),
    Contents(Contents),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipNode {
    pub plane_idx: u32,

    /// Front (index 0) then back (index 1)
    pub children: [HullChild; 2],
}

/// Shape & extent of one hull.
/// The planes of a hull are pushed out by the box, so the box can be traced as a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    pub clip_mins: Vector3,
    pub clip_maxs: Vector3,
    pub first_clipnode: u32,
    pub last_clipnode: u32,
}

pub trait HasHulls: HasModels + HasPlanes {
    fn get_hull(&self, idx: usize) -> &Hull;

    /// The node arena the given hull indexes into.
    fn hull_clipnodes(&self, idx: usize) -> &[ClipNode];

    /// Borrow hull `idx` of the given model, rooted at that model's head node.
    fn hull_for_model(&self, model: u32, idx: usize) -> Result<HullRef<'_>, CollisionError> {
        if idx >= MAX_HULLS {
            return Err(CollisionError::BadHull(idx));
        }
        if model >= self.models_len() {
            return Err(CollisionError::BadModel(model));
        }

        let hull = self.get_hull(idx);
        Ok(HullRef {
            planes: self.planes(),
            clipnodes: self.hull_clipnodes(idx),
            head_node: self.get_model(model).head_nodes[idx],
            first_clipnode: hull.first_clipnode,
            last_clipnode: hull.last_clipnode,
            clip_mins: hull.clip_mins,
            clip_maxs: hull.clip_maxs,
        })
    }

    /// Borrow hull `idx` of the static world.
    fn world_hull(&self, idx: usize) -> Result<HullRef<'_>, CollisionError> {
        self.hull_for_model(0, idx)
    }

    /// Trace against a brush model that has been moved to `offset`.
    /// The segment is given in world space and so is the result.
    fn trace_model(
        &self,
        model: u32,
        idx: usize,
        offset: &Vector3,
        start: &Vector3,
        end: &Vector3,
    ) -> Result<Trace, CollisionError> {
        let hull = self.hull_for_model(model, idx)?;

        let mut trace = hull.trace(&(start - offset), &(end - offset))?;
        trace.end_position += offset;

        Ok(trace)
    }
}
