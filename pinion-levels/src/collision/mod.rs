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

//! Point contents & swept traces against a collision hull

mod trace;

pub use self::trace::{Trace, DIST_EPSILON};

use thiserror::Error;

use crate::traits::hulls::{ClipNode, HullChild};
use crate::traits::planes::Plane;
use crate::types::{Contents, Vector3};

/// An error encountered while walking a hull.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollisionError {
    #[error("Clipnode {node} is outside of the hull ({first}..={last})")]
    CorruptTree { node: u32, first: u32, last: u32 },

    #[error("Plane {0} referenced by a clipnode doesn't exist")]
    BadPlane(u32),

    #[error("No such hull {0}")]
    BadHull(usize),

    #[error("No such model {0}")]
    BadModel(u32),
}

/// A borrowed view of one hull of one model.
/// Hulls share the plane arena and differ in which clipnodes they use.
#[derive(Debug, Clone, Copy)]
pub struct HullRef<'a> {
    pub planes: &'a [Plane],
    pub clipnodes: &'a [ClipNode],
    pub head_node: HullChild,
    pub first_clipnode: u32,
    pub last_clipnode: u32,
    pub clip_mins: Vector3,
    pub clip_maxs: Vector3,
}

impl<'a> HullRef<'a> {
    /// Look up a clipnode & its plane, refusing anything outside this hull.
    pub(crate) fn node(&self, idx: u32) -> Result<(&'a ClipNode, &'a Plane), CollisionError> {
        if idx < self.first_clipnode || idx > self.last_clipnode {
            return Err(self.corrupt(idx));
        }

        let node = self
            .clipnodes
            .get(idx as usize)
            .ok_or_else(|| self.corrupt(idx))?;
        let plane = self
            .planes
            .get(node.plane_idx as usize)
            .ok_or(CollisionError::BadPlane(node.plane_idx))?;

        Ok((node, plane))
    }

    fn corrupt(&self, node: u32) -> CollisionError {
        CollisionError::CorruptTree {
            node,
            first: self.first_clipnode,
            last: self.last_clipnode,
        }
    }

    /// What fills the space at `point`.
    pub fn point_contents(&self, point: &Vector3) -> Result<Contents, CollisionError> {
        self.child_contents(self.head_node, point)
    }

    /// What fills the space at `point`, starting the walk from `child`.
    pub fn child_contents(
        &self,
        child: HullChild,
        point: &Vector3,
    ) -> Result<Contents, CollisionError> {
        let mut current = child;

        loop {
            match current {
                HullChild::Contents(c) => return Ok(c),
                HullChild::Node(idx) => {
                    let (node, plane) = self.node(idx)?;

                    current = if plane.distance(point) >= 0.0 {
                        node.children[0]
                    } else {
                        node.children[1]
                    };
                }
            }
        }
    }
}
