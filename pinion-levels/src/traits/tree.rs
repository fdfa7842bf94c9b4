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

//! The render / point location tree

use std::ops::Range;

use super::hulls::HullChild;
use super::{HasModels, HasPlanes, HasVisData};
use crate::types::{Contents, Vector3, Vector3i};

/// One side of a node: either another node or a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChild {
    Node(u32),
    Leaf(u32),
}

/// An interior node of the BSP tree.
#[derive(Debug, Clone)]
pub struct BspNode {
    pub plane_idx: u32,

    /// Front (index 0) then back (index 1)
    pub children: [NodeChild; 2],
    pub min: Vector3i,
    pub max: Vector3i,
    pub faces_idx: Range<u32>,
}

/// A convex cell at the bottom of the tree.
#[derive(Debug, Clone)]
pub struct BspLeaf {
    pub contents: Contents,

    /// Byte offset into the visibility lump, if this leaf has vis data.
    pub vis_offset: Option<u32>,
    pub min: Vector3i,
    pub max: Vector3i,
    pub mark_surfaces: Range<u32>,
    pub ambient: [u8; 4],
}

/// Inclusive on both ends, and doesn't care which way round min & max are stored.
pub fn bbox_contains(min: &Vector3i, max: &Vector3i, point: &Vector3) -> bool {
    (0..3).all(|i| {
        let (a, b) = (min[i] as f32, max[i] as f32);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        point[i] >= lo && point[i] <= hi
    })
}

impl BspNode {
    pub fn contains(&self, point: &Vector3) -> bool {
        bbox_contains(&self.min, &self.max, point)
    }
}

impl BspLeaf {
    pub fn contains(&self, point: &Vector3) -> bool {
        bbox_contains(&self.min, &self.max, point)
    }
}

pub trait HasBspTree: HasPlanes + HasModels + HasVisData {
    fn get_node(&self, idx: u32) -> &BspNode;
    fn get_leaf(&self, idx: u32) -> &BspLeaf;
    fn leaves_len(&self) -> u32;

    /// Face index for the given entry in the mark surfaces lump.
    fn get_mark_surface(&self, idx: u32) -> u32;

    /// Head of the world's render tree, if it has one.
    fn root_node(&self) -> Option<u32> {
        match self.get_model(0).head_nodes[0] {
            HullChild::Node(idx) => Some(idx),
            HullChild::Contents(_) => None,
        }
    }

    /// Find the leaf whose bounding box holds `point`, searching from the root.
    fn find_leaf(&self, point: &Vector3) -> Option<u32> {
        self.find_leaf_from(point, self.root_node()?)
    }

    /// Find the leaf whose bounding box holds `point`, searching below `node`.
    /// Children are tried front first, and leaf 0 never matches.
    /// A point on a shared face goes to whichever cell is found first.
    fn find_leaf_from(&self, point: &Vector3, node: u32) -> Option<u32> {
        let node = self.get_node(node);

        for child in node.children.iter() {
            match *child {
                NodeChild::Leaf(0) => {}
                NodeChild::Leaf(idx) => {
                    if self.get_leaf(idx).contains(point) {
                        return Some(idx);
                    }
                }
                NodeChild::Node(idx) => {
                    if self.get_node(idx).contains(point) {
                        if let Some(found) = self.find_leaf_from(point, idx) {
                            return Some(found);
                        }
                    }
                }
            }
        }

        None
    }

    /// Walk the planes down to the leaf `point` is in. Always finds one,
    /// but it may be leaf 0 if the point is outside the level.
    fn point_in_leaf(&self, point: &Vector3) -> u32 {
        let mut idx = match self.root_node() {
            Some(idx) => idx,
            None => return 0,
        };
        loop {
            let node = self.get_node(idx);
            let dist = self.get_plane(node.plane_idx).distance(point);

            let child = if dist >= 0.0 {
                node.children[0]
            } else {
                node.children[1]
            };

            match child {
                NodeChild::Node(n) => idx = n,
                NodeChild::Leaf(l) => return l,
            }
        }
    }

    /// Faces in every leaf potentially visible from `pos`.
    /// If `pos` isn't in any leaf, every face is returned.
    fn visible_faces(&self, pos: &Vector3) -> Vec<u32> {
        let leaf = match self.find_leaf(pos) {
            Some(leaf) => leaf,
            None => return (0..self.faces_len()).collect(),
        };

        let mut visible = Vec::new();
        for other in self.all_visible_from(leaf) {
            if other >= self.leaves_len() {
                continue;
            }

            for mark in self.get_leaf(other).mark_surfaces.clone() {
                visible.push(self.get_mark_surface(mark));
            }
        }

        visible.sort_unstable();
        visible.dedup();
        visible
    }

    /// Number of faces in the level.
    fn faces_len(&self) -> u32;
}
