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

//! Parses the clipnodes lump and builds the four collision hulls

use super::header::LUMP_CLIPNODES;
use super::HlBspFile;
use crate::helpers::{check_index, records, slice_to_i16, slice_to_i32};
use crate::traits::hulls::*;
use crate::traits::tree::{BspLeaf, BspNode, NodeChild};
use crate::types::{Contents, Result, Vector3};

const CLIPNODE_SIZE: usize = 4 + (2 * 2);

/// Box each hull stands for, as (mins, maxs).
/// 0 is a point, 1 a standing player, 2 a large monster, 3 a crouching player.
pub const HULL_SIZES: [([f32; 3], [f32; 3]); MAX_HULLS] = [
    ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
    ([-16.0, -16.0, -36.0], [16.0, 16.0, 36.0]),
    ([-32.0, -32.0, -32.0], [32.0, 32.0, 32.0]),
    ([-16.0, -16.0, -18.0], [16.0, 16.0, 18.0]),
];

/// Decode a child or head node: >= 0 is a clipnode, anything else is contents.
pub fn hull_child(raw: i32, n_clipnodes: usize) -> Result<HullChild> {
    if raw >= 0 {
        Ok(HullChild::Node(check_index(
            "Clipnode",
            raw as i64,
            n_clipnodes,
        )?))
    } else {
        Ok(HullChild::Contents(Contents::from_raw(raw)?))
    }
}

/// Parse the clipnodes lump, shared by hulls 1 to 3.
/// # Format
/// int plane           Plane index.
/// short[2] children   >= 0 is a clipnode index, otherwise contents.
pub fn from_data(data: &[u8], n_planes: usize) -> Result<Box<[ClipNode]>> {
    let n_clipnodes = data.len() / CLIPNODE_SIZE;

    let nodes = records(data, CLIPNODE_SIZE, LUMP_CLIPNODES)?
        .map(|raw| {
            Ok(ClipNode {
                plane_idx: check_index("Plane", slice_to_i32(&raw[0..4]) as i64, n_planes)?,
                children: [
                    hull_child(slice_to_i16(&raw[4..6]) as i32, n_clipnodes)?,
                    hull_child(slice_to_i16(&raw[6..8]) as i32, n_clipnodes)?,
                ],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(nodes.into_boxed_slice())
}

/// Build hull 0 from the render tree, with leaf children replaced by the leaf's contents.
pub fn hull0_from_nodes(nodes: &[BspNode], leaves: &[BspLeaf]) -> Box<[ClipNode]> {
    nodes
        .iter()
        .map(|node| {
            let child = |c: NodeChild| match c {
                NodeChild::Node(n) => HullChild::Node(n),
                NodeChild::Leaf(l) => HullChild::Contents(leaves[l as usize].contents),
            };

            ClipNode {
                plane_idx: node.plane_idx,
                children: [child(node.children[0]), child(node.children[1])],
            }
        })
        .collect::<Vec<_>>()
        .into_boxed_slice()
}

/// Hull shapes & clipnode ranges. Hull 0 covers the synthesised nodes, the rest all of the clipnodes.
pub fn hulls(n_hull0: usize, n_clipnodes: usize) -> [Hull; MAX_HULLS] {
    let mut hulls = [Hull {
        clip_mins: Vector3::zeros(),
        clip_maxs: Vector3::zeros(),
        first_clipnode: 0,
        last_clipnode: 0,
    }; MAX_HULLS];

    for (i, hull) in hulls.iter_mut().enumerate() {
        let (mins, maxs) = HULL_SIZES[i];
        let count = if i == 0 { n_hull0 } else { n_clipnodes };

        hull.clip_mins = Vector3::from(mins);
        hull.clip_maxs = Vector3::from(maxs);
        hull.last_clipnode = count.saturating_sub(1) as u32;
    }

    hulls
}

/// Child clipnodes of a clipnode, ignoring contents.
pub fn clipnode_children(nodes: &[ClipNode], idx: u32) -> [Option<u32>; 2] {
    let child = |c: HullChild| match c {
        HullChild::Node(n) => Some(n),
        HullChild::Contents(_) => None,
    };
    let node = &nodes[idx as usize];

    [child(node.children[0]), child(node.children[1])]
}

impl HasHulls for HlBspFile {
    fn get_hull(&self, idx: usize) -> &Hull {
        &self.hulls[idx]
    }

    fn hull_clipnodes(&self, idx: usize) -> &[ClipNode] {
        if idx == 0 {
            &self.hull0
        } else {
            &self.clipnodes
        }
    }
}
