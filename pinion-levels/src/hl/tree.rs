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

//! Parses the nodes, leaves & mark surfaces into a usable tree

use std::convert::TryInto;

use super::header::{LUMP_LEAVES, LUMP_MARKSURFACES, LUMP_NODES};
use super::HlBspFile;
use crate::helpers::{
    check_index, records, slice_to_i16, slice_to_i32, slice_to_u16, slice_to_u32,
    slice_to_vec3i16,
};
use crate::traits::tree::*;
use crate::types::{Contents, ParseError, Result};

const NODE_SIZE: usize = 4 + (2 * 2) + (2 * 3 * 2) + (2 * 2);
const LEAF_SIZE: usize = 4 + 4 + (2 * 3 * 2) + (2 * 2) + 4;
const MARK_SURFACE_SIZE: usize = 2;

/// Trees deeper than this are rejected at load time, so walking them can't overflow the stack.
pub const MAX_TREE_DEPTH: usize = 512;

/// Parse the nodes lump.
/// # Format
/// uint plane          Plane index.
/// short[2] children   >= 0 is a node index, otherwise a leaf index complemented.
/// short[3] mins, maxs Bounding box.
/// ushort first_face, n_faces
pub fn nodes_from_data(
    data: &[u8],
    n_planes: usize,
    n_leaves: usize,
    n_faces: usize,
) -> Result<Box<[BspNode]>> {
    let n_nodes = data.len() / NODE_SIZE;

    let mut nodes = Vec::with_capacity(n_nodes);
    for raw in records(data, NODE_SIZE, LUMP_NODES)? {
        let plane_idx = check_index("Plane", slice_to_u32(&raw[0..4]) as i64, n_planes)?;

        let mut children = [NodeChild::Leaf(0); 2];
        for (i, child) in children.iter_mut().enumerate() {
            let raw_child = slice_to_i16(&raw[4 + i * 2..6 + i * 2]) as i64;
            *child = if raw_child >= 0 {
                NodeChild::Node(check_index("Node", raw_child, n_nodes)?)
            } else {
                NodeChild::Leaf(check_index("Leaf", -1 - raw_child, n_leaves)?)
            };
        }

        let faces_idx = {
            let start = slice_to_u16(&raw[20..22]) as u32;
            let n = slice_to_u16(&raw[22..24]) as u32;

            if (start + n) as usize > n_faces {
                return Err(ParseError::BadReference {
                    kind: "Face",
                    index: (start + n) as i64,
                    max: n_faces,
                });
            }

            start..start + n
        };

        nodes.push(BspNode {
            plane_idx,
            children,
            min: slice_to_vec3i16(&raw[8..14]),
            max: slice_to_vec3i16(&raw[14..20]),
            faces_idx,
        });
    }

    Ok(nodes.into_boxed_slice())
}

/// Parse the leaves lump.
/// # Format
/// int contents            One of the contents values.
/// int vis_offset          Offset into the visibility lump, or -1.
/// short[3] mins, maxs     Bounding box.
/// ushort first_mark, n_marks
/// ubyte[4] ambient        Ambient sound levels.
pub fn leaves_from_data(data: &[u8], n_marks: usize, vis_len: usize) -> Result<Box<[BspLeaf]>> {
    let mut leaves = Vec::with_capacity(data.len() / LEAF_SIZE);
    for raw in records(data, LEAF_SIZE, LUMP_LEAVES)? {
        let contents = Contents::from_raw(slice_to_i32(&raw[0..4]))?;

        let vis_offset = match slice_to_i32(&raw[4..8]) {
            offset if offset < 0 || vis_len == 0 => None,
            offset => Some(check_index("Visibility offset", offset as i64, vis_len)?),
        };

        let mark_surfaces = {
            let start = slice_to_u16(&raw[20..22]) as u32;
            let n = slice_to_u16(&raw[22..24]) as u32;

            if (start + n) as usize > n_marks {
                return Err(ParseError::BadReference {
                    kind: "Mark surface",
                    index: (start + n) as i64,
                    max: n_marks,
                });
            }

            start..start + n
        };

        leaves.push(BspLeaf {
            contents,
            vis_offset,
            min: slice_to_vec3i16(&raw[8..14]),
            max: slice_to_vec3i16(&raw[14..20]),
            mark_surfaces,
            ambient: raw[24..28].try_into().unwrap(),
        });
    }

    Ok(leaves.into_boxed_slice())
}

/// Parse the mark surfaces lump, a list of face indices leaves point into.
pub fn marks_from_data(data: &[u8], n_faces: usize) -> Result<Box<[u32]>> {
    let marks = records(data, MARK_SURFACE_SIZE, LUMP_MARKSURFACES)?
        .map(|raw| check_index("Face", slice_to_u16(raw) as i64, n_faces))
        .collect::<Result<Vec<_>>>()?;

    Ok(marks.into_boxed_slice())
}

#[derive(Clone, Copy)]
enum Visit {
    New,
    Open,
    Done(usize),
}

/// Measure the depth of the tree below `root`, without recursing.
/// `children` gives the child nodes of a node, `count` is how many nodes exist.
/// Errors if the tree is too deep or loops back on itself.
pub fn tree_depth<F>(root: u32, count: usize, children: F) -> Result<usize>
where
    F: Fn(u32) -> [Option<u32>; 2],
{
    let too_deep = ParseError::TreeTooDeep {
        root,
        max: MAX_TREE_DEPTH,
    };

    let mut state = vec![Visit::New; count];
    let mut stack = vec![(root, false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            let depth = 1 + children(node)
                .iter()
                .flatten()
                .map(|c| match state[*c as usize] {
                    Visit::Done(d) => d,
                    _ => 0,
                })
                .max()
                .unwrap_or(0);

            if depth > MAX_TREE_DEPTH {
                return Err(too_deep);
            }

            state[node as usize] = Visit::Done(depth);
            continue;
        }

        match state[node as usize] {
            Visit::Done(_) => continue,
            Visit::Open => return Err(too_deep),
            Visit::New => {}
        }

        state[node as usize] = Visit::Open;
        stack.push((node, true));

        for child in children(node).iter().flatten() {
            match state[*child as usize] {
                // Still on the path down to here, so this is a loop
                Visit::Open => return Err(too_deep),
                Visit::Done(_) => {}
                Visit::New => stack.push((*child, false)),
            }
        }
    }

    match state[root as usize] {
        Visit::Done(d) => Ok(d),
        _ => Err(too_deep),
    }
}

/// Child nodes of a render node, ignoring leaves.
pub fn node_children(nodes: &[BspNode], idx: u32) -> [Option<u32>; 2] {
    let child = |c: NodeChild| match c {
        NodeChild::Node(n) => Some(n),
        NodeChild::Leaf(_) => None,
    };
    let node = &nodes[idx as usize];

    [child(node.children[0]), child(node.children[1])]
}

impl HasBspTree for HlBspFile {
    fn get_node(&self, idx: u32) -> &BspNode {
        &self.nodes[idx as usize]
    }

    fn get_leaf(&self, idx: u32) -> &BspLeaf {
        &self.leaves[idx as usize]
    }

    fn leaves_len(&self) -> u32 {
        self.leaves.len() as u32
    }

    fn get_mark_surface(&self, idx: u32) -> u32 {
        self.mark_surfaces[idx as usize]
    }

    fn faces_len(&self) -> u32 {
        self.n_faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_bytes(plane: u32, front: i16, back: i16) -> Vec<u8> {
        let mut buf = plane.to_le_bytes().to_vec();
        buf.extend_from_slice(&front.to_le_bytes());
        buf.extend_from_slice(&back.to_le_bytes());
        for v in [-64i16, -64, -64, 64, 64, 64].iter() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());

        buf
    }

    #[test]
    fn node_children_are_tagged() {
        let mut buf = node_bytes(0, 1, -1);
        buf.extend(node_bytes(0, -2, -3));

        let nodes = nodes_from_data(&buf, 1, 3, 0).unwrap();

        assert_eq!(nodes[0].children, [NodeChild::Node(1), NodeChild::Leaf(0)]);
        assert_eq!(nodes[1].children, [NodeChild::Leaf(1), NodeChild::Leaf(2)]);
        assert_eq!(nodes[0].min.x, -64);
        assert_eq!(nodes[0].max.z, 64);
    }

    #[test]
    fn node_child_out_of_range() {
        let buf = node_bytes(0, 5, -1);

        assert!(matches!(
            nodes_from_data(&buf, 1, 1, 0),
            Err(ParseError::BadReference { kind: "Node", .. })
        ));
    }

    #[test]
    fn leaf_with_invalid_contents() {
        let mut buf = 3i32.to_le_bytes().to_vec();
        buf.extend_from_slice(&(-1i32).to_le_bytes());
        buf.extend_from_slice(&[0; 20]);

        assert!(matches!(
            leaves_from_data(&buf, 0, 0),
            Err(ParseError::InvalidContents(3))
        ));
    }

    #[test]
    fn depth_of_chain() {
        // 0 -> 1 -> 2
        let depth = tree_depth(0, 3, |n| [if n < 2 { Some(n + 1) } else { None }, None]).unwrap();
        assert_eq!(depth, 3);
    }

    #[test]
    fn depth_rejects_cycles() {
        // 0 -> 1 -> 0
        let res = tree_depth(0, 2, |n| [Some(1 - n), None]);
        assert!(matches!(res, Err(ParseError::TreeTooDeep { .. })));
    }

    #[test]
    fn depth_rejects_deep_trees() {
        let count = MAX_TREE_DEPTH + 10;
        let res = tree_depth(0, count, |n| {
            [
                if (n as usize) < count - 1 {
                    Some(n + 1)
                } else {
                    None
                },
                None,
            ]
        });
        assert!(matches!(res, Err(ParseError::TreeTooDeep { .. })));
    }
}
