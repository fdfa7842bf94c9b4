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

//! A complete BSP file

// Trait implementations are stored in their own files.

use log::{debug, info};

use super::header::*;
use super::*;
use crate::helpers::records;
use crate::traits::entities::Entity;
use crate::traits::hulls::{ClipNode, Hull, HullChild, MAX_HULLS};
use crate::traits::models::Model;
use crate::traits::planes::Plane;
use crate::traits::tree::{BspLeaf, BspNode};
use crate::types::{ParseError, Result};

/// A parsed Half-Life (version 30) BSP file.
/// Immutable once parsed, so it can be shared between threads.
#[derive(Debug)]
pub struct HlBspFile {
    pub(crate) entities: Box<[Entity]>,
    pub(crate) planes: Box<[Plane]>,
    pub(crate) nodes: Box<[BspNode]>,
    pub(crate) leaves: Box<[BspLeaf]>,
    pub(crate) mark_surfaces: Box<[u32]>,
    pub(crate) n_faces: u32,
    pub(crate) visdata: Box<[u8]>,
    pub(crate) clipnodes: Box<[ClipNode]>,
    pub(crate) hull0: Box<[ClipNode]>,
    pub(crate) hulls: [Hull; MAX_HULLS],
    pub(crate) models: Box<[Model]>,
}

impl HlBspFile {
    /// Parse `data` as a Half-Life bsp file.
    pub fn parse_file(data: &[u8]) -> Result<HlBspFile> {
        let header = Header::from(data)?;

        let planes = planes::from_data(header.get_lump(data, LUMP_PLANES)?)?;
        let n_faces = records(header.get_lump(data, LUMP_FACES)?, FACE_SIZE, LUMP_FACES)?.len();

        let mark_surfaces =
            tree::marks_from_data(header.get_lump(data, LUMP_MARKSURFACES)?, n_faces)?;

        let visdata: Box<[u8]> = header.get_lump(data, LUMP_VISIBILITY)?.into();

        let leaves = tree::leaves_from_data(
            header.get_lump(data, LUMP_LEAVES)?,
            mark_surfaces.len(),
            visdata.len(),
        )?;
        if leaves.is_empty() {
            return Err(ParseError::Invalid);
        }

        let nodes = tree::nodes_from_data(
            header.get_lump(data, LUMP_NODES)?,
            planes.len(),
            leaves.len(),
            n_faces,
        )?;

        let clipnodes = hulls::from_data(header.get_lump(data, LUMP_CLIPNODES)?, planes.len())?;

        let models = models::from_data(
            header.get_lump(data, LUMP_MODELS)?,
            nodes.len(),
            clipnodes.len(),
            n_faces,
        )?;

        let entities = entities::from_data(header.get_lump(data, LUMP_ENTITIES)?)?;

        let hull0 = hulls::hull0_from_nodes(&nodes, &leaves);
        let hulls = hulls::hulls(hull0.len(), clipnodes.len());

        for (i, model) in models.iter().enumerate() {
            for (hull, head) in model.head_nodes.iter().enumerate() {
                let root = match head {
                    HullChild::Node(n) => *n,
                    HullChild::Contents(_) => continue,
                };

                let depth = if hull == 0 {
                    tree::tree_depth(root, nodes.len(), |n| tree::node_children(&nodes, n))?
                } else {
                    tree::tree_depth(root, clipnodes.len(), |n| {
                        hulls::clipnode_children(&clipnodes, n)
                    })?
                };
                debug!("Model {} hull {} has depth {}", i, hull, depth);
            }
        }

        info!(
            "Loaded bsp: {} planes, {} nodes, {} leaves, {} clipnodes, {} models, {} entities, {} bytes of vis",
            planes.len(),
            nodes.len(),
            leaves.len(),
            clipnodes.len(),
            models.len(),
            entities.len(),
            visdata.len()
        );

        Ok(HlBspFile {
            entities,
            planes,
            nodes,
            leaves,
            mark_surfaces,
            n_faces: n_faces as u32,
            visdata,
            clipnodes,
            hull0,
            hulls,
            models,
        })
    }
}
