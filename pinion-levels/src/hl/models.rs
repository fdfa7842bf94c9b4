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

use super::header::LUMP_MODELS;
use super::hulls::hull_child;
use super::HlBspFile;
use crate::helpers::{records, slice_to_i32, slice_to_vec3};
use crate::traits::hulls::{HullChild, MAX_HULLS};
use crate::traits::models::*;
use crate::types::{ParseError, Result};

const MODEL_SIZE: usize = (4 * 3 * 3) + (4 * MAX_HULLS) + (4 * 3);

/// Parse the models lump. Model 0 is the world.
/// # Format
/// float[3] mins, maxs, origin
/// int[4] head_nodes   Hull 0 indexes nodes, 1-3 index clipnodes. Negative is contents.
/// int vis_leaves
/// int first_face, n_faces
pub fn from_data(
    data: &[u8],
    n_nodes: usize,
    n_clipnodes: usize,
    n_faces: usize,
) -> Result<Box<[Model]>> {
    let mut models = Vec::with_capacity(data.len() / MODEL_SIZE);
    for raw in records(data, MODEL_SIZE, LUMP_MODELS)? {
        let mins = slice_to_vec3(&raw[0..12]);
        let maxs = slice_to_vec3(&raw[12..24]);
        let origin = slice_to_vec3(&raw[24..36]);

        let mut head_nodes = [HullChild::Node(0); MAX_HULLS];
        for (i, head) in head_nodes.iter_mut().enumerate() {
            let raw_head = slice_to_i32(&raw[36 + i * 4..40 + i * 4]);
            let max = if i == 0 { n_nodes } else { n_clipnodes };

            *head = hull_child(raw_head, max)?;
        }

        let vis_leaves = slice_to_i32(&raw[52..56]).max(0) as u32;

        let faces_idx = {
            let start = slice_to_i32(&raw[56..60]) as i64;
            let n = slice_to_i32(&raw[60..64]) as i64;

            if start < 0 || n < 0 || (start + n) as usize > n_faces {
                return Err(ParseError::BadReference {
                    kind: "Face",
                    index: start + n,
                    max: n_faces,
                });
            }

            start as u32..(start + n) as u32
        };

        models.push(Model {
            mins,
            maxs,
            origin,
            head_nodes,
            vis_leaves,
            faces_idx,
        });
    }

    if models.is_empty() {
        return Err(ParseError::Invalid);
    }

    Ok(models.into_boxed_slice())
}

impl HasModels for HlBspFile {
    type ModelsIter<'a> = std::slice::Iter<'a, Model>;

    fn models_iter(&self) -> Self::ModelsIter<'_> {
        self.models.iter()
    }

    fn get_model(&self, index: u32) -> &Model {
        &self.models[index as usize]
    }

    fn models_len(&self) -> u32 {
        self.models.len() as u32
    }
}
