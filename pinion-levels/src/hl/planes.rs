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

const PLANE_SIZE: usize = (4 * 3) + 4 + 4;

use super::header::LUMP_PLANES;
use super::HlBspFile;
use crate::helpers::{records, slice_to_f32, slice_to_i32, slice_to_vec3};
use crate::traits::planes::*;
use crate::types::Result;

/// Parse a lump of planes.
/// # Format
/// float[3] normal     Plane normal.
/// float dist          Distance from origin to plane along normal.
/// int type            0-2 if the plane is axial, 3-5 otherwise.
pub fn from_data(data: &[u8]) -> Result<Box<[Plane]>> {
    let planes = records(data, PLANE_SIZE, LUMP_PLANES)?
        .map(|plane| Plane {
            normal: slice_to_vec3(&plane[0..12]),
            dist: slice_to_f32(&plane[12..16]),
            axis: PlaneAxis::from_raw(slice_to_i32(&plane[16..20])),
        })
        .collect::<Vec<_>>();

    Ok(planes.into_boxed_slice())
}

impl HasPlanes for HlBspFile {
    type PlanesIter<'a> = std::slice::Iter<'a, Plane>;

    fn planes_iter(&self) -> Self::PlanesIter<'_> {
        self.planes.iter()
    }

    fn get_plane(&self, idx: u32) -> &Plane {
        &self.planes[idx as usize]
    }

    fn planes(&self) -> &[Plane] {
        &self.planes
    }
}
