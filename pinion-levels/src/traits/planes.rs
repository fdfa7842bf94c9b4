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

use crate::types::Vector3;

/// How a plane is oriented. Axial planes let distance checks skip the dot product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneAxis {
    X,
    Y,
    Z,
    AnyX,
    AnyY,
    AnyZ,
}

impl PlaneAxis {
    /// Decode the on-disk type tag. Unknown tags are treated as non-axial.
    pub fn from_raw(raw: i32) -> PlaneAxis {
        match raw {
            0 => PlaneAxis::X,
            1 => PlaneAxis::Y,
            2 => PlaneAxis::Z,
            3 => PlaneAxis::AnyX,
            4 => PlaneAxis::AnyY,
            _ => PlaneAxis::AnyZ,
        }
    }
}

/// Generic plane, referenced by nodes & clipnodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal
    pub normal: Vector3,

    /// Distance from origin to plane along normal
    pub dist: f32,

    pub axis: PlaneAxis,
}

impl Plane {
    /// Signed distance of `point` from the plane. Positive is in front.
    #[inline]
    pub fn distance(&self, point: &Vector3) -> f32 {
        match self.axis {
            PlaneAxis::X => point.x - self.dist,
            PlaneAxis::Y => point.y - self.dist,
            PlaneAxis::Z => point.z - self.dist,
            _ => self.normal.dot(point) - self.dist,
        }
    }

    /// The same plane facing the other way.
    /// No longer counts as axial, since the fast path assumes a positive normal.
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            dist: -self.dist,
            axis: match self.axis {
                PlaneAxis::X | PlaneAxis::AnyX => PlaneAxis::AnyX,
                PlaneAxis::Y | PlaneAxis::AnyY => PlaneAxis::AnyY,
                PlaneAxis::Z | PlaneAxis::AnyZ => PlaneAxis::AnyZ,
            },
        }
    }
}

pub trait HasPlanes {
    type PlanesIter<'a>: Iterator<Item = &'a Plane>
    where
        Self: 'a;

    fn planes_iter(&self) -> Self::PlanesIter<'_>;
    fn get_plane(&self, idx: u32) -> &Plane;
    fn planes(&self) -> &[Plane];
}
