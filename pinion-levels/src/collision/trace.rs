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

//! Swept point traces through a hull

use log::debug;

use super::{CollisionError, HullRef};
use crate::traits::hulls::HullChild;
use crate::traits::planes::{Plane, PlaneAxis};
use crate::types::{Contents, Vector3};

/// Crossing points are pulled this far back towards the near side of a plane,
/// so the end of a blocked trace is never inside the solid.
pub const DIST_EPSILON: f32 = 0.03125;

/// How far the crossing fraction is backed off each time the end point still classifies as solid.
const BACKOFF_STEP: f32 = 0.1;

/// The result of sweeping a point through a hull.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// The whole segment was inside solid
    pub all_solid: bool,

    /// The segment started inside solid
    pub start_solid: bool,
    pub in_open: bool,
    pub in_water: bool,

    /// How far along the segment we got before hitting something. 1.0 means nothing was hit.
    pub fraction: f32,
    pub end_position: Vector3,

    /// The surface hit, facing the way we came from. Zeroed if nothing was hit.
    pub hit_plane: Plane,
}

impl Trace {
    fn new(end: &Vector3) -> Trace {
        Trace {
            all_solid: true,
            start_solid: false,
            in_open: false,
            in_water: false,
            fraction: 1.0,
            end_position: *end,
            hit_plane: Plane {
                normal: Vector3::zeros(),
                dist: 0.0,
                axis: PlaneAxis::AnyZ,
            },
        }
    }
}

/// State threaded through one trace.
struct TraceContext<'h, 'a> {
    hull: &'h HullRef<'a>,
    trace: Trace,
}

impl<'a> HullRef<'a> {
    /// Sweep a point from `start` to `end`, stopping at the first solid.
    pub fn trace(&self, start: &Vector3, end: &Vector3) -> Result<Trace, CollisionError> {
        let mut ctx = TraceContext {
            hull: self,
            trace: Trace::new(end),
        };

        ctx.recursive_hull_check(self.head_node, 0.0, 1.0, *start, *end)?;

        let mut trace = ctx.trace;
        if trace.all_solid {
            trace.start_solid = true;
        }

        Ok(trace)
    }
}

impl<'h, 'a> TraceContext<'h, 'a> {
    /// Returns false once the segment has been blocked.
    /// `p1f` & `p2f` are the fractions of the original segment `p1` & `p2` are at.
    fn recursive_hull_check(
        &mut self,
        child: HullChild,
        p1f: f32,
        p2f: f32,
        p1: Vector3,
        p2: Vector3,
    ) -> Result<bool, CollisionError> {
        let idx = match child {
            HullChild::Contents(contents) => {
                if contents != Contents::Solid {
                    self.trace.all_solid = false;
                    if contents == Contents::Empty {
                        self.trace.in_open = true;
                    } else {
                        self.trace.in_water = true;
                    }
                } else {
                    self.trace.start_solid = true;
                }

                return Ok(true);
            }
            HullChild::Node(idx) => idx,
        };

        let (node, plane) = self.hull.node(idx)?;
        let t1 = plane.distance(&p1);
        let t2 = plane.distance(&p2);

        if t1 >= 0.0 && t2 >= 0.0 {
            return self.recursive_hull_check(node.children[0], p1f, p2f, p1, p2);
        }
        if t1 < 0.0 && t2 < 0.0 {
            return self.recursive_hull_check(node.children[1], p1f, p2f, p1, p2);
        }

        // Crosses the plane. Put the crossing point on the near side.
        let mut frac = if t1 < 0.0 {
            (t1 + DIST_EPSILON) / (t1 - t2)
        } else {
            (t1 - DIST_EPSILON) / (t1 - t2)
        };
        frac = frac.max(0.0).min(1.0);

        let mut midf = p1f + (p2f - p1f) * frac;
        let mut mid = p1 + (p2 - p1) * frac;

        let side = (t1 < 0.0) as usize;

        if !self.recursive_hull_check(node.children[side], p1f, midf, p1, mid)? {
            return Ok(false);
        }

        if self.hull.child_contents(node.children[side ^ 1], &mid)? != Contents::Solid {
            return self.recursive_hull_check(node.children[side ^ 1], midf, p2f, mid, p2);
        }

        if self.trace.all_solid {
            // Never got out of the solid area
            return Ok(false);
        }

        // The other side of the node is solid, so this is where we hit.
        self.trace.hit_plane = if side == 0 { *plane } else { plane.flipped() };

        while self.hull.point_contents(&mid)? == Contents::Solid {
            frac -= BACKOFF_STEP;
            if frac < 0.0 {
                debug!("Trace backed up past the start of the segment at {:?}", mid);
                self.trace.fraction = midf;
                self.trace.end_position = mid;
                return Ok(false);
            }

            midf = p1f + (p2f - p1f) * frac;
            mid = p1 + (p2 - p1) * frac;
        }

        self.trace.fraction = midf;
        self.trace.end_position = mid;

        Ok(false)
    }
}
