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

use bitvec::prelude::*;

pub type LeafId = u32;

/// One decompressed row of the visibility matrix.
/// Bit `i` is set if leaf `i + 1` is potentially visible.
pub type VisRow = BitVec<u8, Lsb0>;

pub trait HasVisData {
    /// The iterator returned from all_visible_from
    type VisibleIterator: Iterator<Item = LeafId>;

    /// Length in bytes of a decompressed row.
    fn vis_row_len(&self) -> usize;

    /// Decompress the potentially visible set of `leaf`.
    fn pvs_for(&self, leaf: LeafId) -> VisRow;

    /// Returns an iterator of all leaves visible from the given leaf
    fn all_visible_from(&self, from: LeafId) -> Self::VisibleIterator;

    /// Returns true if `dest` is visible from `from`.
    fn leaf_visible_from(&self, from: LeafId, dest: LeafId) -> bool {
        if dest == 0 {
            return false;
        }

        self.pvs_for(from)
            .get(dest as usize - 1)
            .map(|bit| *bit)
            .unwrap_or(false)
    }
}
