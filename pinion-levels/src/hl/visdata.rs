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

//! Decompresses the potentially visible sets stored in the visibility lump.

use std::vec::IntoIter;

use super::file::HlBspFile;
use crate::traits::visdata::*;

/// Run-length decode one row of the visibility matrix.
///
/// A zero byte is followed by the number of zero bytes it stands for. Every other byte is literal.
/// The output is always exactly `row_len` bytes, cutting off long runs and zero-filling if
/// `compressed` runs out first.
pub fn decompress(compressed: &[u8], row_len: usize) -> VisRow {
    let mut row = Vec::with_capacity(row_len);
    let mut bytes = compressed.iter();

    while row.len() < row_len {
        match bytes.next() {
            None => break,
            Some(0) => {
                let run = bytes.next().copied().unwrap_or(0) as usize;
                let run = run.min(row_len - row.len());
                row.resize(row.len() + run, 0);
            }
            Some(b) => row.push(*b),
        }
    }
    row.resize(row_len, 0);

    VisRow::from_vec(row)
}

impl HasVisData for HlBspFile {
    type VisibleIterator = IntoIter<LeafId>;

    fn vis_row_len(&self) -> usize {
        (self.leaves.len().saturating_sub(1) + 7) / 8
    }

    fn pvs_for(&self, leaf: LeafId) -> VisRow {
        let row_len = self.vis_row_len();

        let offset = match self.leaves.get(leaf as usize) {
            Some(l) if leaf != 0 => l.vis_offset,
            _ => None,
        };

        match offset {
            Some(offset) => decompress(&self.visdata[offset as usize..], row_len),
            // No vis info, so everything could be visible
            None => VisRow::repeat(true, row_len * 8),
        }
    }

    fn all_visible_from(&self, from: LeafId) -> Self::VisibleIterator {
        let n_leaves = self.leaves.len();

        self.pvs_for(from)
            .iter_ones()
            .map(|bit| bit + 1)
            .filter(|leaf| *leaf < n_leaves)
            .map(|leaf| leaf as LeafId)
            .collect::<Vec<_>>()
            .into_iter()
    }
}
