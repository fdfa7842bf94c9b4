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

use crate::helpers::slice_to_u32;
use crate::types::{ParseError, Result};

/// The only version we can read.
pub const BSP_VERSION: u32 = 30;

pub const LUMP_COUNT: usize = 15;
const HEADER_LEN: usize = 4 + (LUMP_COUNT * 4 * 2);

pub const LUMP_ENTITIES: usize = 0;
pub const LUMP_PLANES: usize = 1;
pub const LUMP_VISIBILITY: usize = 4;
pub const LUMP_NODES: usize = 5;
pub const LUMP_FACES: usize = 7;
pub const LUMP_CLIPNODES: usize = 9;
pub const LUMP_LEAVES: usize = 10;
pub const LUMP_MARKSURFACES: usize = 11;
pub const LUMP_MODELS: usize = 14;

/// The size of one face record. Faces themselves aren't parsed, only counted.
pub const FACE_SIZE: usize = 20;

/// The header found at the start of a bsp file
#[derive(Clone, Copy, Debug)]
pub struct Header {
    pub version: u32,
    pub dir_entries: [DirEntry; LUMP_COUNT],
}

/// A directory entry, pointing to a lump in the file
#[derive(Clone, Copy, Debug, Default)]
pub struct DirEntry {
    /// Offset from beginning of file to start of lump
    pub offset: u32,

    /// Length of lump
    pub length: u32,
}

impl Header {
    /// Deserialise from buffer.
    /// # Format
    /// int version                 Version number. Always 30.
    /// direntry[15] direntries     Lump directory, fifteen entries.
    pub fn from(v: &[u8]) -> Result<Header> {
        if v.len() < HEADER_LEN {
            return Err(ParseError::TooShort);
        }

        let version = slice_to_u32(&v[0..4]);
        if version != BSP_VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }

        let mut dir_entries = [DirEntry::default(); LUMP_COUNT];
        for (n, entry) in dir_entries.iter_mut().enumerate() {
            let base = &v[4 + (n * 8)..4 + (n * 8) + 8];
            *entry = DirEntry {
                offset: slice_to_u32(&base[0..4]),
                length: slice_to_u32(&base[4..8]),
            };
        }

        Ok(Header {
            version,
            dir_entries,
        })
    }

    /// Get the lump at given index from the buffer, with offset & length based on this directory.
    pub fn get_lump<'l>(&self, buf: &'l [u8], index: usize) -> Result<&'l [u8]> {
        let entry = self.dir_entries[index];
        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.length as usize)
            .ok_or(ParseError::LumpOutOfBounds { lump: index })?;

        buf.get(start..end)
            .ok_or(ParseError::LumpOutOfBounds { lump: index })
    }
}
