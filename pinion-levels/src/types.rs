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

//! Various types used in parsed BSP files.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alias for convenience
pub type Vector3 = na::Vector3<f32>;

/// Alias for convenience
pub type Vector3i = na::Vector3<i32>;

/// What a leaf or clip-tree terminal is filled with.
/// Stored on disk as small negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contents {
    Empty,
    Solid,
    Water,
    Slime,
    Lava,
    Sky,
    Origin,
    Clip,
    Current0,
    Current90,
    Current180,
    Current270,
    CurrentUp,
    CurrentDown,
    Translucent,
}

impl Contents {
    /// Decode a contents value as stored in a leaf or clipnode.
    pub fn from_raw(raw: i32) -> Result<Contents> {
        use Contents::*;

        Ok(match raw {
            -1 => Empty,
            -2 => Solid,
            -3 => Water,
            -4 => Slime,
            -5 => Lava,
            -6 => Sky,
            -7 => Origin,
            -8 => Clip,
            -9 => Current0,
            -10 => Current90,
            -11 => Current180,
            -12 => Current270,
            -13 => CurrentUp,
            -14 => CurrentDown,
            -15 => Translucent,
            _ => return Err(ParseError::InvalidContents(raw)),
        })
    }

    /// The on-disk value.
    pub fn to_raw(self) -> i32 {
        use Contents::*;

        match self {
            Empty => -1,
            Solid => -2,
            Water => -3,
            Slime => -4,
            Lava => -5,
            Sky => -6,
            Origin => -7,
            Clip => -8,
            Current0 => -9,
            Current90 => -10,
            Current180 => -11,
            Current270 => -12,
            CurrentUp => -13,
            CurrentDown => -14,
            Translucent => -15,
        }
    }

    /// Water, slime, lava and the currents. Anything a player swims in.
    pub fn is_liquid(self) -> bool {
        let raw = self.to_raw();
        raw <= Contents::Water.to_raw() && raw > Contents::Translucent.to_raw()
    }
}

/// An error encountered while parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File is too short to hold a header")]
    TooShort,

    #[error("Unsupported BSP version {0}")]
    UnsupportedVersion(u32),

    #[error("Lump {lump} points outside the file")]
    LumpOutOfBounds { lump: usize },

    #[error("Lump {lump} is {len} bytes long, not a multiple of its {record} byte records")]
    MisalignedLump {
        lump: usize,
        len: usize,
        record: usize,
    },

    #[error("{kind} index {index} out of range (only {max} present)")]
    BadReference {
        kind: &'static str,
        index: i64,
        max: usize,
    },

    #[error("Invalid contents value {0}")]
    InvalidContents(i32),

    #[error("Tree rooted at {root} is deeper than {max} levels or contains a cycle")]
    TreeTooDeep { root: u32, max: usize },

    #[error("Invalid data")]
    Invalid,
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, ParseError>;
