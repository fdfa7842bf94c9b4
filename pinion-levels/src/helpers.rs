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

//! Helper functions for parsing

use std::convert::TryInto;
use std::slice::ChunksExact;

use crate::types::{ParseError, Result, Vector3, Vector3i};

/// Turn a slice into a le i32.
/// # Panics
/// If slice is not 4 bytes long
pub fn slice_to_i32(slice: &[u8]) -> i32 {
    i32::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le u32.
/// # Panics
/// If slice is not 4 bytes long.
pub fn slice_to_u32(slice: &[u8]) -> u32 {
    u32::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le i16, used for child indices and bounding boxes.
/// # Panics
/// If slice is not 2 bytes long.
pub fn slice_to_i16(slice: &[u8]) -> i16 {
    i16::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le u16, used for face & mark surface ranges.
/// # Panics
/// If slice is not 2 bytes long.
pub fn slice_to_u16(slice: &[u8]) -> u16 {
    u16::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le f32, the float datatype in a bsp file.
/// # Panics
/// If slice is not 4 bytes long
pub fn slice_to_f32(slice: &[u8]) -> f32 {
    f32::from_bits(u32::from_le_bytes(slice.try_into().unwrap()))
}

/// Turn a slice of floats into a 3D vector
/// # Panics
/// If slice isn't 12 bytes long.
pub fn slice_to_vec3(slice: &[u8]) -> Vector3 {
    Vector3::new(
        slice_to_f32(&slice[0..4]),
        slice_to_f32(&slice[4..8]),
        slice_to_f32(&slice[8..12]),
    )
}

/// Turn a slice of i16s into a 3D vector
/// # Panics
/// If slice isn't 6 bytes long.
pub fn slice_to_vec3i16(slice: &[u8]) -> Vector3i {
    Vector3i::new(
        slice_to_i16(&slice[0..2]) as i32,
        slice_to_i16(&slice[2..4]) as i32,
        slice_to_i16(&slice[4..6]) as i32,
    )
}

/// Split a lump into fixed size records.
/// Errors if the lump isn't an exact multiple of the record size.
pub fn records(data: &[u8], record: usize, lump: usize) -> Result<ChunksExact<'_, u8>> {
    if data.len() % record != 0 {
        return Err(ParseError::MisalignedLump {
            lump,
            len: data.len(),
            record,
        });
    }

    Ok(data.chunks_exact(record))
}

/// Check `index` refers to one of `max` items of type `kind`.
pub fn check_index(kind: &'static str, index: i64, max: usize) -> Result<u32> {
    if index < 0 || index as usize >= max {
        return Err(ParseError::BadReference { kind, index, max });
    }

    Ok(index as u32)
}
