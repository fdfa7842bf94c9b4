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

use std::collections::HashMap;
use std::str;

use super::HlBspFile;
use crate::traits::entities::*;
use crate::types::{ParseError, Result};

const QUOTE: u8 = b'"';
const END_BRACKET: u8 = b'}';
const START_BRACKET: u8 = b'{';

/// Internal enum to parse through the entities string.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ParseState {
    InKey,
    InValue,
    AfterKey,
    InsideEntity,
    OutsideEntity,
}

/// Parse the given data as an Entities lump.
/// The lump is a NUL-terminated list of `{ "key" "value" ... }` blocks.
pub fn from_data(data: &[u8]) -> Result<Box<[Entity]>> {
    use self::ParseState::*;

    let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
    let string = str::from_utf8(&data[..end]).map_err(|_| ParseError::Invalid)?;

    let mut attrs = HashMap::new();
    let mut entities = Vec::new();

    let mut state = OutsideEntity;

    let mut key_start = 0;
    let mut key_end = 0;
    let mut val_start = 0;

    for (i, chr) in string.bytes().enumerate() {
        match (chr, state) {
            // Braces inside quotes are part of the text
            (_, InKey) if chr != QUOTE => {}
            (_, InValue) if chr != QUOTE => {}

            (QUOTE, InsideEntity) => {
                state = InKey;
                key_start = i + 1;
            }
            (QUOTE, InKey) => {
                state = AfterKey;
                key_end = i;
            }
            (QUOTE, AfterKey) => {
                state = InValue;
                val_start = i + 1;
            }
            (QUOTE, InValue) => {
                state = InsideEntity;

                attrs.insert(
                    string[key_start..key_end].to_owned(),
                    string[val_start..i].to_owned(),
                );
            }
            (QUOTE, OutsideEntity) => return Err(ParseError::Invalid),

            (END_BRACKET, InsideEntity) => {
                state = OutsideEntity;
                entities.push(Entity {
                    attributes: std::mem::take(&mut attrs),
                });
            }
            (START_BRACKET, OutsideEntity) => state = InsideEntity,
            (END_BRACKET, _) | (START_BRACKET, _) => return Err(ParseError::Invalid),

            _ => {}
        }
    }

    if state != OutsideEntity {
        return Err(ParseError::Invalid);
    }

    Ok(entities.into_boxed_slice())
}

impl HasEntities for HlBspFile {
    type EntitiesIter<'a> = std::slice::Iter<'a, Entity>;

    fn entities_iter(&self) -> Self::EntitiesIter<'_> {
        self.entities.iter()
    }
}
