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

#[derive(Debug, Clone, PartialEq)]
/// A game entity
pub struct Entity {
    pub attributes: HashMap<String, String>,
}

impl Entity {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

pub trait HasEntities {
    type EntitiesIter<'a>: Iterator<Item = &'a Entity>
    where
        Self: 'a;

    fn entities_iter(&self) -> Self::EntitiesIter<'_>;

    /// Value of `key` on the first entity with the given classname.
    fn find_property(&self, classname: &str, key: &str) -> Option<&str> {
        self.entities_iter()
            .find(|ent| ent.get("classname") == Some(classname))
            .and_then(|ent| ent.get(key))
    }
}
