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
#![allow(dead_code)]

//! Writes small but complete version 30 files to test against.

use pinion_levels::prelude::*;

const LUMP_COUNT: usize = 15;
const FACE_SIZE: usize = 20;

pub const CONTENTS_EMPTY: i16 = -1;
pub const CONTENTS_SOLID: i16 = -2;

/// Inside of the test room.
pub const ROOM_MIN: [f32; 3] = [-128.0, -128.0, 0.0];
pub const ROOM_MAX: [f32; 3] = [128.0, 128.0, 256.0];

pub const HULL_BOXES: [([f32; 3], [f32; 3]); 4] = [
    ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
    ([-16.0, -16.0, -36.0], [16.0, 16.0, 36.0]),
    ([-32.0, -32.0, -32.0], [32.0, 32.0, 32.0]),
    ([-16.0, -16.0, -18.0], [16.0, 16.0, 18.0]),
];

pub struct RawNode {
    pub plane: u32,
    pub children: [i16; 2],
    pub mins: [i16; 3],
    pub maxs: [i16; 3],
}

pub struct RawLeaf {
    pub contents: i32,
    pub vis_offset: i32,
    pub mins: [i16; 3],
    pub maxs: [i16; 3],
    pub marks: (u16, u16),
}

pub struct RawModel {
    pub mins: [f32; 3],
    pub maxs: [f32; 3],
    pub head_nodes: [i32; 4],
    pub faces: (i32, i32),
}

/// Every lump we read, in the form it's written.
pub struct BspWriter {
    pub version: u32,
    pub entities: String,
    pub planes: Vec<([f32; 3], f32)>,
    pub nodes: Vec<RawNode>,
    pub leaves: Vec<RawLeaf>,
    pub marks: Vec<u16>,
    pub n_faces: usize,
    pub clipnodes: Vec<(i32, [i16; 2])>,
    pub models: Vec<RawModel>,
    pub visdata: Vec<u8>,
}

impl Default for BspWriter {
    fn default() -> Self {
        BspWriter {
            version: 30,
            entities: String::new(),
            planes: vec![],
            nodes: vec![],
            leaves: vec![],
            marks: vec![],
            n_faces: 0,
            clipnodes: vec![],
            models: vec![],
            visdata: vec![],
        }
    }
}

fn push_f32s(buf: &mut Vec<u8>, vals: &[f32]) {
    for v in vals {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn push_i16s(buf: &mut Vec<u8>, vals: &[i16]) {
    for v in vals {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn axis_of(normal: &[f32; 3]) -> i32 {
    match normal {
        [x, _, _] if *x == 1.0 => 0,
        [_, y, _] if *y == 1.0 => 1,
        [_, _, z] if *z == 1.0 => 2,
        _ => 5,
    }
}

impl BspWriter {
    pub fn add_plane(&mut self, normal: [f32; 3], dist: f32) -> u32 {
        self.planes.push((normal, dist));
        (self.planes.len() - 1) as u32
    }

    fn lumps(&self) -> Vec<Vec<u8>> {
        let mut lumps = vec![vec![]; LUMP_COUNT];

        let mut ents = self.entities.clone().into_bytes();
        ents.push(0);
        lumps[0] = ents;

        for (normal, dist) in &self.planes {
            push_f32s(&mut lumps[1], normal);
            push_f32s(&mut lumps[1], &[*dist]);
            lumps[1].extend_from_slice(&axis_of(normal).to_le_bytes());
        }

        lumps[4] = self.visdata.clone();

        for node in &self.nodes {
            lumps[5].extend_from_slice(&node.plane.to_le_bytes());
            push_i16s(&mut lumps[5], &node.children);
            push_i16s(&mut lumps[5], &node.mins);
            push_i16s(&mut lumps[5], &node.maxs);
            push_i16s(&mut lumps[5], &[0, 0]);
        }

        lumps[7] = vec![0; self.n_faces * FACE_SIZE];

        for (plane, children) in &self.clipnodes {
            lumps[9].extend_from_slice(&plane.to_le_bytes());
            push_i16s(&mut lumps[9], children);
        }

        for leaf in &self.leaves {
            lumps[10].extend_from_slice(&leaf.contents.to_le_bytes());
            lumps[10].extend_from_slice(&leaf.vis_offset.to_le_bytes());
            push_i16s(&mut lumps[10], &leaf.mins);
            push_i16s(&mut lumps[10], &leaf.maxs);
            lumps[10].extend_from_slice(&leaf.marks.0.to_le_bytes());
            lumps[10].extend_from_slice(&leaf.marks.1.to_le_bytes());
            lumps[10].extend_from_slice(&[0; 4]);
        }

        for mark in &self.marks {
            lumps[11].extend_from_slice(&mark.to_le_bytes());
        }

        for model in &self.models {
            push_f32s(&mut lumps[14], &model.mins);
            push_f32s(&mut lumps[14], &model.maxs);
            push_f32s(&mut lumps[14], &[0.0; 3]);
            for head in &model.head_nodes {
                lumps[14].extend_from_slice(&head.to_le_bytes());
            }
            for v in &[1, model.faces.0, model.faces.1] {
                lumps[14].extend_from_slice(&(*v as i32).to_le_bytes());
            }
        }

        lumps
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let lumps = self.lumps();
        let mut header = self.version.to_le_bytes().to_vec();
        let mut body = vec![];
        let mut offset = 4 + LUMP_COUNT * 8;

        for lump in lumps {
            header.extend_from_slice(&(offset as u32).to_le_bytes());
            header.extend_from_slice(&(lump.len() as u32).to_le_bytes());
            offset += lump.len();
            body.extend(lump);
        }

        header.extend(body);
        header
    }

    /// Add 6 clipnodes testing whether a point is inside `mins..maxs`.
    /// Returns the first of them.
    pub fn clip_box(&mut self, mins: [f32; 3], maxs: [f32; 3], inside: i16, outside: i16) -> i16 {
        let first = self.clipnodes.len() as i16;

        for i in 0..6 {
            let axis = i / 2;
            let mut normal = [0.0; 3];
            normal[axis] = 1.0;

            let next = if i == 5 { inside } else { first + i as i16 + 1 };
            let (plane, children) = if i % 2 == 0 {
                (self.add_plane(normal, mins[axis]), [next, outside])
            } else {
                (self.add_plane(normal, maxs[axis]), [outside, next])
            };

            self.clipnodes.push((plane as i32, children));
        }

        first
    }

    /// Same as [`clip_box`] but for render nodes, where children are leaves.
    pub fn node_box(&mut self, mins: [f32; 3], maxs: [f32; 3], inside: i16, outside: i16) -> i16 {
        let first = self.nodes.len() as i16;
        let bounds_min = [ROOM_MIN[0] as i16, ROOM_MIN[1] as i16, ROOM_MIN[2] as i16];
        let bounds_max = [ROOM_MAX[0] as i16, ROOM_MAX[1] as i16, ROOM_MAX[2] as i16];

        for i in 0..6 {
            let axis = i / 2;
            let mut normal = [0.0; 3];
            normal[axis] = 1.0;

            let next = if i == 5 { inside } else { first + i as i16 + 1 };
            let (plane, children) = if i % 2 == 0 {
                (self.add_plane(normal, mins[axis]), [next, outside])
            } else {
                (self.add_plane(normal, maxs[axis]), [outside, next])
            };

            self.nodes.push(RawNode {
                plane,
                children,
                mins: bounds_min,
                maxs: bounds_max,
            });
        }

        first
    }
}

/// Raw child value pointing at leaf `idx`.
pub fn leaf_child(idx: i16) -> i16 {
    -1 - idx
}

/// A closed room. `brush` is an optional solid box standing inside it.
pub fn room_map(brush: Option<([f32; 3], [f32; 3])>) -> BspWriter {
    let mut w = BspWriter::default();
    w.entities = concat!(
        "{\n\"classname\" \"worldspawn\"\n}\n",
        "{\n\"classname\" \"info_player_start\"\n\"origin\" \"0 0 36\"\n\"angle\" \"90\"\n}\n"
    )
    .to_string();

    // Leaf 0 is the shared solid leaf, leaf 1 the inside of the room
    w.leaves.push(RawLeaf {
        contents: CONTENTS_SOLID as i32,
        vis_offset: -1,
        mins: [0; 3],
        maxs: [0; 3],
        marks: (0, 0),
    });
    w.leaves.push(RawLeaf {
        contents: CONTENTS_EMPTY as i32,
        vis_offset: 0,
        mins: [-128, -128, 0],
        maxs: [128, 128, 256],
        marks: (0, 6),
    });
    w.n_faces = 6;
    w.marks = (0..6).collect();
    w.visdata = vec![0x01];

    // Render tree / hull 0
    let inside = match brush {
        Some((mins, maxs)) => {
            let room_inside = w.nodes.len() as i16 + 6;
            w.node_box(ROOM_MIN, ROOM_MAX, room_inside, leaf_child(0));
            w.node_box(mins, maxs, leaf_child(0), leaf_child(1));
            0
        }
        None => w.node_box(ROOM_MIN, ROOM_MAX, leaf_child(1), leaf_child(0)),
    };

    let mut head_nodes = [inside as i32, 0, 0, 0];

    for (hull, (hmins, hmaxs)) in HULL_BOXES.iter().enumerate().skip(1) {
        let room_min = [0, 1, 2].map(|i| ROOM_MIN[i] - hmins[i]);
        let room_max = [0, 1, 2].map(|i| ROOM_MAX[i] - hmaxs[i]);

        head_nodes[hull] = match brush {
            Some((mins, maxs)) => {
                let first = w.clipnodes.len() as i16;
                let brush_min = [0, 1, 2].map(|i| mins[i] - hmaxs[i]);
                let brush_max = [0, 1, 2].map(|i| maxs[i] - hmins[i]);

                w.clip_box(room_min, room_max, first + 6, CONTENTS_SOLID);
                w.clip_box(brush_min, brush_max, CONTENTS_SOLID, CONTENTS_EMPTY);
                first as i32
            }
            None => w.clip_box(room_min, room_max, CONTENTS_EMPTY, CONTENTS_SOLID) as i32,
        };
    }

    w.models.push(RawModel {
        mins: ROOM_MIN,
        maxs: ROOM_MAX,
        head_nodes,
        faces: (0, 6),
    });

    w
}

/// RLE compress a row of visibility bits.
pub fn compress_row(row: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    let mut i = 0;

    while i < row.len() {
        if row[i] != 0 {
            out.push(row[i]);
            i += 1;
            continue;
        }

        let mut run = 0;
        while i < row.len() && row[i] == 0 && run < 255 {
            run += 1;
            i += 1;
        }
        out.push(0);
        out.push(run as u8);
    }

    out
}

/// A strip of `cells` leaves side by side along x, split by planes at even spacing.
/// `visible(leaf)` lists which leaves each one can see. Leaf `n` has face `n - 1`.
pub fn strip_map<F: Fn(u32) -> Vec<u32>>(cells: usize, visible: F) -> BspWriter {
    let mut w = BspWriter::default();
    let width = 256 / cells as i16;

    w.leaves.push(RawLeaf {
        contents: CONTENTS_SOLID as i32,
        vis_offset: -1,
        mins: [0; 3],
        maxs: [0; 3],
        marks: (0, 0),
    });

    let row_len = (cells + 7) / 8;
    for leaf in 1..=cells {
        let mut row = vec![0u8; row_len];
        for other in visible(leaf as u32) {
            let bit = other as usize - 1;
            row[bit / 8] |= 1 << (bit % 8);
        }

        let offset = w.visdata.len() as i32;
        w.visdata.extend(compress_row(&row));

        let x0 = -128 + width * (leaf as i16 - 1);
        w.leaves.push(RawLeaf {
            contents: CONTENTS_EMPTY as i32,
            vis_offset: offset,
            mins: [x0, -128, 0],
            maxs: [x0 + width, 128, 256],
            marks: ((leaf - 1) as u16, 1),
        });
        w.marks.push((leaf - 1) as u16);
    }
    w.n_faces = cells;

    // Node i splits leaf i + 1 off the back
    for i in 0..cells - 1 {
        let x = (-128 + width * (i as i16 + 1)) as f32;
        let plane = w.add_plane([1.0, 0.0, 0.0], x);
        let front = if i == cells - 2 {
            leaf_child(cells as i16)
        } else {
            i as i16 + 1
        };

        w.nodes.push(RawNode {
            plane,
            children: [front, leaf_child(i as i16 + 1)],
            mins: [-128 + width * i as i16, -128, 0],
            maxs: [128, 128, 256],
        });
    }

    w.models.push(RawModel {
        mins: ROOM_MIN,
        maxs: ROOM_MAX,
        head_nodes: [0, CONTENTS_EMPTY as i32, CONTENTS_EMPTY as i32, CONTENTS_EMPTY as i32],
        faces: (0, cells as i32),
    });

    w
}

pub fn load(w: &BspWriter) -> HlBspFile {
    HlBspFile::parse_file(&w.to_bytes()).expect("test map should parse")
}

pub fn v(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::new(x, y, z)
}
