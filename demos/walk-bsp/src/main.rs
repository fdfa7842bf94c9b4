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

//! Loads a level, drops a player at the start point and walks them forwards.
//! Usage: walk-bsp <map.bsp> [vars.json] [ticks]

use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use pinion_levels::prelude::*;
use pinion_movement::{player_move, Buttons, MoveHulls, MoveVars, PlayerMove, UserCommand};

/// Hull used for a standing player
const PLAYER_HULL: usize = 1;

/// Ticks per second
const TICK_RATE: f32 = 60.0;

const DEFAULT_TICKS: usize = 300;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", full_error_display(err));
    }
}

/// Display an error along with everything that caused it.
fn full_error_display(err: anyhow::Error) -> String {
    let cont = err
        .chain()
        .skip(1)
        .map(|cause| format!("    caused by: {}", cause))
        .collect::<Vec<String>>()
        .join("\n");

    format!("Error: {}\n{}", err, cont)
}

/// Parse an entity's `"x y z"` vector.
fn parse_vector(val: &str) -> Result<Vector3> {
    let parts = val
        .split_whitespace()
        .map(|p| p.parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid vector {:?}", val))?;

    match parts[..] {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(anyhow!("Expected 3 components in {:?}", val)),
    }
}

fn try_main() -> Result<()> {
    // Initialise logger
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_max_level(log::LevelFilter::Debug)
            .set_thread_mode(simplelog::ThreadLogMode::Names)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("Error initialising logger")?;

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .context("Usage: walk-bsp <map.bsp> [vars.json] [ticks]")?;

    let vars = match args.next() {
        Some(vars_path) => {
            let raw = fs::read_to_string(&vars_path)
                .with_context(|| format!("Error reading {}", vars_path))?;
            serde_json::from_str(&raw).context("Error parsing movement vars")?
        }
        None => MoveVars::default(),
    };

    let ticks = args
        .next()
        .map(|t| t.parse::<usize>())
        .transpose()
        .context("Invalid tick count")?
        .unwrap_or(DEFAULT_TICKS);

    // Parse the map file
    let data = fs::read(&path).with_context(|| format!("Error reading {}", path))?;
    let bsp = HlBspFile::parse_file(&data).context("Error parsing map")?;

    // Find somewhere to start
    let origin = bsp
        .find_property("info_player_start", "origin")
        .map(parse_vector)
        .transpose()?
        .unwrap_or_else(Vector3::zeros);
    let yaw = bsp
        .find_property("info_player_start", "angle")
        .map(|a| a.trim().parse::<f32>())
        .transpose()
        .context("Invalid start angle")?
        .unwrap_or(0.0);

    match bsp.find_leaf(&origin) {
        Some(leaf) => info!(
            "Starting at {:?} in leaf {}, which can see {} leaves",
            origin,
            leaf,
            bsp.all_visible_from(leaf).count()
        ),
        None => info!("Starting at {:?}, outside of every leaf", origin),
    }
    info!("{} faces visible from the start", bsp.visible_faces(&origin).len());

    let hulls = MoveHulls::for_world(&bsp, PLAYER_HULL).context("Error getting player hull")?;
    let mut pm = PlayerMove {
        origin,
        ..PlayerMove::default()
    };

    // Walk forwards, jumping every second
    for tick in 0..ticks {
        let cmd = UserCommand {
            forward_move: vars.max_speed,
            buttons: if tick % TICK_RATE as usize == 0 {
                Buttons::JUMP
            } else {
                Buttons::empty()
            },
            view_angles: Vector3::new(0.0, yaw, 0.0),
            frame_time: 1.0 / TICK_RATE,
            ..UserCommand::default()
        };

        player_move(&hulls, &vars, &mut pm, &cmd)
            .with_context(|| format!("Error moving on tick {}", tick))?;

        debug!(
            "Tick {}: origin {:?}, velocity {:?}, on ground: {}",
            tick, pm.origin, pm.velocity, pm.on_ground
        );
    }

    info!(
        "After {} ticks: at {:?} in leaf {}, water level {}",
        ticks,
        pm.origin,
        bsp.point_in_leaf(&pm.origin),
        pm.water_level
    );

    Ok(())
}
