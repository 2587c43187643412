//! Wall maps: the built-in sample room and TOML map files.
//!
//! ```toml
//! name = "notch"
//!
//! [player]
//! position = [30.0, 50.0]
//! angle_deg = 180.0
//! fov_deg = 30.0
//!
//! [[walls]]
//! from = [0.0, 0.0]
//! to = [30.0, 0.0]
//! color = "blue"          # or 0x0000FF
//! ```

use std::{fs, io, path::Path};

use glam::{DVec2, dvec2};
use serde::Deserialize;
use thiserror::Error;

use super::{Camera, Wall, WallError};
use crate::renderer::Rgba;

/// Colour names a map file may use instead of a hex literal (0x00RRGGBB).
const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", 0x00_000000),
    ("white", 0x00_FFFFFF),
    ("gray", 0x00_808080),
    ("darkgray", 0x00_A9A9A9),
    ("red", 0x00_FF0000),
    ("darkred", 0x00_8B0000),
    ("green", 0x00_008000),
    ("darkgreen", 0x00_006400),
    ("blue", 0x00_0000FF),
    ("darkblue", 0x00_00008B),
    ("yellow", 0x00_FFFF00),
    ("orange", 0x00_FFA500),
    ("purple", 0x00_800080),
    ("cyan", 0x00_00FFFF),
];

/// Look up a named colour (case-insensitive).
pub fn named_color(name: &str) -> Option<Rgba> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

/// Things that can go wrong while loading a map file.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed map file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("wall #{index}: unknown colour `{name}`")]
    UnknownColor { index: usize, name: String },

    #[error("wall #{index}: colour {value:#x} does not fit 0xRRGGBB")]
    ColorOutOfRange { index: usize, value: u32 },

    #[error("wall #{index}: {source}")]
    Wall {
        index: usize,
        #[source]
        source: WallError,
    },

    /// FoV must lie in (0°, 180°).
    #[error("field of view {0}° out of range")]
    BadFov(f64),

    #[error("player pose is not finite: position {position:?}, angle {angle_deg}°")]
    BadPose { position: [f64; 2], angle_deg: f64 },
}

/*------------------------- file schema ------------------------------*/

#[derive(Deserialize, Debug)]
struct MapFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    player: Option<PlayerDef>,
    #[serde(default)]
    walls: Vec<WallDef>,
}

#[derive(Deserialize, Debug)]
struct PlayerDef {
    position: [f64; 2],
    #[serde(default = "PlayerDef::default_angle")]
    angle_deg: f64,
    #[serde(default = "PlayerDef::default_fov")]
    fov_deg: f64,
}

impl PlayerDef {
    fn default_angle() -> f64 {
        180.0
    }
    fn default_fov() -> f64 {
        30.0
    }
}

#[derive(Deserialize, Debug)]
struct WallDef {
    from: [f64; 2],
    to: [f64; 2],
    #[serde(default)]
    color: Option<ColorDef>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ColorDef {
    Rgb(u32),
    Named(String),
}

impl ColorDef {
    fn resolve(&self, index: usize) -> Result<Rgba, MapError> {
        match self {
            ColorDef::Rgb(v) if *v <= 0x00_FFFFFF => Ok(*v),
            ColorDef::Rgb(v) => Err(MapError::ColorOutOfRange { index, value: *v }),
            ColorDef::Named(name) => named_color(name).ok_or_else(|| MapError::UnknownColor {
                index,
                name: name.clone(),
            }),
        }
    }
}

/*----------------------------- map ----------------------------------*/

/// Runtime snapshot of one map (immutable after load).
#[derive(Clone, Debug)]
pub struct Map {
    pub name: String,
    pub walls: Vec<Wall>,
    /// Pose the player spawns with.
    pub start: Camera,
}

impl Map {
    /// The 90×60 room with a notch cut into its top edge.
    pub fn sample() -> Self {
        const LIGHT: Rgba = 0x00_0000FF;
        const DARK: Rgba = 0x00_00008B;

        let segs = [
            (LIGHT, (0.0, 0.0), (30.0, 0.0)),
            (DARK, (30.0, 0.0), (30.0, 30.0)),
            (LIGHT, (30.0, 30.0), (60.0, 30.0)),
            (DARK, (60.0, 30.0), (60.0, 0.0)),
            (LIGHT, (60.0, 0.0), (90.0, 0.0)),
            (LIGHT, (0.0, 0.0), (0.0, 60.0)),
            (LIGHT, (0.0, 60.0), (90.0, 60.0)),
            (LIGHT, (90.0, 60.0), (90.0, 0.0)),
        ];

        let walls = segs
            .iter()
            .map(|&(color, (x0, y0), (x1, y1))| Wall::new(color, dvec2(x0, y0), dvec2(x1, y1)))
            .collect::<Result<Vec<_>, _>>()
            .expect("built-in sample walls must be valid");

        Self {
            name: "sample".to_string(),
            walls,
            start: Camera::default(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut map = Self::parse(&text)?;
        if map.name.is_empty() {
            map.name = path
                .as_ref()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(map)
    }

    /// Parse a map from TOML text.  Walls without a colour are white.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let file: MapFile = toml::from_str(text)?;

        let walls = file
            .walls
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let color = match &def.color {
                    Some(c) => c.resolve(index)?,
                    None => 0x00_FFFFFF,
                };
                Wall::new(color, to_vec(def.from), to_vec(def.to))
                    .map_err(|source| MapError::Wall { index, source })
            })
            .collect::<Result<Vec<_>, MapError>>()?;

        let start = match file.player {
            Some(p) => {
                if !(p.position.iter().all(|v| v.is_finite()) && p.angle_deg.is_finite()) {
                    return Err(MapError::BadPose {
                        position: p.position,
                        angle_deg: p.angle_deg,
                    });
                }
                if !(p.fov_deg > 0.0 && p.fov_deg < 180.0) {
                    return Err(MapError::BadFov(p.fov_deg));
                }
                Camera::new(
                    to_vec(p.position),
                    p.angle_deg.to_radians(),
                    p.fov_deg.to_radians(),
                )
            }
            None => Camera::default(),
        };

        let map = Self {
            name: file.name.unwrap_or_default(),
            walls,
            start,
        };
        tracing::info!(name = %map.name, walls = map.walls.len(), "map loaded");
        Ok(map)
    }

    /// Bounding box of every wall endpoint, `None` for an empty map.
    pub fn extent(&self) -> Option<(DVec2, DVec2)> {
        self.walls.iter().fold(None, |acc, w| {
            let b = w.bounds();
            Some(match acc {
                None => (b.min, b.max),
                Some((lo, hi)) => (lo.min(b.min), hi.max(b.max)),
            })
        })
    }
}

#[inline]
fn to_vec(p: [f64; 2]) -> DVec2 {
    dvec2(p[0], p[1])
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
