mod camera;
pub mod geometry;
pub mod map;

pub use geometry::{Bounds, Line, RAY_PROBE_LEN, Wall, WallError};

pub use camera::Camera;

pub use map::{Map, MapError, named_color};
