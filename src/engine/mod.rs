pub mod caster;
#[allow(clippy::module_inception)]
mod engine;
pub mod frame;
pub mod projection;
pub mod types;

pub use caster::{Containment, Facing, RayCaster, RayHit, cast};
pub use engine::Engine;
pub use projection::{MIN_DISTANCE, PROJECTION_SCALE, column_height};
pub use types::Screen;
