//! Ray-cast 2.5D renderer for maps made of straight, single-colour walls.
//!
//! * [`world`] – walls, lines, the player pose and map files.
//! * [`engine`] – ray casting, column projection and the per-frame sweep.
//! * [`renderer`] – draw calls and the software back-end.
//! * [`sim`] – keyboard state → player movement.

pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
