//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*
//! It produces a list of [`DrawCall`]s and hands them to a type that
//! implements [`Renderer`].
//!
//! * Back-ends can be swapped without changing the caster or the frame
//!   driver.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use glam::DVec2;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Background of every frame.
pub const BACKGROUND: Rgba = 0x00_000000;

/// One vertical wall slice in screen space.
///
/// `y_top ..= y_bot` may reach past the screen edges for near walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpan {
    pub x: usize,
    pub y_top: f64,
    pub y_bot: f64,
    pub color: Rgba,
}

/// Straight stroke in screen space (minimap).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpan {
    pub from: DVec2,
    pub to: DVec2,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
    Column(ColumnSpan),
    Line(LineSpan),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear
    /// it to [`BACKGROUND`].
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Flood the whole frame with `color`.
    fn fill(&mut self, color: Rgba);

    /// Rasterise one wall column, clipped to the frame.
    fn draw_column(&mut self, span: &ColumnSpan);

    /// Rasterise one line, clipped to the frame.
    fn draw_line(&mut self, line: &LineSpan);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` is run exactly once per frame.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, width: usize, height: usize, calls: &[DrawCall], submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for c in calls {
            match c {
                DrawCall::Column(s) => self.draw_column(s),
                DrawCall::Line(l) => self.draw_line(l),
            }
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
