//! ---------------------------------------------------------------------------
//! Software (CPU) renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Columns are clipped to the screen here, so the projector may hand out
//!   spans taller than the frame.
//! ---------------------------------------------------------------------------

use glam::{DVec2, dvec2};

use crate::renderer::{BACKGROUND, ColumnSpan, LineSpan, Renderer, Rgba};

/// Column + line rasteriser.
#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.fill(BACKGROUND);
    }

    fn fill(&mut self, color: Rgba) {
        self.scratch.fill(color);
    }

    fn draw_column(&mut self, span: &ColumnSpan) {
        if span.x >= self.width || self.height == 0 {
            return;
        }
        let bottom = (self.height - 1) as f64;
        if span.y_bot < 0.0 || span.y_top > bottom || span.y_top > span.y_bot {
            return; // entirely above/below the frame
        }

        let y0 = span.y_top.max(0.0).round() as usize;
        let y1 = span.y_bot.min(bottom).round() as usize;
        for y in y0..=y1 {
            self.scratch[y * self.width + span.x] = span.color;
        }
    }

    fn draw_line(&mut self, line: &LineSpan) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (mut p1, mut p2) = (line.from, line.to);
        let max = dvec2((self.width - 1) as f64, (self.height - 1) as f64);
        if !clip_to_frame(&mut p1, &mut p2, max) {
            return;
        }
        self.bresenham(
            p1.x.round() as i64,
            p1.y.round() as i64,
            p2.x.round() as i64,
            p2.y.round() as i64,
            line.color,
        );
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

impl Software {
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: Rgba) {
        if (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = color;
        }
    }

    /// Integer Bresenham line-drawing algorithm.  Endpoints are expected to
    /// be clipped already; `plot` still drops rounding stragglers.
    fn bresenham(&mut self, mut x0: i64, mut y0: i64, x1: i64, y1: i64, color: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Liang–Barsky clip of the segment `p1 → p2` to `[0, max.x] × [0, max.y]`.
/// Returns false if nothing is left (or a coordinate is not finite).
fn clip_to_frame(p1: &mut DVec2, p2: &mut DVec2, max: DVec2) -> bool {
    if !(p1.is_finite() && p2.is_finite()) {
        return false;
    }
    let d = *p2 - *p1;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    // (p, q) per edge: left, right, top, bottom
    for (p, q) in [
        (-d.x, p1.x),
        (d.x, max.x - p1.x),
        (-d.y, p1.y),
        (d.y, max.y - p1.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return false; // parallel and outside
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return false;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return false;
            }
            t1 = t1.min(r);
        }
    }

    let start = *p1;
    *p1 = start + d * t0;
    *p2 = start + d * t1;
    true
}

/*──────────────────────────────── Tests ───────────────────────────────*/
