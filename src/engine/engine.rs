use crate::{
    engine::{caster::RayCaster, frame, types::Screen},
    renderer::{DrawCall, Renderer, RendererExt, Rgba},
    sim::{self, InputCmd},
    world::{Camera, Map},
};

/// Owns everything one view needs between frames: the map, the player
/// pose and the back-end.  The caster itself keeps no state.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub map: Map,
    pub camera: Camera,
    pub caster: RayCaster,
    pub screen: Screen,
    pub show_minimap: bool,
    calls: Vec<DrawCall>,
}

impl<R: Renderer> Engine<R> {
    /// Spawn the player at the map's start pose.
    pub fn new(renderer: R, map: Map, caster: RayCaster, w: usize, h: usize) -> Self {
        let camera = map.start;
        Self {
            renderer,
            map,
            camera,
            caster,
            screen: Screen::new(w, h),
            show_minimap: true,
            calls: Vec::with_capacity(w),
        }
    }

    /// Track the host's canvas size; takes effect on the next frame.
    pub fn resize(&mut self, w: usize, h: usize) {
        if self.screen.w != w || self.screen.h != h {
            tracing::debug!(w, h, "canvas resized");
            self.screen = Screen::new(w, h);
        }
    }

    /// Apply one frame of input to the player pose.
    pub fn update(&mut self, cmd: InputCmd) {
        sim::player_input(&mut self.camera, cmd);
    }

    /// Draw calls for the current pose: wall columns, then the minimap on
    /// top so it stays readable.
    pub fn build_frame(&mut self) -> &[DrawCall] {
        self.calls.clear();
        let hits = frame::column_sweep(
            &self.map.walls,
            &self.camera,
            &self.screen,
            &self.caster,
            &mut self.calls,
        );
        if self.show_minimap {
            frame::minimap(&self.map.walls, &self.camera, &mut self.calls);
        }
        tracing::trace!(hits, calls = self.calls.len(), "frame built");
        &self.calls
    }

    /// Build and rasterise one frame, then hand the pixels to `submit`.
    /// A zero-sized canvas (minimised window) skips drawing entirely.
    pub fn render_frame(&mut self, submit: impl FnOnce(&[Rgba], usize, usize)) {
        if self.screen.is_empty() {
            return;
        }
        self.build_frame();
        let Self {
            renderer,
            calls,
            screen,
            ..
        } = self;
        renderer.draw_frame(screen.w, screen.h, calls, submit);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
