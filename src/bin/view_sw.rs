//! First-person ray-cast view with a minimap overlay.
//!
//! Controls  ↑/↓ = forward/back  ←/→ = turn  Shift = sprint  Esc = quit
//!
//! ```bash
//! cargo run --release -- --map maps/notch.toml
//! RUST_LOG=wallcast_rs=debug cargo run --release
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use wallcast_rs::{
    engine::{Containment, Engine, Facing, RayCaster},
    renderer::Software,
    sim::{InputCmd, Keys},
    world::Map,
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file (TOML); the built-in sample room when omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Initial canvas width in pixels
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// Initial canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Override the map's field of view (degrees)
    #[arg(long, value_name = "DEG")]
    fov_deg: Option<f64>,

    /// How ray/wall crossings are checked against the wall's extent
    #[arg(long, value_enum, default_value_t = Containment::BoundingBox)]
    containment: Containment,

    /// How hits behind the player are rejected
    #[arg(long, value_enum, default_value_t = Facing::Quadrant)]
    facing: Facing,

    /// Hide the top-down overlay
    #[arg(long)]
    no_minimap: bool,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let opts = Opts::parse();

    let mut map = match &opts.map {
        Some(path) => Map::from_file(path)
            .with_context(|| format!("loading map {}", path.display()))?,
        None => Map::sample(),
    };
    if let Some(fov) = opts.fov_deg {
        anyhow::ensure!(fov > 0.0 && fov < 180.0, "--fov-deg must be in (0, 180)");
        map.start.fov = fov.to_radians();
    }
    tracing::info!(
        map = %map.name,
        walls = map.walls.len(),
        extent = ?map.extent(),
        containment = ?opts.containment,
        facing = ?opts.facing,
        "starting viewer"
    );

    let caster = RayCaster::new(opts.containment, opts.facing);
    let mut engine = Engine::new(Software::default(), map, caster, opts.width, opts.height);
    engine.show_minimap = !opts.no_minimap;

    let mut win = Window::new(
        "wallcast - software ray caster",
        opts.width,
        opts.height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- poll keys into one InputCmd ---------------------- */
        let mut keys = Keys::empty();
        keys.set(Keys::UP, win.is_key_down(Key::Up));
        keys.set(Keys::DOWN, win.is_key_down(Key::Down));
        keys.set(Keys::LEFT, win.is_key_down(Key::Left));
        keys.set(Keys::RIGHT, win.is_key_down(Key::Right));
        keys.set(
            Keys::SPRINT,
            win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift),
        );
        engine.update(InputCmd::from_keys(keys));

        /* --------------- follow the window size --------------------------- */
        let (w, h) = win.get_size();
        engine.resize(w, h);
        if engine.screen.is_empty() {
            win.update(); // minimised: keep pumping events
            continue;
        }

        /* draw */
        let mut shown = Ok(());
        engine.render_frame(|fb, w, h| shown = win.update_with_buffer(fb, w, h));
        shown?;

        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            tracing::info!(
                "avg frame: {:.2} ms ({:.1} FPS) at {:?}",
                avg_ms,
                1000.0 / avg_ms,
                engine.camera.pos
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
