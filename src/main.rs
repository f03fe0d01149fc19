//! `orbiter [OPTIONS.toml] [--headless FRAMES] [--schema OUT.json]`
//!
//! Opens the flight viewer, or with `--headless` steps the flight loop at a
//! fixed 60 Hz without a window and logs the body pose. `--schema` writes the
//! options JSON Schema and exits.

use std::path::{Path, PathBuf};

use orbiter::{
    engine::FlightEngine,
    scene::{AssetLoader, HeadlessRenderer},
    util::clock::{Clock, ManualClock},
    Options, OrbiterError, Viewer,
};

const HEADLESS_STEP: f64 = 1.0 / 60.0;

struct Args {
    options_path: Option<PathBuf>,
    headless_frames: Option<u64>,
    schema_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        options_path: None,
        headless_frames: None,
        schema_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--headless" {
            let frames = iter
                .next()
                .ok_or("--headless needs a frame count")?
                .parse()
                .map_err(|e| format!("bad frame count: {e}"))?;
            args.headless_frames = Some(frames);
        } else if arg == "--schema" {
            let path = iter.next().ok_or("--schema needs an output path")?;
            args.schema_path = Some(PathBuf::from(path));
        } else if args.options_path.is_none() {
            args.options_path = Some(PathBuf::from(arg));
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }
    Ok(args)
}

fn run_headless(
    options: &Options,
    asset_root: &Path,
    frames: u64,
) -> Result<(), OrbiterError> {
    let loader = AssetLoader::new(asset_root);
    let (mut engine, mut scene, handle) =
        pollster::block_on(FlightEngine::with_scene(options, &loader, 1.0))?;
    let mut renderer = HeadlessRenderer::new();
    let mut clock = ManualClock::new();

    for _ in 0..frames {
        clock.advance(HEADLESS_STEP);
        let report = match engine.frame(
            clock.elapsed(),
            &mut scene,
            &handle,
            &mut renderer,
        ) {
            Ok(report) => report,
            Err(never) => match never {},
        };
        log::info!(
            "t={:.3} pos={:.3} fwd={:.3} cam={:.3}",
            report.elapsed,
            report.body.position,
            report.body.forward,
            report.pose.position
        );
    }

    log::info!(
        "headless run done: {} frames, {} degenerate",
        renderer.frames(),
        engine.degenerate_frames()
    );
    Ok(())
}

fn run(args: Args) -> Result<(), OrbiterError> {
    if let Some(path) = &args.schema_path {
        Options::write_schema(path)?;
        log::info!("wrote options schema to {}", path.display());
        return Ok(());
    }

    let options = match &args.options_path {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    // Relative mesh paths resolve next to the options file.
    let asset_root = args
        .options_path
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    match args.headless_frames {
        Some(frames) => run_headless(&options, &asset_root, frames),
        None => Viewer::builder()
            .with_options(options)
            .with_asset_root(asset_root)
            .build()
            .run(),
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!(
                "Usage: orbiter [OPTIONS.toml] [--headless FRAMES] \
                 [--schema OUT.json]"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
