mod headless;
mod scene;
mod viewer;

use clap::{Parser, Subcommand, ValueEnum};
use driftbox_core::{PointerMode, PointerState};
use glam::Vec2;
use headless::{print_summary, run_headless, HeadlessRun};
use scene::SceneConfig;
use std::path::PathBuf;
use viewer::ViewerApp;

#[derive(Parser)]
#[command(name = "driftbox")]
#[command(about = "driftbox - pointer-driven 2D particle sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a scene without a window and print a summary
    Run {
        /// Scene file (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 600)]
        frames: u64,
        #[arg(long, default_value_t = 960.0)]
        width: f32,
        #[arg(long, default_value_t = 640.0)]
        height: f32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Pointer position in world coordinates, as `x,y`
        #[arg(long, value_parser = parse_vec2, default_value = "0,0")]
        pointer: Vec2,
        #[arg(long, value_enum, default_value_t = Mode::None)]
        mode: Mode,
    },
    /// Open the interactive viewer
    View {
        /// Scene file (JSON), reloaded when it changes
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print the default scene file
    Defaults,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    None,
    Attract,
    Repel,
}

impl From<Mode> for PointerMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::None => PointerMode::None,
            Mode::Attract => PointerMode::Attract,
            Mode::Repel => PointerMode::Repel,
        }
    }
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{}'", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Vec2::new(x, y))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            frames,
            width,
            height,
            seed,
            pointer,
            mode,
        } => run(
            config,
            HeadlessRun {
                frames,
                width,
                height,
                seed,
                pointer: PointerState::new(pointer, mode.into()),
            },
        ),
        Commands::View { config, seed } => view(config, seed),
        Commands::Defaults => defaults(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Option<PathBuf>, run: HeadlessRun) -> Result<(), Box<dyn std::error::Error>> {
    let scene = SceneConfig::load_or_default(config.as_deref())?;
    log::info!(
        "running {} particles for {} frames",
        scene.params.particle_count,
        run.frames
    );

    let summary = run_headless(&scene, &run);
    print_summary(&summary);

    Ok(())
}

fn view(config: Option<PathBuf>, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let scene = SceneConfig::load_or_default(config.as_deref())?;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "driftbox",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(config, scene, seed, cc)))),
    )?;

    Ok(())
}

fn defaults() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", SceneConfig::default().to_json_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec2() {
        assert_eq!(parse_vec2("1.5, -2").unwrap(), Vec2::new(1.5, -2.0));
        assert!(parse_vec2("3").is_err());
        assert!(parse_vec2("a,b").is_err());
    }
}
