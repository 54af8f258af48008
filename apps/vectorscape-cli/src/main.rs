use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::DVec3;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vectorscape_common::{SceneConfig, Viewport};
use vectorscape_driver::{FixedStepClock, FrameDriver, ManualScheduler};
use vectorscape_input::Action;
use vectorscape_kernel::{CameraState, World};
use vectorscape_render::{PixmapSurface, project};
use vectorscape_tools::{TracingSink, WorldInspector};

#[derive(Parser)]
#[command(name = "vectorscape-cli", about = "CLI tool for vectorscape operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Load and validate a YAML or JSON scene config
    CheckConfig {
        path: PathBuf,
    },
    /// Generate a world and print its entity counts
    Inspect {
        #[arg(long)]
        config: Option<PathBuf>,
        /// RNG seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Project one world-space point onto the screen
    Project {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        cam_x: f64,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        cam_y: f64,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        cam_z: f64,
        /// Pitch in radians
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        rot_x: f64,
        /// Yaw in radians
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        rot_y: f64,
        #[arg(long, default_value = "1440")]
        width: u32,
        #[arg(long, default_value = "900")]
        height: u32,
        #[arg(long, default_value = "800")]
        fov: f64,
    },
    /// Run the frame loop headless and write the last frame to a PNG
    Render {
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// RNG seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long, default_value = "frame.png")]
        out: PathBuf,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep the camera yaw fixed
        #[arg(long)]
        no_auto_rotate: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn generate_world(config: &SceneConfig, seed: Option<u64>) -> World {
    match seed {
        Some(seed) => World::generate(config, &mut Pcg64Mcg::seed_from_u64(seed)),
        None => World::generate(config, &mut rand::rng()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("vectorscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", vectorscape_common::crate_info());
            println!("kernel: {}", vectorscape_kernel::crate_info());
            println!("render: {}", vectorscape_render::crate_info());
            println!("input: {}", vectorscape_input::crate_info());
            println!("tools: {}", vectorscape_tools::crate_info());
            println!("driver: {}", vectorscape_driver::crate_info());

            let config = SceneConfig::default();
            let viewport = config.initial_viewport();
            println!(
                "defaults: canvas={}x{} fov={} buildings={} particles={}",
                viewport.width,
                viewport.height,
                config.projection.fov,
                config.world.building_count,
                config.particles.count
            );
        }
        Commands::CheckConfig { path } => {
            let config = load_config(Some(&path))?;
            println!("{}: OK", path.display());
            println!(
                "canvas={}x{} fov={} buildings={} particles={} auto_rotate={}",
                config.canvas.max_width,
                config.canvas.max_height,
                config.projection.fov,
                config.world.building_count,
                config.particles.count,
                config.camera.auto_rotate
            );
        }
        Commands::Inspect { config, seed } => {
            let config = load_config(config.as_ref())?;
            let world = generate_world(&config, seed);
            println!("{}", WorldInspector::summary(&world));
            if let Some((min, max)) = WorldInspector::particle_bounds(&world) {
                println!("particle bounds: min={min:?} max={max:?}");
            }
        }
        Commands::Project {
            x,
            y,
            z,
            cam_x,
            cam_y,
            cam_z,
            rot_x,
            rot_y,
            width,
            height,
            fov,
        } => {
            let camera = CameraState::at(DVec3::new(cam_x, cam_y, cam_z)).with_rotation(rot_x, rot_y);
            let p = project(
                DVec3::new(x, y, z),
                &camera,
                Viewport::new(width, height),
                fov,
            );
            println!(
                "screen=({:.3}, {:.3}) scale={:.6} in_front={}",
                p.screen.x,
                p.screen.y,
                p.scale,
                p.is_in_front()
            );
        }
        Commands::Render {
            frames,
            seed,
            out,
            width,
            height,
            config,
            no_auto_rotate,
        } => {
            let mut config = load_config(config.as_ref())?;
            if no_auto_rotate {
                config.camera.auto_rotate = false;
            }
            let world = generate_world(&config, seed);

            let mut driver = FrameDriver::new(&config, world, ManualScheduler::new())
                .with_diagnostics(Box::new(TracingSink));
            if width.is_some() || height.is_some() {
                let initial = driver.viewport();
                driver.handle_action(Action::Resize {
                    width: width.unwrap_or(initial.width),
                    height: height.unwrap_or(initial.height),
                });
            }
            let viewport = driver.viewport();
            let mut surface = PixmapSurface::new(viewport.width, viewport.height)?;

            driver.start()?;
            let mut clock = FixedStepClock::sixty_hz();
            let stats = driver.run_frames(frames, &mut clock, &mut surface)?;
            driver.shutdown();

            surface
                .save_png(&out)
                .with_context(|| format!("writing {}", out.display()))?;

            println!("{}", WorldInspector::summary(driver.world()));
            println!(
                "last frame: drawn={} culled={}",
                stats.drawn, stats.culled
            );
            println!("wrote {}x{} to {}", viewport.width, viewport.height, out.display());
        }
    }

    Ok(())
}
