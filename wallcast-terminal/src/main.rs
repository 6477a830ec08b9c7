/// wallcast terminal renderer
///
/// Walk through a wall map in the terminal, or print a single frame.
/// Controls (run mode):
///   - W/S / Up/Down: Move forward and back
///   - A/D / Left/Right: Turn
///   - Z/C: Strafe
///   - Q/ESC: Quit
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wallcast_core::level::DEFAULT_CELL_SIZE;
use wallcast_core::{Camera, Level, Renderer, RendererConfig};
use wallcast_terminal::{TerminalApp, TerminalCanvas};

const DEFAULT_FOV_DEGREES: f32 = 75.0;

#[derive(Parser)]
#[command(name = "wallcast-terminal", about = "2.5D wall renderer for the terminal")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through a map interactively (default)
    Run {
        #[command(flatten)]
        scene: SceneArgs,
        /// Write logs to this file; logging is off otherwise
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Render one frame from the spawn point and print it
    Snapshot {
        #[command(flatten)]
        scene: SceneArgs,
        /// Width in terminal columns
        #[arg(long, default_value = "80")]
        width: u16,
        /// Height in terminal rows
        #[arg(long, default_value = "24")]
        height: u16,
        /// Camera yaw in radians
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        yaw: f32,
    },
    /// Print the effective renderer config as YAML
    Config {
        /// Config file to merge over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SceneArgs {
    /// ASCII map file; the built-in demo map is used otherwise
    #[arg(long)]
    map: Option<PathBuf>,
    /// Renderer config (YAML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = DEFAULT_FOV_DEGREES)]
    fov: f32,
}

impl SceneArgs {
    fn load(&self) -> anyhow::Result<(Level, RendererConfig)> {
        let level = match &self.map {
            Some(path) => Level::load(path, DEFAULT_CELL_SIZE)
                .with_context(|| format!("failed to load map {}", path.display()))?,
            None => Level::demo().context("failed to parse the demo map")?,
        };
        let config = match &self.config {
            Some(path) => RendererConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RendererConfig::default(),
        };
        tracing::info!(
            meshes = level.meshes.len(),
            faces = level.face_count(),
            "level loaded"
        );
        Ok((level, config))
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn init_file_logging(path: &Path, verbose: bool) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        scene: SceneArgs {
            map: None,
            config: None,
            fov: DEFAULT_FOV_DEGREES,
        },
        log_file: None,
    });

    match command {
        Commands::Run { scene, log_file } => {
            // The alternate screen owns the terminal, so logs only go to a file.
            if let Some(path) = &log_file {
                init_file_logging(path, cli.verbose)?;
            }

            let (level, config) = scene.load()?;
            let mut app = TerminalApp::new(level, config, scene.fov)?;
            app.run().context("terminal session failed")?;
            tracing::info!("session ended");
        }
        Commands::Snapshot {
            scene,
            width,
            height,
            yaw,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(cli.verbose))
                .with_writer(io::stderr)
                .init();

            let (level, config) = scene.load()?;
            let mut canvas = TerminalCanvas::for_terminal(width, height);
            let renderer =
                Renderer::with_config(config, canvas.width() as u32, canvas.height() as u32);
            let mut camera =
                level.spawn_camera(Camera::focal_length_for(canvas.width() as f32, scene.fov));
            camera.rotation = yaw;

            let stats = renderer.render(&level.meshes, &camera, &mut canvas);
            tracing::info!(
                faces_drawn = stats.faces_drawn,
                faces_culled = stats.faces_culled,
                faces_clipped = stats.faces_clipped,
                "snapshot rendered"
            );

            let mut stdout = io::stdout().lock();
            canvas.draw(&mut stdout)?;
            writeln!(stdout)?;
            stdout.flush()?;
        }
        Commands::Config { config } => {
            let config = match &config {
                Some(path) => RendererConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => RendererConfig::default(),
            };
            let text = config.to_yaml_string().context("failed to serialize config")?;
            print!("{text}");
        }
    }

    Ok(())
}
