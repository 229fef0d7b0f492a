use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use molview_common::Molecule;
use molview_input::{OrbitCamera, PointerAction};
use molview_render::{DebugTextRenderer, RenderView, Renderer};
use molview_settings::{ConfigFormat, LoadError, RenderConfig, ValidatedConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "molview-cli", about = "Inspect and check molview render settings")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective settings
    Show {
        #[command(flatten)]
        source: Source,
        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: Format,
    },
    /// Check the settings and report every problem found
    Validate {
        #[command(flatten)]
        source: Source,
    },
    /// Write the default settings to a .yaml/.yml/.json file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Render the sample water molecule with the text renderer
    Preview {
        #[command(flatten)]
        source: Source,
        /// Scroll steps applied after framing (positive zooms in)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        zoom: f32,
        /// Horizontal drag in pixels applied after framing
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        drag: f32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for ConfigFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Yaml => ConfigFormat::Yaml,
            Format::Json => ConfigFormat::Json,
        }
    }
}

/// Where settings come from: an optional file, then per-field overrides.
#[derive(Args)]
struct Source {
    /// Settings file (.yaml, .yml or .json); defaults are used without one
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    framebuffer_side: Option<u32>,
    #[arg(long, allow_hyphen_values = true)]
    tessellation_level: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    shininess: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    fov: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    near: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    far: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    min_zoom: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    rotate_sensitivity: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    zoom_sensitivity: Option<f32>,
}

impl Source {
    /// The config before validation.
    fn resolve(&self) -> Result<RenderConfig, LoadError> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load_from_path(path)?,
            None => RenderConfig::default(),
        };
        if let Some(v) = self.framebuffer_side {
            config.framebuffer_side = v;
        }
        if let Some(v) = self.tessellation_level {
            config.tessellation_level = v;
        }
        if let Some(v) = self.shininess {
            config.material.shininess = v;
        }
        if let Some(v) = self.fov {
            config.camera.fov_degrees = v;
        }
        if let Some(v) = self.near {
            config.camera.near_plane = v;
        }
        if let Some(v) = self.far {
            config.camera.far_plane = v;
        }
        if let Some(v) = self.min_zoom {
            config.camera.min_zoom_distance = v;
        }
        if let Some(v) = self.rotate_sensitivity {
            config.mouse.rotate_sensitivity = v;
        }
        if let Some(v) = self.zoom_sensitivity {
            config.mouse.zoom_sensitivity = v;
        }
        Ok(config)
    }

    fn validated(&self) -> anyhow::Result<ValidatedConfig> {
        Ok(self.resolve()?.validated()?)
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
            println!("molview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "tessellation levels: {}",
                molview_settings::MAX_TESSELLATION_LEVELS
            );
        }
        Commands::Show { source, format } => {
            let config = source.resolve()?;
            print!("{}", config.to_string_as(format.into())?);
        }
        Commands::Validate { source } => {
            let config = source.resolve()?;
            for warning in config.warnings() {
                println!("warning: {warning}");
            }
            match config.validate() {
                Ok(()) => println!("OK"),
                Err(e) => {
                    for v in &e.violations {
                        println!("error: {v}");
                    }
                    anyhow::bail!("{} setting(s) failed validation", e.violations.len());
                }
            }
        }
        Commands::Init { path, force } => init(&path, force)?,
        Commands::Preview { source, zoom, drag } => {
            let config = source.validated()?;
            let water = Molecule::water();

            let mut camera = OrbitCamera::new(&config, 1.0);
            camera.frame(water.centroid(), water.bounding_radius());
            let viewport = config.framebuffer_side() as f32;
            camera.apply(PointerAction::Zoom(zoom), viewport);
            camera.apply(PointerAction::Rotate { dx: drag, dy: 0.0 }, viewport);

            let view = RenderView {
                eye: camera.eye(),
                target: camera.target,
                fov_degrees: camera.fov_degrees(),
            };
            print!("{}", DebugTextRenderer::new(config).render(&water, &view));
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} exists; pass --force to overwrite", path.display());
    }
    RenderConfig::default()
        .save_to_path(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default render settings");
    Ok(())
}
