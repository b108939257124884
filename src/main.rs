//! qesview - inspect QES datasets and color ramps from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::{Color, Stylize};
use qesview::color::{ColorRamp, ColorRampRegistry};
use qesview::config::ViewerConfig;
use qesview::data::{SampleStats, VariableKind};
use qesview::report;
use qesview::session::{Playback, QesSettings};
use qesview::shade::SurfaceShading;
use qesview::visualization::{select_variable, selectable_variables, Visualization};
use qesview::volume::VolumeRendering;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "qesview")]
#[command(about = "Inspect QES environmental simulation datasets", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Log debug output as well
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the dataset in a directory
    Info {
        /// Dataset directory
        dir: PathBuf,
    },
    /// Print statistics and colors for one variable at one timestep
    Sample {
        /// Dataset directory
        dir: PathBuf,
        /// Variable short name
        variable: String,
        /// Timestep to read
        #[arg(short, long, default_value_t = 0)]
        timestep: usize,
        /// Color ramp used for the printed colors
        #[arg(long)]
        ramp: Option<String>,
        /// Number of leading samples to print
        #[arg(long, default_value_t = 8)]
        show: usize,
    },
    /// List the variables each visualization can display
    Vars {
        /// Dataset directory
        dir: PathBuf,
    },
    /// List the bundled color ramps
    Ramps,
    /// Print a color ramp resampled to evenly spaced colors
    Ramp {
        /// Ramp name
        name: String,
        /// Number of samples
        #[arg(short, long, default_value_t = 16)]
        samples: usize,
        /// Do not draw color swatches
        #[arg(long)]
        plain: bool,
    },
    /// Play through the timesteps of a dataset
    Play {
        /// Dataset directory
        dir: PathBuf,
        /// Maximum number of clock ticks to simulate
        #[arg(long, default_value_t = 100)]
        frames: usize,
        /// Seconds of simulated wall time per tick
        #[arg(long)]
        step: Option<f32>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        init_logging(log_path, args.verbose)?;
        tracing::info!("Starting qesview");
    }

    let config = ViewerConfig::default();
    let result = match args.command {
        Command::Info { dir } => run_info(&dir, &config),
        Command::Sample {
            dir,
            variable,
            timestep,
            ramp,
            show,
        } => {
            let ramp = ramp.unwrap_or_else(|| config.color.default_ramp.clone());
            run_sample(&dir, &variable, timestep, &ramp, show, &config)
        },
        Command::Vars { dir } => run_vars(&dir, &config),
        Command::Ramps => run_ramps(),
        Command::Ramp {
            name,
            samples,
            plain,
        } => run_ramp(&name, samples, plain),
        Command::Play { dir, frames, step } => {
            let step = step.unwrap_or(config.playback.seconds_per_frame);
            run_play(&dir, frames, step, &config)
        },
    };

    if args.log.is_some() {
        tracing::info!("qesview exited");
    }

    result
}

fn init_logging(log_path: &Path, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load(dir: &Path, config: &ViewerConfig) -> Result<QesSettings> {
    let mut settings = QesSettings::with_manifest_name(config.dataset.manifest_name.as_str());
    settings
        .load_directory(dir)
        .with_context(|| format!("Failed to load dataset {}", dir.display()))?;
    Ok(settings)
}

fn run_info(dir: &Path, config: &ViewerConfig) -> Result<()> {
    let settings = load(dir, config)?;
    let reader = settings.reader().context("No dataset loaded")?;
    let title = dir.file_name().map(|n| n.to_string_lossy().to_string());
    print!("{}", report::summarize(reader, title.as_deref()));
    Ok(())
}

fn run_sample(
    dir: &Path,
    variable: &str,
    timestep: usize,
    ramp_name: &str,
    show: usize,
    config: &ViewerConfig,
) -> Result<()> {
    let ramps = ColorRampRegistry::bundled()?;
    let ramp = ramps.get(ramp_name)?;

    let mut settings = load(dir, config)?;
    settings.seek_clamped(timestep);
    let reader = settings.reader().context("No dataset loaded")?;
    let var = reader.variable(variable)?;
    let timestep = settings.current_timestep();

    let data = reader.patch_data(&var.name, timestep)?;
    let stats = SampleStats::compute(&data);

    println!("{} ({}) at timestep {}", var.name, var.kind.name(), timestep);
    if let Some(ts) = reader.timestamps().get(timestep) {
        println!("time:    {}", ts);
    }
    println!("samples: {} ({} finite)", stats.count, stats.valid_count);
    if let Some((min, max)) = stats.min_max {
        println!("min/max: {} .. {} {}", min, max, var.unit);
    }
    if let Some(mean) = stats.mean {
        println!("mean:    {:.4}", mean);
    }
    println!("range:   {} .. {} (variable)", var.min, var.max);

    for (i, &value) in data.iter().take(show).enumerate() {
        let t = var.normalize(value);
        println!("[{:>4}] {:>12.4} -> {:>7.4} {}", i, value, t, ramp.value(t).to_hex());
    }

    match var.kind {
        VariableKind::Patch => {
            let mut shading = SurfaceShading::new();
            select_variable(reader, &mut shading, &var.name)?;
            let faces = shading.face_colors(reader, timestep, ramp)?;
            let first_building_face = reader
                .buildings()
                .first()
                .is_some_and(|b| !b.faces().is_empty());
            if let Some(colors) = faces.first().filter(|_| first_building_face) {
                let hex: Vec<String> = colors.iter().map(|c| c.to_hex()).collect();
                println!("building 0 face 0: {}", hex.join(" "));
            }
        },
        VariableKind::Aircell => {
            let mut volume = VolumeRendering::new(config.volume.clone());
            select_variable(reader, &mut volume, &var.name)?;
            let tex = volume.texture(reader, timestep)?;
            let (w, h, d) = tex.dims();
            let extent = tex.relative_extent();
            println!(
                "volume texture: {} x {} x {} (data fills {:.3}, {:.3}, {:.3})",
                w, h, d, extent.x, extent.y, extent.z
            );
        },
    }

    Ok(())
}

fn run_vars(dir: &Path, config: &ViewerConfig) -> Result<()> {
    let settings = load(dir, config)?;
    let reader = settings.reader().context("No dataset loaded")?;

    let shading = SurfaceShading::new();
    let volume = VolumeRendering::new(config.volume.clone());
    let visualizations: [&dyn Visualization; 2] = [&shading, &volume];
    for vis in visualizations {
        let choices = selectable_variables(reader, vis);
        println!("{} ({})", vis.name(), vis.variable_kind().name());
        for name in &choices.names {
            let var = reader.variable(name)?;
            println!("    {} - {} [{}]", name, var.long_name, var.unit);
        }
    }
    Ok(())
}

fn run_ramps() -> Result<()> {
    let ramps = ColorRampRegistry::bundled()?;
    for name in ramps.names() {
        println!("{}", name);
    }
    Ok(())
}

fn run_ramp(name: &str, samples: usize, plain: bool) -> Result<()> {
    let ramps = ColorRampRegistry::bundled()?;
    let ramp: &ColorRamp = ramps.get(name)?;

    for (i, color) in ramp.ramp(samples).into_iter().enumerate() {
        if plain {
            println!("{:>4} {}", i, color.to_hex());
        } else {
            let [r, g, b] = color.to_rgb8();
            println!("{:>4} {} {}", i, "    ".on(Color::Rgb { r, g, b }), color.to_hex());
        }
    }
    Ok(())
}

fn run_play(dir: &Path, frames: usize, step: f32, config: &ViewerConfig) -> Result<()> {
    let mut settings = load(dir, config)?;

    settings.timestep_changed.subscribe(|view| {
        let t = view.current_timestep();
        match view.reader().and_then(|r| r.timestamps().get(t)) {
            Some(ts) => println!("timestep {} {}", t, ts),
            None => println!("timestep {}", t),
        }
    });

    let mut playback = Playback::new(config.playback.seconds_per_frame);
    playback.attach(&mut settings);
    playback.play();

    for _ in 0..frames {
        playback.tick(step, &mut settings);
        if !playback.is_playing() {
            break;
        }
    }

    println!("stopped at timestep {}", settings.current_timestep());
    Ok(())
}
