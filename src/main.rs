//! Terminal front end for the toroidal Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use toroidal_life::{
    config::{CliOverrides, OutputFormat, Settings},
    life::{create_example_grids, load_grid_from_file, save_grid_to_file, GridState, LifeEngine},
    utils::{ColorOutput, GridFormatter},
    Simulation,
};

#[derive(Parser)]
#[command(name = "toroidal_life")]
#[command(about = "Conway's Game of Life on a wrap-around grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate a simulation in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Start from a pattern file instead of a random grid
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of host ticks to run
        #[arg(short, long, default_value_t = 200)]
        ticks: u64,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<i64>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<i64>,

        /// Seed probability (overrides config)
        #[arg(long)]
        probability: Option<f64>,

        /// Random seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds per generation (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Advance a pattern file by a number of generations
    Step {
        /// Pattern file to start from
        #[arg(short, long)]
        input: PathBuf,

        /// Generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Directory to save the result in
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for the saved result
        #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,

        /// Print every intermediate generation
        #[arg(long)]
        show_evolution: bool,
    },

    /// Write a randomly seeded grid to a pattern file
    Seed {
        #[arg(long, default_value_t = 40)]
        width: i64,

        #[arg(long, default_value_t = 40)]
        height: i64,

        /// Chance for each cell to start alive
        #[arg(short, long, default_value_t = 0.1)]
        probability: f64,

        /// Random seed
        #[arg(short, long)]
        seed: u64,

        /// Output pattern file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Visual,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Visual => OutputFormat::Visual,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config, pattern, ticks, width, height, probability, seed, interval,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                seed_probability: probability,
                step_interval_ms: interval,
                rng_seed: seed,
                output_dir: None,
            };
            run_command(config, pattern, ticks, overrides)
        }
        Commands::Step { input, generations, output, format, show_evolution } => {
            step_command(input, generations, output, format.into(), show_evolution)
        }
        Commands::Seed { width, height, probability, seed, output } => {
            seed_command(width, height, probability, seed, output)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    pattern: Option<PathBuf>,
    ticks: u64,
    overrides: CliOverrides,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let mut sim = Simulation::new(&settings).context("Failed to create simulation")?;
    if let Some(path) = pattern {
        let grid = load_grid_from_file(&path)?;
        sim.load_grid(grid);
    }
    if !sim.is_running() {
        sim.start();
    }

    let frame_time = settings.simulation.step_interval();
    let mut last = Instant::now();
    for _ in 0..ticks {
        std::thread::sleep(frame_time);
        let now = Instant::now();
        let advanced = sim.tick(now - last);
        last = now;

        if advanced > 0 {
            // Clear screen and home the cursor before redrawing
            print!("\x1b[2J\x1b[H");
            print!("{}", GridFormatter::format_frame(sim.grid(), sim.generation()));
        }
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Stopped at generation {} with {} living cells",
            sim.generation(),
            sim.grid().living_count()
        ))
    );
    Ok(())
}

fn step_command(
    input: PathBuf,
    generations: u64,
    output: Option<PathBuf>,
    format: OutputFormat,
    show_evolution: bool,
) -> Result<()> {
    let mut grid = load_grid_from_file(&input)?;
    println!("{}", ColorOutput::info(&format!("Loaded {}x{} grid", grid.width(), grid.height())));

    if show_evolution {
        println!("{}", GridFormatter::format_frame(&grid, 0));
    }

    let start_time = Instant::now();
    for generation in 1..=generations {
        LifeEngine::step(&mut grid);
        if show_evolution {
            println!("{}", GridFormatter::format_frame(&grid, generation));
        }
    }
    let elapsed: Duration = start_time.elapsed();

    if !show_evolution {
        println!("{}", GridFormatter::format_frame(&grid, generations));
    }
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Advanced {} generation(s) in {:.3}s",
            generations,
            elapsed.as_secs_f64()
        ))
    );

    if let Some(dir) = output {
        let path = GridFormatter::save_generation(&grid, generations, &dir, format)
            .context("Failed to save result")?;
        println!("Saved: {}", path.display());
    }

    Ok(())
}

fn seed_command(width: i64, height: i64, probability: f64, seed: u64, output: PathBuf) -> Result<()> {
    let mut grid = GridState::create(width, height)?;
    grid.reseed(probability, &mut StdRng::seed_from_u64(seed))?;
    save_grid_to_file(&grid, &output)?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Wrote {}x{} grid with {} living cells to {}",
            width,
            height,
            grid.living_count(),
            output.display()
        ))
    );
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("input/patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // A slower, reproducible variant
    let mut reproducible = Settings::default();
    reproducible.simulation.step_interval_ms = 250;
    reproducible.simulation.rng_seed = Some(2013);
    reproducible.grid.seed_probability = 0.25;
    reproducible.to_file(&config_dir.join("examples/reproducible.yaml"))?;

    create_example_grids(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: cargo run -- run --pattern {}", patterns_dir.join("glider.txt").display());
    Ok(())
}
