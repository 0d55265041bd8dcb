use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};

use sprite_sheet_animator::core::reshape;
use sprite_sheet_animator::export::{FsAssetStore, GenerationReport, MemoryAssetStore, SheetFrames};
use sprite_sheet_animator::preview::preview_rows;
use sprite_sheet_animator::sheet::open_sheet;
use sprite_sheet_animator::{AnimationDefinition, ExportSettings, Generator, ProjectConfig};

/// Batch-generate animation clips and controllers from sprite sheets
#[derive(Parser)]
#[command(name = "sheet-animator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create clips, a controller and override controllers for a project
    Generate {
        /// Path to the project TOML file
        config: PathBuf,

        /// Build everything in memory without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which frames every animation row picks in each variant
    Preview {
        /// Path to the project TOML file
        config: PathBuf,

        /// Only show this row instead of every configured animation
        #[arg(long)]
        row: Option<usize>,
    },

    /// List the frames of a single sheet in collated order
    Frames {
        /// Image file or directory of frame images
        sheet: PathBuf,

        /// Cell size for image sheets, e.g. 64x64
        #[arg(long, value_parser = parse_cell)]
        cell: Option<(u32, u32)>,
    },
}

fn parse_cell(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = width.trim().parse().map_err(|e| format!("bad width: {}", e))?;
    let height = height.trim().parse().map_err(|e| format!("bad height: {}", e))?;
    Ok((width, height))
}

fn load_sheet(settings: &ExportSettings, cell: Option<(u32, u32)>) -> Result<SheetFrames> {
    let source = open_sheet(&settings.sheet, cell)
        .with_context(|| format!("Failed to open sheet {}", settings.sheet.display()))?;
    let frames = source
        .list_frames()
        .with_context(|| format!("Failed to list frames of {}", settings.sheet.display()))?;

    info!("Loaded {} frames from {}", frames.len(), source.name());

    Ok(SheetFrames {
        name: source.name().to_string(),
        settings: settings.clone(),
        frames,
    })
}

fn load_project(path: &Path) -> Result<(ProjectConfig, SheetFrames, Vec<SheetFrames>)> {
    let config = ProjectConfig::load(path)
        .with_context(|| format!("Failed to load project {}", path.display()))?;

    let cell = config.cell_size();
    let main = load_sheet(&config.main, cell)?;
    let overrides = config
        .overrides
        .iter()
        .map(|settings| load_sheet(settings, cell))
        .collect::<Result<Vec<_>>>()?;

    Ok((config, main, overrides))
}

fn print_report(report: &GenerationReport) {
    println!(
        "{} clips, {} controllers, {} override controllers, {} rows skipped",
        report.clips, report.controllers, report.override_controllers, report.skipped_rows
    );
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
}

fn generate(path: &Path, dry_run: bool) -> Result<()> {
    let (config, main, overrides) = load_project(path)?;
    let generator = Generator::new(&config.grid, &config.animations);

    let report = if dry_run {
        info!("Dry run, nothing will be written");
        generator.generate(&mut MemoryAssetStore::new(), &main, &overrides)?
    } else {
        generator.generate(&mut FsAssetStore::new(), &main, &overrides)?
    };

    print_report(&report);
    Ok(())
}

fn preview(path: &Path, row: Option<usize>) -> Result<()> {
    let (config, main, overrides) = load_project(path)?;

    let animations = match row {
        Some(row) => vec![AnimationDefinition::new(&format!("row {}", row), row)],
        None => config.animations.clone(),
    };

    let mut flagged = 0;
    for sheet in std::iter::once(&main).chain(overrides.iter()) {
        let grids = reshape(&sheet.frames, config.grid.width, config.grid.height)?;
        println!("{} ({} variants)", sheet.name, grids.len());

        for animation in &animations {
            println!("  {} (row {})", animation.name, animation.row);
            for line in preview_rows(&grids, animation.row) {
                if !line.is_valid() {
                    flagged += 1;
                }
                println!("    {}", line);
            }
        }
    }

    if flagged > 0 {
        warn!("{} rows could not be previewed", flagged);
    }
    Ok(())
}

fn frames(path: &Path, cell: Option<(u32, u32)>) -> Result<()> {
    let source = open_sheet(path, cell)
        .with_context(|| format!("Failed to open sheet {}", path.display()))?;
    let frames = source.list_frames()?;

    if frames.is_empty() {
        bail!("{} contains no frames", source.name());
    }

    for frame in &frames {
        let r = &frame.region;
        println!("{}\t{},{}\t{}x{}", frame.name, r.x, r.y, r.width, r.height);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    // RUST_LOG wins over -v when set
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Generate { config, dry_run } => generate(&config, dry_run),
        Commands::Preview { config, row } => preview(&config, row),
        Commands::Frames { sheet, cell } => frames(&sheet, cell),
    }
}
