mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use collage_core::raster::{self, DEFAULT_JPEG_QUALITY};
use collage_core::{Collage, ImageSize, Layout, RenderOptions};
use image::{DynamicImage, ImageFormat};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use walkdir::WalkDir;

use config::{CanvasChoice, Config};
use logging::LogLevel;

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out random tile mosaics and compose photo collages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// TOML file with default board settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log verbosity on stderr
    #[arg(long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a random tile layout for the chosen canvas
    Layout(LayoutArgs),
    /// Place photos on a random layout and write the collage as JPEG
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    board: BoardSettings,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Photo files or directories of photos, placed in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output JPEG path
    #[arg(short, long)]
    output: PathBuf,
    /// JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u8>,
    #[command(flatten)]
    board: BoardSettings,
}

#[derive(Args, Debug, Clone)]
struct BoardSettings {
    /// Canvas size preset
    #[arg(long, value_enum)]
    canvas: Option<CanvasChoice>,
    /// Multiplier applied to the preset's base tile size
    #[arg(long)]
    tile_multiplier: Option<u32>,
    /// Seed for the layout generator; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

/// Board settings after merging flags over the config file.
#[derive(Debug, Clone, Copy)]
struct ResolvedBoard {
    canvas: CanvasChoice,
    multiplier: u32,
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log_level).context("failed to install logger")?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Layout(args) => layout(args, &config),
        Commands::Compose(args) => compose(args, &config),
    }
}

fn layout(args: LayoutArgs, config: &Config) -> Result<()> {
    let board = args.board.resolve(config);
    let mut rng = StdRng::seed_from_u64(board.seed);
    let spec = board.canvas.to_preset().spec();
    let collage = Collage::<ImageSize>::new(spec, board.multiplier, &mut rng)
        .context("failed to build board")?;

    print_layout(collage.layout(), board.seed);
    Ok(())
}

fn print_layout(layout: &Layout, seed: u64) {
    let grid = layout.board();
    println!(
        "{}x{} cells of {} px, {} tiles (seed {})",
        grid.width(),
        grid.height(),
        grid.cell_px(),
        layout.len(),
        seed
    );
    for (index, tile) in layout.tiles().iter().enumerate() {
        let rect = tile.rect;
        println!(
            "{:>3}  {:<5} x={:<5} y={:<5} w={:<5} h={}",
            index,
            format!("{:?}", tile.shape),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }
    println!();
    print!("{}", layout.render_ascii());
}

fn compose(args: ComposeArgs, config: &Config) -> Result<()> {
    let board = args.board.resolve(config);
    let quality = args.quality.or(config.quality).unwrap_or(DEFAULT_JPEG_QUALITY);
    let mut rng = StdRng::seed_from_u64(board.seed);
    let mut collage = Collage::new(board.canvas.to_preset().spec(), board.multiplier, &mut rng)
        .context("failed to build board")?;
    info!("composing on {} tiles (seed {})", collage.tile_count(), board.seed);

    let paths = collect_inputs(&args.inputs)?;
    let photos = decode_photos(&paths)?;
    if photos.is_empty() {
        anyhow::bail!("no decodable photos among {} input files", paths.len());
    }

    let total = photos.len();
    let mut placed = 0;
    for photo in photos {
        if collage.add_image(photo).is_err() {
            break;
        }
        placed += 1;
    }
    if placed < total {
        warn!("board holds {} tiles, {} photos left out", collage.tile_count(), total - placed);
    }

    let canvas = raster::render(&collage.frame(), &RenderOptions::default());
    raster::save_jpeg(&canvas, &args.output, quality)
        .with_context(|| format!("failed to write {:?}", args.output))?;

    println!("Collage of {} photos written to {:?} (seed {})", placed, args.output, board.seed);
    Ok(())
}

/// Expand directories and drop files that are not images by extension.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.path().to_path_buf())
                .collect();
            entries.sort();
            paths.extend(entries);
        } else if input.is_file() {
            paths.push(input.clone());
        } else {
            anyhow::bail!("input {:?} does not exist", input);
        }
    }

    paths.retain(|path| {
        let keep = is_image_path(path);
        if !keep {
            debug!("skipping non-image file {:?}", path);
        }
        keep
    });
    Ok(paths)
}

fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

fn decode_photos(paths: &[PathBuf]) -> Result<Vec<Arc<DynamicImage>>> {
    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} photos",
        )?
        .progress_chars("=> "),
    );

    let mut photos = Vec::with_capacity(paths.len());
    for path in paths {
        match image::open(path) {
            Ok(image) => photos.push(Arc::new(image)),
            Err(err) => warn!("failed to decode {:?}: {err}", path),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(photos)
}

impl BoardSettings {
    fn resolve(&self, config: &Config) -> ResolvedBoard {
        let seed = self.seed.or(config.seed).unwrap_or_else(rand::random);
        ResolvedBoard {
            canvas: self.canvas.or(config.canvas).unwrap_or_default(),
            multiplier: self.tile_multiplier.or(config.tile_multiplier).unwrap_or(1),
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = Config {
            canvas: Some(CanvasChoice::Wide),
            tile_multiplier: Some(2),
            seed: Some(7),
            quality: None,
        };
        let settings =
            BoardSettings { canvas: Some(CanvasChoice::Small), tile_multiplier: None, seed: None };

        let resolved = settings.resolve(&config);
        assert_eq!(resolved.canvas, CanvasChoice::Small);
        assert_eq!(resolved.multiplier, 2);
        assert_eq!(resolved.seed, 7);
    }

    #[test]
    fn non_image_extensions_are_filtered() {
        assert!(is_image_path(Path::new("holiday/beach.JPG")));
        assert!(is_image_path(Path::new("scan.png")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("README")));
    }

    #[test]
    fn cli_parses_compose_arguments() {
        let cli = Cli::try_parse_from([
            "collage", "compose", "a.jpg", "photos", "-o", "out.jpg", "--canvas", "wide",
            "--seed", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Compose(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert_eq!(args.board.canvas, Some(CanvasChoice::Wide));
                assert_eq!(args.board.seed, Some(3));
            },
            other => panic!("unexpected command {other:?}"),
        }
    }
}
