//! BAM sprite container utility.
//!
//! Provides four subcommands:
//! - `info`: print the header, cycle table and frame table of a container.
//! - `unpack`: decode every frame to PNG and write a `metadata.json` describing
//!   the deduplicated animation asset.
//! - `font`: extract the container as a font and print glyph metrics.
//! - `play`: simulate playback of one cycle against a manual clock.
//!
//! Wrapped (`BAMC`) containers are expanded through a disk cache. The cache
//! directory comes from `--cache-dir` or the `BAM_CACHE_DIR` variable and
//! defaults to a `bam_cache` directory under the system temp directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example bam_utils -- info CDMB1G1.BAM
//! cargo run --example bam_utils -- unpack CDMB1G1.BAM -o frames/
//! cargo run --example bam_utils -- font NORMAL.BAM --ascii
//! cargo run --example bam_utils -- play CDMB1G1.BAM 3 --fps 15 --duration 2000
//! ```

use std::{
	fs,
	io::Read,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use bam_rs::prelude::*;
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::info;
use serde::Serialize;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let config = import_config(cli.cache_dir);
	match cli.command {
		Command::Info(opts) => run_info(opts, &config),
		Command::Unpack(opts) => run_unpack(opts, &config),
		Command::Font(opts) => run_font(opts, &config),
		Command::Play(opts) => run_play(opts, &config),
	}
}

#[derive(Parser)]
#[command(name = "bam_utils")]
#[command(author = "bam-rs project")]
#[command(version)]
#[command(about = "Inspect, unpack and play BAM sprite containers", long_about = None)]
struct Cli {
	/// Directory used to cache expanded BAMC containers
	#[arg(long, global = true, env = "BAM_CACHE_DIR", value_name = "DIR")]
	cache_dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display information about a container
	Info(InfoArgs),
	/// Decode every frame to PNG with JSON metadata
	Unpack(UnpackArgs),
	/// Extract the container as a font
	Font(FontArgs),
	/// Simulate playback of a single cycle
	Play(PlayArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Path to a .BAM file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// List every frame entry
	#[arg(short, long, default_value_t = false)]
	detailed: bool,
}

#[derive(Args)]
struct UnpackArgs {
	/// Path to a .BAM file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Output directory (defaults to `<FILE>_frames/`)
	#[arg(short, long, value_name = "DIR")]
	output: Option<PathBuf>,

	/// Also write the palette as a 16x16 PNG
	#[arg(short, long, default_value_t = false)]
	palette: bool,
}

#[derive(Args)]
struct FontArgs {
	/// Path to a .BAM file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Print every glyph as ASCII art
	#[arg(short, long, default_value_t = false)]
	ascii: bool,
}

#[derive(Args)]
struct PlayArgs {
	/// Path to a .BAM file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Cycle to play
	#[arg(value_name = "CYCLE", default_value_t = 0)]
	cycle: usize,

	/// Playback speed in frames per second
	#[arg(long, value_name = "FPS", default_value_t = Animation::DEFAULT_FPS)]
	fps: u32,

	/// Simulated duration in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 1000)]
	duration: u64,

	/// Simulated tick length in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 16)]
	tick: u64,

	/// Stop on the last frame instead of looping
	#[arg(long, default_value_t = false)]
	once: bool,

	/// Play the cycle backwards
	#[arg(long, default_value_t = false)]
	reverse: bool,

	/// Mirror the frames horizontally
	#[arg(long, default_value_t = false)]
	mirror: bool,
}

/// Frame metadata for JSON serialization
#[derive(Debug, Serialize)]
struct FrameMetadata {
	index: usize,
	width: u16,
	height: u16,
	x: i32,
	y: i32,
	filename: String,
}

/// Cycle metadata for JSON serialization
#[derive(Debug, Serialize)]
struct CycleMetadata {
	index: usize,
	first_slot: u16,
	frames: Vec<u16>,
}

/// Complete unpack metadata
#[derive(Debug, Serialize)]
struct Metadata {
	name: String,
	color_key: u8,
	frames: Vec<FrameMetadata>,
	cycles: Vec<CycleMetadata>,
}

fn import_config(cache_dir: Option<PathBuf>) -> ImportConfig {
	let dir = cache_dir.unwrap_or_else(|| std::env::temp_dir().join("bam_cache"));
	ImportConfig::new(dir)
}

fn open(path: &Path, config: &ImportConfig) -> Result<BamFile<std::io::BufReader<fs::File>>> {
	if !path.is_file() {
		bail!("{} is not a file", path.display());
	}
	BamFile::open(path, config).with_context(|| format!("Failed to open {}", path.display()))
}

fn resource_name(path: &Path) -> String {
	path.file_stem().map(|s| s.to_string_lossy().to_uppercase()).unwrap_or_default()
}

fn run_info(args: InfoArgs, config: &ImportConfig) -> Result<()> {
	let signature = read_signature(&args.file)?;
	let format = Format::detect(&signature)
		.with_context(|| format!("Unknown signature {}", hex::encode(signature)))?;
	let bam = open(&args.file, config)?;
	let header = bam.header();

	println!("{}", args.file.display());
	println!("  Format:      {} ({})", format, hex::encode(signature));
	println!("  Source:      {}", if bam.source().is_cached() { "cache" } else { "direct" });
	println!("  {}", header);
	println!("  Color key:   {}", bam.color_key());
	println!("  Frames:      {}", bam.frame_count());
	println!("  Cycles:      {}", bam.cycle_count());

	for (index, cycle) in bam.cycles().iter().enumerate() {
		println!("  cycle {:3}: {}", index, cycle);
	}

	if args.detailed {
		for (index, frame) in bam.frames().iter().enumerate() {
			println!("  frame {:4}: {}", index, frame);
		}
	}

	Ok(())
}

fn read_signature(path: &Path) -> Result<[u8; 8]> {
	let mut signature = [0u8; 8];
	let mut file = fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
	file.read_exact(&mut signature).context("File too short for a signature")?;
	Ok(signature)
}

fn run_unpack(args: UnpackArgs, config: &ImportConfig) -> Result<()> {
	let name = resource_name(&args.file);
	let output = args.output.unwrap_or_else(|| args.file.with_file_name(format!("{}_frames", name)));
	fs::create_dir_all(&output)
		.with_context(|| format!("Failed to create {}", output.display()))?;

	let mut bam = open(&args.file, config)?;
	let renderer = SoftwareRenderer;

	if args.palette {
		save_png(&bam.palette_sprite(&renderer), &output.join("palette.png"))?;
	}

	let factory = bam.animation_factory(&renderer, &name)?;
	let mut frames = Vec::with_capacity(factory.frame_count());
	for (index, sprite) in factory.frames().iter().enumerate() {
		let filename = format!("frame_{:04}.png", index);
		if !sprite.is_empty() {
			save_png(sprite, &output.join(&filename))?;
		}
		frames.push(FrameMetadata {
			index,
			width: sprite.width(),
			height: sprite.height(),
			x: sprite.x(),
			y: sprite.y(),
			filename,
		});
	}

	let lookup = factory.lookup_table();
	let cycles = factory
		.cycles()
		.iter()
		.enumerate()
		.map(|(index, cycle)| CycleMetadata {
			index,
			first_slot: cycle.first_frame,
			frames: lookup[cycle.range()].to_vec(),
		})
		.collect();

	let metadata = Metadata {
		name,
		color_key: bam.color_key(),
		frames,
		cycles,
	};
	let json = serde_json::to_string_pretty(&metadata)?;
	fs::write(output.join("metadata.json"), json)?;

	info!(
		"unpacked {} distinct frames in {} cycles to {}",
		factory.frame_count(),
		factory.cycle_count(),
		output.display()
	);
	Ok(())
}

fn save_png(sprite: &Sprite, path: &Path) -> Result<()> {
	let image = RgbaImage::from_raw(sprite.width() as u32, sprite.height() as u32, sprite.to_rgba())
		.context("Failed to create frame image")?;
	image.save(path).with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

fn run_font(args: FontArgs, config: &ImportConfig) -> Result<()> {
	let mut bam = open(&args.file, config)?;
	let font = bam.font()?;

	println!("{}", args.file.display());
	println!("  Glyphs:       {}", font.len());
	println!("  Total width:  {}", font.total_width());
	println!("  Max height:   {}", font.max_height());

	for (index, glyph) in font.iter().enumerate() {
		if glyph.is_empty() {
			println!("  glyph {:3}: <empty>", index);
			continue;
		}
		println!(
			"  glyph {:3}: {}x{} at ({}, {})",
			index,
			glyph.width(),
			glyph.height(),
			glyph.x(),
			glyph.y()
		);
		if args.ascii {
			println!("{}", glyph.to_ascii_art(font.color_key(), '#', '.'));
		}
	}

	Ok(())
}

fn run_play(args: PlayArgs, config: &ImportConfig) -> Result<()> {
	if args.tick == 0 {
		bail!("--tick must be greater than zero");
	}

	let mut bam = open(&args.file, config)?;
	let factory = bam.animation_factory(&SoftwareRenderer, &resource_name(&args.file))?;
	let Some(mut animation) = factory.animation(args.cycle) else {
		bail!("cycle {} not found ({} cycles)", args.cycle, factory.cycle_count());
	};

	animation.set_fps(args.fps);
	animation.set_play_once(args.once);
	animation.set_reversed(args.reverse);
	if args.mirror {
		animation.mirror(&SoftwareRenderer);
	}

	println!("cycle {} with {} frames, area {}", args.cycle, animation.len(), animation.area());

	let clock = ManualClock::new(0);
	let mut sequence = Vec::new();
	let mut elapsed = 0;
	while elapsed <= args.duration {
		let index = animation.current_frame_index();
		let completed = animation.state() == PlaybackState::Completed;
		if animation.next_frame(&clock).is_none() {
			println!("  {:6} ms: <no frame>", elapsed);
		}
		sequence.push(index);
		if completed {
			println!("  completed at {} ms", elapsed);
			break;
		}
		clock.advance(args.tick);
		elapsed += args.tick;
	}

	sequence.dedup();
	println!("  sequence: {:?}", sequence);
	Ok(())
}
