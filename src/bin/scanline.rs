use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scanline::{
    App, ChannelProfile, FrameRecorder, InputScript, LastFramePresenter, RecordOutcome,
    RecreationParameters, RecreationSession, SessionConfig, SourceImage,
};

#[derive(Parser, Debug)]
#[command(name = "scanline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the cropped source and its R/G/B channel images as PNGs.
    Channels(ChannelsArgs),
    /// Print the channel values of one source row as JSON.
    Profile(ProfileArgs),
    /// Keyframe one row and write a single recreation as PNG.
    Recreate(RecreateArgs),
    /// Keyframe one row and record an animated recreation as MP4 (requires `ffmpeg` on PATH).
    Animate(AnimateArgs),
    /// Drive the interactive app from an input script.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pixels with every channel at or below this value count as border.
    #[arg(long, default_value_t = 10)]
    crop_threshold: u8,
}

impl SourceArgs {
    fn load(&self) -> anyhow::Result<SourceImage> {
        let mut source = SourceImage::open(&self.in_path)?;
        source.auto_crop(self.crop_threshold);
        Ok(source)
    }
}

#[derive(Parser, Debug)]
struct ChannelsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ProfileArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Source row (0-based, after cropping).
    #[arg(long)]
    row: i64,
}

#[derive(Parser, Debug)]
struct RecreateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Source row to keyframe.
    #[arg(long)]
    row: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 400)]
    stripe_height: u32,

    /// Horizontal offset.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,

    /// Apply the animation phase.
    #[arg(long)]
    animate: bool,

    /// Animation time (only with `--animate`).
    #[arg(long, default_value_t = 0.0)]
    t: f64,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Source row to keyframe.
    #[arg(long)]
    row: i64,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to record.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    #[arg(long, default_value_t = 400)]
    stripe_height: u32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,

    /// Phase step per frame.
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Directory for intermediate PNG frames.
    #[arg(long, default_value = "frames")]
    frames_dir: PathBuf,

    /// Keep the PNG frames after encoding.
    #[arg(long)]
    keep_frames: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file for UI labels (overrides `font_path` from the config).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Write the last presented frame as PNG.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    initialise_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Channels(args) => cmd_channels(args),
        Command::Profile(args) => cmd_profile(args),
        Command::Recreate(args) => cmd_recreate(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_channels(args: ChannelsArgs) -> anyhow::Result<()> {
    let source = args.source.load()?;
    let channels = source.split_channels();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for (name, img) in [
        ("original", source.pixels()),
        ("red", &channels.red),
        ("green", &channels.green),
        ("blue", &channels.blue),
    ] {
        let path = args.out_dir.join(format!("{name}.png"));
        write_png(img, &path)?;
    }
    eprintln!("wrote {}", args.out_dir.display());
    Ok(())
}

fn cmd_profile(args: ProfileArgs) -> anyhow::Result<()> {
    let source = args.source.load()?;
    let row = source.capture_row(args.row).with_context(|| {
        format!(
            "row {} is outside the source (height {})",
            args.row,
            source.height()
        )
    })?;
    let plot = scanline::Rect::new(0.0, 0.0, row.len().saturating_sub(1) as f64, 255.0);
    let profile = ChannelProfile::for_row(&row, scanline::Channel::Original, plot);
    let json = serde_json::to_string_pretty(&profile).context("serialize profile")?;
    println!("{json}");
    Ok(())
}

fn cmd_recreate(args: RecreateArgs) -> anyhow::Result<()> {
    let source = args.source.load()?;
    let params = RecreationParameters {
        stripe_height: args.stripe_height,
        z_offset: args.offset,
        animating: args.animate,
        t: if args.animate { args.t } else { 0.0 },
        ..RecreationParameters::default()
    };
    let session = RecreationSession::from_row(&source, args.row, params)?;
    session.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let source = args.source.load()?;
    let params = RecreationParameters {
        stripe_height: args.stripe_height,
        z_offset: args.offset,
        animating: true,
        dt: args.dt,
        ..RecreationParameters::default()
    };
    let mut session = RecreationSession::from_row(&source, args.row, params)?;

    let cfg = scanline::RecorderConfig {
        fps: args.fps,
        max_frames: args.frames,
        frames_dir: args.frames_dir,
        out_path: args.out,
        keep_frames: args.keep_frames,
        ..scanline::RecorderConfig::default()
    };
    let mut recorder = FrameRecorder::new(cfg)?;
    let stats = session.record(args.frames, &mut recorder)?;
    report_outcome(&stats.outcome)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };
    if let Some(font) = args.font.clone() {
        config.font_path = Some(font);
    }
    let script = InputScript::from_path(&args.script)?;
    let fps = config.recorder.fps()?;
    let recorder = FrameRecorder::new(config.recorder.clone())?;

    let source = SourceImage::open(&args.in_path)?;
    let mut app = App::new(source, config)?.with_recorder(recorder);
    let mut presenter = LastFramePresenter::new();
    let ticks = app.run(script.frames(fps), &mut presenter)?;
    tracing::info!(ticks, view = ?app.view_kind(), "script finished");

    if let Some(outcome) = app.finish() {
        report_outcome(&outcome)?;
    }
    if let Some(path) = &args.snapshot {
        if presenter.save_png(path)? {
            eprintln!("wrote {}", path.display());
        } else {
            eprintln!("no frame presented; snapshot skipped");
        }
    }
    Ok(())
}

fn report_outcome(outcome: &RecordOutcome) -> anyhow::Result<()> {
    match outcome {
        RecordOutcome::Empty => eprintln!("recording stopped without frames"),
        RecordOutcome::Encoded { frames, out_path } => {
            eprintln!("wrote {} ({frames} frames)", out_path.display());
        }
        RecordOutcome::EncodeFailed {
            frames,
            frames_dir,
            manual_command,
            error,
        } => {
            eprintln!(
                "{frames} frames kept in '{}'; encode manually with:\n  {manual_command}",
                frames_dir.display()
            );
            anyhow::bail!("encoding failed: {error}");
        }
    }
    Ok(())
}

fn write_png(img: &image::RgbaImage, path: &Path) -> anyhow::Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}
