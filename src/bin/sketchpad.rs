use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sketchpad", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded event script and write the final canvas as a PNG.
    Replay(ReplayArgs),
    /// Place an image on a blank canvas the way a drop/open does, and write the result.
    Place(PlaceArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write save shortcuts as numbered files into this directory instead of discarding them.
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Input image (PNG/JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Fraction of each canvas side the image may occupy.
    #[arg(long)]
    fit: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Place(args) => cmd_place(args),
    }
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = sketchpad::SketchScript::from_path(&args.in_path)?;
    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let bridge: Box<dyn sketchpad::FileBridge> = match &args.save_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create save dir '{}'", dir.display()))?;
            Box::new(sketchpad::DirectFilesystemBridge::new(dir))
        }
        None => Box::new(sketchpad::SandboxedBridge::new()),
    };
    let mut pad = sketchpad::Sketchpad::new(script.canvas, script.opts.clone(), bridge)?;
    let stats = sketchpad::replay(&mut pad, &script.events, assets_root)?;

    let png = pad.export_png()?;
    write_png(&args.out, &png)?;
    eprintln!(
        "wrote {} ({} events, {} strokes, {} saves)",
        args.out.display(),
        stats.events,
        stats.strokes,
        stats.saves
    );
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;

    let mut opts = sketchpad::SketchOpts::default();
    if let Some(fit) = args.fit {
        opts.import_fit = fit;
    }
    let canvas = sketchpad::Canvas::new(args.width, args.height)?;
    let mut pad =
        sketchpad::Sketchpad::new(canvas, opts, Box::new(sketchpad::SandboxedBridge::new()))?;
    pad.load_image(bytes)?;
    pad.settle()?;
    anyhow::ensure!(
        pad.history_depth() > 1,
        "'{}' could not be decoded as an image",
        args.in_path.display()
    );

    let png = pad.export_png()?;
    write_png(&args.out, &png)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_png(out: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, png).with_context(|| format!("write png '{}'", out.display()))
}
