use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rankrace::{
    EntityTimelineStore, EraTable, FrameRow, PlayheadController, RaceConfig, SnapshotEngine,
    Timestamp, decode, rank,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rankrace", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pause schedule as JSON.
    Pauses(CommonArgs),
    /// Print the ranked standings for one day.
    Snapshot(SnapshotArgs),
    /// Play the race headlessly and write one JSON render frame per tick.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input record files (CSV, or JSON with a `.json` extension).
    #[arg(long = "in", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Playback configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Day to reconstruct (YYYY-MM-DD).
    #[arg(long)]
    at: NaiveDate,

    /// Report the exact latest-record state at the end of the day instead of interpolating.
    #[arg(long, default_value_t = false)]
    exact: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Simulated frame rate; each tick advances 1000/fps ms of real time.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Output JSONL path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.cmd {
        Command::Pauses(args) => cmd_pauses(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load(args: &CommonArgs) -> anyhow::Result<(RaceConfig, EntityTimelineStore)> {
    let config = match &args.config {
        Some(p) => RaceConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => RaceConfig::default(),
    };
    let records = rankrace::read_paths(args.inputs.as_slice(), config.clean_records)
        .context("read input records")?;
    Ok((config, EntityTimelineStore::build(records)))
}

fn cmd_pauses(args: CommonArgs) -> anyhow::Result<()> {
    let (config, store) = load(&args)?;
    let controller = PlayheadController::new(store, config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, controller.schedule().points())?;
    writeln!(out)?;
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let (config, store) = load(&args.common)?;
    config.validate()?;
    let eras = EraTable::new(config.eras.iter().cloned())?;

    let (time, snapshot) = if args.exact {
        let t = Timestamp::end_of_day(args.at);
        (t, SnapshotEngine::snapshot_final_in_era(&store, &eras, t))
    } else {
        let t = Timestamp::from_date(args.at);
        (t, SnapshotEngine::snapshot_at(&store, &eras, t))
    };
    let rows: Vec<FrameRow> = rank(&snapshot, config.top_n)
        .into_iter()
        .map(|row| FrameRow {
            decoded: decode(row.score, time),
            row,
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &rows)?;
    writeln!(out)?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (config, store) = load(&args.common)?;
    let mut controller = PlayheadController::new(store, config)?;

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let delta_ms = 1000.0 / f64::from(args.fps);
    controller.start();
    let mut frames = 0u64;
    while let Some(frame) = controller.tick(delta_ms) {
        serde_json::to_writer(&mut out, &frame)?;
        writeln!(out)?;
        frames += 1;
    }
    out.flush()?;

    tracing::info!(frames, "playback finished");
    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
