use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fiberview::config::{LoaderConfig, ReduceConfig};
use fiberview::data::loader::{self, Loaded};
use fiberview::data::parser::DistanceRange;
use fiberview::processing::statistics::SeriesStats;
use fiberview::state::chart::ChartKind;
use fiberview::{reduce_with_report, Point, Reduction, ReductionReport, Viewport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Decimate stitched fiber sensor traces for display", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a channel and reduce it to the points visible in a viewport
    Reduce(ReduceArgs),
    /// Print statistics for a channel's stitched series
    Inspect(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Directory holding one sub-directory per channel
    #[arg(long, value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// Channel id
    #[arg(long, default_value = "1")]
    channel: String,

    /// Measurement kind (`tension`/`str` or `temperature`/`tem`)
    #[arg(long, default_value = "tension", value_parser = str::parse::<ChartKind>)]
    kind: ChartKind,

    /// Number of most recent files to stitch
    #[arg(long)]
    files: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct ReduceArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Left edge of the viewport (defaults to the kind's initial range)
    #[arg(long, requires = "max", allow_negative_numbers = true)]
    min: Option<f64>,

    /// Right edge of the viewport
    #[arg(long, requires = "min", allow_negative_numbers = true)]
    max: Option<f64>,

    /// Global point budget
    #[arg(long)]
    budget: Option<usize>,

    /// JSON file with reduction settings
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output JSON path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReduceOutput<'a> {
    points: &'a [Point],
    latest_file: Option<&'a str>,
    viewport: Viewport,
    summary: ReductionReport,
}

impl<'a> ReduceOutput<'a> {
    fn new(reduction: &'a Reduction, latest_file: Option<&'a str>, viewport: Viewport) -> Self {
        Self {
            points: &reduction.points,
            latest_file,
            viewport,
            summary: reduction.report,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::Reduce(args) => args.source.verbose,
        Command::Inspect(args) => args.verbose,
    };
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Reduce(args) => handle_reduce(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn load(args: &SourceArgs, range: Option<DistanceRange>) -> Result<Loaded> {
    let mut config = LoaderConfig::default();
    if let Some(files) = args.files {
        if files == 0 {
            return Err(anyhow!("--files must be at least 1"));
        }
        config.files_per_channel = files;
    }
    loader::load_channel(&args.root, &args.channel, args.kind, range, &config).with_context(|| {
        format!(
            "failed to load channel {} from {}",
            args.channel,
            args.root.display()
        )
    })
}

fn handle_reduce(args: ReduceArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ReduceConfig::from_json_file(path)?,
        None => ReduceConfig::default(),
    };
    if let Some(budget) = args.budget {
        config.budget = budget;
    }
    config.validate()?;

    let kind = args.source.kind;
    let viewport = match (args.min, args.max) {
        (Some(min), Some(max)) => Viewport::new(min, max),
        _ => kind.default_viewport(),
    };

    // Read the kind's whole initial range, widened to the buffered viewport
    let initial = kind.default_viewport();
    let (lo, hi) = viewport.padded_bounds(&config.window());
    let range = DistanceRange {
        min: initial.min.min(lo),
        max: initial.max.max(hi),
    };
    let loaded = load(&args.source, Some(range))?;

    let reduction = reduce_with_report(&loaded.points, viewport, &config);
    tracing::info!(
        input = reduction.report.input_len,
        output = reduction.report.output_len,
        sampled = reduction.report.sampled,
        "Reduced [{}, {}] with budget {}",
        viewport.min,
        viewport.max,
        config.budget
    );

    let output = ReduceOutput::new(&reduction, loaded.latest_file.as_deref(), viewport);

    let writer: Box<dyn Write> = if args.output.as_os_str() == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
        Box::new(file)
    };
    let mut writer = BufWriter::new(writer);
    if args.pretty {
        serde_json::to_writer_pretty(&mut writer, &output)?;
    } else {
        serde_json::to_writer(&mut writer, &output)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn handle_inspect(args: SourceArgs) -> Result<()> {
    let loaded = load(&args, None)?;
    let label = format!("Channel {} ({})", args.channel, args.kind.axis_label());

    let mut out = io::stdout().lock();
    match SeriesStats::compute(&loaded.points) {
        Some(stats) => write!(out, "{}", stats.report(&label))?,
        None => writeln!(out, "{label}: no readings")?,
    }
    if let Some(vp) = Viewport::fit_to(&loaded.points) {
        writeln!(out, "  Extent: {:.1} .. {:.1} m", vp.min, vp.max)?;
    }
    writeln!(out, "  Files:")?;
    for (name, count) in &loaded.file_counts {
        let latest = if loaded.latest_file.as_deref() == Some(name.as_str()) {
            " (latest)"
        } else {
            ""
        };
        writeln!(out, "    {name}: {count} points{latest}")?;
    }
    Ok(())
}
