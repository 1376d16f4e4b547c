use std::path::{Path, PathBuf};
use std::str::FromStr as _;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

use aov_recorder::{
    AovRecorder, ConfigValidator as _, FrameIndex, FrameRange, OrderingPolicy, OutputFormat,
    OutputFormatKind, ProcessSetting, RecorderSettings, RecordingSession, SyntheticAovSource,
    SyntheticSourceOpts,
};

#[derive(Parser, Debug)]
#[command(name = "aov-record", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a frame range from the synthetic AOV source.
    Record(RecordArgs),
    /// Check a settings file and list its problems.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// Recorder settings JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First frame to record.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Number of frames to record.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Frames between a capture request and its completion.
    #[arg(long, default_value_t = 0)]
    latency: u32,

    /// Override the output format (exr, png, jpg/jpeg).
    #[arg(long)]
    format: Option<String>,

    /// JPEG quality (0-100). Only applies to jpeg output.
    #[arg(long)]
    quality: Option<u8>,

    /// Override the output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Tolerate out-of-order completions.
    #[arg(long)]
    reorder: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Recorder settings JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Record(args) => cmd_record(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<RecorderSettings> {
    match path {
        Some(p) => Ok(RecorderSettings::from_json_file(p)?),
        None => Ok(RecorderSettings::default()),
    }
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut settings = load_settings(args.config.as_deref())?;

    if let Some(name) = &args.format {
        settings.output = OutputFormatKind::from_str(name)?.with_defaults();
    }
    if let Some(q) = args.quality {
        match &mut settings.output {
            OutputFormat::Jpeg { quality } => *quality = q,
            other => anyhow::bail!("--quality only applies to jpeg output, not {}", other.kind()),
        }
    }
    if let Some(out) = args.out {
        settings.output_dir = out;
    }
    if args.reorder {
        settings.ordering = OrderingPolicy::Reorder;
    }

    let source = SyntheticAovSource::new(
        settings.aov,
        SyntheticSourceOpts {
            resolution: settings.resolution(),
            latency_frames: args.latency,
            render_texture_backed: false,
        },
    );
    let mut recorder =
        AovRecorder::new(settings, ProcessSetting::shared(true)).with_input(Box::new(source));
    let mut session = RecordingSession::default();
    let range = FrameRange::starting_at(FrameIndex(args.start), args.frames);

    let stats = aov_recorder::record_frames(&mut recorder, &mut session, range)
        .context("recording failed")?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    if stats.frames_failed > 0 {
        anyhow::bail!("{} frame(s) failed to write", stats.frames_failed);
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let settings = RecorderSettings::from_json_file(&args.config)?;
    let errors = settings.validation_errors();
    if errors.is_empty() {
        eprintln!("'{}' is valid", args.config.display());
        return Ok(());
    }
    for e in &errors {
        eprintln!("error: {e}");
    }
    anyhow::bail!(
        "'{}' has {} validation error(s)",
        args.config.display(),
        errors.len()
    );
}
