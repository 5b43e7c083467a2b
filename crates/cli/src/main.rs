#![deny(warnings)]

use anyhow::Context;
use bhava_chant_core::bhava::{bhava_vectors, Bhava};
use bhava_chant_core::classify::{
    pcm_from_upload, BhavaClassifier, RandomClassifier, RemoteClassifier,
};
use bhava_chant_core::compose::{RandomWordSource, WordBank};
use bhava_chant_core::config::{
    resolve_optional_string, resolve_string_with_default, AppConfig, Env, ServerConfig, StdEnv,
    SyllableDuration, SynthConfig, Waveform, DEFAULT_BIND_ADDR, DEFAULT_EXPORT_DIR,
    DEFAULT_SAMPLE_RATE_HZ, DEFAULT_SYLLABLE_MS, ENV_BIND_ADDR, ENV_CLASSIFIER_URL, ENV_EXPORT_DIR,
};
use bhava_chant_core::export::{vector_chart, ExportOptions, FsExporter};
use bhava_chant_core::pipeline::{ChantOutcome, ComposeRequest, Pipeline, PipelineConfig};
use bhava_chant_core::qr::{decode_payload, encode_payload, render_svg};
use bhava_chant_core::synth::{ChantStyle, OscillatorToneGenerator};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bhava-chant")]
#[command(about = "Compose bhava-tagged mantras and render them as placeholder chant audio")]
struct Cli {
    /// Directory for audio, timestamp, subtitle and chart files
    #[arg(long, global = true, env = ENV_EXPORT_DIR)]
    out_dir: Option<String>,

    #[arg(long, global = true, default_value_t = DEFAULT_SYLLABLE_MS)]
    syllable_ms: u64,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose mantras for a bhava and chant them
    Compose(ComposeArgs),
    /// Chant arbitrary IAST or Devanagari text
    Chant(ChantArgs),
    /// Encode or decode a QR payload
    #[command(subcommand)]
    Qr(QrCommand),
    /// Predict a bhava for an audio file
    Classify(ClassifyArgs),
    /// Serve the predict endpoint over HTTP
    #[cfg(feature = "server")]
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// default, udatta, svarita, zigzag or rasa
    #[arg(long, default_value = "default")]
    style: ChantStyle,

    #[arg(long, default_value = "sine")]
    waveform: Waveform,

    #[arg(long)]
    no_audio: bool,

    #[arg(long)]
    no_subtitles: bool,

    /// Also write the bhava intensity chart
    #[arg(long)]
    chart: bool,

    /// Also write the animated scroll chart
    #[arg(long)]
    scroll: bool,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    #[arg(long)]
    bhava: String,

    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
    count: u8,

    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(3..=10))]
    length: u8,

    /// Fixed seed for reproducible word draws
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args, Debug)]
struct ChantArgs {
    #[arg(long)]
    text: String,

    #[arg(long, default_value = "Śāntiḥ")]
    bhava: String,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Subcommand, Debug)]
enum QrCommand {
    Encode {
        #[arg(long)]
        text: String,
        /// Write the QR code as SVG here
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Write the per-word bhava vector chart as SVG here
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    Decode {
        #[arg(long)]
        payload: String,
    },
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    #[arg(long)]
    file: PathBuf,

    /// Base URL of a running predict server; local random prediction if unset
    #[arg(long, env = ENV_CLASSIFIER_URL)]
    classifier_url: Option<String>,
}

#[cfg(feature = "server")]
#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = ENV_BIND_ADDR)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let env = StdEnv;
    let cfg = build_config(&cli, &env)?;
    tracing::debug!(
        export_dir = %cfg.export_dir.display(),
        syllable_ms = cfg.synth.syllable.ms,
        "config loaded"
    );

    match cli.command {
        Command::Compose(args) => run_compose(&cfg, args),
        Command::Chant(args) => run_chant(&cfg, args),
        Command::Qr(cmd) => run_qr(cmd),
        Command::Classify(args) => run_classify(&cfg, args).await,
        #[cfg(feature = "server")]
        Command::Serve(_) => run_serve(&cfg).await,
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn build_config(cli: &Cli, env: &impl Env) -> anyhow::Result<AppConfig> {
    let syllable = SyllableDuration::new(cli.syllable_ms)?;
    let synth = SynthConfig::new(DEFAULT_SAMPLE_RATE_HZ, syllable)?;
    let export_dir =
        resolve_string_with_default(cli.out_dir.clone(), ENV_EXPORT_DIR, env, DEFAULT_EXPORT_DIR);

    #[cfg(feature = "server")]
    let bind = match &cli.command {
        Command::Serve(args) => args.bind.clone(),
        _ => None,
    };
    #[cfg(not(feature = "server"))]
    let bind = None;

    Ok(AppConfig {
        export_dir: PathBuf::from(export_dir),
        synth,
        server: ServerConfig {
            bind_addr: resolve_string_with_default(bind, ENV_BIND_ADDR, env, DEFAULT_BIND_ADDR),
            classifier_url: resolve_optional_string(None, ENV_CLASSIFIER_URL, env),
        },
    })
}

fn export_options(render: &RenderArgs) -> ExportOptions {
    ExportOptions {
        audio: !render.no_audio,
        timestamps: true,
        subtitles: !render.no_subtitles,
        waveform_chart: render.chart,
        scroll_chart: render.scroll,
    }
}

fn pipeline(
    cfg: &AppConfig,
    render: &RenderArgs,
    words: RandomWordSource,
) -> Pipeline<RandomWordSource, OscillatorToneGenerator, FsExporter> {
    let mut config = PipelineConfig::from_app(cfg);
    config.synth = config.synth.with_waveform(render.waveform);
    Pipeline {
        words,
        tones: OscillatorToneGenerator,
        exporter: FsExporter::new(&cfg.export_dir, export_options(render)),
        config,
    }
}

fn run_compose(cfg: &AppConfig, args: ComposeArgs) -> anyhow::Result<()> {
    if Bhava::parse(&args.bhava).is_none() {
        tracing::warn!(bhava = %args.bhava, "unknown bhava, using the default word bank");
    }
    let words = match args.seed {
        Some(seed) => RandomWordSource::seeded(WordBank::shared(), seed),
        None => RandomWordSource::new(WordBank::shared()),
    };
    let request = ComposeRequest::new(
        args.bhava,
        usize::from(args.count),
        usize::from(args.length),
        args.render.style,
    )?;
    let outcome = pipeline(cfg, &args.render, words)
        .compose(&request)
        .context("chant composition failed")?;

    for (i, m) in outcome.mantras.iter().enumerate() {
        println!("{}. {m}", i + 1);
    }
    report(&outcome);
    Ok(())
}

fn run_chant(cfg: &AppConfig, args: ChantArgs) -> anyhow::Result<()> {
    let outcome = pipeline(cfg, &args.render, RandomWordSource::default())
        .chant_text(&args.text, &args.bhava, args.render.style)
        .context("chant rendering failed")?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &ChantOutcome) {
    let syllables: Vec<String> = outcome
        .records
        .iter()
        .map(|r| format!("{}[{}]", r.text, r.tag))
        .collect();
    println!("syllables: {}", syllables.join(" "));
    println!("duration: {} ms", outcome.audio.duration_ms());
    for path in outcome.exports.written() {
        println!("wrote {}", path.display());
    }
}

fn run_qr(cmd: QrCommand) -> anyhow::Result<()> {
    match cmd {
        QrCommand::Encode { text, svg, chart } => {
            let payload = encode_payload(&text)?;
            println!("{payload}");
            if let Some(path) = svg {
                write_file(&path, &render_svg(&payload)?)?;
                tracing::info!(path = %path.display(), "qr code written");
            }
            if let Some(path) = chart {
                write_file(&path, &vector_chart(&bhava_vectors(&text)).to_svg()?)?;
                tracing::info!(path = %path.display(), "vector chart written");
            }
        }
        QrCommand::Decode { payload } => {
            let decoded = decode_payload(&payload)?;
            println!("mantra: {}", decoded.mantra);
            for (v, tag) in decoded.vectors.iter().zip(&decoded.tags) {
                println!("{v:?} {tag}");
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))
}

async fn run_classify(cfg: &AppConfig, args: ClassifyArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let pcm = pcm_from_upload(&bytes)?;

    let url = args
        .classifier_url
        .or_else(|| cfg.server.classifier_url.clone());
    let rasa = match url {
        Some(url) => RemoteClassifier::new(&url)?.classify(pcm).await?,
        None => RandomClassifier::new().classify(pcm).await?,
    };
    println!("predicted bhava: {rasa}");
    Ok(())
}

#[cfg(feature = "server")]
async fn run_serve(cfg: &AppConfig) -> anyhow::Result<()> {
    use bhava_chant_core::server::serve;
    use std::sync::Arc;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };
    serve(&cfg.server.bind_addr, Arc::new(RandomClassifier::new()), shutdown).await?;
    Ok(())
}
