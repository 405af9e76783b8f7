use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zenith::{
    checkout::client::{AlertSink, CheckoutClient, CheckoutOptions, PaymentWidget},
    CheckoutOutcome, DirSource, FrameMapper, GatewayCredentials, LandingConfig, LoadOptions,
    OrderServer, OrderService, PublicKey, RazorpayGateway, ScrollExperience, Viewport, ZenithError,
    ZenithResult,
};

#[derive(Parser, Debug)]
#[command(name = "zenith", version, about = "Zenith X landing experience tools")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Landing configuration JSON. Shipped defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `POST /api/orders` backed by Razorpay.
    Serve(ServeArgs),
    /// Render the canvas at a scroll progress as a PNG and print the overlays.
    Frame(FrameArgs),
    /// Sweep scroll progress and print every frame change.
    Scrub(ScrubArgs),
    /// Request an order from a running server and print the checkout options.
    Order(OrderArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Directory the frame sequence paths resolve against.
    #[arg(long)]
    root: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Fetch+decode worker threads. Defaults to one per frame.
    #[arg(long)]
    threads: Option<usize>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Number of progress steps from 0 to 1.
    #[arg(long, default_value_t = 100)]
    steps: u32,

    /// Seconds of smoothing per step.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,
}

#[derive(Parser, Debug)]
struct OrderArgs {
    /// Base URL of the order server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    url: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Serve(args) => cmd_serve(&config, args),
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Scrub(args) => cmd_scrub(&config, args),
        Command::Order(args) => cmd_order(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LandingConfig> {
    let config = match path {
        Some(path) => LandingConfig::from_json_file(path)?,
        None => LandingConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn cmd_serve(config: &LandingConfig, args: ServeArgs) -> anyhow::Result<()> {
    let credentials = GatewayCredentials::from_env()?;
    let service = Arc::new(OrderService::new(
        RazorpayGateway::new(credentials),
        config.product.clone(),
    ));

    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    OrderServer::bind(&bind)?.serve(service)?;
    Ok(())
}

fn cmd_frame(config: &LandingConfig, args: FrameArgs) -> anyhow::Result<()> {
    let viewport = Viewport::new(args.width, args.height, args.dpr)?;
    let mut exp = ScrollExperience::new(config, viewport)?;
    exp.load_frames(
        &DirSource::new(args.root.clone()),
        &LoadOptions {
            threads: args.threads,
        },
    )?;

    exp.scroll_to_progress(args.progress);
    let ticks = exp.settle(1.0 / 60.0, 10_000)?;
    tracing::debug!(ticks, index = %exp.current_index(), "settled");

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = exp.frame();
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    let report = serde_json::json!({
        "frame": exp.current_index(),
        "overlays": exp.overlays()?,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scrub(config: &LandingConfig, args: ScrubArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "--steps must be >= 1");
    anyhow::ensure!(args.dt.is_finite() && args.dt > 0.0, "--dt must be > 0");

    let mut mapper = FrameMapper::new(config.frames.count, config.spring, 0.0)?;
    mapper.subscribe(|index| println!("frame {index}"));
    println!("frame {}", mapper.current_index());

    for step in 0..=args.steps {
        let target = f64::from(step) / f64::from(args.steps);
        mapper.tick(&move || target, args.dt);
    }
    while !mapper.is_settled() {
        mapper.tick(&|| 1.0, args.dt);
    }
    Ok(())
}

struct PrintWidget;

impl PaymentWidget for PrintWidget {
    fn open(&mut self, options: &CheckoutOptions) -> ZenithResult<()> {
        let json = serde_json::to_string_pretty(options)
            .map_err(|e| ZenithError::serde(e.to_string()))?;
        println!("{json}");
        Ok(())
    }
}

struct StderrAlerts;

impl AlertSink for StderrAlerts {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn cmd_order(config: &LandingConfig, args: OrderArgs) -> anyhow::Result<()> {
    let client = CheckoutClient::new(&args.url, PublicKey::from_env()?, config.product.clone());
    match client.begin_checkout(&mut PrintWidget, &mut StderrAlerts) {
        CheckoutOutcome::Opened(_) => Ok(()),
        CheckoutOutcome::Failed(err) => Err(anyhow::anyhow!(err)),
    }
}
