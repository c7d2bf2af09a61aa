//! Binary entrypoint: loads a banner feed and drives the carousel from stdin.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use banner_carousel::banner::{self, FeedStatus};
use banner_carousel::carousel::{Align, CarouselSignals, ControlInput};
use banner_carousel::config::Configuration;
use banner_carousel::events::CarouselCommand;
use banner_carousel::tasks;
use clap::{ArgAction, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "banner-carousel",
    version,
    about = "Headless banner carousel driven from stdin"
)]
struct Args {
    /// Path to YAML config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Banner feed JSON (overrides feed-path from the config)
    #[arg(short, long, value_name = "FILE")]
    feed: Option<PathBuf>,
    /// Initial container width in pixels
    #[arg(long, value_name = "PX")]
    width: Option<f32>,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

enum Line {
    Command(CarouselCommand),
    Reload,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<Line>> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    let line = match (word, arg) {
        ("next" | "n", None) => Line::Command(CarouselCommand::Input(ControlInput::NextButton)),
        ("prev" | "p", None) => {
            Line::Command(CarouselCommand::Input(ControlInput::PreviousButton))
        }
        ("home", None) => Line::Command(CarouselCommand::Input(ControlInput::Home)),
        ("end", None) => Line::Command(CarouselCommand::Input(ControlInput::End)),
        ("jump", Some(raw)) => Line::Command(CarouselCommand::JumpTo(
            raw.parse().with_context(|| format!("invalid slide index '{raw}'"))?,
        )),
        ("resize", Some(raw)) => Line::Command(CarouselCommand::Resize(
            raw.parse().with_context(|| format!("invalid width '{raw}'"))?,
        )),
        ("align", Some(raw)) => {
            let align: Align = raw.parse().map_err(|err: String| anyhow!(err))?;
            Line::Command(CarouselCommand::SetAlign(align))
        }
        ("loop", Some("on")) => Line::Command(CarouselCommand::SetLoop(true)),
        ("loop", Some("off")) => Line::Command(CarouselCommand::SetLoop(false)),
        ("reload", None) => Line::Reload,
        ("quit" | "q", None) => Line::Quit,
        _ => bail!("unrecognized command '{}'", line.trim()),
    };
    Ok(Some(line))
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("banner_carousel={level}")
            .parse()
            .context("invalid log directive")?,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn describe(signals: &CarouselSignals) -> String {
    if signals.slide_count == 0 {
        return "no images available".to_owned();
    }
    format!(
        "slide {}/{} prev={} next={} moving={} offset={:.1}",
        signals.current_index + 1,
        signals.slide_count,
        signals.can_go_previous,
        signals.can_go_next,
        signals.is_transitioning,
        signals.target_offset
    )
}

async fn read_commands(
    feed: PathBuf,
    to_carousel: mpsc::Sender<CarouselCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line.context("failed to read stdin")?,
        };
        let Some(line) = line else {
            info!("stdin closed");
            break;
        };
        let command = match parse_line(&line) {
            Ok(Some(Line::Command(command))) => command,
            Ok(Some(Line::Reload)) => match banner::load_feed(&feed) {
                Ok(slides) => CarouselCommand::Reload(slides),
                Err(err) => {
                    warn!(%err, "reload failed; keeping current slides");
                    continue;
                }
            },
            Ok(Some(Line::Quit)) => break,
            Ok(None) => continue,
            Err(err) => {
                warn!("{err:#}");
                continue;
            }
        };
        if to_carousel.send(command).await.is_err() {
            warn!("carousel channel closed");
            break;
        }
    }
    cancel.cancel();
    Ok(())
}

async fn print_signals(
    mut rx: watch::Receiver<CarouselSignals>,
    cancel: CancellationToken,
) -> Result<()> {
    println!("{}", describe(&rx.borrow_and_update()));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", describe(&rx.borrow_and_update()));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        feed,
        width,
        verbose,
    } = Args::parse();
    init_tracing(verbose)?;

    let mut cfg = match &config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(feed) = feed {
        cfg.feed_path = Some(feed);
    }
    if let Some(width) = width {
        cfg.viewport_width = width;
    }
    let cfg = cfg.validated().context("validating configuration")?;
    let feed_path = cfg
        .feed_path
        .clone()
        .context("no banner feed given; pass --feed or set feed-path")?;

    info!(status = ?FeedStatus::Loading, feed = %feed_path.display(), "loading banners");
    let loaded = banner::load_feed(&feed_path);
    let status = FeedStatus::from_result(&loaded);
    info!(?status, "banner feed");
    let slides = loaded.with_context(|| format!("loading feed from {}", feed_path.display()))?;

    info!(
        align = %cfg.carousel.align,
        looping = cfg.carousel.loop_enabled,
        basis = %cfg.carousel.slide_basis,
        transition = %humantime::format_duration(cfg.transition_duration),
        autoplay = cfg.autoplay.enabled,
        interval = %humantime::format_duration(cfg.autoplay.interval),
        "carousel configured"
    );

    let cancel = CancellationToken::new();
    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(16);
    let (signals_tx, signals_rx) = watch::channel(CarouselSignals::default());

    let mut join_set = JoinSet::new();
    join_set.spawn(tasks::carousel::run(
        cfg.clone(),
        slides,
        cmd_rx,
        signals_tx,
        cancel.clone(),
    ));
    join_set.spawn(read_commands(feed_path, cmd_tx, cancel.clone()));
    join_set.spawn(print_signals(signals_rx, cancel.clone()));

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received");
                cancel.cancel();
            }
        });
    }

    while let Some(joined) = join_set.join_next().await {
        joined.context("task panicked")??;
        cancel.cancel();
    }
    Ok(())
}
