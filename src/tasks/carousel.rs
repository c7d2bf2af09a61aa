use anyhow::Result;
use tokio::select;
use tokio::sync::{mpsc::Receiver, watch};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::banner::Slide;
use crate::carousel::{Carousel, CarouselSignals};
use crate::config::Configuration;
use crate::events::CarouselCommand;

/// Owns one carousel engine and drives it from commands and timers.
///
/// Rules:
/// - Commands are applied in arrival order; a request arriving mid-transition
///   retargets the one in flight.
/// - A transition settles `transition-duration` after it starts or is
///   retargeted.
/// - With autoplay enabled the carousel advances every `autoplay.interval`,
///   rewinding to the first slide when it cannot go further.
/// - Signals are published on `signals` whenever they change.
pub async fn run(
    cfg: Configuration,
    slides: Vec<Slide>,
    mut commands: Receiver<CarouselCommand>,
    signals: watch::Sender<CarouselSignals>,
    cancel: CancellationToken,
) -> Result<()> {
    let transition = cfg.transition_duration;
    let autoplay = cfg.autoplay.clone();

    let mut carousel = Carousel::with_slides(&cfg.carousel, slides);
    carousel.on_resize(cfg.viewport_width);
    publish(&signals, &carousel);

    let mut in_flight: Option<usize> = None;
    let mut settle_at: Option<Instant> = None;
    let mut next_advance = Instant::now() + autoplay.interval;

    loop {
        let autoplay_armed = autoplay.enabled && carousel.slide_count() > 1;
        select! {
            _ = cancel.cancelled() => break,

            maybe_cmd = commands.recv() => {
                match maybe_cmd {
                    Some(cmd) => {
                        if cmd.is_interaction() && autoplay.reset_on_interaction {
                            next_advance = Instant::now() + autoplay.interval;
                        }
                        apply(&mut carousel, cmd);
                    }
                    None => {
                        info!("command channel closed");
                        break;
                    }
                }
            }

            _ = sleep_until(settle_at.unwrap_or_else(Instant::now)), if settle_at.is_some() => {
                if carousel.settle() {
                    if let Some(slide) = carousel.current_slide() {
                        debug!(index = carousel.current_index(), title = %slide.title, "slide active");
                    }
                }
            }

            _ = sleep_until(next_advance), if autoplay_armed => {
                next_advance = Instant::now() + autoplay.interval;
                if carousel.can_go_next() {
                    carousel.next();
                } else if let Err(err) = carousel.jump_to(0) {
                    warn!(%err, "autoplay rewind rejected");
                }
            }
        }

        let flight = carousel
            .is_transitioning()
            .then(|| carousel.navigation().target_index());
        if flight != in_flight {
            settle_at = flight.map(|_| Instant::now() + transition);
            in_flight = flight;
        }
        publish(&signals, &carousel);
    }

    Ok(())
}

fn apply(carousel: &mut Carousel<Slide>, cmd: CarouselCommand) {
    match cmd {
        CarouselCommand::Next => carousel.next(),
        CarouselCommand::Previous => carousel.previous(),
        CarouselCommand::JumpTo(index) => {
            if let Err(err) = carousel.jump_to(index) {
                warn!(%err, "jump rejected");
            }
        }
        CarouselCommand::Input(input) => carousel.handle_input(input),
        CarouselCommand::Resize(width) => carousel.on_resize(width),
        CarouselCommand::SetAlign(align) => carousel.set_align(align),
        CarouselCommand::SetLoop(loop_enabled) => carousel.set_loop(loop_enabled),
        CarouselCommand::Reload(slides) => carousel.set_slides(slides),
    }
}

fn publish(signals: &watch::Sender<CarouselSignals>, carousel: &Carousel<Slide>) {
    let next = carousel.signals();
    signals.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}
