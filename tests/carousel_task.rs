use std::time::Duration;

use banner_carousel::banner::Slide;
use banner_carousel::carousel::CarouselSignals;
use banner_carousel::config::{AutoplayOptions, CarouselOptions, Configuration};
use banner_carousel::events::CarouselCommand;
use banner_carousel::tasks::carousel;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

fn slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| Slide {
            id: format!("b{i}"),
            title: format!("Banner {i}"),
            image: format!("https://cdn.example/{i}.jpg"),
            destination_url: None,
        })
        .collect()
}

fn config(loop_enabled: bool, autoplay: Option<Duration>) -> Configuration {
    Configuration {
        viewport_width: 800.0,
        transition_duration: Duration::from_millis(20),
        carousel: CarouselOptions {
            loop_enabled,
            ..CarouselOptions::default()
        },
        autoplay: AutoplayOptions {
            enabled: autoplay.is_some(),
            interval: autoplay.unwrap_or(Duration::from_secs(5)),
            reset_on_interaction: true,
        },
        ..Configuration::default()
    }
}

struct Harness {
    commands: mpsc::Sender<CarouselCommand>,
    signals: watch::Receiver<CarouselSignals>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

fn spawn(cfg: Configuration, count: usize) -> Harness {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (sig_tx, sig_rx) = watch::channel(CarouselSignals::default());
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(carousel::run(
        cfg,
        slides(count),
        cmd_rx,
        sig_tx,
        cancel.clone(),
    ));
    Harness {
        commands: cmd_tx,
        signals: sig_rx,
        cancel,
        handle,
    }
}

async fn wait_for(
    rx: &mut watch::Receiver<CarouselSignals>,
    limit: Duration,
    pred: impl Fn(&CarouselSignals) -> bool,
) -> CarouselSignals {
    let state = tokio::time::timeout(limit, rx.wait_for(|s| pred(s)))
        .await
        .expect("timeout waiting for carousel signals")
        .expect("signal channel closed");
    *state
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn next_command_settles_after_transition() {
    let mut h = spawn(config(false, None), 3);

    let initial = wait_for(&mut h.signals, Duration::from_secs(1), |s| s.slide_count == 3).await;
    assert_eq!(initial.current_index, 0);
    assert!(!initial.can_go_previous);
    assert!(initial.can_go_next);

    h.commands.send(CarouselCommand::Next).await.unwrap();
    let settled = wait_for(&mut h.signals, Duration::from_secs(1), |s| {
        s.current_index == 1 && !s.is_transitioning
    })
    .await;
    assert!(settled.can_go_previous);
    assert!((settled.target_offset - 800.0).abs() < 1e-3);

    h.cancel.cancel();
    let _ = h.handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn burst_of_requests_lands_on_latest_target() {
    let mut cfg = config(false, None);
    cfg.transition_duration = Duration::from_millis(150);
    let mut h = spawn(cfg, 6);
    wait_for(&mut h.signals, Duration::from_secs(1), |s| s.slide_count == 6).await;

    h.commands.send(CarouselCommand::Next).await.unwrap();
    for _ in 0..4 {
        h.commands.send(CarouselCommand::Next).await.unwrap();
    }
    h.commands.send(CarouselCommand::JumpTo(5)).await.unwrap();

    // The in-flight target follows the latest request before anything settles.
    let retargeted = wait_for(&mut h.signals, Duration::from_secs(1), |s| {
        s.is_transitioning && (s.target_offset - 4000.0).abs() < 1e-3
    })
    .await;
    assert_eq!(retargeted.current_index, 0);

    let done = wait_for(&mut h.signals, Duration::from_secs(2), |s| {
        s.current_index == 5 && !s.is_transitioning
    })
    .await;
    assert!(!done.can_go_next);

    // One settle lands on the jump; nothing is queued behind it.
    let extra = tokio::time::timeout(Duration::from_millis(400), h.signals.changed()).await;
    assert!(extra.is_err(), "no further transitions expected");

    h.cancel.cancel();
    let _ = h.handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn autoplay_loops_through_slides() {
    let mut h = spawn(config(true, Some(Duration::from_millis(60))), 3);

    for expected in [1, 2, 0] {
        wait_for(&mut h.signals, Duration::from_secs(2), |s| {
            s.current_index == expected && !s.is_transitioning
        })
        .await;
    }

    h.cancel.cancel();
    let _ = h.handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn autoplay_rewinds_without_loop() {
    let mut h = spawn(config(false, Some(Duration::from_millis(60))), 2);

    wait_for(&mut h.signals, Duration::from_secs(2), |s| {
        s.current_index == 1 && !s.is_transitioning
    })
    .await;
    wait_for(&mut h.signals, Duration::from_secs(2), |s| {
        s.current_index == 0 && !s.is_transitioning
    })
    .await;

    h.cancel.cancel();
    let _ = h.handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reload_clamps_and_publishes_new_count() {
    let mut h = spawn(config(false, None), 5);
    h.commands.send(CarouselCommand::JumpTo(4)).await.unwrap();
    wait_for(&mut h.signals, Duration::from_secs(1), |s| {
        s.current_index == 4 && !s.is_transitioning
    })
    .await;

    h.commands
        .send(CarouselCommand::Reload(slides(2)))
        .await
        .unwrap();
    let reloaded = wait_for(&mut h.signals, Duration::from_secs(1), |s| s.slide_count == 2).await;
    assert_eq!(reloaded.current_index, 1);

    h.commands.send(CarouselCommand::Reload(Vec::new())).await.unwrap();
    let empty = wait_for(&mut h.signals, Duration::from_secs(1), |s| s.slide_count == 0).await;
    assert_eq!(empty.current_index, 0);
    assert!(!empty.can_go_next && !empty.can_go_previous);

    h.cancel.cancel();
    let _ = h.handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn task_exits_when_commands_close() {
    let h = spawn(config(true, None), 3);
    drop(h.commands);
    let result = tokio::time::timeout(Duration::from_secs(1), h.handle)
        .await
        .expect("task should stop after the command channel closes")
        .expect("task panicked");
    assert!(result.is_ok());
}
