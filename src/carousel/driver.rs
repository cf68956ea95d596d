// src/carousel/driver.rs
// Runs a Carousel on the tokio runtime: one task owns the state and
// serializes ticks and user commands

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info};

use super::{Carousel, CarouselView, TickOutcome};
use crate::error::{FactError, Result};
use crate::facts::Fact;

const COMMAND_BUFFER: usize = 32;

/// User actions forwarded to the driver task
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselCommand {
    Next,
    Previous,
    SetPaused(bool),
    TogglePause,
    SetHovering(bool),
    ShowOverride(Fact),
    ClearOverride,
}

/// Owner-side handle of a running carousel.
///
/// Dropping the handle cancels the timer; the advance callback is never
/// invoked after that.
pub struct CarouselHandle {
    commands: mpsc::Sender<CarouselCommand>,
    view: watch::Receiver<CarouselView>,
    cancel: CancellationToken,
    task: Option<JoinHandle<Carousel>>,
    _guard: DropGuard,
}

/// Spawn the driver task. `on_advance` runs after every auto-advance with the
/// view that is now on screen.
pub fn spawn_carousel<F>(carousel: Carousel, on_advance: F) -> CarouselHandle
where
    F: FnMut(&CarouselView) + Send + 'static,
{
    let cancel = CancellationToken::new();
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (view_tx, view_rx) = watch::channel(carousel.view());

    let task = tokio::spawn(run_carousel(
        carousel,
        command_rx,
        view_tx,
        cancel.clone(),
        on_advance,
    ));

    CarouselHandle {
        commands: command_tx,
        view: view_rx,
        _guard: cancel.clone().drop_guard(),
        cancel,
        task: Some(task),
    }
}

impl CarouselHandle {
    pub async fn send(&self, command: CarouselCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| FactError::Stopped)
    }

    pub async fn next(&self) -> Result<()> {
        self.send(CarouselCommand::Next).await
    }

    pub async fn previous(&self) -> Result<()> {
        self.send(CarouselCommand::Previous).await
    }

    pub async fn show_override(&self, fact: Fact) -> Result<()> {
        self.send(CarouselCommand::ShowOverride(fact)).await
    }

    /// Latest published view
    pub fn view(&self) -> CarouselView {
        self.view.borrow().clone()
    }

    /// A receiver that is notified on every published view
    pub fn subscribe(&self) -> watch::Receiver<CarouselView> {
        self.view.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Stop the timer and hand back the final carousel state
    pub async fn shutdown(mut self) -> Result<Carousel> {
        self.cancel.cancel();
        match self.task.take() {
            Some(task) => task.await.map_err(|_| FactError::Stopped),
            None => Err(FactError::Stopped),
        }
    }
}

async fn run_carousel<F>(
    mut carousel: Carousel,
    mut commands: mpsc::Receiver<CarouselCommand>,
    view_tx: watch::Sender<CarouselView>,
    cancel: CancellationToken,
    mut on_advance: F,
) -> Carousel
where
    F: FnMut(&CarouselView),
{
    let period = carousel.timer.config().tick();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        facts = carousel.len(),
        tick_ms = period.as_millis() as u64,
        "carousel started"
    );

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,

            command = commands.recv() => match command {
                Some(command) => {
                    // A full tick period follows every progress reset
                    if resets_progress(&command) {
                        ticker.reset();
                    }
                    apply_command(&mut carousel, command);
                }
                None => break,
            },

            _ = ticker.tick() => {
                if carousel.tick() == TickOutcome::Advanced {
                    on_advance(&carousel.view());
                }
            }
        }

        view_tx.send_replace(carousel.view());
    }

    info!(index = carousel.current_index(), "carousel stopped");
    carousel
}

fn resets_progress(command: &CarouselCommand) -> bool {
    matches!(
        command,
        CarouselCommand::Next | CarouselCommand::Previous | CarouselCommand::ClearOverride
    )
}

fn apply_command(carousel: &mut Carousel, command: CarouselCommand) {
    debug!(?command, "carousel command");
    match command {
        CarouselCommand::Next => carousel.next(),
        CarouselCommand::Previous => carousel.previous(),
        CarouselCommand::SetPaused(paused) => carousel.set_paused(paused),
        CarouselCommand::TogglePause => {
            let paused = carousel.is_paused();
            carousel.set_paused(!paused);
        }
        CarouselCommand::SetHovering(hovering) => carousel.set_hovering(hovering),
        CarouselCommand::ShowOverride(fact) => carousel.show_override(fact),
        CarouselCommand::ClearOverride => carousel.clear_override(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::TimerConfig;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn carousel() -> Carousel {
        let facts = vec![Fact::new("first"), Fact::new("second"), Fact::new("third")];
        Carousel::new(facts, TimerConfig::from_millis(1_000, 100)).unwrap()
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnMut(&CarouselView) + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move |_: &CarouselView| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advances_after_dwell() {
        let (count, on_advance) = counter();
        let handle = spawn_carousel(carousel(), on_advance);

        time::sleep(Duration::from_millis(950)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(handle.view().index, 0);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(handle.view().index, 1);
        assert_eq!(handle.view().progress, 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_driver_does_not_advance() {
        let (count, on_advance) = counter();
        let handle = spawn_carousel(carousel(), on_advance);

        time::sleep(Duration::from_millis(350)).await;
        handle.send(CarouselCommand::SetPaused(true)).await.unwrap();
        time::sleep(Duration::from_millis(5_000)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
        let view = handle.view();
        assert!(view.suspended);
        assert_eq!(view.progress, 70.0);

        handle.send(CarouselCommand::TogglePause).await.unwrap();
        time::sleep(Duration::from_millis(750)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_override_then_next_returns_to_rotation() {
        let (_count, on_advance) = counter();
        let handle = spawn_carousel(carousel(), on_advance);

        handle
            .show_override(Fact::from_search("Did you know? Searched."))
            .await
            .unwrap();
        time::sleep(Duration::from_millis(3_000)).await;
        let view = handle.view();
        assert!(view.showing_override);
        assert_eq!(view.fact.content, "Did you know? Searched.");

        handle.next().await.unwrap();
        time::sleep(Duration::from_millis(10)).await;
        let view = handle.view();
        assert!(!view.showing_override);
        assert_eq!(view.index, 1);
        assert_eq!(view.progress, 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_next_gets_full_dwell() {
        let (count, on_advance) = counter();
        let handle = spawn_carousel(carousel(), on_advance);

        // Land the command on the same instant a tick is due
        time::sleep(Duration::from_millis(500)).await;
        handle.next().await.unwrap();
        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(handle.view().index, 1);
        assert_eq!(handle.view().progress, 100.0);

        time::sleep(Duration::from_millis(950)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(handle.view().index, 1);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(handle.view().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (count, on_advance) = counter();
        let handle = spawn_carousel(carousel(), on_advance);
        let mut views = handle.subscribe();

        time::sleep(Duration::from_millis(500)).await;
        drop(handle);
        views.borrow_and_update();

        time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(views.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_returns_state() {
        let (_count, on_advance) = counter();
        let handle = spawn_carousel(carousel(), on_advance);
        handle.previous().await.unwrap();
        time::sleep(Duration::from_millis(10)).await;

        let carousel = handle.shutdown().await.unwrap();
        assert_eq!(carousel.current_index(), 2);
    }
}
