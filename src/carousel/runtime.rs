//! Carousel runtime task
//!
//! Owns one controller and feeds it stimuli one at a time from a single
//! queue. User input from the shell and fires from [`TokioTimers`] share
//! that queue, so every handler runs to completion before the next event is
//! looked at.

use super::controller::{Carousel, CarouselSettings};
use super::ports::SlideSurface;
use super::stimulus::Stimulus;
use super::timers::TokioTimers;
use std::num::NonZeroUsize;
use tokio::sync::{mpsc, oneshot};

/// Queue depth for inbound stimuli (senders wait when full)
pub const STIMULUS_QUEUE_CAPACITY: usize = 1000;

pub struct CarouselRuntime<S> {
    carousel: Carousel<S, TokioTimers>,
    stimuli: mpsc::Receiver<Stimulus>,
}

impl<S: SlideSurface> CarouselRuntime<S> {
    /// Build a runtime and the sender the shell uses to deliver stimuli
    pub fn new(
        slide_count: NonZeroUsize,
        settings: CarouselSettings,
        surface: S,
    ) -> (Self, mpsc::Sender<Stimulus>) {
        let (tx, rx) = mpsc::channel(STIMULUS_QUEUE_CAPACITY);
        let timers = TokioTimers::new(tx.clone());
        let carousel = Carousel::new(slide_count, settings, surface, timers);

        (
            Self {
                carousel,
                stimuli: rx,
            },
            tx,
        )
    }

    /// Start the carousel and process stimuli until `shutdown` resolves
    ///
    /// A dropped shutdown sender also stops the runtime.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        self.carousel.start();

        loop {
            tokio::select! {
                Some(stimulus) = self.stimuli.recv() => {
                    self.carousel.handle(stimulus);
                }
                _ = &mut shutdown => break,
            }
        }

        tracing::debug!(
            autoplaying = self.carousel.is_autoplaying(),
            transitioning = self.carousel.is_transitioning(),
            "Stopping carousel runtime"
        );
        self.carousel.shutdown();
        tracing::info!(
            index = self.carousel.current_index(),
            "Carousel runtime stopped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::surfaces::{ChannelSurface, SurfaceUpdate};
    use std::time::Duration;
    use tokio::time;

    /// Latest track offset among the queued updates, if any arrived
    fn latest_offset(rx: &mut mpsc::UnboundedReceiver<SurfaceUpdate>) -> Option<i64> {
        let mut latest = None;
        while let Ok(update) = rx.try_recv() {
            if let SurfaceUpdate::Track { offset_percent } = update {
                latest = Some(offset_percent);
            }
        }
        latest
    }

    fn spawn_runtime(
        slides: usize,
    ) -> (
        mpsc::Sender<Stimulus>,
        mpsc::UnboundedReceiver<SurfaceUpdate>,
        oneshot::Sender<()>,
        tokio::task::JoinHandle<()>,
    ) {
        let (surface, updates) = ChannelSurface::channel();
        let (runtime, stimuli) = CarouselRuntime::new(
            NonZeroUsize::new(slides).unwrap(),
            CarouselSettings::default(),
            surface,
        );
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(runtime.run(shutdown_rx));
        (stimuli, updates, shutdown_tx, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn starts_on_first_slide_and_autoplays() {
        let (_stimuli, mut updates, shutdown, handle) = spawn_runtime(4);

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(latest_offset(&mut updates), Some(0));

        time::sleep(Duration::from_millis(6_980)).await;
        assert_eq!(latest_offset(&mut updates), None);

        time::sleep(Duration::from_millis(20)).await;
        assert_eq!(latest_offset(&mut updates), Some(-100));

        time::sleep(Duration::from_secs(7)).await;
        assert_eq!(latest_offset(&mut updates), Some(-200));

        shutdown.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_delays_autoplay() {
        let (stimuli, mut updates, shutdown, handle) = spawn_runtime(4);

        // Past the initial transition lock
        time::sleep(Duration::from_millis(600)).await;
        latest_offset(&mut updates);

        stimuli.send(Stimulus::Previous).await.unwrap();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(latest_offset(&mut updates), Some(-300));

        // The first scheduled 7s tick would land here; autoplay was paused
        time::sleep(Duration::from_millis(7_000)).await;
        assert_eq!(latest_offset(&mut updates), None);

        // Resume at ~1.61s, next tick ~7s after that
        time::sleep(Duration::from_millis(1_100)).await;
        assert_eq!(latest_offset(&mut updates), Some(0));

        shutdown.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_requests_inside_lock_are_dropped() {
        let (stimuli, mut updates, shutdown, handle) = spawn_runtime(5);

        time::sleep(Duration::from_millis(600)).await;
        latest_offset(&mut updates);

        stimuli.send(Stimulus::Next).await.unwrap();
        stimuli.send(Stimulus::Next).await.unwrap();
        stimuli.send(Stimulus::Next).await.unwrap();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(latest_offset(&mut updates), Some(-100));

        time::sleep(Duration::from_millis(500)).await;
        stimuli.send(Stimulus::Next).await.unwrap();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(latest_offset(&mut updates), Some(-200));

        shutdown.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn hover_pauses_until_pointer_leaves() {
        let (stimuli, mut updates, shutdown, handle) = spawn_runtime(3);

        time::sleep(Duration::from_millis(100)).await;
        latest_offset(&mut updates);

        stimuli.send(Stimulus::PointerEnter).await.unwrap();
        time::sleep(Duration::from_secs(20)).await;
        assert_eq!(latest_offset(&mut updates), None);

        stimuli.send(Stimulus::PointerLeave).await.unwrap();
        time::sleep(Duration::from_millis(7_010)).await;
        assert_eq!(latest_offset(&mut updates), Some(-100));

        shutdown.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_shutdown_sender_stops_runtime() {
        let (_stimuli, _updates, shutdown, handle) = spawn_runtime(2);
        drop(shutdown);
        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("runtime should stop")
            .unwrap();
    }
}
