//! Tokio-backed timer driver
//!
//! Each armed timer is a spawned task that sleeps and then posts
//! `Stimulus::TimerFired(id)` into the runtime's queue. Cancelling aborts
//! the task, and the controller drops its copy of the id at the same time,
//! so a fire that was already queued is not recognized either.

use super::ports::{TimerDriver, TimerId};
use super::stimulus::Stimulus;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// `tokio::time::interval` panics on a zero period
const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct TokioTimers {
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    queue: mpsc::Sender<Stimulus>,
}

impl TokioTimers {
    pub fn new(queue: mpsc::Sender<Stimulus>) -> Self {
        Self {
            next_id: 0,
            tasks: HashMap::new(),
            queue,
        }
    }

    /// Number of timers armed and not yet cancelled
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.tasks.len()
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }
}

impl TimerDriver for TokioTimers {
    fn arm_once(&mut self, after: Duration) -> TimerId {
        let id = self.allocate();
        let tx = self.queue.clone();
        let handle = tokio::spawn(async move {
            time::sleep(after).await;
            // Receiver gone means the runtime already stopped
            let _ = tx.send(Stimulus::TimerFired(id)).await;
        });
        self.tasks.insert(id, handle);
        id
    }

    fn arm_repeating(&mut self, period: Duration) -> TimerId {
        let id = self.allocate();
        let tx = self.queue.clone();
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(Stimulus::TimerFired(id)).await.is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_once() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TokioTimers::new(tx);

        let id = timers.arm_once(Duration::from_millis(500));
        time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(Stimulus::TimerFired(id)));

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TokioTimers::new(tx);

        let id = timers.arm_once(Duration::from_millis(100));
        timers.cancel(id);
        assert_eq!(timers.live(), 0);

        time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_fires_every_period_until_cancelled() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TokioTimers::new(tx);

        let id = timers.arm_repeating(Duration::from_secs(7));
        time::sleep(Duration::from_millis(21_500)).await;

        let mut fires = 0;
        while let Ok(stimulus) = rx.try_recv() {
            assert_eq!(stimulus, Stimulus::TimerFired(id));
            fires += 1;
        }
        assert_eq!(fires, 3);

        timers.cancel(id);
        time::sleep(Duration::from_secs(30)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_not_reused() {
        let (tx, _rx) = mpsc::channel(16);
        let mut timers = TokioTimers::new(tx);

        let a = timers.arm_once(Duration::from_millis(10));
        timers.cancel(a);
        let b = timers.arm_once(Duration::from_millis(10));
        assert_ne!(a, b);
    }
}
