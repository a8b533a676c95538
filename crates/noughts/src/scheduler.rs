//! Deferred, cancellable delivery of automated moves.
//!
//! The controller never sleeps. When an automated player is due it asks a
//! [`Scheduler`] to hand back a [`Ticket`] after a delay, keeps the returned
//! [`TaskHandle`], and later feeds the ticket into
//! [`GameController::run_scheduled`](crate::GameController::run_scheduled).
//! Cancelling the handle is best effort. A ticket that was already
//! delivered is rejected by the controller's own checks.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Identifies one scheduled automated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Unique per scheduled task.
    pub id: u64,
    /// Game instance the task was scheduled for.
    pub epoch: u64,
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}@{}", self.id, self.epoch)
    }
}

/// Handle to a pending task.
pub trait TaskHandle {
    /// Stops the task from delivering its ticket, if it has not already.
    fn cancel(&mut self);
}

/// Something that can deliver a ticket after a delay.
pub trait Scheduler {
    /// Handle type returned for each scheduled task.
    type Handle: TaskHandle;

    /// Schedules `ticket` for delivery after `delay`.
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> Self::Handle;
}

// ─────────────────────────────────────────────────────────────
//  Tokio timer
// ─────────────────────────────────────────────────────────────

/// Receiving end of a [`TokioScheduler`].
pub type TicketReceiver = mpsc::UnboundedReceiver<Ticket>;

/// Delivers tickets through an unbounded channel after a `tokio` sleep.
///
/// Must be used from inside a `tokio` runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Ticket>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    pub fn new() -> (Self, TicketReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Handle to a spawned timer task.
#[derive(Debug)]
pub struct TokioTask {
    join: JoinHandle<()>,
}

impl TaskHandle for TokioTask {
    fn cancel(&mut self) {
        self.join.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTask;

    #[instrument(skip(self, ticket), fields(ticket = %ticket))]
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TokioTask {
        let tx = self.tx.clone();
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(ticket = %ticket, "Delivering scheduled ticket");
            // Receiver gone means the game loop has shut down.
            let _ = tx.send(ticket);
        });
        debug!(delay_ms = delay.as_millis() as u64, "Scheduled agent move");
        TokioTask { join }
    }
}

// ─────────────────────────────────────────────────────────────
//  Manual queue
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Queue {
    pending: VecDeque<(Ticket, Duration)>,
    cancelled: Vec<Ticket>,
}

/// Scheduler that queues tickets until the caller releases them.
///
/// Clones share one queue, so a test can keep a clone while the controller
/// owns another. Delays are recorded but never waited on.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_queue<T>(&self, f: impl FnOnce(&mut Queue) -> T) -> T {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut queue)
    }

    /// Tickets scheduled and neither released nor cancelled, oldest first.
    pub fn pending(&self) -> Vec<Ticket> {
        self.with_queue(|q| q.pending.iter().map(|(ticket, _)| *ticket).collect())
    }

    /// Delay requested for each pending ticket, oldest first.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.with_queue(|q| q.pending.iter().map(|(_, delay)| *delay).collect())
    }

    /// Tickets whose handle was cancelled while still pending.
    pub fn cancelled(&self) -> Vec<Ticket> {
        self.with_queue(|q| q.cancelled.clone())
    }

    /// Removes and returns the oldest pending ticket, as if its timer fired.
    pub fn release(&self) -> Option<Ticket> {
        self.with_queue(|q| q.pending.pop_front().map(|(ticket, _)| ticket))
    }
}

/// Handle into a [`ManualScheduler`] queue.
#[derive(Debug)]
pub struct ManualTask {
    ticket: Ticket,
    queue: Arc<Mutex<Queue>>,
}

impl TaskHandle for ManualTask {
    fn cancel(&mut self) {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let before = queue.pending.len();
        queue.pending.retain(|(ticket, _)| *ticket != self.ticket);
        if queue.pending.len() != before {
            queue.cancelled.push(self.ticket);
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTask;

    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> ManualTask {
        self.with_queue(|q| q.pending.push_back((ticket, delay)));
        ManualTask {
            ticket,
            queue: Arc::clone(&self.queue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET: Ticket = Ticket { id: 1, epoch: 1 };

    #[test]
    fn test_manual_release_in_order() {
        let mut scheduler = ManualScheduler::new();
        let second = Ticket { id: 2, epoch: 1 };
        let _a = scheduler.schedule(Duration::from_millis(10), TICKET);
        let _b = scheduler.schedule(Duration::from_millis(20), second);
        assert_eq!(
            scheduler.pending_delays(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
        assert_eq!(scheduler.release(), Some(TICKET));
        assert_eq!(scheduler.release(), Some(second));
        assert_eq!(scheduler.release(), None);
    }

    #[test]
    fn test_manual_cancel_removes_pending() {
        let mut scheduler = ManualScheduler::new();
        let mut handle = scheduler.schedule(Duration::ZERO, TICKET);
        handle.cancel();
        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.cancelled(), vec![TICKET]);
    }

    #[test]
    fn test_manual_cancel_after_release_is_noop() {
        let mut scheduler = ManualScheduler::new();
        let mut handle = scheduler.schedule(Duration::ZERO, TICKET);
        assert_eq!(scheduler.release(), Some(TICKET));
        handle.cancel();
        assert!(scheduler.cancelled().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delivers_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let started = tokio::time::Instant::now();
        let _handle = scheduler.schedule(Duration::from_millis(500), TICKET);
        assert_eq!(rx.recv().await, Some(TICKET));
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_cancel_prevents_delivery() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let mut handle = scheduler.schedule(Duration::from_millis(500), TICKET);
        handle.cancel();
        let received = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(received.is_err(), "cancelled ticket was delivered");
    }
}
