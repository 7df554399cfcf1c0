//! Cancellable execution context for API calls.
//!
//! A [`Context`] carries an optional [`CancellationReceiver`] and an optional
//! deadline. Every call made with it races the network exchange against
//! both; whichever fires first wins and the exchange is dropped.

use std::future::{pending, Future};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context stopped an in-flight call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Cancelled,
    DeadlineExceeded,
}

/// Cancels every call whose context holds one of its receivers.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    tx: Arc<watch::Sender<bool>>,
}

/// Receiving half of a [`CancellationToken`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// A fresh token and its first receiver.
    pub fn pair() -> (Self, CancellationReceiver) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, CancellationReceiver { rx })
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Another receiver for the same token.
    pub fn receiver(&self) -> CancellationReceiver {
        CancellationReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancellationReceiver {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the token is cancelled. Never resolves if the token is
    /// dropped without cancelling.
    pub async fn cancelled(&mut self) {
        if self.is_cancelled() {
            return;
        }
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            pending::<()>().await;
        }
    }
}

/// Execution context passed to every API call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<CancellationReceiver>,
    deadline: Option<Instant>,
}

impl Context {
    /// No cancellation, no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Fail calls that have not completed within `timeout` from now. An
    /// earlier existing deadline is kept. A timeout too large to represent
    /// adds no deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationReceiver) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Already cancelled or past the deadline.
    pub fn interrupted(&self) -> Option<Interrupt> {
        if self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            return Some(Interrupt::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Some(Interrupt::DeadlineExceeded);
        }
        None
    }

    /// Drive `fut` until it completes or the context interrupts it.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupt> {
        if let Some(interrupt) = self.interrupted() {
            return Err(interrupt);
        }
        let mut cancel = self.cancel.clone();
        let cancelled = async {
            match cancel.as_mut() {
                Some(rx) => rx.cancelled().await,
                None => pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = cancelled => Err(Interrupt::Cancelled),
            _ = expired => Err(Interrupt::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}
