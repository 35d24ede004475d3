//! Serializes mutating hardware commands.
//!
//! At most one start/stop runs at a time; later ones wait their turn in FIFO
//! order. An emergency stop cancels whatever start/stop is running, turns away
//! every start/stop that arrived before it took the slot, and then runs.

use std::{
    future::Future,
    sync::{
        Mutex as StdMutex, MutexGuard as StdMutexGuard,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::executor::CommandError;

/// Single-slot lock for control commands with emergency preemption.
#[derive(Debug, Default)]
pub struct ControlGate {
    slot: Mutex<()>,
    in_flight: StdMutex<Option<CancellationToken>>,
    pending_emergencies: AtomicUsize,
    emergencies_started: AtomicU64,
}

impl ControlGate {
    /// Creates an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a control command currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.slot.try_lock().is_err()
    }

    /// Runs a start/stop command once the slot is free.
    ///
    /// `f` receives a token that fires if an emergency stop arrives while it
    /// runs. Returns [`CommandError::Preempted`] without calling `f` when an
    /// emergency stop is waiting for the slot or ran while this call waited.
    pub async fn run_routine<F, Fut, T>(&self, f: F) -> Result<T, CommandError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, CommandError>>,
    {
        let seen = self.emergencies_started.load(Ordering::SeqCst);
        let _slot = self.slot.lock().await;

        // Publish the token before checking for emergencies so that an
        // emergency stop arriving in between either sees the token or is seen
        // here.
        let token = CancellationToken::new();
        let _in_flight = InFlight::register(self, token.clone());
        if self.pending_emergencies.load(Ordering::SeqCst) > 0
            || self.emergencies_started.load(Ordering::SeqCst) != seen
        {
            return Err(CommandError::Preempted);
        }

        f(token).await
    }

    /// Runs an emergency stop ahead of any queued start/stop.
    pub async fn run_emergency<F, Fut, T>(&self, f: F) -> Result<T, CommandError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CommandError>>,
    {
        let pending = PendingEmergency::register(self);
        let in_flight = self.lock_in_flight().take();
        if let Some(token) = in_flight {
            tracing::warn!("Emergency stop requested, cancelling in-flight control command.");
            token.cancel();
        }

        let slot = self.slot.lock().await;
        self.emergencies_started.fetch_add(1, Ordering::SeqCst);
        let result = f().await;

        // Clear the pending mark while still holding the slot, so the next
        // caller never sees a stale one.
        drop(pending);
        drop(slot);
        result
    }

    fn lock_in_flight(&self) -> StdMutexGuard<'_, Option<CancellationToken>> {
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears the in-flight token when the routine command finishes or is dropped.
struct InFlight<'a> {
    gate: &'a ControlGate,
}

impl<'a> InFlight<'a> {
    fn register(gate: &'a ControlGate, token: CancellationToken) -> Self {
        *gate.lock_in_flight() = Some(token);
        Self { gate }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.lock_in_flight().take();
    }
}

/// Keeps the pending-emergency count accurate even if the request is dropped.
struct PendingEmergency<'a> {
    gate: &'a ControlGate,
}

impl<'a> PendingEmergency<'a> {
    fn register(gate: &'a ControlGate) -> Self {
        gate.pending_emergencies.fetch_add(1, Ordering::SeqCst);
        Self { gate }
    }
}

impl Drop for PendingEmergency<'_> {
    fn drop(&mut self) {
        self.gate.pending_emergencies.fetch_sub(1, Ordering::SeqCst);
    }
}
