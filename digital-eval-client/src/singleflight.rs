//! Single-flight execution of an async operation.
//!
//! At most one operation runs at a time. Callers arriving while it runs await
//! the same shared future and receive a clone of its output. Once the output
//! is ready the slot empties and the next caller starts a fresh run.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Flight<T> = Shared<BoxFuture<'static, T>>;
type Slot<T> = Arc<Mutex<Option<(u64, Flight<T>)>>>;

/// A slot holding at most one in-flight operation.
pub struct SingleFlight<T: Clone> {
    slot: Slot<T>,
    next_id: AtomicU64,
}

impl<T: Clone> fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(0),
        }
    }
}

/// Whether a caller started the flight or joined one already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightRole {
    /// This caller installed the operation.
    Leader,
    /// This caller awaited an operation someone else installed.
    Follower,
}

impl<T: Clone> SingleFlight<T> {
    /// Whether an operation is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `make()` unless an operation is already in flight, in which case
    /// join it. `make` is only called by the leader.
    ///
    /// The operation empties the slot as its last step, before any caller
    /// sees its output, so a caller arriving after completion always starts a
    /// fresh run. An operation whose callers all went away stays in the slot
    /// and is driven to completion by the next caller.
    pub async fn run<F, Fut>(&self, make: F) -> (T, FlightRole)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (flight, role) = {
            let mut slot = self.slot.lock();
            match slot.as_ref() {
                Some((_, flight)) => (flight.clone(), FlightRole::Follower),
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let flight = release_on_completion(make(), Arc::downgrade(&self.slot), id)
                        .boxed()
                        .shared();
                    *slot = Some((id, flight.clone()));
                    (flight, FlightRole::Leader)
                }
            }
        };

        (flight.await, role)
    }
}

async fn release_on_completion<T, Fut>(
    operation: Fut,
    slot: Weak<Mutex<Option<(u64, Flight<T>)>>>,
    id: u64,
) -> T
where
    T: Clone,
    Fut: Future<Output = T>,
{
    let output = operation.await;
    let Some(slot) = slot.upgrade() else {
        return output;
    };
    let finished = {
        let mut slot = slot.lock();
        match slot.as_ref() {
            Some((current, _)) if *current == id => slot.take(),
            _ => None,
        }
    };
    drop(finished);
    output
}
