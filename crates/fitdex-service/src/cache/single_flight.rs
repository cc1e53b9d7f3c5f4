//! Request coalescing for identical concurrent fetches.

use fitdex_core::FitdexResult;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

type InFlight<T> = Shared<BoxFuture<'static, FitdexResult<T>>>;

/// Shares one in-flight call among every caller asking for the same key.
///
/// The first caller for a key starts the call; callers arriving while it
/// runs await the same result, error included. The key is released once
/// the call completes, so the next caller after that starts fresh.
///
/// The call keeps running as long as any caller is still waiting on it,
/// even if the caller that started it was dropped. When the last waiter
/// is dropped the call is dropped with it and the key is released.
pub struct SingleFlight<T> {
    in_flight: Arc<Mutex<HashMap<String, InFlight<T>>>>,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs `call` for `key`, or joins the call already running for it.
    pub async fn run<F>(&self, key: &str, call: F) -> FitdexResult<T>
    where
        F: Future<Output = FitdexResult<T>> + Send + 'static,
    {
        let shared = {
            let mut in_flight = self.in_flight.lock();
            if let Some(existing) = in_flight.get(key) {
                debug!(key = %key, "Joining in-flight request");
                existing.clone()
            } else {
                let registry = Arc::clone(&self.in_flight);
                let owned_key = key.to_string();
                let fut = async move {
                    let result = call.await;
                    registry.lock().remove(&owned_key);
                    result
                }
                .boxed()
                .shared();
                in_flight.insert(key.to_string(), fut.clone());
                fut
            }
        };

        let mut waiter = Waiter {
            registry: &self.in_flight,
            key,
            shared,
            finished: false,
        };
        let result = (&mut waiter.shared).await;
        waiter.finished = true;
        result
    }

    /// Number of keys with a call currently running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// One caller's handle on a shared call.
///
/// Dropping the last unfinished handle removes the registry entry, which
/// would otherwise hold a call nobody polls.
struct Waiter<'a, T> {
    registry: &'a Mutex<HashMap<String, InFlight<T>>>,
    key: &'a str,
    shared: InFlight<T>,
    finished: bool,
}

impl<T> Drop for Waiter<'_, T> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut in_flight = self.registry.lock();
        // Two handles left: the registry's and ours.
        let abandoned = in_flight
            .get(self.key)
            .is_some_and(|f| f.ptr_eq(&self.shared) && f.strong_count() == Some(2));
        if abandoned {
            debug!(key = %self.key, "Dropping abandoned in-flight request");
            in_flight.remove(self.key);
        }
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}
