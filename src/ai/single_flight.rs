use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::error::AppError;

type SharedCall = Shared<BoxFuture<'static, Result<String, AppError>>>;

/// Coalesces concurrent calls that carry the same key into one in-flight future.
///
/// The first caller for a key starts the work; later callers with the same key await
/// the same result. The entry is removed as soon as the call settles, so nothing is
/// cached. If every caller drops its future the underlying work is dropped too.
#[derive(Clone, Default)]
pub struct SingleFlight {
    in_flight: Arc<Mutex<HashMap<String, SharedCall>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F, Fut>(&self, key: String, work: F) -> Result<String, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, AppError>> + Send + 'static,
    {
        let call = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(&key) {
                Some(existing) => existing.clone(),
                None => {
                    let registry = Arc::clone(&self.in_flight);
                    let settled_key = key.clone();
                    let fut = work();
                    let call = async move {
                        let result = fut.await;
                        registry.lock().remove(&settled_key);
                        result
                    }
                    .boxed()
                    .shared();
                    in_flight.insert(key.clone(), call.clone());
                    call
                }
            }
        };

        let mut waiter = Waiter {
            in_flight: &self.in_flight,
            key,
            call: Some(call),
        };
        match waiter.call.as_mut() {
            Some(call) => call.await,
            None => Err(AppError::InternalServerError(
                "single-flight handle released before completion".into(),
            )),
        }
    }

    /// Number of distinct calls currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// One caller's handle on a shared call.
///
/// A settled call removes its own map entry. This guard only covers cancellation:
/// when the last waiter goes away before the call settles, the entry is dropped so
/// the work is dropped with it.
///
/// Handles are cloned out of the map and released only while the map lock is held,
/// so the handle count read in `drop` cannot change underneath it.
struct Waiter<'a> {
    in_flight: &'a Mutex<HashMap<String, SharedCall>>,
    key: String,
    call: Option<SharedCall>,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let Some(call) = self.call.take() else {
            return;
        };
        let mut in_flight = self.in_flight.lock();
        // A settled call has already removed its own entry.
        let pending = call.peek().is_none();
        // The map entry and this handle are the only ones left. A handle that
        // polled the call to completion reports no count.
        let abandoned = call.strong_count().map_or(false, |handles| handles <= 2);
        let is_current = in_flight
            .get(&self.key)
            .map_or(false, |current| current.ptr_eq(&call));
        if pending && abandoned && is_current {
            in_flight.remove(&self.key);
        }
        drop(call);
    }
}
