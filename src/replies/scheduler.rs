//! Fixed-latency reply scheduler standing in for a real backend call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::traits::{ReplyScheduler, ReplySelector};
use crate::sessions::SessionStore;

/// Default simulated backend latency.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Delivers one assistant reply per scheduled request after a fixed delay.
///
/// Each request runs as its own tokio task: sleep, select, append. Task
/// handles are recorded so [`ReplyScheduler::flush`] can await delivery, which
/// makes the deleted-session path an explicit code path instead of a race.
pub struct FixedDelayScheduler {
    store: Arc<dyn SessionStore>,
    selector: Arc<dyn ReplySelector>,
    delay: Duration,
    pending: Arc<Mutex<HashMap<String, usize>>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl FixedDelayScheduler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        selector: Arc<dyn ReplySelector>,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            selector,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

fn decrement(pending: &Mutex<HashMap<String, usize>>, session_id: &str) {
    let mut pending = pending.lock();
    if let Some(count) = pending.get_mut(session_id) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            pending.remove(session_id);
        }
    }
}

#[async_trait]
impl ReplyScheduler for FixedDelayScheduler {
    async fn schedule(&self, session_id: &str, user_text: &str) {
        {
            let mut pending = self.pending.lock();
            *pending.entry(session_id.to_string()).or_insert(0) += 1;
        }

        let store = Arc::clone(&self.store);
        let selector = Arc::clone(&self.selector);
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        let session_id = session_id.to_string();
        let user_text = user_text.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = selector.select(&user_text);
            store.append_assistant_message(&session_id, &reply).await;
            decrement(&pending, &session_id);
            tracing::debug!(session_id = %session_id, "reply delivered");
        });
        self.tasks.lock().push(handle);
    }

    fn pending(&self, session_id: &str) -> usize {
        self.pending.lock().get(session_id).copied().unwrap_or(0)
    }

    async fn flush(&self) {
        let drained: Vec<JoinHandle<()>> = {
            let mut tasks = self.tasks.lock();
            tasks.drain(..).collect()
        };
        for handle in drained {
            let _ = handle.await;
        }
    }

    fn name(&self) -> &str {
        "fixed_delay"
    }
}
