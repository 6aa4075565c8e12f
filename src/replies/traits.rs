//! Reply selection and scheduling traits for the simulated assistant.

use async_trait::async_trait;

/// Chooses an assistant reply for a user message.
///
/// The selection source is behind this seam so tests can swap a deterministic
/// implementation in place of entropy-seeded randomness.
pub trait ReplySelector: Send + Sync {
    /// Pick a reply. `context` is the user message that prompted it.
    fn select(&self, context: &str) -> String;
    fn name(&self) -> &str;
}

/// Schedules simulated assistant replies.
///
/// Every scheduled reply is independent: concurrent user messages in the same
/// session spawn one pending reply each, with no suppression or coalescing.
/// There is no cancellation; a reply always delivers unless its session was
/// deleted first, in which case the store discards it.
#[async_trait]
pub trait ReplyScheduler: Send + Sync {
    /// Queue a reply to `session_id` for delivery after the simulated latency.
    /// Returns immediately; the reply lands through the session store.
    async fn schedule(&self, session_id: &str, user_text: &str);

    /// Number of replies still in flight for a session. The typing indicator
    /// is `pending(id) > 0`.
    fn pending(&self, session_id: &str) -> usize;

    /// Wait until every in-flight reply has delivered (or been discarded).
    async fn flush(&self);

    fn name(&self) -> &str;
}
