pub mod canned;
pub mod scheduler;
pub mod traits;

pub use canned::{CannedSelector, CANNED_REPLIES};
pub use scheduler::{FixedDelayScheduler, DEFAULT_REPLY_DELAY};
pub use traits::{ReplyScheduler, ReplySelector};

use std::sync::Arc;

/// Factory: build the reply selector from an optional fixed seed.
pub fn create_selector(seed: Option<u64>) -> Arc<dyn ReplySelector> {
    match seed {
        Some(seed) => Arc::new(CannedSelector::seeded(seed)),
        None => Arc::new(CannedSelector::from_entropy()),
    }
}
