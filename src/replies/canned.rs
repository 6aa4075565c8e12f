//! Canned analyst replies with seedable uniform selection.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::traits::ReplySelector;

/// Stock replies the simulated analyst draws from.
pub const CANNED_REPLIES: [&str; 4] = [
    "Based on current market data, venture capital funding has increased by 23% \
this quarter. The fintech sector is showing particularly strong growth with an \
average deal size of $12.5M.",
    "I'm analyzing the funding patterns you mentioned. Early-stage startups in \
the AI/ML space are attracting significant attention, with seed rounds averaging \
$2.8M compared to $1.9M last year.",
    "The data shows interesting trends in geographic distribution of funding. \
Silicon Valley maintains its lead, but we're seeing increased activity in Austin \
(+45%) and Miami (+67%) markets.",
    "Looking at the valuation metrics, the median post-money valuation for \
Series A rounds has stabilized at $15M after the correction in late 2022. Would \
you like me to dive deeper into any specific sector?",
];

/// Selects uniformly at random from a fixed reply list.
///
/// Selection policy: every candidate has equal probability, drawn with
/// `gen_range(0..len)` from a [`StdRng`]. Seed the generator for
/// deterministic sequences in tests.
pub struct CannedSelector {
    replies: Vec<String>,
    rng: Mutex<StdRng>,
}

impl CannedSelector {
    /// Selector over the stock reply list, seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_replies(Vec::new(), None)
    }

    /// Selector over the stock reply list with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_replies(Vec::new(), Some(seed))
    }

    /// Selector over a custom reply list. An empty list falls back to the
    /// stock replies so `select` always has a candidate.
    pub fn with_replies(replies: Vec<String>, seed: Option<u64>) -> Self {
        let replies = if replies.is_empty() {
            CANNED_REPLIES.iter().map(|r| (*r).to_string()).collect()
        } else {
            replies
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            replies,
            rng: Mutex::new(rng),
        }
    }
}

impl ReplySelector for CannedSelector {
    fn select(&self, _context: &str) -> String {
        let mut rng = self.rng.lock();
        let index = rng.gen_range(0..self.replies.len());
        self.replies[index].clone()
    }

    fn name(&self) -> &str {
        "canned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_selection_is_deterministic() {
        let a = CannedSelector::seeded(42);
        let b = CannedSelector::seeded(42);

        for _ in 0..16 {
            assert_eq!(a.select("hi"), b.select("hi"));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = CannedSelector::seeded(1);
        let b = CannedSelector::seeded(2);

        let left: Vec<String> = (0..16).map(|_| a.select("hi")).collect();
        let right: Vec<String> = (0..16).map(|_| b.select("hi")).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn every_selection_comes_from_the_list() {
        let selector = CannedSelector::seeded(7);
        for _ in 0..32 {
            let reply = selector.select("anything");
            assert!(CANNED_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn custom_replies_are_used() {
        let selector =
            CannedSelector::with_replies(vec!["only answer".to_string()], Some(0));
        assert_eq!(selector.select("hi"), "only answer");
    }

    #[test]
    fn empty_custom_list_falls_back_to_stock() {
        let selector = CannedSelector::with_replies(Vec::new(), Some(0));
        let reply = selector.select("hi");
        assert!(CANNED_REPLIES.contains(&reply.as_str()));
    }
}
