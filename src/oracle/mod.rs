//! Text oracles consumed by the search and the debaters.
//!
//! Everything that produces or rates actual text sits behind these traits.
//! Calls are synchronous and may block for arbitrary time; failures come back
//! as `Err` and callers choose the fallback (fewer candidates, neutral score).
mod counted;
#[cfg(feature = "llm")]
mod llm;
mod mock;

pub use counted::*;
#[cfg(feature = "llm")]
pub use llm::*;
pub use mock::*;

use crate::Score;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::debate::Verdict;

/// Proposes candidate utterances for the side to move.
pub trait Generator: Send + Sync {
    /// Up to `count` distinct, non-empty candidate sentences.
    /// May return fewer (or none) when the provider keeps failing.
    fn generate(
        &self,
        transcript: &Transcript,
        side: Side,
        motion: &str,
        count: usize,
    ) -> anyhow::Result<Vec<String>>;
}

/// Rates how persuasive a statement is for the side that made it.
pub trait Scorer: Send + Sync {
    /// A rating in [0, 10].
    fn score(&self, statement: &str, side: Side, motion: &str, context: &str)
    -> anyhow::Result<Score>;
}

/// Rules on a finished debate.
pub trait Judge: Send + Sync {
    fn judge(&self, transcript: &Transcript) -> anyhow::Result<Verdict>;
}
