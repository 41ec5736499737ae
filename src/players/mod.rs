//! Debater implementations.
//!
//! ## Kinds
//!
//! - [`Kind::Baseline`]: one sampled sentence per turn
//! - [`Kind::PromptSearch`]: best of k sampled sentences by rated persuasiveness
//! - [`Kind::Mcts`]: full tree search via [`crate::mcts::Search`]
mod debater;
mod kind;

pub use debater::*;
pub use kind::*;
