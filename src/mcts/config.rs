use crate::DRY_RUN_SEED;
use crate::MCTS_CANDIDATES;
use crate::MCTS_DEBATE_DEPTH;
use crate::MCTS_EXPLORATION;
use crate::MCTS_ITERATIONS;
use crate::MCTS_ROLLOUT_DEPTH;
use crate::Utility;

/// Search knobs, fixed for the lifetime of one search.
///
/// Every field has a crate-wide default, so a JSON file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub iterations: usize,
    pub max_rollout_depth: usize,
    /// rounds, not plies: the transcript ceiling is twice this
    pub max_debate_depth: usize,
    pub exploration: Utility,
    pub candidates: usize,
    pub dry_run: bool,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: MCTS_ITERATIONS,
            max_rollout_depth: MCTS_ROLLOUT_DEPTH,
            max_debate_depth: MCTS_DEBATE_DEPTH,
            exploration: MCTS_EXPLORATION,
            candidates: MCTS_CANDIDATES,
            dry_run: false,
            seed: DRY_RUN_SEED,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        let config = serde_json::from_str::<Self>(&text)
            .map_err(|e| anyhow::anyhow!("parse config {}: {}", path.display(), e))?;
        config.validate()
    }
    pub fn validate(self) -> anyhow::Result<Self> {
        if self.iterations == 0 {
            anyhow::bail!("iterations must be positive");
        }
        if self.max_debate_depth == 0 {
            anyhow::bail!("max_debate_depth must be positive");
        }
        if self.candidates == 0 {
            anyhow::bail!("candidates must be positive");
        }
        if !self.exploration.is_finite() || self.exploration < 0. {
            anyhow::bail!("exploration must be finite and non-negative");
        }
        Ok(self)
    }
    /// transcript length at which a state is terminal
    pub fn horizon(&self) -> usize {
        self.max_debate_depth * 2
    }
    pub fn with_iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }
    pub fn with_debate_depth(self, max_debate_depth: usize) -> Self {
        Self {
            max_debate_depth,
            ..self
        }
    }
    pub fn with_rollout_depth(self, max_rollout_depth: usize) -> Self {
        Self {
            max_rollout_depth,
            ..self
        }
    }
    pub fn with_dry_run(self, dry_run: bool) -> Self {
        Self { dry_run, ..self }
    }
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
}
