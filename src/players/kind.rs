/// Which decision procedure a debater uses.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Kind {
    Baseline,
    PromptSearch,
    Mcts,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::PromptSearch => write!(f, "prompt-mcts"),
            Self::Mcts => write!(f, "true-mcts"),
        }
    }
}

impl std::str::FromStr for Kind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "baseline" => Ok(Self::Baseline),
            "prompt-mcts" => Ok(Self::PromptSearch),
            "true-mcts" => Ok(Self::Mcts),
            other => Err(anyhow::anyhow!(
                "invalid debater kind: {} (expected baseline | prompt-mcts | true-mcts)",
                other
            )),
        }
    }
}
