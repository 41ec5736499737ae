use crate::SCORE_NEUTRAL;
use crate::Score;

/// Outcome named by the judge.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "draw", alias = "Draw", alias = "DRAW")]
    Draw,
}

/// A judge's ruling over a finished transcript.
/// Field names mirror the JSON the judge is asked to return.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Verdict {
    pub winner: Winner,
    #[serde(rename = "score_A")]
    pub score_a: Score,
    #[serde(rename = "score_B")]
    pub score_b: Score,
    #[serde(default)]
    pub reason: String,
}

impl Verdict {
    pub fn draw(reason: &str) -> Self {
        Self {
            winner: Winner::Draw,
            score_a: SCORE_NEUTRAL,
            score_b: SCORE_NEUTRAL,
            reason: reason.to_string(),
        }
    }
    /// deserialize the outermost `{...}` span of a free-text reply
    pub fn parse(reply: &str) -> anyhow::Result<Self> {
        let head = reply
            .find('{')
            .ok_or_else(|| anyhow::anyhow!("no json object in judge reply"))?;
        let tail = reply
            .rfind('}')
            .filter(|tail| *tail > head)
            .ok_or_else(|| anyhow::anyhow!("unterminated json object in judge reply"))?;
        Ok(serde_json::from_str(&reply[head..=tail])?)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let winner = match self.winner {
            Winner::A => "A (pro)",
            Winner::B => "B (con)",
            Winner::Draw => "draw",
        };
        write!(
            f,
            "winner: {}  score: {}–{}  reason: {}",
            winner, self.score_a, self.score_b, self.reason
        )
    }
}
