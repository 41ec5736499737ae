use super::kind::Kind;
use crate::FALLBACK_UTTERANCE;
use crate::PROMPT_SEARCH_K;
use crate::SCORE_NEUTRAL;
use crate::SCORER_CONTEXT;
use crate::Score;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::mcts::Config;
use crate::mcts::Search;
use crate::oracle::Generator;
use crate::oracle::Mock;
use crate::oracle::Scorer;
use std::sync::Arc;

/// One side of a debate.
///
/// A closed set of decision procedures behind a single operation,
/// [`Debater::next_move`]. None of them fail: every path degrades to
/// [`FALLBACK_UTTERANCE`].
pub enum Debater {
    Baseline {
        side: Side,
        motion: String,
        generator: Arc<dyn Generator>,
    },
    PromptSearch {
        side: Side,
        motion: String,
        k: usize,
        generator: Arc<dyn Generator>,
        scorer: Arc<dyn Scorer>,
    },
    Mcts(Search),
}

impl Debater {
    /// dry-run configs swap in the seeded [`Mock`] for every kind
    pub fn build(
        kind: Kind,
        side: Side,
        motion: &str,
        config: Config,
        generator: Arc<dyn Generator>,
        scorer: Arc<dyn Scorer>,
    ) -> Self {
        let (generator, scorer) = if config.dry_run {
            let mock = Arc::new(Mock::new(config.seed));
            (mock.clone() as Arc<dyn Generator>, mock as Arc<dyn Scorer>)
        } else {
            (generator, scorer)
        };
        match kind {
            Kind::Baseline => Self::Baseline {
                side,
                motion: motion.to_string(),
                generator,
            },
            Kind::PromptSearch => Self::PromptSearch {
                side,
                motion: motion.to_string(),
                k: PROMPT_SEARCH_K,
                generator,
                scorer,
            },
            Kind::Mcts => Self::Mcts(Search::new(side, motion, config, generator, scorer)),
        }
    }
    pub fn kind(&self) -> Kind {
        match self {
            Self::Baseline { .. } => Kind::Baseline,
            Self::PromptSearch { .. } => Kind::PromptSearch,
            Self::Mcts(_) => Kind::Mcts,
        }
    }
    pub fn side(&self) -> Side {
        match self {
            Self::Baseline { side, .. } => *side,
            Self::PromptSearch { side, .. } => *side,
            Self::Mcts(search) => search.side(),
        }
    }

    /// the utterance this debater says next
    pub fn next_move(&self, transcript: &Transcript, turn: usize) -> String {
        log::debug!("{} ({}) to move on turn {}", self.side(), self.kind(), turn);
        match self {
            Self::Baseline {
                side,
                motion,
                generator,
            } => Self::sample(generator.as_ref(), transcript, *side, motion)
                .unwrap_or_else(|| FALLBACK_UTTERANCE.to_string()),
            Self::PromptSearch {
                side,
                motion,
                k,
                generator,
                scorer,
            } => {
                let context = transcript.context(SCORER_CONTEXT);
                (0..*k)
                    .filter_map(|_| Self::sample(generator.as_ref(), transcript, *side, motion))
                    .map(|candidate| {
                        let score = scorer
                            .score(&candidate, *side, motion, &context)
                            .inspect_err(|e| log::warn!("scoring failed: {}", e))
                            .unwrap_or(SCORE_NEUTRAL);
                        (score, candidate)
                    })
                    .fold(None, |best: Option<(Score, String)>, (score, candidate)| match best {
                        Some((max, _)) if max >= score => best,
                        _ => Some((score, candidate)),
                    })
                    .map(|(_, candidate)| candidate)
                    .unwrap_or_else(|| FALLBACK_UTTERANCE.to_string())
            }
            Self::Mcts(search) => search.search(transcript),
        }
    }

    fn sample(
        generator: &dyn Generator,
        transcript: &Transcript,
        side: Side,
        motion: &str,
    ) -> Option<String> {
        generator
            .generate(transcript, side, motion, 1)
            .inspect_err(|e| log::warn!("generation failed for {}: {}", side, e))
            .ok()?
            .into_iter()
            .map(|utterance| utterance.trim().to_string())
            .find(|utterance| !utterance.is_empty())
    }
}
