use crate::debate::Transcript;
use crate::debate::Verdict;
use crate::oracle::Judge;
use crate::players::Debater;
use std::sync::Arc;

/// Coordinator for a single debate match.
///
/// Room alternates turns strictly, pro first, appending each
/// utterance with its speaker tag, then hands the finished transcript
/// to the judge. Each debater's search is independent of the other's;
/// nothing is shared between them but the transcript.
pub struct Room {
    pro: Debater,
    con: Debater,
    judge: Arc<dyn Judge>,
    rounds: usize,
}

impl Room {
    pub fn new(pro: Debater, con: Debater, judge: Arc<dyn Judge>, rounds: usize) -> Self {
        Self {
            pro,
            con,
            judge,
            rounds,
        }
    }

    /// play every round and ask for a verdict.
    /// a failing judge yields a draw.
    pub fn play(&self) -> (Verdict, Transcript) {
        let mut transcript = Transcript::empty();
        for turn in 0..self.rounds {
            for debater in [&self.pro, &self.con] {
                let utterance = debater.next_move(&transcript, turn);
                log::info!("{} ({}): {}", debater.side(), debater.kind(), utterance);
                transcript = transcript.with(debater.side(), &utterance);
            }
        }
        let verdict = self
            .judge
            .judge(&transcript)
            .inspect_err(|e| log::warn!("judging failed: {}", e))
            .unwrap_or_else(|_| Verdict::draw("error"));
        log::info!("{}", verdict);
        (verdict, transcript)
    }
}
