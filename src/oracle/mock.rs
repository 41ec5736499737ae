use super::Generator;
use super::Judge;
use super::Scorer;
use crate::DRY_RUN_SEED;
use crate::SCORE_NEUTRAL;
use crate::Score;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::debate::Verdict;
use crate::debate::Winner;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

/// Offline oracle for dry runs.
///
/// Candidates are shaped like real arguments but numbered by ply.
/// Scores are drawn from [2.5, 7.5] by an rng seeded on
/// (seed, statement, side), so rating the same statement twice
/// always agrees, regardless of call order.
#[derive(Debug, Clone, Copy)]
pub struct Mock {
    seed: u64,
}

impl Default for Mock {
    fn default() -> Self {
        Self::new(DRY_RUN_SEED)
    }
}

impl Mock {
    /// half-width of the mock rating band around the neutral score
    const SPREAD: Score = 2.5;

    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
    fn rng(&self, statement: &str, side: Side) -> SmallRng {
        let ref mut hasher = DefaultHasher::new();
        self.seed.hash(hasher);
        statement.hash(hasher);
        side.hash(hasher);
        SmallRng::seed_from_u64(hasher.finish())
    }
}

impl Generator for Mock {
    fn generate(
        &self,
        transcript: &Transcript,
        side: Side,
        _: &str,
        count: usize,
    ) -> anyhow::Result<Vec<String>> {
        let n = transcript.len() + 1;
        Ok([
            format!("Mock argument {}.1 for {} side", n, side),
            format!("Evidence-based point {}.2 supporting our position", n),
            format!("Counter-argument {}.3 addressing opposition concerns", n),
        ]
        .into_iter()
        .take(count)
        .collect())
    }
}

impl Scorer for Mock {
    fn score(&self, statement: &str, side: Side, _: &str, _: &str) -> anyhow::Result<Score> {
        let lo = SCORE_NEUTRAL - Self::SPREAD;
        let hi = SCORE_NEUTRAL + Self::SPREAD;
        Ok(self.rng(statement, side).random_range(lo..=hi))
    }
}

impl Judge for Mock {
    fn judge(&self, _: &Transcript) -> anyhow::Result<Verdict> {
        Ok(Verdict {
            winner: Winner::A,
            score_a: 7.0,
            score_b: 6.0,
            reason: "mock dry-run judgment".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_distinct_and_truncated() {
        let mock = Mock::default();
        let t = Transcript::from_iter(["A: one", "B: two"]);
        let three = mock.generate(&t, Side::Pro, "m", 3).unwrap();
        assert_eq!(three.len(), 3);
        assert_eq!(three[0], "Mock argument 3.1 for pro side");
        assert!(three.iter().all(|c| three.iter().filter(|d| *d == c).count() == 1));
        assert_eq!(mock.generate(&t, Side::Pro, "m", 1).unwrap().len(), 1);
        assert_eq!(mock.generate(&t, Side::Pro, "m", 8).unwrap().len(), 3);
    }

    #[test]
    fn scores_are_banded_and_idempotent() {
        let mock = Mock::new(7);
        for statement in ["a", "b", "c", "d", "e", "f"] {
            let x = mock.score(statement, Side::Con, "m", "").unwrap();
            let y = mock.score(statement, Side::Con, "m", "").unwrap();
            assert_eq!(x, y);
            assert!((2.5..=7.5).contains(&x));
        }
    }

    #[test]
    fn seed_changes_scores() {
        let statements = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let a = statements
            .iter()
            .map(|s| Mock::new(1).score(s, Side::Pro, "m", "").unwrap())
            .collect::<Vec<_>>();
        let b = statements
            .iter()
            .map(|s| Mock::new(2).score(s, Side::Pro, "m", "").unwrap())
            .collect::<Vec<_>>();
        assert_ne!(a, b);
    }
}
