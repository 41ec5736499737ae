use super::Generator;
use super::Judge;
use super::Scorer;
use crate::Score;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::debate::Verdict;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Call-counting decorator over any oracle.
///
/// Counts every request forwarded to the inner oracle, successful or not,
/// per capability.
#[derive(Debug, Default)]
pub struct Counted<T> {
    inner: T,
    generations: AtomicUsize,
    scorings: AtomicUsize,
    judgements: AtomicUsize,
}

impl<T> From<T> for Counted<T> {
    fn from(inner: T) -> Self {
        Self {
            inner,
            generations: AtomicUsize::new(0),
            scorings: AtomicUsize::new(0),
            judgements: AtomicUsize::new(0),
        }
    }
}

impl<T> Counted<T> {
    pub fn inner(&self) -> &T {
        &self.inner
    }
    pub fn generations(&self) -> usize {
        self.generations.load(Ordering::Relaxed)
    }
    pub fn scorings(&self) -> usize {
        self.scorings.load(Ordering::Relaxed)
    }
    pub fn judgements(&self) -> usize {
        self.judgements.load(Ordering::Relaxed)
    }
    pub fn calls(&self) -> usize {
        self.generations() + self.scorings() + self.judgements()
    }
}

impl<T> Generator for Counted<T>
where
    T: Generator,
{
    fn generate(
        &self,
        transcript: &Transcript,
        side: Side,
        motion: &str,
        count: usize,
    ) -> anyhow::Result<Vec<String>> {
        self.generations.fetch_add(1, Ordering::Relaxed);
        self.inner.generate(transcript, side, motion, count)
    }
}

impl<T> Scorer for Counted<T>
where
    T: Scorer,
{
    fn score(
        &self,
        statement: &str,
        side: Side,
        motion: &str,
        context: &str,
    ) -> anyhow::Result<Score> {
        self.scorings.fetch_add(1, Ordering::Relaxed);
        self.inner.score(statement, side, motion, context)
    }
}

impl<T> Judge for Counted<T>
where
    T: Judge,
{
    fn judge(&self, transcript: &Transcript) -> anyhow::Result<Verdict> {
        self.judgements.fetch_add(1, Ordering::Relaxed);
        self.inner.judge(transcript)
    }
}
