use super::side::Side;

/// The state of a debate: every utterance so far, in order.
///
/// Utterances are stored with their speaker tag (`"A: ..."` for pro,
/// `"B: ..."` for con). A transcript is never mutated in place; moving
/// produces a new transcript one utterance longer.
#[derive(Debug, Clone, Default, Eq, Hash, PartialEq)]
pub struct Transcript(Vec<String>);

impl Transcript {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
    /// child state: this transcript plus one tagged utterance
    pub fn with(&self, side: Side, utterance: &str) -> Self {
        let mut next = self.0.clone();
        next.push(format!("{}: {}", side.tag(), utterance));
        Self(next)
    }
    /// speaker of the last utterance, by index parity.
    /// assumes strict alternation starting with pro at index 0.
    pub fn speaker(&self) -> Option<Side> {
        self.len().checked_sub(1).map(Side::at)
    }
    /// the trailing `n` utterances joined by newlines
    pub fn context(&self, n: usize) -> String {
        self.0[self.len().saturating_sub(n)..].join("\n")
    }
    /// strip a leading speaker tag, if any
    pub fn untag(utterance: &str) -> &str {
        utterance
            .strip_prefix("A: ")
            .or_else(|| utterance.strip_prefix("B: "))
            .unwrap_or(utterance)
    }
}

impl From<Vec<String>> for Transcript {
    fn from(utterances: Vec<String>) -> Self {
        Self(utterances)
    }
}

impl From<Transcript> for Vec<String> {
    fn from(transcript: Transcript) -> Self {
        transcript.0
    }
}

impl<S> FromIterator<S> for Transcript
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}
