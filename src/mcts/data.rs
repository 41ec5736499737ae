use crate::Utility;
use crate::Visits;
use crate::debate::Side;
use crate::debate::Transcript;

/// Per-node payload of the search tree.
///
/// Statistics are always expressed from the perspective of
/// `side`, the side to move from this state. `untried` is filled
/// once, on the first expansion attempt, and drains as children
/// are attached.
#[derive(Debug, Clone)]
pub struct Data {
    transcript: Transcript,
    side: Side,
    visits: Visits,
    reward: Utility,
    untried: Vec<String>,
    generated: bool,
    terminal: bool,
}

impl From<(Transcript, Side)> for Data {
    fn from((transcript, side): (Transcript, Side)) -> Self {
        Self {
            transcript,
            side,
            visits: 0,
            reward: 0.,
            untried: Vec::new(),
            generated: false,
            terminal: false,
        }
    }
}

impl Data {
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn visits(&self) -> Visits {
        self.visits
    }
    pub fn reward(&self) -> Utility {
        self.reward
    }
    pub fn untried(&self) -> &[String] {
        &self.untried
    }
    pub fn is_generated(&self) -> bool {
        self.generated
    }
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
    /// mean reward, zero when unvisited
    pub fn value(&self) -> Utility {
        if self.visits == 0 {
            0.
        } else {
            self.reward / self.visits as Utility
        }
    }
    /// candidates have been generated and every one has been expanded
    pub fn is_fully_expanded(&self) -> bool {
        self.generated && self.untried.is_empty()
    }
    /// accumulate one backpropagation pass. does not touch ancestors.
    pub fn update(&mut self, reward: Utility) {
        self.visits += 1;
        self.reward += reward;
    }
    pub fn terminate(&mut self) {
        self.terminal = true;
    }
    /// record the candidate batch, dropping blanks and repeats
    pub fn offer(&mut self, actions: Vec<String>) {
        self.generated = true;
        for action in actions {
            let action = action.trim();
            if !action.is_empty() && !self.untried.iter().any(|a| a == action) {
                self.untried.push(action.to_string());
            }
        }
    }
    /// next action awaiting expansion
    pub fn pending(&self) -> Option<&str> {
        self.untried.first().map(String::as_str)
    }
    pub fn retire(&mut self, action: &str) {
        self.untried.retain(|a| a != action);
    }
}
