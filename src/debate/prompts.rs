//! Chat prompts for the text oracles, and parsing of their replies.
use super::side::Side;
use super::transcript::Transcript;
use crate::SCORE_MAX;
use crate::SCORE_NEUTRAL;
use crate::SCORER_CONTEXT;
use crate::Score;

/// One chat message in an OpenAI-style conversation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// ask for one more sentence on behalf of `side`
pub fn debater(side: Side, motion: &str, transcript: &Transcript) -> Vec<Message> {
    let context = if transcript.is_empty() {
        String::new()
    } else {
        format!("\nDebate so far:\n{}", transcript.context(SCORER_CONTEXT))
    };
    vec![
        Message::system(format!(
            "You are a persuasive debater arguing {}:\n\"{}\"{}",
            side.stance(),
            motion,
            context
        )),
        Message::user("Write ONE compelling sentence (≤25 words) that advances your argument."),
    ]
}

/// ask for a 0-10 persuasiveness rating of `statement` for `side`
pub fn scorer(statement: &str, side: Side, motion: &str, context: &str) -> Vec<Message> {
    vec![
        Message::system("Rate persuasiveness 0-10; answer with one integer."),
        Message::user(format!(
            "Motion: {}\nContext: {}\nSentence: {}\nRate for {} side.",
            motion,
            context,
            statement,
            side.stance()
        )),
    ]
}

/// ask for a JSON verdict over the whole transcript
pub fn judge(transcript: &Transcript) -> Vec<Message> {
    vec![
        Message::system(concat!(
            "You are the sole judge of a three-round debate.\n",
            "Return JSON: {\"winner\":\"A|B|draw\",\"score_A\":0-10,\"score_B\":0-10,\"reason\":\"<20 words>\"}"
        )),
        Message::user(transcript.to_string()),
    ]
}

/// follow-up sent when the judge reply was not valid JSON
pub fn correction() -> Message {
    Message::user("Please correct to valid JSON only.")
}

/// first integer in the reply, clamped to the rating scale.
/// replies without digits are neutral. a digit run too long for
/// any integer is still off the top of the scale.
pub fn rating(reply: &str) -> Score {
    reply
        .split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .map(|run| match run.parse::<u64>() {
            Ok(n) => n.min(SCORE_MAX as u64) as Score,
            Err(_) => SCORE_MAX,
        })
        .unwrap_or(SCORE_NEUTRAL)
}
