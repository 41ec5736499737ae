use super::Generator;
use super::Judge;
use super::Scorer;
use crate::Score;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::debate::Verdict;
use crate::debate::prompts;
use crate::debate::prompts::Message;
use rayon::prelude::*;

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(serde::Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: Message,
}

/// Chat-completions oracle for any OpenAI-compatible endpoint.
///
/// Configured from `DEBATE_API_KEY`, `DEBATE_MODEL`, and
/// `DEBATE_ENDPOINT`. Every request is a single blocking HTTP call;
/// there is no retry policy beyond the judge's one JSON correction.
pub struct Llm {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    key: String,
}

impl Llm {
    const ENDPOINT: &'static str = "https://api.groq.com/openai/v1/chat/completions";
    const MODEL: &'static str = "gemma2-9b-it";
    const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
    const GENERATE_TEMPERATURE: f32 = 1.2;
    const GENERATE_TOKENS: u32 = 40;
    const SCORE_TOKENS: u32 = 8;
    const JUDGE_TOKENS: u32 = 96;
    const JUDGE_ATTEMPTS: usize = 2;

    pub fn new(endpoint: &str, model: &str, key: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Self::TIMEOUT)
                .build()?,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            key: key.to_string(),
        })
    }
    pub fn from_env() -> anyhow::Result<Self> {
        let key = std::env::var("DEBATE_API_KEY")
            .map_err(|_| anyhow::anyhow!("DEBATE_API_KEY must be set for live debates"))?;
        let model = std::env::var("DEBATE_MODEL").unwrap_or_else(|_| Self::MODEL.to_string());
        let endpoint =
            std::env::var("DEBATE_ENDPOINT").unwrap_or_else(|_| Self::ENDPOINT.to_string());
        log::info!("using {} at {}", model, endpoint);
        Self::new(&endpoint, &model, &key)
    }

    /// one completion, trimmed
    pub fn chat(&self, messages: &[Message], temperature: f32, max_tokens: u32) -> anyhow::Result<String> {
        let request = Request {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json::<Response>()?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("completion contained no choices"))
    }
}

impl Generator for Llm {
    fn generate(
        &self,
        transcript: &Transcript,
        side: Side,
        motion: &str,
        count: usize,
    ) -> anyhow::Result<Vec<String>> {
        let prompt = prompts::debater(side, motion, transcript);
        gather(count, || {
            self.chat(&prompt, Self::GENERATE_TEMPERATURE, Self::GENERATE_TOKENS)
        })
    }
}

impl Scorer for Llm {
    fn score(&self, statement: &str, side: Side, motion: &str, context: &str) -> anyhow::Result<Score> {
        let prompt = prompts::scorer(statement, side, motion, context);
        let reply = self.chat(&prompt, 0., Self::SCORE_TOKENS)?;
        Ok(prompts::rating(&reply))
    }
}

impl Judge for Llm {
    fn judge(&self, transcript: &Transcript) -> anyhow::Result<Verdict> {
        Ok(rule(prompts::judge(transcript), Self::JUDGE_ATTEMPTS, |messages| {
            self.chat(messages, 0., Self::JUDGE_TOKENS)
        }))
    }
}

/// up to `count` distinct non-blank replies. fires `count` asks in
/// parallel, then tops up sequentially until `2 * count` asks in total.
/// fails only if nothing was kept and some ask failed.
fn gather<F>(count: usize, ask: F) -> anyhow::Result<Vec<String>>
where
    F: Fn() -> anyhow::Result<String> + Sync,
{
    let mut kept = Vec::<String>::with_capacity(count);
    let mut error = None;
    let mut keep = |reply: anyhow::Result<String>, kept: &mut Vec<String>| match reply {
        Ok(reply) => {
            let reply = reply.trim();
            if !reply.is_empty() && !kept.iter().any(|k| k == reply) {
                kept.push(reply.to_string());
            }
        }
        Err(e) => error = Some(e),
    };
    for reply in (0..count).into_par_iter().map(|_| ask()).collect::<Vec<_>>() {
        keep(reply, &mut kept);
    }
    for _ in count..2 * count {
        if kept.len() >= count {
            break;
        }
        keep(ask(), &mut kept);
    }
    kept.truncate(count);
    match (kept.is_empty(), error) {
        (true, Some(e)) => Err(e),
        _ => Ok(kept),
    }
}

/// ask for a verdict up to `attempts` times, following every
/// unparseable reply with a request for valid JSON.
fn rule<F>(mut messages: Vec<Message>, attempts: usize, ask: F) -> Verdict
where
    F: Fn(&[Message]) -> anyhow::Result<String>,
{
    for attempt in 0..attempts {
        match ask(&messages) {
            Err(e) => log::warn!("judge attempt {} failed: {}", attempt, e),
            Ok(reply) => match Verdict::parse(&reply) {
                Ok(verdict) => return verdict,
                Err(e) => {
                    log::warn!("judge attempt {} unparseable: {}", attempt, e);
                    messages.push(Message::assistant(reply));
                    messages.push(prompts::correction());
                }
            },
        }
    }
    Verdict::draw("parse_fail")
}
