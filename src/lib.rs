//! Monte-Carlo Tree Search for adversarial two-party text debates.
//!
//! A debate is an alternating sequence of utterances. Each candidate
//! sentence is a move, each transcript is a state, and the search picks
//! the next utterance by growing a game tree with UCB1 selection and
//! rollouts scored by an external persuasiveness oracle.

pub mod debate;
pub mod gameroom;
pub mod mcts;
pub mod oracle;
pub mod players;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Backpropagated rewards, node values, and UCB1 scores in [-1, 1] (or +inf).
pub type Utility = f32;
/// Raw persuasiveness rating on the [0, 10] scale.
pub type Score = f32;
/// Visit counts accumulated during backpropagation.
pub type Visits = usize;

// ============================================================================
// MCTS SEARCH PARAMETERS
// ============================================================================
/// Select/expand/simulate/backpropagate passes per decision.
pub const MCTS_ITERATIONS: usize = 20;
/// UCB1 exploration weight (≈ √2).
pub const MCTS_EXPLORATION: Utility = 1.414;
/// Rollout horizon in plies.
pub const MCTS_ROLLOUT_DEPTH: usize = 4;
/// Hard ceiling on debate length in rounds (two plies per round).
pub const MCTS_DEBATE_DEPTH: usize = 6;
/// Candidate actions requested when a node is first expanded.
pub const MCTS_CANDIDATES: usize = 3;

// ============================================================================
// SCORING
// ============================================================================
/// Trailing utterances shown to the scorer as context.
pub const SCORER_CONTEXT: usize = 4;
/// Midpoint of the persuasiveness scale, maps to zero reward.
pub const SCORE_NEUTRAL: Score = 5.0;
/// Upper bound of the persuasiveness scale.
pub const SCORE_MAX: Score = 10.0;

// ============================================================================
// DEBATERS & MATCHES
// ============================================================================
/// Samples drawn by the best-of-k prompt search debater.
pub const PROMPT_SEARCH_K: usize = 3;
/// Rounds per match (one pro and one con utterance each).
pub const DEBATE_ROUNDS: usize = 3;
/// Last-resort utterance when no candidate could be produced.
pub const FALLBACK_UTTERANCE: &str = "I maintain my position on this important issue.";

// ============================================================================
// DIAGNOSTICS
// ============================================================================
/// Seed for dry-run mock scoring.
pub const DRY_RUN_SEED: u64 = 42;
/// Deepest level rendered by the tree dump.
pub const TREE_DRAW_DEPTH: usize = 10;
/// Characters of each action shown in the tree dump.
pub const TREE_DRAW_PREVIEW: usize = 30;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
