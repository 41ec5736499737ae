use super::config::Config;
use super::tree::Tree;
use crate::FALLBACK_UTTERANCE;
use crate::SCORE_NEUTRAL;
use crate::SCORER_CONTEXT;
use crate::Utility;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::oracle::Generator;
use crate::oracle::Mock;
use crate::oracle::Scorer;
use petgraph::graph::NodeIndex;
use std::sync::Arc;

/// Monte-Carlo Tree Search over debate transcripts for one side.
///
/// Every call to [`Search::search`] grows a fresh [`Tree`] rooted at the
/// given transcript, runs a fixed number of select → expand → simulate →
/// backpropagate passes, and answers with the action of the most visited
/// root child. Trees are never reused across turns.
///
/// Rewards are expressed from the perspective of `side`. The engine owns
/// the sign policy: backpropagation flips the sign at every ply so that
/// each node's statistics read from its own side-to-move.
///
/// Oracle failures never escape. Generation errors shrink the candidate
/// batch, scoring errors give a neutral reward, and the search as a whole
/// always produces some utterance.
pub struct Search {
    side: Side,
    motion: String,
    config: Config,
    generator: Arc<dyn Generator>,
    scorer: Arc<dyn Scorer>,
}

impl Search {
    /// in dry-run mode both oracles are swapped for a seeded [`Mock`].
    pub fn new(
        side: Side,
        motion: &str,
        config: Config,
        generator: Arc<dyn Generator>,
        scorer: Arc<dyn Scorer>,
    ) -> Self {
        if config.dry_run {
            Self::dry(side, motion, config)
        } else {
            Self {
                side,
                motion: motion.to_string(),
                config,
                generator,
                scorer,
            }
        }
    }
    /// search against the offline mock oracle
    pub fn dry(side: Side, motion: &str, config: Config) -> Self {
        let mock = Arc::new(Mock::new(config.seed));
        Self {
            side,
            motion: motion.to_string(),
            config: Config {
                dry_run: true,
                ..config
            },
            generator: mock.clone(),
            scorer: mock,
        }
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn motion(&self) -> &str {
        &self.motion
    }
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// pick the next utterance for `side` after `transcript`
    pub fn search(&self, transcript: &Transcript) -> String {
        if self.config.dry_run {
            log::info!("dry-run mcts search ({})", self.side);
            log::info!("motion:               {}", self.motion);
            log::info!("current state:        {} moves", transcript.len());
            log::info!("iterations:           {}", self.config.iterations);
            log::info!("max rollout depth:    {}", self.config.max_rollout_depth);
            log::info!("exploration constant: {}", self.config.exploration);
        }
        let tree = self.grow(transcript);
        if self.config.dry_run {
            log::info!("final mcts tree\n{}", tree);
            log::info!("root visits:   {}", tree.root().visits());
            log::info!("root children: {}", tree.root().children().len());
        }
        match tree.root().robust_child() {
            Some(best) => {
                let action = best.action().unwrap_or(FALLBACK_UTTERANCE).to_string();
                log::debug!(
                    "{} selects child with visits={} value={:.3}",
                    self.side,
                    best.visits(),
                    best.value()
                );
                log::info!("{} selects: {}", self.side, action);
                action
            }
            None => {
                let action = self.fallback(transcript);
                log::warn!("{} has no expanded moves, falling back to: {}", self.side, action);
                action
            }
        }
    }

    /// run every iteration and hand back the tree for inspection
    pub fn grow(&self, transcript: &Transcript) -> Tree {
        let mut tree = Tree::new(transcript.clone(), self.side, &self.motion);
        for iteration in 0..self.config.iterations {
            if let Err(e) = self.iterate(&mut tree) {
                log::error!("mcts iteration {} abandoned: {}", iteration, e);
            }
        }
        tree
    }

    fn iterate(&self, tree: &mut Tree) -> anyhow::Result<()> {
        let leaf = self.select(tree);
        let leaf = self.expand(tree, leaf)?;
        let reward = self.simulate(tree, leaf);
        self.backpropagate(tree, leaf, reward);
        log::debug!(
            "simulated from depth {} with reward {:.3}",
            tree.at(leaf).depth(),
            reward
        );
        Ok(())
    }

    /// descend by UCB1 through fully expanded, non-terminal nodes
    pub fn select(&self, tree: &Tree) -> NodeIndex {
        let mut node = tree.root();
        while !node.is_terminal() && node.is_fully_expanded() {
            match node.best_child(self.config.exploration) {
                Some(child) => node = child,
                None => break,
            }
        }
        node.index()
    }

    /// attach one untried child to `leaf`, generating candidates on first
    /// visit. terminal leaves, and leaves at the depth ceiling, are returned
    /// as they are.
    pub fn expand(&self, tree: &mut Tree, leaf: NodeIndex) -> anyhow::Result<NodeIndex> {
        let node = tree.at(leaf);
        if node.is_terminal() {
            return Ok(leaf);
        }
        if node.transcript().len() >= self.config.horizon() {
            tree.terminate(leaf);
            return Ok(leaf);
        }
        if !node.data().is_generated() {
            let actions = self.candidates(node.transcript(), node.side(), self.config.candidates);
            tree.offer(leaf, actions);
            if tree.at(leaf).untried().is_empty() {
                log::debug!("no candidates at depth {}, marking terminal", tree.at(leaf).depth());
                tree.terminate(leaf);
                return Ok(leaf);
            }
        }
        let node = tree.at(leaf);
        match node.data().pending().map(str::to_string) {
            None => Ok(leaf),
            Some(action) => {
                let transcript = node.transcript().with(node.side(), &action);
                let side = node.side().flip();
                tree.add_child(leaf, &action, transcript, side)
            }
        }
    }

    pub fn simulate(&self, tree: &Tree, leaf: NodeIndex) -> Utility {
        let node = tree.at(leaf);
        self.rollout(node.transcript().clone(), node.side(), 0)
    }

    /// play single sampled utterances forward until either horizon,
    /// then evaluate. any oracle failure evaluates where we stand.
    pub fn rollout(&self, transcript: Transcript, side: Side, depth: usize) -> Utility {
        if depth >= self.config.max_rollout_depth || transcript.len() >= self.config.horizon() {
            return self.evaluate(&transcript);
        }
        match self.candidates(&transcript, side, 1).into_iter().next() {
            Some(utterance) => self.rollout(transcript.with(side, &utterance), side.flip(), depth + 1),
            None => self.evaluate(&transcript),
        }
    }

    /// signed, normalized persuasiveness of the last utterance,
    /// from the perspective of `side`
    pub fn evaluate(&self, transcript: &Transcript) -> Utility {
        let Some(speaker) = transcript.speaker() else {
            return 0.;
        };
        let statement = Transcript::untag(transcript.last().unwrap_or_default());
        let context = transcript.context(SCORER_CONTEXT);
        match self.scorer.score(statement, speaker, &self.motion, &context) {
            Ok(score) if score.is_finite() => {
                let normal = (score - SCORE_NEUTRAL) / SCORE_NEUTRAL;
                let signed = if speaker == self.side { normal } else { -normal };
                signed.clamp(-1., 1.)
            }
            Ok(score) => {
                log::warn!("scorer returned malformed rating {}", score);
                0.
            }
            Err(e) => {
                log::warn!("scoring failed: {}", e);
                0.
            }
        }
    }

    /// walk to the root, negating the reward at every ply
    pub fn backpropagate(&self, tree: &mut Tree, leaf: NodeIndex, reward: Utility) {
        let mut index = Some(leaf);
        let mut sign = 1.;
        while let Some(i) = index {
            tree.update(i, reward * sign);
            index = tree.at(i).parent().map(|parent| parent.index());
            sign = -sign;
        }
    }

    /// up to `count` distinct non-blank candidates; empty on failure
    fn candidates(&self, transcript: &Transcript, side: Side, count: usize) -> Vec<String> {
        match self.generator.generate(transcript, side, &self.motion, count) {
            Ok(actions) => actions
                .into_iter()
                .map(|action| action.trim().to_string())
                .filter(|action| !action.is_empty())
                .fold(Vec::<String>::new(), |mut kept, action| {
                    if !kept.contains(&action) {
                        kept.push(action);
                    }
                    kept
                })
                .into_iter()
                .take(count)
                .collect(),
            Err(e) => {
                log::warn!("candidate generation failed for {}: {}", side, e);
                Vec::new()
            }
        }
    }

    fn fallback(&self, transcript: &Transcript) -> String {
        self.candidates(transcript, self.side, 1)
            .into_iter()
            .next()
            .unwrap_or_else(|| FALLBACK_UTTERANCE.to_string())
    }
}
