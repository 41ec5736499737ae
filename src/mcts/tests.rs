use super::*;
use crate::FALLBACK_UTTERANCE;
use crate::Score;
use crate::debate::Side;
use crate::debate::Transcript;
use crate::oracle::Counted;
use crate::oracle::Generator;
use crate::oracle::Scorer;
use std::sync::Arc;
use std::sync::Mutex;

const MOTION: &str = "Governments should ban fossil-fuel cars by 2035.";

/// offers the same batch every time
struct Script(Vec<&'static str>);
impl Generator for Script {
    fn generate(&self, _: &Transcript, _: Side, _: &str, count: usize) -> anyhow::Result<Vec<String>> {
        Ok(self.0.iter().take(count).map(|s| s.to_string()).collect())
    }
}

/// answers only direct single-candidate requests
struct Terse(&'static str);
impl Generator for Terse {
    fn generate(&self, _: &Transcript, _: Side, _: &str, count: usize) -> anyhow::Result<Vec<String>> {
        if count == 1 {
            Ok(vec![self.0.to_string()])
        } else {
            Ok(Vec::new())
        }
    }
}

/// every call fails
struct Broken;
impl Generator for Broken {
    fn generate(&self, _: &Transcript, _: Side, _: &str, _: usize) -> anyhow::Result<Vec<String>> {
        Err(anyhow::anyhow!("provider unavailable"))
    }
}
impl Scorer for Broken {
    fn score(&self, _: &str, _: Side, _: &str, _: &str) -> anyhow::Result<Score> {
        Err(anyhow::anyhow!("provider unavailable"))
    }
}

/// constant rating
struct Fixed(Score);
impl Scorer for Fixed {
    fn score(&self, _: &str, _: Side, _: &str, _: &str) -> anyhow::Result<Score> {
        Ok(self.0)
    }
}

/// remembers what it was asked to rate
#[derive(Default)]
struct Recorder(Mutex<Vec<(String, Side, String)>>);
impl Scorer for Recorder {
    fn score(&self, statement: &str, side: Side, _: &str, context: &str) -> anyhow::Result<Score> {
        self.0
            .lock()
            .expect("recorder lock")
            .push((statement.to_string(), side, context.to_string()));
        Ok(5.)
    }
}

fn engine<G, S>(side: Side, config: Config, generator: G, scorer: S) -> Search
where
    G: Generator + 'static,
    S: Scorer + 'static,
{
    Search::new(side, MOTION, config, Arc::new(generator), Arc::new(scorer))
}

fn opening() -> Transcript {
    Transcript::from_iter(["A: Cars pollute heavily"])
}

// evaluation

#[test]
fn evaluate_opponent_statement_is_negated() {
    let search = engine(Side::Con, Config::default(), Script(vec![]), Fixed(8.));
    assert_eq!(search.evaluate(&opening()), -0.6);
}

#[test]
fn evaluate_own_statement_is_positive() {
    let search = engine(Side::Pro, Config::default(), Script(vec![]), Fixed(8.));
    assert_eq!(search.evaluate(&opening()), 0.6);
}

#[test]
fn evaluate_empty_transcript_is_neutral() {
    let scorer = Arc::new(Counted::from(Fixed(10.)));
    let search = Search::new(
        Side::Pro,
        MOTION,
        Config::default(),
        Arc::new(Script(vec![])),
        scorer.clone(),
    );
    assert_eq!(search.evaluate(&Transcript::empty()), 0.);
    assert_eq!(scorer.scorings(), 0);
}

#[test]
fn evaluate_failures_are_neutral() {
    let search = engine(Side::Pro, Config::default(), Script(vec![]), Broken);
    assert_eq!(search.evaluate(&opening()), 0.);
    let search = engine(Side::Pro, Config::default(), Script(vec![]), Fixed(Score::NAN));
    assert_eq!(search.evaluate(&opening()), 0.);
}

#[test]
fn evaluate_clamps_out_of_scale_ratings() {
    let search = engine(Side::Pro, Config::default(), Script(vec![]), Fixed(40.));
    assert_eq!(search.evaluate(&opening()), 1.);
    let search = engine(Side::Con, Config::default(), Script(vec![]), Fixed(40.));
    assert_eq!(search.evaluate(&opening()), -1.);
}

#[test]
fn evaluate_asks_about_the_actual_speaker() {
    let recorder = Arc::new(Recorder::default());
    let search = Search::new(
        Side::Pro,
        MOTION,
        Config::default(),
        Arc::new(Script(vec![])),
        recorder.clone(),
    );
    let transcript = Transcript::from_iter(["A: 1", "B: 2", "A: 3", "B: 4", "A: 5", "B: six"]);
    search.evaluate(&transcript);
    let calls = recorder.0.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "six");
    assert_eq!(calls[0].1, Side::Con);
    assert_eq!(calls[0].2, "A: 3\nB: 4\nA: 5\nB: six");
}

#[test]
fn evaluate_is_deterministic_in_dry_run() {
    let config = Config::default().with_seed(11);
    let a = Search::dry(Side::Con, MOTION, config.clone());
    let b = Search::dry(Side::Con, MOTION, config);
    let transcript = opening().with(Side::Con, "Electric cars are still cars");
    let x = a.evaluate(&transcript);
    assert_eq!(x, a.evaluate(&transcript));
    assert_eq!(x, b.evaluate(&transcript));
    assert!((-0.5..=0.5).contains(&x));
}

// backpropagation

#[test]
fn backpropagation_alternates_sign() {
    let search = engine(Side::Con, Config::default(), Script(vec![]), Fixed(5.));
    let mut tree = Tree::new(opening(), Side::Con, MOTION);
    let mut leaf = tree.root().index();
    let mut path = vec![leaf];
    for action in ["a", "b", "c"] {
        let node = tree.at(leaf);
        let transcript = node.transcript().with(node.side(), action);
        let side = node.side().flip();
        leaf = tree.add_child(leaf, action, transcript, side).unwrap();
        path.push(leaf);
    }
    search.backpropagate(&mut tree, path[3], 0.5);
    assert_eq!(tree.root().reward(), -0.5);
    assert_eq!(tree.at(path[1]).reward(), 0.5);
    assert_eq!(tree.at(path[2]).reward(), -0.5);
    assert_eq!(tree.at(path[3]).reward(), 0.5);
    search.backpropagate(&mut tree, path[2], 0.25);
    assert_eq!(tree.root().reward(), -0.25);
    assert!(path.iter().all(|i| tree.at(*i).visits() >= 1));
    assert_eq!(tree.root().visits(), 2);
    assert_eq!(tree.at(path[3]).visits(), 1);
}

// scenarios

#[test]
fn single_candidate_single_iteration() {
    let config = Config::default().with_iterations(1);
    let search = engine(Side::Con, config, Script(vec!["X"]), Fixed(6.));
    let tree = search.grow(&opening());
    assert_eq!(tree.root().children().len(), 1);
    let x = tree.root().child("X").unwrap();
    assert_eq!(x.visits(), 1);
    assert_eq!(x.transcript().last(), Some("B: X"));
    assert_eq!(search.search(&opening()), "X");
}

#[test]
fn empty_generation_falls_back_to_default() {
    let search = engine(Side::Con, Config::default(), Script(vec![]), Fixed(6.));
    let tree = search.grow(&opening());
    assert!(tree.root().children().is_empty());
    assert!(tree.root().is_terminal());
    assert_eq!(search.search(&opening()), FALLBACK_UTTERANCE);
}

#[test]
fn empty_batches_fall_back_to_direct_generation() {
    let search = engine(Side::Con, Config::default(), Terse("direct"), Fixed(6.));
    assert!(search.grow(&opening()).root().children().is_empty());
    assert_eq!(search.search(&opening()), "direct");
}

#[test]
fn failing_generator_still_spends_every_iteration() {
    let generator = Arc::new(Counted::from(Broken));
    let scorer = Arc::new(Counted::from(Fixed(7.)));
    let config = Config::default().with_iterations(7);
    let search = Search::new(Side::Con, MOTION, config, generator.clone(), scorer.clone());
    let tree = search.grow(&opening());
    assert_eq!(tree.root().visits(), 7);
    assert_eq!(scorer.scorings(), 7);
    assert_eq!(generator.generations(), 8);
    assert_eq!(search.search(&opening()), FALLBACK_UTTERANCE);
}

#[test]
fn dry_run_visits_root_once_per_iteration() {
    let config = Config::default().with_iterations(13);
    let tree = Search::dry(Side::Pro, MOTION, config).grow(&Transcript::empty());
    assert_eq!(tree.root().visits(), 13);
    assert_eq!(tree.size(), 14);
}

#[test]
fn rollout_respects_rollout_depth() {
    let generator = Arc::new(Counted::from(Script(vec!["x", "y", "z"])));
    let scorer = Arc::new(Counted::from(Fixed(5.)));
    let config = Config::default().with_iterations(1).with_rollout_depth(4);
    let search = Search::new(Side::Pro, MOTION, config, generator.clone(), scorer.clone());
    search.grow(&Transcript::empty());
    assert_eq!(generator.generations(), 1 + 4);
    assert_eq!(scorer.scorings(), 1);
}

#[test]
fn rollout_respects_debate_depth() {
    let generator = Arc::new(Counted::from(Script(vec!["x", "y", "z"])));
    let config = Config::default().with_iterations(1).with_debate_depth(1);
    let search = Search::new(Side::Con, MOTION, config, generator.clone(), Arc::new(Fixed(5.)));
    search.grow(&opening());
    assert_eq!(generator.generations(), 1);
}

#[test]
fn debate_depth_ceiling_marks_terminal() {
    let config = Config::default().with_iterations(10).with_debate_depth(1);
    let search = engine(Side::Con, config, Script(vec!["x", "y", "z"]), Fixed(6.));
    let tree = search.grow(&opening());
    let root = tree.root();
    assert_eq!(root.children().len(), 3);
    assert!(root.is_fully_expanded());
    for child in root.children() {
        assert_eq!(child.transcript().len(), 2);
        assert!(child.children().is_empty());
        assert!(child.untried().is_empty());
    }
    assert!(root.children().iter().any(|child| child.is_terminal()));
}

#[test]
fn repeated_candidates_collapse() {
    let config = Config::default().with_iterations(5);
    let search = engine(Side::Con, config, Script(vec!["X", " X", "Y"]), Fixed(6.));
    let tree = search.grow(&opening());
    let actions = tree
        .root()
        .children()
        .iter()
        .map(|child| child.action().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(actions, ["X", "Y"]);
}

#[test]
fn dry_run_flag_replaces_oracles() {
    let generator = Arc::new(Counted::from(Broken));
    let scorer = Arc::new(Counted::from(Broken));
    let config = Config::default().with_iterations(4).with_dry_run(true);
    let search = Search::new(Side::Pro, MOTION, config, generator.clone(), scorer.clone());
    let action = search.search(&Transcript::empty());
    assert_eq!(generator.calls() + scorer.calls(), 0);
    assert!(action.contains("1."));
}

#[test]
fn dry_run_search_is_reproducible() {
    let config = Config::default().with_iterations(25).with_seed(3);
    let a = Search::dry(Side::Con, MOTION, config.clone());
    let b = Search::dry(Side::Con, MOTION, config);
    assert_eq!(a.grow(&opening()).to_string(), b.grow(&opening()).to_string());
    assert_eq!(a.search(&opening()), b.search(&opening()));
}

#[test]
fn search_returns_most_visited_root_child() {
    let config = Config::default().with_iterations(30);
    let search = Search::dry(Side::Pro, MOTION, config);
    let tree = search.grow(&Transcript::empty());
    let most = tree
        .root()
        .children()
        .iter()
        .map(|child| child.visits())
        .max()
        .unwrap();
    let action = search.search(&Transcript::empty());
    assert_eq!(tree.root().child(&action).unwrap().visits(), most);
}

#[test]
fn grown_tree_holds_structural_invariants() {
    let config = Config::default().with_iterations(40).with_debate_depth(3);
    let tree = Search::dry(Side::Con, MOTION, config).grow(&opening());
    for index in tree.graph().node_indices() {
        let node = tree.at(index);
        if node.visits() > 0 {
            assert_eq!(node.value(), node.reward() / node.visits() as crate::Utility);
        } else {
            assert_eq!(node.value(), 0.);
        }
        assert!(node.transcript().len() <= 6);
        let below = node.children().iter().map(|c| c.visits()).sum::<usize>();
        assert!(node.visits() >= below);
        match node.parent() {
            None => assert_eq!(index, tree.root().index()),
            Some(parent) => {
                assert_ne!(parent.side(), node.side());
                assert_eq!(parent.transcript().len() + 1, node.transcript().len());
            }
        }
    }
}

#[test]
fn select_stops_at_first_unexpanded_node() {
    let search = engine(Side::Con, Config::default(), Script(vec!["x", "y"]), Fixed(5.));
    let mut tree = Tree::new(opening(), Side::Con, MOTION);
    let root = tree.root().index();
    assert_eq!(search.select(&tree), root);
    let x = search.expand(&mut tree, root).unwrap();
    search.backpropagate(&mut tree, x, 0.1);
    assert_eq!(search.select(&tree), root);
    let y = search.expand(&mut tree, root).unwrap();
    search.backpropagate(&mut tree, y, 0.1);
    assert!(tree.root().is_fully_expanded());
    let next = search.select(&tree);
    assert!(next == x || next == y);
}
