use super::data::Data;
use super::node::Node;
use crate::TREE_DRAW_DEPTH;
use crate::TREE_DRAW_PREVIEW;
use crate::Utility;
use crate::debate::Side;
use crate::debate::Transcript;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use std::fmt::Formatter;
use std::fmt::Result;

/// The search tree for one decision.
///
/// Nodes live in a petgraph arena and edges carry the action string
/// that produced the child. Children are owned by the arena and parents
/// are found by walking the single incoming edge, so there are no
/// reference cycles. The root is always index 0, and the tree only ever
/// grows while a search runs. The motion is shared by every node.
#[derive(Debug)]
pub struct Tree {
    graph: DiGraph<Data, String>,
    motion: String,
}

impl Tree {
    pub fn new(transcript: Transcript, side: Side, motion: &str) -> Self {
        let mut graph = DiGraph::new();
        graph.add_node(Data::from((transcript, side)));
        Self {
            graph,
            motion: motion.to_string(),
        }
    }
    pub fn motion(&self) -> &str {
        &self.motion
    }
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }
    pub fn root(&self) -> Node<'_> {
        self.at(NodeIndex::new(0))
    }
    pub fn at(&self, index: NodeIndex) -> Node<'_> {
        Node::from((index, &self.graph))
    }
    pub fn graph(&self) -> &DiGraph<Data, String> {
        &self.graph
    }

    /// mutation methods.
    /// each one leaves the arena consistent before returning.

    pub fn update(&mut self, index: NodeIndex, reward: Utility) {
        self.data_mut(index).update(reward);
    }
    pub fn terminate(&mut self, index: NodeIndex) {
        self.data_mut(index).terminate();
    }
    pub fn offer(&mut self, index: NodeIndex, actions: Vec<String>) {
        self.data_mut(index).offer(actions);
    }
    /// attach a new child reached by `action`, retiring it from
    /// the parent's untried list. a repeated action, a transcript that
    /// isn't exactly one ply longer, or a side that doesn't alternate
    /// are all bugs in the caller.
    pub fn add_child(
        &mut self,
        head: NodeIndex,
        action: &str,
        transcript: Transcript,
        side: Side,
    ) -> anyhow::Result<NodeIndex> {
        let parent = self
            .graph
            .node_weight(head)
            .ok_or_else(|| anyhow::anyhow!("no parent node at {:?}", head))?;
        if parent.transcript().len() + 1 != transcript.len() {
            anyhow::bail!(
                "child transcript has {} plies under a parent with {}",
                transcript.len(),
                parent.transcript().len()
            );
        }
        if parent.side() == side {
            anyhow::bail!("child repeats the parent's side to move ({})", side);
        }
        if self.at(head).child(action).is_some() {
            anyhow::bail!("duplicate action under {:?}: {:?}", head, action);
        }
        let tail = self.graph.add_node(Data::from((transcript, side)));
        self.graph.add_edge(head, tail, action.to_string());
        self.data_mut(head).retire(action);
        Ok(tail)
    }

    fn data_mut(&mut self, index: NodeIndex) -> &mut Data {
        self.graph
            .node_weight_mut(index)
            .expect("node index in bounds")
    }

    /// prefix-tree rendering of visits and values
    pub fn draw(&self, f: &mut Formatter, index: NodeIndex, prefix: &str) -> Result {
        let node = self.at(index);
        if index == NodeIndex::new(0) {
            writeln!(f, "ROOT [visits={}, value={:.3}]", node.visits(), node.value())?;
        }
        if node.depth() >= TREE_DRAW_DEPTH {
            return Ok(());
        }
        let children = node.children();
        let n = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let stem = if last { "└" } else { "├" };
            let gaps = if last { "    " } else { "│   " };
            writeln!(
                f,
                "{}{}── [visits={}, value={:.3}] \"{}\"",
                prefix,
                stem,
                child.visits(),
                child.value(),
                Self::preview(child.action().unwrap_or_default())
            )?;
            self.draw(f, child.index(), &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }

    fn preview(action: &str) -> String {
        if action.chars().count() > TREE_DRAW_PREVIEW {
            format!(
                "{}...",
                action.chars().take(TREE_DRAW_PREVIEW).collect::<String>()
            )
        } else {
            action.to_string()
        }
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.draw(f, NodeIndex::new(0), "")
    }
}
