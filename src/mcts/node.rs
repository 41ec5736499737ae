use super::data::Data;
use crate::Utility;
use crate::Visits;
use crate::debate::Side;
use crate::debate::Transcript;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// A Node is a wrapper around a NodeIndex and a &Graph.
/// because they are thin wrappers around an index, they're
/// cheap to Copy. holding reference to Graph is useful
/// for navigational methods.
#[derive(Debug, Clone, Copy)]
pub struct Node<'tree> {
    index: NodeIndex,
    graph: &'tree DiGraph<Data, String>,
}

impl<'tree> From<(NodeIndex, &'tree DiGraph<Data, String>)> for Node<'tree> {
    fn from((index, graph): (NodeIndex, &'tree DiGraph<Data, String>)) -> Self {
        Self { index, graph }
    }
}

impl<'tree> Node<'tree> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }
    pub fn data(&self) -> &'tree Data {
        self.graph
            .node_weight(self.index)
            .expect("node index in bounds")
    }
    pub fn transcript(&self) -> &'tree Transcript {
        self.data().transcript()
    }
    pub fn side(&self) -> Side {
        self.data().side()
    }
    pub fn visits(&self) -> Visits {
        self.data().visits()
    }
    pub fn reward(&self) -> Utility {
        self.data().reward()
    }
    pub fn value(&self) -> Utility {
        self.data().value()
    }
    pub fn untried(&self) -> &'tree [String] {
        self.data().untried()
    }
    pub fn is_terminal(&self) -> bool {
        self.data().is_terminal()
    }
    pub fn is_fully_expanded(&self) -> bool {
        self.data().is_fully_expanded()
    }

    /// Navigational methods

    /// the action that led here. None only at the root.
    pub fn action(&self) -> Option<&'tree str> {
        self.graph
            .edges_directed(self.index, Incoming)
            .next()
            .map(|edge| edge.weight().as_str())
    }
    pub fn parent(&self) -> Option<Node<'tree>> {
        self.graph
            .neighbors_directed(self.index, Incoming)
            .next()
            .map(|index| self.spawn(index))
    }
    /// children in the order they were expanded
    pub fn children(&self) -> Vec<Node<'tree>> {
        let mut children = self
            .graph
            .neighbors_directed(self.index, Outgoing)
            .collect::<Vec<_>>();
        children.sort();
        children
            .into_iter()
            .map(|index| self.spawn(index))
            .collect()
    }
    pub fn child(&self, action: &str) -> Option<Node<'tree>> {
        self.graph
            .edges_directed(self.index, Outgoing)
            .find(|edge| edge.weight() == action)
            .map(|edge| self.spawn(edge.target()))
    }
    /// plies below the root
    pub fn depth(&self) -> usize {
        self.parent().map_or(0, |parent| parent.depth() + 1)
    }

    /// Selection methods

    /// UCB1 from the perspective of a parent with `n` visits.
    /// unvisited children are always preferred; an unvisited
    /// parent contributes no exploration term.
    pub fn ucb1(&self, n: Visits, exploration: Utility) -> Utility {
        if self.visits() == 0 {
            Utility::INFINITY
        } else if n == 0 {
            self.value()
        } else {
            self.value() + exploration * ((n as Utility).ln() / self.visits() as Utility).sqrt()
        }
    }
    /// child maximizing UCB1, first-expanded wins ties
    pub fn best_child(&self, exploration: Utility) -> Option<Node<'tree>> {
        let n = self.visits();
        self.children()
            .into_iter()
            .map(|child| (child.ucb1(n, exploration), child))
            .fold(None, |best, (score, child)| match best {
                Some((max, _)) if max >= score => best,
                _ => Some((score, child)),
            })
            .map(|(_, child)| child)
    }
    /// most visited child, first-expanded wins ties
    pub fn robust_child(&self) -> Option<Node<'tree>> {
        self.children()
            .into_iter()
            .fold(None, |best: Option<Node<'tree>>, child| match best {
                Some(max) if max.visits() >= child.visits() => best,
                _ => Some(child),
            })
    }

    fn spawn(&self, index: NodeIndex) -> Node<'tree> {
        Self::from((index, self.graph))
    }
}
