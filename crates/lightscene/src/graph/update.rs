//! Style diffs produced by graph mutations.

use super::style::{EdgeStyle, NodeStyle};
use super::types::{EdgeKey, NodeKey};

/// Node style change; `before` is `None` for a node that did not exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransition {
    pub key: NodeKey,
    pub before: Option<NodeStyle>,
    pub after: NodeStyle,
}

impl NodeTransition {
    /// Style at progress `alpha`; new nodes grow from a point.
    pub fn at(&self, alpha: f64) -> NodeStyle {
        match &self.before {
            Some(b) => b.lerp(&self.after, alpha),
            None => NodeStyle {
                radius: self.after.radius * alpha,
                ..self.after
            },
        }
    }
}

/// Edge style change; `before` is `None` for a new edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeTransition {
    pub key: EdgeKey,
    pub before: Option<EdgeStyle>,
    pub after: EdgeStyle,
}

impl EdgeTransition {
    /// Style at progress `alpha`; new edges are drawn from their start.
    pub fn at(&self, alpha: f64) -> EdgeStyle {
        match &self.before {
            Some(b) => b.lerp(&self.after, alpha),
            None => EdgeStyle {
                end: self.after.start.lerp(&self.after.end, alpha),
                ..self.after
            },
        }
    }
}

/// Label content that was attached or detached.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelChange<L> {
    Set {
        node: NodeKey,
        name: String,
        label: L,
        replaced: Option<L>,
    },
    Removed {
        node: NodeKey,
        name: String,
        label: L,
    },
    Weight {
        edge: EdgeKey,
        weight: f64,
        label: L,
        replaced: Option<L>,
    },
}

/// Everything one mutation changed, as a single discrete animation.
///
/// Only nodes and edges whose derived style actually changed are listed.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphUpdate<L> {
    pub nodes: Vec<NodeTransition>,
    pub edges: Vec<EdgeTransition>,
    pub labels: Vec<LabelChange<L>>,
}

impl<L> Default for GraphUpdate<L> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl<L> GraphUpdate<L> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.labels.is_empty()
    }

    pub fn node(&self, key: NodeKey) -> Option<&NodeTransition> {
        self.nodes.iter().find(|t| t.key == key)
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeTransition> {
        self.edges.iter().find(|t| t.key == key)
    }

    pub fn node_keys(&self) -> Vec<NodeKey> {
        self.nodes.iter().map(|t| t.key).collect()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|t| t.key).collect()
    }

    /// Fold a later update into this one: per key the earliest `before` and
    /// the latest `after` survive; transitions that cancel out are dropped.
    pub fn merge(&mut self, other: GraphUpdate<L>) {
        for t in other.nodes {
            match self.nodes.iter_mut().find(|s| s.key == t.key) {
                Some(s) => s.after = t.after,
                None => self.nodes.push(t),
            }
        }
        for t in other.edges {
            match self.edges.iter_mut().find(|s| s.key == t.key) {
                Some(s) => s.after = t.after,
                None => self.edges.push(t),
            }
        }
        self.nodes.retain(|t| t.before != Some(t.after));
        self.edges.retain(|t| t.before != Some(t.after));
        self.labels.extend(other.labels);
    }

    /// Interpolated styles of every changed node and edge.
    pub fn at(&self, alpha: f64) -> (Vec<(NodeKey, NodeStyle)>, Vec<(EdgeKey, EdgeStyle)>) {
        (
            self.nodes.iter().map(|t| (t.key, t.at(alpha))).collect(),
            self.edges.iter().map(|t| (t.key, t.at(alpha))).collect(),
        )
    }
}
