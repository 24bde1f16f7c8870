//! Graph storage, construction and queries.

use std::collections::HashMap;

use super::style::{derive_edge_style, derive_node_style, EdgeStyle, NodeStyle};
use super::types::{Edge, EdgeKey, GraphCfg, GraphError, Node, NodeKey};

/// Keyed graph with opaque labels `L`.
///
/// Invariants:
/// - every edge endpoint is a node of the graph;
/// - no self-loops; at most one edge per ordered pair (a pair and its
///   reverse may coexist and are then drawn bowed);
/// - `incident[k]` lists exactly the edges touching `k`, in insertion order;
/// - a node's `parent_edge`, when set, is an incident edge.
#[derive(Clone, Debug)]
pub struct Graph<L> {
    cfg: GraphCfg,
    pub(super) nodes: HashMap<NodeKey, Node<L>>,
    pub(super) edges: HashMap<EdgeKey, Edge<L>>,
    node_order: Vec<NodeKey>,
    edge_order: Vec<EdgeKey>,
    incident: HashMap<NodeKey, Vec<EdgeKey>>,
}

impl<L> Graph<L> {
    pub fn empty(cfg: GraphCfg) -> Self {
        Self {
            cfg,
            nodes: HashMap::new(),
            edges: HashMap::new(),
            node_order: Vec::new(),
            edge_order: Vec::new(),
            incident: HashMap::new(),
        }
    }

    /// Build from raw points and point pairs, checking every key eagerly.
    ///
    /// Fails on the first malformed coordinate, duplicate, self-loop, or edge
    /// endpoint that is not among `nodes`. Edges are directed iff
    /// `cfg.directed`.
    pub fn new(
        nodes: &[[f64; 3]],
        edges: &[([f64; 3], [f64; 3])],
        cfg: GraphCfg,
    ) -> Result<Self, GraphError> {
        let mut g = Self::empty(cfg);
        for &p in nodes {
            g.insert_node_raw(NodeKey::new(p)?)?;
        }
        for &(a, b) in edges {
            let key = EdgeKey::new(NodeKey::new(a)?, NodeKey::new(b)?);
            g.insert_edge_raw(key, cfg.directed)?;
        }
        tracing::debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            "graph built"
        );
        Ok(g)
    }

    #[inline]
    pub fn cfg(&self) -> &GraphCfg {
        &self.cfg
    }
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    /// Node keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.node_order.iter().copied()
    }

    /// Edge keys in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edge_order.iter().copied()
    }

    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn contains_edge(&self, key: EdgeKey) -> bool {
        self.resolve_edge(key).is_ok()
    }

    pub fn node(&self, key: NodeKey) -> Result<&Node<L>, GraphError> {
        self.nodes.get(&key).ok_or(GraphError::NodeNotFound(key))
    }

    /// Stored key for `key`: the pair itself, or its reverse when only the
    /// reverse is stored and it is undirected.
    pub fn resolve_edge(&self, key: EdgeKey) -> Result<EdgeKey, GraphError> {
        if self.edges.contains_key(&key) {
            return Ok(key);
        }
        let rev = key.reversed();
        match self.edges.get(&rev) {
            Some(e) if !e.directed => Ok(rev),
            _ => Err(GraphError::EdgeNotFound(key)),
        }
    }

    pub fn edge(&self, key: EdgeKey) -> Result<&Edge<L>, GraphError> {
        let key = self.resolve_edge(key)?;
        self.edges.get(&key).ok_or(GraphError::EdgeNotFound(key))
    }

    pub fn node_label(&self, key: NodeKey, name: &str) -> Result<&L, GraphError> {
        self.node(key)?
            .labels
            .get(name)
            .ok_or_else(|| GraphError::LabelNotFound {
                node: key,
                name: name.to_string(),
            })
    }

    pub fn node_has_label(&self, key: NodeKey, name: &str) -> Result<bool, GraphError> {
        Ok(self.node(key)?.labels.contains_key(name))
    }

    pub fn edge_weight(&self, key: EdgeKey) -> Result<Option<f64>, GraphError> {
        Ok(self.edge(key)?.weight)
    }

    pub fn parent_edge(&self, key: NodeKey) -> Result<Option<EdgeKey>, GraphError> {
        Ok(self.node(key)?.parent_edge)
    }

    /// Edges touching `key`, in insertion order.
    pub fn adjacent_edges(&self, key: NodeKey) -> Result<Vec<EdgeKey>, GraphError> {
        self.node(key)?;
        Ok(self.incident.get(&key).cloned().unwrap_or_default())
    }

    /// Distinct neighbours of `key`, in edge insertion order.
    pub fn adjacent_nodes(&self, key: NodeKey) -> Result<Vec<NodeKey>, GraphError> {
        let mut out: Vec<NodeKey> = Vec::new();
        for e in self.adjacent_edges(key)? {
            if let Some(n) = e.opposite(key) {
                if !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        Ok(out)
    }

    pub fn opposite_node(&self, edge: EdgeKey, node: NodeKey) -> Result<NodeKey, GraphError> {
        let key = self.resolve_edge(edge)?;
        key.opposite(node)
            .ok_or(GraphError::NotIncident { edge: key, node })
    }

    /// Both `(u, v)` and `(v, u)` are present.
    pub fn is_curved(&self, key: EdgeKey) -> bool {
        self.edges.contains_key(&key) && self.edges.contains_key(&key.reversed())
    }

    /// Some endpoint designates this edge as its parent edge.
    pub fn is_highlighted(&self, key: EdgeKey) -> bool {
        [key.from, key.to].iter().any(|n| {
            self.nodes
                .get(n)
                .is_some_and(|node| node.parent_edge == Some(key))
        })
    }

    pub fn node_style(&self, key: NodeKey) -> Result<NodeStyle, GraphError> {
        derive_node_style(self, key)
    }

    pub fn edge_style(&self, key: EdgeKey) -> Result<EdgeStyle, GraphError> {
        derive_edge_style(self, key)
    }

    pub(super) fn insert_node_raw(&mut self, key: NodeKey) -> Result<(), GraphError> {
        if self.nodes.contains_key(&key) {
            return Err(GraphError::DuplicateNode(key));
        }
        self.nodes.insert(key, Node::new(key));
        self.node_order.push(key);
        Ok(())
    }

    pub(super) fn insert_edge_raw(
        &mut self,
        key: EdgeKey,
        directed: bool,
    ) -> Result<(), GraphError> {
        if key.from == key.to {
            return Err(GraphError::SelfLoop(key.from));
        }
        for n in [key.from, key.to] {
            if !self.nodes.contains_key(&n) {
                return Err(GraphError::NodeNotFound(n));
            }
        }
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }
        self.edges.insert(
            key,
            Edge {
                key,
                directed,
                weight: None,
                weight_label: None,
            },
        );
        self.edge_order.push(key);
        self.incident.entry(key.from).or_default().push(key);
        self.incident.entry(key.to).or_default().push(key);
        Ok(())
    }

    /// Distinct edges incident to any of `keys`.
    pub(super) fn incident_edges(&self, keys: &[NodeKey]) -> Vec<EdgeKey> {
        let mut out: Vec<EdgeKey> = Vec::new();
        for k in keys {
            for e in self.incident.get(k).into_iter().flatten() {
                if !out.contains(e) {
                    out.push(*e);
                }
            }
        }
        out
    }
}
