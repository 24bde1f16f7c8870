//! Mutations. Each one snapshots the styles it can affect, mutates, and
//! returns the diff as a `GraphUpdate`.

use std::collections::HashSet;

use super::model::Graph;
use super::style::{derive_edge_style, derive_node_style, EdgeStyle, NodeStyle};
use super::types::{EdgeKey, GraphError, NodeKey};
use super::update::{EdgeTransition, GraphUpdate, LabelChange, NodeTransition};

struct Snapshot {
    nodes: Vec<(NodeKey, Option<NodeStyle>)>,
    edges: Vec<(EdgeKey, Option<EdgeStyle>)>,
}

impl<L> Graph<L> {
    fn snapshot(&self, nodes: &[NodeKey], edges: &[EdgeKey]) -> Snapshot {
        Snapshot {
            nodes: nodes
                .iter()
                .map(|&k| (k, derive_node_style(self, k).ok()))
                .collect(),
            edges: edges
                .iter()
                .map(|&k| (k, derive_edge_style(self, k).ok()))
                .collect(),
        }
    }

    /// Snapshot a node set together with every edge incident to it.
    fn snapshot_around(&self, nodes: &[NodeKey]) -> Snapshot {
        let edges = self.incident_edges(nodes);
        self.snapshot(nodes, &edges)
    }

    fn diff(&self, before: Snapshot) -> GraphUpdate<L> {
        let mut update = GraphUpdate::default();
        for (key, prev) in before.nodes {
            if let Ok(after) = derive_node_style(self, key) {
                if prev != Some(after) {
                    update.nodes.push(NodeTransition {
                        key,
                        before: prev,
                        after,
                    });
                }
            }
        }
        for (key, prev) in before.edges {
            if let Ok(after) = derive_edge_style(self, key) {
                if prev != Some(after) {
                    update.edges.push(EdgeTransition {
                        key,
                        before: prev,
                        after,
                    });
                }
            }
        }
        update
    }

    fn check_nodes(&self, keys: &[NodeKey]) -> Result<(), GraphError> {
        for &k in keys {
            self.node(k)?;
        }
        Ok(())
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut super::types::Node<L>, GraphError> {
        self.nodes.get_mut(&key).ok_or(GraphError::NodeNotFound(key))
    }

    pub fn add_node(&mut self, point: [f64; 3]) -> Result<GraphUpdate<L>, GraphError> {
        let key = NodeKey::new(point)?;
        self.insert_node_raw(key)?;
        tracing::debug!(node = %key, "node added");
        let mut update = GraphUpdate::default();
        update.nodes.push(NodeTransition {
            key,
            before: None,
            after: derive_node_style(self, key)?,
        });
        Ok(update)
    }

    /// Add an edge between existing nodes. When the reverse pair exists both
    /// edges become bowed, and the reverse edge's change is part of the
    /// returned update.
    pub fn add_edge(
        &mut self,
        from: NodeKey,
        to: NodeKey,
        directed: bool,
    ) -> Result<GraphUpdate<L>, GraphError> {
        let key = EdgeKey::new(from, to);
        let before = self.snapshot(&[], &[key, key.reversed()]);
        self.insert_edge_raw(key, directed)?;
        tracing::debug!(edge = %key, directed, curved = self.is_curved(key), "edge added");
        Ok(self.diff(before))
    }

    /// Grow nodes to the labelled radius and retract their incident edges.
    pub fn enlarge_nodes(&mut self, keys: &[NodeKey]) -> Result<GraphUpdate<L>, GraphError> {
        self.set_enlarged(keys, true)
    }

    /// Shrink nodes back to the plain radius and extend their incident edges.
    pub fn shrink_nodes(&mut self, keys: &[NodeKey]) -> Result<GraphUpdate<L>, GraphError> {
        self.set_enlarged(keys, false)
    }

    fn set_enlarged(
        &mut self,
        keys: &[NodeKey],
        value: bool,
    ) -> Result<GraphUpdate<L>, GraphError> {
        self.check_nodes(keys)?;
        let before = self.snapshot_around(keys);
        for &k in keys {
            self.node_mut(k)?.enlarged = value;
        }
        Ok(self.diff(before))
    }

    /// Designate `edge` as `node`'s parent edge, un-highlighting the previous
    /// one in the same update.
    pub fn set_parent_edge(
        &mut self,
        node: NodeKey,
        edge: EdgeKey,
    ) -> Result<GraphUpdate<L>, GraphError> {
        let prev = self.node(node)?.parent_edge;
        let key = self.resolve_edge(edge)?;
        if !key.touches(node) {
            return Err(GraphError::NotIncident { edge: key, node });
        }
        let touched: Vec<EdgeKey> = prev.into_iter().chain([key]).collect();
        let before = self.snapshot(&[], &touched);
        self.node_mut(node)?.parent_edge = Some(key);
        tracing::debug!(node = %node, edge = %key, "parent edge set");
        Ok(self.diff(before))
    }

    pub fn clear_parent_edge(&mut self, node: NodeKey) -> Result<GraphUpdate<L>, GraphError> {
        let Some(prev) = self.node(node)?.parent_edge else {
            return Ok(GraphUpdate::default());
        };
        let before = self.snapshot(&[], &[prev]);
        self.node_mut(node)?.parent_edge = None;
        Ok(self.diff(before))
    }
}

impl<L: Clone> Graph<L> {
    /// Attach `label` under `name`. An unlabelled node is enlarged first and
    /// its incident edges recomputed.
    pub fn set_node_label(
        &mut self,
        key: NodeKey,
        name: impl Into<String>,
        label: L,
    ) -> Result<GraphUpdate<L>, GraphError> {
        self.set_node_labels(vec![(key, name.into(), label)])
    }

    /// Batch form of `set_node_label`; all keys are checked before anything
    /// changes.
    pub fn set_node_labels(
        &mut self,
        labels: Vec<(NodeKey, String, L)>,
    ) -> Result<GraphUpdate<L>, GraphError> {
        let keys: Vec<NodeKey> = dedup_keys(labels.iter().map(|(k, _, _)| *k));
        self.check_nodes(&keys)?;
        let to_enlarge: Vec<NodeKey> = keys
            .iter()
            .copied()
            .filter(|k| self.nodes.get(k).is_some_and(|n| n.labels.is_empty()))
            .collect();

        let before = self.snapshot_around(&keys);
        let mut changes = Vec::with_capacity(labels.len());
        for k in &to_enlarge {
            self.node_mut(*k)?.enlarged = true;
        }
        for (k, name, label) in labels {
            let replaced = self.node_mut(k)?.labels.insert(name.clone(), label.clone());
            tracing::debug!(node = %k, name = %name, "node label set");
            changes.push(LabelChange::Set {
                node: k,
                name,
                label,
                replaced,
            });
        }
        let mut update = self.diff(before);
        update.labels = changes;
        Ok(update)
    }

    /// Detach one label; removing the last label shrinks the node.
    pub fn remove_node_label(
        &mut self,
        key: NodeKey,
        name: &str,
    ) -> Result<GraphUpdate<L>, GraphError> {
        self.remove_node_labels(&[(key, name)])
    }

    /// Batch form of `remove_node_label`; every `(node, name)` must exist.
    /// A pair listed twice is removed once.
    pub fn remove_node_labels(
        &mut self,
        labels: &[(NodeKey, &str)],
    ) -> Result<GraphUpdate<L>, GraphError> {
        for &(k, name) in labels {
            self.node_label(k, name)?;
        }
        let keys = dedup_keys(labels.iter().map(|(k, _)| *k));
        let before = self.snapshot_around(&keys);
        let mut seen: HashSet<(NodeKey, &str)> = HashSet::new();
        let mut changes = Vec::new();
        for &(k, name) in labels {
            if !seen.insert((k, name)) {
                continue;
            }
            let node = self.node_mut(k)?;
            if let Some(label) = node.labels.remove(name) {
                tracing::debug!(node = %k, name, "node label removed");
                changes.push(LabelChange::Removed {
                    node: k,
                    name: name.to_string(),
                    label,
                });
            }
        }
        for k in &keys {
            let node = self.node_mut(*k)?;
            if node.labels.is_empty() {
                node.enlarged = false;
            }
        }
        let mut update = self.diff(before);
        update.labels = changes;
        Ok(update)
    }

    /// Set the numeric weight and its label visual.
    pub fn set_edge_weight(
        &mut self,
        edge: EdgeKey,
        weight: f64,
        label: L,
    ) -> Result<GraphUpdate<L>, GraphError> {
        let key = self.resolve_edge(edge)?;
        let e = self
            .edges
            .get_mut(&key)
            .ok_or(GraphError::EdgeNotFound(key))?;
        e.weight = Some(weight);
        let replaced = e.weight_label.replace(label.clone());
        let mut update = GraphUpdate::default();
        update.labels.push(LabelChange::Weight {
            edge: key,
            weight,
            label,
            replaced,
        });
        Ok(update)
    }
}

fn dedup_keys(keys: impl Iterator<Item = NodeKey>) -> Vec<NodeKey> {
    let mut out: Vec<NodeKey> = Vec::new();
    for k in keys {
        if !out.contains(&k) {
            out.push(k);
        }
    }
    out
}
