//! Keys, node/edge records, configuration and errors.

use nalgebra::Vector3;
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::fmt;
use thiserror::Error;

use crate::cfg::{KEY_SCALE, MAX_KEY_COORD, ROUNDING_EPS};
use crate::geom::Color;

/// Node key: a 3D point rounded to hundredths, stored exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    x: i64,
    y: i64,
    z: i64,
}

impl NodeKey {
    /// Strict constructor: every coordinate must be finite, at most
    /// `MAX_KEY_COORD` in magnitude, and already rounded to two decimals.
    pub fn new(point: [f64; 3]) -> Result<Self, GraphError> {
        let mut out = [0i64; 3];
        for (slot, &c) in out.iter_mut().zip(&point) {
            if !c.is_finite() || c.abs() > MAX_KEY_COORD {
                return Err(GraphError::MalformedKey(point));
            }
            let scaled = c * KEY_SCALE;
            let rounded = scaled.round();
            let tol = ROUNDING_EPS * KEY_SCALE.max(scaled.abs());
            if (scaled - rounded).abs() > tol {
                return Err(GraphError::MalformedKey(point));
            }
            *slot = rounded as i64;
        }
        Ok(Self {
            x: out[0],
            y: out[1],
            z: out[2],
        })
    }

    /// Round to two decimals first; only non-finite or out-of-range input is
    /// rejected.
    pub fn rounded(point: [f64; 3]) -> Result<Self, GraphError> {
        let r = point.map(|c| (c * KEY_SCALE).round() / KEY_SCALE);
        Self::new(r).map_err(|_| GraphError::MalformedKey(point))
    }

    pub fn point(&self) -> Vector3<f64> {
        Vector3::new(
            self.x as f64 / KEY_SCALE,
            self.y as f64 / KEY_SCALE,
            self.z as f64 / KEY_SCALE,
        )
    }
}

impl TryFrom<[f64; 3]> for NodeKey {
    type Error = GraphError;
    fn try_from(p: [f64; 3]) -> Result<Self, Self::Error> {
        NodeKey::new(p)
    }
}

impl TryFrom<(f64, f64, f64)> for NodeKey {
    type Error = GraphError;
    fn try_from((x, y, z): (f64, f64, f64)) -> Result<Self, Self::Error> {
        NodeKey::new([x, y, z])
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.point();
        write!(f, "({}, {}, {})", p.x, p.y, p.z)
    }
}

/// Edge key: ordered pair of node keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub from: NodeKey,
    pub to: NodeKey,
}

impl EdgeKey {
    #[inline]
    pub fn new(from: NodeKey, to: NodeKey) -> Self {
        Self { from, to }
    }
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
    #[inline]
    pub fn touches(&self, node: NodeKey) -> bool {
        self.from == node || self.to == node
    }
    /// The endpoint that is not `node`, if `node` is an endpoint.
    pub fn opposite(&self, node: NodeKey) -> Option<NodeKey> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Node record. `enlarged` tracks the labelled/unlabelled size state.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<L> {
    pub key: NodeKey,
    pub labels: BTreeMap<String, L>,
    pub parent_edge: Option<EdgeKey>,
    pub enlarged: bool,
}

impl<L> Node<L> {
    pub(crate) fn new(key: NodeKey) -> Self {
        Self {
            key,
            labels: BTreeMap::new(),
            parent_edge: None,
            enlarged: false,
        }
    }
}

/// Edge record; curvature is derived from the graph, not stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<L> {
    pub key: EdgeKey,
    pub directed: bool,
    pub weight: Option<f64>,
    pub weight_label: Option<L>,
}

/// Drawing parameters for nodes and edges.
#[derive(Clone, Copy, Debug)]
pub struct GraphCfg {
    pub node_radius: f64,
    pub labeled_node_radius: f64,
    pub node_color: Color,
    pub node_stroke_width: f64,
    pub edge_color: Color,
    pub edge_stroke_width: f64,
    pub highlight_color: Color,
    pub highlight_stroke_width: f64,
    /// Arc angle of bowed anti-parallel edges.
    pub curve_angle: f64,
    /// Whether edges given to `Graph::new` are directed.
    pub directed: bool,
}

impl Default for GraphCfg {
    fn default() -> Self {
        Self {
            node_radius: 0.1,
            labeled_node_radius: 0.4,
            node_color: Color::WHITE,
            node_stroke_width: 1.0,
            edge_color: Color::GREY,
            edge_stroke_width: 1.0,
            highlight_color: Color::YELLOW,
            highlight_stroke_width: 4.0,
            curve_angle: TAU / 12.0,
            directed: false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("malformed node key {0:?}: need finite, in-range coordinates rounded to 2 decimals")]
    MalformedKey([f64; 3]),

    #[error("self-loop at {0}")]
    SelfLoop(NodeKey),

    #[error("node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeKey),

    #[error("node at {node} has no label {name:?}")]
    LabelNotFound { node: NodeKey, name: String },

    #[error("duplicate node: {0}")]
    DuplicateNode(NodeKey),

    #[error("duplicate edge: {0}")]
    DuplicateEdge(EdgeKey),

    #[error("edge {edge} is not incident to node {node}")]
    NotIncident { edge: EdgeKey, node: NodeKey },
}
