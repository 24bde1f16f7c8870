//! Derived node and edge styles.
//!
//! Pure functions of the current graph. An edge's stroke starts and ends on
//! the boundary circles of its endpoint nodes at their current radii; bowed
//! edges leave and enter the nodes along the arc tangents.

use nalgebra::Vector3;

use super::model::Graph;
use super::types::{EdgeKey, GraphError, NodeKey};
use crate::cfg::LENGTH_EPS;
use crate::geom::{lerp, Color};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub center: Vector3<f64>,
    pub radius: f64,
    pub enlarged: bool,
    pub color: Color,
    pub stroke_width: f64,
}

impl NodeStyle {
    /// Blend towards `other`; discrete flags switch at the end.
    pub fn lerp(&self, other: &NodeStyle, alpha: f64) -> NodeStyle {
        NodeStyle {
            center: self.center.lerp(&other.center, alpha),
            radius: lerp(self.radius, other.radius, alpha),
            enlarged: if alpha >= 1.0 { other.enlarged } else { self.enlarged },
            color: self.color.lerp(&other.color, alpha),
            stroke_width: lerp(self.stroke_width, other.stroke_width, alpha),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    pub curved: bool,
    /// Arc angle of the stroke (0 for straight edges).
    pub bow_angle: f64,
    pub directed: bool,
    pub highlighted: bool,
    pub color: Color,
    pub stroke_width: f64,
}

impl EdgeStyle {
    pub fn lerp(&self, other: &EdgeStyle, alpha: f64) -> EdgeStyle {
        let done = alpha >= 1.0;
        EdgeStyle {
            start: self.start.lerp(&other.start, alpha),
            end: self.end.lerp(&other.end, alpha),
            curved: if done { other.curved } else { self.curved },
            bow_angle: lerp(self.bow_angle, other.bow_angle, alpha),
            directed: other.directed,
            highlighted: if done { other.highlighted } else { self.highlighted },
            color: self.color.lerp(&other.color, alpha),
            stroke_width: lerp(self.stroke_width, other.stroke_width, alpha),
        }
    }
}

pub fn derive_node_style<L>(graph: &Graph<L>, key: NodeKey) -> Result<NodeStyle, GraphError> {
    let node = graph.node(key)?;
    let cfg = graph.cfg();
    Ok(NodeStyle {
        center: key.point(),
        radius: node_radius(graph, key)?,
        enlarged: node.enlarged,
        color: cfg.node_color,
        stroke_width: cfg.node_stroke_width,
    })
}

pub fn derive_edge_style<L>(graph: &Graph<L>, key: EdgeKey) -> Result<EdgeStyle, GraphError> {
    let key = graph.resolve_edge(key)?;
    let edge = graph.edge(key)?;
    let cfg = graph.cfg();
    let curved = graph.is_curved(key);
    let bow_angle = if curved { cfg.curve_angle } else { 0.0 };
    let highlighted = graph.is_highlighted(key);

    let u = key.from.point();
    let v = key.to.point();
    let chord = v - u;
    let dir = if chord.norm() > LENGTH_EPS {
        chord.normalize()
    } else {
        Vector3::zeros()
    };
    let start = u + rotate_z(dir, -bow_angle / 2.0) * node_radius(graph, key.from)?;
    let end = v - rotate_z(dir, bow_angle / 2.0) * node_radius(graph, key.to)?;

    Ok(EdgeStyle {
        start,
        end,
        curved,
        bow_angle,
        directed: edge.directed,
        highlighted,
        color: if highlighted {
            cfg.highlight_color
        } else {
            cfg.edge_color
        },
        stroke_width: if highlighted {
            cfg.highlight_stroke_width
        } else {
            cfg.edge_stroke_width
        },
    })
}

fn node_radius<L>(graph: &Graph<L>, key: NodeKey) -> Result<f64, GraphError> {
    let cfg = graph.cfg();
    Ok(if graph.node(key)?.enlarged {
        cfg.labeled_node_radius
    } else {
        cfg.node_radius
    })
}

/// Rotate about the scene's z axis.
fn rotate_z(v: Vector3<f64>, angle: f64) -> Vector3<f64> {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}
