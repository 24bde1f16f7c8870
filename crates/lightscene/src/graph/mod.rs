//! Keyed graph overlay for animated algorithm walkthroughs.
//!
//! Purpose
//! - `Graph<L>` holds nodes keyed by rounded 3D points and edges keyed by
//!   ordered node pairs; labels are opaque `L` handles the graph only stores.
//! - Every mutation returns a `GraphUpdate`: the before/after style snapshot of
//!   each node and edge whose derived style changed. Renderers interpolate it.
//!
//! Model
//! - Styles are never stored. `derive_node_style` and `derive_edge_style` read
//!   the current graph; updates are diffs of those derivations taken around a
//!   mutation, so a node growing and its incident edges retracting always
//!   arrive together.
//! - Keys hold coordinates as exact integers in hundredths. Lookup is a hash
//!   probe; there is no tolerance at lookup time.
//! - `(u, v)` and `(v, u)` may coexist, directed or not; such pairs are drawn
//!   bowed. A lone undirected edge also answers to its reversed pair.
//!
//! Code cross-refs: `geom::Color`, `cfg::{KEY_SCALE, ROUNDING_EPS}`.

mod model;
mod ops;
mod style;
mod types;
mod update;

pub use model::Graph;
pub use style::{derive_edge_style, derive_node_style, EdgeStyle, NodeStyle};
pub use types::{Edge, EdgeKey, GraphCfg, GraphError, Node, NodeKey};
pub use update::{EdgeTransition, GraphUpdate, LabelChange, NodeTransition};
