//! Scene geometry for frame-stepped mathematical animations.
//!
//! Lights (radial fields, spotlights with shadows), screens, a keyed graph
//! overlay for algorithm walkthroughs, and sampled parametric curves. Every
//! component produces finished `geom::Shape` lists; drawing them is left to
//! the rendering side.
//!
//! Module map
//! - `geom`: primitives handed to the renderer, angle helpers.
//! - `light`: `RadialLightField` (ambient), `DirectionalLightField`
//!   (spotlight + shadow), screens, light indicators.
//! - `scene`: id-addressed scene store, tick scheduler, continual trackers and
//!   discrete animations.
//! - `graph`: `Graph`/`Node`/`Edge` with derived styles and `GraphUpdate`s.
//! - `curve`: parametric curves and function graphs.

pub mod cfg;
pub mod curve;
pub mod geom;
pub mod graph;
pub mod light;
pub mod scene;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

/// Common exports for scene scripts.
pub mod prelude {
    pub use crate::curve::{function_graph, ParametricCurve, StepSize};
    pub use crate::geom::{
        angle_of_vector, rotate_vector, AnnularSector, Annulus, Arc, Color, Polygon, Shape,
    };
    pub use crate::graph::{
        EdgeKey, EdgeStyle, Graph, GraphCfg, GraphError, GraphUpdate, NodeKey, NodeStyle,
    };
    pub use crate::light::{
        AmbientLight, DirectionalLightField, Falloff, LightCfg, LightError, LightIndicator,
        RadialLightField, Screen, ShadowCfg, Spotlight,
    };
    pub use crate::scene::{
        AngleTracker, Animation, ArcId, Continual, DimLight, IndicatorId, IndicatorTracker,
        LightId, LightTarget, MoveSpotlight, RotateScreen, Scene, Scheduler, ScreenId,
        ScreenTracker, ShiftScreen, SpotlightId, SwitchCfg, SwitchOff, SwitchOn, TaskId,
        UpdateIndicator,
    };
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
