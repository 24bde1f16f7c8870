//! Light fields: ambient (radial) lights, spotlights, screens and shadows.
//!
//! Purpose
//! - `RadialLightField` tessellates a disc into concentric annuli whose
//!   opacities follow a falloff curve.
//! - `DirectionalLightField` restricts the same tessellation to the wedge a
//!   `Screen` subtends from the source and adds the shadow the screen casts.
//! - `LightIndicator` shows a received intensity as a disc opacity.
//!
//! Model
//! - Fields are derived geometry. Recomputation is total: the spotlight throws
//!   away its sectors and rebuilds them from the current source and screen.
//! - Screens are owned elsewhere (`scene::Scene`); spotlight operations take an
//!   `Option<&Screen>` and treat `None` as "keep what you have".
//!
//! Code cross-refs: `geom::{Annulus, AnnularSector, Polygon}`,
//! `scene::{ScreenTracker, AngleTracker}`.

mod ambient;
mod falloff;
mod indicator;
mod screen;
mod shadow;
mod spotlight;
mod types;

pub use ambient::RadialLightField;
pub use falloff::Falloff;
pub use indicator::LightIndicator;
pub use screen::Screen;
pub use shadow::shadow_polygon;
pub use spotlight::DirectionalLightField;
pub use types::{LightCfg, LightError, ShadowCfg};

/// Scene-script names for the two field kinds.
pub type AmbientLight = RadialLightField;
pub type Spotlight = DirectionalLightField;
