//! Geometry primitives handed to the rendering side.
//!
//! Purpose
//! - Keep the shapes lights and graphs produce small, `Copy`-friendly and
//!   renderer-agnostic: centres, radii, angles, colours, opacities.
//! - Angle conventions: polar angles from `atan2`, in `(-π, π]`; spans are
//!   counterclockwise and non-negative.
//!
//! Code cross-refs: `light::{RadialLightField, DirectionalLightField}`,
//! `graph::style`, `curve::ParametricCurve`.

mod types;
mod util;

pub use types::{AnnularSector, Annulus, Arc, Color, Disc, Polygon, Polyline, Shape};
pub use util::{angle_of_vector, lerp, normalize_angle, rotate_vector};

#[cfg(test)]
mod tests;
