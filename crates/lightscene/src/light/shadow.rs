//! Shadow polygon behind a screen.

use nalgebra::Vector2;

use super::screen::Screen;
use super::types::ShadowCfg;
use crate::cfg::LENGTH_EPS;
use crate::geom::{rotate_vector, Polygon};

/// Quadrilateral occluded by `screen` as seen from `source`.
///
/// With `A`, `B` the first and last anchors, the rays `A - source` and
/// `B - source` are normalised, stretched to `cfg.ray_scale`, and rotated by
/// `-angular_pad` and `+angular_pad` respectively. Vertices (closed path):
/// `[B + ray_B, A + ray_A, A, B]`.
///
/// Not an exact tangent construction: the pad only has to push the far edge
/// of the shadow outside the lit wedge. A ray of zero length (anchor at the
/// source) is not extended.
///
/// Returns `None` for a screen without anchors.
pub fn shadow_polygon(source: Vector2<f64>, screen: &Screen, cfg: &ShadowCfg) -> Option<Polygon> {
    let (a, b) = screen.endpoints()?;
    let out_a = a + extension(a - source, -cfg.angular_pad, cfg.ray_scale);
    let out_b = b + extension(b - source, cfg.angular_pad, cfg.ray_scale);
    Some(Polygon {
        vertices: vec![out_b, out_a, a, b],
        fill_color: cfg.color,
        fill_opacity: cfg.opacity,
    })
}

fn extension(ray: Vector2<f64>, pad: f64, scale: f64) -> Vector2<f64> {
    let len = ray.norm();
    if len <= LENGTH_EPS {
        return Vector2::zeros();
    }
    rotate_vector(ray / len * scale, pad)
}
