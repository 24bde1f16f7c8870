use nalgebra::{Rotation2, Vector2};
use std::f64::consts::TAU;

/// Polar angle of `v` in `(-π, π]` (`0` for the zero vector).
#[inline]
pub fn angle_of_vector(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// Rotate `v` counterclockwise by `angle` radians.
#[inline]
pub fn rotate_vector(v: Vector2<f64>, angle: f64) -> Vector2<f64> {
    Rotation2::new(angle) * v
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, alpha: f64) -> f64 {
    a + (b - a) * alpha
}
