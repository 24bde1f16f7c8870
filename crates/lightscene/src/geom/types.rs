//! Shape types consumed by the renderer.
//!
//! - `Annulus`, `AnnularSector`: tessellation pieces of light fields.
//! - `Polygon`: closed path (shadows).
//! - `Arc`, `Disc`, `Polyline`: indicators, angle arcs, sampled curves.
//! - `Shape`: the hand-off enum.

use nalgebra::{Vector2, Vector3};

use super::util::{angle_of_vector, lerp, normalize_angle};

/// Linear RGB colour with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.345, 0.769, 0.867);
    pub const GREY: Color = Color::rgb(0.533, 0.533, 0.533);
    pub const RED: Color = Color::rgb(0.988, 0.384, 0.333);

    #[inline]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise interpolation.
    #[inline]
    pub fn lerp(&self, other: &Color, alpha: f64) -> Color {
        Color {
            r: lerp(self.r, other.r, alpha),
            g: lerp(self.g, other.g, alpha),
            b: lerp(self.b, other.b, alpha),
        }
    }
}

/// Filled ring `inner_radius <= |p - center| < outer_radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Annulus {
    pub center: Vector2<f64>,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill_opacity: f64,
    pub color: Color,
}

impl Annulus {
    #[inline]
    pub fn shift(&mut self, delta: Vector2<f64>) {
        self.center += delta;
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        let d = (p - self.center).norm();
        d >= self.inner_radius && d < self.outer_radius
    }
}

/// Annulus restricted to the angular window `[start_angle, start_angle + angle_span]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnularSector {
    pub center: Vector2<f64>,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub angle_span: f64,
    pub fill_opacity: f64,
    pub color: Color,
}

impl AnnularSector {
    #[inline]
    pub fn stop_angle(&self) -> f64 {
        self.start_angle + self.angle_span
    }

    #[inline]
    pub fn shift(&mut self, delta: Vector2<f64>) {
        self.center += delta;
    }

    /// Membership with a small angular slack `eps` at both window edges.
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        let v = p - self.center;
        let d = v.norm();
        if d < self.inner_radius || d >= self.outer_radius {
            return false;
        }
        let offset = normalize_angle(angle_of_vector(v) - self.start_angle + eps);
        offset <= self.angle_span + 2.0 * eps
    }
}

/// Circular arc (stroke only).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub angle_span: f64,
    pub color: Color,
}

impl Arc {
    pub fn point_at(&self, angle: f64) -> Vector2<f64> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }
    pub fn start_point(&self) -> Vector2<f64> {
        self.point_at(self.start_angle)
    }
    pub fn end_point(&self) -> Vector2<f64> {
        self.point_at(self.start_angle + self.angle_span)
    }
}

/// Closed polygon; the last vertex connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vector2<f64>>,
    pub fill_color: Color,
    pub fill_opacity: f64,
}

impl Polygon {
    /// Shoelace area; positive for counterclockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for k in 0..n {
            let p = self.vertices[k];
            let q = self.vertices[(k + 1) % n];
            acc += p.x * q.y - p.y * q.x;
        }
        0.5 * acc
    }

    pub fn has_vertex_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.vertices.iter().any(|v| (v - p).norm() <= eps)
    }
}

/// Filled disc with an outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

/// Open polyline in 3D (curves are sampled in scene space).
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vector3<f64>>,
    pub color: Color,
}

/// Everything a renderer has to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Annulus(Annulus),
    Sector(AnnularSector),
    Polygon(Polygon),
    Arc(Arc),
    Disc(Disc),
    Polyline(Polyline),
}

impl Shape {
    /// Fill opacity for filled shapes; `None` for strokes.
    pub fn fill_opacity(&self) -> Option<f64> {
        match self {
            Shape::Annulus(a) => Some(a.fill_opacity),
            Shape::Sector(s) => Some(s.fill_opacity),
            Shape::Polygon(p) => Some(p.fill_opacity),
            Shape::Disc(d) => Some(d.fill_opacity),
            Shape::Arc(_) | Shape::Polyline(_) => None,
        }
    }
}
