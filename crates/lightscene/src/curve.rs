//! Parametric curves and function graphs.
//!
//! Purpose
//! - Sample `t ↦ (x, y, z)` over `[t_min, t_max]` into polylines, splitting
//!   the curve where it blows up or jumps so poles are not bridged.
//!
//! Model
//! - Discontinuity detection is heuristic: a sample is flagged when |x| or
//!   |y| exceeds `tol_point`, or when the relative change of x or y over one
//!   step exceeds `tol_del_mult · step`.
//! - The curve is cut at every flagged `t` inside the range, `dt` on either
//!   side; non-finite samples are dropped.
//!
//! Code cross-refs: `geom::Polyline`, `geom::Shape::Polyline`.

use std::fmt;
use std::sync::Arc;

use nalgebra::Vector3;

use crate::geom::{Color, Polyline, Shape};

/// Coordinates beyond this magnitude count as a pole.
pub const DEFAULT_TOL_POINT: f64 = 1e5;
/// Relative jumps beyond this multiple of the step count as a break.
pub const DEFAULT_TOL_DEL_MULT: f64 = 50.0;

/// Sampling step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepSize {
    Fixed(f64),
    /// `10^(max(0, ⌊log10 |t|⌋) − 2)`: 0.01 on `[-10, 10]`, growing tenfold
    /// per decade beyond.
    Auto,
}

impl StepSize {
    pub fn at(&self, t: f64) -> f64 {
        match *self {
            StepSize::Fixed(h) => h,
            StepSize::Auto => {
                let scale = if t == 0.0 {
                    0.0
                } else {
                    t.abs().log10().max(0.0).floor()
                };
                10f64.powf(scale - 2.0)
            }
        }
    }
}

impl Default for StepSize {
    fn default() -> Self {
        StepSize::Fixed(0.01)
    }
}

type CurveFn = Arc<dyn Fn(f64) -> Vector3<f64> + Send + Sync>;

#[derive(Clone)]
pub struct ParametricCurve {
    f: CurveFn,
    pub t_min: f64,
    pub t_max: f64,
    pub step: StepSize,
    /// Gap left on either side of a discontinuity.
    pub dt: f64,
    pub color: Color,
}

impl fmt::Debug for ParametricCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricCurve")
            .field("t_min", &self.t_min)
            .field("t_max", &self.t_max)
            .field("step", &self.step)
            .field("dt", &self.dt)
            .finish_non_exhaustive()
    }
}

impl ParametricCurve {
    pub fn new(
        f: impl Fn(f64) -> Vector3<f64> + Send + Sync + 'static,
        t_min: f64,
        t_max: f64,
    ) -> Self {
        Self {
            f: Arc::new(f),
            t_min,
            t_max,
            step: StepSize::default(),
            dt: 1e-8,
            color: Color::WHITE,
        }
    }

    pub fn with_step(mut self, step: StepSize) -> Self {
        self.step = step;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Vector3<f64> {
        (self.f)(t)
    }

    #[inline]
    pub fn step_at(&self, t: f64) -> f64 {
        self.step.at(t)
    }

    /// Flagged parameters in `[t_min − 2h, t_max + 2h)`, ascending.
    ///
    /// A coordinate whose next sample is exactly zero is skipped by the jump
    /// test.
    pub fn discontinuities(&self, tol_point: f64, tol_del_mult: f64) -> Vec<f64> {
        let h0 = self.step_at(self.t_min);
        let start = self.t_min - 2.0 * h0;
        let stop = self.t_max + 2.0 * self.step_at(self.t_max);
        let mut out = Vec::new();
        for t in arange(start, stop, self.step) {
            let p1 = self.point_at(t);
            if p1.x.abs() > tol_point || p1.y.abs() > tol_point {
                out.push(t);
                continue;
            }
            let ss = self.step_at(t);
            let p2 = self.point_at(t + ss);
            let limit = tol_del_mult * ss;
            let jump = |a: f64, b: f64| b != 0.0 && ((b - a) / b).abs() > limit;
            if jump(p1.x, p2.x) || jump(p1.y, p2.y) {
                out.push(t);
            }
        }
        out
    }

    /// Sampled pieces between discontinuities, each ending exactly at its
    /// right boundary. Empty pieces are omitted.
    pub fn paths(&self) -> Vec<Vec<Vector3<f64>>> {
        let (lo, hi) = (self.t_min, self.t_max);
        let mut bounds = vec![lo, hi];
        for d in self
            .discontinuities(DEFAULT_TOL_POINT, DEFAULT_TOL_DEL_MULT)
            .into_iter()
            .filter(|d| (lo..=hi).contains(d))
        {
            bounds.push(d - self.dt);
            bounds.push(d + self.dt);
        }
        bounds.sort_by(f64::total_cmp);

        let mut paths = Vec::new();
        for pair in bounds.chunks_exact(2) {
            let (t1, t2) = (pair[0], pair[1]);
            let mut ts: Vec<f64> = arange(t1, t2, StepSize::Fixed(self.step_at(t1))).collect();
            if ts.last() != Some(&t2) {
                ts.push(t2);
            }
            let points: Vec<Vector3<f64>> = ts
                .into_iter()
                .map(|t| self.point_at(t))
                .filter(|p| p.iter().all(|c| c.is_finite()))
                .collect();
            if !points.is_empty() {
                paths.push(points);
            }
        }
        tracing::trace!(pieces = paths.len(), "curve sampled");
        paths
    }

    pub fn shapes(&self) -> Vec<Shape> {
        self.paths()
            .into_iter()
            .map(|points| {
                Shape::Polyline(Polyline {
                    points,
                    color: self.color,
                })
            })
            .collect()
    }
}

/// Graph of `y = f(x)` on `[x_min, x_max]`, drawn in yellow.
pub fn function_graph(
    f: impl Fn(f64) -> f64 + Send + Sync + 'static,
    x_min: f64,
    x_max: f64,
) -> ParametricCurve {
    ParametricCurve::new(move |x| Vector3::new(x, f(x), 0.0), x_min, x_max)
        .with_color(Color::YELLOW)
}

/// Half-open `[start, stop)`. Fixed steps are taken by index so long ranges
/// do not drift; automatic steps are re-evaluated at each sample.
fn arange(start: f64, stop: f64, step: StepSize) -> Box<dyn Iterator<Item = f64>> {
    match step {
        StepSize::Fixed(h) if h > 0.0 && h.is_finite() => {
            let n = ((stop - start) / h).ceil().max(0.0) as usize;
            Box::new(
                (0..n)
                    .map(move |i| start + i as f64 * h)
                    .filter(move |&t| t < stop),
            )
        }
        StepSize::Fixed(_) => Box::new(std::iter::empty()),
        StepSize::Auto => Box::new(
            std::iter::successors(Some(start), move |&t| Some(t + step.at(t)))
                .take_while(move |&t| t < stop),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn auto_step_scales_with_magnitude() {
        let s = StepSize::Auto;
        assert!((s.at(0.0) - 0.01).abs() < 1e-15);
        assert!((s.at(0.5) - 0.01).abs() < 1e-15);
        assert!((s.at(-7.0) - 0.01).abs() < 1e-15);
        assert!((s.at(10.5) - 0.1).abs() < 1e-12);
        assert!((s.at(1040.0) - 10.0).abs() < 1e-9);
        assert!((s.at(-250.0) - 1.0).abs() < 1e-12);
        assert_eq!(StepSize::Fixed(0.3).at(1e6), 0.3);
    }

    #[test]
    fn smooth_curve_is_one_path_with_exact_endpoints() {
        let c = ParametricCurve::new(|t| vector![t + 2.0, t * t + 1.0, 0.0], 0.0, 1.0);
        assert!(c.discontinuities(DEFAULT_TOL_POINT, DEFAULT_TOL_DEL_MULT).is_empty());
        let paths = c.paths();
        assert_eq!(paths.len(), 1);
        let p = &paths[0];
        assert!(p.len() >= 100);
        assert_eq!(p[0], vector![2.0, 1.0, 0.0]);
        assert_eq!(*p.last().unwrap(), vector![3.0, 2.0, 0.0]);
    }

    #[test]
    fn paths_split_at_a_pole() {
        let c = function_graph(|x| 1.0 / x, -1.0, 1.0);
        let paths = c.paths();
        assert!(paths.len() >= 2);
        for path in &paths {
            assert!(path.iter().all(|p| p.iter().all(|v| v.is_finite())));
            let neg = path.iter().all(|p| p.x < 0.0);
            let pos = path.iter().all(|p| p.x > 0.0);
            assert!(neg || pos, "a path bridges the pole");
        }
        assert_eq!(*paths.first().unwrap().first().unwrap(), vector![-1.0, -1.0, 0.0]);
        assert_eq!(*paths.last().unwrap().last().unwrap(), vector![1.0, 1.0, 0.0]);
    }

    #[test]
    fn non_finite_samples_are_dropped() {
        // sqrt is NaN left of zero; nothing is flagged there, the points just vanish.
        let c = function_graph(|x: f64| x.sqrt() + 1.0, -0.5, 0.5);
        let paths = c.paths();
        assert!(!paths.is_empty());
        for p in paths.iter().flatten() {
            assert!(p.x >= 0.0);
        }
    }

    #[test]
    fn function_graph_embeds_in_plane() {
        let g = function_graph(|x| x * x, -1.0, 1.0);
        assert_eq!(g.point_at(0.5), vector![0.5, 0.25, 0.0]);
        assert_eq!(g.color, Color::YELLOW);
        let shapes = g.shapes();
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0], Shape::Polyline(_)));
    }

    #[test]
    fn arange_is_half_open() {
        let v: Vec<f64> = arange(0.0, 1.0, StepSize::Fixed(0.25)).collect();
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(arange(1.0, 0.0, StepSize::Fixed(0.1)).count(), 0);
        assert_eq!(arange(0.0, 1.0, StepSize::Fixed(0.0)).count(), 0);
        let auto: Vec<f64> = arange(9.98, 10.3, StepSize::Auto).collect();
        assert!(auto.len() < 10);
    }
}
