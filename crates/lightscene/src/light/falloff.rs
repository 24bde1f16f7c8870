//! Opacity-by-radius curves.

use std::fmt;
use std::sync::Arc;

/// Shared opacity-by-radius function `r ↦ f(r)`.
///
/// Expected (not checked) to be non-increasing in `r` and to take values in
/// `[0, 1]` for the intensities used in scenes.
#[derive(Clone)]
pub struct Falloff(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Falloff {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn eval(&self, r: f64) -> f64 {
        (self.0)(r)
    }

    /// `r ↦ max · (cutoff / (r/scale + cutoff))^exponent`.
    pub fn inverse_power_law(max: f64, scale: f64, cutoff: f64, exponent: f64) -> Self {
        Self::new(move |r| max * (cutoff / (r / scale + cutoff)).powf(exponent))
    }

    pub fn inverse_quadratic(max: f64, scale: f64, cutoff: f64) -> Self {
        Self::inverse_power_law(max, scale, cutoff, 2.0)
    }

    /// `1 / (r + 1)²`, the ambient light default.
    pub fn ambient_default() -> Self {
        Self::new(|r| 1.0 / ((r + 1.0) * (r + 1.0)))
    }

    /// `1 / (r/2 + 1)²`, the spotlight default.
    pub fn spotlight_default() -> Self {
        Self::new(|r| {
            let d = r / 2.0 + 1.0;
            1.0 / (d * d)
        })
    }

    pub fn constant(value: f64) -> Self {
        Self::new(move |_| value)
    }
}

impl fmt::Debug for Falloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Falloff(..)")
    }
}
