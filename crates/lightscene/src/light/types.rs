//! Light configuration and errors.

use nalgebra::Vector2;
use std::f64::consts::TAU;
use thiserror::Error;

use super::falloff::Falloff;
use crate::geom::Color;

/// Parameters of a light source.
///
/// Invariants (checked by the field constructors):
/// - `radius` finite and `> 0`;
/// - `num_levels >= 1`;
/// - `max_intensity` finite and `>= 0`.
#[derive(Clone, Debug)]
pub struct LightCfg {
    pub source: Vector2<f64>,
    pub falloff: Falloff,
    pub color: Color,
    pub max_intensity: f64,
    pub num_levels: usize,
    pub radius: f64,
}

impl LightCfg {
    /// Ambient light defaults: `1/(r+1)²` over radius 5 in 10 rings.
    pub fn ambient() -> Self {
        Self {
            source: Vector2::zeros(),
            falloff: Falloff::ambient_default(),
            color: Color::YELLOW,
            max_intensity: 1.0,
            num_levels: 10,
            radius: 5.0,
        }
    }

    /// Spotlight defaults: `1/(r/2+1)²` over radius 5 in 10 rings.
    pub fn spotlight() -> Self {
        Self {
            falloff: Falloff::spotlight_default(),
            ..Self::ambient()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), LightError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(LightError::InvalidRadius(self.radius));
        }
        if self.num_levels == 0 {
            return Err(LightError::NoLevels);
        }
        check_intensity(self.max_intensity)
    }

    /// Ring width `R / N`.
    #[inline]
    pub fn ring_width(&self) -> f64 {
        self.radius / self.num_levels as f64
    }

    /// Inner radius of ring `i`; `i == num_levels` gives exactly `radius`.
    #[inline]
    pub(crate) fn ring_boundary(&self, i: usize) -> f64 {
        if i >= self.num_levels {
            self.radius
        } else {
            self.radius * i as f64 / self.num_levels as f64
        }
    }

    /// Opacity of ring `i`, sampled at its inner radius.
    #[inline]
    pub(crate) fn ring_opacity(&self, i: usize) -> f64 {
        self.max_intensity * self.falloff.eval(self.ring_boundary(i))
    }
}

impl Default for LightCfg {
    fn default() -> Self {
        Self::ambient()
    }
}

pub(crate) fn check_intensity(value: f64) -> Result<(), LightError> {
    if !value.is_finite() || value < 0.0 {
        return Err(LightError::InvalidIntensity(value));
    }
    Ok(())
}

/// Shadow tuning.
///
/// The shadow is a quadrilateral approximation of the unbounded occluded
/// region: rays through the screen ends are stretched to `ray_scale` and
/// splayed outwards by `angular_pad`.
#[derive(Clone, Copy, Debug)]
pub struct ShadowCfg {
    pub ray_scale: f64,
    pub angular_pad: f64,
    pub color: Color,
    pub opacity: f64,
}

impl Default for ShadowCfg {
    fn default() -> Self {
        Self {
            ray_scale: 100.0,
            angular_pad: TAU / 16.0,
            color: Color::BLACK,
            opacity: 1.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("light radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("light needs at least one tessellation level")]
    NoLevels,

    #[error("light intensity must be non-negative and finite, got {0}")]
    InvalidIntensity(f64),
}
