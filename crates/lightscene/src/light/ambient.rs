//! Omnidirectional light as concentric annuli.

use nalgebra::Vector2;

use super::falloff::Falloff;
use super::types::{check_intensity, LightCfg, LightError};
use crate::geom::{Annulus, Shape};

/// Radial light field: `num_levels` rings of equal width tiling `[0, radius)`.
///
/// Ring `i` spans `[i·R/N, (i+1)·R/N)` with opacity
/// `max_intensity · falloff(i·R/N)`.
#[derive(Clone, Debug)]
pub struct RadialLightField {
    cfg: LightCfg,
    annuli: Vec<Annulus>,
}

impl RadialLightField {
    pub fn new(cfg: LightCfg) -> Result<Self, LightError> {
        cfg.validate()?;
        let annuli = (0..cfg.num_levels)
            .map(|i| Annulus {
                center: cfg.source,
                inner_radius: cfg.ring_boundary(i),
                outer_radius: cfg.ring_boundary(i + 1),
                fill_opacity: cfg.ring_opacity(i),
                color: cfg.color,
            })
            .collect();
        Ok(Self { cfg, annuli })
    }

    #[inline]
    pub fn cfg(&self) -> &LightCfg {
        &self.cfg
    }
    #[inline]
    pub fn source(&self) -> Vector2<f64> {
        self.cfg.source
    }
    #[inline]
    pub fn intensity(&self) -> f64 {
        self.cfg.max_intensity
    }
    #[inline]
    pub fn annuli(&self) -> &[Annulus] {
        &self.annuli
    }
    #[inline]
    pub(crate) fn annuli_mut(&mut self) -> &mut [Annulus] {
        &mut self.annuli
    }

    /// Translate every ring by `point - source`; no re-tessellation.
    pub fn move_source_to(&mut self, point: Vector2<f64>) {
        let delta = point - self.cfg.source;
        for a in &mut self.annuli {
            a.shift(delta);
        }
        self.cfg.source = point;
    }

    /// Rescale every ring's opacity by `new / old` global intensity.
    ///
    /// Proportional: the current per-ring opacities are multiplied, so any
    /// drift the caller introduced (e.g. via a switch animation) is kept.
    /// From a zero intensity there is no ratio; opacities are re-derived from
    /// the falloff instead.
    pub fn set_intensity_scale(&mut self, new_intensity: f64) -> Result<(), LightError> {
        check_intensity(new_intensity)?;
        let old = self.cfg.max_intensity;
        self.cfg.max_intensity = new_intensity;
        if old == 0.0 {
            tracing::debug!(new_intensity, "ambient light dimmed up from zero; re-deriving");
            self.rederive_opacities();
            return Ok(());
        }
        let ratio = new_intensity / old;
        for a in &mut self.annuli {
            a.fill_opacity *= ratio;
        }
        Ok(())
    }

    /// Swap the falloff curve and re-derive opacities at the current intensity.
    pub fn set_falloff(&mut self, falloff: Falloff) {
        self.cfg.falloff = falloff;
        self.rederive_opacities();
    }

    fn rederive_opacities(&mut self) {
        for (i, a) in self.annuli.iter_mut().enumerate() {
            a.fill_opacity = self.cfg.ring_opacity(i);
        }
    }

    /// Intensity the field delivers at `point` (zero outside the disc).
    pub fn intensity_at(&self, point: Vector2<f64>) -> f64 {
        let r = (point - self.cfg.source).norm();
        if r >= self.cfg.radius {
            return 0.0;
        }
        self.cfg.max_intensity * self.cfg.falloff.eval(r)
    }

    pub fn shapes(&self) -> Vec<Shape> {
        self.annuli.iter().copied().map(Shape::Annulus).collect()
    }
}
