//! Directional light bounded by a screen, plus its shadow.

use nalgebra::Vector2;

use super::falloff::Falloff;
use super::screen::Screen;
use super::shadow::shadow_polygon;
use super::types::{check_intensity, LightCfg, LightError, ShadowCfg};
use crate::geom::{angle_of_vector, AnnularSector, Polygon, Shape};

/// Spotlight: the radial tessellation restricted to the wedge a screen
/// subtends from the source.
///
/// Invariants:
/// - After a successful `recompute`, every sector spans exactly
///   `[lower, upper]`, the min/max viewing angle over the screen anchors.
/// - `shadow` is the polygon `shadow_polygon` built from the same source and
///   screen.
/// - Before the first recompute there are no sectors and no shadow.
#[derive(Clone, Debug)]
pub struct DirectionalLightField {
    cfg: LightCfg,
    shadow_cfg: ShadowCfg,
    sectors: Vec<AnnularSector>,
    shadow: Option<Polygon>,
}

impl DirectionalLightField {
    pub fn new(cfg: LightCfg, shadow_cfg: ShadowCfg) -> Result<Self, LightError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            shadow_cfg,
            sectors: Vec::new(),
            shadow: None,
        })
    }

    #[inline]
    pub fn cfg(&self) -> &LightCfg {
        &self.cfg
    }
    #[inline]
    pub fn shadow_cfg(&self) -> &ShadowCfg {
        &self.shadow_cfg
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
    pub fn sectors(&self) -> &[AnnularSector] {
        &self.sectors
    }
    #[inline]
    pub(crate) fn sectors_mut(&mut self) -> &mut [AnnularSector] {
        &mut self.sectors
    }
    #[inline]
    pub fn shadow(&self) -> Option<&Polygon> {
        self.shadow.as_ref()
    }

    /// Current wedge `(start, span)` as stored on the sectors.
    pub fn wedge(&self) -> Option<(f64, f64)> {
        self.sectors.first().map(|s| (s.start_angle, s.angle_span))
    }

    /// Polar angle of `point` as seen from the source, in `(-π, π]`.
    #[inline]
    pub fn viewing_angle_of_point(&self, point: Vector2<f64>) -> f64 {
        angle_of_vector(point - self.cfg.source)
    }

    /// `(lower, upper)` viewing angles over the screen anchors; `(0, 0)` when
    /// there is no screen or it has no anchors.
    pub fn viewing_angles(&self, screen: Option<&Screen>) -> (f64, f64) {
        let Some(screen) = screen else {
            return (0.0, 0.0);
        };
        let mut it = screen
            .anchors
            .iter()
            .map(|p| self.viewing_angle_of_point(*p));
        let Some(first) = it.next() else {
            return (0.0, 0.0);
        };
        it.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)))
    }

    pub fn opening_angle(&self, screen: Option<&Screen>) -> f64 {
        let (lo, hi) = self.viewing_angles(screen);
        hi - lo
    }

    pub fn start_angle(&self, screen: Option<&Screen>) -> f64 {
        self.viewing_angles(screen).0
    }

    pub fn stop_angle(&self, screen: Option<&Screen>) -> f64 {
        self.viewing_angles(screen).1
    }

    /// Rebuild all sectors and the shadow from the current source and screen.
    ///
    /// Only geometry is rebuilt: once sectors exist, each keeps its current
    /// opacity, so fades written between recomputes survive. The first
    /// recompute derives opacities from the falloff.
    ///
    /// Total and idempotent. A missing screen, or one without anchors, leaves
    /// the previous geometry in place and returns `false`.
    pub fn recompute(&mut self, screen: Option<&Screen>) -> bool {
        let Some(screen) = screen.filter(|s| !s.is_empty()) else {
            tracing::trace!("spotlight recompute skipped: no screen");
            return false;
        };
        let (lower, upper) = self.viewing_angles(Some(screen));
        let cfg = &self.cfg;
        let carried = (self.sectors.len() == cfg.num_levels).then_some(&self.sectors);
        let sectors = (0..cfg.num_levels)
            .map(|i| AnnularSector {
                center: cfg.source,
                inner_radius: cfg.ring_boundary(i),
                outer_radius: cfg.ring_boundary(i + 1),
                start_angle: lower,
                angle_span: upper - lower,
                fill_opacity: carried.map_or_else(|| cfg.ring_opacity(i), |s| s[i].fill_opacity),
                color: cfg.color,
            })
            .collect();
        self.sectors = sectors;
        self.shadow = shadow_polygon(cfg.source, screen, &self.shadow_cfg);
        true
    }

    /// Move the source and recompute against `screen`.
    ///
    /// Without a screen the existing sectors are carried along rigidly so the
    /// field stays centred on the source.
    pub fn move_source_to(&mut self, point: Vector2<f64>, screen: Option<&Screen>) {
        let delta = point - self.cfg.source;
        self.cfg.source = point;
        if !self.recompute(screen) {
            for s in &mut self.sectors {
                s.shift(delta);
            }
        }
    }

    /// Rescale sector opacities by `new / old`; the shadow is never dimmed.
    pub fn set_intensity_scale(&mut self, new_intensity: f64) -> Result<(), LightError> {
        check_intensity(new_intensity)?;
        let old = self.cfg.max_intensity;
        self.cfg.max_intensity = new_intensity;
        if old == 0.0 {
            self.rederive_opacities();
            return Ok(());
        }
        let ratio = new_intensity / old;
        for s in &mut self.sectors {
            s.fill_opacity *= ratio;
        }
        Ok(())
    }

    pub fn set_falloff(&mut self, falloff: Falloff) {
        self.cfg.falloff = falloff;
        self.rederive_opacities();
    }

    fn rederive_opacities(&mut self) {
        for (i, s) in self.sectors.iter_mut().enumerate() {
            s.fill_opacity = self.cfg.ring_opacity(i);
        }
    }

    /// Sectors first, shadow last (drawn on top).
    pub fn shapes(&self) -> Vec<Shape> {
        let mut out: Vec<Shape> = self.sectors.iter().copied().map(Shape::Sector).collect();
        if let Some(shadow) = &self.shadow {
            out.push(Shape::Polygon(shadow.clone()));
        }
        out
    }
}
