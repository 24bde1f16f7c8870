//! Discrete scene animations.
//!
//! Each animation captures its start state in `begin` and rebuilds the target
//! from that state at every `interpolate`, so replaying an alpha is exact.

use nalgebra::Vector2;

use super::scheduler::Animation;
use super::store::{IndicatorId, LightId, Scene, ScreenId, SpotlightId};
use crate::geom::lerp;
use crate::light::Screen;

/// Rotate a screen by `angle` about `pivot` (default: its centre at `begin`).
#[derive(Clone, Debug)]
pub struct RotateScreen {
    pub screen: ScreenId,
    pub angle: f64,
    pub pivot: Option<Vector2<f64>>,
    start: Option<Screen>,
}

impl RotateScreen {
    pub fn new(screen: ScreenId, angle: f64) -> Self {
        Self {
            screen,
            angle,
            pivot: None,
            start: None,
        }
    }

    pub fn about(mut self, pivot: Vector2<f64>) -> Self {
        self.pivot = Some(pivot);
        self
    }
}

impl Animation for RotateScreen {
    fn begin(&mut self, scene: &Scene) {
        self.start = scene.screen(self.screen).cloned();
        if self.pivot.is_none() {
            self.pivot = self.start.as_ref().and_then(Screen::center);
        }
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        let (Some(start), Some(pivot)) = (&self.start, self.pivot) else {
            return;
        };
        if let Some(screen) = scene.screen_mut(self.screen) {
            *screen = start.clone();
            screen.rotate_about(self.angle * alpha, pivot);
        }
    }
}

/// Translate a screen by `delta`.
#[derive(Clone, Debug)]
pub struct ShiftScreen {
    pub screen: ScreenId,
    pub delta: Vector2<f64>,
    start: Option<Screen>,
}

impl ShiftScreen {
    pub fn new(screen: ScreenId, delta: Vector2<f64>) -> Self {
        Self {
            screen,
            delta,
            start: None,
        }
    }
}

impl Animation for ShiftScreen {
    fn begin(&mut self, scene: &Scene) {
        self.start = scene.screen(self.screen).cloned();
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        let Some(start) = &self.start else {
            return;
        };
        if let Some(screen) = scene.screen_mut(self.screen) {
            *screen = start.clone();
            screen.shift(self.delta * alpha);
        }
    }
}

/// Move a spotlight's source along a straight line.
#[derive(Clone, Copy, Debug)]
pub struct MoveSpotlight {
    pub spotlight: SpotlightId,
    pub to: Vector2<f64>,
    from: Option<Vector2<f64>>,
}

impl MoveSpotlight {
    pub fn new(spotlight: SpotlightId, to: Vector2<f64>) -> Self {
        Self {
            spotlight,
            to,
            from: None,
        }
    }
}

impl Animation for MoveSpotlight {
    fn begin(&mut self, scene: &Scene) {
        self.from = scene.spotlight(self.spotlight).map(|l| l.source());
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        if let Some(from) = self.from {
            scene.move_spotlight_source(self.spotlight, from.lerp(&self.to, alpha));
        }
    }
}

/// Either kind of light in a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightTarget {
    Ambient(LightId),
    Spot(SpotlightId),
}

/// Change a light's global intensity (proportional rescale each step).
#[derive(Clone, Copy, Debug)]
pub struct DimLight {
    pub target: LightTarget,
    pub to: f64,
    from: Option<f64>,
}

impl DimLight {
    pub fn new(target: LightTarget, to: f64) -> Self {
        Self {
            target,
            to,
            from: None,
        }
    }
}

impl Animation for DimLight {
    fn begin(&mut self, scene: &Scene) {
        self.from = match self.target {
            LightTarget::Ambient(id) => scene.ambient(id).map(|l| l.intensity()),
            LightTarget::Spot(id) => scene.spotlight(id).map(|l| l.intensity()),
        };
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        let Some(from) = self.from else {
            return;
        };
        let value = lerp(from, self.to, alpha);
        let res = match self.target {
            LightTarget::Ambient(id) => scene.ambient_mut(id).map(|l| l.set_intensity_scale(value)),
            LightTarget::Spot(id) => scene.spotlight_mut(id).map(|l| l.set_intensity_scale(value)),
        };
        if let Some(Err(err)) = res {
            tracing::warn!(%err, "dimming skipped");
        }
    }
}

/// Tween an indicator's reading and opacity to a target intensity.
#[derive(Clone, Copy, Debug)]
pub struct UpdateIndicator {
    pub indicator: IndicatorId,
    pub to: f64,
    from: Option<f64>,
}

impl UpdateIndicator {
    pub fn new(indicator: IndicatorId, to: f64) -> Self {
        Self {
            indicator,
            to,
            from: None,
        }
    }
}

impl Animation for UpdateIndicator {
    fn begin(&mut self, scene: &Scene) {
        self.from = scene.indicator(self.indicator).map(|i| i.intensity());
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        let Some(from) = self.from else {
            return;
        };
        if let Some(ind) = scene.indicator_mut(self.indicator) {
            ind.set_intensity(lerp(from, self.to, alpha));
        }
    }
}

/// Lagged sweep settings.
#[derive(Clone, Copy, Debug)]
pub struct SwitchCfg {
    /// Fraction of a piece's window after which the next piece starts.
    pub lag_ratio: f64,
}

impl Default for SwitchCfg {
    fn default() -> Self {
        Self { lag_ratio: 0.2 }
    }
}

/// Progress of piece `k` (in sweep order) of `n` at global progress `alpha`.
///
/// Piece `k` runs over `[k·lag, k·lag + 1] / (1 + (n-1)·lag)`.
fn lagged_progress(alpha: f64, k: usize, n: usize, lag: f64) -> f64 {
    if alpha >= 1.0 {
        return 1.0;
    }
    let total = 1.0 + n.saturating_sub(1) as f64 * lag;
    (alpha * total - k as f64 * lag).clamp(0.0, 1.0)
}

/// Fully-lit per-piece opacities of a light (falloff at its current
/// intensity), innermost ring first.
fn lit_opacities(scene: &Scene, target: LightTarget) -> Option<Vec<f64>> {
    let (cfg, n) = match target {
        LightTarget::Ambient(id) => {
            let l = scene.ambient(id)?;
            (l.cfg(), l.annuli().len())
        }
        LightTarget::Spot(id) => {
            let l = scene.spotlight(id)?;
            (l.cfg(), l.sectors().len())
        }
    };
    Some((0..n).map(|i| cfg.ring_opacity(i)).collect())
}

/// Per-piece opacities of a light, innermost ring first.
fn piece_opacities(scene: &Scene, target: LightTarget) -> Option<Vec<f64>> {
    match target {
        LightTarget::Ambient(id) => {
            Some(scene.ambient(id)?.annuli().iter().map(|a| a.fill_opacity).collect())
        }
        LightTarget::Spot(id) => {
            Some(scene.spotlight(id)?.sectors().iter().map(|s| s.fill_opacity).collect())
        }
    }
}

fn apply_opacities(scene: &mut Scene, target: LightTarget, f: impl Fn(usize) -> f64) {
    match target {
        LightTarget::Ambient(id) => {
            if let Some(light) = scene.ambient_mut(id) {
                for (i, a) in light.annuli_mut().iter_mut().enumerate() {
                    a.fill_opacity = f(i);
                }
            }
        }
        LightTarget::Spot(id) => {
            if let Some(light) = scene.spotlight_mut(id) {
                for (i, s) in light.sectors_mut().iter_mut().enumerate() {
                    s.fill_opacity = f(i);
                }
            }
        }
    }
}

/// Fade a light in ring by ring, inside out. Ends fully lit at the light's
/// current intensity, whatever opacities it had when the animation began.
#[derive(Clone, Debug)]
pub struct SwitchOn {
    pub target: LightTarget,
    pub cfg: SwitchCfg,
    targets: Vec<f64>,
}

impl SwitchOn {
    pub fn new(target: LightTarget) -> Self {
        Self {
            target,
            cfg: SwitchCfg::default(),
            targets: Vec::new(),
        }
    }
}

impl Animation for SwitchOn {
    fn begin(&mut self, scene: &Scene) {
        self.targets = lit_opacities(scene, self.target).unwrap_or_default();
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        let n = self.targets.len();
        let lag = self.cfg.lag_ratio;
        let targets = &self.targets;
        apply_opacities(scene, self.target, |i| {
            targets.get(i).copied().unwrap_or(0.0) * lagged_progress(alpha, i, n, lag)
        });
    }
}

/// Fade a light out ring by ring, outside in.
#[derive(Clone, Debug)]
pub struct SwitchOff {
    pub target: LightTarget,
    pub cfg: SwitchCfg,
    starts: Vec<f64>,
}

impl SwitchOff {
    pub fn new(target: LightTarget) -> Self {
        Self {
            target,
            cfg: SwitchCfg::default(),
            starts: Vec::new(),
        }
    }
}

impl Animation for SwitchOff {
    fn begin(&mut self, scene: &Scene) {
        self.starts = piece_opacities(scene, self.target).unwrap_or_default();
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) {
        let n = self.starts.len();
        let lag = self.cfg.lag_ratio;
        let starts = &self.starts;
        apply_opacities(scene, self.target, |i| {
            let k = n.saturating_sub(1 + i);
            starts.get(i).copied().unwrap_or(0.0) * (1.0 - lagged_progress(alpha, k, n, lag))
        });
    }
}
