//! Continual tasks coupling lights, screens and annotations.

use super::scheduler::Continual;
use super::store::{ArcId, IndicatorId, Scene, SpotlightId};

/// Recomputes a spotlight against its screen every tick.
#[derive(Clone, Copy, Debug)]
pub struct ScreenTracker {
    pub spotlight: SpotlightId,
}

impl ScreenTracker {
    pub fn new(spotlight: SpotlightId) -> Self {
        Self { spotlight }
    }
}

impl Continual for ScreenTracker {
    fn update(&mut self, scene: &mut Scene, _dt: f64) {
        scene.recompute_spotlight(self.spotlight);
    }

    fn name(&self) -> &'static str {
        "screen_tracker"
    }
}

/// Keeps an arc centred on a spotlight's source, spanning its current wedge.
#[derive(Clone, Copy, Debug)]
pub struct AngleTracker {
    pub spotlight: SpotlightId,
    pub arc: ArcId,
}

impl Continual for AngleTracker {
    fn update(&mut self, scene: &mut Scene, _dt: f64) {
        let Some(source) = scene.spotlight(self.spotlight).map(|l| l.source()) else {
            return;
        };
        let start = scene.start_angle(self.spotlight);
        let stop = scene.stop_angle(self.spotlight);
        if let Some(arc) = scene.arc_mut(self.arc) {
            arc.center = source;
            arc.start_angle = start;
            arc.angle_span = stop - start;
        }
    }

    fn name(&self) -> &'static str {
        "angle_tracker"
    }
}

/// Feeds an indicator from a reading of the scene every tick.
pub struct IndicatorTracker<F> {
    pub indicator: IndicatorId,
    reading: F,
}

impl<F> IndicatorTracker<F>
where
    F: FnMut(&Scene) -> f64,
{
    pub fn new(indicator: IndicatorId, reading: F) -> Self {
        Self { indicator, reading }
    }
}

impl<F> Continual for IndicatorTracker<F>
where
    F: FnMut(&Scene) -> f64,
{
    fn update(&mut self, scene: &mut Scene, _dt: f64) {
        let value = (self.reading)(scene);
        if let Some(ind) = scene.indicator_mut(self.indicator) {
            ind.set_intensity(value);
        }
    }

    fn name(&self) -> &'static str {
        "indicator_tracker"
    }
}
