//! Id-addressed storage for everything a scene draws.

use nalgebra::{Vector2, Vector3};

use crate::geom::{Arc, Color, Polyline, Shape};
use crate::light::{DirectionalLightField, LightIndicator, RadialLightField, Screen};

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpotlightId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArcId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndicatorId(pub usize);

#[derive(Clone, Debug)]
struct SpotlightEntry {
    light: DirectionalLightField,
    screen: Option<ScreenId>,
}

/// Scene contents. Removed screens leave an empty slot so ids stay stable.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    screens: Vec<Option<Screen>>,
    spotlights: Vec<SpotlightEntry>,
    ambients: Vec<RadialLightField>,
    arcs: Vec<Arc>,
    indicators: Vec<LightIndicator>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // --- screens ---------------------------------------------------------

    pub fn add_screen(&mut self, screen: Screen) -> ScreenId {
        self.screens.push(Some(screen));
        ScreenId(self.screens.len() - 1)
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id.0).and_then(Option::as_ref)
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.screens.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Take the screen out of the scene; spotlights looking at it keep their
    /// last geometry.
    pub fn remove_screen(&mut self, id: ScreenId) -> Option<Screen> {
        self.screens.get_mut(id.0).and_then(Option::take)
    }

    // --- lights ----------------------------------------------------------

    pub fn add_ambient(&mut self, light: RadialLightField) -> LightId {
        self.ambients.push(light);
        LightId(self.ambients.len() - 1)
    }

    pub fn ambient(&self, id: LightId) -> Option<&RadialLightField> {
        self.ambients.get(id.0)
    }

    pub fn ambient_mut(&mut self, id: LightId) -> Option<&mut RadialLightField> {
        self.ambients.get_mut(id.0)
    }

    /// Add a spotlight and compute its initial cone against `screen`.
    pub fn add_spotlight(
        &mut self,
        light: DirectionalLightField,
        screen: Option<ScreenId>,
    ) -> SpotlightId {
        self.spotlights.push(SpotlightEntry { light, screen });
        let id = SpotlightId(self.spotlights.len() - 1);
        self.recompute_spotlight(id);
        id
    }

    pub fn spotlight(&self, id: SpotlightId) -> Option<&DirectionalLightField> {
        self.spotlights.get(id.0).map(|e| &e.light)
    }

    pub fn spotlight_mut(&mut self, id: SpotlightId) -> Option<&mut DirectionalLightField> {
        self.spotlights.get_mut(id.0).map(|e| &mut e.light)
    }

    /// Screen the spotlight currently looks at (`None` if detached or removed).
    pub fn spotlight_screen(&self, id: SpotlightId) -> Option<&Screen> {
        let sid = self.spotlights.get(id.0)?.screen?;
        self.screen(sid)
    }

    pub fn attach_screen(&mut self, spot: SpotlightId, screen: ScreenId) {
        if let Some(e) = self.spotlights.get_mut(spot.0) {
            e.screen = Some(screen);
        }
    }

    pub fn detach_screen(&mut self, spot: SpotlightId) -> Option<ScreenId> {
        self.spotlights.get_mut(spot.0)?.screen.take()
    }

    /// Recompute one spotlight from its current source and screen.
    ///
    /// Returns `false` when the spotlight is unknown or has no usable screen
    /// (geometry is then left untouched).
    pub fn recompute_spotlight(&mut self, id: SpotlightId) -> bool {
        let Some(entry) = self.spotlights.get_mut(id.0) else {
            tracing::debug!(spotlight = id.0, "recompute for unknown spotlight");
            return false;
        };
        let screen = entry
            .screen
            .and_then(|s| self.screens.get(s.0))
            .and_then(Option::as_ref);
        entry.light.recompute(screen)
    }

    pub fn move_spotlight_source(&mut self, id: SpotlightId, point: Vector2<f64>) {
        let Some(entry) = self.spotlights.get_mut(id.0) else {
            return;
        };
        let screen = entry
            .screen
            .and_then(|s| self.screens.get(s.0))
            .and_then(Option::as_ref);
        entry.light.move_source_to(point, screen);
    }

    pub fn opening_angle(&self, id: SpotlightId) -> f64 {
        self.spotlight(id)
            .map_or(0.0, |l| l.opening_angle(self.spotlight_screen(id)))
    }

    pub fn start_angle(&self, id: SpotlightId) -> f64 {
        self.spotlight(id)
            .map_or(0.0, |l| l.start_angle(self.spotlight_screen(id)))
    }

    pub fn stop_angle(&self, id: SpotlightId) -> f64 {
        self.spotlight(id)
            .map_or(0.0, |l| l.stop_angle(self.spotlight_screen(id)))
    }

    // --- annotations -----------------------------------------------------

    pub fn add_arc(&mut self, arc: Arc) -> ArcId {
        self.arcs.push(arc);
        ArcId(self.arcs.len() - 1)
    }

    pub fn arc(&self, id: ArcId) -> Option<&Arc> {
        self.arcs.get(id.0)
    }

    pub fn arc_mut(&mut self, id: ArcId) -> Option<&mut Arc> {
        self.arcs.get_mut(id.0)
    }

    pub fn add_indicator(&mut self, indicator: LightIndicator) -> IndicatorId {
        self.indicators.push(indicator);
        IndicatorId(self.indicators.len() - 1)
    }

    pub fn indicator(&self, id: IndicatorId) -> Option<&LightIndicator> {
        self.indicators.get(id.0)
    }

    pub fn indicator_mut(&mut self, id: IndicatorId) -> Option<&mut LightIndicator> {
        self.indicators.get_mut(id.0)
    }

    /// Draw list: ambient lights, spotlights (with shadows), screens, arcs,
    /// indicators.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut out = Vec::new();
        for a in &self.ambients {
            out.extend(a.shapes());
        }
        for e in &self.spotlights {
            out.extend(e.light.shapes());
        }
        for s in self.screens.iter().flatten() {
            out.push(Shape::Polyline(Polyline {
                points: s.anchors.iter().map(|p| Vector3::new(p.x, p.y, 0.0)).collect(),
                color: Color::WHITE,
            }));
        }
        out.extend(self.arcs.iter().copied().map(Shape::Arc));
        for i in &self.indicators {
            out.extend(i.shapes());
        }
        out
    }
}
