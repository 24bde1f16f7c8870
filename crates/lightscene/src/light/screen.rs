use nalgebra::Vector2;

use crate::geom::rotate_vector;

/// Ordered anchor points a spotlight looks at; a segment when it has two.
///
/// Screens are moved and rotated by animations; spotlights only read them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Screen {
    pub anchors: Vec<Vector2<f64>>,
}

impl Screen {
    #[inline]
    pub fn segment(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self {
            anchors: vec![a, b],
        }
    }

    #[inline]
    pub fn from_anchors(anchors: Vec<Vector2<f64>>) -> Self {
        Self { anchors }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// First and last anchor (equal for a one-point screen).
    pub fn endpoints(&self) -> Option<(Vector2<f64>, Vector2<f64>)> {
        Some((*self.anchors.first()?, *self.anchors.last()?))
    }

    /// Centre of the axis-aligned bounding box.
    pub fn center(&self) -> Option<Vector2<f64>> {
        let first = *self.anchors.first()?;
        let (lo, hi) = self
            .anchors
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Some((lo + hi) * 0.5)
    }

    pub fn length(&self) -> f64 {
        self.anchors.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    pub fn shift(&mut self, delta: Vector2<f64>) {
        for p in &mut self.anchors {
            *p += delta;
        }
    }

    /// Rotate about the bounding-box centre.
    pub fn rotate(&mut self, angle: f64) {
        if let Some(c) = self.center() {
            self.rotate_about(angle, c);
        }
    }

    pub fn rotate_about(&mut self, angle: f64, pivot: Vector2<f64>) {
        for p in &mut self.anchors {
            *p = pivot + rotate_vector(*p - pivot, angle);
        }
    }
}
