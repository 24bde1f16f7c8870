use nalgebra::Vector2;

use crate::geom::{Color, Disc, Shape};

/// Disc whose fill opacity shows an intensity reading.
///
/// Foreground opacity is `min(1, intensity · opacity_for_unit_intensity)`;
/// an opaque black background disc sits underneath.
#[derive(Clone, Copy, Debug)]
pub struct LightIndicator {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
    pub opacity_for_unit_intensity: f64,
    pub stroke_width: f64,
    intensity: f64,
}

impl LightIndicator {
    pub fn new(
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        opacity_for_unit_intensity: f64,
    ) -> Self {
        Self {
            center,
            radius,
            color,
            opacity_for_unit_intensity,
            stroke_width: 1.0,
            intensity: 0.0,
        }
    }

    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity;
    }

    pub fn foreground_opacity(&self) -> f64 {
        (self.intensity * self.opacity_for_unit_intensity).clamp(0.0, 1.0)
    }

    /// Reading with three decimals, for the label renderer.
    pub fn reading(&self) -> String {
        format!("{:.3}", self.intensity)
    }

    pub fn shapes(&self) -> Vec<Shape> {
        let background = Disc {
            center: self.center,
            radius: self.radius,
            fill_color: Color::BLACK,
            fill_opacity: 1.0,
            stroke_color: Color::BLACK,
            stroke_width: 0.0,
        };
        let foreground = Disc {
            fill_color: self.color,
            fill_opacity: self.foreground_opacity(),
            stroke_color: Color::WHITE,
            stroke_width: self.stroke_width,
            ..background
        };
        vec![Shape::Disc(background), Shape::Disc(foreground)]
    }
}
