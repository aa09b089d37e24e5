// src/view_lib/camera.rs

use glam::{DVec2, Vec2};
use crate::config::ViewConfig;

/// Pan/zoom mapping between world coordinates and physical screen pixels:
/// `screen = world * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { pan: Vec2::ZERO, zoom: 1.0 }
    }
}

impl ViewTransform {
    pub fn world_to_screen(&self, world: DVec2) -> Vec2 {
        world.as_vec2() * self.zoom + self.pan
    }

    pub fn screen_to_world(&self, screen: Vec2) -> DVec2 {
        ((screen - self.pan) / self.zoom).as_dvec2()
    }

    pub fn scale_length(&self, world_length: f64) -> f32 {
        world_length as f32 * self.zoom
    }

    /// Multiplies the zoom by `factor`, clamped to the configured bounds, keeping
    /// the world point under `focus` where it is on screen.
    pub fn zoom_about(&mut self, factor: f32, focus: Vec2, config: &ViewConfig) {
        let target = (self.zoom * factor).clamp(config.min_zoom, config.max_zoom);
        let applied = target / self.zoom;
        self.pan = focus - (focus - self.pan) * applied;
        self.zoom = target;
    }

    pub fn zoom_by_notches(&mut self, notches: f32, focus: Vec2, config: &ViewConfig) {
        self.zoom_about(config.zoom_step.powf(notches), focus, config);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
