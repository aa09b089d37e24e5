// src/config.rs

use glam::DVec2;
use log::{info, warn};
use crate::graph_lib::TriangulationConfig;

pub const SEED_ENV_VAR: &str = "PLANAR_GRAPH_SEED";

#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    /// Zoom multiplier per wheel notch or zoom key press.
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Pixel-delta wheels (touchpads) report this many pixels per notch.
    pub pixels_per_wheel_notch: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub view: ViewConfig,
    pub graph: TriangulationConfig,
    pub notice_seconds: f32,
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let window = WindowConfig {
            title: "Planar Triangulated Graph Visualizer".to_string(),
            width: 1000,
            height: 700,
        };
        let (width, height) = (window.width, window.height);
        Self {
            window,
            view: ViewConfig {
                zoom_step: 1.1,
                min_zoom: 0.1,
                max_zoom: 10.0,
                pixels_per_wheel_notch: 50.0,
            },
            graph: TriangulationConfig::default(),
            notice_seconds: 3.0,
            rng_seed: None,
        }
        .centered_on(width, height)
    }
}

impl AppConfig {
    /// Lays the seed triangle out around the middle of a viewport given in
    /// physical pixels, the space the view transform maps into.
    pub fn centered_on(mut self, width: u32, height: u32) -> Self {
        self.graph.seed_center = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
        self
    }

    /// Defaults, with the random placement seed taken from the environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.rng_seed = parse_seed(std::env::var(SEED_ENV_VAR).ok().as_deref());
        if let Some(seed) = config.rng_seed {
            info!("using random placement seed {}", seed);
        }
        config
    }
}

fn parse_seed(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    match raw.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(e) => {
            warn!("ignoring {}={:?}: {}", SEED_ENV_VAR, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_center_follows_window() {
        let config = AppConfig::default();
        assert_eq!(config.graph.seed_center, DVec2::new(500.0, 350.0));
    }

    #[test]
    fn seed_center_uses_physical_viewport() {
        let config = AppConfig::default().centered_on(2000, 1400);
        assert_eq!(config.graph.seed_center, DVec2::new(1000.0, 700.0));
        assert_eq!(config.window.width, 1000);
    }

    #[test]
    fn seed_parsing() {
        assert_eq!(parse_seed(Some(" 42 ")), Some(42));
        assert_eq!(parse_seed(Some("forty-two")), None);
        assert_eq!(parse_seed(None), None);
    }
}
