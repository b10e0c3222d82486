//! Simulation settings and appearance
//!
//! Persisted in LocalStorage on the web. Missing fields fall back to the
//! defaults in `consts`.

use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::*;
use crate::renderer::TextStyle;

/// Colors, stroke and label appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Stroke palette bound at spawn and restored on wall contact
    pub spawn_palette: (Color, Color),
    /// Stroke palette installed on collision
    pub collision_palette: (Color, Color),
    pub line_width: f32,
    pub text: TextStyle,
    /// Canvas background (CSS)
    pub background: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            spawn_palette: SPAWN_PALETTE,
            collision_palette: COLLISION_PALETTE,
            line_width: LINE_WIDTH,
            text: TextStyle::default(),
            background: BACKGROUND,
        }
    }
}

/// Spawn tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Smallest radius (inclusive)
    pub min_radius: u32,
    /// Largest radius (exclusive)
    pub max_radius: u32,
    /// Velocity of a freshly spawned bubble (pixels per frame)
    pub velocity: (f32, f32),
    /// Wave size at start; the first wave is spawned before the loop runs
    pub initial_wave_size: u32,
    /// Fixed RNG seed (host picks one when absent)
    pub seed: Option<u64>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            velocity: SPAWN_VELOCITY,
            initial_wave_size: INITIAL_WAVE_SIZE,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub style: Style,
    pub spawn: SpawnSettings,
    /// Fraction of the window the canvas covers
    pub canvas_fill: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            spawn: SpawnSettings::default(),
            canvas_fill: CANVAS_FILL,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bubble_pop_settings";

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("Ignoring invalid settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Repair values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let spawn = &mut self.spawn;
        spawn.min_radius = spawn.min_radius.clamp(1, MAX_SPAWN_RADIUS - 1);
        spawn.max_radius = spawn.max_radius.min(MAX_SPAWN_RADIUS);
        if spawn.max_radius <= spawn.min_radius {
            log::warn!(
                "max_radius {} <= min_radius {}, widening range",
                spawn.max_radius,
                spawn.min_radius
            );
            spawn.max_radius = spawn.min_radius + 1;
        }
        spawn.initial_wave_size = spawn.initial_wave_size.max(1);
        // Bubbles must leave through the top
        if !(spawn.velocity.1 < 0.0) {
            spawn.velocity.1 = -spawn.velocity.1.abs().max(f32::EPSILON);
        }
        if !spawn.velocity.0.is_finite() {
            spawn.velocity.0 = SPAWN_VELOCITY.0;
        }
        if !spawn.velocity.1.is_finite() {
            spawn.velocity.1 = SPAWN_VELOCITY.1;
        }

        if !(self.style.line_width > 0.0) {
            self.style.line_width = LINE_WIDTH;
        }
        if !(self.canvas_fill > 0.0 && self.canvas_fill <= 1.0) {
            self.canvas_fill = CANVAS_FILL;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.style.spawn_palette.0.to_css(), "#ff1493");
        assert_eq!(s.style.spawn_palette.1.to_css(), "#c2ff05");
        assert_eq!(s.style.collision_palette.0.to_css(), "#ff6ec7");
        assert_eq!(s.spawn.min_radius, 35);
        assert_eq!(s.spawn.max_radius, 95);
        assert_eq!(s.spawn.velocity, (2.0, -2.0));
        assert_eq!(s.spawn.initial_wave_size, 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r##"{"spawn": {"seed": 42}, "style": {"line_width": 4.0}}"##);
        assert_eq!(s.spawn.seed, Some(42));
        assert_eq!(s.spawn.min_radius, 35);
        assert_eq!(s.style.line_width, 4.0);
        assert_eq!(s.style.text.font, FONT);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
        assert_eq!(
            Settings::from_json(r##"{"style": {"background": "#zzz"}}"##),
            Settings::default()
        );
    }

    #[test]
    fn test_huge_radius_is_capped() {
        let s = Settings::from_json(r##"{"spawn": {"min_radius": 4294967295}}"##);
        assert!(s.spawn.min_radius < s.spawn.max_radius);
        assert!(s.spawn.max_radius <= MAX_SPAWN_RADIUS);

        let s = Settings::from_json(
            r##"{"spawn": {"min_radius": 4294967295, "max_radius": 4294967295}}"##,
        );
        assert_eq!(s.spawn.min_radius, MAX_SPAWN_RADIUS - 1);
        assert_eq!(s.spawn.max_radius, MAX_SPAWN_RADIUS);

        // A wave still spawns from the repaired range
        let viewport = crate::Viewport::new(800.0, 600.0);
        let sim = crate::sim::Simulation::new(&s, 1, viewport);
        assert_eq!(sim.bubbles().len(), 1);
        assert!(sim.bubbles()[0].pos.is_finite());
    }

    #[test]
    fn test_round_trip_json() {
        let mut s = Settings::default();
        s.spawn.seed = Some(7);
        s.style.collision_palette = (Color::rgb(1, 2, 3), Color::rgb(4, 5, 6));
        assert_eq!(Settings::from_json(&s.to_json()), s);
    }

    #[test]
    fn test_sanitized_repairs_values() {
        let mut s = Settings::default();
        s.spawn.min_radius = 0;
        s.spawn.max_radius = 0;
        s.spawn.initial_wave_size = 0;
        s.spawn.velocity = (2.0, 3.0);
        s.style.line_width = -1.0;
        s.canvas_fill = 4.0;

        let s = s.sanitized();
        assert_eq!(s.spawn.min_radius, 1);
        assert_eq!(s.spawn.max_radius, 2);
        assert_eq!(s.spawn.initial_wave_size, 1);
        assert_eq!(s.spawn.velocity, (2.0, -3.0));
        assert_eq!(s.style.line_width, LINE_WIDTH);
        assert_eq!(s.canvas_fill, CANVAS_FILL);
    }
}
