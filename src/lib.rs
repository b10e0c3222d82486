//! Bubble Pop - numbered bubbles rise from the bottom of a canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bubbles, collisions, waves, tick)
//! - `renderer`: Render surface abstraction (Canvas 2D, recording)
//! - `platform`: Frame scheduling (requestAnimationFrame, bounded ticks)
//! - `settings`: Palettes and spawn tuning

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation constants (defaults for `Settings`)
pub mod consts {
    use super::Color;

    /// Smallest spawn radius (inclusive)
    pub const MIN_RADIUS: u32 = 35;
    /// Largest spawn radius (exclusive)
    pub const MAX_RADIUS: u32 = 95;
    /// Initial velocity of every spawned bubble (pixels per frame)
    pub const SPAWN_VELOCITY: (f32, f32) = (2.0, -2.0);
    /// Upper bound accepted from settings for any radius
    pub const MAX_SPAWN_RADIUS: u32 = 10_000;
    /// Wave size when the simulation starts
    pub const INITIAL_WAVE_SIZE: u32 = 1;

    /// Stroke palette bound at spawn
    pub const SPAWN_PALETTE: (Color, Color) =
        (Color::rgb(0xff, 0x14, 0x93), Color::rgb(0xc2, 0xff, 0x05));
    /// Stroke palette installed on every collision (neon pink)
    pub const COLLISION_PALETTE: (Color, Color) =
        (Color::rgb(0xff, 0x6e, 0xc7), Color::rgb(0xff, 0x14, 0x93));
    pub const TEXT_COLOR: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BACKGROUND: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const LINE_WIDTH: f32 = 2.0;
    pub const FONT: &str = "20px Century Gothic";

    /// Fraction of the window the canvas occupies
    pub const CANVAS_FILL: f32 = 0.9;

    /// Centres closer than this are treated as coincident
    pub const DEGENERATE_DISTANCE: f32 = 1e-4;
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS hex notation, e.g. `#ff1493`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

/// Drawable area reported by the host, re-read every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite dimensions
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Top-left origin and size as a rectangle
    pub fn rect(&self) -> Rect {
        Rect {
            origin: Vec2::ZERO,
            size: Vec2::new(self.width, self.height),
        }
    }
}

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Direction from `from` to `to` as an angle in radians
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn unit(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let c = Color::from_hex("#c2ff05").unwrap();
        assert_eq!(c, Color::rgb(0xc2, 0xff, 0x05));
        assert_eq!(c.to_css(), "#c2ff05");
        assert_eq!(Color::from_hex("ff1493"), Some(Color::rgb(0xff, 0x14, 0x93)));
        assert!(Color::from_hex("#ff14").is_none());
        assert!(Color::from_hex("#gg1493").is_none());
    }

    #[test]
    fn test_viewport_degenerate() {
        assert!(!Viewport::new(800.0, 600.0).is_degenerate());
        assert!(Viewport::new(0.0, 600.0).is_degenerate());
        assert!(Viewport::new(800.0, -1.0).is_degenerate());
        assert!(Viewport::new(f32::NAN, 600.0).is_degenerate());
    }

    #[test]
    fn test_angle_between() {
        let a = angle_between(Vec2::ZERO, Vec2::new(0.0, 1.0));
        assert!((a - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let u = unit(std::f32::consts::PI);
        assert!((u.x + 1.0).abs() < 1e-6 && u.y.abs() < 1e-6);
    }
}
