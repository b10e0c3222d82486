//! Render surface abstraction
//!
//! The simulation only ever issues three kinds of draw calls. Hosts provide
//! a surface: the browser wraps a Canvas 2D context, tests and the native
//! binary record the calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FONT, TEXT_COLOR};
use crate::{Color, Rect};

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// How bubble labels are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub color: Color,
    /// CSS font shorthand
    pub font: String,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: TEXT_COLOR,
            font: FONT.to_string(),
            align: TextAlign::Center,
        }
    }
}

/// Drawing primitives consumed by the simulation
pub trait RenderSurface {
    /// Erase a region back to the background
    fn clear(&mut self, region: Rect);

    /// Outline a circle
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);

    /// Draw text, vertically centred on `position`
    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn clear(&mut self, region: Rect) {
        (**self).clear(region);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        (**self).stroke_circle(center, radius, color, line_width);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        (**self).draw_text(text, position, style);
    }
}
