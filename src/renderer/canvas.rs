//! Canvas 2D surface (browser only)

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{RenderSurface, TextStyle};
use crate::{Color, Rect, Viewport};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` if a 2D context is unavailable
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Current backing-store size, read fresh on every call
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, region: Rect) {
        self.ctx.clear_rect(
            region.origin.x as f64,
            region.origin.y as f64,
            region.size.x as f64,
            region.size.y as f64,
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_text_baseline("middle");
        self.ctx.set_font(&style.font);
        let _ = self
            .ctx
            .fill_text(text, position.x as f64, position.y as f64);
    }
}
