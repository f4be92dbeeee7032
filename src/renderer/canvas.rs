//! Canvas2D backend
//!
//! Replays a display list on the page's `<canvas>`. Drawing failures are
//! logged and skipped; a bad primitive never stops the frame loop.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use super::scene::{DrawCommand, TextStyle};
use crate::sim::Color;

/// Border width of glow circles
const BORDER_WIDTH: f64 = 2.0;
/// Inner radius of the glow gradient, relative to the circle radius
const GLOW_CORE: f64 = 0.1;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Get a 2D context from the canvas (None if the browser refuses)
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn rect(&self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn glow_circle(&self, x: f32, y: f32, radius: f32, glow: Color, border: Color) {
        let (x, y, r) = (x as f64, y as f64, radius as f64);
        let ctx = &self.ctx;

        match ctx.create_radial_gradient(x, y, r * GLOW_CORE, x, y, r) {
            Ok(gradient) => {
                let _ = gradient.add_color_stop(0.0, &glow.to_css());
                let _ = gradient.add_color_stop(1.0, &Color::TRANSPARENT.to_css());
                ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Err(e) => {
                log::warn!("Gradient failed: {:?}", e);
                ctx.set_fill_style_str(&glow.to_css());
            }
        }
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
        ctx.close_path();
        ctx.fill();

        ctx.set_stroke_style_str(&border.to_css());
        ctx.set_line_width(BORDER_WIDTH);
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
        ctx.close_path();
        ctx.stroke();
    }

    fn text(&self, text: &str, x: f32, y: f32, color: Color, style: &TextStyle) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_align("center");
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => self.rect(*x, *y, *width, *height, *color),
                DrawCommand::GlowCircle {
                    x,
                    y,
                    radius,
                    glow,
                    border,
                } => self.glow_circle(*x, *y, *radius, *glow, *border),
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    color,
                    style,
                } => self.text(text, *x, *y, *color, style),
            }
        }
    }
}
