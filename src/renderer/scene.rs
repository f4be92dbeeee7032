//! Display list generation
//!
//! Turns a `GameState` into a flat list of drawing commands. Pure, so the
//! layout can be tested without a canvas.

use crate::consts::{NET_DASH, NET_SPACING};
use crate::settings::Settings;
use crate::sim::{Color, Field, GameState, Paddle};

/// Trail circles are drawn slightly larger than the ball
const TRAIL_SCALE: f32 = 1.2;

const SCORE_STYLE: TextStyle = TextStyle {
    size: 120.0,
    bold: true,
    family: "Courier New",
};

const POWER_UP_STYLE: TextStyle = TextStyle {
    size: 30.0,
    bold: true,
    family: "Courier New",
};

/// Baseline of the active power-up label
const POWER_UP_LABEL_Y: f32 = 50.0;

/// Font settings for centered text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub family: &'static str,
}

impl TextStyle {
    /// CSS font shorthand, e.g. `bold 120px Courier New`
    pub fn css_font(&self) -> String {
        let weight = if self.bold { "bold" } else { "normal" };
        format!("{} {}px {}", weight, self.size, self.family)
    }
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Radial glow fading to transparent, with a 2px border
    GlowCircle {
        x: f32,
        y: f32,
        radius: f32,
        glow: Color,
        border: Color,
    },
    /// Text centered horizontally on `x`
    Text {
        text: String,
        x: f32,
        y: f32,
        color: Color,
        style: TextStyle,
    },
}

fn paddle_rect(paddle: &Paddle) -> DrawCommand {
    DrawCommand::Rect {
        x: paddle.x,
        y: paddle.y,
        width: paddle.width,
        height: paddle.height,
        color: paddle.color,
    }
}

/// Build the full frame: background, trail, ball, net, scores, paddles,
/// then the active power-up label
pub fn build(state: &GameState, field: Field, settings: &Settings) -> Vec<DrawCommand> {
    let (w, h) = (field.width(), field.height());
    let mut commands = Vec::with_capacity(64);

    commands.push(DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        width: w,
        height: h,
        color: Color::BLACK,
    });

    // Oldest point is fully transparent, newest almost opaque
    if settings.trails {
        let len = state.trail.len() as f32;
        for (i, point) in state.trail.iter().enumerate() {
            let color = Color::RED.with_alpha(i as f32 / len);
            commands.push(DrawCommand::GlowCircle {
                x: point.x,
                y: point.y,
                radius: state.ball.radius * TRAIL_SCALE,
                glow: color,
                border: color,
            });
        }
    }

    commands.push(DrawCommand::GlowCircle {
        x: state.ball.pos.x,
        y: state.ball.pos.y,
        radius: state.ball.radius,
        glow: Color::RED,
        border: Color::WHITE,
    });

    // Dashed center net
    let net_width = state.tuning.net_width;
    let mut y = 0.0;
    while y <= h {
        commands.push(DrawCommand::Rect {
            x: w / 2.0 - net_width / 2.0,
            y,
            width: net_width,
            height: NET_DASH,
            color: Color::WHITE,
        });
        y += NET_SPACING;
    }

    for (score, x) in [(state.user.score, w / 4.0), (state.opponent.score, 3.0 * w / 4.0)] {
        commands.push(DrawCommand::Text {
            text: score.to_string(),
            x,
            y: h / 2.0,
            color: Color::GRAY,
            style: SCORE_STYLE,
        });
    }

    commands.push(paddle_rect(&state.user));
    commands.push(paddle_rect(&state.opponent));

    if let Some(active) = state.power_ups.active() {
        commands.push(DrawCommand::Text {
            text: active.kind.name().to_string(),
            x: w / 2.0,
            y: POWER_UP_LABEL_Y,
            color: active.kind.color(),
            style: POWER_UP_STYLE,
        });
    }

    commands
}
