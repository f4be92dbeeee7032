//! Rendering module
//!
//! `scene` builds a display list from the game state; `canvas` replays it on
//! a Canvas2D context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{DrawCommand, TextStyle, build};

/// Anything that can draw a frame's display list
pub trait Surface {
    fn draw(&mut self, commands: &[DrawCommand]);
}

/// Surface that only keeps the most recent frame (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: u64,
    pub last: Vec<DrawCommand>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.last.clear();
        self.last.extend_from_slice(commands);
    }
}
