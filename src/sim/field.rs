//! Play field bounds
//!
//! The field follows the canvas, which the host may resize between frames.

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::error::{GameError, Result};

/// Rectangular play area with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    width: f32,
    height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GameError::InvalidField { width, height });
        }
        Ok(Self { width, height })
    }

    /// Largest field with the reference aspect ratio that fits the viewport
    pub fn fit_viewport(viewport_width: f32, viewport_height: f32) -> Result<Self> {
        let valid = viewport_width.is_finite()
            && viewport_height.is_finite()
            && viewport_width > 0.0
            && viewport_height > 0.0;
        if !valid {
            return Err(GameError::InvalidField {
                width: viewport_width,
                height: viewport_height,
            });
        }

        let aspect = FIELD_WIDTH / FIELD_HEIGHT;
        if viewport_width / viewport_height > aspect {
            // Fit to height
            Self::new(viewport_height * aspect, viewport_height)
        } else {
            // Fit to width
            Self::new(viewport_width, viewport_width / aspect)
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}
