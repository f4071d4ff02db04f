// src/geometry.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The widget's client rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Anchor of the magnification, in percent of the element box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformOrigin {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl TransformOrigin {
    pub const CENTER: TransformOrigin = TransformOrigin {
        x_percent: 50.0,
        y_percent: 50.0,
    };

    pub fn new(x_percent: f64, y_percent: f64) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::CENTER
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", self.x_percent, self.y_percent)
    }
}

/// Maps a page-space pointer onto the element box.
///
/// The result is not clamped: a pointer outside the box yields percentages
/// outside `0..=100`. A collapsed axis (zero or negative extent) is anchored
/// at its center instead of dividing by zero.
pub fn compute_origin(
    pointer: PagePoint,
    bounds: BoundingBox,
    scroll: ScrollOffset,
) -> TransformOrigin {
    let delta_x = pointer.x - bounds.x - scroll.x;
    let delta_y = pointer.y - bounds.y - scroll.y;

    TransformOrigin {
        x_percent: percent_of(delta_x, bounds.width),
        y_percent: percent_of(delta_y, bounds.height),
    }
}

fn percent_of(delta: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        delta / extent * 100.0
    } else {
        TransformOrigin::CENTER.x_percent
    }
}
