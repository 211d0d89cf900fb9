//! Diagram geometry — positions, sizes, and bounds math for the layout passes.

use serde::{Deserialize, Serialize};

/// Position of a node or annotation on the diagram canvas.
///
/// Y grows downward (screen coordinates), matching the diagram widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, rotation: 0.0 }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Width/height of an annotation shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding rectangle accumulated over node positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// The identity for `expand_to`/`merge`: contains nothing.
    pub const EMPTY: Rect = Rect {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    /// Grow to include the given point.
    pub fn expand_to(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn merge(a: Rect, b: Rect) -> Rect {
        Rect {
            min_x: a.min_x.min(b.min_x),
            min_y: a.min_y.min(b.min_y),
            max_x: a.max_x.max(b.max_x),
            max_y: a.max_y.max(b.max_y),
        }
    }

    /// Uniformly padded copy. Empty rects stay empty.
    pub fn padded(&self, margin: f64) -> Rect {
        if self.is_empty() {
            return *self;
        }
        Rect {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }

    /// Top-left corner as a position.
    pub fn origin(&self) -> Position {
        Position::new(self.min_x, self.min_y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}
