//! Integer rectangles handed back to the host toolkit.

use glam::IVec2;

use formgrid_core::{Axis, Dimension, Insets};

/// A rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_vecs(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Leading coordinate and extent along `axis`.
    pub fn span(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.x, self.width),
            Axis::Vertical => (self.y, self.height),
        }
    }

    /// Shrink by `insets`. Extents never go below zero.
    pub fn inset(&self, insets: Insets) -> Rectangle {
        Rectangle::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.horizontal()).max(0),
            (self.height - insets.vertical()).max(0),
        )
    }

    /// Build a rectangle from the horizontal and vertical spans.
    pub fn from_spans((x, width): (i32, i32), (y, height): (i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}
