//! Core value types shared by every formgrid crate.

use std::fmt;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Columns, measured along x.
    Horizontal,
    /// Rows, measured along y.
    Vertical,
}

impl Axis {
    /// Human-readable track name for this axis.
    pub fn track_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "column",
            Axis::Vertical => "row",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.track_name())
    }
}

/// Identifies a child of a layout container. Assigned by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildId(pub u64);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Physical units for constant sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Screen pixels
    Pixel,
    /// Points (1/72 inch)
    Point,
    /// Dialog units, relative to the reference font
    DialogUnit,
    /// Inches
    Inch,
    /// Millimeters
    Millimeter,
    /// Centimeters
    Centimeter,
}

impl Unit {
    /// The suffix used in the textual encoding.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Point => "pt",
            Unit::DialogUnit => "dlu",
            Unit::Inch => "in",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
        }
    }

    /// Look up a unit by its encoding suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(Unit::Pixel),
            "pt" => Some(Unit::Point),
            "dlu" => Some(Unit::DialogUnit),
            "in" => Some(Unit::Inch),
            "mm" => Some(Unit::Millimeter),
            "cm" => Some(Unit::Centimeter),
            _ => None,
        }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    /// Create a dimension.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The extent along `axis`.
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Dimension) -> Dimension {
        Dimension::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// Empty space around a cell or a container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const EMPTY: Self = Self { top: 0, left: 0, bottom: 0, right: 0 };

    /// Create insets in top, left, bottom, right order.
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    /// The same inset on every edge.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Leading and trailing inset along `axis`.
    pub fn along(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_suffix_lookup() {
        for unit in [
            Unit::Pixel,
            Unit::Point,
            Unit::DialogUnit,
            Unit::Inch,
            Unit::Millimeter,
            Unit::Centimeter,
        ] {
            assert_eq!(Unit::from_suffix(unit.suffix()), Some(unit));
        }
        assert_eq!(Unit::from_suffix("em"), None);
    }

    #[test]
    fn test_insets_along_axis() {
        let insets = Insets::new(1, 2, 3, 4);
        assert_eq!(insets.along(Axis::Horizontal), (2, 4));
        assert_eq!(insets.along(Axis::Vertical), (1, 3));
        assert_eq!(insets.horizontal(), 6);
        assert_eq!(insets.vertical(), 4);
        assert!(Insets::EMPTY.is_empty());
    }
}
