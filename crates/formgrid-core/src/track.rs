//! Column and row track specifications.

use std::fmt;

use smallvec::SmallVec;

use crate::size::Size;
use crate::types::Axis;

/// Alignment of a child within its cell along one axis.
///
/// For rows `Leading` is the top edge and `Trailing` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Left for columns, top for rows
    Leading,
    /// Centered in the cell
    Center,
    /// Right for columns, bottom for rows
    Trailing,
    /// Stretched over the whole cell
    Fill,
}

impl Alignment {
    /// The alignment a track gets when its encoding omits one.
    pub fn default_for(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Alignment::Fill,
            Axis::Vertical => Alignment::Center,
        }
    }

    /// The keyword for this alignment on `axis`.
    pub fn keyword(self, axis: Axis) -> &'static str {
        match (self, axis) {
            (Alignment::Leading, Axis::Horizontal) => "left",
            (Alignment::Leading, Axis::Vertical) => "top",
            (Alignment::Center, _) => "center",
            (Alignment::Trailing, Axis::Horizontal) => "right",
            (Alignment::Trailing, Axis::Vertical) => "bottom",
            (Alignment::Fill, _) => "fill",
        }
    }

    /// Parse a full or abbreviated keyword valid on `axis`.
    pub fn from_keyword(keyword: &str, axis: Axis) -> Option<Self> {
        match (keyword, axis) {
            ("left" | "l", Axis::Horizontal) => Some(Alignment::Leading),
            ("right" | "r", Axis::Horizontal) => Some(Alignment::Trailing),
            ("top" | "t", Axis::Vertical) => Some(Alignment::Leading),
            ("bottom" | "b", Axis::Vertical) => Some(Alignment::Trailing),
            ("center" | "c", _) => Some(Alignment::Center),
            ("fill" | "f", _) => Some(Alignment::Fill),
            _ => None,
        }
    }
}

/// A column or row descriptor.
///
/// Every field is concrete: omitted parts of an encoding are filled with
/// their defaults when the spec is built, so diagnostics always see the
/// effective values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSpec {
    axis: Axis,
    alignment: Alignment,
    size: Size,
    grow: f64,
}

impl TrackSpec {
    /// Create a track spec. Negative or non-finite weights are treated as 0.
    pub fn new(axis: Axis, alignment: Alignment, size: Size, grow: f64) -> Self {
        Self {
            axis,
            alignment,
            size,
            grow: sanitize_grow(grow),
        }
    }

    /// A column spec.
    pub fn column(alignment: Alignment, size: Size, grow: f64) -> Self {
        Self::new(Axis::Horizontal, alignment, size, grow)
    }

    /// A row spec.
    pub fn row(alignment: Alignment, size: Size, grow: f64) -> Self {
        Self::new(Axis::Vertical, alignment, size, grow)
    }

    /// A non-growing track with the axis' default alignment.
    pub fn sized(axis: Axis, size: Size) -> Self {
        Self::new(axis, Alignment::default_for(axis), size, 0.0)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn size(&self) -> &Size {
        &self.size
    }

    /// Growth weight used when distributing surplus space.
    pub fn grow(&self) -> f64 {
        self.grow
    }

    /// Whether the track keeps its preferred size when there is surplus.
    pub fn is_fixed(&self) -> bool {
        self.grow == 0.0
    }

    /// Copy of this spec with a different growth weight.
    pub fn with_grow(mut self, grow: f64) -> Self {
        self.grow = sanitize_grow(grow);
        self
    }
}

fn sanitize_grow(grow: f64) -> f64 {
    if grow > 0.0 && grow.is_finite() {
        grow
    } else {
        0.0
    }
}

/// A set of 1-based track indices on one axis whose resolved sizes are
/// equalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackGroup(pub SmallVec<[usize; 4]>);

impl TrackGroup {
    pub fn new(members: impl IntoIterator<Item = usize>) -> Self {
        TrackGroup(members.into_iter().collect())
    }

    pub fn members(&self) -> &[usize] {
        &self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[usize]> for TrackGroup {
    fn from(members: &[usize]) -> Self {
        TrackGroup::new(members.iter().copied())
    }
}

impl<const N: usize> From<[usize; N]> for TrackGroup {
    fn from(members: [usize; N]) -> Self {
        TrackGroup::new(members)
    }
}

/// Formats as `{1, 3}`.
impl fmt::Display for TrackGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, member) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", member)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for TrackSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.alignment.keyword(self.axis),
            self.size,
            self.grow
        )
    }
}
