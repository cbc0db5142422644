//! Track origins and child placement.

use formgrid_core::{Alignment, Axis, CellConstraints, TrackSpec};

use crate::geometry::Rectangle;
use crate::solver::IntrinsicSize;

/// Solved track origins.
///
/// `column_origins()[i]` is the left edge of column `i + 1`; the last entry
/// is the right edge of the grid. Rows work the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutInfo {
    column_origins: Vec<i32>,
    row_origins: Vec<i32>,
}

impl LayoutInfo {
    /// Build origins from track sizes, starting at 0.
    pub fn from_sizes(column_sizes: &[i32], row_sizes: &[i32]) -> Self {
        Self {
            column_origins: origins(column_sizes),
            row_origins: origins(row_sizes),
        }
    }

    pub fn column_origins(&self) -> &[i32] {
        &self.column_origins
    }

    pub fn row_origins(&self) -> &[i32] {
        &self.row_origins
    }

    /// Origins along `axis`.
    pub fn origins(&self, axis: Axis) -> &[i32] {
        match axis {
            Axis::Horizontal => &self.column_origins,
            Axis::Vertical => &self.row_origins,
        }
    }

    /// Left edge of the grid.
    pub fn x(&self) -> i32 {
        self.column_origins.first().copied().unwrap_or(0)
    }

    /// Top edge of the grid.
    pub fn y(&self) -> i32 {
        self.row_origins.first().copied().unwrap_or(0)
    }

    pub fn width(&self) -> i32 {
        span(&self.column_origins)
    }

    pub fn height(&self) -> i32 {
        span(&self.row_origins)
    }

    /// The grid's outline.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x(), self.y(), self.width(), self.height())
    }

    /// A copy moved by `dx`, `dy`.
    pub fn translated(&self, dx: i32, dy: i32) -> LayoutInfo {
        LayoutInfo {
            column_origins: self.column_origins.iter().map(|o| o.saturating_add(dx)).collect(),
            row_origins: self.row_origins.iter().map(|o| o.saturating_add(dy)).collect(),
        }
    }

    /// The rectangle covered by the cells of `constraints`, before insets.
    ///
    /// The constraints must have been checked against the grid.
    pub fn cell(&self, constraints: &CellConstraints) -> Rectangle {
        let extent = |origins: &[i32], (start, span): (usize, usize)| {
            let from = origins[start - 1];
            (from, origins[start - 1 + span].saturating_sub(from))
        };
        Rectangle::from_spans(
            extent(&self.column_origins, constraints.extent(Axis::Horizontal)),
            extent(&self.row_origins, constraints.extent(Axis::Vertical)),
        )
    }
}

fn origins(sizes: &[i32]) -> Vec<i32> {
    let mut origins = Vec::with_capacity(sizes.len() + 1);
    let mut position = 0;
    origins.push(position);
    for &size in sizes {
        position = i32::saturating_add(position, size);
        origins.push(position);
    }
    origins
}

fn span(origins: &[i32]) -> i32 {
    match (origins.first(), origins.last()) {
        (Some(first), Some(last)) => last.saturating_sub(*first),
        _ => 0,
    }
}

/// Compute the bounds of one child.
///
/// `columns` and `rows` supply the default alignment of the first track the
/// child occupies; `constraints` must have been checked against them.
pub fn place(
    info: &LayoutInfo,
    constraints: &CellConstraints,
    columns: &[TrackSpec],
    rows: &[TrackSpec],
    child: &dyn IntrinsicSize,
) -> Rectangle {
    let cell = info.cell(constraints).inset(constraints.insets);
    let preferred = child.preferred_size();
    let maximum = child.maximum_size();

    let mut spans = [(0, 0); 2];
    for (slot, (axis, tracks)) in [(Axis::Horizontal, columns), (Axis::Vertical, rows)]
        .into_iter()
        .enumerate()
    {
        let (start, _) = constraints.extent(axis);
        let alignment = constraints
            .alignment(axis)
            .or_else(|| tracks.get(start - 1).map(TrackSpec::alignment))
            .unwrap_or_else(|| Alignment::default_for(axis));
        let limit = maximum.map_or(i32::MAX, |m| m.along(axis));
        spans[slot] = align(cell.span(axis), preferred.along(axis).min(limit), alignment);
    }

    Rectangle::from_spans(spans[0], spans[1])
}

/// Position `size` inside the span `(origin, extent)`.
fn align((origin, extent): (i32, i32), size: i32, alignment: Alignment) -> (i32, i32) {
    if alignment == Alignment::Fill {
        return (origin, extent);
    }
    let size = size.clamp(0, extent);
    let offset = match alignment {
        Alignment::Leading | Alignment::Fill => 0,
        Alignment::Center => (extent - size) / 2,
        Alignment::Trailing => extent - size,
    };
    (origin + offset, size)
}
