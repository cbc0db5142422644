//! Per-child cell constraints.

use std::fmt;

use crate::errors::LayoutError;
use crate::track::Alignment;
use crate::types::{Axis, Insets};

/// Where a child sits in the grid and how it is aligned inside its cell.
///
/// Column and row indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellConstraints {
    pub column: usize,
    pub row: usize,
    pub column_span: usize,
    pub row_span: usize,
    /// Overrides the column's default alignment
    pub horizontal: Option<Alignment>,
    /// Overrides the row's default alignment
    pub vertical: Option<Alignment>,
    pub insets: Insets,
}

impl Default for CellConstraints {
    fn default() -> Self {
        Self::xy(1, 1)
    }
}

impl CellConstraints {
    /// A single cell.
    pub fn xy(column: usize, row: usize) -> Self {
        Self::xywh(column, row, 1, 1)
    }

    /// A cell spanning `column_span` columns.
    pub fn xyw(column: usize, row: usize, column_span: usize) -> Self {
        Self::xywh(column, row, column_span, 1)
    }

    /// A cell spanning columns and rows.
    pub fn xywh(column: usize, row: usize, column_span: usize, row_span: usize) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
            horizontal: None,
            vertical: None,
            insets: Insets::EMPTY,
        }
    }

    /// Override the alignment on both axes.
    pub fn aligned(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal = Some(horizontal);
        self.vertical = Some(vertical);
        self
    }

    /// Set the insets subtracted from the cell before alignment.
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// First track and span along `axis`.
    pub fn extent(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::Horizontal => (self.column, self.column_span),
            Axis::Vertical => (self.row, self.row_span),
        }
    }

    /// Alignment override along `axis`.
    pub fn alignment(&self, axis: Axis) -> Option<Alignment> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Check the constraints against a grid of `columns` x `rows` tracks.
    ///
    /// `child` is only used to identify the offender in the error.
    pub fn check(&self, columns: usize, rows: usize, child: usize) -> Result<(), LayoutError> {
        for (axis, count) in [(Axis::Horizontal, columns), (Axis::Vertical, rows)] {
            let (start, span) = self.extent(axis);
            if start == 0 || span == 0 {
                return Err(LayoutError::ZeroIndex { child, axis });
            }
            if start + span - 1 > count {
                return Err(LayoutError::IndexOutOfRange {
                    child,
                    axis,
                    start,
                    span,
                    count,
                });
            }
        }
        Ok(())
    }
}

/// Encodes as `col, row, colSpan, rowSpan, hAlign, vAlign`, using `default`
/// for alignments that are not overridden.
impl fmt::Display for CellConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let horizontal = self
            .horizontal
            .map_or("default", |a| a.keyword(Axis::Horizontal));
        let vertical = self
            .vertical
            .map_or("default", |a| a.keyword(Axis::Vertical));
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.column, self.row, self.column_span, self.row_span, horizontal, vertical
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accepts_cells_inside_grid() {
        assert!(CellConstraints::xywh(2, 1, 2, 3).check(3, 3, 0).is_ok());
    }

    #[test]
    fn test_check_rejects_span_past_last_column() {
        let err = CellConstraints::xyw(2, 1, 3).check(3, 1, 4).unwrap_err();
        assert_eq!(
            err,
            LayoutError::IndexOutOfRange {
                child: 4,
                axis: Axis::Horizontal,
                start: 2,
                span: 3,
                count: 3,
            }
        );
    }

    #[test]
    fn test_check_rejects_zero_row() {
        let err = CellConstraints::xy(1, 0).check(1, 1, 0).unwrap_err();
        assert_eq!(err, LayoutError::ZeroIndex { child: 0, axis: Axis::Vertical });
    }

    #[test]
    fn test_display() {
        let cc = CellConstraints::xyw(1, 3, 2).aligned(Alignment::Leading, Alignment::Trailing);
        assert_eq!(cc.to_string(), "1, 3, 2, 1, left, bottom");
        assert_eq!(CellConstraints::xy(4, 5).to_string(), "4, 5, 1, 1, default, default");
    }
}
