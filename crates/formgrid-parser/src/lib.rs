//! Parser for the formgrid text encodings.
//!
//! Column and row specifications are written as comma-separated tokens:
//!
//! ```text
//! right:max(40dlu;pref), 3dlu, fill:default:grow, 2*(7dlu, pref)
//! ```
//!
//! Cell constraints use `"col, row [, colSpan, rowSpan] [, hAlign, vAlign]"`.

mod grammar;
mod lexer;

use formgrid_core::{Axis, FormatError, TrackSpec};

pub use grammar::{parse_cell_constraints, parse_size, parse_track_spec, parse_track_specs};

/// Parse a column specification list.
pub fn parse_column_specs(text: &str) -> Result<Vec<TrackSpec>, FormatError> {
    parse_track_specs(text, Axis::Horizontal)
}

/// Parse a row specification list.
pub fn parse_row_specs(text: &str) -> Result<Vec<TrackSpec>, FormatError> {
    parse_track_specs(text, Axis::Vertical)
}
