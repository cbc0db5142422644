//! Error types for the formgrid engine.

use crate::types::{Axis, ChildId};
use thiserror::Error;

/// Top-level error type for the formgrid engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Malformed specification text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Malformed token {token:?} (#{index}, offset {offset}): {reason}")]
    MalformedToken {
        token: String,
        index: usize,
        offset: usize,
        reason: String,
    },

    #[error("Invalid repetition {token:?} at offset {offset}: {reason}")]
    InvalidRepetition {
        token: String,
        offset: usize,
        reason: String,
    },

    #[error("Unbalanced parentheses in {text:?}")]
    UnbalancedParentheses { text: String },

    #[error("Invalid cell constraints {text:?}: {reason}")]
    InvalidConstraints { text: String, reason: String },
}

impl FormatError {
    /// The offending token, when the error concerns a single token.
    pub fn token(&self) -> Option<&str> {
        match self {
            FormatError::MalformedToken { token, .. }
            | FormatError::InvalidRepetition { token, .. } => Some(token),
            FormatError::UnbalancedParentheses { .. } | FormatError::InvalidConstraints { .. } => {
                None
            }
        }
    }
}

/// An invalid grid specification (out-of-range or conflicting group members,
/// bad track indices).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("{axis} group references index {index}, but there are {count} {axis}s")]
    GroupIndexOutOfRange { axis: Axis, index: usize, count: usize },

    #[error("{axis} {index} is listed more than once in the {axis} groups")]
    DuplicateGroupMember { axis: Axis, index: usize },

    #[error("Empty {axis} group")]
    EmptyGroup { axis: Axis },

    #[error("{axis} index {index} is out of range 1..={max}")]
    TrackIndexOutOfRange { axis: Axis, index: usize, max: usize },

    #[error("A {axis} spec was supplied where a {expected} spec is required")]
    AxisMismatch { axis: Axis, expected: Axis },

    #[error("The grid has no columns")]
    NoColumns,
}

/// Errors raised while solving or placing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Child {child} starts at {axis} {start} with span {span}, but the grid has {count} {axis}s")]
    IndexOutOfRange {
        child: usize,
        axis: Axis,
        start: usize,
        span: usize,
        count: usize,
    },

    #[error("Child {child} has a zero {axis} index or span")]
    ZeroIndex { child: usize, axis: Axis },

    #[error("Invalid grid specification: {0}")]
    InvalidSpec(#[from] SpecError),

    #[error("The container's layout is not a FormLayout")]
    Precondition,

    #[error("No cell constraints registered for child {child}")]
    MissingConstraints { child: ChildId },
}
