//! Core types, size model, and errors for the formgrid layout engine.
//!
//! This crate provides the foundational types used across all other formgrid crates:
//! - Units, dimensions, and insets
//! - The track size model (constant, component, and bounded sizes)
//! - Column/row track specifications and cell constraints
//! - Unit conversion to pixels
//! - Error types

pub mod constraints;
pub mod errors;
pub mod size;
pub mod track;
pub mod types;
pub mod units;

pub use constraints::*;
pub use errors::*;
pub use size::*;
pub use track::*;
pub use types::*;
pub use units::{DefaultUnitConverter, DialogBaseUnits, FontId, FontMetrics, FontUnitConverter, UnitConverter};
