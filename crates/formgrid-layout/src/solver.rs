//! The grid solver.
//!
//! Resolving one axis runs in five passes:
//!
//! 1. **Track sizes**: each track's minimum and preferred size from its own
//!    size policy, measured against the children that sit in that track
//!    alone.
//! 2. **Spans**: children covering several tracks grow those tracks when the
//!    tracks are too small for them, minimum sizes first, then preferred.
//! 3. **Groups**: grouped tracks take the largest size among their members.
//! 4. **Distribution**: surplus space goes to growing tracks by weight; a
//!    deficit shrinks tracks toward their minimum by slack.
//! 5. **Origins**: prefix sums of the final sizes.

use tracing::{debug, trace};

use formgrid_core::{
    Axis, CellConstraints, Dimension, LayoutError, Measure, SizeContext, SpecError, TrackSpec, Unit,
    UnitConverter,
};

use crate::distribute::{settle, spread, units};
use crate::grid::GridSpec;
use crate::placement::LayoutInfo;

/// Intrinsic sizes reported by the host toolkit for one child.
pub trait IntrinsicSize {
    fn minimum_size(&self) -> Dimension;

    fn preferred_size(&self) -> Dimension;

    /// Upper limit for aligned (non-fill) placement.
    fn maximum_size(&self) -> Option<Dimension> {
        None
    }

    /// Short human-readable text used by diagnostic dumps.
    fn describe(&self) -> Option<String> {
        None
    }
}

impl IntrinsicSize for Dimension {
    fn minimum_size(&self) -> Dimension {
        *self
    }

    fn preferred_size(&self) -> Dimension {
        *self
    }
}

/// A child as seen by the solver.
#[derive(Clone, Copy)]
pub struct Child<'a> {
    pub constraints: CellConstraints,
    pub size: &'a dyn IntrinsicSize,
}

impl<'a> Child<'a> {
    pub fn new(constraints: CellConstraints, size: &'a dyn IntrinsicSize) -> Self {
        Self { constraints, size }
    }

    /// Size the child needs along `axis`, insets included.
    fn required(&self, measure: Measure, axis: Axis) -> i32 {
        let size = match measure {
            Measure::Minimum => self.size.minimum_size(),
            Measure::Preferred => self.size.preferred_size(),
        };
        let (leading, trailing) = self.constraints.insets.along(axis);
        size.along(axis).saturating_add(leading).saturating_add(trailing)
    }
}

impl std::fmt::Debug for Child<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Child")
            .field("constraints", &self.constraints)
            .field("preferred", &self.size.preferred_size())
            .finish()
    }
}

/// Minimum and preferred size of every track on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackSizes {
    pub minimum: Vec<i32>,
    pub preferred: Vec<i32>,
}

impl TrackSizes {
    pub fn minimum_total(&self) -> i32 {
        total(&self.minimum)
    }

    pub fn preferred_total(&self) -> i32 {
        total(&self.preferred)
    }
}

/// Sum of track sizes, saturating at `i32::MAX`.
fn total(sizes: &[i32]) -> i32 {
    sizes.iter().fold(0, |sum, &size| sum.saturating_add(size))
}

/// The track sizes after each of the first three passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passes {
    pub measured: TrackSizes,
    pub spanned: TrackSizes,
    pub grouped: TrackSizes,
}

/// Resolves a [`GridSpec`] against a set of children.
pub struct GridSolver<'a> {
    grid: &'a GridSpec,
    children: &'a [Child<'a>],
    converter: &'a dyn UnitConverter,
}

impl<'a> GridSolver<'a> {
    pub fn new(grid: &'a GridSpec, children: &'a [Child<'a>], converter: &'a dyn UnitConverter) -> Self {
        Self {
            grid,
            children,
            converter,
        }
    }

    /// Check the grid and every child's constraints.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid.column_count() == 0 {
            return Err(SpecError::NoColumns.into());
        }
        for (axis, count) in [
            (Axis::Horizontal, self.grid.column_count()),
            (Axis::Vertical, self.grid.row_count()),
        ] {
            for group in self.grid.groups(axis) {
                if let Some(&index) = group.members().iter().find(|&&i| i == 0 || i > count) {
                    return Err(SpecError::GroupIndexOutOfRange { axis, index, count }.into());
                }
            }
        }
        for (i, child) in self.children.iter().enumerate() {
            child
                .constraints
                .check(self.grid.column_count(), self.grid.row_count(), i)?;
        }
        Ok(())
    }

    /// Minimum and preferred track sizes along `axis` after spans and
    /// groups, before any distribution.
    pub fn track_sizes(&self, axis: Axis) -> Result<TrackSizes, LayoutError> {
        Ok(self.passes(axis)?.grouped)
    }

    /// Track sizes after each sizing pass along `axis`.
    pub fn passes(&self, axis: Axis) -> Result<Passes, LayoutError> {
        self.validate()?;
        Ok(self.run_passes(axis))
    }

    /// Solve both axes. Without an available extent an axis takes its
    /// preferred size.
    pub fn solve(
        &self,
        available_width: Option<i32>,
        available_height: Option<i32>,
    ) -> Result<LayoutInfo, LayoutError> {
        debug!(
            columns = self.grid.column_count(),
            rows = self.grid.row_count(),
            children = self.children.len(),
            ?available_width,
            ?available_height,
            "solving grid"
        );
        self.validate()?;

        let column_sizes = self.solve_axis(Axis::Horizontal, available_width);
        let row_sizes = self.solve_axis(Axis::Vertical, available_height);
        let info = LayoutInfo::from_sizes(&column_sizes, &row_sizes);

        debug!(width = info.width(), height = info.height(), "solved grid");
        Ok(info)
    }

    fn solve_axis(&self, axis: Axis, available: Option<i32>) -> Vec<i32> {
        let sizes = self.run_passes(axis).grouped;
        let resolved = self.distribute(axis, &sizes, available);
        trace!(%axis, ?resolved, "distributed");
        resolved
    }

    fn run_passes(&self, axis: Axis) -> Passes {
        let measured = self.measure(axis);
        trace!(%axis, minimum = ?measured.minimum, preferred = ?measured.preferred, "measured tracks");

        let mut spanned = measured.clone();
        self.reconcile_spans(axis, &mut spanned);
        trace!(%axis, minimum = ?spanned.minimum, preferred = ?spanned.preferred, "reconciled spans");

        let mut grouped = spanned.clone();
        self.equalize_groups(axis, &mut grouped);
        trace!(%axis, minimum = ?grouped.minimum, preferred = ?grouped.preferred, "equalized groups");

        Passes {
            measured,
            spanned,
            grouped,
        }
    }

    /// Pass 1: every track measured in isolation.
    fn measure(&self, axis: Axis) -> TrackSizes {
        let tracks = self.grid.tracks(axis);
        let mut child_minimum = vec![0; tracks.len()];
        let mut child_preferred = vec![0; tracks.len()];

        for child in self.children {
            let (start, span) = child.constraints.extent(axis);
            if span != 1 {
                continue;
            }
            let i = start - 1;
            child_minimum[i] = child_minimum[i].max(child.required(Measure::Minimum, axis));
            child_preferred[i] = child_preferred[i].max(child.required(Measure::Preferred, axis));
        }

        let mut sizes = TrackSizes::default();
        for (i, spec) in tracks.iter().enumerate() {
            let context = TrackContext {
                converter: self.converter,
                axis,
                minimum: child_minimum[i],
                preferred: child_preferred[i],
            };
            let minimum = spec.size().resolve(Measure::Minimum, &context).max(0);
            let preferred = spec.size().resolve(Measure::Preferred, &context).max(minimum);
            sizes.minimum.push(minimum);
            sizes.preferred.push(preferred);
        }
        sizes
    }

    /// Pass 2: grow tracks under children that span several of them.
    fn reconcile_spans(&self, axis: Axis, sizes: &mut TrackSizes) {
        let tracks = self.grid.tracks(axis);
        let mut spanning: Vec<&Child<'_>> = self
            .children
            .iter()
            .filter(|c| c.constraints.extent(axis).1 > 1)
            .collect();
        spanning.sort_by_key(|c| c.constraints.extent(axis).1);

        for child in &spanning {
            grow_span(tracks, &mut sizes.minimum, child, Measure::Minimum, axis);
        }
        for (preferred, &minimum) in sizes.preferred.iter_mut().zip(&sizes.minimum) {
            *preferred = (*preferred).max(minimum);
        }
        for child in &spanning {
            grow_span(tracks, &mut sizes.preferred, child, Measure::Preferred, axis);
        }
    }

    /// Pass 3: grouped tracks take the largest size of their group.
    fn equalize_groups(&self, axis: Axis, sizes: &mut TrackSizes) {
        for group in self.grid.groups(axis) {
            let members = group.members();
            for values in [&mut sizes.minimum, &mut sizes.preferred] {
                let largest = members.iter().map(|&m| values[m - 1]).max().unwrap_or(0);
                for &m in members {
                    values[m - 1] = largest;
                }
            }
        }
    }

    /// Pass 4: fit the preferred sizes into `available`.
    fn distribute(&self, axis: Axis, sizes: &TrackSizes, available: Option<i32>) -> Vec<i32> {
        let Some(available) = available else {
            return sizes.preferred.clone();
        };
        let tracks = self.grid.tracks(axis);
        let groups = self.grid.groups(axis);
        let preferred_total = sizes.preferred_total();

        if available >= preferred_total {
            let mut resolved = sizes.preferred.clone();
            let growing = units(tracks.len(), groups, |i| tracks[i].grow());
            spread(&mut resolved, &growing, available - preferred_total, |_| i32::MAX);
            return resolved;
        }

        let slack: Vec<i32> = sizes
            .preferred
            .iter()
            .zip(&sizes.minimum)
            .map(|(p, m)| p - m)
            .collect();
        let deficit = preferred_total.saturating_sub(available);
        let total_slack = total(&slack);

        if deficit >= total_slack {
            debug!(%axis, available, minimum = sizes.minimum_total(), "tracks floored at minimum");
            return sizes.minimum.clone();
        }

        let mut shrink = vec![0; tracks.len()];
        let shrinking = units(tracks.len(), groups, |i| f64::from(slack[i]));
        let carry = spread(&mut shrink, &shrinking, deficit, |i| slack[i]);
        let left = settle(&mut shrink, &shrinking, carry, |i| slack[i]);
        if left > 0 {
            debug!(%axis, available, left, "deficit not fully absorbed by grouped tracks");
        }
        sizes
            .preferred
            .iter()
            .zip(shrink)
            .map(|(p, s)| p - s)
            .collect()
    }
}

/// Distribute a spanning child's shortfall over the tracks it covers.
fn grow_span(tracks: &[TrackSpec], sizes: &mut [i32], child: &Child<'_>, measure: Measure, axis: Axis) {
    let (start, span) = child.constraints.extent(axis);
    let range = start - 1..start - 1 + span;
    let current = total(&sizes[range.clone()]);
    let required = child.required(measure, axis);
    if required <= current {
        return;
    }

    let spanned = &tracks[range.clone()];
    let weights: Vec<f64> = if spanned.iter().any(|t| t.grow() > 0.0) {
        spanned.iter().map(TrackSpec::grow).collect()
    } else {
        vec![1.0; span]
    };

    let shortfall = required - current;
    trace!(%axis, start, span, shortfall, ?measure, "growing spanned tracks");
    let single = units(span, &[], |i| weights[i]);
    spread(&mut sizes[range], &single, shortfall, |_| i32::MAX);
}

/// Resolves one track's size policy.
struct TrackContext<'a> {
    converter: &'a dyn UnitConverter,
    axis: Axis,
    minimum: i32,
    preferred: i32,
}

impl SizeContext for TrackContext<'_> {
    fn constant(&self, value: f64, unit: Unit) -> i32 {
        self.converter.to_pixels(value, unit, self.axis)
    }

    fn minimum(&self) -> i32 {
        self.minimum
    }

    fn preferred(&self) -> i32 {
        self.preferred
    }
}

/// Solve `grid` for `children` in one call.
pub fn solve(
    grid: &GridSpec,
    children: &[Child<'_>],
    converter: &dyn UnitConverter,
    available_width: Option<i32>,
    available_height: Option<i32>,
) -> Result<LayoutInfo, LayoutError> {
    GridSolver::new(grid, children, converter).solve(available_width, available_height)
}
