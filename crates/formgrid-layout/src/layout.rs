//! The container-facing layout manager.

use std::cell::RefCell;

use indexmap::IndexMap;
use tracing::debug;

use formgrid_core::{
    Axis, CellConstraints, ChildId, Dimension, FormError, Insets, LayoutError, SpecError,
    TrackGroup, TrackSpec, UnitConverter,
};

use crate::geometry::Rectangle;
use crate::grid::GridSpec;
use crate::placement::{place, LayoutInfo};
use crate::solver::{Child, GridSolver, IntrinsicSize, TrackSizes};

/// A host container as seen by the layout.
pub trait Container {
    /// The client area children are laid out in.
    fn bounds(&self) -> Rectangle;

    /// The children, in z-order.
    fn children(&self) -> Vec<(ChildId, &dyn IntrinsicSize)>;

    /// The container's [`FormLayout`], if it uses one.
    fn form_layout(&self) -> Option<&FormLayout> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    grid: u64,
    constraints: u64,
    converter: u64,
    available: Dimension,
    children: Vec<ChildId>,
}

/// A grid spec plus the constraints of every child and a container border.
///
/// Solved origins are cached per available size and child set. Grid
/// mutations, constraint changes, converter changes and
/// [`invalidate`](Self::invalidate) all force a new solve.
#[derive(Debug, Clone, Default)]
pub struct FormLayout {
    grid: GridSpec,
    constraints: IndexMap<ChildId, CellConstraints>,
    border: Insets,
    generation: u64,
    cache: RefCell<Option<(CacheKey, LayoutInfo)>>,
}

impl FormLayout {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Parse column and row encodings.
    pub fn parse(columns: &str, rows: &str) -> Result<Self, FormError> {
        Ok(Self::new(GridSpec::parse(columns, rows)?))
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn column_spec(&self, index: usize) -> Option<&TrackSpec> {
        self.grid.column(index)
    }

    pub fn row_spec(&self, index: usize) -> Option<&TrackSpec> {
        self.grid.row(index)
    }

    pub fn append_column(&mut self, spec: TrackSpec) -> Result<(), SpecError> {
        self.grid.append_column(spec)
    }

    pub fn append_row(&mut self, spec: TrackSpec) -> Result<(), SpecError> {
        self.grid.append_row(spec)
    }

    pub fn insert_column(&mut self, index: usize, spec: TrackSpec) -> Result<(), SpecError> {
        self.grid.insert_column(index, spec)
    }

    pub fn insert_row(&mut self, index: usize, spec: TrackSpec) -> Result<(), SpecError> {
        self.grid.insert_row(index, spec)
    }

    pub fn remove_column(&mut self, index: usize) -> Result<TrackSpec, SpecError> {
        self.grid.remove_column(index)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<TrackSpec, SpecError> {
        self.grid.remove_row(index)
    }

    pub fn set_column_groups(&mut self, groups: Vec<TrackGroup>) -> Result<(), SpecError> {
        self.grid.set_column_groups(groups)
    }

    pub fn set_row_groups(&mut self, groups: Vec<TrackGroup>) -> Result<(), SpecError> {
        self.grid.set_row_groups(groups)
    }

    pub fn add_grouped_column(&mut self, index: usize) -> Result<(), SpecError> {
        self.grid.add_grouped_column(index)
    }

    pub fn add_grouped_row(&mut self, index: usize) -> Result<(), SpecError> {
        self.grid.add_grouped_row(index)
    }

    pub fn set_constraints(&mut self, child: ChildId, constraints: CellConstraints) {
        self.constraints.insert(child, constraints);
        self.generation += 1;
    }

    pub fn constraints(&self, child: ChildId) -> Option<&CellConstraints> {
        self.constraints.get(&child)
    }

    pub fn remove_constraints(&mut self, child: ChildId) -> Option<CellConstraints> {
        let removed = self.constraints.shift_remove(&child);
        if removed.is_some() {
            self.generation += 1;
        }
        removed
    }

    /// Every registered child and its constraints, in registration order.
    pub fn all_constraints(&self) -> impl Iterator<Item = (ChildId, &CellConstraints)> {
        self.constraints.iter().map(|(id, cc)| (*id, cc))
    }

    pub fn border(&self) -> Insets {
        self.border
    }

    /// Empty space kept between the container edge and the grid.
    pub fn set_border(&mut self, border: Insets) {
        if border != self.border {
            self.border = border;
            self.generation += 1;
        }
    }

    /// Drop cached results, e.g. after a child's intrinsic size changed.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.cache.get_mut().take();
        debug!("layout invalidated");
    }

    /// The origins of the most recent layout, relative to the grid, if the
    /// grid, the constraints and `converter` have not changed since.
    pub fn last_layout_info(&self, converter: &dyn UnitConverter) -> Option<LayoutInfo> {
        let cache = self.cache.borrow();
        let (key, info) = cache.as_ref()?;
        let current = key.grid == self.grid.generation()
            && key.constraints == self.generation
            && key.converter == converter.generation();
        current.then(|| info.clone())
    }

    /// Smallest size the grid fits in, border included.
    pub fn minimum_layout_size(
        &self,
        children: &[(ChildId, &dyn IntrinsicSize)],
        converter: &dyn UnitConverter,
    ) -> Result<Dimension, LayoutError> {
        self.layout_size(children, converter, |sizes| sizes.minimum_total())
    }

    /// Natural size of the grid, border included.
    pub fn preferred_layout_size(
        &self,
        children: &[(ChildId, &dyn IntrinsicSize)],
        converter: &dyn UnitConverter,
    ) -> Result<Dimension, LayoutError> {
        self.layout_size(children, converter, |sizes| sizes.preferred_total())
    }

    fn layout_size(
        &self,
        children: &[(ChildId, &dyn IntrinsicSize)],
        converter: &dyn UnitConverter,
        total: impl Fn(&TrackSizes) -> i32,
    ) -> Result<Dimension, LayoutError> {
        let children = self.solver_children(children)?;
        let solver = GridSolver::new(&self.grid, &children, converter);
        let width = total(&solver.track_sizes(Axis::Horizontal)?);
        let height = total(&solver.track_sizes(Axis::Vertical)?);
        Ok(Dimension::new(
            width.saturating_add(self.border.horizontal()),
            height.saturating_add(self.border.vertical()),
        ))
    }

    /// Solve the grid for a container occupying `bounds`.
    ///
    /// The returned origins are absolute, offset by the bounds' position and
    /// the border.
    pub fn layout_info(
        &self,
        children: &[(ChildId, &dyn IntrinsicSize)],
        bounds: Rectangle,
        converter: &dyn UnitConverter,
    ) -> Result<LayoutInfo, LayoutError> {
        let available = Dimension::new(
            bounds.width - self.border.horizontal(),
            bounds.height - self.border.vertical(),
        );
        let solver_children = self.solver_children(children)?;
        let solver = GridSolver::new(&self.grid, &solver_children, converter);
        solver.validate()?;

        let key = CacheKey {
            grid: self.grid.generation(),
            constraints: self.generation,
            converter: converter.generation(),
            available,
            children: children.iter().map(|&(id, _)| id).collect(),
        };

        let cached = self
            .cache
            .borrow()
            .as_ref()
            .filter(|(k, _)| *k == key)
            .map(|(_, info)| info.clone());
        let info = match cached {
            Some(info) => {
                debug!(?available, "layout cache hit");
                info
            }
            None => {
                debug!(?available, "layout cache miss");
                let info = solver.solve(Some(available.width), Some(available.height))?;
                *self.cache.borrow_mut() = Some((key, info.clone()));
                info
            }
        };

        Ok(info.translated(bounds.x + self.border.left, bounds.y + self.border.top))
    }

    /// Compute the bounds of every child.
    pub fn layout(
        &self,
        children: &[(ChildId, &dyn IntrinsicSize)],
        bounds: Rectangle,
        converter: &dyn UnitConverter,
    ) -> Result<Vec<(ChildId, Rectangle)>, LayoutError> {
        let info = self.layout_info(children, bounds, converter)?;
        children
            .iter()
            .map(|&(id, size)| {
                let constraints = self.lookup(id)?;
                let rect = place(&info, constraints, self.grid.columns(), self.grid.rows(), size);
                Ok((id, rect))
            })
            .collect()
    }

    fn lookup(&self, child: ChildId) -> Result<&CellConstraints, LayoutError> {
        self.constraints
            .get(&child)
            .ok_or(LayoutError::MissingConstraints { child })
    }

    fn solver_children<'c>(
        &self,
        children: &[(ChildId, &'c dyn IntrinsicSize)],
    ) -> Result<Vec<Child<'c>>, LayoutError> {
        children
            .iter()
            .map(|&(id, size)| Ok(Child::new(*self.lookup(id)?, size)))
            .collect()
    }
}

/// Lay out `container` with its own [`FormLayout`].
///
/// Fails with [`LayoutError::Precondition`] when the container uses a
/// different layout.
pub fn layout_container(
    container: &dyn Container,
    converter: &dyn UnitConverter,
) -> Result<Vec<(ChildId, Rectangle)>, LayoutError> {
    let layout = container.form_layout().ok_or(LayoutError::Precondition)?;
    layout.layout(&container.children(), container.bounds(), converter)
}
