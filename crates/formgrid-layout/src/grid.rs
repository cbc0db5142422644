//! The grid specification: ordered column and row tracks plus their groups.

use formgrid_core::{Axis, FormError, SpecError, TrackGroup, TrackSpec};
use formgrid_parser::{parse_column_specs, parse_row_specs};

/// Column and row tracks of a form, with the groups of tracks that share a
/// resolved size.
///
/// Every mutation bumps [`generation`](GridSpec::generation), which layout
/// caches use as part of their key. Cell constraints are not checked here;
/// a dangling reference only fails once the grid is solved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSpec {
    columns: Vec<TrackSpec>,
    rows: Vec<TrackSpec>,
    column_groups: Vec<TrackGroup>,
    row_groups: Vec<TrackGroup>,
    generation: u64,
}

impl GridSpec {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// A grid with the given tracks and no groups.
    pub fn with_tracks(columns: Vec<TrackSpec>, rows: Vec<TrackSpec>) -> Result<Self, SpecError> {
        for spec in &columns {
            expect_axis(spec, Axis::Horizontal)?;
        }
        for spec in &rows {
            expect_axis(spec, Axis::Vertical)?;
        }
        Ok(Self {
            columns,
            rows,
            ..Self::default()
        })
    }

    /// Parse column and row encodings into a fresh grid.
    pub fn parse(columns: &str, rows: &str) -> Result<Self, FormError> {
        let columns = parse_column_specs(columns)?;
        let rows = parse_row_specs(rows)?;
        Ok(Self::with_tracks(columns, rows)?)
    }

    pub fn columns(&self) -> &[TrackSpec] {
        &self.columns
    }

    pub fn rows(&self) -> &[TrackSpec] {
        &self.rows
    }

    /// Tracks along `axis`.
    pub fn tracks(&self, axis: Axis) -> &[TrackSpec] {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The column at 1-based `index`.
    pub fn column(&self, index: usize) -> Option<&TrackSpec> {
        index.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    /// The row at 1-based `index`.
    pub fn row(&self, index: usize) -> Option<&TrackSpec> {
        index.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn column_groups(&self) -> &[TrackGroup] {
        &self.column_groups
    }

    pub fn row_groups(&self) -> &[TrackGroup] {
        &self.row_groups
    }

    /// Groups along `axis`.
    pub fn groups(&self, axis: Axis) -> &[TrackGroup] {
        match axis {
            Axis::Horizontal => &self.column_groups,
            Axis::Vertical => &self.row_groups,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn append_column(&mut self, spec: TrackSpec) -> Result<(), SpecError> {
        let index = self.columns.len() + 1;
        self.insert(Axis::Horizontal, index, spec)
    }

    pub fn append_row(&mut self, spec: TrackSpec) -> Result<(), SpecError> {
        let index = self.rows.len() + 1;
        self.insert(Axis::Vertical, index, spec)
    }

    /// Insert a column before 1-based `index`; `column_count() + 1`
    /// appends.
    pub fn insert_column(&mut self, index: usize, spec: TrackSpec) -> Result<(), SpecError> {
        self.insert(Axis::Horizontal, index, spec)
    }

    /// Insert a row before 1-based `index`; `row_count() + 1` appends.
    pub fn insert_row(&mut self, index: usize, spec: TrackSpec) -> Result<(), SpecError> {
        self.insert(Axis::Vertical, index, spec)
    }

    pub fn remove_column(&mut self, index: usize) -> Result<TrackSpec, SpecError> {
        self.remove(Axis::Horizontal, index)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<TrackSpec, SpecError> {
        self.remove(Axis::Vertical, index)
    }

    /// Replace all column groups.
    pub fn set_column_groups(&mut self, groups: Vec<TrackGroup>) -> Result<(), SpecError> {
        self.set_groups(Axis::Horizontal, groups)
    }

    /// Replace all row groups.
    pub fn set_row_groups(&mut self, groups: Vec<TrackGroup>) -> Result<(), SpecError> {
        self.set_groups(Axis::Vertical, groups)
    }

    /// Replace all groups along `axis`.
    ///
    /// Rejects empty groups, indices outside the track list and tracks
    /// listed more than once. On error the current groups are kept.
    pub fn set_groups(&mut self, axis: Axis, groups: Vec<TrackGroup>) -> Result<(), SpecError> {
        let count = self.tracks(axis).len();
        let mut seen = vec![false; count];
        for group in &groups {
            if group.is_empty() {
                return Err(SpecError::EmptyGroup { axis });
            }
            for &index in group.members() {
                if index == 0 || index > count {
                    return Err(SpecError::GroupIndexOutOfRange { axis, index, count });
                }
                if std::mem::replace(&mut seen[index - 1], true) {
                    return Err(SpecError::DuplicateGroupMember { axis, index });
                }
            }
        }
        *self.groups_mut(axis) = groups;
        self.generation += 1;
        Ok(())
    }

    /// Add the column at `index` to the last column group, starting a group
    /// when there is none.
    pub fn add_grouped_column(&mut self, index: usize) -> Result<(), SpecError> {
        self.add_grouped(Axis::Horizontal, index)
    }

    /// Add the row at `index` to the last row group, starting a group when
    /// there is none.
    pub fn add_grouped_row(&mut self, index: usize) -> Result<(), SpecError> {
        self.add_grouped(Axis::Vertical, index)
    }

    fn add_grouped(&mut self, axis: Axis, index: usize) -> Result<(), SpecError> {
        let mut groups = self.groups(axis).to_vec();
        match groups.last_mut() {
            Some(last) => last.0.push(index),
            None => groups.push(TrackGroup::new([index])),
        }
        self.set_groups(axis, groups)
    }

    fn insert(&mut self, axis: Axis, index: usize, spec: TrackSpec) -> Result<(), SpecError> {
        expect_axis(&spec, axis)?;
        let max = self.tracks(axis).len() + 1;
        if index == 0 || index > max {
            return Err(SpecError::TrackIndexOutOfRange { axis, index, max });
        }

        self.tracks_mut(axis).insert(index - 1, spec);
        for group in self.groups_mut(axis) {
            for member in group.0.iter_mut() {
                if *member >= index {
                    *member += 1;
                }
            }
        }
        self.generation += 1;
        Ok(())
    }

    fn remove(&mut self, axis: Axis, index: usize) -> Result<TrackSpec, SpecError> {
        let max = self.tracks(axis).len();
        if index == 0 || index > max {
            return Err(SpecError::TrackIndexOutOfRange { axis, index, max });
        }

        let spec = self.tracks_mut(axis).remove(index - 1);
        let groups = self.groups_mut(axis);
        for group in groups.iter_mut() {
            group.0.retain(|member| *member != index);
            for member in group.0.iter_mut() {
                if *member > index {
                    *member -= 1;
                }
            }
        }
        groups.retain(|group| !group.is_empty());
        self.generation += 1;
        Ok(spec)
    }

    fn tracks_mut(&mut self, axis: Axis) -> &mut Vec<TrackSpec> {
        match axis {
            Axis::Horizontal => &mut self.columns,
            Axis::Vertical => &mut self.rows,
        }
    }

    fn groups_mut(&mut self, axis: Axis) -> &mut Vec<TrackGroup> {
        match axis {
            Axis::Horizontal => &mut self.column_groups,
            Axis::Vertical => &mut self.row_groups,
        }
    }
}

fn expect_axis(spec: &TrackSpec, expected: Axis) -> Result<(), SpecError> {
    if spec.axis() == expected {
        Ok(())
    } else {
        Err(SpecError::AxisMismatch {
            axis: spec.axis(),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgrid_core::{Alignment, FormatError, Size};

    fn grid() -> GridSpec {
        GridSpec::parse("pref, 3dlu, pref:grow, 3dlu, pref", "p, 3dlu, p").unwrap()
    }

    #[test]
    fn test_parse() {
        let grid = grid();
        assert_eq!(grid.column_count(), 5);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column(3).unwrap().grow(), 1.0);
        assert!(grid.column(0).is_none());
        assert!(grid.row(4).is_none());
    }

    #[test]
    fn test_parse_failure_reports_token() {
        let err = GridSpec::parse("pref, bogus:::", "").unwrap_err();
        match err {
            FormError::Format(e @ FormatError::MalformedToken { .. }) => {
                assert_eq!(e.token(), Some("bogus:::"))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_append_and_generation() {
        let mut grid = grid();
        let before = grid.generation();
        grid.append_row(TrackSpec::sized(Axis::Vertical, Size::PREFERRED)).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert!(grid.generation() > before);
    }

    #[test]
    fn test_axis_mismatch_is_rejected() {
        let mut grid = grid();
        let err = grid
            .append_column(TrackSpec::row(Alignment::Fill, Size::PREFERRED, 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            SpecError::AxisMismatch {
                axis: Axis::Vertical,
                expected: Axis::Horizontal
            }
        );
    }

    #[test]
    fn test_groups_validated() {
        let mut grid = grid();
        grid.set_column_groups(vec![TrackGroup::from([1, 5])]).unwrap();
        assert_eq!(grid.column_groups(), &[TrackGroup::from([1, 5])]);

        assert_eq!(
            grid.set_column_groups(vec![TrackGroup::from([1, 6])]),
            Err(SpecError::GroupIndexOutOfRange {
                axis: Axis::Horizontal,
                index: 6,
                count: 5
            })
        );
        assert_eq!(
            grid.set_column_groups(vec![TrackGroup::from([1, 3]), TrackGroup::from([3, 5])]),
            Err(SpecError::DuplicateGroupMember {
                axis: Axis::Horizontal,
                index: 3
            })
        );
        assert_eq!(
            grid.set_row_groups(vec![TrackGroup::default()]),
            Err(SpecError::EmptyGroup { axis: Axis::Vertical })
        );
        // Failed updates keep the previous groups.
        assert_eq!(grid.column_groups(), &[TrackGroup::from([1, 5])]);
    }

    #[test]
    fn test_insert_shifts_groups() {
        let mut grid = grid();
        grid.set_column_groups(vec![TrackGroup::from([1, 3])]).unwrap();
        grid.insert_column(2, TrackSpec::sized(Axis::Horizontal, Size::px(5.0)))
            .unwrap();
        assert_eq!(grid.column_count(), 6);
        assert_eq!(grid.column(2).unwrap().size(), &Size::px(5.0));
        assert_eq!(grid.column_groups(), &[TrackGroup::from([1, 4])]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut grid = grid();
        let spec = TrackSpec::sized(Axis::Vertical, Size::PREFERRED);
        assert!(grid.insert_row(0, spec.clone()).is_err());
        assert!(grid.insert_row(5, spec.clone()).is_err());
        assert!(grid.insert_row(4, spec).is_ok());
    }

    #[test]
    fn test_remove_drops_member_and_shifts() {
        let mut grid = grid();
        grid.set_column_groups(vec![TrackGroup::from([1, 3, 5]), TrackGroup::from([2])])
            .unwrap();
        let removed = grid.remove_column(3).unwrap();
        assert_eq!(removed.grow(), 1.0);
        assert_eq!(grid.column_groups(), &[TrackGroup::from([1, 4]), TrackGroup::from([2])]);

        grid.remove_column(2).unwrap();
        assert_eq!(grid.column_groups(), &[TrackGroup::from([1, 3])]);
        assert!(grid.remove_column(9).is_err());
    }

    #[test]
    fn test_add_grouped_row() {
        let mut grid = grid();
        grid.add_grouped_row(1).unwrap();
        grid.add_grouped_row(3).unwrap();
        assert_eq!(grid.row_groups(), &[TrackGroup::from([1, 3])]);
        assert!(grid.add_grouped_row(3).is_err());
    }
}
