//! Text dumps and overlay geometry for inspecting a form.
//!
//! Nothing here mutates a layout. Children are described through
//! [`IntrinsicSize::describe`].

use std::fmt::Write;

use glam::IVec2;

use formgrid_core::{ChildId, LayoutError, TrackGroup, TrackSpec, UnitConverter};

use crate::layout::{Container, FormLayout};
use crate::placement::LayoutInfo;
use crate::solver::IntrinsicSize;

/// `COLUMN SPECS:` followed by the short form of every column.
pub fn dump_column_specs(layout: &FormLayout) -> String {
    format!("COLUMN SPECS:{}", join_specs(layout.grid().columns()))
}

/// `ROW SPECS:` followed by the short form of every row.
pub fn dump_row_specs(layout: &FormLayout) -> String {
    format!("ROW SPECS:   {}", join_specs(layout.grid().rows()))
}

pub fn dump_column_groups(layout: &FormLayout) -> String {
    format!("COLUMN GROUPS: {}", format_groups(layout.grid().column_groups()))
}

pub fn dump_row_groups(layout: &FormLayout) -> String {
    format!("ROW GROUPS:    {}", format_groups(layout.grid().row_groups()))
}

/// One line per child: its constraints and, when offered, its description.
pub fn dump_constraints(layout: &FormLayout, children: &[(ChildId, &dyn IntrinsicSize)]) -> String {
    let mut out = String::from("COMPONENT CONSTRAINTS\n");
    for (id, child) in children {
        let constraints = layout
            .constraints(*id)
            .map_or_else(|| "no constraints".to_string(), ToString::to_string);
        let _ = write!(out, "{}; {}", constraints, id);
        if let Some(text) = child.describe() {
            let _ = write!(out, "      {:?}", text);
        }
        out.push('\n');
    }
    out
}

/// The column and row origins.
pub fn dump_grid_bounds(info: &LayoutInfo) -> String {
    let line = |origins: &[i32]| {
        origins
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "GRID BOUNDS\nCOLUMN ORIGINS: {}\nROW ORIGINS:    {}",
        line(info.column_origins()),
        line(info.row_origins())
    )
}

/// Everything above for `container`.
///
/// Fails with [`LayoutError::Precondition`] when the container does not use
/// a [`FormLayout`].
pub fn dump_all(container: &dyn Container, converter: &dyn UnitConverter) -> Result<String, LayoutError> {
    let layout = container.form_layout().ok_or(LayoutError::Precondition)?;
    let children = container.children();
    let info = layout.layout_info(&children, container.bounds(), converter)?;

    Ok([
        dump_column_specs(layout),
        dump_row_specs(layout),
        String::new(),
        dump_column_groups(layout),
        dump_row_groups(layout),
        String::new(),
        dump_constraints(layout, &children),
        dump_grid_bounds(&info),
    ]
    .join("\n"))
}

/// A line segment of the grid overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: IVec2,
    pub end: IVec2,
}

impl Segment {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        Self { start, end }
    }
}

/// The lines a painter draws over a form: one vertical line per column
/// origin, one horizontal line per row origin and, optionally, both
/// diagonals of the grid.
pub fn grid_overlay(info: &LayoutInfo, diagonals: bool) -> Vec<Segment> {
    let bounds = info.bounds();
    let (left, top) = (bounds.x, bounds.y);
    let (right, bottom) = (bounds.right(), bounds.bottom());

    let mut lines: Vec<Segment> = info
        .column_origins()
        .iter()
        .map(|&x| Segment::new(IVec2::new(x, top), IVec2::new(x, bottom)))
        .chain(
            info.row_origins()
                .iter()
                .map(|&y| Segment::new(IVec2::new(left, y), IVec2::new(right, y))),
        )
        .collect();

    if diagonals {
        lines.push(Segment::new(IVec2::new(left, top), IVec2::new(right, bottom)));
        lines.push(Segment::new(IVec2::new(left, bottom), IVec2::new(right, top)));
    }
    lines
}

fn join_specs(specs: &[TrackSpec]) -> String {
    specs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_groups(groups: &[TrackGroup]) -> String {
    if groups.is_empty() {
        return "{}".to_string();
    }
    let inner = groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {} }}", inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use formgrid_core::{CellConstraints, DefaultUnitConverter, Dimension};

    struct Label {
        text: &'static str,
        size: Dimension,
    }

    impl IntrinsicSize for Label {
        fn minimum_size(&self) -> Dimension {
            self.size
        }

        fn preferred_size(&self) -> Dimension {
            self.size
        }

        fn describe(&self) -> Option<String> {
            Some(self.text.to_string())
        }
    }

    struct Panel {
        layout: FormLayout,
        label: Label,
        field: Dimension,
    }

    impl Container for Panel {
        fn bounds(&self) -> Rectangle {
            Rectangle::new(0, 0, 120, 20)
        }

        fn children(&self) -> Vec<(ChildId, &dyn IntrinsicSize)> {
            vec![
                (ChildId(1), &self.label as &dyn IntrinsicSize),
                (ChildId(2), &self.field as &dyn IntrinsicSize),
            ]
        }

        fn form_layout(&self) -> Option<&FormLayout> {
            Some(&self.layout)
        }
    }

    fn panel() -> Panel {
        let mut layout = FormLayout::parse("right:pref, 3dlu, pref:grow", "pref").unwrap();
        layout.set_column_groups(vec![TrackGroup::from([1, 3])]).unwrap();
        layout.set_constraints(ChildId(1), CellConstraints::xy(1, 1));
        layout.set_constraints(ChildId(2), CellConstraints::xy(3, 1));
        Panel {
            layout,
            label: Label {
                text: "Name",
                size: Dimension::new(30, 14),
            },
            field: Dimension::new(40, 20),
        }
    }

    #[test]
    fn test_dump_specs_show_concrete_defaults() {
        let panel = panel();
        assert_eq!(
            dump_column_specs(&panel.layout),
            "COLUMN SPECS:right:pref:0, fill:3dlu:0, fill:pref:1"
        );
        assert_eq!(dump_row_specs(&panel.layout), "ROW SPECS:   center:pref:0");
    }

    #[test]
    fn test_dump_groups() {
        let panel = panel();
        assert_eq!(dump_column_groups(&panel.layout), "COLUMN GROUPS: { {1, 3} }");
        assert_eq!(dump_row_groups(&panel.layout), "ROW GROUPS:    {}");
    }

    #[test]
    fn test_dump_all() {
        let panel = panel();
        let converter = DefaultUnitConverter::default();
        let dump = dump_all(&panel, &converter).unwrap();
        insta::assert_snapshot!(dump, @r###"
        COLUMN SPECS:right:pref:0, fill:3dlu:0, fill:pref:1
        ROW SPECS:   center:pref:0

        COLUMN GROUPS: { {1, 3} }
        ROW GROUPS:    {}

        COMPONENT CONSTRAINTS
        1, 1, 1, 1, default, default; #1      "Name"
        3, 1, 1, 1, default, default; #2

        GRID BOUNDS
        COLUMN ORIGINS: 0 57 63 120
        ROW ORIGINS:    0 20
        "###);
    }

    #[test]
    fn test_overlay() {
        let info = LayoutInfo::from_sizes(&[10, 20], &[5]);
        let lines = grid_overlay(&info, true);
        assert_eq!(lines.len(), 3 + 2 + 2);
        assert_eq!(lines[1], Segment::new(IVec2::new(10, 0), IVec2::new(10, 5)));
        assert_eq!(lines[4], Segment::new(IVec2::new(0, 5), IVec2::new(30, 5)));
        assert_eq!(lines[6], Segment::new(IVec2::new(0, 5), IVec2::new(30, 0)));
        assert_eq!(grid_overlay(&info, false).len(), 5);
    }
}
