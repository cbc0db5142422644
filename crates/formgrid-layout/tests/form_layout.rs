//! End-to-end: build a two-column property form and lay it out.

use formgrid_core::{ChildId, DefaultUnitConverter, Dimension, LayoutError, TrackGroup};
use formgrid_layout::{
    debug, layout_container, Container, FormBuilder, FormLayout, IntrinsicSize, Rectangle,
};

const COLUMNS: &str =
    "right:max(40dlu;pref), 3dlu, default:grow, 7dlu, right:max(40dlu;pref), 3dlu, default:grow(2)";

enum Widget {
    Label(&'static str),
    Field,
    Separator(&'static str),
}

impl IntrinsicSize for Widget {
    fn minimum_size(&self) -> Dimension {
        match self {
            Widget::Label(text) => Dimension::new(8 * text.len() as i32, 16),
            Widget::Field => Dimension::new(20, 20),
            Widget::Separator(_) => Dimension::new(10, 16),
        }
    }

    fn preferred_size(&self) -> Dimension {
        match self {
            Widget::Label(_) => self.minimum_size(),
            Widget::Field => Dimension::new(80, 20),
            Widget::Separator(_) => Dimension::new(100, 16),
        }
    }

    fn describe(&self) -> Option<String> {
        match self {
            Widget::Label(text) | Widget::Separator(text) => Some(text.to_string()),
            Widget::Field => None,
        }
    }
}

struct Panel {
    layout: Option<FormLayout>,
    bounds: Rectangle,
    widgets: Vec<(ChildId, Widget)>,
}

impl Panel {
    fn push(&mut self, widget: Widget) -> ChildId {
        let id = ChildId(self.widgets.len() as u64 + 1);
        self.widgets.push((id, widget));
        id
    }
}

impl Container for Panel {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn children(&self) -> Vec<(ChildId, &dyn IntrinsicSize)> {
        self.widgets
            .iter()
            .map(|(id, widget)| (*id, widget as &dyn IntrinsicSize))
            .collect()
    }

    fn form_layout(&self) -> Option<&FormLayout> {
        self.layout.as_ref()
    }
}

fn labeled(panel: &mut Panel, builder: &mut FormBuilder<'_>, text: &'static str) -> (ChildId, ChildId) {
    let label = panel.push(Widget::Label(text));
    let field = panel.push(Widget::Field);
    builder.append_labeled(label, field).unwrap();
    (label, field)
}

/// Returns the panel and the ids of a few children worth checking:
/// the first separator, the "Identifier" pair, the "Power" pair and the
/// "s" label.
fn flange_panel(converter: &DefaultUnitConverter) -> (Panel, [ChildId; 6]) {
    let mut panel = Panel {
        layout: None,
        bounds: Rectangle::new(0, 0, 600, 434),
        widgets: Vec::new(),
    };
    let mut layout = FormLayout::parse(COLUMNS, "").unwrap();
    layout.set_column_groups(vec![TrackGroup::from([3, 7])]).unwrap();

    let mut builder = FormBuilder::new(&mut layout);
    builder.set_default_dialog_border(converter);

    let flange = panel.push(Widget::Separator("Flange"));
    builder.append_separator(flange).unwrap();
    let (identifier, identifier_field) = labeled(&mut panel, &mut builder, "Identifier");
    builder.next_line();
    labeled(&mut panel, &mut builder, "PTI [kW]");
    let (power, power_field) = labeled(&mut panel, &mut builder, "Power [kW]");
    let (s, _) = labeled(&mut panel, &mut builder, "s [mm]");
    builder.next_line();

    let diameters = panel.push(Widget::Separator("Diameters"));
    builder.append_separator(diameters).unwrap();
    for text in ["da [mm]", "di [mm]", "da2 [mm]", "di2 [mm]", "R [mm]", "D [mm]"] {
        labeled(&mut panel, &mut builder, text);
    }

    let criteria = panel.push(Widget::Separator("Criteria"));
    builder.append_separator(criteria).unwrap();
    labeled(&mut panel, &mut builder, "Location");
    labeled(&mut panel, &mut builder, "k-factor");

    let bolts = panel.push(Widget::Separator("Bolts"));
    builder.append_separator(bolts).unwrap();
    labeled(&mut panel, &mut builder, "Material");
    builder.next_line();
    labeled(&mut panel, &mut builder, "Numbers");
    builder.next_line();
    labeled(&mut panel, &mut builder, "ds [mm]");

    panel.layout = Some(layout);
    (panel, [flange, identifier, identifier_field, power, power_field, s])
}

#[test]
fn test_builder_grows_rows_on_demand() {
    let converter = DefaultUnitConverter::default();
    let (panel, [flange, identifier, _, power, _, s]) = flange_panel(&converter);
    let layout = panel.layout.as_ref().unwrap();

    assert_eq!(layout.column_count(), 7);
    assert_eq!(layout.row_count(), 27);
    assert_eq!(layout.constraints(flange).map(|c| (c.column, c.row, c.column_span)), Some((1, 1, 7)));
    assert_eq!(layout.constraints(identifier).map(|c| (c.column, c.row)), Some((1, 3)));
    assert_eq!(layout.constraints(power).map(|c| (c.column, c.row)), Some((5, 5)));
    assert_eq!(layout.constraints(s).map(|c| (c.column, c.row)), Some((1, 7)));
    assert_eq!(layout.row_spec(8).unwrap().to_string(), "top:9dlu:0");
    assert_eq!(layout.row_spec(26).unwrap().to_string(), "top:3dlu:0");
}

#[test]
fn test_preferred_size_includes_dialog_border() {
    let converter = DefaultUnitConverter::default();
    let (panel, _) = flange_panel(&converter);
    let layout = panel.layout.as_ref().unwrap();
    let size = layout
        .preferred_layout_size(&panel.children(), &converter)
        .unwrap();
    assert_eq!(size, Dimension::new(402, 434));
}

#[test]
fn test_grouped_columns_share_surplus() {
    let converter = DefaultUnitConverter::default();
    let (panel, _) = flange_panel(&converter);
    let layout = panel.layout.as_ref().unwrap();
    let info = layout
        .layout_info(&panel.children(), panel.bounds(), &converter)
        .unwrap();

    assert_eq!(info.column_origins(), &[28, 108, 114, 293, 307, 387, 393, 572]);
    assert_eq!(info.row_origins()[..4], [28, 44, 50, 70]);
    assert_eq!(info.bounds(), Rectangle::new(28, 28, 544, 378));
}

#[test]
fn test_children_are_aligned_in_their_cells() {
    let converter = DefaultUnitConverter::default();
    let (panel, [flange, identifier, identifier_field, power, power_field, s]) = flange_panel(&converter);
    let placed = layout_container(&panel, &converter).unwrap();
    let bounds_of = |id| placed.iter().find(|(child, _)| *child == id).map(|(_, r)| *r);

    assert_eq!(placed.len(), panel.widgets.len());
    assert_eq!(bounds_of(flange), Some(Rectangle::new(28, 28, 544, 16)));
    assert_eq!(bounds_of(identifier), Some(Rectangle::new(28, 52, 80, 16)));
    assert_eq!(bounds_of(identifier_field), Some(Rectangle::new(114, 50, 179, 20)));
    assert_eq!(bounds_of(power), Some(Rectangle::new(307, 78, 80, 16)));
    assert_eq!(bounds_of(power_field), Some(Rectangle::new(393, 76, 179, 20)));
    assert_eq!(bounds_of(s), Some(Rectangle::new(60, 104, 48, 16)));
}

#[test]
fn test_dump_lists_every_child() {
    let converter = DefaultUnitConverter::default();
    let (panel, _) = flange_panel(&converter);
    let dump = debug::dump_all(&panel, &converter).unwrap();

    assert!(dump.starts_with("COLUMN SPECS:right:max(40dlu;pref):0, fill:3dlu:0, fill:default:1"));
    assert!(dump.contains("COLUMN GROUPS: { {3, 7} }"));
    assert!(dump.contains("1, 1, 7, 1, fill, default; #1      \"Flange\""));
    assert!(dump.contains("COLUMN ORIGINS: 28 108 114 293 307 387 393 572"));
}

#[test]
fn test_container_without_form_layout_is_rejected() {
    let converter = DefaultUnitConverter::default();
    let (mut panel, _) = flange_panel(&converter);
    panel.layout = None;
    assert!(matches!(
        layout_container(&panel, &converter),
        Err(LayoutError::Precondition)
    ));
    assert!(matches!(
        debug::dump_all(&panel, &converter),
        Err(LayoutError::Precondition)
    ));
}
