//! A cursor-based builder that fills a [`FormLayout`] line by line.
//!
//! The builder only appends tracks and assigns constraints; children are
//! created by the host and passed in by id. Rows are added on demand: a
//! gap row before every new line and a `pref` row for the components.

use tracing::trace;

use formgrid_core::{
    Alignment, CellConstraints, ChildId, Insets, Size, SpecError, TrackSpec, UnitConverter,
};

use crate::factory::FormFactory;
use crate::layout::FormLayout;

/// Settings of a [`FormBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderOptions {
    /// Row inserted between two lines
    pub line_gap: TrackSpec,
    /// Row inserted before a separator
    pub paragraph_gap: TrackSpec,
    /// Columns skipped at the start of every line
    pub leading_column_offset: usize,
    /// Put every component row into one row group
    pub row_grouping: bool,
    /// Border in dialog units applied by [`FormBuilder::set_default_dialog_border`]
    pub dialog_border: f64,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            line_gap: FormFactory::line_gap_row(),
            paragraph_gap: FormFactory::paragraph_gap_row(),
            leading_column_offset: 0,
            row_grouping: false,
            dialog_border: 14.0,
        }
    }
}

/// Appends children to a form left to right, top to bottom.
///
/// ```ignore
/// let mut layout = FormLayout::parse("right:pref, 3dlu, pref:grow", "")?;
/// let mut builder = FormBuilder::new(&mut layout);
/// builder.append_separator(general)?;
/// builder.append_labeled(name_label, name_field)?;
/// builder.append_labeled(age_label, age_field)?;
/// ```
#[derive(Debug)]
pub struct FormBuilder<'a> {
    layout: &'a mut FormLayout,
    options: BuilderOptions,
    column: usize,
    row: usize,
}

impl<'a> FormBuilder<'a> {
    pub fn new(layout: &'a mut FormLayout) -> Self {
        Self::with_options(layout, BuilderOptions::default())
    }

    pub fn with_options(layout: &'a mut FormLayout, options: BuilderOptions) -> Self {
        let mut builder = Self {
            layout,
            options,
            column: 1,
            row: 1,
        };
        builder.column = builder.leading_column();
        builder
    }

    pub fn layout(&self) -> &FormLayout {
        self.layout
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Cursor column, 1-based.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Cursor row, 1-based.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The column every line starts in.
    pub fn leading_column(&self) -> usize {
        1 + self.options.leading_column_offset
    }

    pub fn set_line_gap_size(&mut self, size: Size) {
        self.options.line_gap = FormFactory::gap_row(size);
    }

    pub fn set_paragraph_gap_size(&mut self, size: Size) {
        self.options.paragraph_gap = FormFactory::gap_row(size);
    }

    pub fn set_leading_column_offset(&mut self, offset: usize) {
        self.options.leading_column_offset = offset;
    }

    pub fn set_row_grouping_enabled(&mut self, enabled: bool) {
        self.options.row_grouping = enabled;
    }

    /// Surround the form with the dialog border on every edge.
    pub fn set_default_dialog_border(&mut self, converter: &dyn UnitConverter) {
        let vertical = converter.dialog_unit_y_as_pixel(self.options.dialog_border);
        let horizontal = converter.dialog_unit_x_as_pixel(self.options.dialog_border);
        self.layout
            .set_border(Insets::new(vertical, horizontal, vertical, horizontal));
    }

    /// Move the cursor `columns` to the right.
    pub fn next_column(&mut self, columns: usize) -> &mut Self {
        self.column += columns;
        self
    }

    /// Move the cursor to the leading column of the next row.
    pub fn next_line(&mut self) -> &mut Self {
        self.row += 1;
        self.column = self.leading_column();
        self
    }

    /// Place `child` in the cursor cell with explicit constraints, leaving
    /// the cursor where it is.
    pub fn add(&mut self, child: ChildId, constraints: CellConstraints) -> &mut Self {
        self.layout.set_constraints(child, constraints);
        self
    }

    /// Append `child` at the cursor and skip the gap column after it.
    pub fn append(&mut self, child: ChildId) -> Result<&mut Self, SpecError> {
        self.append_span(child, 1)
    }

    /// Append `child` spanning `span` columns.
    pub fn append_span(&mut self, child: ChildId, span: usize) -> Result<&mut Self, SpecError> {
        self.ensure_cursor_column_in_grid();
        let gap = self.options.line_gap.clone();
        self.ensure_gap_row(gap)?;
        self.ensure_component_row()?;

        let constraints = CellConstraints::xyw(self.column, self.row, span);
        self.add(child, constraints);
        Ok(self.next_column(span + 1))
    }

    /// Append a label and the component it describes.
    pub fn append_labeled(&mut self, label: ChildId, component: ChildId) -> Result<&mut Self, SpecError> {
        self.append_labeled_span(label, component, 1)
    }

    /// Append a label and a component spanning `span` columns.
    pub fn append_labeled_span(
        &mut self,
        label: ChildId,
        component: ChildId,
        span: usize,
    ) -> Result<&mut Self, SpecError> {
        self.append(label)?;
        self.append_span(component, span)
    }

    /// Append a title label.
    pub fn append_title(&mut self, title: ChildId) -> Result<&mut Self, SpecError> {
        self.append(title)
    }

    /// Start a paragraph with `separator` spanning every column from the
    /// leading column. The separator fills its cells horizontally.
    pub fn append_separator(&mut self, separator: ChildId) -> Result<&mut Self, SpecError> {
        self.ensure_cursor_column_in_grid();
        let gap = self.options.paragraph_gap.clone();
        self.ensure_gap_row(gap)?;
        self.ensure_component_row()?;

        self.column = self.leading_column();
        let span = (self.layout.column_count() + 1)
            .saturating_sub(self.column)
            .max(1);
        let mut constraints = CellConstraints::xyw(self.column, self.row, span);
        constraints.horizontal = Some(Alignment::Fill);
        self.add(separator, constraints);
        Ok(self.next_column(span))
    }

    fn ensure_cursor_column_in_grid(&mut self) {
        if self.column > self.layout.column_count() {
            self.next_line();
        }
    }

    fn ensure_gap_row(&mut self, gap: TrackSpec) -> Result<(), SpecError> {
        if self.row == 1 || self.row <= self.layout.row_count() {
            return Ok(());
        }
        trace!(row = self.row, gap = %gap, "appending gap row");
        self.layout.append_row(gap)?;
        self.next_line();
        Ok(())
    }

    fn ensure_component_row(&mut self) -> Result<(), SpecError> {
        if self.row <= self.layout.row_count() {
            return Ok(());
        }
        self.layout.append_row(FormFactory::pref_row())?;
        if self.options.row_grouping {
            self.layout.add_grouped_row(self.row)?;
        }
        Ok(())
    }
}
