//! Frequently used track specs and ready-made button bar layouts.

use formgrid_core::{Alignment, Axis, CellConstraints, ChildId, Size, SpecError, TrackSpec};

use crate::layout::FormLayout;

/// Track specs for the standard gaps and component columns and rows.
pub struct FormFactory;

impl FormFactory {
    /// A non-growing gap column of `size`.
    pub fn gap_column(size: Size) -> TrackSpec {
        TrackSpec::column(Alignment::Leading, size, 0.0)
    }

    /// A non-growing gap row of `size`.
    pub fn gap_row(size: Size) -> TrackSpec {
        TrackSpec::row(Alignment::Leading, size, 0.0)
    }

    /// Between a label and its component.
    pub fn label_component_gap_column() -> TrackSpec {
        Self::gap_column(Size::dlu(3.0))
    }

    pub fn related_gap_column() -> TrackSpec {
        Self::gap_column(Size::dlu(4.0))
    }

    pub fn unrelated_gap_column() -> TrackSpec {
        Self::gap_column(Size::dlu(7.0))
    }

    pub fn related_gap_row() -> TrackSpec {
        Self::gap_row(Size::dlu(4.0))
    }

    pub fn unrelated_gap_row() -> TrackSpec {
        Self::gap_row(Size::dlu(7.0))
    }

    /// Between two lines of a form.
    pub fn line_gap_row() -> TrackSpec {
        Self::gap_row(Size::dlu(3.0))
    }

    pub fn narrow_line_gap_row() -> TrackSpec {
        Self::gap_row(Size::dlu(2.0))
    }

    /// Between two paragraphs of a form.
    pub fn paragraph_gap_row() -> TrackSpec {
        Self::gap_row(Size::dlu(9.0))
    }

    /// `max(50dlu;pref)`: buttons are at least 50dlu wide.
    pub fn button_column() -> TrackSpec {
        TrackSpec::column(Alignment::Fill, button_size(), 0.0)
    }

    /// `max(50dlu;pref):grow`
    pub fn growing_button_column() -> TrackSpec {
        TrackSpec::column(Alignment::Fill, button_size(), 1.0)
    }

    /// `0px:grow`: takes up the surplus.
    pub fn glue_column() -> TrackSpec {
        TrackSpec::column(Alignment::Fill, Size::px(0.0), 1.0)
    }

    pub fn pref_column() -> TrackSpec {
        TrackSpec::sized(Axis::Horizontal, Size::PREFERRED)
    }

    pub fn min_column() -> TrackSpec {
        TrackSpec::sized(Axis::Horizontal, Size::MINIMUM)
    }

    pub fn default_column() -> TrackSpec {
        TrackSpec::sized(Axis::Horizontal, Size::DEFAULT)
    }

    pub fn pref_row() -> TrackSpec {
        TrackSpec::sized(Axis::Vertical, Size::PREFERRED)
    }

    pub fn min_row() -> TrackSpec {
        TrackSpec::sized(Axis::Vertical, Size::MINIMUM)
    }

    pub fn default_row() -> TrackSpec {
        TrackSpec::sized(Axis::Vertical, Size::DEFAULT)
    }
}

fn button_size() -> Size {
    Size::at_least(Size::dlu(50.0), Size::PREFERRED)
}

/// Appends the columns of a single-row button bar left to right.
struct BarBuilder {
    layout: FormLayout,
}

impl BarBuilder {
    fn new() -> Result<Self, SpecError> {
        let mut layout = FormLayout::default();
        layout.append_row(FormFactory::pref_row())?;
        Ok(Self { layout })
    }

    fn column(&mut self, spec: TrackSpec) -> Result<usize, SpecError> {
        self.layout.append_column(spec)?;
        Ok(self.layout.column_count())
    }

    fn glue(&mut self) -> Result<&mut Self, SpecError> {
        self.column(FormFactory::glue_column())?;
        Ok(self)
    }

    fn related_gap(&mut self) -> Result<&mut Self, SpecError> {
        self.column(FormFactory::related_gap_column())?;
        Ok(self)
    }

    /// A button in a column shared by the bar's column group.
    fn gridded(&mut self, button: ChildId, spec: TrackSpec) -> Result<&mut Self, SpecError> {
        let column = self.column(spec)?;
        self.layout.add_grouped_column(column)?;
        self.layout.set_constraints(button, CellConstraints::xy(column, 1));
        Ok(self)
    }

    /// Gridded buttons separated by related gaps.
    fn gridded_buttons(&mut self, buttons: &[ChildId], spec: fn() -> TrackSpec) -> Result<&mut Self, SpecError> {
        for (i, &button) in buttons.iter().enumerate() {
            if i > 0 {
                self.related_gap()?;
            }
            self.gridded(button, spec())?;
        }
        Ok(self)
    }

    /// Place `button` on top of the last column.
    fn overlay(&mut self, button: ChildId) -> &mut Self {
        let column = self.layout.column_count();
        self.layout.set_constraints(button, CellConstraints::xy(column, 1));
        self
    }

    fn finish(self) -> FormLayout {
        self.layout
    }
}

/// Layouts for rows of buttons.
///
/// Each builder returns a [`FormLayout`] with one `center:pref` row and
/// constraints registered for every given child. Buttons sit in
/// `max(50dlu;pref)` columns that form one column group, so they all get the
/// width of the widest button.
pub struct ButtonBar;

impl ButtonBar {
    /// Buttons on the left, glue on the right.
    pub fn left_aligned(buttons: &[ChildId]) -> Result<FormLayout, SpecError> {
        let mut bar = BarBuilder::new()?;
        bar.gridded_buttons(buttons, FormFactory::button_column)?.glue()?;
        Ok(bar.finish())
    }

    /// Buttons centered between two glue columns.
    pub fn centered(buttons: &[ChildId]) -> Result<FormLayout, SpecError> {
        let mut bar = BarBuilder::new()?;
        bar.glue()?
            .gridded_buttons(buttons, FormFactory::button_column)?
            .glue()?;
        Ok(bar.finish())
    }

    /// Buttons on the right, glue on the left.
    pub fn right_aligned(buttons: &[ChildId]) -> Result<FormLayout, SpecError> {
        let mut bar = BarBuilder::new()?;
        bar.glue()?.gridded_buttons(buttons, FormFactory::button_column)?;
        Ok(bar.finish())
    }

    /// Buttons that share all available width.
    pub fn growing(buttons: &[ChildId]) -> Result<FormLayout, SpecError> {
        let mut bar = BarBuilder::new()?;
        bar.gridded_buttons(buttons, FormFactory::growing_button_column)?;
        Ok(bar.finish())
    }

    /// A help button on the left, the other buttons right aligned.
    pub fn help(help: ChildId, buttons: &[ChildId]) -> Result<FormLayout, SpecError> {
        let mut bar = BarBuilder::new()?;
        bar.gridded(help, FormFactory::button_column())?
            .related_gap()?
            .glue()?
            .gridded_buttons(buttons, FormFactory::button_column)?;
        Ok(bar.finish())
    }

    pub fn close(close: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[close])
    }

    pub fn ok(ok: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[ok])
    }

    pub fn ok_cancel(ok: ChildId, cancel: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[ok, cancel])
    }

    pub fn ok_cancel_apply(ok: ChildId, cancel: ChildId, apply: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[ok, cancel, apply])
    }

    pub fn help_close(help: ChildId, close: ChildId) -> Result<FormLayout, SpecError> {
        Self::help(help, &[close])
    }

    pub fn help_ok(help: ChildId, ok: ChildId) -> Result<FormLayout, SpecError> {
        Self::help(help, &[ok])
    }

    pub fn help_ok_cancel(help: ChildId, ok: ChildId, cancel: ChildId) -> Result<FormLayout, SpecError> {
        Self::help(help, &[ok, cancel])
    }

    pub fn help_ok_cancel_apply(
        help: ChildId,
        ok: ChildId,
        cancel: ChildId,
        apply: ChildId,
    ) -> Result<FormLayout, SpecError> {
        Self::help(help, &[ok, cancel, apply])
    }

    pub fn close_help(close: ChildId, help: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[close, help])
    }

    pub fn ok_help(ok: ChildId, help: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[ok, help])
    }

    pub fn ok_cancel_help(ok: ChildId, cancel: ChildId, help: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[ok, cancel, help])
    }

    pub fn ok_cancel_apply_help(
        ok: ChildId,
        cancel: ChildId,
        apply: ChildId,
        help: ChildId,
    ) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[ok, cancel, apply, help])
    }

    pub fn add_remove_left(add: ChildId, remove: ChildId) -> Result<FormLayout, SpecError> {
        Self::left_aligned(&[add, remove])
    }

    /// Add and remove buttons filling the whole width.
    pub fn add_remove(add: ChildId, remove: ChildId) -> Result<FormLayout, SpecError> {
        Self::growing(&[add, remove])
    }

    pub fn add_remove_right(add: ChildId, remove: ChildId) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[add, remove])
    }

    pub fn add_remove_properties_left(
        add: ChildId,
        remove: ChildId,
        properties: ChildId,
    ) -> Result<FormLayout, SpecError> {
        Self::left_aligned(&[add, remove, properties])
    }

    pub fn add_remove_properties(
        add: ChildId,
        remove: ChildId,
        properties: ChildId,
    ) -> Result<FormLayout, SpecError> {
        Self::growing(&[add, remove, properties])
    }

    pub fn add_remove_properties_right(
        add: ChildId,
        remove: ChildId,
        properties: ChildId,
    ) -> Result<FormLayout, SpecError> {
        Self::right_aligned(&[add, remove, properties])
    }

    /// A wizard bar: `leading` buttons on the left, then glue, back and
    /// next, then `trailing` buttons. `finish`, when given, shares the
    /// column of the next button so the host can show one or the other.
    pub fn wizard(
        leading: &[ChildId],
        back: ChildId,
        next: ChildId,
        finish: Option<ChildId>,
        trailing: &[ChildId],
    ) -> Result<FormLayout, SpecError> {
        let mut bar = BarBuilder::new()?;
        if !leading.is_empty() {
            bar.gridded_buttons(leading, FormFactory::button_column)?
                .related_gap()?;
        }
        bar.glue()?
            .gridded(back, FormFactory::button_column())?
            .gridded(next, FormFactory::button_column())?;
        if let Some(finish) = finish {
            bar.overlay(finish);
        }
        if !trailing.is_empty() {
            bar.related_gap()?
                .gridded_buttons(trailing, FormFactory::button_column)?;
        }
        Ok(bar.finish())
    }
}
