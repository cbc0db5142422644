//! Conversion of physical and font-relative units to pixels.
//!
//! The engine never looks up fonts or screen resolutions itself. The host
//! owns a [`UnitConverter`] and hands it to the layout; [`DefaultUnitConverter`]
//! is a ready-made implementation fed with the screen resolution and the
//! metrics of the fonts in use.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{Axis, Unit};

/// Typographic resolution, points per inch.
const DTP_RESOLUTION: f64 = 72.0;

/// Converts sizes to pixels.
pub trait UnitConverter {
    fn inch_as_pixel(&self, inches: f64) -> i32;

    fn millimeter_as_pixel(&self, millimeters: f64) -> i32;

    fn centimeter_as_pixel(&self, centimeters: f64) -> i32;

    fn point_as_pixel(&self, points: f64) -> i32;

    /// Horizontal dialog units: a quarter of the average character width.
    fn dialog_unit_x_as_pixel(&self, dlu: f64) -> i32;

    /// Vertical dialog units: an eighth of the line height.
    fn dialog_unit_y_as_pixel(&self, dlu: f64) -> i32;

    /// Convert `value` in `unit` to pixels along `axis`.
    fn to_pixels(&self, value: f64, unit: Unit, axis: Axis) -> i32 {
        match unit {
            Unit::Pixel => value.round() as i32,
            Unit::Point => self.point_as_pixel(value),
            Unit::Inch => self.inch_as_pixel(value),
            Unit::Millimeter => self.millimeter_as_pixel(value),
            Unit::Centimeter => self.centimeter_as_pixel(value),
            Unit::DialogUnit => match axis {
                Axis::Horizontal => self.dialog_unit_x_as_pixel(value),
                Axis::Vertical => self.dialog_unit_y_as_pixel(value),
            },
        }
    }

    /// Changes whenever the converter would return different results.
    /// Layout caches include it in their key.
    fn generation(&self) -> u64 {
        0
    }
}

pub fn inch_as_pixel(inches: f64, dpi: u32) -> i32 {
    (f64::from(dpi) * inches).round() as i32
}

pub fn millimeter_as_pixel(millimeters: f64, dpi: u32) -> i32 {
    (f64::from(dpi) * millimeters * 10.0 / 254.0).round() as i32
}

pub fn centimeter_as_pixel(centimeters: f64, dpi: u32) -> i32 {
    (f64::from(dpi) * centimeters * 100.0 / 254.0).round() as i32
}

pub fn point_as_pixel(points: f64, dpi: u32) -> i32 {
    (f64::from(dpi) * points / DTP_RESOLUTION).round() as i32
}

/// Metrics of a reference font, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    pub average_char_width: f64,
    pub height: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            average_char_width: 8.0,
            height: 16.0,
        }
    }
}

/// Horizontal and vertical dialog base units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogBaseUnits {
    pub x: f64,
    pub y: f64,
}

impl DialogBaseUnits {
    pub fn from_metrics(metrics: &FontMetrics) -> Self {
        Self {
            x: metrics.average_char_width,
            y: metrics.height,
        }
    }

    pub fn x_as_pixel(&self, dlu: f64) -> i32 {
        (dlu * self.x / 4.0).round() as i32
    }

    pub fn y_as_pixel(&self, dlu: f64) -> i32 {
        (dlu * self.y / 8.0).round() as i32
    }
}

/// Identifies a font in the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontId(pub u64);

/// Unit converter with a screen resolution, default dialog font metrics and
/// a per-font cache of dialog base units.
#[derive(Debug, Clone)]
pub struct DefaultUnitConverter {
    screen_resolution: u32,
    default_metrics: FontMetrics,
    global: DialogBaseUnits,
    fonts: IndexMap<FontId, DialogBaseUnits>,
    generation: u64,
}

impl Default for DefaultUnitConverter {
    fn default() -> Self {
        Self::new(96, FontMetrics::default())
    }
}

impl DefaultUnitConverter {
    /// Create a converter for a screen of `screen_resolution` dpi.
    pub fn new(screen_resolution: u32, default_metrics: FontMetrics) -> Self {
        let global = DialogBaseUnits::from_metrics(&default_metrics);
        debug!(?global, screen_resolution, "computed global dialog base units");
        Self {
            screen_resolution,
            default_metrics,
            global,
            fonts: IndexMap::new(),
            generation: 0,
        }
    }

    pub fn screen_resolution(&self) -> u32 {
        self.screen_resolution
    }

    pub fn set_screen_resolution(&mut self, dpi: u32) {
        if dpi != self.screen_resolution {
            self.screen_resolution = dpi;
            self.generation += 1;
        }
    }

    pub fn default_font_metrics(&self) -> FontMetrics {
        self.default_metrics
    }

    /// Replace the metrics used when no font is given.
    pub fn set_default_font_metrics(&mut self, metrics: FontMetrics) {
        if metrics == self.default_metrics {
            return;
        }
        self.default_metrics = metrics;
        self.global = DialogBaseUnits::from_metrics(&metrics);
        self.generation += 1;
        debug!(global = ?self.global, "recomputed global dialog base units");
    }

    /// Compute and cache the dialog base units of `font`.
    pub fn register_font(&mut self, font: FontId, metrics: &FontMetrics) -> DialogBaseUnits {
        let units = DialogBaseUnits::from_metrics(metrics);
        if self.fonts.insert(font, units) != Some(units) {
            self.generation += 1;
            debug!(?font, ?units, "computed dialog base units");
        }
        units
    }

    /// Drop a cached font.
    pub fn forget_font(&mut self, font: FontId) {
        if self.fonts.shift_remove(&font).is_some() {
            self.generation += 1;
        }
    }

    /// Dialog base units for `font`, or the global units when the font is
    /// unknown or absent.
    pub fn dialog_base_units(&self, font: Option<FontId>) -> DialogBaseUnits {
        font.and_then(|f| self.fonts.get(&f).copied())
            .unwrap_or(self.global)
    }

    /// A converter that measures dialog units with `font`.
    pub fn for_font(&self, font: FontId) -> FontUnitConverter<'_> {
        FontUnitConverter {
            converter: self,
            units: self.dialog_base_units(Some(font)),
        }
    }
}

impl UnitConverter for DefaultUnitConverter {
    fn inch_as_pixel(&self, inches: f64) -> i32 {
        inch_as_pixel(inches, self.screen_resolution)
    }

    fn millimeter_as_pixel(&self, millimeters: f64) -> i32 {
        millimeter_as_pixel(millimeters, self.screen_resolution)
    }

    fn centimeter_as_pixel(&self, centimeters: f64) -> i32 {
        centimeter_as_pixel(centimeters, self.screen_resolution)
    }

    fn point_as_pixel(&self, points: f64) -> i32 {
        point_as_pixel(points, self.screen_resolution)
    }

    fn dialog_unit_x_as_pixel(&self, dlu: f64) -> i32 {
        self.global.x_as_pixel(dlu)
    }

    fn dialog_unit_y_as_pixel(&self, dlu: f64) -> i32 {
        self.global.y_as_pixel(dlu)
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

/// A [`DefaultUnitConverter`] bound to one reference font.
#[derive(Debug, Clone, Copy)]
pub struct FontUnitConverter<'a> {
    converter: &'a DefaultUnitConverter,
    units: DialogBaseUnits,
}

impl UnitConverter for FontUnitConverter<'_> {
    fn inch_as_pixel(&self, inches: f64) -> i32 {
        self.converter.inch_as_pixel(inches)
    }

    fn millimeter_as_pixel(&self, millimeters: f64) -> i32 {
        self.converter.millimeter_as_pixel(millimeters)
    }

    fn centimeter_as_pixel(&self, centimeters: f64) -> i32 {
        self.converter.centimeter_as_pixel(centimeters)
    }

    fn point_as_pixel(&self, points: f64) -> i32 {
        self.converter.point_as_pixel(points)
    }

    fn dialog_unit_x_as_pixel(&self, dlu: f64) -> i32 {
        self.units.x_as_pixel(dlu)
    }

    fn dialog_unit_y_as_pixel(&self, dlu: f64) -> i32 {
        self.units.y_as_pixel(dlu)
    }

    fn generation(&self) -> u64 {
        self.converter.generation
    }
}
