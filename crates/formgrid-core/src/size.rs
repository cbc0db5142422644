//! The size model for column and row tracks.
//!
//! A track is sized by a constant physical length, by the intrinsic size of
//! the children it contains, or by a bounded combination of both, as in
//! `max(40dlu;pref)`.

use std::fmt;

use crate::types::Unit;

/// Which intrinsic size of a child a track measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentSize {
    /// The child's minimum size
    Minimum,
    /// The child's preferred size
    Preferred,
    /// Preferred when there is room, minimum otherwise
    Default,
}

impl ComponentSize {
    /// The keyword used in the textual encoding.
    pub fn keyword(self) -> &'static str {
        match self {
            ComponentSize::Minimum => "min",
            ComponentSize::Preferred => "pref",
            ComponentSize::Default => "default",
        }
    }
}

/// Which track size is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// The smallest size the track accepts.
    Minimum,
    /// The natural size of the track.
    Preferred,
}

/// Supplies the values a [`Size`] is resolved against.
///
/// `minimum` and `preferred` report the largest minimum and preferred extent
/// among the children placed solely in the track, or 0 for an empty track.
pub trait SizeContext {
    /// Convert a constant length to pixels.
    fn constant(&self, value: f64, unit: Unit) -> i32;

    /// Largest child minimum size.
    fn minimum(&self) -> i32;

    /// Largest child preferred size.
    fn preferred(&self) -> i32;
}

/// A track size policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Size {
    /// A fixed physical length.
    Constant { value: f64, unit: Unit },
    /// The intrinsic size of the track's children.
    Component(ComponentSize),
    /// A base size clamped by optional limits.
    ///
    /// The upper limit is applied first, so a lower limit wins when the two
    /// conflict. This matches the encoding `max(lower;min(upper;base))`.
    Bounded {
        base: Box<Size>,
        lower: Option<Box<Size>>,
        upper: Option<Box<Size>>,
    },
}

impl Size {
    pub const MINIMUM: Size = Size::Component(ComponentSize::Minimum);
    pub const PREFERRED: Size = Size::Component(ComponentSize::Preferred);
    pub const DEFAULT: Size = Size::Component(ComponentSize::Default);

    /// A constant size.
    pub fn constant(value: f64, unit: Unit) -> Self {
        Size::Constant { value, unit }
    }

    /// A constant size in pixels.
    pub fn px(value: f64) -> Self {
        Self::constant(value, Unit::Pixel)
    }

    /// A constant size in dialog units.
    pub fn dlu(value: f64) -> Self {
        Self::constant(value, Unit::DialogUnit)
    }

    /// Combine a base size with optional limits.
    ///
    /// Without limits this returns `base` unchanged. A lower limit wrapped
    /// around a size that only has an upper limit is folded into a single
    /// bounded size, so `max(a;min(b;c))` has one canonical representation.
    pub fn bounded(base: Size, lower: Option<Size>, upper: Option<Size>) -> Self {
        match (base, lower, upper) {
            (base, None, None) => base,
            (
                Size::Bounded {
                    base,
                    lower: None,
                    upper: Some(upper),
                },
                Some(lower),
                None,
            ) => Size::Bounded {
                base,
                lower: Some(Box::new(lower)),
                upper: Some(upper),
            },
            (base, lower, upper) => Size::Bounded {
                base: Box::new(base),
                lower: lower.map(Box::new),
                upper: upper.map(Box::new),
            },
        }
    }

    /// `max(lower;base)`
    pub fn at_least(lower: Size, base: Size) -> Self {
        Self::bounded(base, Some(lower), None)
    }

    /// `min(upper;base)`
    pub fn at_most(upper: Size, base: Size) -> Self {
        Self::bounded(base, None, Some(upper))
    }

    /// Whether resolving this size consults the track's children.
    pub fn depends_on_children(&self) -> bool {
        match self {
            Size::Constant { .. } => false,
            Size::Component(_) => true,
            Size::Bounded { base, lower, upper } => {
                base.depends_on_children()
                    || lower.as_deref().is_some_and(Size::depends_on_children)
                    || upper.as_deref().is_some_and(Size::depends_on_children)
            }
        }
    }

    /// Resolve to pixels.
    pub fn resolve(&self, measure: Measure, ctx: &dyn SizeContext) -> i32 {
        match self {
            Size::Constant { value, unit } => ctx.constant(*value, *unit),
            Size::Component(ComponentSize::Minimum) => ctx.minimum(),
            Size::Component(ComponentSize::Preferred) => ctx.preferred(),
            Size::Component(ComponentSize::Default) => match measure {
                Measure::Minimum => ctx.minimum(),
                Measure::Preferred => ctx.minimum().max(ctx.preferred()),
            },
            Size::Bounded { base, lower, upper } => {
                let mut size = base.resolve(measure, ctx);
                if let Some(upper) = upper {
                    size = size.min(upper.resolve(measure, ctx));
                }
                if let Some(lower) = lower {
                    size = size.max(lower.resolve(measure, ctx));
                }
                size
            }
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Constant { value, unit } => write!(f, "{}{}", value, unit.suffix()),
            Size::Component(kind) => f.write_str(kind.keyword()),
            Size::Bounded { base, lower, upper } => match (lower, upper) {
                (Some(lower), Some(upper)) => write!(f, "max({};min({};{}))", lower, upper, base),
                (Some(lower), None) => write!(f, "max({};{})", lower, base),
                (None, Some(upper)) => write!(f, "min({};{})", upper, base),
                (None, None) => write!(f, "{}", base),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        minimum: i32,
        preferred: i32,
    }

    impl SizeContext for Fixed {
        fn constant(&self, value: f64, unit: Unit) -> i32 {
            match unit {
                Unit::DialogUnit => (value * 2.0).round() as i32,
                _ => value.round() as i32,
            }
        }

        fn minimum(&self) -> i32 {
            self.minimum
        }

        fn preferred(&self) -> i32 {
            self.preferred
        }
    }

    #[test]
    fn test_resolve_component_sizes() {
        let ctx = Fixed { minimum: 30, preferred: 50 };
        assert_eq!(Size::MINIMUM.resolve(Measure::Preferred, &ctx), 30);
        assert_eq!(Size::PREFERRED.resolve(Measure::Minimum, &ctx), 50);
        assert_eq!(Size::DEFAULT.resolve(Measure::Minimum, &ctx), 30);
        assert_eq!(Size::DEFAULT.resolve(Measure::Preferred, &ctx), 50);
    }

    #[test]
    fn test_default_prefers_larger_minimum() {
        let ctx = Fixed { minimum: 70, preferred: 50 };
        assert_eq!(Size::DEFAULT.resolve(Measure::Preferred, &ctx), 70);
    }

    #[test]
    fn test_resolve_bounded() {
        let ctx = Fixed { minimum: 10, preferred: 50 };
        let at_least = Size::at_least(Size::dlu(40.0), Size::PREFERRED);
        assert_eq!(at_least.resolve(Measure::Preferred, &ctx), 80);

        let at_most = Size::at_most(Size::px(40.0), Size::PREFERRED);
        assert_eq!(at_most.resolve(Measure::Preferred, &ctx), 40);

        // Lower limit wins over a conflicting upper limit.
        let both = Size::bounded(Size::PREFERRED, Some(Size::px(60.0)), Some(Size::px(20.0)));
        assert_eq!(both.resolve(Measure::Preferred, &ctx), 60);
    }

    #[test]
    fn test_bounded_folds_nested_limits() {
        let nested = Size::at_least(Size::px(10.0), Size::at_most(Size::px(90.0), Size::PREFERRED));
        assert_eq!(
            nested,
            Size::Bounded {
                base: Box::new(Size::PREFERRED),
                lower: Some(Box::new(Size::px(10.0))),
                upper: Some(Box::new(Size::px(90.0))),
            }
        );
        assert_eq!(nested.to_string(), "max(10px;min(90px;pref))");
    }

    #[test]
    fn test_display() {
        assert_eq!(Size::dlu(3.0).to_string(), "3dlu");
        assert_eq!(Size::constant(2.5, Unit::Millimeter).to_string(), "2.5mm");
        assert_eq!(Size::at_least(Size::dlu(40.0), Size::PREFERRED).to_string(), "max(40dlu;pref)");
        assert_eq!(Size::at_most(Size::dlu(80.0), Size::DEFAULT).to_string(), "min(80dlu;default)");
    }

    #[test]
    fn test_depends_on_children() {
        assert!(!Size::px(3.0).depends_on_children());
        assert!(Size::MINIMUM.depends_on_children());
        assert!(Size::at_least(Size::dlu(40.0), Size::PREFERRED).depends_on_children());
        assert!(!Size::at_least(Size::dlu(40.0), Size::px(2.0)).depends_on_children());
    }
}
