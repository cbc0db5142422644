//! Grammar rules for column, row, and cell constraint encodings.
//!
//! A track list is split at top-level commas first; every token is then
//! split at top-level colons into alignment, size, and growth parts, and
//! each part is parsed with `nom`.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, map_opt, opt},
    error::{Error, ErrorKind},
    sequence::{delimited, separated_pair, terminated},
    IResult,
};

use formgrid_core::{Alignment, Axis, CellConstraints, FormatError, Size, TrackSpec};

use crate::lexer::*;

/// Parse a comma-separated list of track specs for `axis`.
///
/// An empty or blank text yields an empty list. On error nothing is
/// returned, so callers can swap the result in atomically.
pub fn parse_track_specs(text: &str, axis: Axis) -> Result<Vec<TrackSpec>, FormatError> {
    let lowered = text.to_ascii_lowercase();
    if lowered.trim().is_empty() {
        return Ok(Vec::new());
    }

    let source = Source {
        original: text,
        lowered: &lowered,
        axis,
    };
    let mut specs = Vec::new();
    source.parse_list(
        Piece {
            offset: 0,
            text: &lowered,
        },
        &mut specs,
    )?;
    Ok(specs)
}

/// Parse a single track token such as `right:max(40dlu;pref):grow`.
pub fn parse_track_spec(token: &str, axis: Axis) -> Result<TrackSpec, FormatError> {
    let lowered = token.to_ascii_lowercase();
    let source = Source {
        original: token,
        lowered: &lowered,
        axis,
    };
    source.parse_token(
        Piece {
            offset: 0,
            text: &lowered,
        }
        .trim(),
        0,
    )
}

/// Parse a size expression such as `max(40dlu;pref)`.
pub fn parse_size(text: &str) -> Result<Size, FormatError> {
    let lowered = text.to_ascii_lowercase();
    let result = all_consuming(size)(lowered.trim())
        .map(|(_, size)| size)
        .map_err(|_| FormatError::MalformedToken {
            token: text.to_string(),
            index: 0,
            offset: 0,
            reason: "invalid size".to_string(),
        });
    result
}

/// Parse `"col, row [, colSpan, rowSpan] [, hAlign, vAlign]"`.
///
/// `default` (or `d`) as an alignment keeps the track's alignment.
pub fn parse_cell_constraints(text: &str) -> Result<CellConstraints, FormatError> {
    let lowered = text.to_ascii_lowercase();
    let parts: Vec<&str> = lowered.split(',').map(str::trim).collect();
    let invalid = |reason: String| FormatError::InvalidConstraints {
        text: text.to_string(),
        reason,
    };

    if !matches!(parts.len(), 2 | 4 | 6) {
        return Err(invalid(format!(
            "expected 2, 4, or 6 values, found {}",
            parts.len()
        )));
    }

    let column = positive(parts[0], "column").map_err(&invalid)?;
    let row = positive(parts[1], "row").map_err(&invalid)?;
    let mut cc = CellConstraints::xy(column, row);

    let alignments = match &parts[2..] {
        [] => None,
        [h, v] if all_consuming(integer)(*h).is_err() => Some((*h, *v)),
        [w, h] => {
            cc.column_span = positive(w, "column span").map_err(&invalid)?;
            cc.row_span = positive(h, "row span").map_err(&invalid)?;
            None
        }
        [w, h, ha, va] => {
            cc.column_span = positive(w, "column span").map_err(&invalid)?;
            cc.row_span = positive(h, "row span").map_err(&invalid)?;
            Some((*ha, *va))
        }
        _ => None,
    };

    if let Some((horizontal, vertical)) = alignments {
        cc.horizontal = alignment_override(horizontal, Axis::Horizontal).map_err(&invalid)?;
        cc.vertical = alignment_override(vertical, Axis::Vertical).map_err(&invalid)?;
    }

    Ok(cc)
}

fn positive(part: &str, what: &str) -> Result<usize, String> {
    match all_consuming(integer)(part) {
        Ok((_, n)) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive integer, found {:?}", what, part)),
    }
}

fn alignment_override(word: &str, axis: Axis) -> Result<Option<Alignment>, String> {
    if word == "default" || word == "d" {
        return Ok(None);
    }
    Alignment::from_keyword(word, axis)
        .map(Some)
        .ok_or_else(|| format!("unknown {} alignment {:?}", axis, word))
}

/// The text being parsed, in original and lowercased form.
///
/// Lowercasing is ASCII-only, so byte offsets agree between the two.
struct Source<'a> {
    original: &'a str,
    lowered: &'a str,
    axis: Axis,
}

impl<'a> Source<'a> {
    fn original_text(&self, piece: Piece<'_>) -> String {
        self.original[piece.offset..piece.offset + piece.text.len()].to_string()
    }

    fn malformed(&self, piece: Piece<'_>, index: usize, reason: impl Into<String>) -> FormatError {
        FormatError::MalformedToken {
            token: self.original_text(piece),
            index,
            offset: piece.offset,
            reason: reason.into(),
        }
    }

    /// Parse a comma-separated list, expanding repetitions, into `out`.
    fn parse_list(&self, list: Piece<'a>, out: &mut Vec<TrackSpec>) -> Result<(), FormatError> {
        let pieces = split_top_level(list.text, list.offset, ',').ok_or_else(|| {
            FormatError::UnbalancedParentheses {
                text: self.original_text(list),
            }
        })?;

        for (index, piece) in pieces.into_iter().enumerate() {
            let piece = piece.trim();
            if piece.text.is_empty() {
                return Err(self.malformed(piece, index, "empty token"));
            }
            match repetition(piece.text) {
                Some((count, inner_start)) => {
                    if count == 0 {
                        return Err(FormatError::InvalidRepetition {
                            token: self.original_text(piece),
                            offset: piece.offset,
                            reason: "repetition count must be at least 1".to_string(),
                        });
                    }
                    let inner = Piece {
                        offset: piece.offset + inner_start,
                        text: &piece.text[inner_start..piece.text.len() - 1],
                    };
                    let mut expanded = Vec::new();
                    self.parse_list(inner, &mut expanded)?;
                    for _ in 0..count {
                        out.extend(expanded.iter().cloned());
                    }
                }
                None => out.push(self.parse_token(piece, index)?),
            }
        }
        Ok(())
    }

    /// Parse `[alignment:]size[:growth]`.
    fn parse_token(&self, piece: Piece<'_>, index: usize) -> Result<TrackSpec, FormatError> {
        debug_assert!(piece.offset + piece.text.len() <= self.lowered.len());

        let parts = split_top_level(piece.text, piece.offset, ':')
            .ok_or_else(|| self.malformed(piece, index, "unbalanced parentheses"))?;
        let parts: Vec<&str> = parts.iter().map(|p| p.text.trim()).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(self.malformed(piece, index, "empty part"));
        }

        let axis = self.axis;
        let (alignment, size_text, grow_text) = match parts.as_slice() {
            [size] => (None, *size, None),
            [first, second] => match Alignment::from_keyword(first, axis) {
                Some(alignment) => (Some(alignment), *second, None),
                None => (None, *first, Some(*second)),
            },
            [alignment, size, grow] => {
                let alignment = Alignment::from_keyword(alignment, axis).ok_or_else(|| {
                    self.malformed(piece, index, format!("unknown {} alignment {:?}", axis, alignment))
                })?;
                (Some(alignment), *size, Some(*grow))
            }
            _ => {
                return Err(self.malformed(
                    piece,
                    index,
                    format!("expected at most 3 parts, found {}", parts.len()),
                ))
            }
        };

        let size = all_consuming(size)(size_text)
            .map(|(_, size)| size)
            .map_err(|_| self.malformed(piece, index, format!("invalid size {:?}", size_text)))?;

        let grow = match grow_text {
            Some(text) => all_consuming(growth)(text)
                .map(|(_, grow)| grow)
                .map_err(|_| self.malformed(piece, index, format!("invalid growth {:?}", text)))?,
            None => 0.0,
        };

        Ok(TrackSpec::new(
            axis,
            alignment.unwrap_or_else(|| Alignment::default_for(axis)),
            size,
            grow,
        ))
    }
}

/// Recognize `N*(...)`, returning the count and the byte index just past
/// the opening parenthesis.
fn repetition(text: &str) -> Option<(usize, usize)> {
    let (rest, count) = terminated(integer, delimited(multispace0, char('*'), multispace0))(text).ok()?;
    if !(rest.starts_with('(') && rest.ends_with(')')) {
        return None;
    }
    Some((count, text.len() - rest.len() + 1))
}

/// Strip whitespace around `inner`.
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse a size: a bounded expression, a constant, or a component keyword.
fn size(input: &str) -> IResult<&str, Size> {
    alt((bounded, constant, component))(input)
}

/// `max(lower;base)` or `min(upper;base)`.
fn bounded(input: &str) -> IResult<&str, Size> {
    let (rest, name) = terminated(alt((tag("max"), tag("min"))), char('('))(input)?;
    let (rest, (limit, base)) =
        terminated(separated_pair(ws(size), char(';'), ws(size)), char(')'))(rest)?;
    let size = if name == "max" {
        Size::at_least(limit, base)
    } else {
        Size::at_most(limit, base)
    };
    Ok((rest, size))
}

fn constant(input: &str) -> IResult<&str, Size> {
    map(length, |(value, unit)| Size::constant(value, unit))(input)
}

fn component(input: &str) -> IResult<&str, Size> {
    map_opt(keyword, |word| match word {
        "pref" | "p" => Some(Size::PREFERRED),
        "min" | "m" => Some(Size::MINIMUM),
        "default" | "d" => Some(Size::DEFAULT),
        _ => None,
    })(input)
}

/// `grow`, `grow(2)`, `g`, `nogrow`, `n`, or a bare weight.
fn growth(input: &str) -> IResult<&str, f64> {
    alt((growth_keyword, number))(input)
}

fn growth_keyword(input: &str) -> IResult<&str, f64> {
    let (rest, word) = keyword(input)?;
    match word {
        "grow" | "g" => map(opt(delimited(char('('), ws(number), char(')'))), |weight| {
            weight.unwrap_or(1.0)
        })(rest),
        "nogrow" | "n" => Ok((rest, 0.0)),
        _ => Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
    }
}
