//! Low-level scanners shared by the grammar rules.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize, value},
    sequence::pair,
    IResult,
};

use formgrid_core::Unit;

/// Parse a non-negative decimal number (`3`, `0.5`).
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            digit1,
            opt(pair(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse an unsigned integer.
pub fn integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Parse a unit suffix.
pub fn unit(input: &str) -> IResult<&str, Unit> {
    alt((
        value(Unit::Pixel, tag("px")),
        value(Unit::Point, tag("pt")),
        value(Unit::DialogUnit, tag("dlu")),
        value(Unit::Inch, tag("in")),
        value(Unit::Millimeter, tag("mm")),
        value(Unit::Centimeter, tag("cm")),
    ))(input)
}

/// Parse a keyword made of ASCII letters.
pub fn keyword(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic())(input)
}

/// Parse a number immediately followed by a unit.
pub fn length(input: &str) -> IResult<&str, (f64, Unit)> {
    pair(number, unit)(input)
}

/// A slice of the input together with its byte offset in the full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'a> {
    pub offset: usize,
    pub text: &'a str,
}

impl<'a> Piece<'a> {
    /// Trim surrounding whitespace, keeping the offset accurate.
    pub fn trim(self) -> Piece<'a> {
        let leading = self.text.len() - self.text.trim_start().len();
        Piece {
            offset: self.offset + leading,
            text: self.text.trim(),
        }
    }
}

/// Split `input` at every `separator` outside parentheses.
///
/// Returns `None` when the parentheses are unbalanced.
pub fn split_top_level(input: &str, base_offset: usize, separator: char) -> Option<Vec<Piece<'_>>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            c if c == separator && depth == 0 => {
                pieces.push(Piece {
                    offset: base_offset + start,
                    text: &input[start..i],
                });
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }

    pieces.push(Piece {
        offset: base_offset + start,
        text: &input[start..],
    });
    Some(pieces)
}
