// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path representation.

use core::f64::consts::{PI, TAU};
use core::fmt;

use crate::{BezPath, CircleSector, CubicBez, Error, Point, Result, Vec2};

/// Below this distance from a full turn an arc is drawn as two halves.
const FULL_CIRCLE_EPSILON: f64 = 0.001;

/// One token of an SVG arc path fragment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SvgArcToken {
    /// A path command letter, `M` or `A`.
    Command(char),
    /// A numeric argument.
    Value(f64),
}

impl fmt::Display for SvgArcToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgArcToken::Command(c) => write!(f, "{c}"),
            SvgArcToken::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Join arc tokens into SVG path data, separated by spaces.
pub fn svg_arc_tokens_to_string(tokens: &[SvgArcToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Describe the arc of the circle around `center` from `start_angle` to
/// `end_angle` as SVG path tokens:
/// `M x y A rx ry rotation large-arc sweep x y`.
///
/// An arc within [`FULL_CIRCLE_EPSILON`] of a full turn is emitted as two
/// half arcs, the second one without a move-to, because renderers drop arcs
/// whose start and end coincide.
pub fn describe_svg_arc(
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    move_to_start: bool,
) -> Vec<SvgArcToken> {
    if TAU - (start_angle - end_angle).abs() < FULL_CIRCLE_EPSILON {
        let half = start_angle + (end_angle - start_angle) / 2.0;
        let mut tokens = describe_svg_arc(center, radius, start_angle, half, move_to_start);
        tokens.extend(describe_svg_arc(center, radius, half, end_angle, false));
        return tokens;
    }
    let start = center + Vec2::from_angle(start_angle) * radius;
    let end = center + Vec2::from_angle(end_angle) * radius;
    let diff = end_angle - start_angle;
    let large_arc = if diff < 0.0 {
        diff.abs() < PI
    } else {
        diff.abs() > PI
    };
    let mut tokens = Vec::with_capacity(11);
    if move_to_start {
        tokens.extend([
            SvgArcToken::Command('M'),
            SvgArcToken::Value(start.x),
            SvgArcToken::Value(start.y),
        ]);
    }
    tokens.extend([
        SvgArcToken::Command('A'),
        SvgArcToken::Value(radius),
        SvgArcToken::Value(radius),
        SvgArcToken::Value(0.0),
        SvgArcToken::Value(if large_arc { 1.0 } else { 0.0 }),
        SvgArcToken::Value(1.0),
        SvgArcToken::Value(end.x),
        SvgArcToken::Value(end.y),
    ]);
    tokens
}

impl CircleSector {
    /// The sector's arc as SVG path tokens; see [`describe_svg_arc`].
    pub fn to_svg_arc(&self, move_to_start: bool) -> Vec<SvgArcToken> {
        describe_svg_arc(
            self.circle.center,
            self.circle.radius,
            self.start_angle,
            self.end_angle,
            move_to_start,
        )
    }
}

impl CubicBez {
    /// The curve as SVG path data, `M x y C x1 y1 x2 y2 x y`.
    pub fn to_svg_path_data(&self) -> String {
        format!(
            "M{} {} C{} {} {} {} {} {}",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x, self.p3.y
        )
    }
}

impl BezPath {
    /// Convert the path to SVG path data.
    ///
    /// The current implementation doesn't take any special care to produce a
    /// short string (reducing precision, using relative movement).
    pub fn to_svg_string(&self) -> String {
        let mut result = String::new();
        for (i, c) in self.curves().enumerate() {
            if i == 0 {
                result.push_str(&format!("M{} {}", c.p0.x, c.p0.y));
            }
            result.push_str(&format!(
                " C{} {} {} {} {} {}",
                c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
            ));
        }
        result
    }

    /// Parse SVG path data made of a single sub-path of `M`, `L`, `C` and
    /// `Z` commands, absolute or relative.
    ///
    /// Line segments become straight cubic curves. `Z` closes the path with
    /// a straight curve if it does not end at its start already.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SvgParse`] on malformed or unsupported data and
    /// [`Error::EmptyPath`] if the data contains no segment.
    pub fn from_svg(data: &str) -> Result<BezPath> {
        let mut lexer = SvgLexer::new(data);
        let mut curves: Vec<CubicBez> = Vec::new();
        let mut first = None;
        let mut last_cmd = 0;
        while let Some(c) = lexer.get_cmd(last_cmd) {
            match c {
                b'm' | b'M' => {
                    if first.is_some() {
                        return Err(lexer.error("only one sub-path is supported"));
                    }
                    let pt = lexer.get_maybe_relative(c)?;
                    first = Some(pt);
                    lexer.last_pt = pt;
                    // Further pairs after a move-to are implicit line-tos.
                    last_cmd = c - (b'M' - b'L');
                }
                b'l' | b'L' => {
                    let p0 = lexer.current(first)?;
                    let pt = lexer.get_maybe_relative(c)?;
                    curves.push(straight(p0, pt));
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'c' | b'C' => {
                    let p0 = lexer.current(first)?;
                    let p1 = lexer.get_maybe_relative(c)?;
                    let p2 = lexer.get_maybe_relative(c)?;
                    let p3 = lexer.get_maybe_relative(c)?;
                    curves.push(CubicBez::new(p0, p1, p2, p3));
                    lexer.last_pt = p3;
                    last_cmd = c;
                }
                b'z' | b'Z' => {
                    let start = lexer.current(first)?;
                    if let Some(first) = first {
                        if start != first {
                            curves.push(straight(start, first));
                        }
                        lexer.last_pt = first;
                    }
                    last_cmd = 0;
                }
                _ => return Err(lexer.error("unsupported command")),
            }
        }
        lexer.skip_ws();
        if lexer.ix < data.len() {
            return Err(lexer.error("unexpected character"));
        }
        if curves.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(BezPath::from_curves(curves))
    }
}

fn straight(p0: Point, p3: Point) -> CubicBez {
    CubicBez::new(p0, p0.lerp(p3, 1.0 / 3.0), p0.lerp(p3, 2.0 / 3.0), p3)
}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
    last_pt: Point,
}

impl<'a> SvgLexer<'a> {
    fn new(data: &'a str) -> SvgLexer<'a> {
        SvgLexer {
            data,
            ix: 0,
            last_pt: Point::ZERO,
        }
    }

    fn error(&self, reason: &'static str) -> Error {
        Error::SvgParse {
            offset: self.ix,
            reason,
        }
    }

    /// The current point, which only exists after a move-to.
    fn current(&self, first: Option<Point>) -> Result<Point> {
        match first {
            Some(_) => Ok(self.last_pt),
            None => Err(self.error("path data must start with a move-to")),
        }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    fn get_cmd(&mut self, last_cmd: u8) -> Option<u8> {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c.is_ascii_alphabetic() {
                return Some(c);
            } else if last_cmd != 0 && (c == b'-' || c == b'.' || c.is_ascii_digit()) {
                // Plausible number start
                self.unget();
                return Some(last_cmd);
            } else {
                self.unget();
            }
        }
        None
    }

    fn get_byte(&mut self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).map(|&c| {
            self.ix += 1;
            c
        })
    }

    fn unget(&mut self) {
        self.ix -= 1;
    }

    fn get_number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.ix;
        let c = self
            .get_byte()
            .ok_or_else(|| self.error("unexpected end of data"))?;
        if !(c == b'-' || c == b'+') {
            self.unget();
        }
        let mut digit_count = 0;
        let mut seen_period = false;
        while let Some(c) = self.get_byte() {
            if c.is_ascii_digit() {
                digit_count += 1;
            } else if c == b'.' && !seen_period {
                seen_period = true;
            } else {
                self.unget();
                break;
            }
        }
        if digit_count > 0 {
            self.data[start..self.ix]
                .parse()
                .map_err(|_| self.error("invalid number"))
        } else {
            Err(self.error("expected a number"))
        }
    }

    fn get_number_pair(&mut self) -> Result<Vec2> {
        let x = self.get_number()?;
        self.opt_comma();
        let y = self.get_number()?;
        self.opt_comma();
        Ok(Vec2::new(x, y))
    }

    fn get_maybe_relative(&mut self, cmd: u8) -> Result<Point> {
        let pt = self.get_number_pair()?;
        if cmd.is_ascii_lowercase() {
            Ok(self.last_pt + pt)
        } else {
            Ok(pt.to_point())
        }
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c != b',' {
                self.unget();
            }
        }
    }
}
