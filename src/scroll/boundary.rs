//! Trigger boundaries in `"<element edge> <viewport edge>"` notation, e.g.
//! `"top 80%"` means the element's top reaches 80% down the viewport.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Document-relative position and size of a trigger region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub top: f64,
    pub height: f64,
}

/// A point along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Fraction(f64),
    Pixels(f64),
}

impl Anchor {
    pub fn resolve(self, length: f64) -> f64 {
        match self {
            Anchor::Fraction(fraction) => fraction * length,
            Anchor::Pixels(pixels) => pixels,
        }
    }

    fn parse_amount(token: &str) -> Option<Self> {
        if let Some(percent) = token.strip_suffix('%') {
            return percent.parse::<f64>().ok().map(|v| Anchor::Fraction(v / 100.0));
        }
        token
            .strip_suffix("px")
            .unwrap_or(token)
            .parse::<f64>()
            .ok()
            .map(Anchor::Pixels)
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "top" => Ok(Anchor::Fraction(0.0)),
            "center" => Ok(Anchor::Fraction(0.5)),
            "bottom" => Ok(Anchor::Fraction(1.0)),
            other => Anchor::parse_amount(other).ok_or_else(|| Error::Boundary(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl Boundary {
    /// Scroll position at which this boundary is crossed.
    pub fn offset(&self, geometry: Geometry, viewport_height: f64) -> f64 {
        geometry.top + self.element.resolve(geometry.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Boundary {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let mut parts = raw.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Boundary {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(Error::Boundary(raw.to_string())),
        }
    }
}

/// Where a trigger's range ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum End {
    At(Boundary),
    /// Distance past the start; percentages are of the viewport height.
    AfterStart(Anchor),
}

impl FromStr for End {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().strip_prefix("+=") {
            Some(amount) => Anchor::parse_amount(amount)
                .map(End::AfterStart)
                .ok_or_else(|| Error::Boundary(raw.to_string())),
            None => Ok(End::At(raw.parse()?)),
        }
    }
}

/// Scroll positions between which a trigger is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn measure(start: &Boundary, end: &End, geometry: Geometry, viewport_height: f64) -> Self {
        let start = start.offset(geometry, viewport_height);
        let end = match end {
            End::At(boundary) => boundary.offset(geometry, viewport_height),
            End::AfterStart(distance) => start + distance.resolve(viewport_height),
        };
        Range {
            start,
            end: end.max(start + 1.0),
        }
    }

    pub fn progress(&self, scroll: f64) -> f64 {
        crate::motion::clamp01((scroll - self.start) / (self.end - self.start))
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}
