//! Formatting-and-drawing operators
//!
//! An [`Operator`] is bound to one form page and one or more positions when
//! the spec is loaded. Applying it to a value coerces the value, formats it
//! and draws the result on a [`Surface`].

use crate::format;
use crate::surface::Surface;
use crate::value::{is_truthy, to_float, to_int, truncate, value_to_string};
use crate::{PageIndex, Result};
use pdf_core::units::MM;
use serde_json::Value;

/// Mark drawn for a true boolean
pub const BOOL_MARK: &str = "X";

/// Position on the page in millimetres, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Draw `text` at this position
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S, text: &str) -> Result<()> {
        surface.draw_string(self.x * MM, self.y * MM, text)
    }
}

/// A row of single-character boxes starting at `origin`, `pitch` mm apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharBoxes {
    pub origin: Position,
    pub pitch: f64,
}

impl CharBoxes {
    pub fn new(x: f64, y: f64, pitch: f64) -> Self {
        Self {
            origin: Position::new(x, y),
            pitch,
        }
    }

    /// Draw one character of `text` per box
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S, text: &str) -> Result<()> {
        for (i, c) in text.chars().enumerate() {
            let x = (self.origin.x + self.pitch * i as f64) * MM;
            surface.draw_string(x, self.origin.y * MM, c.encode_utf8(&mut [0; 4]))?;
        }
        Ok(())
    }
}

/// How a value is formatted and where it is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    /// The value as text
    Text(Position),
    /// A number as given; drawn exactly like `Text`
    Number(Position),
    /// `X` when the value is truthy, nothing otherwise
    Mark(Position),
    /// The value as text, one character per box
    SpacedText(CharBoxes),
    /// Whole pounds, fraction discarded
    WholePounds(Position),
    /// Pounds with two decimal places
    Money(Position),
    /// Whole pounds right-justified over `digits` boxes
    SpacedPounds { boxes: CharBoxes, digits: usize },
    /// Integer zero-padded over `digits` boxes
    SpacedZeroPadded { boxes: CharBoxes, digits: usize },
    /// Pounds right-justified over `digits` boxes plus two pence boxes
    SpacedMoney {
        pounds: CharBoxes,
        pence: CharBoxes,
        digits: usize,
    },
    /// ISO date drawn as dd, mm and yyyy box groups
    SpacedDate {
        day: CharBoxes,
        month: CharBoxes,
        year: CharBoxes,
    },
    /// Six-character sort code drawn as three two-box groups
    SpacedSortCode {
        first: CharBoxes,
        second: CharBoxes,
        third: CharBoxes,
    },
}

/// A format bound to a form page
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    page: PageIndex,
    format: Format,
}

impl Operator {
    pub fn new(page: PageIndex, format: Format) -> Self {
        Self { page, format }
    }

    /// Page this operator draws on
    pub fn page(&self) -> PageIndex {
        self.page
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Format `value` and draw it on `surface`
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S, value: &Value) -> Result<()> {
        match &self.format {
            Format::Text(at) | Format::Number(at) => at.draw(surface, &value_to_string(value)),
            Format::Mark(at) => {
                if is_truthy(value) {
                    at.draw(surface, BOOL_MARK)?;
                }
                Ok(())
            }
            Format::SpacedText(boxes) => boxes.draw(surface, &value_to_string(value)),
            Format::WholePounds(at) => {
                let pounds = truncate(to_float(value)?)?;
                at.draw(surface, &format::whole(pounds))
            }
            Format::Money(at) => at.draw(surface, &format::money(to_float(value)?)),
            Format::SpacedPounds { boxes, digits } => {
                let pounds = truncate(to_float(value)?)?;
                boxes.draw(surface, &format::right_justify(pounds, *digits))
            }
            Format::SpacedZeroPadded { boxes, digits } => {
                boxes.draw(surface, &format::zero_pad(to_int(value)?, *digits))
            }
            Format::SpacedMoney {
                pounds,
                pence,
                digits,
            } => {
                let amount = to_float(value)?;
                pounds.draw(surface, &format::right_justify(truncate(amount)?, *digits))?;
                pence.draw(surface, &format::pence(amount))
            }
            Format::SpacedDate { day, month, year } => {
                let date = format::parse_date(&value_to_string(value))?;
                let [d, m, y] = format::date_fields(date);
                day.draw(surface, &d)?;
                month.draw(surface, &m)?;
                year.draw(surface, &y)
            }
            Format::SpacedSortCode {
                first,
                second,
                third,
            } => {
                let code = value_to_string(value);
                if code.is_empty() {
                    return Ok(());
                }
                let [a, b, c] = format::sort_code_groups(&code)?;
                first.draw(surface, &a)?;
                second.draw(surface, &b)?;
                third.draw(surface, &c)
            }
        }
    }
}
