//! Closed registry of operator names

use crate::operator::{CharBoxes, Format, Operator, Position};
use crate::{FillError, PageIndex, Result};
use std::fmt;
use std::str::FromStr;

/// Every operator a spec may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Text,
    Number,
    Mark,
    SpacedText,
    WholePounds,
    Money,
    SpacedPounds,
    SpacedZeroPadded,
    SpacedMoney,
    SpacedDate,
    SpacedSortCode,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 11] = [
        OperatorKind::Text,
        OperatorKind::Number,
        OperatorKind::Mark,
        OperatorKind::SpacedText,
        OperatorKind::WholePounds,
        OperatorKind::Money,
        OperatorKind::SpacedPounds,
        OperatorKind::SpacedZeroPadded,
        OperatorKind::SpacedMoney,
        OperatorKind::SpacedDate,
        OperatorKind::SpacedSortCode,
    ];

    /// Name used in spec descriptors
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Text => "WriteString",
            OperatorKind::Number => "WriteNumber",
            OperatorKind::Mark => "WriteBool",
            OperatorKind::SpacedText => "SpaceString",
            OperatorKind::WholePounds => "WritePounds",
            OperatorKind::Money => "WriteMoney",
            OperatorKind::SpacedPounds => "SpacePounds",
            OperatorKind::SpacedZeroPadded => "SpaceZeroPadNumber",
            OperatorKind::SpacedMoney => "SpaceMoney",
            OperatorKind::SpacedDate => "WriteSpaceDate",
            OperatorKind::SpacedSortCode => "WriteSpaceSortCode",
        }
    }

    /// Look up a descriptor name; names are case-sensitive
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FillError::UnknownOperator(name.to_string()))
    }

    /// Number of arguments following the page in a descriptor
    pub fn arity(self) -> usize {
        match self {
            OperatorKind::Text
            | OperatorKind::Number
            | OperatorKind::Mark
            | OperatorKind::WholePounds
            | OperatorKind::Money => 2,
            OperatorKind::SpacedText => 3,
            OperatorKind::SpacedPounds | OperatorKind::SpacedZeroPadded => 4,
            OperatorKind::SpacedMoney => 6,
            OperatorKind::SpacedDate | OperatorKind::SpacedSortCode => 7,
        }
    }

    /// Construct an operator from its positional arguments
    pub fn build(self, page: PageIndex, args: &[f64]) -> Result<Operator> {
        if args.len() != self.arity() {
            return Err(FillError::InvalidSpec(format!(
                "{} takes {} arguments after the page, got {}",
                self.name(),
                self.arity(),
                args.len()
            )));
        }

        let at = || Position::new(args[0], args[1]);
        let boxes = |x: usize, pitch: usize| CharBoxes::new(args[x], args[x + 1], args[pitch]);

        let format = match self {
            OperatorKind::Text => Format::Text(at()),
            OperatorKind::Number => Format::Number(at()),
            OperatorKind::Mark => Format::Mark(at()),
            OperatorKind::WholePounds => Format::WholePounds(at()),
            OperatorKind::Money => Format::Money(at()),
            OperatorKind::SpacedText => Format::SpacedText(boxes(0, 2)),
            OperatorKind::SpacedPounds => Format::SpacedPounds {
                boxes: boxes(0, 2),
                digits: self.digits(args[3])?,
            },
            OperatorKind::SpacedZeroPadded => Format::SpacedZeroPadded {
                boxes: boxes(0, 2),
                digits: self.digits(args[3])?,
            },
            OperatorKind::SpacedMoney => Format::SpacedMoney {
                pounds: boxes(0, 4),
                pence: boxes(2, 4),
                digits: self.digits(args[5])?,
            },
            OperatorKind::SpacedDate => Format::SpacedDate {
                day: boxes(0, 6),
                month: boxes(2, 6),
                year: boxes(4, 6),
            },
            OperatorKind::SpacedSortCode => Format::SpacedSortCode {
                first: boxes(0, 6),
                second: boxes(2, 6),
                third: boxes(4, 6),
            },
        };

        Ok(Operator::new(page, format))
    }

    fn digits(self, value: f64) -> Result<usize> {
        if value.fract() != 0.0 || !(0.0..=u16::MAX as f64).contains(&value) {
            return Err(FillError::InvalidSpec(format!(
                "{}: digit count {value} is not a non-negative integer",
                self.name()
            )));
        }
        Ok(value as usize)
    }
}

impl FromStr for OperatorKind {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
