use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade direction. Long/Short are equity positions; Call/Put are bought
/// option positions and follow the Long/Short sign conventions respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
    Call,
    Put,
}

impl Direction {
    /// Whether the direction profits when price rises.
    pub fn is_bullish(&self) -> bool {
        matches!(self, Direction::Long | Direction::Call)
    }

    pub fn instrument_class(&self) -> InstrumentClass {
        match self {
            Direction::Long | Direction::Short => InstrumentClass::Equity,
            Direction::Call | Direction::Put => InstrumentClass::Option,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
            Direction::Call => write!(f, "call"),
            Direction::Put => write!(f, "put"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            "call" => Ok(Direction::Call),
            "put" => Ok(Direction::Put),
            _ => Err(format!("Unknown direction: {s}")),
        }
    }
}

/// Instrument class drives the transaction-tax branch of the charge
/// schedule. Derived from the direction, never parsed from symbol text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentClass {
    Equity,
    Option,
}

impl fmt::Display for InstrumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentClass::Equity => write!(f, "equity"),
            InstrumentClass::Option => write!(f, "option"),
        }
    }
}

impl FromStr for InstrumentClass {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equity" => Ok(InstrumentClass::Equity),
            "option" => Ok(InstrumentClass::Option),
            _ => Err(format!("Unknown instrument class: {s}")),
        }
    }
}
