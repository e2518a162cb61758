//! Journal annotation fields: setup, market condition, psychology.
//!
//! These describe the trade for later filtering and per-setup aggregation
//! and have no effect on the economics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupType {
    Breakout,
    Reversal,
    TrendFollowing,
    SupportResistance,
    Pattern,
}

impl fmt::Display for SetupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupType::Breakout => write!(f, "breakout"),
            SetupType::Reversal => write!(f, "reversal"),
            SetupType::TrendFollowing => write!(f, "trend_following"),
            SetupType::SupportResistance => write!(f, "support_resistance"),
            SetupType::Pattern => write!(f, "pattern"),
        }
    }
}

impl FromStr for SetupType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakout" => Ok(SetupType::Breakout),
            "reversal" => Ok(SetupType::Reversal),
            "trend_following" | "trend" => Ok(SetupType::TrendFollowing),
            "support_resistance" | "sr" => Ok(SetupType::SupportResistance),
            "pattern" => Ok(SetupType::Pattern),
            _ => Err(format!("Unknown setup type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCondition {
    Bullish,
    Bearish,
    Sideways,
    Volatile,
}

impl fmt::Display for MarketCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketCondition::Bullish => write!(f, "bullish"),
            MarketCondition::Bearish => write!(f, "bearish"),
            MarketCondition::Sideways => write!(f, "sideways"),
            MarketCondition::Volatile => write!(f, "volatile"),
        }
    }
}

impl FromStr for MarketCondition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bullish" => Ok(MarketCondition::Bullish),
            "bearish" => Ok(MarketCondition::Bearish),
            "sideways" => Ok(MarketCondition::Sideways),
            "volatile" => Ok(MarketCondition::Volatile),
            _ => Err(format!("Unknown market condition: {s}")),
        }
    }
}

/// Emotional state at entry. Fomo and Revenge are the states the journal
/// warns about before logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Psychology {
    Calm,
    Fearful,
    Excited,
    Fomo,
    Revenge,
}

impl Psychology {
    pub fn is_caution_state(&self) -> bool {
        matches!(self, Psychology::Fomo | Psychology::Revenge)
    }
}

impl fmt::Display for Psychology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Psychology::Calm => write!(f, "calm"),
            Psychology::Fearful => write!(f, "fearful"),
            Psychology::Excited => write!(f, "excited"),
            Psychology::Fomo => write!(f, "fomo"),
            Psychology::Revenge => write!(f, "revenge"),
        }
    }
}

impl FromStr for Psychology {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calm" => Ok(Psychology::Calm),
            "fearful" => Ok(Psychology::Fearful),
            "excited" => Ok(Psychology::Excited),
            "fomo" => Ok(Psychology::Fomo),
            "revenge" => Ok(Psychology::Revenge),
            _ => Err(format!("Unknown psychology state: {s}")),
        }
    }
}
