use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CalculatorError;

pub const MIN_SCORE: u16 = 300;
pub const MAX_SCORE: u16 = 850;

/// Credit-score tier used to select product terms.
///
/// Variants are declared worst to best so the derived `Ord` ranks
/// `Excellent` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBracket {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Result of resolving a presentation key, flagging when the documented
/// Excellent fallback was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketSelection {
    pub bracket: CreditBracket,
    pub defaulted: bool,
}

impl CreditBracket {
    pub const BEST_TO_WORST: [CreditBracket; 4] = [
        CreditBracket::Excellent,
        CreditBracket::Good,
        CreditBracket::Fair,
        CreditBracket::Poor,
    ];

    pub const WORST_TO_BEST: [CreditBracket; 4] = [
        CreditBracket::Poor,
        CreditBracket::Fair,
        CreditBracket::Good,
        CreditBracket::Excellent,
    ];

    /// Bracket every other bracket is compared against.
    pub const BEST: CreditBracket = CreditBracket::Excellent;

    pub fn from_score(score: u16) -> Result<Self, CalculatorError> {
        match score {
            300..=579 => Ok(CreditBracket::Poor),
            580..=669 => Ok(CreditBracket::Fair),
            670..=739 => Ok(CreditBracket::Good),
            740..=850 => Ok(CreditBracket::Excellent),
            other => Err(CalculatorError::ScoreOutOfRange(other)),
        }
    }

    pub const fn score_range(self) -> RangeInclusive<u16> {
        match self {
            CreditBracket::Poor => 300..=579,
            CreditBracket::Fair => 580..=669,
            CreditBracket::Good => 670..=739,
            CreditBracket::Excellent => 740..=850,
        }
    }

    pub fn min_score(self) -> u16 {
        *self.score_range().start()
    }

    pub fn max_score(self) -> u16 {
        *self.score_range().end()
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditBracket::Poor => "Poor",
            CreditBracket::Fair => "Fair",
            CreditBracket::Good => "Good",
            CreditBracket::Excellent => "Excellent",
        }
    }

    /// Key used by the calculator forms, e.g. `"740-850"`.
    pub const fn range_key(self) -> &'static str {
        match self {
            CreditBracket::Poor => "300-579",
            CreditBracket::Fair => "580-669",
            CreditBracket::Good => "670-739",
            CreditBracket::Excellent => "740-850",
        }
    }

    /// Resolves a form key, falling back to `Excellent` for anything
    /// unrecognised. The fallback is reported through `defaulted`.
    pub fn resolve_key(raw: &str) -> BracketSelection {
        match raw.parse::<CreditBracket>() {
            Ok(bracket) => BracketSelection {
                bracket,
                defaulted: false,
            },
            Err(_) => BracketSelection {
                bracket: CreditBracket::BEST,
                defaulted: true,
            },
        }
    }
}

impl FromStr for CreditBracket {
    type Err = CalculatorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        CreditBracket::WORST_TO_BEST
            .into_iter()
            .find(|bracket| {
                normalized == bracket.range_key() || normalized == bracket.label().to_ascii_lowercase()
            })
            .ok_or_else(|| CalculatorError::UnknownBracket(raw.trim().to_string()))
    }
}

impl fmt::Display for CreditBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.range_key())
    }
}
