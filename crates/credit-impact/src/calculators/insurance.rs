use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bracket::CreditBracket;
use super::error::{ensure_amount, CalculatorError};
use super::rates::{lookup, ProductType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceKind {
    Auto,
    Home,
}

impl InsuranceKind {
    pub const fn product(self) -> ProductType {
        match self {
            InsuranceKind::Auto => ProductType::InsuranceAuto,
            InsuranceKind::Home => ProductType::InsuranceHome,
        }
    }

    /// Share of the insured value charged per year before the credit
    /// multiplier. Age only matters for auto cover.
    pub const fn base_rate(self, age: u32) -> f64 {
        match self {
            InsuranceKind::Auto if age < 25 => 0.08,
            InsuranceKind::Auto if age < 65 => 0.05,
            InsuranceKind::Auto => 0.06,
            InsuranceKind::Home => 0.004,
        }
    }
}

impl FromStr for InsuranceKind {
    type Err = CalculatorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(InsuranceKind::Auto),
            "home" => Ok(InsuranceKind::Home),
            other => Err(CalculatorError::UnknownOption {
                kind: "insurance kind",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InsuranceQuote {
    pub kind: InsuranceKind,
    pub bracket: CreditBracket,
    pub multiplier: f64,
    pub annual_premium: f64,
    pub monthly_premium: f64,
    pub best_annual_premium: f64,
    pub extra_annual_cost: f64,
    /// Premium above the best bracket, as a whole-number percentage.
    pub surcharge_percent: f64,
}

fn bracket_multiplier(kind: InsuranceKind, bracket: CreditBracket) -> f64 {
    lookup(kind.product(), bracket).multiplier().unwrap_or(1.0)
}

pub fn premium(
    bracket: CreditBracket,
    kind: InsuranceKind,
    insured_value: f64,
    age: u32,
) -> Result<InsuranceQuote, CalculatorError> {
    let insured_value = ensure_amount("insured_value", insured_value)?;
    let base = insured_value * kind.base_rate(age);
    let multiplier = bracket_multiplier(kind, bracket);
    let best_multiplier = bracket_multiplier(kind, CreditBracket::BEST);

    let annual_premium = base * multiplier;
    let best_annual_premium = base * best_multiplier;

    Ok(InsuranceQuote {
        kind,
        bracket,
        multiplier,
        annual_premium,
        monthly_premium: annual_premium / 12.0,
        best_annual_premium,
        extra_annual_cost: annual_premium - best_annual_premium,
        surcharge_percent: ((multiplier / best_multiplier - 1.0) * 100.0).round(),
    })
}

pub fn compare_premiums(
    kind: InsuranceKind,
    insured_value: f64,
    age: u32,
    brackets: &[CreditBracket],
) -> Result<Vec<InsuranceQuote>, CalculatorError> {
    brackets
        .iter()
        .map(|bracket| premium(*bracket, kind, insured_value, age))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_base_rate_depends_on_driver_age() {
        assert_eq!(InsuranceKind::Auto.base_rate(24), 0.08);
        assert_eq!(InsuranceKind::Auto.base_rate(25), 0.05);
        assert_eq!(InsuranceKind::Auto.base_rate(64), 0.05);
        assert_eq!(InsuranceKind::Auto.base_rate(65), 0.06);
        assert_eq!(InsuranceKind::Home.base_rate(19), 0.004);
    }

    #[test]
    fn poor_credit_auto_premium_carries_surcharge() {
        let quote = premium(CreditBracket::Poor, InsuranceKind::Auto, 25_000.0, 35)
            .expect("valid inputs");
        assert!((quote.best_annual_premium - 1_250.0).abs() < 1e-9);
        assert!((quote.annual_premium - 2_187.5).abs() < 1e-9);
        assert!((quote.extra_annual_cost - 937.5).abs() < 1e-9);
        assert_eq!(quote.surcharge_percent, 75.0);
    }

    #[test]
    fn home_premium_ignores_age() {
        let young = premium(CreditBracket::Good, InsuranceKind::Home, 300_000.0, 22)
            .expect("valid inputs");
        let older = premium(CreditBracket::Good, InsuranceKind::Home, 300_000.0, 70)
            .expect("valid inputs");
        assert_eq!(young, older);
        assert!((young.annual_premium - 1_380.0).abs() < 1e-9);
    }

    #[test]
    fn excellent_pays_the_base_premium() {
        let rows = compare_premiums(
            InsuranceKind::Auto,
            18_000.0,
            40,
            &CreditBracket::BEST_TO_WORST,
        )
        .expect("valid inputs");
        assert_eq!(rows[0].extra_annual_cost, 0.0);
        assert!(rows.windows(2).all(|pair| pair[0].annual_premium < pair[1].annual_premium));
    }

    #[test]
    fn rejects_negative_insured_value() {
        assert!(matches!(
            premium(CreditBracket::Fair, InsuranceKind::Home, -1.0, 30),
            Err(CalculatorError::InvalidAmount { field: "insured_value", .. })
        ));
    }
}
