use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bracket::CreditBracket;
use super::error::{ensure_amount, CalculatorError};
use super::rates::{lookup, ProductType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilityService {
    Electric,
    Gas,
    Water,
    Internet,
    Cable,
}

impl UtilityService {
    pub const ALL: [UtilityService; 5] = [
        UtilityService::Electric,
        UtilityService::Gas,
        UtilityService::Water,
        UtilityService::Internet,
        UtilityService::Cable,
    ];

    /// Services the deposit calculator selects when none are given.
    pub const DEFAULT_SELECTION: [UtilityService; 4] = [
        UtilityService::Electric,
        UtilityService::Gas,
        UtilityService::Water,
        UtilityService::Internet,
    ];

    /// Typical monthly bill: metered services take a share of the household
    /// budget, connectivity is a flat amount.
    pub fn monthly_base(self, monthly_budget: f64) -> f64 {
        match self {
            UtilityService::Electric => monthly_budget * 0.4,
            UtilityService::Gas => monthly_budget * 0.2,
            UtilityService::Water => monthly_budget * 0.15,
            UtilityService::Internet => 70.0,
            UtilityService::Cable => 80.0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            UtilityService::Electric => "electric",
            UtilityService::Gas => "gas",
            UtilityService::Water => "water",
            UtilityService::Internet => "internet",
            UtilityService::Cable => "cable",
        }
    }
}

impl FromStr for UtilityService {
    type Err = CalculatorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        UtilityService::ALL
            .into_iter()
            .find(|service| service.key() == normalized)
            .ok_or_else(|| CalculatorError::UnknownOption {
                kind: "utility service",
                value: raw.trim().to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostOfLiving {
    LowCost,
    #[default]
    Average,
    HighCost,
}

impl CostOfLiving {
    pub const fn multiplier(self) -> f64 {
        match self {
            CostOfLiving::LowCost => 0.8,
            CostOfLiving::Average => 1.0,
            CostOfLiving::HighCost => 1.3,
        }
    }
}

impl FromStr for CostOfLiving {
    type Err = CalculatorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low-cost" | "low_cost" | "low" => Ok(CostOfLiving::LowCost),
            "average" => Ok(CostOfLiving::Average),
            "high-cost" | "high_cost" | "high" => Ok(CostOfLiving::HighCost),
            other => Err(CalculatorError::UnknownOption {
                kind: "location",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepositLine {
    pub service: UtilityService,
    pub monthly_base: f64,
    pub deposit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositQuote {
    pub bracket: CreditBracket,
    pub multiplier: f64,
    pub location: CostOfLiving,
    pub lines: Vec<DepositLine>,
    pub total: f64,
    pub best_case_total: f64,
    pub extra_cost: f64,
}

fn deposit_multiplier(bracket: CreditBracket) -> f64 {
    lookup(ProductType::Utility, bracket)
        .multiplier()
        .unwrap_or(0.0)
}

fn total_deposit(
    bracket: CreditBracket,
    services: &[UtilityService],
    monthly_budget: f64,
    location: CostOfLiving,
) -> f64 {
    let factor = deposit_multiplier(bracket) * location.multiplier();
    services
        .iter()
        .map(|service| service.monthly_base(monthly_budget) * factor)
        .sum()
}

/// Deposits owed for each selected service.
pub fn deposit_quote(
    bracket: CreditBracket,
    services: &[UtilityService],
    monthly_budget: f64,
    location: CostOfLiving,
) -> Result<DepositQuote, CalculatorError> {
    let monthly_budget = ensure_amount("monthly_budget", monthly_budget)?;
    let multiplier = deposit_multiplier(bracket);
    let factor = multiplier * location.multiplier();

    let lines: Vec<DepositLine> = services
        .iter()
        .map(|service| {
            let monthly_base = service.monthly_base(monthly_budget);
            DepositLine {
                service: *service,
                monthly_base,
                deposit: monthly_base * factor,
            }
        })
        .collect();
    let total: f64 = lines.iter().map(|line| line.deposit).sum();
    let best_case_total = total_deposit(CreditBracket::BEST, services, monthly_budget, location);

    Ok(DepositQuote {
        bracket,
        multiplier,
        location,
        lines,
        total,
        best_case_total,
        extra_cost: total - best_case_total,
    })
}

pub fn compare_deposits(
    services: &[UtilityService],
    monthly_budget: f64,
    location: CostOfLiving,
    brackets: &[CreditBracket],
) -> Result<Vec<DepositQuote>, CalculatorError> {
    brackets
        .iter()
        .map(|bracket| deposit_quote(*bracket, services, monthly_budget, location))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poor_credit_pays_three_months_per_service() {
        let quote = deposit_quote(
            CreditBracket::Poor,
            &UtilityService::DEFAULT_SELECTION,
            200.0,
            CostOfLiving::Average,
        )
        .expect("valid inputs");

        let deposits: Vec<f64> = quote.lines.iter().map(|line| line.deposit).collect();
        let expected = [240.0, 120.0, 90.0, 210.0];
        for (actual, expected) in deposits.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
        }
        assert!((quote.total - 660.0).abs() < 1e-9);
        assert_eq!(quote.best_case_total, 0.0);
        assert!((quote.extra_cost - 660.0).abs() < 1e-9);
    }

    #[test]
    fn excellent_credit_waives_deposits() {
        let quote = deposit_quote(
            CreditBracket::Excellent,
            &UtilityService::ALL,
            350.0,
            CostOfLiving::HighCost,
        )
        .expect("valid inputs");
        assert_eq!(quote.total, 0.0);
        assert_eq!(quote.extra_cost, 0.0);
    }

    #[test]
    fn location_scales_deposits() {
        let low = deposit_quote(
            CreditBracket::Good,
            &[UtilityService::Cable],
            0.0,
            CostOfLiving::LowCost,
        )
        .expect("valid inputs");
        let high = deposit_quote(
            CreditBracket::Good,
            &[UtilityService::Cable],
            0.0,
            CostOfLiving::HighCost,
        )
        .expect("valid inputs");
        assert!((low.total - 64.0).abs() < 1e-9);
        assert!((high.total - 104.0).abs() < 1e-9);
    }

    #[test]
    fn no_services_means_no_deposit() {
        let rows = compare_deposits(&[], 200.0, CostOfLiving::Average, &CreditBracket::WORST_TO_BEST)
            .expect("valid inputs");
        assert!(rows.iter().all(|row| row.total == 0.0 && row.lines.is_empty()));
    }

    #[test]
    fn parses_form_values() {
        assert_eq!("high-cost".parse(), Ok(CostOfLiving::HighCost));
        assert_eq!("Internet".parse(), Ok(UtilityService::Internet));
        assert!("satellite".parse::<UtilityService>().is_err());
    }
}
