use serde::{Deserialize, Serialize};

use super::amortization::monthly_payment;
use super::bracket::{MAX_SCORE, MIN_SCORE};
use super::error::{ensure_amount, CalculatorError};

const MORTGAGE_TERM_MONTHS: u32 = 30 * 12;
const AUTO_TERM_MONTHS: u32 = 5 * 12;

/// Five-tier score scale used by the overall impact calculator. It is finer
/// than [`CreditBracket`](super::CreditBracket) at the top end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Poor,
    Fair,
    Good,
    VeryGood,
    Exceptional,
}

impl ScoreTier {
    pub fn from_score(score: u16) -> Result<Self, CalculatorError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(CalculatorError::ScoreOutOfRange(score));
        }
        Ok(match score {
            800.. => ScoreTier::Exceptional,
            740.. => ScoreTier::VeryGood,
            670.. => ScoreTier::Good,
            580.. => ScoreTier::Fair,
            _ => ScoreTier::Poor,
        })
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreTier::Poor => "Poor",
            ScoreTier::Fair => "Fair",
            ScoreTier::Good => "Good",
            ScoreTier::VeryGood => "Very Good",
            ScoreTier::Exceptional => "Exceptional",
        }
    }

    pub const fn impact(self) -> CreditImpact {
        match self {
            ScoreTier::Exceptional => CreditImpact {
                mortgage_rate: 6.5,
                auto_rate: 4.2,
                insurance_multiplier: 0.85,
                utility_deposit: 0.0,
                credit_card_rate: 16.9,
                personal_loan_rate: 6.5,
            },
            ScoreTier::VeryGood => CreditImpact {
                mortgage_rate: 6.8,
                auto_rate: 5.1,
                insurance_multiplier: 0.95,
                utility_deposit: 50.0,
                credit_card_rate: 19.9,
                personal_loan_rate: 8.5,
            },
            ScoreTier::Good => CreditImpact {
                mortgage_rate: 7.2,
                auto_rate: 6.8,
                insurance_multiplier: 1.1,
                utility_deposit: 150.0,
                credit_card_rate: 22.9,
                personal_loan_rate: 12.5,
            },
            ScoreTier::Fair => CreditImpact {
                mortgage_rate: 8.5,
                auto_rate: 9.2,
                insurance_multiplier: 1.3,
                utility_deposit: 300.0,
                credit_card_rate: 26.9,
                personal_loan_rate: 18.5,
            },
            ScoreTier::Poor => CreditImpact {
                mortgage_rate: 10.2,
                auto_rate: 12.5,
                insurance_multiplier: 1.6,
                utility_deposit: 500.0,
                credit_card_rate: 29.9,
                personal_loan_rate: 25.0,
            },
        }
    }
}

/// Terms a borrower in a tier can expect across products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditImpact {
    pub mortgage_rate: f64,
    pub auto_rate: f64,
    pub insurance_multiplier: f64,
    pub utility_deposit: f64,
    pub credit_card_rate: f64,
    pub personal_loan_rate: f64,
}

/// Calculator form values. Missing fields take the form's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactInputs {
    pub score: u16,
    pub home_price: f64,
    pub down_payment: f64,
    pub car_price: f64,
    pub car_down_payment: f64,
    pub annual_insurance: f64,
}

impl Default for ImpactInputs {
    fn default() -> Self {
        Self {
            score: 720,
            home_price: 350_000.0,
            down_payment: 70_000.0,
            car_price: 30_000.0,
            car_down_payment: 5_000.0,
            annual_insurance: 1_200.0,
        }
    }
}

/// Monthly (or annual, for insurance) cost at the caller's tier versus the
/// Exceptional tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostComparison {
    pub current: f64,
    pub exceptional: f64,
    pub difference: f64,
}

impl CostComparison {
    fn new(current: f64, exceptional: f64) -> Self {
        Self {
            current,
            exceptional,
            difference: current - exceptional,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactSummary {
    pub score: u16,
    pub tier: ScoreTier,
    pub terms: CreditImpact,
    pub mortgage_loan: f64,
    pub mortgage_payment: CostComparison,
    pub mortgage_lifetime_difference: f64,
    pub auto_loan: f64,
    pub auto_payment: CostComparison,
    pub auto_lifetime_difference: f64,
    pub annual_insurance: CostComparison,
    pub utility_deposit_difference: f64,
    pub total_annual_extra: f64,
}

pub fn assess(inputs: &ImpactInputs) -> Result<ImpactSummary, CalculatorError> {
    let tier = ScoreTier::from_score(inputs.score)?;
    let terms = tier.impact();
    let best = ScoreTier::Exceptional.impact();

    let home_price = ensure_amount("home_price", inputs.home_price)?;
    let down_payment = ensure_amount("down_payment", inputs.down_payment)?;
    let car_price = ensure_amount("car_price", inputs.car_price)?;
    let car_down_payment = ensure_amount("car_down_payment", inputs.car_down_payment)?;
    let annual_insurance = ensure_amount("annual_insurance", inputs.annual_insurance)?;

    let mortgage_loan = home_price - down_payment;
    let mortgage_payment = CostComparison::new(
        monthly_payment(mortgage_loan, terms.mortgage_rate, MORTGAGE_TERM_MONTHS)?,
        monthly_payment(mortgage_loan, best.mortgage_rate, MORTGAGE_TERM_MONTHS)?,
    );

    let auto_loan = car_price - car_down_payment;
    let auto_payment = CostComparison::new(
        monthly_payment(auto_loan, terms.auto_rate, AUTO_TERM_MONTHS)?,
        monthly_payment(auto_loan, best.auto_rate, AUTO_TERM_MONTHS)?,
    );

    let insurance = CostComparison::new(
        annual_insurance * terms.insurance_multiplier,
        annual_insurance * best.insurance_multiplier,
    );

    Ok(ImpactSummary {
        score: inputs.score,
        tier,
        terms,
        mortgage_loan,
        mortgage_payment,
        mortgage_lifetime_difference: mortgage_payment.difference
            * f64::from(MORTGAGE_TERM_MONTHS),
        auto_loan,
        auto_payment,
        auto_lifetime_difference: auto_payment.difference * f64::from(AUTO_TERM_MONTHS),
        annual_insurance: insurance,
        utility_deposit_difference: terms.utility_deposit - best.utility_deposit,
        total_annual_extra: mortgage_payment.difference * 12.0
            + auto_payment.difference * 12.0
            + insurance.difference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_split_at_published_thresholds() {
        assert_eq!(ScoreTier::from_score(300), Ok(ScoreTier::Poor));
        assert_eq!(ScoreTier::from_score(579), Ok(ScoreTier::Poor));
        assert_eq!(ScoreTier::from_score(580), Ok(ScoreTier::Fair));
        assert_eq!(ScoreTier::from_score(670), Ok(ScoreTier::Good));
        assert_eq!(ScoreTier::from_score(740), Ok(ScoreTier::VeryGood));
        assert_eq!(ScoreTier::from_score(799), Ok(ScoreTier::VeryGood));
        assert_eq!(ScoreTier::from_score(800), Ok(ScoreTier::Exceptional));
        assert_eq!(
            ScoreTier::from_score(900),
            Err(CalculatorError::ScoreOutOfRange(900))
        );
    }

    #[test]
    fn default_household_in_good_tier() {
        let summary = assess(&ImpactInputs::default()).expect("valid inputs");
        assert_eq!(summary.tier, ScoreTier::Good);
        assert_eq!(summary.mortgage_loan, 280_000.0);
        assert!((summary.mortgage_payment.difference - 130.8165).abs() < 1e-3);
        assert!((summary.auto_payment.difference - 30.0015).abs() < 1e-3);
        assert!((summary.annual_insurance.difference - 300.0).abs() < 1e-9);
        assert!((summary.total_annual_extra - 2_229.816).abs() < 1e-2);
        assert_eq!(summary.utility_deposit_difference, 150.0);
    }

    #[test]
    fn exceptional_tier_pays_nothing_extra() {
        let inputs = ImpactInputs {
            score: 812,
            ..ImpactInputs::default()
        };
        let summary = assess(&inputs).expect("valid inputs");
        assert_eq!(summary.total_annual_extra, 0.0);
        assert_eq!(summary.mortgage_lifetime_difference, 0.0);
    }

    #[test]
    fn extra_cost_shrinks_as_tier_improves() {
        let extras: Vec<f64> = [400, 600, 700, 760, 820]
            .into_iter()
            .map(|score| {
                assess(&ImpactInputs {
                    score,
                    ..ImpactInputs::default()
                })
                .expect("valid inputs")
                .total_annual_extra
            })
            .collect();
        assert!(extras.windows(2).all(|pair| pair[0] > pair[1]), "{extras:?}");
    }

    #[test]
    fn down_payment_above_price_is_rejected() {
        let inputs = ImpactInputs {
            down_payment: 400_000.0,
            ..ImpactInputs::default()
        };
        assert!(matches!(
            assess(&inputs),
            Err(CalculatorError::InvalidPrincipal(_))
        ));
    }
}
