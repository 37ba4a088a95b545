//! Credit-tier financial calculators.
//!
//! Every function here is pure: no I/O, no logging and no shared state, so
//! identical inputs always produce bit-identical results.

pub mod amortization;
pub mod bracket;
pub mod comparison;
pub mod error;
pub mod impact;
pub mod insurance;
pub mod payoff;
pub mod planner;
pub mod rates;
pub mod utility;

pub use amortization::{calculate, monthly_payment, monthly_rate, CalculationResult, LoanParameters};
pub use bracket::{BracketSelection, CreditBracket, MAX_SCORE, MIN_SCORE};
pub use comparison::{compare, quote, ComparisonRow, LoanQuote, LoanRequest};
pub use error::CalculatorError;
pub use impact::{assess, CostComparison, CreditImpact, ImpactInputs, ImpactSummary, ScoreTier};
pub use insurance::{compare_premiums, premium, InsuranceKind, InsuranceQuote};
pub use payoff::{
    card_quote, compare_card_payoff, payoff_months, CardQuote, MinimumPaymentPolicy,
    PaymentStrategy, PayoffOutcome,
};
pub use planner::{plan, Impact, ImprovementPlan, Milestone, PublishedSavings, Strategy};
pub use rates::{lookup, lookup_by_key, schedule, LoanProduct, ProductTerms, ProductType, RateEntry};
pub use utility::{
    compare_deposits, deposit_quote, CostOfLiving, DepositLine, DepositQuote, UtilityService,
};
