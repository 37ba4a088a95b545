use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bracket::CreditBracket;
use super::error::CalculatorError;

/// Every product the site prices by credit bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Mortgage,
    AutoNew,
    AutoUsed,
    CreditCard,
    InsuranceAuto,
    InsuranceHome,
    Utility,
}

impl ProductType {
    pub const ALL: [ProductType; 7] = [
        ProductType::Mortgage,
        ProductType::AutoNew,
        ProductType::AutoUsed,
        ProductType::CreditCard,
        ProductType::InsuranceAuto,
        ProductType::InsuranceHome,
        ProductType::Utility,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ProductType::Mortgage => "mortgage",
            ProductType::AutoNew => "auto-new",
            ProductType::AutoUsed => "auto-used",
            ProductType::CreditCard => "credit-card",
            ProductType::InsuranceAuto => "insurance-auto",
            ProductType::InsuranceHome => "insurance-home",
            ProductType::Utility => "utility",
        }
    }

    /// Narrows to the products that amortize with a fixed monthly payment.
    pub const fn as_loan(self) -> Option<LoanProduct> {
        match self {
            ProductType::Mortgage => Some(LoanProduct::Mortgage),
            ProductType::AutoNew => Some(LoanProduct::AutoNew),
            ProductType::AutoUsed => Some(LoanProduct::AutoUsed),
            _ => None,
        }
    }
}

impl FromStr for ProductType {
    type Err = CalculatorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        ProductType::ALL
            .into_iter()
            .find(|product| product.key() == normalized)
            .ok_or_else(|| CalculatorError::UnknownOption {
                kind: "product",
                value: raw.trim().to_string(),
            })
    }
}

/// Fixed-payment loan products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanProduct {
    Mortgage,
    AutoNew,
    AutoUsed,
}

impl LoanProduct {
    pub const fn product(self) -> ProductType {
        match self {
            LoanProduct::Mortgage => ProductType::Mortgage,
            LoanProduct::AutoNew => ProductType::AutoNew,
            LoanProduct::AutoUsed => ProductType::AutoUsed,
        }
    }

    /// Term the calculator pages open with.
    pub const fn default_term_months(self) -> u32 {
        match self {
            LoanProduct::Mortgage => 360,
            LoanProduct::AutoNew | LoanProduct::AutoUsed => 60,
        }
    }

    pub const fn apr(self, bracket: CreditBracket) -> f64 {
        use CreditBracket::{Excellent, Fair, Good, Poor};

        match (self, bracket) {
            (LoanProduct::Mortgage, Poor) => 7.5,
            (LoanProduct::Mortgage, Fair) => 6.8,
            (LoanProduct::Mortgage, Good) => 6.2,
            (LoanProduct::Mortgage, Excellent) => 5.8,

            (LoanProduct::AutoNew, Poor) => 14.39,
            (LoanProduct::AutoNew, Fair) => 9.75,
            (LoanProduct::AutoNew, Good) => 6.4,
            (LoanProduct::AutoNew, Excellent) => 4.21,

            (LoanProduct::AutoUsed, Poor) => 20.99,
            (LoanProduct::AutoUsed, Fair) => 15.24,
            (LoanProduct::AutoUsed, Good) => 10.48,
            (LoanProduct::AutoUsed, Excellent) => 7.71,
        }
    }
}

/// Terms a product carries for one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductTerms {
    Loan {
        apr: f64,
    },
    Card {
        apr: f64,
        annual_fee: f64,
        credit_limit: f64,
    },
    Multiplier {
        multiplier: f64,
    },
}

/// One row of the published rate sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateEntry {
    pub product: ProductType,
    pub bracket: CreditBracket,
    pub bracket_key: &'static str,
    pub terms: ProductTerms,
}

/// Canonical terms for a product in a bracket.
pub const fn lookup(product: ProductType, bracket: CreditBracket) -> ProductTerms {
    use CreditBracket::{Excellent, Fair, Good, Poor};
    use ProductType::*;

    match (product, bracket) {
        (Mortgage, _) => ProductTerms::Loan {
            apr: LoanProduct::Mortgage.apr(bracket),
        },
        (AutoNew, _) => ProductTerms::Loan {
            apr: LoanProduct::AutoNew.apr(bracket),
        },
        (AutoUsed, _) => ProductTerms::Loan {
            apr: LoanProduct::AutoUsed.apr(bracket),
        },

        (CreditCard, Poor) => ProductTerms::Card {
            apr: 29.99,
            annual_fee: 99.0,
            credit_limit: 500.0,
        },
        (CreditCard, Fair) => ProductTerms::Card {
            apr: 24.99,
            annual_fee: 39.0,
            credit_limit: 2_000.0,
        },
        (CreditCard, Good) => ProductTerms::Card {
            apr: 19.99,
            annual_fee: 0.0,
            credit_limit: 5_000.0,
        },
        (CreditCard, Excellent) => ProductTerms::Card {
            apr: 16.99,
            annual_fee: 0.0,
            credit_limit: 10_000.0,
        },

        (InsuranceAuto | InsuranceHome, Poor) => ProductTerms::Multiplier { multiplier: 1.75 },
        (InsuranceAuto | InsuranceHome, Fair) => ProductTerms::Multiplier { multiplier: 1.45 },
        (InsuranceAuto | InsuranceHome, Good) => ProductTerms::Multiplier { multiplier: 1.15 },
        (InsuranceAuto | InsuranceHome, Excellent) => ProductTerms::Multiplier { multiplier: 1.0 },

        (Utility, Poor) => ProductTerms::Multiplier { multiplier: 3.0 },
        (Utility, Fair) => ProductTerms::Multiplier { multiplier: 2.0 },
        (Utility, Good) => ProductTerms::Multiplier { multiplier: 1.0 },
        (Utility, Excellent) => ProductTerms::Multiplier { multiplier: 0.0 },
    }
}

/// Looks up terms by form key, applying the Excellent fallback for unknown
/// keys. The second element reports whether the fallback was used.
pub fn lookup_by_key(product: ProductType, bracket_key: &str) -> (ProductTerms, bool) {
    let selection = CreditBracket::resolve_key(bracket_key);
    (lookup(product, selection.bracket), selection.defaulted)
}

/// The full rate sheet, product by product, best bracket first.
pub fn schedule() -> Vec<RateEntry> {
    ProductType::ALL
        .into_iter()
        .flat_map(|product| {
            CreditBracket::BEST_TO_WORST
                .into_iter()
                .map(move |bracket| RateEntry {
                    product,
                    bracket,
                    bracket_key: bracket.range_key(),
                    terms: lookup(product, bracket),
                })
        })
        .collect()
}

impl ProductTerms {
    pub fn apr(&self) -> Option<f64> {
        match self {
            ProductTerms::Loan { apr } | ProductTerms::Card { apr, .. } => Some(*apr),
            ProductTerms::Multiplier { .. } => None,
        }
    }

    pub fn multiplier(&self) -> Option<f64> {
        match self {
            ProductTerms::Multiplier { multiplier } => Some(*multiplier),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_referentially_stable() {
        for product in ProductType::ALL {
            for bracket in CreditBracket::WORST_TO_BEST {
                assert_eq!(lookup(product, bracket), lookup(product, bracket));
            }
        }
    }

    #[test]
    fn better_brackets_never_cost_more() {
        for product in ProductType::ALL {
            let costs: Vec<f64> = CreditBracket::WORST_TO_BEST
                .into_iter()
                .map(|bracket| {
                    let terms = lookup(product, bracket);
                    terms.apr().or(terms.multiplier()).expect("numeric terms")
                })
                .collect();
            assert!(
                costs.windows(2).all(|pair| pair[0] >= pair[1]),
                "{} costs should fall as brackets improve: {costs:?}",
                product.key()
            );
        }
    }

    #[test]
    fn unknown_key_uses_excellent_terms() {
        let (terms, defaulted) = lookup_by_key(ProductType::CreditCard, "800+");
        assert!(defaulted);
        assert_eq!(terms, lookup(ProductType::CreditCard, CreditBracket::Excellent));
    }

    #[test]
    fn schedule_covers_every_pair() {
        let rows = schedule();
        assert_eq!(rows.len(), ProductType::ALL.len() * 4);
        assert_eq!(rows[0].product, ProductType::Mortgage);
        assert_eq!(rows[0].bracket, CreditBracket::Excellent);
        assert_eq!(rows[0].bracket_key, "740-850");
    }

    #[test]
    fn only_amortizing_products_narrow_to_loans() {
        assert_eq!(ProductType::AutoUsed.as_loan(), Some(LoanProduct::AutoUsed));
        assert_eq!(ProductType::CreditCard.as_loan(), None);
        assert_eq!("insurance-home".parse(), Ok(ProductType::InsuranceHome));
    }
}
