use credit_impact::calculators::{
    assess, calculate, compare, deposit_quote, lookup, lookup_by_key, monthly_payment,
    payoff_months, plan, premium, CostOfLiving, CreditBracket, ImpactInputs, InsuranceKind,
    LoanParameters, LoanProduct, LoanRequest, PayoffOutcome, ProductTerms, ProductType,
    PublishedSavings, UtilityService, MAX_SCORE, MIN_SCORE,
};

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

#[test]
fn published_mortgage_figures_hold_within_rounding() {
    let figures = PublishedSavings::FIGURES;
    let excellent = monthly_payment(300_000.0, 5.8, 360).expect("valid loan");
    let poor = monthly_payment(300_000.0, 7.5, 360).expect("valid loan");

    assert!(close(excellent, 1_760.26, 0.01), "{excellent}");
    assert!(close(poor, 2_097.64, 0.01), "{poor}");

    // Published marketing numbers are rounded; stay within 2.5%.
    assert!(close(excellent, figures.mortgage_monthly_excellent, figures.mortgage_monthly_excellent * 0.025));
    assert!(close(poor, figures.mortgage_monthly_poor, figures.mortgage_monthly_poor * 0.025));
    let lifetime = (poor - excellent) * 360.0;
    assert!(close(lifetime, figures.mortgage_lifetime, figures.mortgage_lifetime * 0.025));
}

#[test]
fn payments_are_positive_and_never_below_principal() {
    for principal in [1.0, 12_500.0, 300_000.0] {
        for rate in [0.0, 0.5, 5.8, 29.99] {
            for term in [1, 12, 60, 360] {
                let result = calculate(
                    &LoanParameters::new(principal, rate, term).expect("valid parameters"),
                )
                .expect("calculates");
                assert!(result.monthly_payment > 0.0);
                assert!(result.total_paid >= principal - 1e-6);
                assert!(result.total_interest >= -1e-6);
            }
        }
    }
}

#[test]
fn zero_rate_is_straight_line() {
    let payment = monthly_payment(12_000.0, 0.0, 48).expect("valid loan");
    assert!(close(payment, 250.0, 1e-9));
}

#[test]
fn payment_rises_strictly_with_rate() {
    let rates = [0.0, 1.0, 4.21, 5.8, 7.5, 14.39, 20.99];
    let payments: Vec<f64> = rates
        .iter()
        .map(|rate| monthly_payment(25_000.0, *rate, 60).expect("valid loan"))
        .collect();
    assert!(payments.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn every_score_maps_to_exactly_one_bracket() {
    for score in MIN_SCORE..=MAX_SCORE {
        let bracket = CreditBracket::from_score(score).expect("score in range");
        let owners = CreditBracket::WORST_TO_BEST
            .iter()
            .filter(|candidate| candidate.score_range().contains(&score))
            .count();
        assert_eq!(owners, 1, "score {score}");
        assert!(bracket.score_range().contains(&score));
    }
    assert_eq!(CreditBracket::from_score(579).ok(), Some(CreditBracket::Poor));
    assert_eq!(CreditBracket::from_score(580).ok(), Some(CreditBracket::Fair));
    assert!(CreditBracket::from_score(299).is_err());
    assert!(CreditBracket::from_score(851).is_err());
}

#[test]
fn excellent_is_the_cheapest_row_for_every_product() {
    let request = LoanRequest::new(42_000.0, 72);
    for product in [LoanProduct::Mortgage, LoanProduct::AutoNew, LoanProduct::AutoUsed] {
        let rows = compare(product, &request, &CreditBracket::WORST_TO_BEST).expect("valid request");
        let best = rows
            .iter()
            .find(|row| row.bracket == CreditBracket::Excellent)
            .expect("excellent row");
        for row in &rows {
            assert!(best.result.monthly_payment <= row.result.monthly_payment);
            assert!(row.monthly_delta >= 0.0);
        }
    }
}

#[test]
fn comparison_is_deterministic_and_keeps_caller_order() {
    let request = LoanRequest::new(300_000.0, 360);
    let order = [CreditBracket::Good, CreditBracket::Poor, CreditBracket::Fair];
    let first = compare(LoanProduct::Mortgage, &request, &order).expect("valid request");
    let second = compare(LoanProduct::Mortgage, &request, &order).expect("valid request");

    assert_eq!(first, second);
    let brackets: Vec<_> = first.iter().map(|row| row.bracket).collect();
    assert_eq!(brackets, order);
    assert!(close(first[1].monthly_delta, 337.38, 0.01));
}

#[test]
fn degenerate_card_payment_never_pays_off() {
    let outcome = payoff_months(5_000.0, 24.99, 25.0).expect("valid inputs");
    assert!(matches!(outcome, PayoffOutcome::NeverPaysOff { .. }));
    assert_eq!(outcome.months(), None);
}

#[test]
fn unknown_bracket_keys_fall_back_to_excellent_terms() {
    let (terms, defaulted) = lookup_by_key(ProductType::CreditCard, "850+");
    assert!(defaulted);
    assert_eq!(terms, lookup(ProductType::CreditCard, CreditBracket::Excellent));

    let (terms, defaulted) = lookup_by_key(ProductType::Mortgage, "580-669");
    assert!(!defaulted);
    assert_eq!(terms, ProductTerms::Loan { apr: 6.8 });
}

#[test]
fn poor_credit_costs_more_across_every_calculator() {
    let insurance = premium(CreditBracket::Poor, InsuranceKind::Home, 400_000.0, 40).expect("valid value");
    assert!(close(insurance.annual_premium, 2_800.0, 1e-9));
    assert!(close(insurance.extra_annual_cost, 1_200.0, 1e-9));

    let deposits = deposit_quote(
        CreditBracket::Fair,
        &[UtilityService::Electric, UtilityService::Cable],
        250.0,
        CostOfLiving::HighCost,
    )
    .expect("valid budget");
    // (100 + 80) * 2.0 * 1.3
    assert!(close(deposits.total, 468.0, 1e-9));
    assert!(close(deposits.extra_cost, 468.0, 1e-9));

    let summary = assess(&ImpactInputs::default()).expect("defaults are valid");
    assert!(close(summary.total_annual_extra, 2_229.816, 1e-3));

    let improvement = plan(CreditBracket::Poor, CreditBracket::Excellent);
    assert_eq!(improvement.points_needed, 161);
    assert_eq!(improvement.timeframe, "12-18 months");
    assert_eq!(improvement.strategies.len(), 6);
    assert_eq!(improvement.milestones.len(), 3);
}
