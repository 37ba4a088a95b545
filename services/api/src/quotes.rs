use crate::infra::{parse_bracket, parse_insurance_kind, parse_location, parse_service};
use clap::{Args, Subcommand};
use credit_impact::calculators::{
    self, assess, compare, compare_card_payoff, compare_deposits, compare_premiums, plan,
    CardQuote, ComparisonRow, CostOfLiving, CreditBracket, DepositQuote, Impact, ImpactInputs,
    ImpactSummary, InsuranceKind, InsuranceQuote, LoanProduct, LoanRequest,
    MinimumPaymentPolicy, PaymentStrategy, PayoffOutcome, UtilityService,
};
use credit_impact::error::AppError;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Subcommand, Debug)]
pub(crate) enum QuoteCommand {
    /// Fixed-rate mortgage payments by credit bracket
    Mortgage(MortgageArgs),
    /// New or used auto loan payments by credit bracket
    Auto(AutoArgs),
    /// Credit card payoff time and interest by credit bracket
    Card(CardArgs),
    /// Auto or home insurance premiums by credit bracket
    Insurance(InsuranceArgs),
    /// Utility security deposits by credit bracket
    Utility(UtilityArgs),
    /// Yearly cost of a credit score compared with an exceptional score
    Impact(ImpactArgs),
    /// Steps and savings for moving between credit brackets
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
pub(crate) struct MortgageArgs {
    /// Amount borrowed
    #[arg(long)]
    pub(crate) principal: f64,
    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub(crate) term_years: u32,
    /// Highlight this bracket (name or range such as 670-739)
    #[arg(long, value_parser = parse_bracket)]
    pub(crate) bracket: Option<CreditBracket>,
    /// Write the comparison rows as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AutoArgs {
    /// Amount borrowed
    #[arg(long)]
    pub(crate) principal: f64,
    /// Loan term in months
    #[arg(long, default_value_t = 60)]
    pub(crate) term_months: u32,
    /// Price a used vehicle instead of a new one
    #[arg(long)]
    pub(crate) used: bool,
    /// Highlight this bracket (name or range such as 670-739)
    #[arg(long, value_parser = parse_bracket)]
    pub(crate) bracket: Option<CreditBracket>,
    /// Write the comparison rows as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CardArgs {
    /// Outstanding balance
    #[arg(long)]
    pub(crate) balance: f64,
    /// Fixed monthly payment (defaults to the minimum due)
    #[arg(long)]
    pub(crate) payment: Option<f64>,
    /// Highlight this bracket (name or range such as 670-739)
    #[arg(long, value_parser = parse_bracket)]
    pub(crate) bracket: Option<CreditBracket>,
    /// Write the comparison rows as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct InsuranceArgs {
    /// auto or home
    #[arg(long, value_parser = parse_insurance_kind, default_value = "auto")]
    pub(crate) kind: InsuranceKind,
    /// Vehicle or home value
    #[arg(long)]
    pub(crate) value: f64,
    /// Age of the primary driver
    #[arg(long, default_value_t = 35)]
    pub(crate) age: u32,
    /// Highlight this bracket (name or range such as 670-739)
    #[arg(long, value_parser = parse_bracket)]
    pub(crate) bracket: Option<CreditBracket>,
    /// Write the comparison rows as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct UtilityArgs {
    /// Typical monthly utility budget
    #[arg(long)]
    pub(crate) budget: f64,
    /// Service to connect; repeat for several (defaults to electric, gas, water, internet)
    #[arg(long = "service", value_parser = parse_service)]
    pub(crate) services: Vec<UtilityService>,
    /// low-cost, average or high-cost
    #[arg(long, value_parser = parse_location, default_value = "average")]
    pub(crate) location: CostOfLiving,
    /// Highlight this bracket (name or range such as 670-739)
    #[arg(long, value_parser = parse_bracket)]
    pub(crate) bracket: Option<CreditBracket>,
    /// Write the comparison rows as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImpactArgs {
    #[arg(long, default_value_t = 720)]
    pub(crate) score: u16,
    #[arg(long, default_value_t = 350_000.0)]
    pub(crate) home_price: f64,
    #[arg(long, default_value_t = 70_000.0)]
    pub(crate) down_payment: f64,
    #[arg(long, default_value_t = 30_000.0)]
    pub(crate) car_price: f64,
    #[arg(long, default_value_t = 5_000.0)]
    pub(crate) car_down_payment: f64,
    #[arg(long, default_value_t = 1_200.0)]
    pub(crate) annual_insurance: f64,
    /// Write the cost comparison as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    #[arg(long, value_parser = parse_bracket)]
    pub(crate) current: CreditBracket,
    #[arg(long, value_parser = parse_bracket, default_value = "excellent")]
    pub(crate) target: CreditBracket,
    /// Write the recommended strategies as CSV
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct LoanRow {
    pub(crate) bracket: &'static str,
    pub(crate) apr: f64,
    pub(crate) monthly_payment: f64,
    pub(crate) total_interest: f64,
    pub(crate) total_paid: f64,
    pub(crate) monthly_delta: f64,
    pub(crate) total_interest_delta: f64,
}

impl From<&ComparisonRow> for LoanRow {
    fn from(row: &ComparisonRow) -> Self {
        Self {
            bracket: row.bracket.range_key(),
            apr: row.apr,
            monthly_payment: cents(row.result.monthly_payment),
            total_interest: cents(row.result.total_interest),
            total_paid: cents(row.result.total_paid),
            monthly_delta: cents(row.monthly_delta),
            total_interest_delta: cents(row.total_interest_delta),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct CardRow {
    pub(crate) bracket: &'static str,
    pub(crate) apr: f64,
    pub(crate) annual_fee: f64,
    pub(crate) credit_limit: f64,
    pub(crate) monthly_payment: f64,
    /// Empty when the payment never clears the balance.
    pub(crate) months: Option<u32>,
    pub(crate) total_interest: Option<f64>,
}

impl From<&CardQuote> for CardRow {
    fn from(quote: &CardQuote) -> Self {
        Self {
            bracket: quote.bracket.range_key(),
            apr: quote.apr,
            annual_fee: quote.annual_fee,
            credit_limit: quote.credit_limit,
            monthly_payment: cents(quote.monthly_payment),
            months: quote.payoff.months(),
            total_interest: quote.payoff.total_interest().map(cents),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct InsuranceRow {
    pub(crate) bracket: &'static str,
    pub(crate) multiplier: f64,
    pub(crate) annual_premium: f64,
    pub(crate) monthly_premium: f64,
    pub(crate) extra_annual_cost: f64,
    pub(crate) surcharge_percent: f64,
}

impl From<&InsuranceQuote> for InsuranceRow {
    fn from(quote: &InsuranceQuote) -> Self {
        Self {
            bracket: quote.bracket.range_key(),
            multiplier: quote.multiplier,
            annual_premium: cents(quote.annual_premium),
            monthly_premium: cents(quote.monthly_premium),
            extra_annual_cost: cents(quote.extra_annual_cost),
            surcharge_percent: quote.surcharge_percent,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct DepositRow {
    pub(crate) bracket: &'static str,
    pub(crate) multiplier: f64,
    pub(crate) total: f64,
    pub(crate) extra_cost: f64,
}

impl From<&DepositQuote> for DepositRow {
    fn from(quote: &DepositQuote) -> Self {
        Self {
            bracket: quote.bracket.range_key(),
            multiplier: quote.multiplier,
            total: cents(quote.total),
            extra_cost: cents(quote.extra_cost),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct ImpactRow {
    pub(crate) category: &'static str,
    pub(crate) current: f64,
    pub(crate) exceptional: f64,
    pub(crate) difference: f64,
}

pub(crate) fn impact_rows(summary: &ImpactSummary) -> Vec<ImpactRow> {
    [
        ("mortgage_monthly", summary.mortgage_payment),
        ("auto_monthly", summary.auto_payment),
        ("insurance_annual", summary.annual_insurance),
    ]
    .into_iter()
    .map(|(category, comparison)| ImpactRow {
        category,
        current: cents(comparison.current),
        exceptional: cents(comparison.exceptional),
        difference: cents(comparison.difference),
    })
    .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct StrategyRow {
    pub(crate) priority: u8,
    pub(crate) title: &'static str,
    pub(crate) impact: Impact,
    pub(crate) timeframe: &'static str,
}

pub(crate) fn run_quote(command: QuoteCommand) -> Result<(), AppError> {
    match command {
        QuoteCommand::Mortgage(args) => {
            let request = LoanRequest::new(args.principal, args.term_years.saturating_mul(12));
            loan_table(LoanProduct::Mortgage, &request, args.bracket, args.csv)
        }
        QuoteCommand::Auto(args) => {
            let product = if args.used {
                LoanProduct::AutoUsed
            } else {
                LoanProduct::AutoNew
            };
            let request = LoanRequest::new(args.principal, args.term_months);
            loan_table(product, &request, args.bracket, args.csv)
        }
        QuoteCommand::Card(args) => card_table(args),
        QuoteCommand::Insurance(args) => insurance_table(args),
        QuoteCommand::Utility(args) => utility_table(args),
        QuoteCommand::Impact(args) => impact_report(args),
        QuoteCommand::Plan(args) => plan_report(args),
    }
}

fn loan_table(
    product: LoanProduct,
    request: &LoanRequest,
    highlight: Option<CreditBracket>,
    csv: bool,
) -> Result<(), AppError> {
    let rows: Vec<LoanRow> = compare(product, request, &CreditBracket::BEST_TO_WORST)?
        .iter()
        .map(LoanRow::from)
        .collect();
    if csv {
        return write_csv(io::stdout().lock(), &rows);
    }

    println!(
        "{} loan: {} over {} months",
        product.product().key(),
        money(request.principal),
        request.term_months
    );
    println!(
        "{:<10} {:>7} {:>12} {:>14} {:>12}",
        "bracket", "apr", "monthly", "interest", "vs best/mo"
    );
    for row in &rows {
        println!(
            "{:<10} {:>6.2}% {:>12} {:>14} {:>12}",
            row.bracket,
            row.apr,
            money(row.monthly_payment),
            money(row.total_interest),
            money(row.monthly_delta)
        );
    }

    if let Some(bracket) = highlight {
        let quote = calculators::quote(product, request, bracket)?;
        println!(
            "\n{}: {} more per month and {} more interest than excellent credit",
            bracket,
            money(quote.monthly_extra()),
            money(quote.extra_cost)
        );
    }
    Ok(())
}

fn card_table(args: CardArgs) -> Result<(), AppError> {
    let strategy = args
        .payment
        .map_or(PaymentStrategy::Minimum, PaymentStrategy::Fixed);
    let policy = MinimumPaymentPolicy::default();
    let quotes = compare_card_payoff(
        args.balance,
        strategy,
        &policy,
        &CreditBracket::BEST_TO_WORST,
    )?;
    let rows: Vec<CardRow> = quotes.iter().map(CardRow::from).collect();
    if args.csv {
        return write_csv(io::stdout().lock(), &rows);
    }

    println!("credit card balance: {}", money(args.balance));
    println!(
        "{:<10} {:>7} {:>8} {:>10} {:>10} {:>8} {:>12}",
        "bracket", "apr", "fee", "limit", "payment", "months", "interest"
    );
    for quote in &quotes {
        let (months, interest) = match quote.payoff {
            PayoffOutcome::Finite {
                months,
                total_interest,
            } => (months.to_string(), money(total_interest)),
            PayoffOutcome::NeverPaysOff { .. } => ("never".to_string(), "-".to_string()),
        };
        println!(
            "{:<10} {:>6.2}% {:>8} {:>10} {:>10} {:>8} {:>12}",
            quote.bracket.range_key(),
            quote.apr,
            money(quote.annual_fee),
            money(quote.credit_limit),
            money(quote.monthly_payment),
            months,
            interest
        );
    }

    if let Some(bracket) = args.bracket {
        let quote = calculators::card_quote(bracket, args.balance, strategy, &policy)?;
        match quote.payoff {
            PayoffOutcome::Finite { months, .. } => {
                println!("\n{bracket}: paid off in {months} months")
            }
            PayoffOutcome::NeverPaysOff { monthly_interest } => println!(
                "\n{bracket}: {} does not cover {} of monthly interest",
                money(quote.monthly_payment),
                money(monthly_interest)
            ),
        }
    }
    Ok(())
}

fn insurance_table(args: InsuranceArgs) -> Result<(), AppError> {
    let quotes = compare_premiums(
        args.kind,
        args.value,
        args.age,
        &CreditBracket::BEST_TO_WORST,
    )?;
    let rows: Vec<InsuranceRow> = quotes.iter().map(InsuranceRow::from).collect();
    if args.csv {
        return write_csv(io::stdout().lock(), &rows);
    }

    println!(
        "{} insurance on {} (age {})",
        args.kind.product().key(),
        money(args.value),
        args.age
    );
    println!(
        "{:<10} {:>6} {:>12} {:>10} {:>12}",
        "bracket", "x", "annual", "monthly", "surcharge"
    );
    for row in &rows {
        println!(
            "{:<10} {:>6.2} {:>12} {:>10} {:>11}%",
            row.bracket,
            row.multiplier,
            money(row.annual_premium),
            money(row.monthly_premium),
            row.surcharge_percent
        );
    }

    if let Some(bracket) = args.bracket {
        let quote = calculators::premium(bracket, args.kind, args.value, args.age)?;
        println!(
            "\n{bracket}: {} more per year than excellent credit",
            money(quote.extra_annual_cost)
        );
    }
    Ok(())
}

fn utility_table(args: UtilityArgs) -> Result<(), AppError> {
    let services = if args.services.is_empty() {
        UtilityService::DEFAULT_SELECTION.to_vec()
    } else {
        args.services
    };
    let quotes = compare_deposits(
        &services,
        args.budget,
        args.location,
        &CreditBracket::BEST_TO_WORST,
    )?;
    let rows: Vec<DepositRow> = quotes.iter().map(DepositRow::from).collect();
    if args.csv {
        return write_csv(io::stdout().lock(), &rows);
    }

    let names: Vec<&str> = services.iter().map(|service| service.key()).collect();
    println!(
        "utility deposits for {} on a {} monthly budget",
        names.join(", "),
        money(args.budget)
    );
    println!("{:<10} {:>6} {:>10}", "bracket", "x", "deposits");
    for row in &rows {
        println!(
            "{:<10} {:>6.1} {:>10}",
            row.bracket,
            row.multiplier,
            money(row.total)
        );
    }

    if let Some(bracket) = args.bracket {
        let quote = calculators::deposit_quote(bracket, &services, args.budget, args.location)?;
        for line in &quote.lines {
            println!(
                "  - {}: {} deposit on a {} bill",
                line.service.key(),
                money(line.deposit),
                money(line.monthly_base)
            );
        }
    }
    Ok(())
}

fn impact_report(args: ImpactArgs) -> Result<(), AppError> {
    let summary = assess(&ImpactInputs {
        score: args.score,
        home_price: args.home_price,
        down_payment: args.down_payment,
        car_price: args.car_price,
        car_down_payment: args.car_down_payment,
        annual_insurance: args.annual_insurance,
    })?;
    let rows = impact_rows(&summary);
    if args.csv {
        return write_csv(io::stdout().lock(), &rows);
    }

    println!("score {} ({})", summary.score, summary.tier.label());
    for row in &rows {
        println!(
            "- {}: {} vs {} ({} more)",
            row.category,
            money(row.current),
            money(row.exceptional),
            money(row.difference)
        );
    }
    println!(
        "- mortgage lifetime: {} more",
        money(summary.mortgage_lifetime_difference)
    );
    println!(
        "- auto loan lifetime: {} more",
        money(summary.auto_lifetime_difference)
    );
    println!(
        "- utility deposits: {} more",
        money(summary.utility_deposit_difference)
    );
    println!(
        "Extra cost per year: {}",
        money(summary.total_annual_extra)
    );
    Ok(())
}

fn plan_report(args: PlanArgs) -> Result<(), AppError> {
    let plan = plan(args.current, args.target);
    let rows: Vec<StrategyRow> = plan
        .strategies
        .iter()
        .map(|strategy| StrategyRow {
            priority: strategy.priority,
            title: strategy.title,
            impact: strategy.impact,
            timeframe: strategy.timeframe,
        })
        .collect();
    if args.csv {
        return write_csv(io::stdout().lock(), &rows);
    }

    println!("{} -> {}", plan.current, plan.target);
    if plan.is_achieved() {
        println!("{}", plan.timeframe);
        return Ok(());
    }
    println!(
        "{} points needed | {} | potential savings {}",
        plan.points_needed,
        plan.timeframe,
        money(plan.potential_savings)
    );
    println!("Strategies:");
    for row in &rows {
        println!(
            "  {}. {} ({:?} impact, {})",
            row.priority, row.title, row.impact, row.timeframe
        );
    }
    println!("Milestones:");
    for milestone in &plan.milestones {
        println!(
            "  {} ({}): {}",
            milestone.timeframe,
            milestone.points,
            milestone.actions.join("; ")
        );
    }
    Ok(())
}

pub(crate) fn write_csv<W, R>(out: W, rows: &[R]) -> Result<(), AppError>
where
    W: Write,
    R: Serialize,
{
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row).map_err(io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}

fn cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}
