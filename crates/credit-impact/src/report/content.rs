use crate::calculators::{CreditBracket, LoanProduct, PublishedSavings};

pub const SITE_NAME: &str = "InterestRateCalculators.com";
pub const SITE_URL: &str = "https://interestratecalculators.com";
pub const REPORT_TITLE: &str = "Credit Improvement Report";

/// Colour roles used by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Brand,
    Heading,
    Body,
    Muted,
    Success,
}

impl Tone {
    /// RGB components in `0.0..=1.0`.
    pub const fn rgb(self) -> (f32, f32, f32) {
        match self {
            Tone::Brand => (0.145, 0.388, 0.922),
            Tone::Heading => (0.122, 0.161, 0.216),
            Tone::Body => (0.294, 0.333, 0.388),
            Tone::Muted => (0.420, 0.447, 0.502),
            Tone::Success => (0.020, 0.588, 0.412),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub tone: Tone,
}

impl TextStyle {
    pub const fn new(size: f32, tone: Tone) -> Self {
        Self { size, tone }
    }
}

const BRAND: TextStyle = TextStyle::new(24.0, Tone::Brand);
const TAGLINE: TextStyle = TextStyle::new(12.0, Tone::Muted);
const TITLE: TextStyle = TextStyle::new(28.0, Tone::Heading);
const SUBTITLE: TextStyle = TextStyle::new(16.0, Tone::Body);
const SECTION: TextStyle = TextStyle::new(18.0, Tone::Heading);
const HEADING: TextStyle = TextStyle::new(14.0, Tone::Heading);
const STRATEGY: TextStyle = TextStyle::new(14.0, Tone::Brand);
const MILESTONE: TextStyle = TextStyle::new(14.0, Tone::Success);
const FIGURE: TextStyle = TextStyle::new(12.0, Tone::Success);
pub(crate) const BODY: TextStyle = TextStyle::new(11.0, Tone::Body);
pub(crate) const FOOTER: TextStyle = TextStyle::new(10.0, Tone::Muted);

/// One element of the document, positioned `gap` millimetres below the
/// previous element's first line.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Line {
        text: String,
        style: TextStyle,
        indent: f32,
        gap: f32,
    },
    /// Text wrapped to the page width.
    Paragraph {
        text: String,
        style: TextStyle,
        gap: f32,
    },
    PageBreak,
}

impl Block {
    fn line(gap: f32, style: TextStyle, text: impl Into<String>) -> Self {
        Block::Line {
            text: text.into(),
            style,
            indent: 0.0,
            gap,
        }
    }

    fn item(gap: f32, indent: f32, style: TextStyle, text: impl Into<String>) -> Self {
        Block::Line {
            text: text.into(),
            style,
            indent,
            gap,
        }
    }

    fn paragraph(gap: f32, style: TextStyle, text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            style,
            gap,
        }
    }
}

/// The free credit improvement report, addressed to one reader.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditReport {
    pub recipient: String,
    pub blocks: Vec<Block>,
}

impl CreditReport {
    pub fn personalized(name: &str) -> Self {
        let recipient = name.trim().to_string();
        let mut blocks = Vec::new();
        blocks.extend(cover(&recipient));
        blocks.push(Block::PageBreak);
        blocks.extend(strategies());
        blocks.push(Block::PageBreak);
        blocks.extend(timeline());
        blocks.extend(savings());

        Self { recipient, blocks }
    }

    pub fn title(&self) -> String {
        format!("{REPORT_TITLE} - {}", self.recipient)
    }
}

/// Footer printed on every page.
pub fn footer_lines() -> [String; 2] {
    [
        format!("(c) 2024 {SITE_NAME}"),
        format!("Visit: {SITE_URL}"),
    ]
}

fn cover(recipient: &str) -> Vec<Block> {
    let figures = PublishedSavings::FIGURES;
    vec![
        Block::line(0.0, BRAND, SITE_NAME),
        Block::line(10.0, TAGLINE, "Your Financial Education Resource"),
        Block::line(20.0, TITLE, REPORT_TITLE),
        Block::paragraph(15.0, SUBTITLE, format!("Personalized for: {recipient}")),
        Block::line(20.0, HEADING, "Introduction"),
        Block::paragraph(
            10.0,
            BODY,
            "Your credit score is one of the most important numbers in your financial life. \
             It affects everything from the interest rates you pay on loans to your insurance \
             premiums and even your ability to rent an apartment.",
        ),
        Block::line(30.0, HEADING, "The Real Cost of Poor Credit"),
        Block::line(
            10.0,
            BODY,
            format!(
                "- Home Mortgage: {}+ extra over 30 years with poor credit",
                currency(figures.mortgage_lifetime)
            ),
        ),
        Block::line(
            8.0,
            BODY,
            format!(
                "- Auto Loan: {}+ additional cost on a $30K loan",
                currency(figures.auto_lifetime)
            ),
        ),
        Block::line(
            8.0,
            BODY,
            format!(
                "- Insurance: {}+ higher annual premiums",
                currency(figures.insurance_annual)
            ),
        ),
        Block::line(
            8.0,
            BODY,
            format!(
                "- Utilities: {}+ in security deposits",
                currency(figures.utility_deposits)
            ),
        ),
        Block::line(
            8.0,
            BODY,
            format!(
                "- Credit Cards: {}% higher APR rates plus annual fees",
                figures.card_apr_gap_percent
            ),
        ),
    ]
}

fn action_steps(first_gap: f32, steps: [&str; 3]) -> Vec<Block> {
    let mut blocks = vec![Block::line(first_gap, BODY, "Action Steps:")];
    for (index, step) in steps.into_iter().enumerate() {
        let gap = if index == 0 { 8.0 } else { 6.0 };
        blocks.push(Block::item(gap, 5.0, BODY, format!("- {step}")));
    }
    blocks
}

fn strategies() -> Vec<Block> {
    let mut blocks = vec![
        Block::line(0.0, SECTION, "Credit Improvement Strategies"),
        Block::line(20.0, STRATEGY, "1. Pay All Bills On Time (35% of your score)"),
        Block::paragraph(
            10.0,
            BODY,
            "Payment history is the most important factor in your credit score. Set up automatic \
             payments for at least the minimum amount due. Even one late payment can drop your \
             score by 60-110 points.",
        ),
    ];
    blocks.extend(action_steps(
        20.0,
        [
            "Set up automatic payments for all bills",
            "Use calendar reminders for due dates",
            "Pay twice per month to lower utilization",
        ],
    ));
    blocks.push(Block::line(
        20.0,
        STRATEGY,
        "2. Keep Credit Utilization Low (30% of your score)",
    ));
    blocks.push(Block::paragraph(
        10.0,
        BODY,
        "Keep your credit card balances below 30% of your credit limits, ideally below 10%. \
         This shows lenders you can manage credit responsibly.",
    ));
    blocks.extend(action_steps(
        15.0,
        [
            "Pay down existing balances",
            "Request credit limit increases",
            "Spread balances across multiple cards",
        ],
    ));
    blocks
}

fn milestone(first_gap: f32, heading: &str, steps: [&str; 3]) -> Vec<Block> {
    let mut blocks = vec![Block::line(first_gap, MILESTONE, heading)];
    for (index, step) in steps.into_iter().enumerate() {
        let gap = if index == 0 { 10.0 } else { 6.0 };
        blocks.push(Block::item(gap, 5.0, BODY, format!("- {step}")));
    }
    blocks
}

fn timeline() -> Vec<Block> {
    let mut blocks = vec![Block::line(0.0, SECTION, "Expected Timeline for Results")];
    blocks.extend(milestone(
        20.0,
        "30 Days:",
        [
            "Pay down credit card balances",
            "Set up automatic payments",
            "Check credit reports for errors",
        ],
    ));
    blocks.extend(milestone(
        15.0,
        "60 Days:",
        [
            "See initial score improvements (10-30 points)",
            "Dispute any errors found",
            "Request credit limit increases",
        ],
    ));
    blocks.extend(milestone(
        15.0,
        "90+ Days:",
        [
            "Significant score improvements (30-100+ points)",
            "Qualify for better interest rates",
            "Lower insurance premiums",
        ],
    ));
    blocks
}

fn comparison(heading: &str, rows: [String; 3]) -> Vec<Block> {
    let mut blocks = vec![Block::item(15.0, 5.0, FIGURE, heading)];
    for (index, row) in rows.into_iter().enumerate() {
        let gap = if index == 0 { 8.0 } else { 6.0 };
        blocks.push(Block::item(gap, 10.0, BODY, format!("- {row}")));
    }
    blocks
}

fn savings() -> Vec<Block> {
    let figures = PublishedSavings::FIGURES;
    let poor_mortgage_apr = LoanProduct::Mortgage.apr(CreditBracket::Poor);
    let best_mortgage_apr = LoanProduct::Mortgage.apr(CreditBracket::Excellent);

    let mut blocks = vec![
        Block::line(30.0, SECTION, "Your Potential Savings"),
        Block::line(
            15.0,
            BODY,
            "By improving your credit score from poor (580) to excellent (750+):",
        ),
    ];
    blocks.extend(comparison(
        "$300,000 Home Mortgage:",
        [
            format!(
                "Poor Credit ({poor_mortgage_apr}% APR): {}/month",
                currency(figures.mortgage_monthly_poor)
            ),
            format!(
                "Excellent Credit ({best_mortgage_apr}% APR): {}/month",
                currency(figures.mortgage_monthly_excellent)
            ),
            format!(
                "Total Savings: {} over 30 years",
                currency(figures.mortgage_lifetime)
            ),
        ],
    ));
    blocks.extend(comparison(
        "$30,000 Auto Loan:",
        [
            format!(
                "Poor Credit ({}% APR): {}/month",
                figures.auto_rate_poor,
                currency(figures.auto_monthly_poor)
            ),
            format!(
                "Excellent Credit ({}% APR): {}/month",
                figures.auto_rate_excellent,
                currency(figures.auto_monthly_excellent)
            ),
            format!(
                "Total Savings: {} over 5 years",
                currency(figures.auto_lifetime)
            ),
        ],
    ));
    blocks
}

/// Whole-dollar amount with thousands separators, e.g. `$123,840`.
pub fn currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}")
}
