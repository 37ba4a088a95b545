use serde::Serialize;

use super::bracket::CreditBracket;

/// Figures the business publishes for a 30-year $300,000 mortgage, a 5-year
/// $30,000 auto loan, auto insurance and utility deposits, comparing poor
/// and excellent credit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublishedSavings {
    pub mortgage_lifetime: f64,
    pub mortgage_monthly_excellent: f64,
    pub mortgage_monthly_poor: f64,
    pub auto_lifetime: f64,
    pub auto_rate_excellent: f64,
    pub auto_rate_poor: f64,
    pub auto_monthly_excellent: f64,
    pub auto_monthly_poor: f64,
    pub insurance_annual: f64,
    pub utility_deposits: f64,
    pub card_apr_gap_percent: f64,
}

impl PublishedSavings {
    pub const FIGURES: PublishedSavings = PublishedSavings {
        mortgage_lifetime: 123_840.0,
        mortgage_monthly_excellent: 1_754.0,
        mortgage_monthly_poor: 2_098.0,
        auto_lifetime: 9_960.0,
        auto_rate_excellent: 4.5,
        auto_rate_poor: 15.9,
        auto_monthly_excellent: 558.0,
        auto_monthly_poor: 724.0,
        insurance_annual: 900.0,
        utility_deposits: 800.0,
        card_apr_gap_percent: 13.0,
    };

    /// Score gap the published savings correspond to.
    pub const REFERENCE_POINTS: f64 = 160.0;

    pub fn headline_total(&self) -> f64 {
        self.mortgage_lifetime + self.auto_lifetime + self.insurance_annual
    }

    /// Savings scaled linearly to a smaller or larger score improvement.
    pub fn scaled(&self, points: u16) -> f64 {
        self.headline_total() * f64::from(points) / Self::REFERENCE_POINTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strategy {
    pub title: &'static str,
    pub impact: Impact,
    pub timeframe: &'static str,
    pub description: &'static str,
    pub priority: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub timeframe: &'static str,
    pub points: &'static str,
    pub actions: [&'static str; 3],
}

/// Ordered by priority; lower brackets receive a longer prefix.
pub static STRATEGIES: [Strategy; 6] = [
    Strategy {
        title: "Pay All Bills On Time",
        impact: Impact::High,
        timeframe: "Immediate",
        description: "Set up automatic payments for all bills. Payment history is 35% of your credit score.",
        priority: 1,
    },
    Strategy {
        title: "Reduce Credit Card Balances",
        impact: Impact::High,
        timeframe: "1-2 months",
        description: "Pay down balances to below 30% of limits, ideally under 10%. This is 30% of your score.",
        priority: 1,
    },
    Strategy {
        title: "Check Credit Reports for Errors",
        impact: Impact::Medium,
        timeframe: "30-60 days",
        description: "Dispute any errors on your credit reports from all three bureaus.",
        priority: 2,
    },
    Strategy {
        title: "Request Credit Limit Increases",
        impact: Impact::Medium,
        timeframe: "Immediate",
        description: "Ask for higher limits on existing cards to lower utilization ratios.",
        priority: 2,
    },
    Strategy {
        title: "Keep Old Accounts Open",
        impact: Impact::Medium,
        timeframe: "Ongoing",
        description: "Don't close old credit cards. Length of credit history is 15% of your score.",
        priority: 3,
    },
    Strategy {
        title: "Diversify Credit Types",
        impact: Impact::Low,
        timeframe: "6+ months",
        description: "Having different types of credit (cards, loans) can help your score.",
        priority: 3,
    },
];

static MILESTONES: [(u16, Milestone); 3] = [
    (
        30,
        Milestone {
            timeframe: "30 days",
            points: "10-30 points",
            actions: [
                "Set up automatic payments",
                "Pay down credit card balances",
                "Check credit reports",
            ],
        },
    ),
    (
        60,
        Milestone {
            timeframe: "60 days",
            points: "20-50 points",
            actions: [
                "See initial improvements",
                "Dispute credit report errors",
                "Request credit limit increases",
            ],
        },
    ),
    (
        90,
        Milestone {
            timeframe: "90+ days",
            points: "30-100+ points",
            actions: [
                "Significant improvements",
                "Qualify for better rates",
                "Lower insurance premiums",
            ],
        },
    ),
];

pub const ALREADY_ACHIEVED: &str = "Already achieved";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementPlan {
    pub current: CreditBracket,
    pub target: CreditBracket,
    /// Gap between the top of the current bracket and the bottom of the
    /// target; zero when the target is already reached.
    pub points_needed: u16,
    pub timeframe: &'static str,
    pub potential_savings: f64,
    pub strategies: Vec<Strategy>,
    pub milestones: Vec<Milestone>,
}

impl ImprovementPlan {
    pub fn is_achieved(&self) -> bool {
        self.points_needed == 0
    }
}

pub fn strategies_for(current: CreditBracket) -> &'static [Strategy] {
    match current {
        CreditBracket::Poor => &STRATEGIES,
        CreditBracket::Fair => &STRATEGIES[..4],
        CreditBracket::Good | CreditBracket::Excellent => &STRATEGIES[..3],
    }
}

pub fn milestones_for(points_needed: u16) -> Vec<Milestone> {
    MILESTONES
        .iter()
        .filter(|(threshold, _)| points_needed >= *threshold)
        .map(|(_, milestone)| *milestone)
        .collect()
}

fn timeframe_for(points_needed: u16) -> &'static str {
    match points_needed {
        101.. => "12-18 months",
        61.. => "6-12 months",
        _ => "3-6 months",
    }
}

pub fn plan(current: CreditBracket, target: CreditBracket) -> ImprovementPlan {
    let gap = i32::from(target.min_score()) - i32::from(current.max_score());
    let points_needed = u16::try_from(gap).unwrap_or(0);

    if points_needed == 0 {
        return ImprovementPlan {
            current,
            target,
            points_needed,
            timeframe: ALREADY_ACHIEVED,
            potential_savings: 0.0,
            strategies: Vec::new(),
            milestones: Vec::new(),
        };
    }

    ImprovementPlan {
        current,
        target,
        points_needed,
        timeframe: timeframe_for(points_needed),
        potential_savings: PublishedSavings::FIGURES.scaled(points_needed),
        strategies: strategies_for(current).to_vec(),
        milestones: milestones_for(points_needed),
    }
}
