use crate::infra::{resolve_bracket, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use credit_impact::calculators::{
    self, assess, compare, compare_card_payoff, compare_deposits, compare_premiums,
    deposit_quote, plan, premium, schedule, CardQuote, ComparisonRow, CostOfLiving,
    CreditBracket, DepositQuote, ImpactInputs, ImpactSummary, ImprovementPlan, InsuranceKind,
    InsuranceQuote, LoanProduct, LoanQuote, LoanRequest, MinimumPaymentPolicy, PaymentStrategy,
    RateEntry, UtilityService,
};
use credit_impact::error::AppError;
use credit_impact::leads::{lead_router, LeadService, Mailer};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct MortgageRequest {
    pub(crate) principal: f64,
    #[serde(default)]
    pub(crate) term_years: Option<u32>,
    pub(crate) bracket: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Vehicle {
    #[default]
    New,
    Used,
}

impl Vehicle {
    pub(crate) fn product(self) -> LoanProduct {
        match self {
            Vehicle::New => LoanProduct::AutoNew,
            Vehicle::Used => LoanProduct::AutoUsed,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AutoRequest {
    pub(crate) principal: f64,
    #[serde(default)]
    pub(crate) term_months: Option<u32>,
    pub(crate) bracket: String,
    #[serde(default)]
    pub(crate) vehicle: Vehicle,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditCardRequest {
    pub(crate) balance: f64,
    pub(crate) bracket: String,
    /// Fixed monthly payment; the card's minimum due when absent.
    #[serde(default)]
    pub(crate) payment: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsuranceRequest {
    pub(crate) kind: InsuranceKind,
    pub(crate) insured_value: f64,
    pub(crate) age: u32,
    pub(crate) bracket: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UtilityRequest {
    #[serde(default)]
    pub(crate) services: Vec<UtilityService>,
    pub(crate) monthly_budget: f64,
    #[serde(default)]
    pub(crate) location: CostOfLiving,
    pub(crate) bracket: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlanRequest {
    pub(crate) current: String,
    pub(crate) target: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoanQuoteResponse {
    pub(crate) bracket_defaulted: bool,
    pub(crate) quote: LoanQuote,
    pub(crate) monthly_extra: f64,
    pub(crate) comparison: Vec<ComparisonRow>,
}

/// A quote for the requested bracket plus the same calculation for every
/// bracket, best first.
#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse<Q> {
    pub(crate) bracket_defaulted: bool,
    pub(crate) quote: Q,
    pub(crate) comparison: Vec<Q>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanResponse {
    pub(crate) bracket_defaulted: bool,
    pub(crate) plan: ImprovementPlan,
}

pub(crate) fn with_calculator_routes<M>(leads: Arc<LeadService<M>>) -> axum::Router
where
    M: Mailer + ?Sized + 'static,
{
    lead_router(leads)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/rates", get(rates_endpoint))
        .route("/api/v1/calculators/mortgage", post(mortgage_endpoint))
        .route("/api/v1/calculators/auto", post(auto_endpoint))
        .route("/api/v1/calculators/credit-card", post(credit_card_endpoint))
        .route("/api/v1/calculators/insurance", post(insurance_endpoint))
        .route("/api/v1/calculators/utility", post(utility_endpoint))
        .route("/api/v1/calculators/impact", post(impact_endpoint))
        .route(
            "/api/v1/calculators/improvement-plan",
            post(improvement_plan_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rates_endpoint() -> Json<Vec<RateEntry>> {
    Json(schedule())
}

fn loan_response(
    product: LoanProduct,
    request: LoanRequest,
    bracket_key: &str,
) -> Result<Json<LoanQuoteResponse>, AppError> {
    let selection = resolve_bracket(bracket_key);
    let quote = calculators::quote(product, &request, selection.bracket)?;
    let comparison = compare(product, &request, &CreditBracket::BEST_TO_WORST)?;

    Ok(Json(LoanQuoteResponse {
        bracket_defaulted: selection.defaulted,
        monthly_extra: quote.monthly_extra(),
        quote,
        comparison,
    }))
}

pub(crate) async fn mortgage_endpoint(
    Json(payload): Json<MortgageRequest>,
) -> Result<Json<LoanQuoteResponse>, AppError> {
    let product = LoanProduct::Mortgage;
    let term_months = payload
        .term_years
        .map_or(product.default_term_months(), |years| years.saturating_mul(12));
    loan_response(
        product,
        LoanRequest::new(payload.principal, term_months),
        &payload.bracket,
    )
}

pub(crate) async fn auto_endpoint(
    Json(payload): Json<AutoRequest>,
) -> Result<Json<LoanQuoteResponse>, AppError> {
    let product = payload.vehicle.product();
    let term_months = payload
        .term_months
        .unwrap_or_else(|| product.default_term_months());
    loan_response(
        product,
        LoanRequest::new(payload.principal, term_months),
        &payload.bracket,
    )
}

pub(crate) async fn credit_card_endpoint(
    Json(payload): Json<CreditCardRequest>,
) -> Result<Json<QuoteResponse<CardQuote>>, AppError> {
    let selection = resolve_bracket(&payload.bracket);
    let strategy = payload
        .payment
        .map_or(PaymentStrategy::Minimum, PaymentStrategy::Fixed);
    let policy = MinimumPaymentPolicy::default();

    let quote = calculators::card_quote(selection.bracket, payload.balance, strategy, &policy)?;
    let comparison = compare_card_payoff(
        payload.balance,
        strategy,
        &policy,
        &CreditBracket::BEST_TO_WORST,
    )?;

    Ok(Json(QuoteResponse {
        bracket_defaulted: selection.defaulted,
        quote,
        comparison,
    }))
}

pub(crate) async fn insurance_endpoint(
    Json(payload): Json<InsuranceRequest>,
) -> Result<Json<QuoteResponse<InsuranceQuote>>, AppError> {
    let selection = resolve_bracket(&payload.bracket);
    let quote = premium(
        selection.bracket,
        payload.kind,
        payload.insured_value,
        payload.age,
    )?;
    let comparison = compare_premiums(
        payload.kind,
        payload.insured_value,
        payload.age,
        &CreditBracket::BEST_TO_WORST,
    )?;

    Ok(Json(QuoteResponse {
        bracket_defaulted: selection.defaulted,
        quote,
        comparison,
    }))
}

pub(crate) async fn utility_endpoint(
    Json(payload): Json<UtilityRequest>,
) -> Result<Json<QuoteResponse<DepositQuote>>, AppError> {
    let selection = resolve_bracket(&payload.bracket);
    let services = if payload.services.is_empty() {
        UtilityService::DEFAULT_SELECTION.to_vec()
    } else {
        payload.services
    };

    let quote = deposit_quote(
        selection.bracket,
        &services,
        payload.monthly_budget,
        payload.location,
    )?;
    let comparison = compare_deposits(
        &services,
        payload.monthly_budget,
        payload.location,
        &CreditBracket::BEST_TO_WORST,
    )?;

    Ok(Json(QuoteResponse {
        bracket_defaulted: selection.defaulted,
        quote,
        comparison,
    }))
}

pub(crate) async fn impact_endpoint(
    Json(payload): Json<ImpactInputs>,
) -> Result<Json<ImpactSummary>, AppError> {
    Ok(Json(assess(&payload)?))
}

pub(crate) async fn improvement_plan_endpoint(
    Json(payload): Json<PlanRequest>,
) -> Json<PlanResponse> {
    let current = resolve_bracket(&payload.current);
    let target = resolve_bracket(&payload.target);

    Json(PlanResponse {
        bracket_defaulted: current.defaulted || target.defaulted,
        plan: plan(current.bracket, target.bracket),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use credit_impact::leads::{LeadSettings, MailerError, OutboundEmail};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
            self.sent.lock().expect("mailer mutex poisoned").push(email);
            Ok(())
        }
    }

    fn settings() -> LeadSettings {
        LeadSettings {
            from: "Site <noreply@example.com>".to_string(),
            notify: "owner@example.com".to_string(),
            site_url: "https://example.com".to_string(),
        }
    }

    fn app_with(mailer: Arc<RecordingMailer>, ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let leads = Arc::new(LeadService::new(mailer, settings()));
        with_calculator_routes(leads).layer(Extension(state))
    }

    fn app() -> axum::Router {
        app_with(Arc::new(RecordingMailer::default()), true)
    }

    async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, payload)
    }

    async fn get_status(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
            .status()
    }

    fn number(value: &Value, pointer: &str) -> f64 {
        value
            .pointer(pointer)
            .and_then(Value::as_f64)
            .unwrap_or_else(|| panic!("missing {pointer} in {value}"))
    }

    #[tokio::test]
    async fn health_and_readiness_report_state() {
        assert_eq!(get_status(app(), "/health").await, StatusCode::OK);
        assert_eq!(get_status(app(), "/ready").await, StatusCode::OK);
        let starting = app_with(Arc::new(RecordingMailer::default()), false);
        assert_eq!(
            get_status(starting, "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(get_status(app(), "/metrics").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn rates_endpoint_lists_every_product_and_bracket() {
        let Json(rows) = rates_endpoint().await;
        assert_eq!(rows.len(), 28);
    }

    #[tokio::test]
    async fn mortgage_quote_compares_against_excellent() {
        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/mortgage",
            json!({ "principal": 300000.0, "bracket": "300-579" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bracket_defaulted"], Value::Bool(false));
        assert_eq!(body["quote"]["bracket"], "poor");
        assert!((number(&body, "/quote/result/monthly_payment") - 2097.64).abs() < 0.01);
        assert!((number(&body, "/monthly_extra") - 337.38).abs() < 0.01);
        assert_eq!(body["comparison"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["comparison"][0]["bracket"], "excellent");
    }

    #[tokio::test]
    async fn unknown_bracket_uses_excellent_and_says_so() {
        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/auto",
            json!({ "principal": 30000.0, "bracket": "800+", "vehicle": "used" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bracket_defaulted"], Value::Bool(true));
        assert_eq!(body["quote"]["bracket"], "excellent");
        assert_eq!(body["quote"]["product"], "auto-used");
        assert_eq!(number(&body, "/quote/extra_cost"), 0.0);
    }

    #[tokio::test]
    async fn invalid_inputs_are_bad_requests() {
        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/mortgage",
            json!({ "principal": -1.0, "bracket": "good" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("principal")));

        let (status, _) = post_json(
            app(),
            "/api/v1/calculators/mortgage",
            json!({ "principal": 1000.0, "term_years": 0, "bracket": "good" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn very_long_terms_return_finite_payments() {
        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/auto",
            json!({
                "principal": 30000.0,
                "term_months": 200000,
                "bracket": "good",
                "vehicle": "new"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        for row in 0..4 {
            let payment = number(&body, &format!("/comparison/{row}/result/monthly_payment"));
            assert!(payment.is_finite() && payment > 0.0, "row {row}: {payment}");
        }

        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/mortgage",
            json!({ "principal": 300000.0, "term_years": 400000000, "bracket": "good" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(number(&body, "/quote/result/total_paid").is_finite());
    }

    #[tokio::test]
    async fn credit_card_payoff_reports_months_and_never_pays_off() {
        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/credit-card",
            json!({ "balance": 5000.0, "bracket": "740-850", "payment": 150.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["payoff"]["status"], "finite");
        assert_eq!(number(&body, "/quote/payoff/months"), 46.0);

        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/credit-card",
            json!({ "balance": 5000.0, "bracket": "poor", "payment": 50.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["payoff"]["status"], "never_pays_off");
    }

    #[tokio::test]
    async fn insurance_and_utility_quotes_include_comparisons() {
        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/insurance",
            json!({ "kind": "auto", "insured_value": 30000.0, "age": 35, "bracket": "poor" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!((number(&body, "/quote/annual_premium") - 2625.0).abs() < 1e-9);
        assert_eq!(number(&body, "/quote/surcharge_percent"), 75.0);

        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/utility",
            json!({ "monthly_budget": 300.0, "bracket": "poor" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["lines"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["quote"]["location"], "average");
        assert_eq!(number(&body, "/comparison/0/total"), 0.0);
    }

    #[tokio::test]
    async fn impact_and_plan_endpoints_use_form_defaults() {
        let (status, body) = post_json(app(), "/api/v1/calculators/impact", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "good");
        assert!((number(&body, "/total_annual_extra") - 2229.82).abs() < 0.01);

        let (status, body) = post_json(
            app(),
            "/api/v1/calculators/improvement-plan",
            json!({ "current": "580-669", "target": "excellent" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(number(&body, "/plan/points_needed"), 71.0);
        assert_eq!(body["plan"]["strategies"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn lead_routes_are_mounted() {
        let mailer = Arc::new(RecordingMailer::default());
        let (status, body) = post_json(
            app_with(mailer.clone(), true),
            "/api/v1/leads/credit-report",
            json!({ "name": "Jordan", "email": "jordan@example.com" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_email_sent"], Value::Bool(true));
        assert_eq!(mailer.sent.lock().expect("mailer mutex poisoned").len(), 2);

        let (status, _) = post_json(
            app(),
            "/api/v1/leads/contact",
            json!({
                "first_name": "Jordan",
                "last_name": "Lee",
                "email": "not-an-email",
                "subject": "general",
                "message": "Hello"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
