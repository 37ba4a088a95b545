use async_trait::async_trait;
use credit_impact::calculators::{
    BracketSelection, CostOfLiving, CreditBracket, InsuranceKind, UtilityService,
};
use credit_impact::leads::{Mailer, MailerError, OutboundEmail};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stands in for the email API when no key is configured: every message
/// is written to the log and reported as sent.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LoggingMailer;

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
        info!(
            to = ?email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "email delivery disabled; message logged"
        );
        Ok(())
    }
}

/// Lenient bracket lookup used by the HTTP forms.
pub(crate) fn resolve_bracket(raw: &str) -> BracketSelection {
    CreditBracket::resolve_key(raw)
}

pub(crate) fn parse_bracket(raw: &str) -> Result<CreditBracket, String> {
    raw.parse::<CreditBracket>().map_err(|err| {
        format!("{err}; expected poor, fair, good, excellent or a range such as 740-850")
    })
}

pub(crate) fn parse_insurance_kind(raw: &str) -> Result<InsuranceKind, String> {
    raw.parse::<InsuranceKind>().map_err(|err| err.to_string())
}

pub(crate) fn parse_service(raw: &str) -> Result<UtilityService, String> {
    raw.parse::<UtilityService>().map_err(|err| err.to_string())
}

pub(crate) fn parse_location(raw: &str) -> Result<CostOfLiving, String> {
    raw.parse::<CostOfLiving>().map_err(|err| err.to_string())
}
