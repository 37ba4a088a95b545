use crate::cli::ServeArgs;
use crate::infra::{AppState, LoggingMailer};
use crate::routes::with_calculator_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_impact::config::{AppConfig, MailConfig};
use credit_impact::error::AppError;
use credit_impact::leads::{LeadService, LeadSettings, Mailer, ResendMailer};
use credit_impact::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let lead_service = Arc::new(LeadService::new(
        select_mailer(&config.mail)?,
        LeadSettings::from(&config.mail),
    ));

    let app = with_calculator_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit impact service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn select_mailer(mail: &MailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    match &mail.api_key {
        Some(key) => {
            let mailer = ResendMailer::new(mail.api_url.clone(), key.clone())?;
            info!(api_url = %mailer.api_url(), "email delivery enabled");
            Ok(Arc::new(mailer))
        }
        None => {
            warn!("APP_MAIL_API_KEY not set; lead emails will only be logged");
            Ok(Arc::new(LoggingMailer))
        }
    }
}
