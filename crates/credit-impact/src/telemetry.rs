use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

/// HTTP and TLS layers under the mail client, held at `warn` unless the
/// configured filter names them.
const MAIL_TRANSPORT_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{value}' is not a valid tracing filter")
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "could not install the log subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins over the configured level when it parses.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let invalid = |source: ParseError| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    };
    let mut filter = EnvFilter::try_new(&config.log_level).map_err(invalid)?;
    for target in MAIL_TRANSPORT_TARGETS {
        if !names_target(&config.log_level, target) {
            let quiet = format!("{target}=warn").parse::<Directive>().map_err(invalid)?;
            filter = filter.add_directive(quiet);
        }
    }
    Ok(filter)
}

fn names_target(filter: &str, target: &str) -> bool {
    filter
        .split(',')
        .filter_map(|directive| directive.split('=').next())
        .any(|name| name.trim() == target)
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(false)
        .compact()
        .with_ansi(config.ansi)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: log_level.to_string(),
            ansi: false,
        }
    }

    #[test]
    fn quiets_the_mail_transport_unless_named() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = env_filter(&config("credit_impact=debug,info"))
            .expect("filter builds")
            .to_string();
        assert!(filter.contains("reqwest=warn"), "{filter}");
        assert!(filter.contains("credit_impact=debug"), "{filter}");

        let filter = env_filter(&config("info,reqwest=trace"))
            .expect("filter builds")
            .to_string();
        assert!(filter.contains("reqwest=trace"), "{filter}");
        assert!(!filter.contains("reqwest=warn"), "{filter}");
    }

    #[test]
    fn names_target_matches_whole_directive_names() {
        assert!(names_target("info, hyper=debug", "hyper"));
        assert!(!names_target("hyper_util=debug", "hyper"));
        assert!(!names_target("debug", "reqwest"));
    }

    #[test]
    fn rejects_malformed_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        match env_filter(&config("credit_impact=loud")) {
            Err(err @ TelemetryError::EnvFilter { .. }) => {
                assert!(err.to_string().contains("credit_impact=loud"));
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }
}
