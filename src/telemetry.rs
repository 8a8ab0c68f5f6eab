//! Optional tracing initialization, behind the `telemetry` feature.
//!
//! This crate never calls [`init_tracing`] itself — `resolve` only emits
//! `tracing` events into whatever subscriber the caller has installed.
//! This module exists for binaries and tests that want a ready-made
//! subscriber without pulling in `tracing-subscriber` configuration by
//! hand.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the ready-made tracing subscriber.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Log format: `"json"` or `"pretty"`.
    pub format: String,
    /// Log level filter (e.g. `"info"`, `"resolution_core=debug,info"`).
    pub level: String,
    /// Whether to log span enter/exit events.
    pub log_spans: bool,
    /// Whether to include file/line in logs.
    pub include_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
            level: "info".to_string(),
            log_spans: false,
            include_location: false,
        }
    }
}

impl TelemetryConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn json(mut self) -> Self {
        self.format = "json".to_string();
        self
    }

    pub fn with_spans(mut self) -> Self {
        self.log_spans = true;
        self
    }
}

/// Installs a global tracing subscriber built from `config`. Intended for
/// binaries and integration tests; libraries embedding `resolve` should
/// install their own subscriber instead.
pub fn init_tracing(config: TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.log_spans { FmtSpan::NEW | FmtSpan::CLOSE } else { FmtSpan::NONE };

    if config.format == "json" {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_current_span(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location);
        tracing_subscriber::registry().with(filter).with(layer).init();
    } else {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_file(config.include_location)
            .with_line_number(config.include_location);
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_set_expected_fields() {
        let config = TelemetryConfig::default().with_level("debug").json().with_spans();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "json");
        assert!(config.log_spans);
    }
}
