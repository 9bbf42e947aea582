//! Config validation with field paths in every message.

use crate::schema::FolioConfig;
use folio_query::ListingProfile;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }
}

pub fn validate(config: &FolioConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_logging(config, &mut report);
    validate_auth(config, &mut report);
    validate_terminal(config, &mut report);
    validate_listing(config, &mut report);
    validate_rate_limit(config, &mut report);
    report
}

fn validate_server(config: &FolioConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if server.port == Some(0) {
        report.error("server.port", "port must be between 1 and 65535");
    }
    if let Some(bind) = &server.bind {
        if bind.trim().is_empty() {
            report.error("server.bind", "bind address cannot be empty");
        }
    }
    if let Some(origins) = &server.cors_origins {
        for (i, origin) in origins.iter().enumerate() {
            let origin = origin.trim();
            if origin == "*" {
                report.error(
                    format!("server.corsOrigins[{i}]"),
                    "Wildcard origin is not allowed; leave corsOrigins unset to allow any origin",
                );
            } else if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                report.error(
                    format!("server.corsOrigins[{i}]"),
                    format!("Origin '{origin}' must start with http:// or https://"),
                );
            }
        }
    }
}

fn validate_logging(config: &FolioConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else { return };
    if !matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
        report.warn(
            "logging.level",
            format!("Unknown level '{level}'; it will be read as an EnvFilter directive"),
        );
    }
}

fn validate_auth(config: &FolioConfig, report: &mut ValidationReport) {
    if config.admin_token().is_none() {
        report.warn("auth.adminToken", "No admin token configured; admin routes will reject every request");
    }
}

fn validate_terminal(config: &FolioConfig, report: &mut ValidationReport) {
    let Some(terminal) = &config.terminal else { return };
    if terminal.help_column_width == Some(0) {
        report.error("terminal.helpColumnWidth", "helpColumnWidth must be >= 1");
    }
}

fn validate_listing(config: &FolioConfig, report: &mut ValidationReport) {
    let Some(listing) = &config.listing else { return };
    if let Some(p) = &listing.projects {
        validate_profile("listing.projects", p, report);
    }
    if let Some(c) = &listing.contacts {
        validate_profile("listing.contacts", c, report);
    }
}

fn validate_profile(path: &str, profile: &ListingProfile, report: &mut ValidationReport) {
    if profile.page_size == 0 {
        report.error(format!("{path}.pageSize"), "pageSize must be >= 1");
    }
    for (i, key) in profile.default_sort.iter().enumerate() {
        if key.field.trim().is_empty() {
            report.error(format!("{path}.defaultSort[{i}].field"), "Sort field cannot be empty");
        }
    }
    if let Some(fields) = &profile.filterable {
        if fields.is_empty() {
            report.warn(format!("{path}.filterable"), "Empty filterable list drops every filter");
        }
    }
}

fn validate_rate_limit(config: &FolioConfig, report: &mut ValidationReport) {
    let Some(rl) = &config.rate_limit else { return };
    if rl.max_requests == Some(0) {
        report.error("rateLimit.maxRequests", "maxRequests must be >= 1");
    }
    if rl.window_secs == Some(0) {
        report.error("rateLimit.windowSecs", "windowSecs must be >= 1");
    }
}
