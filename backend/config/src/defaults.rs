//! Config defaults: fill unset values so the effective config can be shown.

use folio_query::ListingProfile;

use crate::schema::{
    FolioConfig, ListingConfig, LoggingConfig, RateLimitConfig, ServerConfig, StoreConfig,
    TerminalConfig,
};

pub const DEFAULT_BIND: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Width of the name column in `help` output.
pub const DEFAULT_HELP_COLUMN_WIDTH: usize = 15;

/// 100 requests per 15 minutes per client.
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 100;

pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: FolioConfig) -> FolioConfig {
    let config = apply_server_defaults(config);
    let config = apply_logging_defaults(config);
    let config = apply_terminal_defaults(config);
    let config = apply_listing_defaults(config);
    let config = apply_store_defaults(config);
    apply_rate_limit_defaults(config)
}

fn apply_server_defaults(mut config: FolioConfig) -> FolioConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    config
}

fn apply_logging_defaults(mut config: FolioConfig) -> FolioConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.dir.get_or_insert_with(|| DEFAULT_LOG_DIR.into());
    logging.json.get_or_insert(false);
    config
}

/// `skillsText` stays unset so the built-in text applies.
fn apply_terminal_defaults(mut config: FolioConfig) -> FolioConfig {
    let terminal = config.terminal.get_or_insert_with(TerminalConfig::default);
    terminal.help_column_width.get_or_insert(DEFAULT_HELP_COLUMN_WIDTH);
    config
}

fn apply_listing_defaults(mut config: FolioConfig) -> FolioConfig {
    let listing = config.listing.get_or_insert_with(ListingConfig::default);
    listing.projects.get_or_insert_with(ListingProfile::projects);
    listing.contacts.get_or_insert_with(ListingProfile::contacts);
    config
}

fn apply_store_defaults(mut config: FolioConfig) -> FolioConfig {
    let store = config.store.get_or_insert_with(StoreConfig::default);
    store.seed_defaults.get_or_insert(true);
    config
}

fn apply_rate_limit_defaults(mut config: FolioConfig) -> FolioConfig {
    let rl = config.rate_limit.get_or_insert_with(RateLimitConfig::default);
    rl.max_requests.get_or_insert(DEFAULT_RATE_LIMIT_MAX);
    rl.window_secs.get_or_insert(DEFAULT_RATE_LIMIT_WINDOW_SECS);
    rl.trust_forwarded_for.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_query::SortKey;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(FolioConfig::default());
        assert_eq!(cfg.server.as_ref().unwrap().port, Some(DEFAULT_PORT));
        assert_eq!(cfg.logging.as_ref().unwrap().level.as_deref(), Some("info"));
        assert_eq!(cfg.terminal.as_ref().unwrap().help_column_width, Some(15));
        assert_eq!(cfg.rate_limit.as_ref().unwrap().window_secs, Some(900));
        assert_eq!(
            cfg.listing.unwrap().projects.unwrap().default_sort,
            vec![SortKey::desc("featured"), SortKey::asc("order")]
        );
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = FolioConfig::default();
        cfg.server = Some(ServerConfig { port: Some(8080), ..Default::default() });
        cfg.store = Some(StoreConfig { seed_defaults: Some(false), seed_file: None });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.port(), 8080);
        assert_eq!(cfg.bind(), DEFAULT_BIND);
        assert!(!cfg.seed_defaults());
    }
}
