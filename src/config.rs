use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub simplify_debts: bool,
    pub auto_settle: bool,
}

/// Knobs the event service needs from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Simplify graphs when reporting debts and checking for settlement.
    pub simplify_debts: bool,
    /// Mark records settled as soon as their event nets to zero.
    pub auto_settle: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            simplify_debts: true,
            auto_settle: true,
        }
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            simplify_debts: parse_flag(env::var("SIMPLIFY_DEBTS").ok().as_deref(), true),
            auto_settle: parse_flag(env::var("AUTO_SETTLE").ok().as_deref(), true),
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            simplify_debts: self.simplify_debts,
            auto_settle: self.auto_settle,
        }
    }
}

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// Installs the env_logger backend at the configured level. Safe to call more
/// than once.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .parse_filters(&CONFIG.log_level)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag(Some("TRUE"), false));
        assert!(parse_flag(Some(" yes "), false));
        assert!(!parse_flag(Some("0"), true));
        assert!(!parse_flag(Some("off"), true));
    }

    #[test]
    fn unknown_or_missing_flags_use_default() {
        assert!(parse_flag(None, true));
        assert!(!parse_flag(Some("maybe"), false));
    }
}
