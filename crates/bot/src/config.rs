//! Process configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use workact_ai::HttpCompletionConfig;
use workact_core::OperatorId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Operators allowed to use the bot. Empty means nobody.
    pub authorized_users: Vec<OperatorId>,
    pub history_file: PathBuf,
    pub documents_dir: PathBuf,
    pub llm: HttpCompletionConfig,
    /// Identity the console transport speaks as.
    pub console_operator: OperatorId,
}

impl BotConfig {
    /// Load from process environment (call `dotenvy::dotenv()` first).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let authorized_users = parse_operator_list(get("AUTHORIZED_USERS").as_deref().unwrap_or(""))?;

        let defaults = HttpCompletionConfig::default();
        let timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("LLM_TIMEOUT_SECS", e.to_string()))?,
            None => defaults.timeout_secs,
        };
        let llm = HttpCompletionConfig {
            endpoint: get("LLM_ENDPOINT").unwrap_or(defaults.endpoint),
            api_key: get("OPENROUTER_API_KEY"),
            model: get("LLM_MODEL").unwrap_or(defaults.model),
            timeout_secs,
        };

        let console_operator = match get("OPERATOR_ID") {
            Some(raw) => raw
                .parse::<OperatorId>()
                .map_err(|e| ConfigError::invalid("OPERATOR_ID", e.to_string()))?,
            None => OperatorId::new(0),
        };

        Ok(Self {
            authorized_users,
            history_file: get("HISTORY_FILE").unwrap_or_else(|| "history.json".to_string()).into(),
            documents_dir: get("DOCUMENTS_DIR").unwrap_or_else(|| ".".to_string()).into(),
            llm,
            console_operator,
        })
    }
}

/// Comma-separated operator ids; blank entries are skipped.
pub fn parse_operator_list(raw: &str) -> Result<Vec<OperatorId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<OperatorId>()
                .map_err(|e| ConfigError::invalid("AUTHORIZED_USERS", e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert!(config.authorized_users.is_empty());
        assert_eq!(config.history_file, PathBuf::from("history.json"));
        assert_eq!(config.documents_dir, PathBuf::from("."));
        assert_eq!(config.console_operator, OperatorId::new(0));
        assert_eq!(config.llm.model, "openai/gpt-3.5-turbo");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.api_key, None);
    }

    #[test]
    fn parses_allow_list_and_overrides() {
        let config = load(&[
            ("AUTHORIZED_USERS", " 123, 456 ,,"),
            ("OPENROUTER_API_KEY", "sk-or"),
            ("LLM_MODEL", "meta/llama"),
            ("LLM_TIMEOUT_SECS", "5"),
            ("HISTORY_FILE", "/var/lib/workact/history.json"),
            ("OPERATOR_ID", "123"),
        ])
        .unwrap();

        assert_eq!(
            config.authorized_users,
            vec![OperatorId::new(123), OperatorId::new(456)]
        );
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-or"));
        assert_eq!(config.llm.model, "meta/llama");
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.history_file, PathBuf::from("/var/lib/workact/history.json"));
        assert_eq!(config.console_operator, OperatorId::new(123));
    }

    #[test]
    fn invalid_operator_id_is_rejected() {
        let err = load(&[("AUTHORIZED_USERS", "123,abc")]).unwrap_err();
        match err {
            ConfigError::Invalid { var, .. } => assert_eq!(var, "AUTHORIZED_USERS"),
        }
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        assert!(load(&[("LLM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
