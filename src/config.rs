use thiserror::Error;

use crate::papers::csv::HeaderMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not defined in environment variables")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Startup configuration, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub discord_token: String,
    pub guild_id: Option<u64>,
    pub header_mode: HeaderMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let supabase_url = get("SUPABASE_URL")
            .or_else(|| get("VITE_SUPABASE_URL"))
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_anon_key = get("SUPABASE_ANON_KEY")
            .or_else(|| get("VITE_SUPABASE_ANON_KEY"))
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let guild_id = match get("DISCORD_GUILD_ID") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "DISCORD_GUILD_ID",
                value: raw,
            })?),
            None => None,
        };

        let header_mode = match get("CSV_HEADER_MODE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "CSV_HEADER_MODE",
                value: raw,
            })?,
            None => HeaderMode::default(),
        };

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            discord_token,
            guild_id,
            header_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[
            ("SUPABASE_ANON_KEY", "anon"),
            ("DISCORD_TOKEN", "tok"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));
        assert_eq!(
            err.to_string(),
            "SUPABASE_URL is not defined in environment variables"
        );
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "  "),
            ("DISCORD_TOKEN", "tok"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn test_vite_fallbacks_and_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://x.supabase.co/"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
            ("DISCORD_TOKEN", "tok"),
        ]))
        .unwrap();
        assert_eq!(cfg.supabase_url, "https://x.supabase.co");
        assert_eq!(cfg.supabase_anon_key, "anon");
        assert_eq!(cfg.guild_id, None);
        assert_eq!(cfg.header_mode, HeaderMode::Union);
    }

    #[test]
    fn test_optional_values_parsed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("DISCORD_TOKEN", "tok"),
            ("DISCORD_GUILD_ID", "12345"),
            ("CSV_HEADER_MODE", "first-row"),
        ]))
        .unwrap();
        assert_eq!(cfg.guild_id, Some(12345));
        assert_eq!(cfg.header_mode, HeaderMode::FirstRow);
    }

    #[test]
    fn test_bad_guild_id_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("DISCORD_TOKEN", "tok"),
            ("DISCORD_GUILD_ID", "not-a-number"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DISCORD_GUILD_ID", .. }));
    }
}
