// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

pub const DEFAULT_INSIGHT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LOG_FILTER: &str = "montra=warn";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub sync_url: Option<String>,
    pub insight_api_key: Option<String>,
    pub insight_model: String,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// `lookup` maps a variable name to its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let db_path = match get("MONTRA_DB") {
            Some(p) => PathBuf::from(p),
            None => crate::db::default_db_path()?,
        };
        Ok(Self {
            db_path,
            sync_url: get("MONTRA_SYNC_URL"),
            insight_api_key: get("GEMINI_API_KEY"),
            insight_model: get("MONTRA_INSIGHT_MODEL")
                .unwrap_or_else(|| DEFAULT_INSIGHT_MODEL.to_string()),
            log_filter: get("MONTRA_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = Config::from_lookup(|k| match k {
            "MONTRA_DB" => Some("/tmp/montra-test.sqlite".into()),
            "GEMINI_API_KEY" => Some("   ".into()),
            "MONTRA_SYNC_URL" => Some("https://sync.example.org".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/montra-test.sqlite"));
        assert_eq!(cfg.insight_api_key, None);
        assert_eq!(cfg.sync_url.as_deref(), Some("https://sync.example.org"));
        assert_eq!(cfg.insight_model, DEFAULT_INSIGHT_MODEL);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }
}
