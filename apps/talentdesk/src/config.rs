use anyhow::{Context, Result};

use crate::enhancement::scripted::DEFAULT_REQUIRED_SKILLS;

const DEFAULT_STEP_DELAY_MS: u64 = 800;

/// Dashboard configuration loaded from environment variables.
/// Every variable is optional; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, progress and enhancement records go to Redis instead of memory.
    pub redis_url: Option<String>,
    pub rust_log: String,
    /// Delay between the scripted enhancement progress steps.
    pub enhancement_step_delay_ms: u64,
    pub required_skills: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redis_url: None,
            rust_log: "info".to_string(),
            enhancement_step_delay_ms: DEFAULT_STEP_DELAY_MS,
            required_skills: DEFAULT_REQUIRED_SKILLS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            redis_url: optional_env("REDIS_URL"),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            enhancement_step_delay_ms: match optional_env("ENHANCEMENT_STEP_DELAY_MS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("ENHANCEMENT_STEP_DELAY_MS must be a whole number of milliseconds")?,
                None => defaults.enhancement_step_delay_ms,
            },
            required_skills: match optional_env("ENHANCEMENT_REQUIRED_SKILLS") {
                Some(raw) => parse_skill_list(&raw),
                None => defaults.required_skills,
            },
        })
    }

    pub fn step_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.enhancement_step_delay_ms)
    }
}

/// Returns the variable when it is set to something other than whitespace.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
