use anyhow::{bail, Context, Result};

/// Which query planner backs the search flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerBackend {
    /// Local keyword/category rules, no network call.
    Rule,
    /// Generative-AI planner through `LlmClient`.
    Llm,
}

impl PlannerBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rule" | "local" => Ok(PlannerBackend::Rule),
            "llm" | "ai" => Ok(PlannerBackend::Llm),
            other => bail!("PLANNER_BACKEND must be 'rule' or 'llm', got '{other}'"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlannerBackend::Rule => "rule",
            PlannerBackend::Llm => "llm",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub anthropic_api_key: String,
    pub planner_backend: PlannerBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            planner_backend: PlannerBackend::parse(
                &std::env::var("PLANNER_BACKEND").unwrap_or_else(|_| "rule".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
