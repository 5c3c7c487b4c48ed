use std::str::FromStr;

use color_eyre::eyre::{eyre, WrapErr};
use snake_core::{Legality, StrategyKind};

/// How log lines are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Tree,
}

impl FromStr for LogFormat {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "tree" => Ok(LogFormat::Tree),
            other => Err(eyre!("unknown log format `{other}`")),
        }
    }
}

/// What the game engine shows for this snake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            author: "simsog".to_string(),
            color: "#123456".to_string(),
            head: "default".to_string(),
            tail: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub strategy: StrategyKind,
    pub legality: Legality,
    pub appearance: Appearance,
    pub log_format: LogFormat,
    pub sentry_dsn: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment. Call `dotenvy::dotenv` first to
    /// pick up a `.env` file.
    pub fn from_env() -> color_eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> color_eyre::Result<Self> {
        let defaults = Appearance::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match value("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .wrap_err_with(|| format!("PORT must be a port number, got `{port}`"))?,
            None => 8080,
        };
        let strategy = value("SNAKE_STRATEGY")
            .map(|s| s.parse::<StrategyKind>())
            .transpose()
            .wrap_err("invalid SNAKE_STRATEGY")?
            .unwrap_or_default();
        let legality = value("SNAKE_LEGALITY")
            .map(|s| s.parse::<Legality>())
            .transpose()
            .wrap_err("invalid SNAKE_LEGALITY")?
            .unwrap_or_default();
        let log_format = value("LOG_FORMAT")
            .map(|s| s.parse::<LogFormat>())
            .transpose()
            .wrap_err("invalid LOG_FORMAT")?
            .unwrap_or_default();

        Ok(Self {
            port,
            strategy,
            legality,
            appearance: Appearance {
                author: value("SNAKE_AUTHOR").unwrap_or(defaults.author),
                color: value("SNAKE_COLOR").unwrap_or(defaults.color),
                head: value("SNAKE_HEAD").unwrap_or(defaults.head),
                tail: value("SNAKE_TAIL").unwrap_or(defaults.tail),
            },
            log_format,
            sentry_dsn: value("SENTRY_DSN"),
        })
    }
}
