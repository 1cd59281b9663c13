use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use training_core::model::GeneratorSettingsDraft;

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("could not prepare database file {path}: {source}")]
    DbFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// SkyHigh AI training demo: three graded sections, then the Live Jump Mentor.
#[derive(Debug, Parser)]
#[command(name = "skyhigh", version)]
pub struct Cli {
    /// SQLite database URL or file path
    #[arg(long = "db", env = "SKYHIGH_DB_URL", default_value = "sqlite://skyhigh.sqlite3")]
    pub db_url: String,

    /// Standard Operating Procedure text that questions and answers are grounded in
    #[arg(long, env = "SKYHIGH_SOP_PATH", default_value = "assets/skyhigh_sop.txt")]
    pub sop: PathBuf,

    /// Pause after a section is mastered, in milliseconds
    #[arg(long, env = "SKYHIGH_ADVANCE_DELAY_MS", default_value_t = 3000)]
    pub advance_delay_ms: u64,

    /// API key for the OpenAI-compatible chat-completions endpoint
    #[arg(long, env = "SKYHIGH_AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model name
    #[arg(long, env = "SKYHIGH_AI_MODEL")]
    pub model: Option<String>,

    /// Base URL of the chat-completions API
    #[arg(long, env = "SKYHIGH_AI_BASE_URL")]
    pub base_url: Option<String>,

    /// Log filter, e.g. `info` or `services=debug` (falls back to RUST_LOG, then `warn`)
    #[arg(long)]
    pub log: Option<String>,
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its parent directory exist.
///
/// # Errors
///
/// Returns `ArgsError` if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ArgsError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }

    let path = Path::new(path);
    let io_err = |source| ArgsError::DbFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(io_err)?;
    }

    Ok(())
}

impl Cli {
    #[must_use]
    pub fn generator_draft(&self) -> GeneratorSettingsDraft {
        GeneratorSettingsDraft {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_normalized_to_absolute_sqlite_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/a.db"),
            "sqlite:///tmp/a.db"
        );
        assert_eq!(normalize_sqlite_url("/tmp/a.db"), "sqlite:///tmp/a.db");
        assert_eq!(normalize_sqlite_url("sqlite:/tmp/b.db"), "sqlite:///tmp/b.db");

        let relative = normalize_sqlite_url("data/c.db");
        assert!(relative.starts_with("sqlite:///"));
        assert!(relative.ends_with("data/c.db"));
    }

    #[test]
    fn prepare_rejects_non_file_urls() {
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
        assert!(matches!(
            prepare_sqlite_file("postgres://x"),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
        assert!(matches!(
            prepare_sqlite_file("sqlite://"),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
    }

    #[test]
    fn cli_defaults_parse() {
        let cli = Cli::try_parse_from(["skyhigh", "--advance-delay-ms", "0"]).unwrap();
        assert_eq!(cli.advance_delay_ms, 0);
        assert!(cli.log.is_none());
    }

    #[test]
    fn generator_flags_feed_the_settings_draft() {
        let cli = Cli::try_parse_from([
            "skyhigh",
            "--api-key",
            "sk-test",
            "--model",
            "gpt-test",
            "--base-url",
            "http://localhost:8080/v1/",
        ])
        .unwrap();
        let settings = cli.generator_draft().validate().unwrap();
        assert_eq!(settings.api_key(), "sk-test");
        assert_eq!(settings.model(), "gpt-test");
        assert_eq!(settings.base_url(), "http://localhost:8080/v1");
    }
}
