//! Client configuration structures and loaders.
//!
//! Runtime tuning (pacing delay, seed, names) lives in
//! [`duel_runtime::RuntimeConfig`]; this module only holds settings that are
//! specific to the text frontend.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How combat and match events are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document per event.
    Json,
}

impl FromStr for EventFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown event format `{other}`")),
        }
    }
}

/// Text frontend configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Length of the simulated cast animation.
    pub animation: Duration,
    pub format: EventFormat,
    /// Session identifier used to name the log directory.
    pub session_id: Option<String>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            animation: Duration::from_millis(600),
            format: EventFormat::Text,
            session_id: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_ANIMATION_MS` - simulated animation length (default: 600)
    /// - `DUEL_EVENT_FORMAT` - `text` or `json` (default: text)
    /// - `DUEL_SESSION_ID` - session identifier (default: `session_<unix time>`)
    /// - `DUEL_LOG_DIR` - log directory override
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("DUEL_ANIMATION_MS") {
            config.animation = Duration::from_millis(millis);
        }

        if let Some(format) = read_env::<EventFormat>("DUEL_EVENT_FORMAT") {
            config.format = format;
        }

        config.session_id = read_env::<String>("DUEL_SESSION_ID").filter(|id| !id.is_empty());
        config.log_dir = read_env::<PathBuf>("DUEL_LOG_DIR");

        config
    }

    /// Session id, generated from the current time when not configured.
    pub fn session_id(&self) -> String {
        self.session_id.clone().unwrap_or_else(|| {
            let secs = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{secs}")
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
