use reqwest::StatusCode;

/// Failure of one stage of the weather pipeline.
///
/// Every stage returns this instead of dropping the chain, so the caller can
/// tell "no such place" apart from a provider that answered with garbage.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Location query is empty")]
    EmptyQuery,

    #[error("No location found for '{query}'")]
    NotFound { query: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Provider request failed with status {status}: {body}")]
    Provider { status: StatusCode, body: String },

    #[error("Request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid setting '{setting}': {reason}")]
    InvalidSetting { setting: &'static str, reason: String },
}

impl WeatherError {
    pub(crate) fn malformed(what: &str, err: impl std::fmt::Display) -> Self {
        WeatherError::Malformed(format!("{what}: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
