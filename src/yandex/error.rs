use std::error::Error;
use std::fmt;

/// Failure classification for remote-API calls.
///
/// The retry wrapper keys its policy off this taxonomy: `Unauthorized`
/// is terminal (credentials have to be refreshed out-of-band), the rest
/// are transient and worth another attempt.
#[derive(Debug)]
pub enum ApiError {
    /// Credentials rejected by the service; retrying cannot help.
    Unauthorized(String),
    /// Connection-level failure: DNS, TLS, timeouts, resets.
    Network(reqwest::Error),
    /// The service answered with something that does not parse; the raw
    /// payload is kept for diagnostics.
    BadResponse { context: String, payload: String },
    /// A well-formed API-level error (`{"error": {...}}`).
    Api { name: String, message: String },
    /// Local filesystem failure while persisting downloaded audio.
    Io(std::io::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(message) => write!(f, "Unauthorized: {message}"),
            ApiError::Network(err) => write!(f, "NetworkError: {err}"),
            ApiError::BadResponse { context, payload } => {
                write!(f, "BadResponse: {context} (payload: \"{payload}\")")
            }
            ApiError::Api { name, message } => write!(f, "ApiError[{name}]: {message}"),
            ApiError::Io(err) => write!(f, "IoError: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Network(err) => Some(err),
            ApiError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status)
                if status == reqwest::StatusCode::UNAUTHORIZED
                    || status == reqwest::StatusCode::FORBIDDEN =>
            {
                ApiError::Unauthorized(err.to_string())
            }
            _ => ApiError::Network(err),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err)
    }
}

/// Innermost cause of an error chain, for compact one-line reporting.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current
}

/// Full diagnostic rendering of an error and its causal chain, outermost
/// first. Printed before each retry and on terminal escalation so
/// failures can be diagnosed without a debugger.
pub fn describe_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = format!("{err}");
    let mut current = err;
    while let Some(source) = current.source() {
        rendered.push_str(&format!("\n  caused by: {source}"));
        current = source;
    }
    rendered
}
