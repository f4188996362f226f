use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by chart models, codecs and the API transport.
///
/// The variants follow the failure taxonomy of the library:
/// - [`Error::Validation`] — a field value outside its legal set, raised at
///   construction/assignment time with the offending value and the legal
///   set in the message.
/// - [`Error::Precondition`] — an operation called in the wrong state
///   (missing chart id, missing credential), raised before any network
///   call is attempted.
/// - [`Error::Api`] / [`Error::RateLimited`] — a non-success response from
///   the Datawrapper API, with the HTTP status and response body surfaced.
/// - [`Error::Http`] / [`Error::Response`] — transport failures and
///   responses whose shape the client cannot interpret.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Precondition(String),

    #[error("{op} failed with HTTP {status}: {body}")]
    Api { op: String, status: u16, body: String },

    #[error("{op} was rate limited (HTTP 429): {body}")]
    RateLimited { op: String, body: String },

    #[error("request error during {op}")]
    Http {
        op: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response shape: {0}")]
    Response(String),

    #[error("json error")]
    Json(#[from] serde_json::Error),

    #[error("csv error")]
    Csv(#[from] csv::Error),

    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A validation failure for `field`, carrying a human-readable reason.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A validation failure for a closed-set field, listing the legal values.
    pub fn invalid_option(field: &str, got: &str, allowed: &[&str]) -> Self {
        Error::Validation {
            field: field.to_string(),
            message: format!("{got:?} is not one of {}", allowed.join(", ")),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_option_names_value_and_legal_set() {
        let err = Error::invalid_option("x-grid", "sideways", &["off", "on", "ticks"]);
        let msg = err.to_string();
        assert!(msg.contains("x-grid"), "{msg}");
        assert!(msg.contains("sideways"), "{msg}");
        assert!(msg.contains("off, on, ticks"), "{msg}");
    }

    #[test]
    fn precondition_message_passes_through() {
        let err = Error::precondition("no chart id set; call create() first");
        assert!(err.to_string().contains("create()"));
    }
}
