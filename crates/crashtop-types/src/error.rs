use std::fmt;

/// Result type for crashtop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the crash-report pipeline.
///
/// Each variant maps to a fixed process exit code so that CI callers can
/// distinguish configuration mistakes from backend failures and from the
/// (valid) empty-result outcome.
#[derive(Debug)]
pub enum Error {
    /// Bad flag value or missing required configuration. No network call
    /// is attempted once this is raised.
    Validation(String),
    /// 401/403 from the backend. Never retried.
    Auth { status: u16, preview: String },
    /// Non-retryable API failure (unexpected HTTP status).
    Api { status: u16, preview: String },
    /// Transient failures (429, 5xx, connect, timeout) that exhausted the
    /// retry budget.
    Network { attempts: u32, reason: String },
    /// The response body was not parseable as the expected structure.
    /// `preview` is length-bounded and never contains unsanitized frames.
    MalformedResponse { preview: String },
    /// No crash groups matched the criteria. A valid outcome, not a failure.
    EmptyResult,
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::Auth { .. } => 1,
            Error::Api { .. } | Error::Network { .. } | Error::MalformedResponse { .. } => 2,
            Error::EmptyResult => 3,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "{}", msg),
            Error::Auth { status, preview } => {
                write!(
                    f,
                    "HTTP {} from Backtrace API. Check that BACKTRACE_API_KEY has query:post capability.",
                    status
                )?;
                if !preview.is_empty() {
                    write!(f, " Response: {}", preview)?;
                }
                Ok(())
            }
            Error::Api { status, preview } => {
                write!(f, "HTTP {} from Backtrace API", status)?;
                if !preview.is_empty() {
                    write!(f, ": {}", preview)?;
                }
                Ok(())
            }
            Error::Network { attempts, reason } => {
                write!(f, "all {} attempts failed: {}", attempts, reason)
            }
            Error::MalformedResponse { preview } => {
                write!(f, "could not parse API response as JSON")?;
                if !preview.is_empty() {
                    write!(f, " (first bytes: {})", preview)?;
                }
                Ok(())
            }
            Error::EmptyResult => write!(f, "No crashes found matching the criteria."),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Validation("bad".into()).exit_code(), 1);
        assert_eq!(
            Error::Auth {
                status: 403,
                preview: String::new()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            Error::Network {
                attempts: 3,
                reason: "timeout".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            Error::MalformedResponse {
                preview: String::new()
            }
            .exit_code(),
            2
        );
        assert_eq!(Error::EmptyResult.exit_code(), 3);
    }
}
