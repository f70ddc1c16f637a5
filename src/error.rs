//! Error types for persona-chat.
//!
//! A chat interaction fails in one of two ways: the credential is missing, in
//! which case nothing was sent, or the provider call failed.  The latter is
//! split into the variants below so callers can inspect status codes and
//! request ids, but [`Error::is_provider_failure`] folds them back into one
//! condition for the rendering surface.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// An underlying cause, shared so that [`Error`] stays `Clone`.
pub type Source = Arc<dyn error::Error + Send + Sync>;

/// The main error type for persona-chat.
///
/// Every variant but [`Error::MissingCredential`] carries a `message` meant
/// for the person at the keyboard.
#[derive(Clone, Debug)]
pub enum Error {
    /// No credential was supplied; no request was attempted.
    MissingCredential,

    /// Any other non-success status from the provider.
    Api {
        status_code: u16,
        /// `type` (or `code`) from the provider's error envelope.
        error_type: Option<String>,
        message: String,
        request_id: Option<String>,
    },

    /// 401: the key was rejected.
    Authentication { message: String },

    /// 403: the key may not use this model or endpoint.
    Permission { message: String },

    /// 404: usually an unknown model name.
    NotFound { message: String },

    /// 429: rate limit or exhausted quota.
    RateLimit {
        message: String,
        /// Seconds, from the `retry-after` header.
        retry_after: Option<u64>,
    },

    /// 400: the provider refused the request body.
    BadRequest {
        message: String,
        param: Option<String>,
    },

    /// The request took longer than the client timeout, or the provider sent 408.
    Timeout {
        message: String,
        /// The client timeout, in seconds, when it was ours.
        duration: Option<f64>,
    },

    /// The provider could not be reached.
    Connection {
        message: String,
        source: Option<Source>,
    },

    /// 500 from the provider.
    InternalServer {
        message: String,
        request_id: Option<String>,
    },

    /// 502, 503 or 504 from the provider.
    ServiceUnavailable {
        message: String,
        retry_after: Option<u64>,
    },

    /// JSON or YAML that could not be read, or a reply with nothing in it.
    Serialization {
        message: String,
        source: Option<Source>,
    },

    /// A local file could not be read.
    Io {
        message: String,
        source: Arc<io::Error>,
    },

    /// The HTTP client failed outside the cases above.
    HttpClient {
        message: String,
        source: Option<Source>,
    },

    /// A value was rejected before it was used.
    Validation {
        message: String,
        param: Option<String>,
    },

    /// A base URL that does not parse.
    Url {
        message: String,
        source: Option<url::ParseError>,
    },
}

fn shared<E: error::Error + Send + Sync + 'static>(err: E) -> Option<Source> {
    Some(Arc::new(err))
}

impl Error {
    pub fn missing_credential() -> Self {
        Error::MissingCredential
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Error::Authentication {
            message: message.into(),
        }
    }

    pub fn rate_limit(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Error::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    pub fn timeout(message: impl Into<String>, duration: Option<f64>) -> Self {
        Error::Timeout {
            message: message.into(),
            duration,
        }
    }

    pub fn connection<E>(message: impl Into<String>, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Error::Connection {
            message: message.into(),
            source: shared(source),
        }
    }

    pub fn http_client<E>(message: impl Into<String>, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Error::HttpClient {
            message: message.into(),
            source: shared(source),
        }
    }

    pub fn serialization<E>(message: impl Into<String>, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Error::Serialization {
            message: message.into(),
            source: shared(source),
        }
    }

    /// A well-formed response that does not contain a usable reply.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Error::Serialization {
            message: message.into(),
            source: None,
        }
    }

    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    pub fn validation(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Validation {
            message: message.into(),
            param,
        }
    }

    /// Returns true if the interaction was refused for lack of a credential.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Error::MissingCredential)
    }

    /// Returns true if this error came from calling the provider.
    ///
    /// Everything except a missing credential and local validation counts:
    /// transport, authentication, quota, provider-side and malformed-response
    /// errors all surface to the user the same way.
    pub fn is_provider_failure(&self) -> bool {
        !matches!(self, Error::MissingCredential | Error::Validation { .. })
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Error::RateLimit { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// 5xx from the provider.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::InternalServer { .. } | Error::ServiceUnavailable { .. }
        ) || matches!(self, Error::Api { status_code, .. } if *status_code >= 500)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// The provider's request id, for support tickets.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Error::Api { request_id, .. } | Error::InternalServer { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }

    /// How long the provider asked us to wait, in seconds.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimit { retry_after, .. }
            | Error::ServiceUnavailable { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// The HTTP status behind this error, when there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            Error::Authentication { .. } => Some(401),
            Error::Permission { .. } => Some(403),
            Error::NotFound { .. } => Some(404),
            Error::RateLimit { .. } => Some(429),
            Error::BadRequest { .. } => Some(400),
            Error::InternalServer { .. } => Some(500),
            _ => None,
        }
    }

    fn label(&self) -> &str {
        match self {
            Error::MissingCredential => "Missing credential",
            Error::Api {
                error_type: Some(error_type),
                ..
            } => error_type,
            Error::Api { .. } => "API error",
            Error::Authentication { .. } => "Authentication error",
            Error::Permission { .. } => "Permission error",
            Error::NotFound { .. } => "Resource not found",
            Error::RateLimit { .. } => "Rate limit exceeded",
            Error::BadRequest { .. } => "Bad request",
            Error::Timeout { .. } => "Timeout error",
            Error::Connection { .. } => "Connection error",
            Error::InternalServer { .. } => "Internal server error",
            Error::ServiceUnavailable { .. } => "Service unavailable",
            Error::Serialization { .. } => "Serialization error",
            Error::Io { .. } => "I/O error",
            Error::HttpClient { .. } => "HTTP client error",
            Error::Validation { .. } => "Validation error",
            Error::Url { .. } => "URL error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Error::MissingCredential => "supply an API key before chatting",
            Error::Api { message, .. }
            | Error::Authentication { message }
            | Error::Permission { message }
            | Error::NotFound { message }
            | Error::RateLimit { message, .. }
            | Error::BadRequest { message, .. }
            | Error::Timeout { message, .. }
            | Error::Connection { message, .. }
            | Error::InternalServer { message, .. }
            | Error::ServiceUnavailable { message, .. }
            | Error::Serialization { message, .. }
            | Error::Io { message, .. }
            | Error::HttpClient { message, .. }
            | Error::Validation { message, .. }
            | Error::Url { message, .. } => message,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())?;
        match self {
            Error::BadRequest {
                param: Some(param), ..
            }
            | Error::Validation {
                param: Some(param), ..
            } => write!(f, " (parameter: {param})")?,
            Error::Timeout {
                duration: Some(duration),
                ..
            } => write!(f, " ({duration} seconds)")?,
            _ => {}
        }
        if let Some(retry_after) = self.retry_after() {
            write!(f, " (retry after {retry_after} seconds)")?;
        }
        if let Some(request_id) = self.request_id() {
            write!(f, " (Request ID: {request_id})")?;
        }
        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. }
            | Error::Serialization { source, .. }
            | Error::HttpClient { source, .. } => {
                source.as_deref().map(|e| e as &(dyn error::Error + 'static))
            }
            Error::Io { source, .. } => Some(source.as_ref()),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::serialization(format!("YAML error: {err}"), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Url {
            message: format!("URL parse error: {err}"),
            source: Some(err),
        }
    }
}

/// A specialized Result type for persona-chat operations.
pub type Result<T> = std::result::Result<T, Error>;
