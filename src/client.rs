use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, StatusCode, header};
use serde::Deserialize;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::completion::Provider;
use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatCompletion, ChatCompletionRequest};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible chat-completions API.
///
/// The client holds no credential; one is passed with every call so that a
/// key typed in mid-session behaves exactly like one from the environment.
#[derive(Clone)]
pub struct OpenAi {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl OpenAi {
    /// Create a new client against `base_url`, or the OpenAI endpoint.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_deref().unwrap_or(DEFAULT_API_URL))?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(format!("Failed to build HTTP client: {}", e), e)
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every request and response.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self, credential: &Credential) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| {
                Error::authentication(
                    "API key contains characters that cannot be sent in a header",
                )
            })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        Ok(headers)
    }

    /// Send one chat-completion request and parse the response.
    pub async fn create(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion> {
        credential.require()?;
        let headers = self.default_headers(credential)?;
        let url = format!("{}chat/completions", self.base_url);

        if let Some(logger) = &self.logger {
            logger.log_request(request);
        }
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.post(&url, headers, request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        match &result {
            Ok(completion) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(completion);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(err);
                }
            }
        }
        result
    }

    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), e)
                } else {
                    Error::http_client(format!("Request failed: {}", e), e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let request_id = header_str(response.headers(), "x-request-id");
            let retry_after = header_str(response.headers(), "retry-after")
                .and_then(|val| val.parse::<u64>().ok());
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    return Err(Error::http_client(
                        format!("Failed to read error response: {}", e),
                        e,
                    ));
                }
            };
            return Err(error_from_response(status, &body, request_id, retry_after));
        }

        response.json::<ChatCompletion>().await.map_err(|e| {
            Error::serialization(format!("Failed to parse response: {}", e), e)
        })
    }
}

#[async_trait::async_trait]
impl Provider for OpenAi {
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion> {
        self.create(credential, request).await
    }
}

impl std::fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAi")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|val| val.to_str().ok())
        .map(String::from)
}

/// Validate the base URL and make sure it ends in a slash so that
/// `chat/completions` joins beneath it.
fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)?;
    if parsed.cannot_be_a_base() {
        return Err(Error::validation(
            format!("{base_url} cannot be used as a base URL"),
            Some("base_url".to_string()),
        ));
    }
    let mut base_url = parsed.to_string();
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    Ok(base_url)
}

/// Map a non-success response to our Error type.
///
/// OpenAI-compatible servers wrap failures as
/// `{"error": {"message": ..., "type": ..., "param": ..., "code": ...}}`; when
/// the body is anything else it becomes the message verbatim.
fn error_from_response(
    status: StatusCode,
    body: &str,
    request_id: Option<String>,
    retry_after: Option<u64>,
) -> Error {
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        #[serde(rename = "type")]
        error_type: Option<String>,
        message: Option<String>,
        param: Option<String>,
        code: Option<serde_json::Value>,
    }

    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error);
    let error_type = detail.as_ref().and_then(|e| {
        e.error_type.clone().or_else(|| match &e.code {
            Some(serde_json::Value::String(code)) => Some(code.clone()),
            _ => None,
        })
    });
    let message = detail
        .as_ref()
        .and_then(|e| e.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("empty response body")
                    .to_string()
            } else {
                body.to_string()
            }
        });
    let param = detail.as_ref().and_then(|e| e.param.clone());

    match status.as_u16() {
        400 => Error::BadRequest { message, param },
        401 => Error::authentication(message),
        403 => Error::Permission { message },
        404 => Error::NotFound { message },
        408 => Error::timeout(message, None),
        429 => Error::rate_limit(message, retry_after),
        500 => Error::InternalServer {
            message,
            request_id,
        },
        502..=504 => Error::ServiceUnavailable {
            message,
            retry_after,
        },
        status_code => Error::Api {
            status_code,
            error_type,
            message,
            request_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Model, Turn};

    #[test]
    fn client_creation() {
        let client = OpenAi::new(None).unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = OpenAi::with_options(
            Some("http://localhost:8080/v1".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1/");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = OpenAi::new(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn debug_does_not_leak() {
        let client = OpenAi::new(None).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("api.openai.com"));
    }

    #[test]
    fn authorization_header_is_sensitive() {
        let client = OpenAi::new(None).unwrap();
        let headers = client
            .default_headers(&Credential::new("sk-test"))
            .unwrap();
        let auth = headers.get(header::AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        assert_eq!(auth.to_str().unwrap(), "Bearer sk-test");
    }

    #[test]
    fn unencodable_credential_is_an_authentication_error() {
        let client = OpenAi::new(None).unwrap();
        let err = client
            .default_headers(&Credential::new("sk-\u{7f}bad"))
            .unwrap_err();
        assert!(err.is_authentication());
        assert!(err.is_provider_failure());
        assert!(!err.to_string().contains("sk-"));
    }

    #[tokio::test]
    async fn empty_credential_fails_before_io() {
        // Port 9 (discard) on an unroutable host: reaching the network would
        // produce a connection error, not a missing credential.
        let client = OpenAi::new(Some("http://192.0.2.1:9/v1/".to_string())).unwrap();
        let request = ChatCompletionRequest::new(Model::default(), vec![Turn::user("hi")]);
        let err = client
            .create(&Credential::empty(), &request)
            .await
            .unwrap_err();
        assert!(err.is_missing_credential());
    }

    #[derive(Default)]
    struct Recorder(std::sync::Mutex<Vec<String>>);

    impl ClientLogger for Recorder {
        fn log_request(&self, request: &ChatCompletionRequest) {
            let line = format!("request {}", request.messages.len());
            self.0.lock().unwrap().push(line);
        }

        fn log_response(&self, completion: &ChatCompletion) {
            self.0.lock().unwrap().push(format!("response {}", completion.id));
        }

        fn log_error(&self, error: &Error) {
            let kind = if error.is_connection() { "connection" } else { "other" };
            self.0.lock().unwrap().push(format!("error {kind}"));
        }
    }

    #[tokio::test]
    async fn logger_sees_request_and_failure() {
        let recorder = Arc::new(Recorder::default());
        let client = OpenAi::with_options(
            Some("http://127.0.0.1:9/v1/".to_string()),
            Some(Duration::from_secs(2)),
        )
        .unwrap()
        .with_logger(recorder.clone());
        let request = ChatCompletionRequest::new(
            Model::default(),
            vec![Turn::system("persona"), Turn::user("hi")],
        );
        let err = client
            .create(&Credential::new("sk-test"), &request)
            .await
            .unwrap_err();
        assert!(err.is_provider_failure());
        let lines = recorder.0.lock().unwrap().clone();
        assert_eq!(lines, vec!["request 2", "error connection"]);
    }

    #[tokio::test]
    async fn logger_is_skipped_without_credential() {
        let recorder = Arc::new(Recorder::default());
        let client = OpenAi::new(None).unwrap().with_logger(recorder.clone());
        let request = ChatCompletionRequest::new(Model::default(), vec![Turn::user("hi")]);
        let _ = client.create(&Credential::empty(), &request).await;
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn openai_error_envelope_is_parsed() {
        let body = r#"{"error":{"message":"Incorrect API key provided: sk-****","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#;
        let err = error_from_response(StatusCode::UNAUTHORIZED, body, None, None);
        assert!(err.is_authentication());
        assert_eq!(
            err.to_string(),
            "Authentication error: Incorrect API key provided: sk-****"
        );
    }

    #[test]
    fn status_codes_map_to_variants() {
        let body = r#"{"error":{"message":"m","type":"t","param":"messages"}}"#;
        assert!(matches!(
            error_from_response(StatusCode::BAD_REQUEST, body, None, None),
            Error::BadRequest { param: Some(ref p), .. } if p == "messages"
        ));
        assert!(matches!(
            error_from_response(StatusCode::FORBIDDEN, body, None, None),
            Error::Permission { .. }
        ));
        assert!(matches!(
            error_from_response(StatusCode::NOT_FOUND, body, None, None),
            Error::NotFound { .. }
        ));
        assert!(error_from_response(StatusCode::REQUEST_TIMEOUT, body, None, None).is_timeout());
        assert!(matches!(
            error_from_response(StatusCode::TOO_MANY_REQUESTS, body, None, Some(7)),
            Error::RateLimit {
                retry_after: Some(7),
                ..
            }
        ));
        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            body,
            Some("req_1".to_string()),
            None,
        );
        assert_eq!(err.request_id(), Some("req_1"));
        assert!(err.is_server_error());
        assert!(error_from_response(StatusCode::BAD_GATEWAY, body, None, None).is_server_error());
        assert_eq!(
            error_from_response(StatusCode::CONFLICT, body, None, None).status_code(),
            Some(409)
        );
    }

    #[test]
    fn non_json_body_becomes_message() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "upstream down", None, Some(3));
        assert_eq!(
            err.to_string(),
            "Service unavailable: upstream down (retry after 3 seconds)"
        );

        let err = error_from_response(StatusCode::IM_A_TEAPOT, "", None, None);
        assert_eq!(err.to_string(), "API error: I'm a teapot");
    }

    #[test]
    fn error_code_stands_in_for_type() {
        let body = r#"{"error":{"message":"nope","code":"model_overloaded"}}"#;
        let err = error_from_response(StatusCode::CONFLICT, body, None, None);
        assert_eq!(err.to_string(), "model_overloaded: nope");
    }
}
