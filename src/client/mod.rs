//! Client layer: resolves configuration, drives the HTTP exchange and maps
//! transport outcomes to [`AsanakError`].

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::{
    DestinationAddress, Endpoint, MessageText, Password, SendSms, SendSmsResponse, SourceAddress,
    Username, ValidationError, XmlEscaping,
};

/// Transport timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

const LOG_TARGET: &str = "asanak";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    url: String,
    headers: Vec<(&'static str, String)>,
    body: String,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    status_text: Option<String>,
    headers: Vec<(String, String)>,
    /// Only read for 2xx responses.
    body: Option<String>,
}

#[derive(Debug)]
enum TransportError {
    Timeout,
    Network(Box<dyn StdError + Send + Sync>),
}

trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(*name, value.as_str());
            }

            let response = builder
                .body(request.body)
                .send()
                .await
                .map_err(map_reqwest_error)?;

            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_owned(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let body = if status.is_success() {
                Some(response.text().await.map_err(map_reqwest_error)?)
            } else {
                None
            };

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().map(str::to_owned),
                headers,
                body,
            })
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(Box::new(err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fieldless discriminant of [`AsanakError`].
pub enum ErrorKind {
    Configuration,
    Validation,
    Http,
    Timeout,
    Network,
    SoapFault,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AsanakClient`].
///
/// Nothing is retried internally; every failure ends the call.
pub enum AsanakError {
    /// Required credentials or a usable endpoint could not be resolved.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A `send` argument was missing. No request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Non-2xx HTTP status. The response body is not read.
    #[error("HTTP {status}: {}", .status_text.as_deref().unwrap_or("Request failed"))]
    HttpStatus {
        status: u16,
        status_text: Option<String>,
    },

    /// The exchange did not finish within the configured timeout and was aborted.
    #[error("Request timed out")]
    Timeout { after: Duration },

    /// DNS, connect, TLS or I/O failure below HTTP.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered 2xx with a `<soap:Fault>` body.
    #[error("{message}")]
    SoapFault {
        code: String,
        message: String,
        /// Raw response XML, kept for diagnostics.
        response: String,
    },
}

impl AsanakError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::HttpStatus { .. } => ErrorKind::Http,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network(_) => ErrorKind::Network,
            Self::SoapFault { .. } => ErrorKind::SoapFault,
        }
    }
}

#[derive(Debug, Clone)]
/// Resolved, immutable client configuration.
pub struct ClientConfig {
    username: Username,
    password: Password,
    source_address: SourceAddress,
    endpoint: Endpoint,
    debug: bool,
    timeout: Duration,
    escaping: XmlEscaping,
}

impl ClientConfig {
    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn source_address(&self) -> &SourceAddress {
        &self.source_address
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn escaping(&self) -> XmlEscaping {
        self.escaping
    }
}

#[derive(Clone, Default)]
/// Builder for [`AsanakClient`].
///
/// Values left unset (or set to an empty string) are looked up once, in
/// [`AsanakClientBuilder::build`], from `ASANAK_USERNAME`, `ASANAK_PASSWORD`,
/// `ASANAK_SOURCE_NUMBER` and `ASANAK_WEBSERVICE`.
pub struct AsanakClientBuilder {
    username: Option<String>,
    password: Option<String>,
    source_address: Option<String>,
    endpoint: Option<String>,
    debug: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    escaping: XmlEscaping,
}

impl std::fmt::Debug for AsanakClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanakClientBuilder")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("source_address", &self.source_address)
            .field("endpoint", &self.endpoint)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("escaping", &self.escaping)
            .finish()
    }
}

impl AsanakClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sending number or sender id (`srcAddresses`).
    pub fn source_address(mut self, source_address: impl Into<String>) -> Self {
        self.source_address = Some(source_address.into());
        self
    }

    /// Override the web-service URL. Defaults to [`Endpoint::DEFAULT`].
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Emit diagnostic `tracing` events for every stage of a send.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the 20 s timeout applied to the whole exchange.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Escape XML special characters in destination and message.
    ///
    /// Off by default: the gateway has only ever been sent unescaped values and
    /// how it treats entity references is unknown.
    pub fn escape_xml(mut self, escape: bool) -> Self {
        self.escaping = if escape {
            XmlEscaping::Escaped
        } else {
            XmlEscaping::Raw
        };
        self
    }

    /// Build a client, falling back to process environment variables.
    pub fn build(self) -> Result<AsanakClient, AsanakError> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    /// Build a client, resolving unset values through `env` instead of the
    /// process environment.
    pub fn build_with_env<F>(self, env: F) -> Result<AsanakClient, AsanakError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user_agent = self.user_agent.clone();
        let config = self.resolve(&env)?;

        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(|err| AsanakError::Configuration {
            message: format!("failed to build HTTP client: {err}"),
        })?;

        Ok(AsanakClient::from_parts(
            config,
            Arc::new(ReqwestTransport { client }),
        ))
    }

    fn resolve<F>(self, env: &F) -> Result<ClientConfig, AsanakError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = resolve_value(self.username, env, Username::ENV);
        let password = resolve_value(self.password, env, Password::ENV);
        let source_address = resolve_value(self.source_address, env, SourceAddress::ENV);

        let missing = [
            (Username::FIELD, username.is_none()),
            (Password::FIELD, password.is_none()),
            (SourceAddress::FIELD, source_address.is_none()),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(field, _)| field)
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(AsanakError::Configuration {
                message: format!(
                    "username, password, and srcAddress are required (missing: {})",
                    missing.join(", ")
                ),
            });
        }

        let endpoint = resolve_value(self.endpoint, env, Endpoint::ENV);
        let endpoint = Endpoint::parse(endpoint.as_deref().unwrap_or(Endpoint::DEFAULT))
            .map_err(config_error)?;

        Ok(ClientConfig {
            username: Username::new(username.unwrap_or_default()).map_err(config_error)?,
            password: Password::new(password.unwrap_or_default()).map_err(config_error)?,
            source_address: SourceAddress::new(source_address.unwrap_or_default())
                .map_err(config_error)?,
            endpoint,
            debug: self.debug,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            escaping: self.escaping,
        })
    }
}

fn resolve_value<F>(explicit: Option<String>, env: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| env(var).filter(|value| !value.is_empty()))
}

fn config_error(err: ValidationError) -> AsanakError {
    AsanakError::Configuration {
        message: err.to_string(),
    }
}

#[derive(Clone)]
/// Client for the Asanak CompositeSmsGateway SOAP service.
///
/// Cloning is cheap; clones share the configuration and HTTP connection pool,
/// and independent `send` calls may run concurrently.
pub struct AsanakClient {
    config: Arc<ClientConfig>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for AsanakClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanakClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AsanakClient {
    /// Start building a client.
    pub fn builder() -> AsanakClientBuilder {
        AsanakClientBuilder::new()
    }

    /// Build a client entirely from `ASANAK_*` environment variables.
    pub fn from_env() -> Result<Self, AsanakError> {
        Self::builder().build()
    }

    fn from_parts(config: ClientConfig, http: Arc<dyn HttpTransport>) -> Self {
        if config.debug {
            tracing::debug!(
                target: LOG_TARGET,
                endpoint = %config.endpoint.request_target(),
                src_address = config.source_address.as_str(),
                debug = config.debug,
                "init"
            );
        }
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Render the SOAP envelope that [`AsanakClient::send_sms`] would POST.
    pub fn build_request_envelope(&self, request: &SendSms) -> String {
        crate::transport::encode_send_sms_envelope(
            &self.config.username,
            &self.config.password,
            &self.config.source_address,
            request,
            self.config.escaping,
        )
    }

    /// Validate `destination` and `message`, then send.
    ///
    /// An empty argument yields [`AsanakError::Validation`] without any network call.
    pub async fn send(
        &self,
        destination: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<SendSmsResponse, AsanakError> {
        let destination = DestinationAddress::new(destination);
        let message = MessageText::new(message);
        let request = match (destination, message) {
            (Ok(destination), Ok(message)) => SendSms::new(destination, message),
            (Err(err), _) | (_, Err(err)) => {
                if self.config.debug {
                    tracing::warn!(target: LOG_TARGET, error = %err, "send rejected");
                }
                return Err(err.into());
            }
        };
        self.send_sms(request).await
    }

    /// Send one SMS.
    ///
    /// Errors:
    /// - [`AsanakError::HttpStatus`] for non-2xx responses,
    /// - [`AsanakError::Timeout`] when the exchange exceeds the timeout,
    /// - [`AsanakError::Network`] for transport failures,
    /// - [`AsanakError::SoapFault`] when a 2xx body carries `<soap:Fault>`.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, AsanakError> {
        let debug = self.config.debug;
        let xml = self.build_request_envelope(&request);
        let payload_bytes = xml.len();
        let started = Instant::now();

        if debug {
            tracing::debug!(
                target: LOG_TARGET,
                to = %request.destination().masked(),
                message_length = request.message().char_len(),
                payload_bytes,
                "send start"
            );
        }

        let http_request = HttpRequest {
            url: self.config.endpoint.request_target().into(),
            headers: vec![
                ("Content-Type", "text/xml; charset=utf-8".to_owned()),
                ("Content-Length", payload_bytes.to_string()),
                ("SOAPAction", String::new()),
            ],
            body: xml,
        };

        let response = match self.http.post(http_request).await {
            Ok(response) => response,
            Err(TransportError::Timeout) => {
                if debug {
                    tracing::error!(
                        target: LOG_TARGET,
                        timeout_ms = self.config.timeout.as_millis() as u64,
                        "timeout"
                    );
                }
                return Err(AsanakError::Timeout {
                    after: self.config.timeout,
                });
            }
            Err(TransportError::Network(source)) => {
                if debug {
                    tracing::error!(target: LOG_TARGET, error = %source, "network error");
                }
                return Err(AsanakError::Network(source));
            }
        };

        if debug {
            tracing::debug!(
                target: LOG_TARGET,
                status = response.status,
                headers = ?response.headers,
                "http response"
            );
        }

        if !(200..=299).contains(&response.status) {
            let err = AsanakError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            };
            if debug {
                tracing::error!(target: LOG_TARGET, error = %err, "http error");
            }
            return Err(err);
        }

        let body = response.body.unwrap_or_default();

        if debug {
            tracing::debug!(
                target: LOG_TARGET,
                duration_ms = started.elapsed().as_millis() as u64,
                response_bytes = body.len(),
                raw_xml = body.as_str(),
                "response end"
            );
        }

        if let Some(fault) = crate::transport::parse_soap_fault(&body) {
            if debug {
                tracing::error!(
                    target: LOG_TARGET,
                    code = fault.code.as_str(),
                    message = fault.message.as_str(),
                    "soap fault"
                );
            }
            return Err(AsanakError::SoapFault {
                code: fault.code,
                message: fault.message,
                response: body,
            });
        }

        if debug {
            tracing::debug!(target: LOG_TARGET, "send success");
        }

        Ok(SendSmsResponse::new(body))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    enum Outcome {
        Respond {
            status: u16,
            status_text: Option<&'static str>,
            body: &'static str,
        },
        Timeout,
        Network(&'static str),
    }

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        requests: Vec<HttpRequest>,
        outcome: Outcome,
    }

    impl FakeTransport {
        fn new(outcome: Outcome) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    outcome,
                })),
            }
        }

        fn respond(status: u16, body: &'static str) -> Self {
            Self::new(Outcome::Respond {
                status,
                status_text: None,
                body,
            })
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.state.lock().unwrap().requests.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
            Box::pin(async move {
                let outcome = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(request);
                    state.outcome.clone()
                };
                match outcome {
                    Outcome::Respond {
                        status,
                        status_text,
                        body,
                    } => Ok(HttpResponse {
                        status,
                        status_text: status_text.map(str::to_owned),
                        headers: vec![("content-type".to_owned(), "text/xml".to_owned())],
                        body: (200..=299).contains(&status).then(|| body.to_owned()),
                    }),
                    Outcome::Timeout => Err(TransportError::Timeout),
                    Outcome::Network(message) => Err(TransportError::Network(Box::new(
                        io::Error::new(io::ErrorKind::ConnectionReset, message),
                    ))),
                }
            })
        }
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn config(debug: bool) -> ClientConfig {
        AsanakClient::builder()
            .username("user")
            .password("secret")
            .source_address("98100")
            .endpoint("https://example.invalid/services/CompositeSmsGateway?wsdl")
            .debug(debug)
            .resolve(&no_env)
            .unwrap()
    }

    fn make_client(transport: FakeTransport) -> AsanakClient {
        AsanakClient::from_parts(config(false), Arc::new(transport))
    }

    const FAULT_BODY: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><soap:Fault><faultcode>Client</faultcode><faultstring>Bad creds</faultstring></soap:Fault></soap:Body></soap:Envelope>"#;

    #[test]
    fn build_requires_all_credentials() {
        let err = AsanakClient::builder()
            .username("user")
            .build_with_env(no_env)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        let message = err.to_string();
        assert!(message.contains("missing: password, srcAddress"), "{message}");
    }

    #[test]
    fn build_succeeds_with_explicit_values() {
        let client = AsanakClient::builder()
            .username("user")
            .password("secret")
            .source_address("98100")
            .build_with_env(no_env)
            .unwrap();
        assert_eq!(client.config().username().as_str(), "user");
        assert_eq!(client.config().endpoint().url().as_str(), Endpoint::DEFAULT);
        assert_eq!(client.config().timeout(), DEFAULT_TIMEOUT);
        assert!(!client.config().debug());
    }

    #[test]
    fn environment_fills_unset_and_empty_values() {
        let env = env_from(&[
            ("ASANAK_USERNAME", "env-user"),
            ("ASANAK_PASSWORD", "env-pass"),
            ("ASANAK_SOURCE_NUMBER", "3000"),
            ("ASANAK_WEBSERVICE", "http://gateway.invalid/soap"),
        ]);
        let client = AsanakClient::builder()
            .username("")
            .build_with_env(env)
            .unwrap();
        let config = client.config();
        assert_eq!(config.username().as_str(), "env-user");
        assert_eq!(config.source_address().as_str(), "3000");
        assert_eq!(
            config.endpoint().url().as_str(),
            "http://gateway.invalid/soap"
        );
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let env = env_from(&[
            ("ASANAK_USERNAME", "env-user"),
            ("ASANAK_WEBSERVICE", "http://gateway.invalid/soap"),
        ]);
        let client = AsanakClient::builder()
            .username("user")
            .password("secret")
            .source_address("98100")
            .endpoint("https://other.invalid/x")
            .build_with_env(env)
            .unwrap();
        assert_eq!(client.config().username().as_str(), "user");
        assert_eq!(
            client.config().endpoint().url().as_str(),
            "https://other.invalid/x"
        );
    }

    #[test]
    fn empty_environment_values_count_as_missing() {
        let env = env_from(&[
            ("ASANAK_USERNAME", "user"),
            ("ASANAK_PASSWORD", ""),
            ("ASANAK_SOURCE_NUMBER", "98100"),
        ]);
        let err = AsanakClient::builder().build_with_env(env).unwrap_err();
        assert!(err.to_string().contains("missing: password"));
    }

    #[test]
    fn builder_debug_redacts_password() {
        let builder = AsanakClient::builder().password("secret");
        assert!(!format!("{builder:?}").contains("secret"));
    }

    #[test]
    fn invalid_endpoint_is_a_configuration_error() {
        let err = AsanakClient::builder()
            .username("user")
            .password("secret")
            .source_address("98100")
            .endpoint("ftp://example.invalid")
            .build_with_env(no_env)
            .unwrap_err();
        assert!(matches!(err, AsanakError::Configuration { .. }));
    }

    #[test]
    fn debug_output_never_contains_password() {
        let client = make_client(FakeTransport::respond(200, "<ok/>"));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret"), "{rendered}");
        assert!(rendered.contains("98100"));
    }

    #[test]
    fn build_request_envelope_is_pure() {
        let client = make_client(FakeTransport::respond(200, "<ok/>"));
        let request = SendSms::new(
            DestinationAddress::new("09123456789").unwrap(),
            MessageText::new("hello").unwrap(),
        );
        let first = client.build_request_envelope(&request);
        assert_eq!(first, client.build_request_envelope(&request));
        assert!(first.contains("<password>secret</password>"));
        assert!(first.contains("<srcAddresses>98100</srcAddresses>"));
    }

    #[tokio::test]
    async fn send_posts_envelope_with_soap_headers() {
        let transport = FakeTransport::respond(200, "<ok/>");
        let client = make_client(transport.clone());

        client.send("09123456789", "hello").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.url,
            "https://example.invalid/services/CompositeSmsGateway"
        );
        assert!(request.body.contains("<destAddresses>09123456789</destAddresses>"));
        assert!(request.body.contains("<msgBody>hello</msgBody>"));

        let header = |name: &str| {
            request
                .headers
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(
            header("Content-Type").as_deref(),
            Some("text/xml; charset=utf-8")
        );
        assert_eq!(header("SOAPAction").as_deref(), Some(""));
        assert_eq!(header("Content-Length"), Some(request.body.len().to_string()));
    }

    #[tokio::test]
    async fn content_length_counts_utf8_bytes() {
        let transport = FakeTransport::respond(200, "<ok/>");
        let client = make_client(transport.clone());

        client.send("09123456789", "سلام").await.unwrap();

        let request = &transport.requests()[0];
        let length = request
            .headers
            .iter()
            .find(|(k, _)| *k == "Content-Length")
            .map(|(_, v)| v.parse::<usize>().unwrap())
            .unwrap();
        assert_eq!(length, request.body.len());
        assert!(length > request.body.chars().count());
    }

    #[tokio::test]
    async fn send_resolves_with_raw_body() {
        let client = make_client(FakeTransport::respond(200, "<ok/>"));
        let response = client.send("09123456789", "hello").await.unwrap();
        assert_eq!(response.body(), "<ok/>");
        assert_eq!(response.into_body(), "<ok/>");
    }

    #[tokio::test]
    async fn missing_arguments_fail_without_network_call() {
        let transport = FakeTransport::respond(200, "<ok/>");
        let client = make_client(transport.clone());

        let err = client.send("", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            AsanakError::Validation(ValidationError::Empty {
                field: "destAddress"
            })
        ));

        let err = client.send("09123456789", "").await.unwrap_err();
        assert!(matches!(
            err,
            AsanakError::Validation(ValidationError::Empty { field: "message" })
        ));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_error() {
        let transport = FakeTransport::new(Outcome::Respond {
            status: 500,
            status_text: Some("Internal Server Error"),
            body: FAULT_BODY,
        });
        let client = make_client(transport);

        let err = client.send("09123456789", "hello").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Http);
        assert!(matches!(err, AsanakError::HttpStatus { status: 500, .. }));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[tokio::test]
    async fn http_error_without_reason_uses_fallback_text() {
        let client = make_client(FakeTransport::respond(599, ""));
        let err = client.send("09123456789", "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 599: Request failed");
    }

    #[tokio::test]
    async fn fault_body_maps_to_soap_fault_error() {
        let client = make_client(FakeTransport::respond(200, FAULT_BODY));

        let err = client.send("09123456789", "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Bad creds");
        match err {
            AsanakError::SoapFault {
                code,
                message,
                response,
            } => {
                assert_eq!(code, "Client");
                assert_eq!(message, "Bad creds");
                assert_eq!(response, FAULT_BODY);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_maps_to_timeout_error() {
        let client = make_client(FakeTransport::new(Outcome::Timeout));
        let err = client.send("09123456789", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            AsanakError::Timeout { after } if after == DEFAULT_TIMEOUT
        ));
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[tokio::test]
    async fn network_failure_propagates_source() {
        let client = make_client(FakeTransport::new(Outcome::Network("connection reset")));
        let err = client.send("09123456789", "hello").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        let source = StdError::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn concurrent_sends_are_independent() {
        let transport = FakeTransport::respond(200, "<ok/>");
        let client = make_client(transport.clone());

        let other = client.clone();
        let (a, b) = tokio::join!(
            client.send("09120000001", "first"),
            other.send("09120000002", "second")
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(transport.requests().len(), 2);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_subscriber(
        logs: &CapturedLogs,
    ) -> impl tracing::Subscriber + Send + Sync + use<> {
        let writer = logs.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish()
    }

    #[tokio::test]
    async fn debug_logs_mask_destination_and_hide_password() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(capture_subscriber(&logs));

        let client = AsanakClient::from_parts(
            config(true),
            Arc::new(FakeTransport::respond(200, FAULT_BODY)),
        );
        let _ = client.send("09123456789", "hello").await;

        let output = logs.contents();
        assert!(output.contains("init"), "{output}");
        assert!(output.contains("send start"), "{output}");
        assert!(output.contains("091***789"), "{output}");
        assert!(output.contains("soap fault"), "{output}");
        assert!(!output.contains("09123456789"), "{output}");
        assert!(!output.contains("secret"), "{output}");
        assert!(!output.contains("wsdl"), "{output}");
    }

    #[tokio::test]
    async fn debug_disabled_emits_nothing() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(capture_subscriber(&logs));

        let client = make_client(FakeTransport::respond(200, "<ok/>"));
        client.send("09123456789", "hello").await.unwrap();

        assert!(logs.contents().is_empty());
    }
}
