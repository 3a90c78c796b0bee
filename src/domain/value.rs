use crate::domain::validation::ValidationError;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Placeholder shown instead of phone numbers too short to mask partially.
pub const MASKED_PLACEHOLDER: &str = "***";

/// Mask a phone number for logging: keep the first and last three characters.
///
/// Inputs shorter than six characters are replaced by [`MASKED_PLACEHOLDER`].
///
/// ```
/// assert_eq!(asanak::mask_phone("09123456789"), "091***789");
/// assert_eq!(asanak::mask_phone("0912"), "***");
/// ```
pub fn mask_phone(phone: &str) -> String {
    let chars = phone.chars().collect::<Vec<_>>();
    if chars.len() < 6 {
        return MASKED_PLACEHOLDER.to_owned();
    }
    let head = chars[..3].iter().collect::<String>();
    let tail = chars[chars.len() - 3..].iter().collect::<String>();
    format!("{head}{MASKED_PLACEHOLDER}{tail}")
}

fn require_non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account username.
///
/// Invariant: non-empty.
pub struct Username(String);

impl Username {
    /// Configuration field name.
    pub const FIELD: &'static str = "username";
    /// Environment variable consulted when no username is configured explicitly.
    pub const ENV: &'static str = "ASANAK_USERNAME";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(require_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone)]
/// Gateway account password.
///
/// Invariant: non-empty. The value is never printed by `Debug`.
pub struct Password(SecretString);

impl Password {
    /// Configuration field name.
    pub const FIELD: &'static str = "password";
    /// Environment variable consulted when no password is configured explicitly.
    pub const ENV: &'static str = "ASANAK_PASSWORD";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = require_non_empty(value.into(), Self::FIELD)?;
        Ok(Self(SecretString::new(value)))
    }

    /// Expose the password. Only the envelope encoder should need this.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sending number or sender identifier (`srcAddresses`).
///
/// Invariant: non-empty.
pub struct SourceAddress(String);

impl SourceAddress {
    /// Configuration field name.
    pub const FIELD: &'static str = "srcAddress";
    /// Environment variable consulted when no source address is configured explicitly.
    pub const ENV: &'static str = "ASANAK_SOURCE_NUMBER";

    /// Create a validated [`SourceAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(require_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the source address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient number (`destAddresses`).
///
/// Invariant: non-empty. No format checks are applied; the gateway decides what it accepts.
pub struct DestinationAddress(String);

impl DestinationAddress {
    /// Argument name reported when the destination is missing.
    pub const FIELD: &'static str = "destAddress";

    /// Create a validated [`DestinationAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(require_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the destination as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering, see [`mask_phone`].
    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`msgBody`).
///
/// Invariant: non-empty. Whitespace is preserved as provided.
pub struct MessageText(String);

impl MessageText {
    /// Argument name reported when the message is missing.
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(require_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway web-service URL.
///
/// Invariant: absolute `http` or `https` URL with a host.
pub struct Endpoint(Url);

impl Endpoint {
    /// Configuration field name.
    pub const FIELD: &'static str = "endpoint";
    /// Environment variable that overrides the default endpoint.
    pub const ENV: &'static str = "ASANAK_WEBSERVICE";
    /// Vendor web-service URL used when nothing else is configured.
    pub const DEFAULT: &'static str = "https://smsapi.asanak.ir/services/CompositeSmsGateway?wsdl";

    /// Parse and validate an endpoint URL.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = value.as_ref();
        let invalid = |reason: String| ValidationError::InvalidEndpoint {
            input: input.to_owned(),
            reason,
        };

        let url = Url::parse(input).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_owned()));
        }
        Ok(Self(url))
    }

    /// The configured URL, as given.
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// URL the `sendSms` POST is issued to: scheme, host, port and path only.
    ///
    /// Query (the `?wsdl` suffix of the default endpoint) and fragment are dropped.
    pub fn request_target(&self) -> Url {
        let mut target = self.0.clone();
        target.set_query(None);
        target.set_fragment(None);
        target
    }
}
