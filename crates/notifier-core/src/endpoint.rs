//! Connection target: the service endpoint plus the bearer credential.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// Query parameter the server reads the credential from.
const TOKEN_PARAM: &str = "token";

/// An opaque bearer token.
///
/// `Debug` does not print the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Base URL of the notification service, `ws://` or `wss://`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Parse and validate an endpoint URL.
    pub fn parse(s: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(s).map_err(|e| EndpointError::Invalid(s.to_string(), e))?;
        match url.scheme() {
            "ws" | "wss" => Ok(Self { url }),
            other => Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Whether the connection needs TLS.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }

    /// The URL actually dialed: the endpoint with `token=<credential>` appended.
    pub fn target(&self, credential: &Credential) -> Url {
        self.with_token(credential.expose())
    }

    /// Same as [`Endpoint::target`] with the token masked, for logging.
    pub fn redacted_target(&self) -> Url {
        self.with_token("redacted")
    }

    fn with_token(&self, token: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair(TOKEN_PARAM, token);
        url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = EndpointError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Error parsing an endpoint.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid endpoint url {0}: {1}")]
    Invalid(String, #[source] url::ParseError),
    #[error("endpoint scheme must be ws or wss, got: {0}")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_appends_token() {
        let ep: Endpoint = "ws://127.0.0.1:8000/ws/notifications/".parse().unwrap();
        let url = ep.target(&Credential::new("tok123"));
        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:8000/ws/notifications/?token=tok123"
        );
    }

    #[test]
    fn target_keeps_existing_query() {
        let ep = Endpoint::parse("wss://example.com/ws/?room=7").unwrap();
        assert!(ep.is_secure());
        let url = ep.target(&Credential::new("abc"));
        assert_eq!(url.as_str(), "wss://example.com/ws/?room=7&token=abc");
    }

    #[test]
    fn target_encodes_token() {
        let ep = Endpoint::parse("ws://localhost/ws/").unwrap();
        let url = ep.target(&Credential::new("a&b=c"));
        assert_eq!(url.as_str(), "ws://localhost/ws/?token=a%26b%3Dc");
    }

    #[test]
    fn target_is_stable() {
        let ep = Endpoint::parse("ws://localhost/ws/").unwrap();
        let cred = Credential::new("t");
        assert_eq!(ep.target(&cred), ep.target(&cred));
        assert_eq!(ep.as_url().as_str(), "ws://localhost/ws/");
    }

    #[test]
    fn redacted_hides_token() {
        let ep = Endpoint::parse("ws://localhost/ws/").unwrap();
        let shown = ep.redacted_target().to_string();
        assert_eq!(shown, "ws://localhost/ws/?token=redacted");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("secret");
        assert!(!format!("{cred:?}").contains("secret"));
        assert_eq!(cred.expose(), "secret");
    }

    #[test]
    fn rejects_http() {
        let err = Endpoint::parse("http://localhost/ws/").unwrap_err();
        assert!(matches!(err, EndpointError::UnsupportedScheme(s) if s == "http"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Endpoint::parse("not a url"),
            Err(EndpointError::Invalid(..))
        ));
    }
}
