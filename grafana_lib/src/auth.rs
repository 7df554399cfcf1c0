//! Authentication strategy, fixed for the lifetime of a client.

use base64::Engine;
use std::fmt;

/// How every request from one client is authenticated.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Auth {
    /// No `Authorization` header (auth proxies, local or test servers).
    #[default]
    None,
    /// HTTP basic credentials.
    Basic { username: String, password: String },
    /// API key or service account token, sent as a bearer token.
    Token(String),
}

impl Auth {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Auth::Token(token.into())
    }

    /// Interpret a credential string the way Grafana tooling does:
    /// `user:password` is basic auth, any other non-empty value is a token.
    pub fn parse(credentials: &str) -> Self {
        let credentials = credentials.trim();
        if credentials.is_empty() {
            return Auth::None;
        }
        match credentials.split_once(':') {
            Some((username, password)) => Auth::basic(username, password),
            None => Auth::token(credentials),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Auth::None)
    }

    /// Value for the `Authorization` header, if any.
    pub(crate) fn header_value(&self) -> Option<String> {
        match self {
            Auth::None => None,
            Auth::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                Some(format!("Basic {}", encoded))
            }
            Auth::Token(token) => Some(format!("Bearer {}", token)),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Auth::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
        }
    }
}
