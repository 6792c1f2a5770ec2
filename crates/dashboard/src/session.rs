//! Session values injected by the surrounding auth system.

use core::fmt;

/// Environment variable the headless host reads its token from.
pub const AUTH_TOKEN_VAR: &str = "LOGIDASH_AUTH_TOKEN";

/// Bearer token issued by the auth system.
///
/// `Debug` is redacted so credentials never reach the logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Current session as seen by the dashboard: a token or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<Credential>,
}

impl Session {
    /// A session with no token; requests go out without `Authorization`.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(Credential::new(token)),
        }
    }

    pub fn token(&self) -> Option<&Credential> {
        self.token.as_ref()
    }

    /// Build a session from a lookup function; an empty token counts as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(AUTH_TOKEN_VAR).filter(|t| !t.trim().is_empty()) {
            Some(token) => Self::authenticated(token),
            None => Self::anonymous(),
        }
    }

    /// Session from `LOGIDASH_AUTH_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let session = Session::authenticated("super-secret");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn empty_token_is_anonymous() {
        let session = Session::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(session, Session::anonymous());
    }

    #[test]
    fn token_is_read_from_lookup() {
        let session = Session::from_lookup(|key| (key == AUTH_TOKEN_VAR).then(|| "abc".to_string()));
        assert_eq!(session.token().map(Credential::expose), Some("abc"));
    }
}
