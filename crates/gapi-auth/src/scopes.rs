//! OAuth scope list.

use crate::error::{AuthError, AuthResult};

/// Prefix shared by every Google API scope URL.
pub const SCOPE_BASE_URL: &str = "https://www.googleapis.com/auth/";

/// Ordered, immutable list of full scope URLs.
///
/// Built from short names such as `drive.readonly` or `calendar`, each of
/// which is appended to [`SCOPE_BASE_URL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scopes(Vec<String>);

impl Scopes {
    /// Builds the scope list from short names, preserving order.
    ///
    /// Fails if no names are given or any name is blank.
    pub fn from_short_names<I, S>(names: I) -> AuthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scopes = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(AuthError::configuration("scope names must not be blank"));
            }
            scopes.push(format!("{SCOPE_BASE_URL}{name}"));
        }

        if scopes.is_empty() {
            return Err(AuthError::configuration(
                "at least one OAuth scope is required",
            ));
        }

        Ok(Self(scopes))
    }

    /// Returns the full scope URLs.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the scopes joined by spaces, as sent in the `scope` parameter.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
