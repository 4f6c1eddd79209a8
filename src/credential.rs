//! Opaque API credential.
//!
//! The credential is read once at process start and passed explicitly to
//! every component that talks to the API. It is never logged: [`Credential`]
//! has no `Display` impl and its `Debug` output is redacted.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{ConvoportError, Result};

/// Environment variable that overrides the credential file.
pub const CREDENTIAL_ENV: &str = "CONVOPORT_API_KEY";

/// An opaque API credential.
///
/// # Example
///
/// ```rust
/// use convoport::Credential;
///
/// let credential = Credential::new("app_id:secret");
/// assert!(!credential.is_empty());
/// assert_eq!(format!("{:?}", credential), "Credential(***)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Reads a credential from a file, dropping the trailing line ending.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::new(chomp(&content)))
    }

    /// Reads the credential from [`CREDENTIAL_ENV`] if set, otherwise from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match std::env::var(CREDENTIAL_ENV) {
            Ok(value) if !value.is_empty() => Ok(Self::new(value)),
            _ => Self::from_file(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails with [`ConvoportError::Auth`] when the credential is empty.
    pub fn ensure_present(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ConvoportError::Auth);
        }
        Ok(())
    }

    /// Splits the credential into basic-auth user and optional password.
    ///
    /// `"user:pass"` becomes `("user", Some("pass"))`; a credential without
    /// a colon is sent as a bare user name.
    pub fn basic_auth_parts(&self) -> (&str, Option<&str>) {
        match self.0.split_once(':') {
            Some((user, pass)) => (user, Some(pass)),
            None => (self.0.as_str(), None),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Removes a single trailing `\n` or `\r\n`.
fn chomp(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
