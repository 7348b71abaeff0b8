//! Secret handling for registry credentials.
//!
//! The registry token is injected at runtime (config file or environment) and
//! must never show up in logs, debug output or serialized config.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// A secret value that is redacted in logs and debug output.
///
/// # Example
///
/// ```rust
/// use wax_common_secret::Secret;
///
/// let token = Secret::new("qpm-abc123".to_string());
/// assert_eq!(format!("{}", token), "[REDACTED]");
/// assert_eq!(format!("{:?}", token), "Secret([REDACTED])");
/// assert_eq!(token.expose(), "qpm-abc123");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    /// Create a new secret.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the secret value.
    ///
    /// Only the transport that sends the credential should call this.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// Deserialize normally, serialize as redacted.
impl<'de, T: Zeroize + Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Secret::new)
    }
}

impl<T: Zeroize> Serialize for Secret<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

/// Type alias for a secret string.
pub type SecretString = Secret<String>;

impl SecretString {
    /// Whether the secret holds nothing usable (empty or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Replace every occurrence of this secret in `text` with [`REDACTED`].
    ///
    /// Registry responses sometimes echo the bearer token back; anything
    /// that ends up in an error message goes through here first.
    pub fn scrub(&self, text: &str) -> String {
        if self.is_blank() {
            return text.to_string();
        }
        text.replace(self.0.as_str(), REDACTED)
    }
}
