//! Provider identifier type.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_ID_LEN: usize = 64;

/// Identifier a host uses to select a provider (e.g. `deepseek`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a provider identifier after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProviderId`] if the identifier is empty, too long,
    /// or contains characters outside `a-z0-9-_.`.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_identifier(&id)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProviderId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        value.0
    }
}

fn validate_identifier(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidProviderId {
            id: String::new(),
            reason: "identifier cannot be empty".into(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(Error::InvalidProviderId {
            id: id.into(),
            reason: format!("identifier length must be <= {MAX_ID_LEN}"),
        });
    }

    if !id
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '.'))
    {
        return Err(Error::InvalidProviderId {
            id: id.into(),
            reason: "identifier must contain lowercase alphanumeric, dash, underscore, or dot"
                .into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_vendor_names() {
        let id: ProviderId = "deepseek".parse().expect("id");
        assert_eq!(id.as_str(), "deepseek");
        assert_eq!(id.to_string(), "deepseek");
    }

    #[test]
    fn rejects_uppercase_and_empty() {
        assert!(matches!(
            ProviderId::new("DeepSeek"),
            Err(Error::InvalidProviderId { .. })
        ));
        assert!(matches!(
            ProviderId::new(""),
            Err(Error::InvalidProviderId { .. })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let err = serde_json::from_str::<ProviderId>("\"Not Valid\"");
        assert!(err.is_err());
        let ok: ProviderId = serde_json::from_str("\"qwen\"").expect("valid id");
        assert_eq!(ok.as_str(), "qwen");
    }
}
