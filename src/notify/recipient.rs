use std::fmt;

use super::NotifyError;

/// Numbers outside this prefix are rejected
pub const REQUIRED_PREFIX: &str = "+467";

/// Validated phone number in international format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient(String);

impl Recipient {
    /// Parse a recipient from a number without the leading `+`
    pub fn parse(number: &str) -> Result<Self, NotifyError> {
        let to = format!("+{}", number);
        if !to.starts_with(REQUIRED_PREFIX) {
            return Err(NotifyError::InvalidRecipient(to));
        }
        Ok(Self(to))
    }

    /// Derive the recipient from a request path such as `/4671234567`
    ///
    /// The path is percent-decoded first, so `/467%31234567` is the same
    /// recipient as `/4671234567`.
    pub fn from_path(path: &str) -> Result<Self, NotifyError> {
        let decoded = urlencoding::decode(path)
            .map_err(|_| NotifyError::InvalidRecipient(path.to_string()))?;
        Self::parse(decoded.strip_prefix('/').unwrap_or(&*decoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
