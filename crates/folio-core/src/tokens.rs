//! Content API credentials.

use std::fmt;

/// Delivery or preview access token for a content space.
///
/// The value is sent as a bearer credential and nowhere else: `Debug` prints
/// a placeholder, and there is no `Display` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value, for building the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_masks_the_token() {
        let token = AccessToken::new("cda-token-3f9a8b7c");
        let debug = format!("{:?}", token);
        assert_eq!(debug, "AccessToken(***)");
        assert_eq!(token.as_str(), "cda-token-3f9a8b7c");
    }
}
