//! [`Key`] is a wrapper around a Hugging Face access token.

use zeroize::Zeroizing;

/// Error for when no token was supplied (empty or only whitespace).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Missing credential: a Hugging Face access token is required")]
pub struct MissingCredential;

/// Stores a Hugging Face access token. The token is zeroed on drop. The object
/// features a [`Display`] implementation that can be used to write out the
/// token. **Be sure to zeroize whatever you write it to**. Prefer
/// [`Key::read`] if you only need to borrow it.
///
/// [`Display`]: std::fmt::Display
pub struct Key {
    inner: Zeroizing<String>,
}

impl Key {
    /// Borrow the token.
    pub fn read(&self) -> &str {
        self.inner.as_str()
    }

    /// Build the `Authorization` header value for this token.
    pub(crate) fn bearer(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bearer {}", self.read()))
    }
}

impl TryFrom<String> for Key {
    type Error = MissingCredential;

    /// Create a new key from a string. The string is zeroized if it turns out
    /// to be invalid. Surrounding whitespace (such as a trailing newline from
    /// stdin) is trimmed.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let s = Zeroizing::new(s);
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MissingCredential);
        }

        let inner = if trimmed.len() == s.len() {
            s
        } else {
            Zeroizing::new(trimmed.to_string())
        };

        Ok(Self { inner })
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(**redacted**)")
    }
}

impl std::fmt::Display for Key {
    /// Write out the key. Make sure to zeroize whatever you write it to if at
    /// all possible.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Not a real token. Do not use a string literal for a real one. There is
    // no TryFrom<&'static str> for Key for this reason.
    const TOKEN: &str = "hf_aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456789";

    #[test]
    fn test_key() {
        let key = Key::try_from(TOKEN.to_string()).unwrap();
        assert_eq!(key.to_string(), TOKEN);
        assert_eq!(key.read(), TOKEN);
    }

    #[test]
    fn test_key_trims_whitespace() {
        let key = Key::try_from(format!("  {TOKEN}\n")).unwrap();
        assert_eq!(key.read(), TOKEN);
    }

    #[test]
    fn test_missing_credential() {
        assert_eq!(Key::try_from(String::new()).unwrap_err(), MissingCredential);
        assert_eq!(
            Key::try_from(" \t\n".to_string()).unwrap_err(),
            MissingCredential
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = Key::try_from(TOKEN.to_string()).unwrap();
        assert!(!format!("{key:?}").contains(TOKEN));
    }

    #[test]
    fn test_bearer() {
        let key = Key::try_from(TOKEN.to_string()).unwrap();
        assert_eq!(key.bearer().as_str(), format!("Bearer {TOKEN}"));
    }
}
