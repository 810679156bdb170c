//! Domain types for remote image handling.

use url::Url;
use uuid::Uuid;

use crate::domain::errors::LoadError;

/// Cache key for a remote image: the normalized form of its URL.
///
/// Only `http` and `https` URLs can become keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(Url);

impl ImageKey {
    /// Parses and normalizes a URL string.
    ///
    /// # Errors
    /// Returns [`LoadError::InvalidInput`] if the string is not a URL or its
    /// scheme is not `http`/`https`.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| LoadError::invalid_input(format!("unparseable url: {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(LoadError::invalid_input(format!(
                    "unsupported scheme: {other}"
                )));
            }
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(LoadError::invalid_input("url has no host"));
        }

        Ok(Self(url))
    }

    /// Returns the normalized URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Opaque handle for one pending load, used only for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(Uuid);

impl LoadToken {
    /// Generates a fresh, unique token.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LoadToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LoadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Display status of an image-bearing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// No load has been requested.
    #[default]
    NotStarted,
    /// A load is pending.
    Loading,
    /// The image is decoded and ready for display.
    Ready,
    /// The load produced no image; a fallback visual should be shown.
    Placeholder,
}

impl ImageStatus {
    /// Returns true if the image is ready for rendering.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns true if a load is pending.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the fallback visual should be shown.
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_key_normalizes_host_and_default_port() {
        let key = ImageKey::parse("  HTTPS://Example.COM:443/a.jpg ").unwrap();
        assert_eq!(key.as_str(), "https://example.com/a.jpg");
    }

    #[test]
    fn test_equivalent_urls_share_a_key() {
        let a = ImageKey::parse("http://host/img.png").unwrap();
        let b = ImageKey::parse("HTTP://HOST:80/img.png").unwrap();
        assert_eq!(a, b);
    }

    #[test_case("ftp://x/y.png" ; "ftp scheme")]
    #[test_case("file:///tmp/a.png" ; "file scheme")]
    #[test_case("data:image/png;base64,AAAA" ; "data url")]
    #[test_case("not a url" ; "garbage")]
    #[test_case("" ; "empty")]
    #[test_case("/relative/path.png" ; "relative path")]
    fn test_rejects_invalid_input(raw: &str) {
        let err = ImageKey::parse(raw).unwrap_err();
        assert!(matches!(err, LoadError::InvalidInput { .. }));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = LoadToken::new();
        let b = LoadToken::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 32);
    }
}
