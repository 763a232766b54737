//! Compiler driver configuration.

use std::path::Path;
use std::path::PathBuf;

/// Settings for invoking `javac`.
///
/// # Examples
///
/// ```
/// use jarsmith_core::CompilerConfig;
///
/// let config = CompilerConfig::default()
///     .with_javac("/opt/jdk-21/bin/javac")
///     .with_encoding("UTF-8");
/// assert_eq!(config.encoding.as_deref(), Some("UTF-8"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Explicit compiler executable. Looked up on `PATH` when `None`.
    pub javac: Option<PathBuf>,

    /// Source encoding passed as `-encoding`. Omitted when `None`.
    pub encoding: Option<String>,
}

impl CompilerConfig {
    /// Uses `path` as the compiler executable.
    #[must_use]
    pub fn with_javac<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.javac = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the source encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = CompilerConfig::default();
        assert!(config.javac.is_none());
        assert!(config.encoding.is_none());
    }

    #[test]
    fn test_builders() {
        let config = CompilerConfig::default()
            .with_javac("bin/javac")
            .with_encoding("ISO-8859-1");
        assert_eq!(config.javac.as_deref(), Some(Path::new("bin/javac")));
        assert_eq!(config.encoding.as_deref(), Some("ISO-8859-1"));
    }
}
