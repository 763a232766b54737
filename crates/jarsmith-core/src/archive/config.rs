//! Configuration for jar packaging.

use crate::JarsmithError;
use crate::Result;

/// Default size of the buffer used to copy file content into the archive.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for packaging a directory into an archive.
///
/// # Examples
///
/// ```
/// use jarsmith_core::archive::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_compression_level(9)
///     .with_follow_symlinks(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Compression level (0-9).
    ///
    /// `Some(0)` stores entries uncompressed, `Some(1..=9)` deflates at that
    /// level and `None` deflates at level 6, the same default `jar` uses.
    ///
    /// Default: `None`.
    pub compression_level: Option<u8>,

    /// Archive the targets of symbolic links.
    ///
    /// When `false`, symlinks are skipped and reported as warnings.
    ///
    /// Default: `true`.
    pub follow_symlinks: bool,

    /// Size in bytes of the content copy buffer. Must be at least 1.
    ///
    /// Default: 64 KiB.
    pub buffer_size: usize,

    /// Store Unix permission bits in file entries.
    ///
    /// Default: `false`.
    pub preserve_permissions: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: None,
            follow_symlinks: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            preserve_permissions: false,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets the content copy buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the compression level is above 9 or the
    /// buffer size is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(JarsmithError::InvalidConfig {
                reason: format!("compression level must be 0-9, got {level}"),
            });
        }
        if self.buffer_size == 0 {
            return Err(JarsmithError::InvalidConfig {
                reason: "buffer size must be at least 1 byte".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_config_default() {
        let config = ArchiveConfig::default();
        assert_eq!(config.compression_level, None);
        assert!(config.follow_symlinks);
        assert_eq!(config.buffer_size, 64 * 1024);
        assert!(!config.preserve_permissions);
        assert_eq!(config, ArchiveConfig::new());
    }

    #[test]
    fn test_archive_config_builder() {
        let config = ArchiveConfig::default()
            .with_compression_level(0)
            .with_follow_symlinks(false)
            .with_buffer_size(1)
            .with_preserve_permissions(true);

        assert_eq!(config.compression_level, Some(0));
        assert!(!config.follow_symlinks);
        assert_eq!(config.buffer_size, 1);
        assert!(config.preserve_permissions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_archive_config_rejects_bad_level() {
        let config = ArchiveConfig::default().with_compression_level(10);
        assert!(matches!(
            config.validate(),
            Err(JarsmithError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_archive_config_rejects_zero_buffer() {
        let config = ArchiveConfig::default().with_buffer_size(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("buffer size"));
    }
}
