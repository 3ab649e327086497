//! Extraction settings.
//!
//! [`ExtractConfig`] carries everything the extractor needs besides the target
//! date. Defaults reproduce the classic invocation: read `test_logs.log`, write
//! into `output/`. With the `config` cargo feature the same settings can be
//! loaded from a TOML file; command-line flags override file values.

use crate::error::{DatecutError, Result};
use crate::locator::DEFAULT_CHUNK_SIZE;
use std::path::{Path, PathBuf};

/// Log file read when no input is given
pub const DEFAULT_INPUT: &str = "test_logs.log";

/// Directory receiving `output_<date>.txt`
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct ExtractConfig {
    /// Sorted log file to search
    pub input: PathBuf,
    /// Directory for the per-date output file
    pub output_dir: PathBuf,
    /// Bytes skipped past a too-early probe
    pub chunk_size: usize,
    /// Check the sort precondition before searching
    pub verify_sorted: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chunk_size: DEFAULT_CHUNK_SIZE,
            verify_sorted: false,
        }
    }
}

impl ExtractConfig {
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_verify_sorted(mut self, verify_sorted: bool) -> Self {
        self.verify_sorted = verify_sorted;
        self
    }

    /// Reject settings the extractor cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DatecutError::invalid_argument(
                "chunk size must be at least 1 byte",
            ));
        }
        if self.input.as_os_str().is_empty() {
            return Err(DatecutError::invalid_argument("input path is empty"));
        }
        Ok(())
    }

    /// Path of the output file for `date`
    pub fn output_path(&self, date: &str) -> PathBuf {
        self.output_dir.join(format!("output_{date}.txt"))
    }
}

#[cfg(feature = "config")]
impl ExtractConfig {
    /// Parse settings from TOML; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| DatecutError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DatecutError::file_error(
                format!("Failed to read configuration file: {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the per-user configuration file if it exists, else defaults
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/datecut/config.toml`, when the platform has a config dir
#[cfg(feature = "config")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("datecut").join("config.toml"))
}

/// True when `path` names the default input, used to warn about implicit input
pub fn is_default_input(path: &Path) -> bool {
    path == Path::new(DEFAULT_INPUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.input, PathBuf::from("test_logs.log"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.chunk_size, 4096);
        assert!(!config.verify_sorted);
        assert!(config.validate().is_ok());
        assert!(is_default_input(&config.input));
    }

    #[test]
    fn test_builder_and_output_path() {
        let config = ExtractConfig::default()
            .with_input("/var/log/app.log")
            .with_output_dir("/tmp/out")
            .with_chunk_size(512)
            .with_verify_sorted(true);

        assert_eq!(config.chunk_size, 512);
        assert!(config.verify_sorted);
        assert_eq!(
            config.output_path("2024-01-02"),
            PathBuf::from("/tmp/out/output_2024-01-02.txt")
        );
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ExtractConfig::default().with_chunk_size(0);
        match config.validate() {
            Err(DatecutError::InvalidArgument { message }) => assert!(message.contains("chunk")),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_str() {
        let config = ExtractConfig::from_toml_str(
            r#"
            input = "app.log"
            chunk_size = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("app.log"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.chunk_size, 1024);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_str_rejects_bad_values() {
        assert!(matches!(
            ExtractConfig::from_toml_str("chunk_size = 0"),
            Err(DatecutError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ExtractConfig::from_toml_str("unknown_key = true"),
            Err(DatecutError::ConfigError { .. })
        ));
    }
}
