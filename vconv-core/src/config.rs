// ============================================================================
// vconv-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration used by the conversion orchestrator:
// which encoder binary to run, where converted files and diagnostic logs go,
// and whether existing outputs may be overwritten.
//
// KEY COMPONENTS:
// - CoreConfig: Settings shared by every run of an orchestrator
// - Default constants: encoder name, output folder, fixed audio codec, etc.
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// vconv-cli) and handed to `ConversionOrchestrator::new`. Per-run choices
// (folder, codec, profile) travel separately in a `ConversionRequest`.

// ---- Standard library imports ----
use std::path::{Component, Path, PathBuf};

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Encoder binary looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Name of the folder, inside the input directory, that receives outputs.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "converted";

/// Container extension of every output file, whatever the codec.
pub const OUTPUT_EXTENSION: &str = "mov";

/// Audio codec passed to the encoder for every job.
pub const AUDIO_CODEC: &str = "aac";

/// Prefix of the per-run diagnostic log file name.
pub const LOG_FILE_PREFIX: &str = "conversion_errors";

/// Extensions (lower case, without dot) of files picked up for conversion.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mkv", "mov"];

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Settings shared by every run of a `ConversionOrchestrator`.
///
/// # Examples
///
/// ```rust
/// use vconv_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::default();
/// config.encoder = PathBuf::from("/usr/local/bin/ffmpeg");
/// config.overwrite = false;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Encoder binary, either a bare name resolved through `PATH` or a path.
    pub encoder: PathBuf,

    /// Folder name created inside the input directory for outputs.
    pub output_subdir: String,

    /// Where diagnostic logs go. Defaults to the output directory.
    pub log_dir: Option<PathBuf>,

    /// Replace existing output files (`-y`). When off, the encoder gets `-n`
    /// and a job whose output already exists fails.
    pub overwrite: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            encoder: PathBuf::from(DEFAULT_ENCODER),
            output_subdir: DEFAULT_OUTPUT_SUBDIR.to_string(),
            log_dir: None,
            overwrite: true,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration that runs the given encoder binary.
    pub fn with_encoder(encoder: impl Into<PathBuf>) -> Self {
        Self {
            encoder: encoder.into(),
            ..Self::default()
        }
    }

    /// Checks the settings that cannot be caught by the type system.
    pub fn validate(&self) -> CoreResult<()> {
        if self.encoder.as_os_str().is_empty() {
            return Err(CoreError::Config("encoder path is empty".to_string()));
        }

        let mut components = Path::new(&self.output_subdir).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if self.output_subdir.trim().is_empty() || !single_name {
            return Err(CoreError::Config(format!(
                "output folder name '{}' must be a single path component",
                self.output_subdir
            )));
        }

        Ok(())
    }

    /// Output directory for a given input directory.
    pub fn output_dir_for(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(&self.output_subdir)
    }

    /// Directory receiving the run's diagnostic log.
    pub fn log_dir_for(&self, output_dir: &Path) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| output_dir.to_path_buf())
    }

    /// Printable name of the encoder for logs and error messages.
    pub fn encoder_name(&self) -> String {
        self.encoder.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.encoder, PathBuf::from("ffmpeg"));
        assert!(config.overwrite);
    }

    #[test]
    fn test_output_dir_is_converted_subfolder() {
        let config = CoreConfig::default();
        let out = config.output_dir_for(Path::new("/videos"));
        assert_eq!(out, PathBuf::from("/videos/converted"));
        assert_eq!(config.log_dir_for(&out), out);
    }

    #[test]
    fn test_log_dir_override() {
        let config = CoreConfig {
            log_dir: Some(PathBuf::from("/var/log/vconv")),
            ..CoreConfig::default()
        };
        assert_eq!(
            config.log_dir_for(Path::new("/videos/converted")),
            PathBuf::from("/var/log/vconv")
        );
    }

    #[test]
    fn test_invalid_output_subdir_rejected() {
        let config = CoreConfig {
            output_subdir: "a/b".to_string(),
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let empty = CoreConfig {
            output_subdir: "  ".to_string(),
            ..CoreConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_empty_encoder_rejected() {
        let config = CoreConfig::with_encoder("");
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
