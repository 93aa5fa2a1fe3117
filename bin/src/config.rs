//! Window configuration from a JSON file and command-line overrides.

use anyhow::{Context, Result};
use clap::Args;
use geiger_lib::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Window configuration arguments shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct WindowArgs {
    /// JSON file with window settings (window_ms, bucket_count, counter_bits, clock_bits)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trailing window duration in milliseconds
    #[arg(long)]
    window_ms: Option<u32>,

    /// Number of buckets in the window
    #[arg(long)]
    buckets: Option<usize>,

    /// Hardware counter width in bits
    #[arg(long)]
    counter_bits: Option<u8>,

    /// Millisecond clock width in bits
    #[arg(long)]
    clock_bits: Option<u8>,
}

impl WindowArgs {
    /// Builds the effective configuration: defaults, then the file, then flags.
    pub(crate) fn resolve(&self) -> Result<WindowConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => WindowConfig::default(),
        };

        if let Some(window_ms) = self.window_ms {
            config.window_ms = window_ms;
        }
        if let Some(buckets) = self.buckets {
            config.bucket_count = buckets;
        }
        if let Some(bits) = self.counter_bits {
            config.counter_bits = bits;
        }
        if let Some(bits) = self.clock_bits {
            config.clock_bits = bits;
        }

        config
            .validate()
            .context("Invalid window configuration")?;
        Ok(config)
    }
}

/// Reads a window configuration from a JSON file.
fn load_config(path: &Path) -> Result<WindowConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WindowArgs::default().resolve().unwrap();
        assert_eq!(config, WindowConfig::default());
    }

    #[test]
    fn test_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window_ms": 30000, "bucket_count": 50}}"#).unwrap();

        let args = WindowArgs {
            config: Some(file.path().to_path_buf()),
            buckets: Some(30),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.window_ms, 30_000);
        assert_eq!(config.bucket_count, 30);
        assert_eq!(config.ms_per_bucket(), 1_000);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = WindowArgs {
            buckets: Some(0),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let args = WindowArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
