//! Unified error type for the commontools crate.
//!
//! [`CommonToolsError`] covers both halves of the crate: color parsing and
//! conversion errors, and settings-file discovery and parsing errors.
//! The `From<std::io::Error>` impl lets `?` propagate file I/O failures.

use std::fmt;
use std::path::PathBuf;

/// Unified error type for commontools operations.
#[derive(Debug)]
pub enum CommonToolsError {
    /// Malformed hex color string (bad length or non-hex characters).
    InvalidColorFormat(String),
    /// HSL component outside the inclusive range 0-1.
    InvalidColorComponentRange { h: f64, s: f64, l: f64 },
    /// Neither settings file exists in the base directory.
    ConfigurationFileMissing {
        base_dir: PathBuf,
        json_file: String,
        xml_file: String,
    },
    /// A settings file exists but its content could not be parsed.
    SettingsParse { path: PathBuf, message: String },
    /// Standard I/O error (reading a settings file, resolving the base directory).
    Io(std::io::Error),
}

impl fmt::Display for CommonToolsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommonToolsError::InvalidColorFormat(input) => {
                write!(f, "Invalid HEX value: {input:?}")
            }
            CommonToolsError::InvalidColorComponentRange { h, s, l } => {
                write!(
                    f,
                    "H,S,L should be in range of 0-1 (got h={h}, s={s}, l={l})"
                )
            }
            CommonToolsError::ConfigurationFileMissing {
                base_dir,
                json_file,
                xml_file,
            } => write!(
                f,
                "No settings file found in {} (looked for {json_file} and {xml_file})",
                base_dir.display()
            ),
            CommonToolsError::SettingsParse { path, message } => {
                write!(f, "Settings error in {}: {message}", path.display())
            }
            CommonToolsError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CommonToolsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommonToolsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommonToolsError {
    fn from(e: std::io::Error) -> Self {
        CommonToolsError::Io(e)
    }
}

/// Crate-level Result alias using [`CommonToolsError`].
pub type Result<T> = std::result::Result<T, CommonToolsError>;
