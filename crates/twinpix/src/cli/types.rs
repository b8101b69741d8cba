//! CLI enum types shared by the scan and move commands.

use clap::ValueEnum;
use twinpix_core::ConflictPolicy;

/// Report formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl OutputFormat {
    /// Parse the `output.format` config value.
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "jsonl" => Self::Jsonl,
            _ => Self::Text,
        }
    }

    /// Core writer format, or `None` for text.
    pub fn as_core(self) -> Option<twinpix_core::OutputFormat> {
        match self {
            Self::Text => None,
            Self::Json => Some(twinpix_core::OutputFormat::Json),
            Self::Jsonl => Some(twinpix_core::OutputFormat::JsonLines),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// What to do when a file with the same name is already in the subfolder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnConflict {
    /// Leave the duplicate in place and report it
    Fail,
    /// Replace the file already in the subfolder
    Overwrite,
    /// Move under a new name with a numeric suffix
    Rename,
}

impl From<OnConflict> for ConflictPolicy {
    fn from(value: OnConflict) -> Self {
        match value {
            OnConflict::Fail => ConflictPolicy::Fail,
            OnConflict::Overwrite => ConflictPolicy::Overwrite,
            OnConflict::Rename => ConflictPolicy::Rename,
        }
    }
}
