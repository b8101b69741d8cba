//! Error types for twinpix.
//!
//! Errors are grouped by stage (configuration, scanning, relocation) so the
//! caller can tell per-file failures, which are collected into reports, from
//! fatal ones, which abort the whole operation.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for twinpix operations.
#[derive(Error, Debug)]
pub enum TwinpixError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scanning errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Relocation errors
    #[error("Relocation error: {0}")]
    Relocate(#[from] RelocateError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while scanning a directory.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanError {
    /// The image could not be opened or decoded. Per-file: the scan skips it.
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The target directory could not be listed. Fatal to the scan.
    #[error("Cannot list directory {path}: {message}")]
    Enumeration { path: PathBuf, message: String },
}

impl ScanError {
    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Decode { path, .. } | Self::Enumeration { path, .. } => path,
        }
    }
}

/// Errors raised while relocating duplicates.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelocateError {
    /// A single file could not be moved. Per-file: relocation continues.
    #[error("Failed to move {path}: {message}")]
    Move { path: PathBuf, message: String },

    /// The destination already holds a file with the same name.
    #[error("Cannot move {path}: {destination} already exists")]
    NameCollision { path: PathBuf, destination: PathBuf },

    /// The destination subdirectory could not be created. Fatal: nothing is moved.
    #[error("Cannot create directory {path}: {message}")]
    DirectoryCreate { path: PathBuf, message: String },
}

impl RelocateError {
    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Move { path, .. }
            | Self::NameCollision { path, .. }
            | Self::DirectoryCreate { path, .. } => path,
        }
    }
}

/// Convenience type alias for twinpix results.
pub type Result<T> = std::result::Result<T, TwinpixError>;
