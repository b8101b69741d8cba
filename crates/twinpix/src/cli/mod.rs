//! Command handlers for the twinpix binary.

pub mod config;
pub mod interactive;
pub mod relocate;
pub mod report;
pub mod scan;
pub mod types;
