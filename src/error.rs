//! Custom error types for the camera control stack.
//!
//! This module defines the primary error type, `CamError`, for the entire
//! crate. Using the `thiserror` crate, it provides a centralized and
//! consistent way to handle the different kinds of failures that can occur
//! when talking to a camera or loading its configuration.
//!
//! ## Error Hierarchy
//!
//! `CamError` is an enum that consolidates the error sources:
//!
//! - **`DeviceAccess`**: The single error kind raised by the device seam for
//!   any register or command failure (unknown feature, invalid register
//!   state, type mismatch, writability violation). It carries a
//!   human-readable description of what the device rejected.
//! - **`Config`**: Wraps errors from the `figment` crate, typically related
//!   to file parsing or format issues in the configuration files.
//! - **`Configuration`**: Represents semantic errors in the configuration,
//!   such as values that parse but are logically invalid (e.g., a target
//!   gain outside `[0, 1]`). These are caught during the validation step.
//!
//! Propagation follows two policies: parameter handles log and re-raise, so
//! their callers must be prepared to handle a `DeviceAccess` failure; the
//! startup applier and the sequencer programmer instead catch, log, and
//! convert to a boolean result, so their callers check the boolean.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type CamResult<T> = std::result::Result<T, CamError>;

/// Unified error type for device access and configuration handling.
#[derive(Error, Debug)]
pub enum CamError {
    /// A register read/write or command execution was rejected by the device.
    #[error("Device access failure: {0}")]
    DeviceAccess(String),

    /// Configuration file or environment could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Configuration loaded but failed semantic validation.
    #[error("Configuration validation error: {0}")]
    Configuration(String),
}
