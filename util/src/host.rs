//! Host environment utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur when querying the host environment.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("The software root environment variable (NOTE_SW_ROOT) is not set")]
    SwRootNotSet,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the path to the software root directory.
///
/// The root is given by the `NOTE_SW_ROOT` environment variable, and contains
/// the `params` and `sessions` directories.
pub fn get_note_sw_root() -> Result<PathBuf, HostError> {
    match std::env::var("NOTE_SW_ROOT") {
        Ok(v) => Ok(PathBuf::from(v)),
        Err(_) => Err(HostError::SwRootNotSet),
    }
}
