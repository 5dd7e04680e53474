//! Error types and handling for gpm
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gpm operations
#[derive(Error, Diagnostic, Debug)]
pub enum GpmError {
    // Registry errors
    #[error("Failed to fetch package index from {url}: {reason}")]
    #[diagnostic(
        code(gpm::registry::fetch_failed),
        help("Check your network connection and the repository URL")
    )]
    RegistryFetchFailed { url: String, reason: String },

    #[error("Failed to parse package index: {reason}")]
    #[diagnostic(code(gpm::registry::parse_failed))]
    RegistryParseFailed { reason: String },

    // Download errors
    #[error("Failed to download package from {url}: {reason}")]
    #[diagnostic(
        code(gpm::download::failed),
        help("Check that the download URL is reachable and try again")
    )]
    DownloadFailed { url: String, reason: String },

    // Archive errors
    #[error("Unable to open the downloaded package: {url}")]
    #[diagnostic(
        code(gpm::archive::open_failed),
        help("The downloaded archive may be corrupt; re-run the install to fetch it again")
    )]
    ArchiveOpenFailed { url: String, reason: String },

    #[error("Package archive has an unexpected layout: {reason}")]
    #[diagnostic(
        code(gpm::archive::invalid_layout),
        help("Package archives must wrap their contents in exactly one root folder")
    )]
    ArchiveLayoutInvalid { reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(gpm::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for GpmError {
    fn from(err: std::io::Error) -> Self {
        GpmError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for GpmError {
    fn from(err: inquire::InquireError) -> Self {
        GpmError::IoError {
            message: format!("Failed to read confirmation: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GpmError>;
