//! Error types for presentation export.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or delivering a presentation package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O failure while packing bytes or touching the filesystem.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The host cannot accept a finished package (no writable target, etc.).
    ///
    /// Raised before any XML is generated, so no partial file exists.
    #[error("Exporter unavailable: {0}")]
    SinkUnavailable(String),

    /// The package was built but could not be saved or handed off.
    #[error("Failed to deliver '{filename}': {reason}")]
    Delivery { filename: String, reason: String },

    /// The archive would exceed a limit of the 32-bit ZIP format.
    #[error("ZIP archive limit exceeded: {0}")]
    ArchiveLimit(String),

    /// ZIP archive error while reading a package back.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error while reading a package back.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A package part references something that is not there.
    #[error("Package integrity violation: {0}")]
    Integrity(String),
}
