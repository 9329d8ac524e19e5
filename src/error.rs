//! Error types for enquiry-relay.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Configuration-related errors. Surface at startup only — the process
/// refuses to boot with an incomplete SMTP environment rather than
/// failing per request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Mail transport errors.
///
/// Logged internally with full detail; callers only ever see a generic
/// failure message.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid mailbox address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("SMTP relay setup failed: {0}")]
    Relay(String),

    #[error("Failed to assemble message: {0}")]
    Message(String),

    #[error("SMTP send failed: {0}")]
    Send(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
