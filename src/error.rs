//! Error types for the assistant core.

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Speech recognition error (device or decoder failure).
    ///
    /// A recognizer that heard nothing usable returns the [`crate::speech::NO_RESULT`]
    /// sentinel instead of this variant; this is for hard failures only.
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Dialogue engine error.
    #[error("dialogue error: {0}")]
    Dialogue(String),

    /// Encyclopedia lookup error (no page matched, or the service failed).
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Missing or unreadable resource (help text, program path file, media file).
    #[error("resource error: {0}")]
    Resource(String),

    /// Program or file launch error.
    #[error("launch error: {0}")]
    Launch(String),

    /// Alarm scheduling error (out-of-range hour, unparseable request).
    #[error("alarm error: {0}")]
    Alarm(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AssistantError>;
