use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unsupported mime type to render: {0}")]
    UnsupportedFormat(String),

    #[error("Unable to infer file type from filename: {}", path.display())]
    UnknownExtension { path: PathBuf },

    #[error("browser driver unavailable ({command}): {message}")]
    DriverUnavailable { command: String, message: String },

    #[error("browser driver error: {0}")]
    Driver(String),

    #[error("render session already terminated")]
    SessionTerminated,

    #[error("render worker exited unexpectedly")]
    WorkerGone,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("driver protocol JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Core(#[from] plotwire_core::Error),
}
