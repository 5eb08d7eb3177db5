use catalog_layout::LayoutError;
use thiserror::Error;

/// Errors raised while drawing pages or serializing the PDF.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF library error: {0}")]
    PdfLibError(String),

    #[error("Image for record {0} was never registered with the document")]
    UnknownImage(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::PdfLibError(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// The error type returned by every export entry point.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
