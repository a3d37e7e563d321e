use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not load image {}: {reason}", path.display())]
    ImageDecode { path: PathBuf, reason: String },

    #[error("Cannot delete the only remaining slide")]
    LastSlide,

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::LastSlide;
        assert_eq!(err.to_string(), "Cannot delete the only remaining slide");

        let err = AppError::Settings("invalid max length".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid max length");

        let err = AppError::ImageDecode {
            path: PathBuf::from("cat.png"),
            reason: "unsupported format".to_string(),
        };
        assert_eq!(err.to_string(), "Could not load image cat.png: unsupported format");
    }
}
