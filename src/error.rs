use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// The selection core itself is total and never errors; these cover the shell
/// boundary (terminal, data file, config).
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from reading the data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the tree data file.
    #[error("Invalid tree data: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid JSON that doesn't describe a usable tree.
    #[error("Invalid tree data: {0}")]
    Data(String),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
        assert!(app_err.to_string().starts_with("Invalid tree data"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn data_error_display() {
        let err = AppError::Data("root node has no name".into());
        assert_eq!(err.to_string(), "Invalid tree data: root node has no name");
    }
}
