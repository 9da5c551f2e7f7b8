use thiserror::Error;

use crate::core::bootstrap::BootstrapError;
use crate::core::tool_server::DownstreamServiceError;

/// Every way a run can end badly.
///
/// Bootstrap failures stop the process before anything is spawned; downstream
/// failures come from the tool server after start-up and are reported as-is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Downstream(#[from] DownstreamServiceError),
}

impl AppError {
    pub fn is_bootstrap(&self) -> bool {
        matches!(self, AppError::Bootstrap(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_errors_keep_their_message() {
        let err: AppError = BootstrapError::DriveFolderNotConfigured.into();
        assert!(err.is_bootstrap());
        assert_eq!(
            err.to_string(),
            BootstrapError::DriveFolderNotConfigured.to_string()
        );
    }

    #[test]
    fn test_downstream_errors_are_verbatim() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: AppError = DownstreamServiceError::Transport(io).into();
        assert!(!err.is_bootstrap());
        assert_eq!(err.to_string(), "Tool server transport error: pipe closed");
    }
}
