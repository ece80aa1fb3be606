use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

// Every failure the service can surface to a caller.
// The gateway turns these into `{ "message": ... }` bodies using `status_code()`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidTimeframe(String),

    // Required backend setting is absent (500), or an optional capability is unconfigured (501).
    #[error("{message}")]
    Configuration { status: u16, message: String },

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("No response received from RAGFlow service.")]
    Unreachable,

    #[error("Unexpected server error")]
    Unexpected(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_configured(status: u16, message: impl Into<String>) -> Self {
        Self::Configuration {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidTimeframe(_) => 400,
            Self::Configuration { status, .. } => *status,
            Self::Upstream { status, .. } => *status,
            Self::Unreachable => 504,
            Self::Unexpected(_) => 500,
        }
    }

    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ServiceError::validation("personalInfo is required.").status_code(), 400);
        assert_eq!(ServiceError::InvalidTimeframe("bad".into()).status_code(), 400);
        assert_eq!(ServiceError::not_configured(501, "x").status_code(), 501);
        assert_eq!(
            ServiceError::Upstream { status: 422, message: "nope".into() }.status_code(),
            422
        );
        assert_eq!(ServiceError::Unreachable.status_code(), 504);
        assert_eq!(ServiceError::from(anyhow::anyhow!("boom")).status_code(), 500);
    }

    #[test]
    fn unexpected_errors_hide_internal_detail() {
        let err = ServiceError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "Unexpected server error");
        assert!(!err.is_client_error());
        assert!(ServiceError::validation("goals is required.").is_client_error());
        assert!(ServiceError::Upstream { status: 404, message: "x".into() }.is_client_error());
        assert!(!ServiceError::Unreachable.is_client_error());
    }
}
