//! Common error handling for the client core

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core error types shared across crates
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum CoreError {
    #[error("Storage operation failed: {message}")]
    Storage { message: String },

    #[error("Missing path parameter `{name}` for {template}")]
    MissingPathParam { template: String, name: String },
}

impl CoreError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::storage("localStorage unavailable").to_string(),
            "Storage operation failed: localStorage unavailable"
        );
        let missing = CoreError::MissingPathParam {
            template: "backend/projects/:id".to_string(),
            name: "id".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Missing path parameter `id` for backend/projects/:id"
        );
    }
}
