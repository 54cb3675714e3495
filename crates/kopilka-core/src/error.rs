//! Error types for kopilka-core
//!
//! Store operations never fail silently: unknown ids and invalid input come
//! back as explicit `CoreError` values carrying a code.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Category not found
    CategoryNotFound,
    /// Transaction not found
    TransactionNotFound,
    /// Validation error
    ValidationError,
    /// Duplicate entry
    DuplicateEntry,
    /// Operation not allowed in the current state
    InvalidOperation,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::CategoryNotFound => write!(f, "CATEGORY_NOT_FOUND"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::InvalidOperation => write!(f, "INVALID_OPERATION"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for kopilka-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Category not found: {id}")]
    CategoryNotFound { id: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Duplicate entry: {id}")]
    DuplicateEntry { id: String },

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },
}

impl CoreError {
    pub(crate) fn validation(field: &str, message: &str) -> Self {
        CoreError::ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::CategoryNotFound { .. } => ErrorCode::CategoryNotFound,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            CoreError::InvalidOperation { .. } => ErrorCode::InvalidOperation,
        }
    }

    /// Whether the error means the addressed entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::CategoryNotFound { .. } | CoreError::TransactionNotFound { .. }
        )
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::CategoryNotFound { .. } => {
                details = details.with_suggestion(
                    "Use the /api/categories endpoint to list all categories.".to_string()
                );
            }
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Check if the transaction ID is correct.".to_string()
                );
            }
            CoreError::ValidationError { field, message } => {
                details = details.with_detail(serde_json::json!({
                    "field": field,
                    "validation_message": message,
                }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::CategoryNotFound.to_string(), "CATEGORY_NOT_FOUND");
        assert_eq!(ErrorCode::TransactionNotFound.to_string(), "TRANSACTION_NOT_FOUND");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_core_error_code() {
        let error = CoreError::CategoryNotFound { id: "42".to_string() };
        assert_eq!(error.code(), ErrorCode::CategoryNotFound);
        assert!(error.is_not_found());

        let error = CoreError::validation("title", "empty");
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_error_details_validation() {
        let details = CoreError::validation("amount", "must be positive").to_details();
        assert_eq!(details.code, ErrorCode::ValidationError);
        let detail = details.details.unwrap();
        assert_eq!(detail["field"], "amount");
    }

    #[test]
    fn test_error_details_not_found() {
        let details = CoreError::TransactionNotFound { id: "7".to_string() }.to_details();
        assert!(details.message.contains('7'));
        assert!(!details.suggestions.is_empty());
        assert!(details.to_string().starts_with("[TRANSACTION_NOT_FOUND]"));
    }
}
