use shared::models::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Error reading CSV file: failed to read CSV with any encoding. Last error: {0}")]
    UnreadableFile(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Error processing numeric values: {0}")]
    NumericFault(String),

    #[error("Internal computation error: {0}")]
    InternalComputationError(String),

    #[error("Invalid repayment plan: {0}")]
    InvalidPlan(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

/// Failure classification handed to whatever transport wraps the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadRequest,
    Internal,
}

impl ErrorClass {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorClass::BadRequest => 400,
            ErrorClass::Internal => 500,
        }
    }
}

/// Process exit code for a response status: 0 on success, 2 for rejected input, 1 otherwise.
pub fn exit_code_for_status(status: u16) -> u8 {
    match status {
        200 => 0,
        s if s == ErrorClass::BadRequest.status_code() => 2,
        _ => 1,
    }
}

impl EngineError {
    pub fn classification(&self) -> ErrorClass {
        match self {
            EngineError::MissingInput(_)
            | EngineError::UnsupportedFormat(_)
            | EngineError::UnreadableFile(_)
            | EngineError::MissingColumns(_)
            | EngineError::NumericFault(_)
            | EngineError::InvalidPlan(_) => ErrorClass::BadRequest,
            EngineError::InternalComputationError(_) | EngineError::IoError { .. } => ErrorClass::Internal,
        }
    }
}

impl From<&EngineError> for ErrorResponse {
    fn from(err: &EngineError) -> Self {
        tracing::error!("Mapping EngineError to ErrorResponse: {:?}", err);
        match err.classification() {
            ErrorClass::BadRequest => ErrorResponse { error: err.to_string(), details: None },
            ErrorClass::Internal => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let err = EngineError::MissingColumns(vec!["Date".to_string(), "Fixed Expenses".to_string()]);
        assert_eq!(err.to_string(), "Missing required columns: Date, Fixed Expenses");
    }

    #[test]
    fn test_classification_status_codes() {
        assert_eq!(EngineError::MissingInput("No file provided".into()).classification().status_code(), 400);
        assert_eq!(EngineError::NumericFault("ragged row".into()).classification().status_code(), 400);
        assert_eq!(
            EngineError::InternalComputationError("dataset contains no rows".into()).classification().status_code(),
            500
        );
    }

    #[test]
    fn test_exit_codes_follow_status() {
        assert_eq!(exit_code_for_status(200), 0);
        let bad = EngineError::MissingColumns(vec!["Date".to_string()]);
        assert_eq!(exit_code_for_status(bad.classification().status_code()), 2);
        let internal = EngineError::InternalComputationError("dataset contains no rows".into());
        assert_eq!(exit_code_for_status(internal.classification().status_code()), 1);
    }

    #[test]
    fn test_internal_error_response_carries_details() {
        let err = EngineError::InternalComputationError("dataset contains no rows".into());
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.unwrap().contains("dataset contains no rows"));
    }

    #[test]
    fn test_bad_request_response_has_no_details() {
        let err = EngineError::UnsupportedFormat("File must be a CSV".into());
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "File must be a CSV");
        assert!(body.details.is_none());
    }
}
