use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid request field '{field}': {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("Availability source error: {message}")]
    Source { message: String },

    #[error("Data invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssignError {
    pub fn invalid_request(field: &str, reason: impl Into<String>) -> Self {
        AssignError::InvalidRequest {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn source(message: impl Into<String>) -> Self {
        AssignError::Source {
            message: message.into(),
        }
    }

    /// 呼叫端傳入的請求本身有問題
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            AssignError::MissingField { .. } | AssignError::InvalidRequest { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AssignError::MissingField { .. } | AssignError::InvalidRequest { .. } => {
                ErrorCategory::Request
            }
            AssignError::Source { .. }
            | AssignError::InvariantViolation { .. }
            | AssignError::SerializationError(_) => ErrorCategory::Data,
            AssignError::ConfigError { .. }
            | AssignError::ConfigValidationError { .. }
            | AssignError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AssignError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AssignError::MissingField { .. } => {
                "Provide restaurantId, date, time and partySize in the request"
            }
            AssignError::InvalidRequest { .. } => {
                "Check the request format: date as YYYY-MM-DD, time as HH:MM, partySize as a positive integer"
            }
            AssignError::Source { .. } => "Check that the availability snapshot is reachable and retry",
            AssignError::InvariantViolation { .. } => {
                "Fix the snapshot data: every table needs min_capacity <= capacity"
            }
            AssignError::IoError(_) => "Check that the file exists and is readable",
            AssignError::SerializationError(_) => "Make sure the file contains valid JSON",
            AssignError::ConfigError { .. }
            | AssignError::ConfigValidationError { .. }
            | AssignError::InvalidConfigValueError { .. } => {
                "Review the engine configuration file against the documented defaults"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AssignError::MissingField { field } => format!("請求缺少必要欄位: {}", field),
            AssignError::InvalidRequest { field, reason } => {
                format!("請求欄位 '{}' 無效: {}", field, reason)
            }
            AssignError::Source { message } => format!("無法讀取桌位資料: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssignError>;
