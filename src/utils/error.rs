use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load input '{path}': {message}")]
    InputError { path: String, message: String },

    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for an error that reaches `main`.
    pub fn exit_code(self) -> i32 {
        match self {
            // 警告，但成功
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) | EtlError::InputError { .. } => ErrorCategory::Input,
            EtlError::WriteError { .. } => ErrorCategory::Output,
            EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 寫入失敗只記錄，不影響結束碼
            EtlError::WriteError { .. } => ErrorSeverity::Low,
            EtlError::InputError { .. } | EtlError::SerializationError(_) => ErrorSeverity::High,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::IoError(e) => format!("A file system operation failed: {}", e),
            EtlError::SerializationError(e) => format!("Could not encode the merged data: {}", e),
            EtlError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            EtlError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            EtlError::InputError { path, message } => {
                format!("Could not read dataset '{}': {}", path, message)
            }
            EtlError::WriteError { path, source } => {
                format!("Failed to write {}: {}", path, source)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check that the states and cities files exist and contain valid JSON"
            }
            ErrorCategory::Output => {
                "Check permissions and free space for the output location"
            }
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
            ErrorCategory::Data => "Inspect the input datasets for unexpected values",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
