use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input file is empty or contains no data rows")]
    EmptyInput,

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 上傳檔案本身的問題 (空檔、編碼、格式)
    Input,
    Config,
    System,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Input => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::System => 3,
        }
    }
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::EmptyInput
            | ConvertError::DecodeError { .. }
            | ConvertError::ParseError { .. } => ErrorCategory::Input,
            ConvertError::ConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorCategory::Config,
            ConvertError::CsvError(_)
            | ConvertError::IoError(_)
            | ConvertError::SerializationError(_)
            | ConvertError::ProcessingError { .. } => ErrorCategory::System,
        }
    }

    /// 給終端使用者看的單行訊息，包含底層原因
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::EmptyInput => "The file is empty: no contacts were found.".to_string(),
            ConvertError::DecodeError { message } => {
                format!("The file could not be read as text: {}", message)
            }
            ConvertError::ParseError { message } => {
                format!("The file is not a valid delimited text file: {}", message)
            }
            ConvertError::IoError(e) => format!("Could not access the file: {}", e),
            ConvertError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting `{}`: {}", field, reason)
            }
            ConvertError::MissingConfigError { field } => {
                format!("Missing required setting `{}`", field)
            }
            other => format!("Conversion failed: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::EmptyInput => "Export the address book again and make sure it has at least one contact row.",
            ConvertError::DecodeError { .. } => "Save the file as UTF-8 text and retry.",
            ConvertError::ParseError { .. } => {
                "Check that every row has the same number of columns as the header row."
            }
            ConvertError::IoError(_) => "Check the file path and permissions.",
            ConvertError::ConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => "Fix the configuration and run again.",
            _ => "Retry the conversion; if it keeps failing, report the file that triggers it.",
        }
    }
}

/// 單列欄位推導失敗；不會中斷轉換，只會讓該欄位變成空字串
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldDerivationWarning {
    #[error("birthday component `{field}` is missing")]
    MissingBirthComponent { field: &'static str },

    #[error("birthday component `{field}` is not a whole number: {value:?}")]
    InvalidBirthComponent { field: &'static str, value: String },

    #[error("{year}-{month}-{day} is not a calendar date")]
    ImpossibleDate { year: i64, month: i64, day: i64 },

    #[error("email local part {local_part:?} has no letters to build a name from")]
    NoNameInEmail { local_part: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ConvertError::EmptyInput.category(), ErrorCategory::Input);
        assert_eq!(
            ConvertError::MissingConfigError {
                field: "source.path".to_string()
            }
            .category(),
            ErrorCategory::Config
        );
        assert_eq!(
            ConvertError::ProcessingError {
                message: "boom".to_string()
            }
            .category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_user_friendly_message_includes_cause() {
        let err = ConvertError::ParseError {
            message: "line 3: expected 4 fields, found 6".to_string(),
        };
        assert!(err.user_friendly_message().contains("expected 4 fields, found 6"));
    }
}
