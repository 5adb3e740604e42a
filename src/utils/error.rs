use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminError {
    #[error("invalid date format: {input}")]
    InvalidDate { input: String },

    #[error("appointment date is in the past: {target} is before {reference}")]
    DateInPast { target: String, reference: String },

    #[error("appointment date is out of working time: {detail}")]
    ShopClosed { detail: String },

    #[error("appointment date is not bookable yet: {target} is after {horizon}")]
    DateNotReady { target: String, horizon: String },

    #[error("could not load time zone: {zone}")]
    LocationLoadFailure { zone: String },

    #[error("invalid appointment type: {value}")]
    InvalidType { value: String },

    #[error("required field is empty: {field}")]
    MissingField { field: String },

    #[error("slot is already booked: {start}")]
    SlotTaken { start: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, TerminError>;

/// Stable identifier of a failure class. The numeric values never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidDate = 0,
    DateInPast = 1,
    ShopClosed = 2,
    DateNotReady = 3,
    LocationLoadFailure = 4,
    InvalidType = 5,
    MissingField = 6,
    SlotTaken = 7,
    Storage = 8,
    Configuration = 9,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::DateInPast => "DATE_IN_PAST",
            ErrorCode::ShopClosed => "SHOP_CLOSED",
            ErrorCode::DateNotReady => "DATE_NOT_READY",
            ErrorCode::LocationLoadFailure => "LOCATION_LOAD_FAILURE",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::SlotTaken => "SLOT_TAKEN",
            ErrorCode::Storage => "STORAGE_ERROR",
            ErrorCode::Configuration => "CONFIGURATION_ERROR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied something the booking rules reject.
    Validation,
    Conflict,
    Configuration,
    Storage,
}

impl TerminError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TerminError::InvalidDate { .. } => ErrorCode::InvalidDate,
            TerminError::DateInPast { .. } => ErrorCode::DateInPast,
            TerminError::ShopClosed { .. } => ErrorCode::ShopClosed,
            TerminError::DateNotReady { .. } => ErrorCode::DateNotReady,
            TerminError::LocationLoadFailure { .. } => ErrorCode::LocationLoadFailure,
            TerminError::InvalidType { .. } => ErrorCode::InvalidType,
            TerminError::MissingField { .. } => ErrorCode::MissingField,
            TerminError::SlotTaken { .. } => ErrorCode::SlotTaken,
            TerminError::DatabaseError(_)
            | TerminError::MigrationError(_)
            | TerminError::StorageError { .. }
            | TerminError::IoError(_)
            | TerminError::SerializationError(_) => ErrorCode::Storage,
            TerminError::ConfigError { .. } | TerminError::InvalidConfigValue { .. } => {
                ErrorCode::Configuration
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            ErrorCode::InvalidDate
            | ErrorCode::DateInPast
            | ErrorCode::ShopClosed
            | ErrorCode::DateNotReady
            | ErrorCode::InvalidType
            | ErrorCode::MissingField => ErrorCategory::Validation,
            ErrorCode::SlotTaken => ErrorCategory::Conflict,
            ErrorCode::LocationLoadFailure | ErrorCode::Configuration => {
                ErrorCategory::Configuration
            }
            ErrorCode::Storage => ErrorCategory::Storage,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let err = TerminError::DateInPast {
            target: "2024-01-05".to_string(),
            reference: "2024-01-08".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::DateInPast);
        assert_eq!(err.code().as_u16(), 1);
        assert_eq!(err.code().as_str(), "DATE_IN_PAST");
        assert!(err.is_validation());

        let err = TerminError::LocationLoadFailure {
            zone: "Mars/Olympus".to_string(),
        };
        assert_eq!(err.code().as_u16(), 4);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_conflict_category() {
        let err = TerminError::SlotTaken {
            start: "2024-01-09 10:00".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(!err.is_validation());
    }
}
