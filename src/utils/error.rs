use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalonError {
    #[error("Stylist has no salon")]
    MissingSalon,

    #[error("Stylist name list is empty or does not contain \"{name}\"")]
    EmptyNameList { name: String },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("A stylist with name \"{name}\" already exists.")]
    DuplicateName { name: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid date '{input}': {source}")]
    DateParseError {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    Validation,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SalonError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSalon | Self::EmptyNameList { .. } => ErrorCategory::Precondition,
            Self::ValidationError { .. } | Self::DuplicateName { .. } => ErrorCategory::Validation,
            Self::NotFound { .. }
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::CsvError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::DateParseError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Precondition => ErrorSeverity::Critical,
            ErrorCategory::Storage => match self {
                Self::NotFound { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingSalon => "The stylist is not attached to a salon".to_string(),
            Self::EmptyNameList { name } => {
                format!("Could not place \"{}\" in the salon's stylist list", name)
            }
            Self::DuplicateName { name } => {
                format!("A stylist with name \"{}\" already exists.", name)
            }
            Self::NotFound { entity, id } => format!("No {} with id {}", entity, id),
            Self::DateParseError { input, .. } => format!("'{}' is not a valid date", input),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Precondition => "Assign the stylist to an existing salon before saving",
            ErrorCategory::Validation => "Correct the highlighted field and save again",
            ErrorCategory::Storage => "Check that the data file exists and is readable JSON",
            ErrorCategory::Configuration => "Review the TOML configuration file",
            ErrorCategory::Input => "Use dates in YYYY-MM-DD format",
        }
    }
}

pub type Result<T> = std::result::Result<T, SalonError>;
