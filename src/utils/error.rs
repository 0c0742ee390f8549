use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenaissanceError {
    #[error("Sale price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },

    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: String, value: Decimal },

    #[error("Platform fee {platform_pct}% plus studio fee {studio_pct}% leaves no artist payout")]
    InvalidSplit {
        platform_pct: Decimal,
        studio_pct: Decimal,
    },

    #[error("Price range is inverted: {lo} > {hi}")]
    InvalidPriceRange { lo: Decimal, hi: Decimal },

    #[error("Payment details are missing for {method}")]
    MissingPaymentDetails { method: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Amount is too large to compute the {operation}")]
    AmountOverflow { operation: &'static str },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Cart index {index} is out of range (cart has {len} items)")]
    CartIndexOutOfRange { index: usize, len: usize },

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Unknown catalog item: {id}")]
    UnknownItem { id: u32 },

    #[error("Ledger has no settled transactions")]
    EmptyLedger,

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate catalog item id: {id}")]
    DuplicateItemId { id: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input that must be corrected before retrying.
    Validation,
    /// Operation attempted in a state that does not allow it.
    Precondition,
    Configuration,
    System,
}

impl RenaissanceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NonPositivePrice { .. }
            | Self::PercentOutOfRange { .. }
            | Self::InvalidSplit { .. }
            | Self::InvalidPriceRange { .. }
            | Self::MissingPaymentDetails { .. }
            | Self::ValidationError { .. }
            | Self::AmountOverflow { .. } => ErrorCategory::Validation,
            Self::EmptyCart
            | Self::CartIndexOutOfRange { .. }
            | Self::SessionNotFound { .. }
            | Self::UnknownItem { .. }
            | Self::EmptyLedger => ErrorCategory::Precondition,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::DuplicateItemId { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Precondition
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidSplit { platform_pct, studio_pct } => format!(
                "Total commission rate ({}%) must stay below 100%. Please adjust the rates.",
                platform_pct + studio_pct
            ),
            Self::MissingPaymentDetails { .. } => "Please enter payment details.".to_string(),
            Self::EmptyCart => "Your cart is empty.".to_string(),
            Self::AmountOverflow { operation } => {
                format!("The amounts involved are too large to compute the {}.", operation)
            }
            Self::UnknownItem { id } => format!("No artwork with id {} exists in the catalog.", id),
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                format!("A system error occurred: {}", self)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Correct the highlighted input and submit again.",
            ErrorCategory::Precondition => match self {
                Self::EmptyCart => "Add at least one artwork to the cart first.",
                Self::SessionNotFound { .. } => "Open a new session and retry.",
                Self::UnknownItem { .. } => "Browse the catalog to find a valid artwork id.",
                Self::EmptyLedger => "Complete a checkout before exporting the ledger.",
                _ => "Refresh the cart and pick an existing entry.",
            },
            ErrorCategory::Configuration => "Check the configuration file against the documented sections.",
            ErrorCategory::System => "Check file permissions and available disk space.",
        }
    }
}

pub type Result<T> = std::result::Result<T, RenaissanceError>;
