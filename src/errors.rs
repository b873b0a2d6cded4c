use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    #[error("division by zero: {context}")]
    DivisionByZero {
        context: String,
    },

    #[error("rounding necessary: {value} cannot be represented with {scale} decimal places")]
    RoundingNecessary {
        value: Decimal,
        scale: u32,
    },

    #[error("invalid amount: {input:?}")]
    InvalidAmount {
        input: String,
    },

    #[error("borrower birthdate not set")]
    BirthdateNotSet,

    #[error("minimum borrowing age not met: age {age}, minimum {minimum}")]
    MinimumBorrowingAgeNotMet {
        age: u32,
        minimum: u32,
    },

    #[error("maximum borrowing age breached: age {age}, maximum {maximum}")]
    MaximumBorrowingAgeBreached {
        age: u32,
        maximum: u32,
    },

    #[error("invalid term: {value}")]
    InvalidTerm {
        value: i64,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// a single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// every rejected field of one parameter set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// names of the rejected fields in input order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(MortgageError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{} {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
