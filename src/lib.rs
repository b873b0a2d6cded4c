pub mod borrower;
pub mod cash_outs;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod mortgage;
pub mod params;
pub mod payments;
pub mod property;
pub mod snapshot;
pub mod types;

// re-export key types
pub use borrower::Borrower;
pub use cash_outs::{CashOut, CashOutLedger};
pub use config::{BorrowerConfig, LendingInstitution, MortgageConfig, PropertyConfig};
pub use decimal::{Money, Rate, RoundingMode};
pub use errors::{FieldViolation, MortgageError, Result, ValidationError};
pub use events::{EventStore, MortgageEvent};
pub use mortgage::{calculate_loan_difference, DownPaymentInput, Mortgage};
pub use params::{Input, MortgageParams};
pub use payments::{AddOnFee, Payment, PresentValue, Term};
pub use property::Property;
pub use snapshot::MortgageData;
pub use types::{Account, CashOutKind, Cycle, HousingType, MarketSegment, MortgageId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
