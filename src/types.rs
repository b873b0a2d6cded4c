use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a mortgage computation
pub type MortgageId = Uuid;

/// account a cash-out item is booked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    /// paid up front by the borrower
    CashOut,
    /// credited against the down payment
    DownPayment,
    /// folded into the loan amortization
    LoanAmount,
}

/// market segment of a property, drives multipliers and default rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSegment {
    Open,
    Economic,
    Socialized,
}

/// housing type, selects the segment ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    #[default]
    Horizontal,
    Vertical,
}

/// payment cycle of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cycle {
    Monthly,
    Yearly,
}

/// whether a cash-out item raises or lowers the cash requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashOutKind {
    AddOn,
    Deductible,
}
