pub mod amortization;
pub mod present_value;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::Cycle;

pub use amortization::Payment;
pub use present_value::PresentValue;

/// length of a payment stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub value: u32,
    pub cycle: Cycle,
}

impl Term {
    /// term expressed in years (balance payment)
    pub fn years(value: u32) -> Self {
        Self {
            value,
            cycle: Cycle::Yearly,
        }
    }

    /// term expressed in months (down payment)
    pub fn months(value: u32) -> Self {
        Self {
            value,
            cycle: Cycle::Monthly,
        }
    }

    pub fn months_to_pay(&self) -> u32 {
        match self.cycle {
            Cycle::Monthly => self.value,
            Cycle::Yearly => self.value * 12,
        }
    }

    /// whole years, rounded down for monthly terms
    pub fn years_to_pay(&self) -> u32 {
        match self.cycle {
            Cycle::Monthly => self.value / 12,
            Cycle::Yearly => self.value,
        }
    }
}

/// fee added on top of every monthly amortization (e.g. insurance riders)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnFee {
    pub name: String,
    pub monthly_amount: Money,
}

impl AddOnFee {
    pub fn new(name: impl Into<String>, monthly_amount: Money) -> Self {
        Self {
            name: name.into(),
            monthly_amount,
        }
    }
}

/// `(1 + r)^n` by repeated multiplication
pub(crate) fn compound_factor(monthly_rate: rust_decimal::Decimal, months: u32) -> rust_decimal::Decimal {
    let base = rust_decimal::Decimal::ONE + monthly_rate;
    let mut compound = rust_decimal::Decimal::ONE;
    for _ in 0..months {
        compound *= base;
    }
    compound
}
