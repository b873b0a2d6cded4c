use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, RoundingMode};
use crate::errors::Result;
use crate::payments::{compound_factor, Term};

/// discounted value of a level monthly payment stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentValue {
    pub payment: Money,
    pub term: Term,
    pub interest_rate: Rate,
}

impl PresentValue {
    pub fn new(payment: Money, term: Term, interest_rate: Rate) -> Self {
        Self {
            payment,
            term,
            interest_rate,
        }
    }

    /// PV = payment * (1 - (1 + r)^-n) / r, rounded to whole units
    pub fn discounted_value(&self) -> Result<Money> {
        let n = self.term.months_to_pay();
        if self.interest_rate.is_zero() {
            return Ok(Money::from_decimal(
                self.payment.as_decimal() * Decimal::from(n),
            ));
        }

        let r = self.interest_rate.monthly_rate().as_decimal();
        let compound = compound_factor(r, n);
        let factor = (Decimal::ONE - Decimal::ONE / compound) / r;

        Money::of(RoundingMode::HalfUp.apply(self.payment.as_decimal() * factor, 0)?)
    }
}
