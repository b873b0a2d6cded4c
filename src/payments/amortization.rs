use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, RoundingMode};
use crate::errors::{MortgageError, Result};
use crate::payments::{compound_factor, AddOnFee, Term};

/// amortized payment: principal repaid over a term at an annual rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub principal: Money,
    pub term: Term,
    pub interest_rate: Rate,
    pub add_on_fees: Vec<AddOnFee>,
    /// share of income that may go to amortization
    pub income_requirement_multiplier: Option<Rate>,
}

impl Payment {
    pub fn new(principal: Money, term: Term, interest_rate: Rate) -> Self {
        Self {
            principal,
            term,
            interest_rate,
            add_on_fees: Vec::new(),
            income_requirement_multiplier: None,
        }
    }

    /// zero-interest installment plan, used for down payments
    pub fn installments(principal: Money, months: u32) -> Self {
        Self::new(principal, Term::months(months), Rate::ZERO)
    }

    pub fn with_add_on_fees(mut self, fees: Vec<AddOnFee>) -> Self {
        self.add_on_fees = fees;
        self
    }

    pub fn with_income_requirement_multiplier(mut self, multiplier: Rate) -> Self {
        self.income_requirement_multiplier = Some(multiplier);
        self
    }

    /// replace the term, keeping principal and rate
    pub fn with_term(mut self, term: Term) -> Self {
        self.term = term;
        self
    }

    pub fn total_add_on_fees(&self) -> Money {
        self.add_on_fees.iter().map(|f| f.monthly_amount).sum()
    }

    /// amortization before add-on fees
    pub fn base_monthly_amortization(&self) -> Result<Money> {
        let months = self.term.months_to_pay();
        if months == 0 {
            return Ok(self.principal);
        }

        if self.interest_rate.is_zero() {
            return self
                .principal
                .divided_by(Decimal::from(months), RoundingMode::Ceiling);
        }

        // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
        let r = self.interest_rate.monthly_rate().as_decimal();
        let compound = compound_factor(r, months);
        let denominator = compound - Decimal::ONE;
        if denominator.is_zero() {
            return Err(MortgageError::DivisionByZero {
                context: "amortization factor".to_string(),
            });
        }
        let emi = self.principal.as_decimal() * r * compound / denominator;

        Money::of(RoundingMode::HalfUp.apply(emi, 0)?)
    }

    /// amortization including add-on fees
    pub fn monthly_amortization(&self) -> Result<Money> {
        Ok(self.base_monthly_amortization()? + self.total_add_on_fees())
    }

    /// gross monthly income needed to carry the amortization
    pub fn income_requirement(&self) -> Result<Money> {
        let multiplier = self.income_requirement_multiplier.ok_or_else(|| {
            MortgageError::CalculationError {
                message: "income requirement multiplier not set".to_string(),
            }
        })?;
        self.monthly_amortization()?
            .divided_by(multiplier.as_decimal(), RoundingMode::Ceiling)
    }
}
