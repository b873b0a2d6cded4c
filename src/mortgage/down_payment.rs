use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::MortgageEvent;
use crate::mortgage::Mortgage;
use crate::payments::{Payment, Term};
use crate::types::Account;

/// a down payment given either as a ready payment or as a bare amount
#[derive(Debug, Clone, PartialEq)]
pub enum DownPaymentInput {
    Payment(Payment),
    Amount(Money),
}

impl From<Payment> for DownPaymentInput {
    fn from(payment: Payment) -> Self {
        DownPaymentInput::Payment(payment)
    }
}

impl From<Money> for DownPaymentInput {
    fn from(amount: Money) -> Self {
        DownPaymentInput::Amount(amount)
    }
}

impl Mortgage {
    pub fn get_percent_down_payment(&self) -> Rate {
        self.down_payment.percent
    }

    /// `notify = false` stores the percent without recomputing the down payment
    pub fn set_percent_down_payment(&mut self, percent: Rate, notify: bool) -> Result<()> {
        self.down_payment.percent = percent;
        if notify {
            self.dispatch(MortgageEvent::PercentDownPaymentUpdated {
                mortgage_id: self.id,
                percent_down_payment: percent,
            })?;
        }
        Ok(())
    }

    /// months
    pub fn get_down_payment_term(&self) -> u32 {
        self.down_payment.term
    }

    pub fn set_down_payment_term(&mut self, months: u32, notify: bool) -> Result<()> {
        self.down_payment.term = months;
        if notify {
            self.dispatch(MortgageEvent::DownPaymentTermUpdated {
                mortgage_id: self.id,
                months,
            })?;
        }
        Ok(())
    }

    pub fn get_down_payment(&self) -> &Payment {
        &self.down_payment.payment
    }

    /// bare amounts become a zero-interest plan over `term` (or the current term).
    /// always signals, which back-computes the percent and term
    pub fn set_down_payment(
        &mut self,
        down_payment: impl Into<DownPaymentInput>,
        term: Option<u32>,
    ) -> Result<()> {
        let payment = match down_payment.into() {
            DownPaymentInput::Payment(payment) => match term {
                Some(months) => payment.with_term(Term::months(months)),
                None => payment,
            },
            DownPaymentInput::Amount(amount) => {
                Payment::installments(amount, term.unwrap_or(self.down_payment.term))
            }
        };
        let principal = payment.principal;
        let months = payment.term.months_to_pay();
        self.down_payment.payment = payment;

        self.dispatch(MortgageEvent::DownPaymentUpdated {
            mortgage_id: self.id,
            principal,
            months,
        })
    }

    /// down payment still owed after items credited to the down payment account
    pub fn get_balance_down_payment(&self) -> Payment {
        let credited = self.cash_outs.total_for_account(Account::DownPayment);
        let balance = (self.down_payment.payment.principal - credited).max(Money::ZERO);
        Payment::installments(balance, self.down_payment.term)
    }
}
