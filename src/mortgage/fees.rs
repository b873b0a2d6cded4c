use tracing::debug;

use crate::cash_outs::CashOut;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::MortgageEvent;
use crate::mortgage::Mortgage;
use crate::params::Input;
use crate::types::Account;

impl Mortgage {
    /// keep or drop a single fee entry depending on whether an amount is set
    fn put_fee(&mut self, item: Option<CashOut>, name: &str) -> Result<()> {
        let was_promotional = self.is_promotional();
        match item.filter(|c| c.amount.is_positive()) {
            Some(item) => self.cash_outs.upsert(item),
            None => {
                self.cash_outs.remove(name, Account::CashOut);
            }
        }
        self.refresh_promotion(was_promotional)
    }

    /// recompute the down payment when a ledger change started or ended a promo
    pub(crate) fn refresh_promotion(&mut self, was_promotional: bool) -> Result<()> {
        if self.is_promotional() == was_promotional {
            return Ok(());
        }
        debug!(
            mortgage_id = %self.id,
            promotional = !was_promotional,
            "promotion changed"
        );
        self.update_down_payment()
    }

    fn fee_amount(&self, name: &str) -> Option<Money> {
        self.cash_outs.find(name).map(|c| c.amount)
    }

    pub fn get_consulting_fee(&self) -> Money {
        self.fee_amount(Input::CONSULTING_FEE).unwrap_or(Money::ZERO)
    }

    pub fn set_consulting_fee(&mut self, fee: Option<Money>) -> Result<()> {
        self.put_fee(
            fee.map(|amount| CashOut::add_on(Input::CONSULTING_FEE, amount)),
            Input::CONSULTING_FEE,
        )
    }

    /// charged processing fee, else the one quoted for the property
    pub fn get_processing_fee(&self) -> Money {
        self.fee_amount(Input::PROCESSING_FEE)
            .unwrap_or_else(|| self.property.default_processing_fee(&self.config.property))
    }

    pub fn set_processing_fee(&mut self, fee: Option<Money>) -> Result<()> {
        self.put_fee(
            fee.map(|amount| CashOut::add_on(Input::PROCESSING_FEE, amount)),
            Input::PROCESSING_FEE,
        )
    }

    pub fn get_waived_processing_fee(&self) -> Money {
        self.fee_amount(Input::WAIVED_PROCESSING_FEE)
            .unwrap_or(Money::ZERO)
    }

    pub fn set_waived_processing_fee(&mut self, fee: Option<Money>) -> Result<()> {
        self.put_fee(
            fee.map(|amount| CashOut::deductible(Input::WAIVED_PROCESSING_FEE, amount)),
            Input::WAIVED_PROCESSING_FEE,
        )
    }

    pub fn get_low_cash_out(&self) -> Money {
        self.low_cash_out
    }

    /// signals, so the down payment follows the promo status
    pub fn set_low_cash_out(&mut self, amount: Money) -> Result<()> {
        self.low_cash_out = amount;
        self.dispatch(MortgageEvent::LowCashOutUpdated {
            mortgage_id: self.id,
            low_cash_out: amount,
        })
    }

    /// low cash out strictly above every deductible item
    pub fn is_promotional(&self) -> bool {
        self.low_cash_out > self.cash_outs.total_deductible()
    }

    /// low cash out left after deductibles, zero outside a promo
    pub fn get_balance_cash_out(&self) -> Money {
        if self.is_promotional() {
            self.low_cash_out - self.cash_outs.total_deductible()
        } else {
            Money::ZERO
        }
    }

    /// upsert the down payment and partial fee entries from the live figures
    pub(crate) fn sync_standard_cash_outs(&mut self) -> Result<()> {
        let down_payment = self.down_payment.payment.principal;
        let partial_miscellaneous_fees = self.get_partial_miscellaneous_fees()?;
        debug!(
            mortgage_id = %self.id,
            down_payment = %down_payment,
            partial_miscellaneous_fees = %partial_miscellaneous_fees,
            "standard cash outs synced"
        );
        self.cash_outs
            .upsert(CashOut::add_on(Input::DOWN_PAYMENT, down_payment));
        self.cash_outs.upsert(CashOut::add_on(
            Input::PARTIAL_MISCELLANEOUS_FEES,
            partial_miscellaneous_fees,
        ));
        Ok(())
    }
}
