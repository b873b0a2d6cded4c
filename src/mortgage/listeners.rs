//! synchronous propagation of change signals between the mortgage figures.
//!
//! | signal                         | listener                         |
//! |--------------------------------|----------------------------------|
//! | contract price                 | down payment, miscellaneous fees |
//! | percent down payment           | down payment                     |
//! | down payment term              | down payment                     |
//! | balance payment term           | down payment                     |
//! | down payment                   | down payment properties          |
//! | percent miscellaneous fees     | miscellaneous fees               |
//! | low cash out                   | down payment                     |
//!
//! listeners go back through the public setters so nested signals fire. the
//! down payment properties listener stores percent and term with `notify = false`,
//! which is what stops amount -> percent -> amount from looping.
//!
//! a promotional package carries a zero down payment. the percent is left alone
//! so the down payment comes back once the promo ends.

use tracing::{debug, trace};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::MortgageEvent;
use crate::mortgage::Mortgage;
use crate::params::Input;
use crate::payments::Payment;

impl Mortgage {
    /// journal the signal, run its listeners, then refresh the ledger once the outermost signal settles
    pub(crate) fn dispatch(&mut self, event: MortgageEvent) -> Result<()> {
        debug!(
            mortgage_id = %self.id,
            event = event.name(),
            depth = self.dispatch_depth,
            "dispatching"
        );
        self.events.emit(event.clone());

        self.dispatch_depth += 1;
        let outcome = self.run_listeners(&event);
        self.dispatch_depth -= 1;
        outcome?;

        if self.dispatch_depth == 0 && self.cash_outs.find(Input::DOWN_PAYMENT).is_some() {
            self.sync_standard_cash_outs()?;
        }
        Ok(())
    }

    fn run_listeners(&mut self, event: &MortgageEvent) -> Result<()> {
        match event {
            MortgageEvent::ContractPriceUpdated { .. } => {
                self.update_down_payment()?;
                self.update_miscellaneous_fees()
            }
            MortgageEvent::PercentDownPaymentUpdated { .. }
            | MortgageEvent::DownPaymentTermUpdated { .. }
            | MortgageEvent::BalancePaymentTermUpdated { .. }
            | MortgageEvent::LowCashOutUpdated { .. } => self.update_down_payment(),
            MortgageEvent::DownPaymentUpdated { .. } => self.update_down_payment_properties(),
            MortgageEvent::PercentMiscellaneousFeesUpdated { .. } => {
                self.update_miscellaneous_fees()
            }
            MortgageEvent::MiscellaneousFeesUpdated { .. } => Ok(()),
        }
    }

    /// contract price x percent, as a zero-interest plan over the down payment term.
    /// nothing is due up front while the low cash out covers it
    pub(crate) fn update_down_payment(&mut self) -> Result<()> {
        let principal = if self.is_promotional() {
            Money::ZERO
        } else {
            self.contract_price
                .multiplied_by(self.down_payment.percent.as_decimal(), self.config.rounding_mode)?
        };
        trace!(mortgage_id = %self.id, principal = %principal, "down payment recomputed");
        self.set_down_payment(Payment::installments(principal, self.down_payment.term), None)
    }

    /// percent and term follow the stored down payment
    fn update_down_payment_properties(&mut self) -> Result<()> {
        let principal = self.down_payment.payment.principal;
        let months = self.down_payment.payment.term.months_to_pay();

        let reproduced = self
            .contract_price
            .multiplied_by(self.down_payment.percent.as_decimal(), self.config.rounding_mode)?;
        if reproduced != principal && !self.is_promotional() {
            let percent = Rate::from_decimal(principal.ratio(self.contract_price)?);
            trace!(mortgage_id = %self.id, percent = %percent, "percent down payment back-computed");
            self.set_percent_down_payment(percent, false)?;
        }
        self.set_down_payment_term(months, false)
    }

    fn update_miscellaneous_fees(&mut self) -> Result<()> {
        let amount = self.contract_price.multiplied_by(
            self.fees.percent_miscellaneous_fees.as_decimal(),
            self.config.rounding_mode,
        )?;
        self.set_miscellaneous_fees(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borrower::Borrower;
    use crate::config::MortgageConfig;
    use crate::params::MortgageParams;
    use crate::property::Property;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use rust_decimal_macros::dec;

    fn build() -> Mortgage {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
        ));
        let params = MortgageParams::new()
            .with_percent_down_payment(dec!(0.05))
            .with_down_payment_term(12)
            .with_percent_miscellaneous_fees(dec!(0.085))
            .with_balance_payment_term(20)
            .with_interest_rate(dec!(0.07));
        Mortgage::with_context(
            Property::new(Money::from_major(2_500_000)),
            Borrower::new(Money::from_major(50_000)),
            params,
            MortgageConfig::default(),
            &time,
        )
        .unwrap()
    }

    fn names(events: &[MortgageEvent]) -> Vec<&'static str> {
        events.iter().map(MortgageEvent::name).collect()
    }

    #[test]
    fn test_contract_price_signal_chain() {
        let mut mortgage = build();
        mortgage.take_events();

        mortgage.set_contract_price(Money::from_major(4_500_000)).unwrap();
        assert_eq!(
            names(mortgage.events()),
            vec![
                "contract_price_updated",
                "down_payment_updated",
                "miscellaneous_fees_updated",
            ]
        );
        assert!(mortgage.events().iter().all(|e| e.mortgage_id() == mortgage.id));
    }

    #[test]
    fn test_back_computation_does_not_loop() {
        let mut mortgage = build();
        mortgage.take_events();

        mortgage.set_down_payment(Money::from_major(300_000), None).unwrap();
        // properties are stored silently, nothing recomputes the amount
        assert_eq!(names(mortgage.events()), vec!["down_payment_updated"]);
        assert_eq!(mortgage.get_down_payment().principal, Money::from_major(300_000));
        assert_eq!(mortgage.get_percent_down_payment(), Rate::from_decimal(dec!(0.12)));
    }

    #[test]
    fn test_balance_term_recomputes_down_payment() {
        let mut mortgage = build();
        mortgage.take_events();

        mortgage.set_balance_payment_term(25).unwrap();
        assert_eq!(
            names(mortgage.events()),
            vec!["balance_payment_term_updated", "down_payment_updated"]
        );
        assert_eq!(mortgage.get_down_payment().principal, Money::from_major(125_000));
    }

    #[test]
    fn test_ledger_follows_live_figures() {
        let mut mortgage = build();
        mortgage.set_contract_price(Money::from_major(4_500_000)).unwrap();

        let dp = mortgage.cash_outs().find(Input::DOWN_PAYMENT).map(|c| c.amount);
        let partial = mortgage
            .cash_outs()
            .find(Input::PARTIAL_MISCELLANEOUS_FEES)
            .map(|c| c.amount);
        assert_eq!(dp, Some(Money::from_major(225_000)));
        assert_eq!(partial, Some(Money::from_major(19_125)));
        assert_eq!(mortgage.cash_outs().len(), 2);
    }
}
