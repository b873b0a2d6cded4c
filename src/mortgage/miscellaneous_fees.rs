use tracing::trace;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::MortgageEvent;
use crate::mortgage::Mortgage;

impl Mortgage {
    pub fn get_percent_miscellaneous_fees(&self) -> Rate {
        self.fees.percent_miscellaneous_fees
    }

    pub fn set_percent_miscellaneous_fees(&mut self, percent: Rate) -> Result<()> {
        self.fees.percent_miscellaneous_fees = percent;
        self.dispatch(MortgageEvent::PercentMiscellaneousFeesUpdated {
            mortgage_id: self.id,
            percent_miscellaneous_fees: percent,
        })
    }

    pub fn get_miscellaneous_fees(&self) -> Money {
        self.fees.miscellaneous_fees
    }

    /// store the amount and overwrite the percent with amount / contract price
    pub fn set_miscellaneous_fees(&mut self, amount: Money) -> Result<()> {
        self.fees.miscellaneous_fees = amount;
        self.dispatch(MortgageEvent::MiscellaneousFeesUpdated {
            mortgage_id: self.id,
            miscellaneous_fees: amount,
        })?;

        let percent = Rate::from_decimal(amount.ratio(self.contract_price)?);
        trace!(mortgage_id = %self.id, percent = %percent, "percent miscellaneous fees back-computed");
        self.fees.percent_miscellaneous_fees = percent;
        Ok(())
    }

    /// share of the fees paid during the down payment period, none under a promo
    pub fn get_partial_miscellaneous_fees(&self) -> Result<Money> {
        if self.is_promotional() {
            return Ok(Money::ZERO);
        }
        self.fees.miscellaneous_fees.multiplied_by(
            self.down_payment.percent.as_decimal(),
            self.config.rounding_mode,
        )
    }

    /// share of the fees folded into the loan
    pub fn get_balance_miscellaneous_fees(&self) -> Result<Money> {
        Ok(self.fees.miscellaneous_fees - self.get_partial_miscellaneous_fees()?)
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

    fn mortgage() -> Mortgage {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
        ));
        let params = MortgageParams::new()
            .with_percent_down_payment(dec!(0.05))
            .with_percent_miscellaneous_fees(dec!(0.085));
        Mortgage::with_context(
            Property::new(Money::from_major(2_500_000)),
            Borrower::new(Money::from_major(50_000)),
            params,
            MortgageConfig::default(),
            &time,
        )
        .unwrap()
    }

    #[test]
    fn test_fees_from_percent() {
        let mortgage = mortgage();
        assert_eq!(mortgage.get_percent_miscellaneous_fees(), Rate::from_decimal(dec!(0.085)));
        assert_eq!(mortgage.get_miscellaneous_fees(), Money::from_major(212_500));
        assert_eq!(mortgage.get_partial_miscellaneous_fees().unwrap(), Money::from_major(10_625));
        assert_eq!(mortgage.get_balance_miscellaneous_fees().unwrap(), Money::from_major(201_875));
    }

    #[test]
    fn test_amount_back_computes_percent() {
        let mut mortgage = mortgage();
        mortgage.set_miscellaneous_fees(Money::from_major(250_000)).unwrap();

        assert_eq!(mortgage.get_contract_price(), Money::from_major(2_500_000));
        assert_eq!(mortgage.get_percent_miscellaneous_fees(), Rate::from_percentage(10));
        assert_eq!(mortgage.get_miscellaneous_fees(), Money::from_major(250_000));
    }

    #[test]
    fn test_odd_amount_round_trips() {
        let mut mortgage = mortgage();
        let amount = Money::of(dec!(123456.78)).unwrap();
        mortgage.set_miscellaneous_fees(amount).unwrap();
        assert_eq!(
            mortgage.get_percent_miscellaneous_fees().as_decimal(),
            amount.ratio(mortgage.get_contract_price()).unwrap()
        );
    }

    #[test]
    fn test_percent_change_recomputes_amount() {
        let mut mortgage = mortgage();
        mortgage.set_percent_miscellaneous_fees(Rate::from_percentage(5)).unwrap();
        assert_eq!(mortgage.get_miscellaneous_fees(), Money::from_major(125_000));
        assert_eq!(mortgage.get_percent_miscellaneous_fees(), Rate::from_percentage(5));
    }

    #[test]
    fn test_partial_and_balance_add_up() {
        let mut mortgage = mortgage();
        mortgage.set_percent_down_payment(Rate::from_decimal(dec!(0.0733)), true).unwrap();
        mortgage.set_miscellaneous_fees(Money::of(dec!(187654.32)).unwrap()).unwrap();
        let partial = mortgage.get_partial_miscellaneous_fees().unwrap();
        let balance = mortgage.get_balance_miscellaneous_fees().unwrap();
        assert_eq!(partial + balance, mortgage.get_miscellaneous_fees());
    }
}
