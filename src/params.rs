use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, MINOR_UNIT_SCALE};
use crate::errors::{MortgageError, Result, ValidationError};

/// wire names of the mortgage parameters
pub struct Input;

impl Input {
    pub const PERCENT_DP: &'static str = "percent_down_payment";
    pub const DP_TERM: &'static str = "down_payment_term";
    pub const BP_TERM: &'static str = "balance_payment_term";
    pub const BP_INTEREST_RATE: &'static str = "balance_payment_interest_rate";
    pub const PERCENT_MF: &'static str = "percent_miscellaneous_fees";
    pub const CONSULTING_FEE: &'static str = "consulting_fee";
    pub const PROCESSING_FEE: &'static str = "processing_fee";
    pub const WAIVED_PROCESSING_FEE: &'static str = "waived_processing_fee";
    pub const LOW_CASH_OUT: &'static str = "low_cash_out";
    pub const MORTGAGE_REDEMPTION_INSURANCE: &'static str = "mortgage_redemption_insurance";
    pub const ANNUAL_FIRE_INSURANCE: &'static str = "annual_fire_insurance";
    pub const INCOME_REQUIREMENT_MULTIPLIER: &'static str = "income_requirement_multiplier";

    // ledger entry names
    pub const DOWN_PAYMENT: &'static str = "down_payment";
    pub const PARTIAL_MISCELLANEOUS_FEES: &'static str = "partial_miscellaneous_fees";
}

/// caller-supplied loan parameters, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageParams {
    pub percent_down_payment: Option<Decimal>,
    /// months
    pub down_payment_term: Option<Decimal>,
    /// years
    pub balance_payment_term: Option<Decimal>,
    pub balance_payment_interest_rate: Option<Decimal>,
    pub percent_miscellaneous_fees: Option<Decimal>,
    pub consulting_fee: Option<Decimal>,
    pub processing_fee: Option<Decimal>,
    pub waived_processing_fee: Option<Decimal>,
    pub low_cash_out: Option<Decimal>,
    pub mortgage_redemption_insurance: Option<Decimal>,
    pub annual_fire_insurance: Option<Decimal>,
    pub income_requirement_multiplier: Option<Decimal>,
}

fn check_range(
    errors: &mut ValidationError,
    field: &str,
    value: Option<Decimal>,
    min: Decimal,
    max: Option<Decimal>,
) {
    let Some(value) = value else {
        return;
    };
    if value < min {
        errors.push(field, format!("must be at least {}", min));
    } else if let Some(max) = max {
        if value > max {
            errors.push(field, format!("must not be greater than {}", max));
        }
    }
}

/// amounts must fit the minor unit on top of the range check
fn check_amount(
    errors: &mut ValidationError,
    field: &str,
    value: Option<Decimal>,
    max: Option<Decimal>,
) {
    let before = errors.violations.len();
    check_range(errors, field, value, Decimal::ZERO, max);
    if errors.violations.len() > before {
        return;
    }
    if let Some(value) = value {
        if value.normalize().scale() > MINOR_UNIT_SCALE {
            errors.push(
                field,
                format!("must not have more than {} decimal places", MINOR_UNIT_SCALE),
            );
        }
    }
}

fn check_integer(errors: &mut ValidationError, field: &str, value: Option<Decimal>, min: i64, max: i64) {
    let Some(value) = value else {
        return;
    };
    if !value.fract().is_zero() {
        errors.push(field, "must be an integer");
        return;
    }
    check_range(errors, field, Some(value), Decimal::from(min), Some(Decimal::from(max)));
}

fn whole(value: Option<Decimal>) -> Result<Option<u32>> {
    value
        .map(|v| {
            if !v.fract().is_zero() {
                return Err(MortgageError::InvalidTerm {
                    value: v.trunc().to_i64().unwrap_or_default(),
                });
            }
            v.to_u32().ok_or(MortgageError::InvalidTerm {
                value: v.to_i64().unwrap_or_default(),
            })
        })
        .transpose()
}

fn money(value: Option<Decimal>) -> Result<Option<Money>> {
    value.map(Money::of).transpose()
}

impl MortgageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_percent_down_payment(mut self, value: Decimal) -> Self {
        self.percent_down_payment = Some(value);
        self
    }

    pub fn with_down_payment_term(mut self, months: u32) -> Self {
        self.down_payment_term = Some(Decimal::from(months));
        self
    }

    pub fn with_balance_payment_term(mut self, years: u32) -> Self {
        self.balance_payment_term = Some(Decimal::from(years));
        self
    }

    pub fn with_interest_rate(mut self, value: Decimal) -> Self {
        self.balance_payment_interest_rate = Some(value);
        self
    }

    pub fn with_percent_miscellaneous_fees(mut self, value: Decimal) -> Self {
        self.percent_miscellaneous_fees = Some(value);
        self
    }

    pub fn with_consulting_fee(mut self, value: Decimal) -> Self {
        self.consulting_fee = Some(value);
        self
    }

    pub fn with_processing_fee(mut self, value: Decimal) -> Self {
        self.processing_fee = Some(value);
        self
    }

    pub fn with_waived_processing_fee(mut self, value: Decimal) -> Self {
        self.waived_processing_fee = Some(value);
        self
    }

    pub fn with_low_cash_out(mut self, value: Decimal) -> Self {
        self.low_cash_out = Some(value);
        self
    }

    pub fn with_mortgage_redemption_insurance(mut self, value: Decimal) -> Self {
        self.mortgage_redemption_insurance = Some(value);
        self
    }

    pub fn with_annual_fire_insurance(mut self, value: Decimal) -> Self {
        self.annual_fire_insurance = Some(value);
        self
    }

    pub fn with_income_requirement_multiplier(mut self, value: Decimal) -> Self {
        self.income_requirement_multiplier = Some(value);
        self
    }

    /// parse a json parameter map, decimals encoded as strings
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// check every field and report all violations at once
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationError::new();
        let one = Some(Decimal::ONE);

        check_range(&mut errors, Input::PERCENT_DP, self.percent_down_payment, Decimal::ZERO, one);
        check_integer(&mut errors, Input::BP_TERM, self.balance_payment_term, 1, 30);
        check_range(&mut errors, Input::BP_INTEREST_RATE, self.balance_payment_interest_rate, Decimal::ZERO, one);
        check_range(&mut errors, Input::PERCENT_MF, self.percent_miscellaneous_fees, Decimal::ZERO, one);
        check_amount(&mut errors, Input::CONSULTING_FEE, self.consulting_fee, Some(dec!(30000)));
        check_amount(&mut errors, Input::PROCESSING_FEE, self.processing_fee, Some(dec!(30000)));
        check_integer(&mut errors, Input::DP_TERM, self.down_payment_term, 1, 24);
        check_amount(&mut errors, Input::LOW_CASH_OUT, self.low_cash_out, Some(dec!(100000)));
        check_amount(
            &mut errors,
            Input::MORTGAGE_REDEMPTION_INSURANCE,
            self.mortgage_redemption_insurance,
            Some(dec!(10000)),
        );
        check_amount(
            &mut errors,
            Input::ANNUAL_FIRE_INSURANCE,
            self.annual_fire_insurance,
            Some(dec!(10000)),
        );
        check_range(
            &mut errors,
            Input::INCOME_REQUIREMENT_MULTIPLIER,
            self.income_requirement_multiplier,
            Decimal::ZERO,
            one,
        );
        check_amount(&mut errors, Input::WAIVED_PROCESSING_FEE, self.waived_processing_fee, None);

        errors.into_result()
    }

    pub fn percent_down_payment(&self) -> Option<Rate> {
        self.percent_down_payment.map(Rate::from_decimal)
    }

    pub fn down_payment_term(&self) -> Result<Option<u32>> {
        whole(self.down_payment_term)
    }

    pub fn balance_payment_term(&self) -> Result<Option<u32>> {
        whole(self.balance_payment_term)
    }

    pub fn interest_rate(&self) -> Option<Rate> {
        self.balance_payment_interest_rate.map(Rate::from_decimal)
    }

    pub fn percent_miscellaneous_fees(&self) -> Option<Rate> {
        self.percent_miscellaneous_fees.map(Rate::from_decimal)
    }

    pub fn income_requirement_multiplier(&self) -> Option<Rate> {
        self.income_requirement_multiplier.map(Rate::from_decimal)
    }

    pub fn consulting_fee(&self) -> Result<Option<Money>> {
        money(self.consulting_fee)
    }

    pub fn processing_fee(&self) -> Result<Option<Money>> {
        money(self.processing_fee)
    }

    pub fn waived_processing_fee(&self) -> Result<Option<Money>> {
        money(self.waived_processing_fee)
    }

    pub fn low_cash_out(&self) -> Result<Option<Money>> {
        money(self.low_cash_out)
    }

    pub fn mortgage_redemption_insurance(&self) -> Result<Option<Money>> {
        money(self.mortgage_redemption_insurance)
    }

    pub fn annual_fire_insurance(&self) -> Result<Option<Money>> {
        money(self.annual_fire_insurance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_are_valid() {
        assert!(MortgageParams::new().validate().is_ok());
    }

    #[test]
    fn test_validation_lists_every_field() {
        let params = MortgageParams::new()
            .with_percent_down_payment(dec!(1.5))
            .with_balance_payment_term(31)
            .with_consulting_fee(dec!(30000.01))
            .with_low_cash_out(dec!(-1))
            .with_income_requirement_multiplier(dec!(2));

        let err = params.validate().unwrap_err();
        let MortgageError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.fields(),
            vec![
                Input::PERCENT_DP,
                Input::BP_TERM,
                Input::CONSULTING_FEE,
                Input::LOW_CASH_OUT,
                Input::INCOME_REQUIREMENT_MULTIPLIER,
            ]
        );
    }

    #[test]
    fn test_terms_must_be_integers() {
        let mut params = MortgageParams::new();
        params.down_payment_term = Some(dec!(12.5));
        params.balance_payment_term = Some(dec!(0));

        let Err(MortgageError::Validation(errors)) = params.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.violations.len(), 2);
        assert_eq!(errors.violations[0].field, Input::BP_TERM);
        assert_eq!(errors.violations[1].field, Input::DP_TERM);
        assert_eq!(errors.violations[1].message, "must be an integer");
    }

    #[test]
    fn test_amounts_must_fit_centavos() {
        let params = MortgageParams::new()
            .with_consulting_fee(dec!(10000.000))
            .with_processing_fee(dec!(30000.001))
            .with_low_cash_out(dec!(100.005))
            .with_annual_fire_insurance(dec!(0.125))
            .with_waived_processing_fee(dec!(5000.50));

        let Err(MortgageError::Validation(errors)) = params.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.fields(),
            vec![Input::PROCESSING_FEE, Input::LOW_CASH_OUT, Input::ANNUAL_FIRE_INSURANCE]
        );
        assert_eq!(errors.violations[0].message, "must not be greater than 30000");
        assert_eq!(errors.violations[1].message, "must not have more than 2 decimal places");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let params = MortgageParams::new()
            .with_percent_down_payment(Decimal::ONE)
            .with_down_payment_term(24)
            .with_balance_payment_term(1)
            .with_low_cash_out(dec!(100000))
            .with_annual_fire_insurance(dec!(10000))
            .with_waived_processing_fee(dec!(50000));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_typed_accessors() {
        let params = MortgageParams::new()
            .with_down_payment_term(12)
            .with_consulting_fee(dec!(10000))
            .with_interest_rate(dec!(0.07));
        assert_eq!(params.down_payment_term().unwrap(), Some(12));
        assert_eq!(params.balance_payment_term().unwrap(), None);
        assert_eq!(params.consulting_fee().unwrap(), Some(Money::from_major(10_000)));
        assert_eq!(params.interest_rate(), Some(Rate::from_percentage(7)));
    }

    #[test]
    fn test_from_json() {
        let params = MortgageParams::from_json(
            r#"{"percent_down_payment": "0.05", "down_payment_term": "12"}"#,
        )
        .unwrap();
        assert_eq!(params.percent_down_payment(), Some(Rate::from_percentage(5)));
        assert_eq!(params.down_payment_term().unwrap(), Some(12));
        assert_eq!(params.low_cash_out, None);
    }
}
