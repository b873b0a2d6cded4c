mod down_payment;
mod fees;
mod listeners;
mod miscellaneous_fees;

use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;
use tracing::{debug, info};
use uuid::Uuid;

use crate::borrower::Borrower;
use crate::cash_outs::{CashOut, CashOutLedger};
use crate::config::MortgageConfig;
use crate::decimal::{Money, Rate, RoundingMode, MINOR_UNIT_SCALE};
use crate::errors::{MortgageError, Result};
use crate::events::{EventStore, MortgageEvent};
use crate::params::MortgageParams;
use crate::payments::{AddOnFee, Payment, PresentValue, Term};
use crate::property::Property;
use crate::snapshot::MortgageData;
use crate::types::{Account, MortgageId};

pub use down_payment::DownPaymentInput;

/// percent, term and amortized payment of the down payment
#[derive(Debug, Clone)]
pub(crate) struct DownPaymentState {
    pub percent: Rate,
    /// months
    pub term: u32,
    pub payment: Payment,
}

#[derive(Debug, Clone)]
pub(crate) struct FeeState {
    pub percent_miscellaneous_fees: Rate,
    pub miscellaneous_fees: Money,
}

#[derive(Debug, Clone)]
pub(crate) struct TermState {
    /// years
    pub balance_payment_term: u32,
    pub interest_rate: Rate,
}

/// loan package for one property and one borrower
#[derive(Debug, Clone)]
pub struct Mortgage {
    pub id: MortgageId,
    pub config: MortgageConfig,
    property: Property,
    borrower: Borrower,
    /// date age-based rules are evaluated on
    as_of: NaiveDate,
    contract_price: Money,
    down_payment: DownPaymentState,
    fees: FeeState,
    terms: TermState,
    cash_outs: CashOutLedger,
    low_cash_out: Money,
    mortgage_redemption_insurance: Option<Money>,
    annual_fire_insurance: Option<Money>,
    income_requirement_multiplier: Option<Rate>,
    events: EventStore,
    dispatch_depth: u32,
}

impl Mortgage {
    /// build with the default configuration and the system clock
    pub fn new(property: Property, borrower: Borrower, params: MortgageParams) -> Result<Self> {
        let time = SafeTimeProvider::new(TimeSource::System);
        Self::with_context(property, borrower, params, MortgageConfig::default(), &time)
    }

    pub fn with_context(
        property: Property,
        borrower: Borrower,
        params: MortgageParams,
        config: MortgageConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        params.validate()?;
        config.validate()?;

        let contract_price = property.total_contract_price;
        let mut mortgage = Self {
            id: Uuid::new_v4(),
            terms: TermState {
                balance_payment_term: config.default_loan_term,
                interest_rate: config.default_interest_rate,
            },
            config,
            property,
            borrower,
            as_of: time_provider.now().date_naive(),
            contract_price: Money::ZERO,
            down_payment: DownPaymentState {
                percent: Rate::ZERO,
                term: 0,
                payment: Payment::installments(Money::ZERO, 0),
            },
            fees: FeeState {
                percent_miscellaneous_fees: Rate::ZERO,
                miscellaneous_fees: Money::ZERO,
            },
            cash_outs: CashOutLedger::new(),
            low_cash_out: Money::ZERO,
            mortgage_redemption_insurance: None,
            annual_fire_insurance: None,
            income_requirement_multiplier: None,
            events: EventStore::new(),
            dispatch_depth: 0,
        };

        info!(
            mortgage_id = %mortgage.id,
            contract_price = %contract_price,
            as_of = %mortgage.as_of,
            "mortgage created"
        );

        mortgage.set_contract_price(contract_price)?;
        mortgage.apply(&params)?;

        Ok(mortgage)
    }

    /// synthesize a borrower who can just afford the property, then build as usual
    pub fn create_with_typical_borrower(
        property: Property,
        params: MortgageParams,
        age: Option<u32>,
        config: MortgageConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        // contract price plus 8.5% fees, 95% financed
        let estimate = property.total_contract_price.as_decimal() * dec!(1.085) * dec!(0.95);
        let principal = Money::of_rounded(estimate, RoundingMode::HalfUp)?;
        let gross_monthly_income = Payment::new(
            principal,
            Term::years(config.default_loan_term),
            config.default_interest_rate,
        )
        .with_income_requirement_multiplier(
            property.disposable_income_requirement_multiplier(&config.property),
        )
        .income_requirement()?;

        let as_of = time_provider.now().date_naive();
        let borrower = Borrower::new(gross_monthly_income)
            .with_age(age.unwrap_or(config.default_age), as_of)?;
        borrower.check_borrowing_age(as_of, &config.borrower)?;

        debug!(
            gross_monthly_income = %gross_monthly_income,
            "typical borrower synthesized"
        );

        Self::with_context(property, borrower, params, config, time_provider)
    }

    /// re-apply a parameter set; repeated calls with the same params leave the same state
    pub fn update(&mut self, params: &MortgageParams) -> Result<()> {
        params.validate()?;
        self.apply(params)
    }

    fn apply(&mut self, params: &MortgageParams) -> Result<()> {
        let property_config = &self.config.property;
        let percent_down_payment = params
            .percent_down_payment()
            .unwrap_or_else(|| self.property.default_percent_down_payment(property_config));
        let down_payment_term = params
            .down_payment_term()?
            .unwrap_or_else(|| self.property.default_down_payment_term(property_config));
        let interest_rate = params.interest_rate().unwrap_or_else(|| {
            self.property.default_annual_interest_rate(
                &self.borrower,
                property_config,
                self.config.default_interest_rate,
            )
        });
        let percent_miscellaneous_fees = params.percent_miscellaneous_fees().unwrap_or_else(|| {
            self.property
                .default_percent_miscellaneous_fees(self.config.default_percent_miscellaneous_fees)
        });
        let balance_payment_term = match params.balance_payment_term()? {
            Some(years) => years,
            None => self.default_balance_payment_term()?,
        };
        // resolve every amount before the first setter runs
        let consulting_fee = params.consulting_fee()?;
        let processing_fee = params.processing_fee()?;
        let waived_processing_fee = params.waived_processing_fee()?;
        let low_cash_out = params.low_cash_out()?.unwrap_or(Money::ZERO);
        let mortgage_redemption_insurance = params.mortgage_redemption_insurance()?;
        let annual_fire_insurance = params.annual_fire_insurance()?;

        self.set_consulting_fee(consulting_fee)?;
        self.set_processing_fee(processing_fee)?;
        self.set_waived_processing_fee(waived_processing_fee)?;
        self.set_percent_down_payment(percent_down_payment, true)?;
        self.set_balance_payment_term(balance_payment_term)?;
        self.set_interest_rate(interest_rate);
        self.set_percent_miscellaneous_fees(percent_miscellaneous_fees)?;
        self.set_down_payment_term(down_payment_term, true)?;
        self.set_low_cash_out(low_cash_out)?;
        self.mortgage_redemption_insurance = mortgage_redemption_insurance;
        self.annual_fire_insurance = annual_fire_insurance;
        self.income_requirement_multiplier = params.income_requirement_multiplier();

        self.sync_standard_cash_outs()
    }

    /// borrower's maximum term by age, or the current term when no birthdate is known
    fn default_balance_payment_term(&self) -> Result<u32> {
        match self
            .borrower
            .maximum_term_allowed(self.as_of, &self.config.borrower)
        {
            Ok(years) if years > 0 => Ok(years),
            Ok(_) | Err(MortgageError::BirthdateNotSet) => {
                debug!(mortgage_id = %self.id, "balance payment term default skipped");
                Ok(self.terms.balance_payment_term)
            }
            Err(e) => Err(e),
        }
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    /// ceiling the lender finances against the property, read from the property itself
    pub fn get_loanable_value(&self) -> Money {
        self.property.loanable_value(&self.config.property)
    }

    pub fn borrower(&self) -> &Borrower {
        &self.borrower
    }

    /// income changes flow into the disposable income figures on the next read
    pub fn borrower_mut(&mut self) -> &mut Borrower {
        &mut self.borrower
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn get_contract_price(&self) -> Money {
        self.contract_price
    }

    /// a zero price is rejected before anything is touched, percents are stored against it
    pub fn set_contract_price(&mut self, contract_price: Money) -> Result<()> {
        if contract_price.is_zero() {
            return Err(MortgageError::DivisionByZero {
                context: "contract price must not be zero".to_string(),
            });
        }
        self.contract_price = contract_price;
        self.dispatch(MortgageEvent::ContractPriceUpdated {
            mortgage_id: self.id,
            contract_price,
        })
    }

    pub fn get_balance_payment_term(&self) -> u32 {
        self.terms.balance_payment_term
    }

    pub fn set_balance_payment_term(&mut self, years: u32) -> Result<()> {
        self.terms.balance_payment_term = years;
        self.dispatch(MortgageEvent::BalancePaymentTermUpdated {
            mortgage_id: self.id,
            years,
        })
    }

    pub fn get_interest_rate(&self) -> Rate {
        self.terms.interest_rate
    }

    pub fn set_interest_rate(&mut self, rate: Rate) {
        self.terms.interest_rate = rate;
    }

    /// explicit multiplier, else the property's segment multiplier
    pub fn get_income_requirement_multiplier(&self) -> Rate {
        self.income_requirement_multiplier.unwrap_or_else(|| {
            self.property
                .disposable_income_requirement_multiplier(&self.config.property)
        })
    }

    pub fn set_income_requirement_multiplier(&mut self, multiplier: Option<Rate>) {
        self.income_requirement_multiplier = multiplier;
    }

    /// contract price less the down payment principal
    pub fn get_balance_payment(&self) -> Money {
        self.contract_price - self.down_payment.payment.principal
    }

    /// monthly insurance riders carried by the loan
    pub fn get_add_on_fees_to_loan_amortization(&self) -> Result<Vec<AddOnFee>> {
        let mut fees = Vec::new();
        if let Some(amount) = self.mortgage_redemption_insurance.filter(|a| a.is_positive()) {
            fees.push(AddOnFee::new("mortgage redemption insurance", amount));
        }
        if let Some(annual) = self.annual_fire_insurance.filter(|a| a.is_positive()) {
            let monthly = annual.divided_by(dec!(12), self.config.rounding_mode)?;
            fees.push(AddOnFee::new("fire insurance", monthly));
        }
        Ok(fees)
    }

    /// balance payment plus balance miscellaneous fees, amortized over the balance term
    pub fn get_loan(&self) -> Result<Payment> {
        let principal = self.get_balance_payment() + self.get_balance_miscellaneous_fees()?;

        Ok(Payment::new(
            principal,
            Term::years(self.terms.balance_payment_term),
            self.terms.interest_rate,
        )
        .with_add_on_fees(self.get_add_on_fees_to_loan_amortization()?)
        .with_income_requirement_multiplier(self.get_income_requirement_multiplier()))
    }

    pub fn get_joint_borrower_disposable_monthly_income(&self) -> Result<Money> {
        self.borrower
            .joint_monthly_disposable_income(&self.property, &self.config)
    }

    pub fn get_present_value_from_monthly_disposable_income_payments(&self) -> Result<PresentValue> {
        Ok(PresentValue::new(
            self.get_joint_borrower_disposable_monthly_income()?,
            Term::years(self.terms.balance_payment_term),
            self.terms.interest_rate,
        ))
    }

    /// positive when the loan exceeds what disposable income can amortize
    pub fn get_loan_difference(&self) -> Result<Money> {
        calculate_loan_difference(
            &self.get_loan()?,
            &self.get_present_value_from_monthly_disposable_income_payments()?,
        )
    }

    pub fn cash_outs(&self) -> &CashOutLedger {
        &self.cash_outs
    }

    /// a new deductible can end a promo, which brings the down payment back
    pub fn add_cash_out(&mut self, cash_out: CashOut) -> Result<()> {
        let was_promotional = self.is_promotional();
        self.cash_outs.add(cash_out);
        self.refresh_promotion(was_promotional)
    }

    /// sum of cash-out amounts, optionally for one account
    pub fn get_total_cash_out(&self, account: Option<Account>) -> Money {
        self.cash_outs.total(account)
    }

    /// every signal since construction or the last `take_events`.
    /// the journal is never trimmed, long-lived callers drain it with `take_events`
    pub fn events(&self) -> &[MortgageEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<MortgageEvent> {
        self.events.take_events()
    }

    pub fn to_data(&self) -> Result<MortgageData> {
        MortgageData::from_mortgage(self)
    }
}

/// loan principal minus the present value of the disposable income stream
pub fn calculate_loan_difference(loan: &Payment, present_value: &PresentValue) -> Result<Money> {
    (loan.principal - present_value.discounted_value()?)
        .to_scale(MINOR_UNIT_SCALE, RoundingMode::Ceiling)
}
