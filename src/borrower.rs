use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{BorrowerConfig, LendingInstitution, MortgageConfig};
use crate::decimal::Money;
use crate::errors::{MortgageError, Result};
use crate::property::Property;

/// the buyer, a read-only provider of income and age-based limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub gross_monthly_income: Money,
    pub birthdate: Option<NaiveDate>,
    /// regional borrowers qualify under lower income ceilings
    pub regional: bool,
    /// institution code, falls back to the configured default
    pub lending_institution: Option<String>,
    pub co_borrowers: Vec<Borrower>,
}

impl Borrower {
    pub fn new(gross_monthly_income: Money) -> Self {
        Self {
            gross_monthly_income,
            birthdate: None,
            regional: false,
            lending_institution: None,
            co_borrowers: Vec::new(),
        }
    }

    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// set the birthdate so that the borrower is `age` years old on `as_of`
    pub fn with_age(mut self, age: u32, as_of: NaiveDate) -> Result<Self> {
        let birthdate = as_of
            .checked_sub_months(Months::new(age * 12))
            .ok_or_else(|| MortgageError::InvalidConfiguration {
                message: format!("cannot derive a birthdate for age {}", age),
            })?;
        self.birthdate = Some(birthdate);
        Ok(self)
    }

    pub fn with_regional(mut self, regional: bool) -> Self {
        self.regional = regional;
        self
    }

    pub fn with_lending_institution(mut self, code: impl Into<String>) -> Self {
        self.lending_institution = Some(code.into());
        self
    }

    pub fn with_co_borrower(mut self, co_borrower: Borrower) -> Self {
        self.co_borrowers.push(co_borrower);
        self
    }

    pub fn set_gross_monthly_income(&mut self, income: Money) {
        self.gross_monthly_income = income;
    }

    /// completed years on `as_of`
    pub fn age(&self, as_of: NaiveDate) -> Result<u32> {
        let birthdate = self.birthdate.ok_or(MortgageError::BirthdateNotSet)?;
        let mut years = as_of.year() - birthdate.year();
        if (as_of.month(), as_of.day()) < (birthdate.month(), birthdate.day()) {
            years -= 1;
        }
        Ok(years.max(0) as u32)
    }

    fn institution<'a>(&self, config: &'a BorrowerConfig) -> Result<&'a LendingInstitution> {
        match &self.lending_institution {
            Some(code) => config
                .institution(code)
                .ok_or_else(|| MortgageError::InvalidConfiguration {
                    message: format!("unknown lending institution {}", code),
                }),
            None => config.default_institution(),
        }
    }

    /// longest balance payment term (years) the borrower can carry before the paying age limit
    pub fn maximum_term_allowed(&self, as_of: NaiveDate, config: &BorrowerConfig) -> Result<u32> {
        let age = self.age(as_of)? as i64;
        let institution = self.institution(config)?;
        let paying_age_limit =
            institution.maximum_paying_age as i64 + institution.borrowing_age_offset as i64;
        let remaining = (paying_age_limit - age).max(0);

        Ok(remaining.min(institution.maximum_term as i64) as u32)
    }

    pub fn check_borrowing_age(&self, as_of: NaiveDate, config: &BorrowerConfig) -> Result<()> {
        let age = self.age(as_of)?;
        let institution = self.institution(config)?;
        if age < institution.minimum_borrowing_age {
            return Err(MortgageError::MinimumBorrowingAgeNotMet {
                age,
                minimum: institution.minimum_borrowing_age,
            });
        }
        if age > institution.maximum_borrowing_age {
            return Err(MortgageError::MaximumBorrowingAgeBreached {
                age,
                maximum: institution.maximum_borrowing_age,
            });
        }
        Ok(())
    }

    /// own income plus every co-borrower's
    pub fn joint_gross_monthly_income(&self) -> Money {
        self.gross_monthly_income
            + self
                .co_borrowers
                .iter()
                .map(|c| c.joint_gross_monthly_income())
                .sum()
    }

    /// share of joint income available for amortization on this property
    pub fn joint_monthly_disposable_income(
        &self,
        property: &Property,
        config: &MortgageConfig,
    ) -> Result<Money> {
        let multiplier = property.disposable_income_requirement_multiplier(&config.property);
        self.joint_gross_monthly_income()
            .multiplied_by(multiplier.as_decimal(), config.rounding_mode)
    }
}
