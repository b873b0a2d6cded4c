use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, RoundingMode};
use crate::errors::{MortgageError, Result};
use crate::types::{HousingType, MarketSegment};

/// engine-wide defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageConfig {
    pub default_interest_rate: Rate,
    /// years
    pub default_loan_term: u32,
    pub default_percent_miscellaneous_fees: Rate,
    /// years, used when synthesizing a typical borrower
    pub default_age: u32,
    /// rounding for derived amounts (down payment, fees, income requirement)
    pub rounding_mode: RoundingMode,
    pub property: PropertyConfig,
    pub borrower: BorrowerConfig,
}

/// property and market segment matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyConfig {
    pub horizontal_ceilings: SegmentCeilings,
    pub vertical_ceilings: SegmentCeilings,
    pub disposable_income_multipliers: SegmentMultipliers,
    pub loanable_value_multipliers: SegmentMultipliers,
    pub defaults: PropertyDefaults,
    pub socialized_interest_rate: Rate,
    /// borrower income at or below which the socialized rate applies
    pub socialized_income_ceiling: Money,
    pub socialized_regional_income_ceiling: Money,
}

/// upper contract price bounds per segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCeilings {
    pub economic: Money,
    pub socialized: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentMultipliers {
    pub open: Rate,
    pub economic: Rate,
    pub socialized: Rate,
}

impl SegmentMultipliers {
    pub fn for_segment(&self, segment: MarketSegment) -> Rate {
        match segment {
            MarketSegment::Open => self.open,
            MarketSegment::Economic => self.economic,
            MarketSegment::Socialized => self.socialized,
        }
    }
}

/// loan parameters a property carries when the caller supplies none
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefaults {
    pub processing_fee: Money,
    pub percent_down_payment: Rate,
    /// months
    pub down_payment_term: u32,
}

/// borrower eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerConfig {
    pub lending_institutions: Vec<LendingInstitution>,
    pub default_lending_institution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingInstitution {
    pub code: String,
    pub name: String,
    pub alias: String,
    pub minimum_borrowing_age: u32,
    pub maximum_borrowing_age: u32,
    /// added to the paying age limit when computing the maximum term
    pub borrowing_age_offset: i32,
    /// years
    pub maximum_term: u32,
    pub maximum_paying_age: u32,
}

impl Default for MortgageConfig {
    fn default() -> Self {
        Self {
            default_interest_rate: Rate::from_percentage(7),
            default_loan_term: 20,
            default_percent_miscellaneous_fees: Rate::from_bps(850),
            default_age: 25,
            rounding_mode: RoundingMode::Ceiling,
            property: PropertyConfig::default(),
            borrower: BorrowerConfig::default(),
        }
    }
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            horizontal_ceilings: SegmentCeilings {
                economic: Money::from_major(2_500_000),
                socialized: Money::from_major(850_000),
            },
            vertical_ceilings: SegmentCeilings {
                economic: Money::from_major(2_500_000),
                socialized: Money::from_major(1_800_000),
            },
            disposable_income_multipliers: SegmentMultipliers {
                open: Rate::from_percentage(30),
                economic: Rate::from_percentage(35),
                socialized: Rate::from_percentage(35),
            },
            loanable_value_multipliers: SegmentMultipliers {
                open: Rate::from_percentage(90),
                economic: Rate::from_percentage(95),
                socialized: Rate::from_percentage(100),
            },
            defaults: PropertyDefaults {
                processing_fee: Money::from_major(10_000),
                percent_down_payment: Rate::from_percentage(5),
                down_payment_term: 6,
            },
            socialized_interest_rate: Rate::from_percentage(3),
            socialized_income_ceiling: Money::from_major(17_500),
            socialized_regional_income_ceiling: Money::from_major(12_000),
        }
    }
}

impl Default for BorrowerConfig {
    fn default() -> Self {
        Self {
            lending_institutions: vec![
                LendingInstitution {
                    code: "hdmf".to_string(),
                    name: "Home Development Mutual Fund".to_string(),
                    alias: "Pag-IBIG".to_string(),
                    minimum_borrowing_age: 18,
                    maximum_borrowing_age: 60,
                    borrowing_age_offset: 0,
                    maximum_term: 30,
                    maximum_paying_age: 70,
                },
                LendingInstitution {
                    code: "rcbc".to_string(),
                    name: "Rizal Commercial Banking Corporation".to_string(),
                    alias: "RCBC".to_string(),
                    minimum_borrowing_age: 18,
                    maximum_borrowing_age: 60,
                    borrowing_age_offset: -1,
                    maximum_term: 20,
                    maximum_paying_age: 65,
                },
                LendingInstitution {
                    code: "cbc".to_string(),
                    name: "China Banking Corporation".to_string(),
                    alias: "CBC".to_string(),
                    minimum_borrowing_age: 18,
                    maximum_borrowing_age: 60,
                    borrowing_age_offset: -1,
                    maximum_term: 20,
                    maximum_paying_age: 65,
                },
            ],
            default_lending_institution: "hdmf".to_string(),
        }
    }
}

impl MortgageConfig {
    /// load a full configuration from json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MortgageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// reject configurations the engine cannot compute with
    pub fn validate(&self) -> Result<()> {
        if self.default_loan_term == 0 {
            return Err(MortgageError::InvalidConfiguration {
                message: "default loan term must be at least one year".to_string(),
            });
        }
        if self.rounding_mode == RoundingMode::Unnecessary {
            return Err(MortgageError::InvalidConfiguration {
                message: "derived amounts need an explicit rounding mode".to_string(),
            });
        }
        if self.borrower.institution(&self.borrower.default_lending_institution).is_none() {
            return Err(MortgageError::InvalidConfiguration {
                message: format!(
                    "unknown default lending institution {}",
                    self.borrower.default_lending_institution
                ),
            });
        }
        Ok(())
    }
}

impl PropertyConfig {
    pub fn ceilings(&self, housing_type: HousingType) -> &SegmentCeilings {
        match housing_type {
            HousingType::Horizontal => &self.horizontal_ceilings,
            HousingType::Vertical => &self.vertical_ceilings,
        }
    }
}

impl BorrowerConfig {
    pub fn institution(&self, code: &str) -> Option<&LendingInstitution> {
        self.lending_institutions
            .iter()
            .find(|i| i.code.eq_ignore_ascii_case(code))
    }

    pub fn default_institution(&self) -> Result<&LendingInstitution> {
        self.institution(&self.default_lending_institution)
            .ok_or_else(|| MortgageError::InvalidConfiguration {
                message: format!(
                    "unknown default lending institution {}",
                    self.default_lending_institution
                ),
            })
    }
}
