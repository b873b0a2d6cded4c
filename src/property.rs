use serde::{Deserialize, Serialize};

use crate::borrower::Borrower;
use crate::config::PropertyConfig;
use crate::decimal::{Money, Rate};
use crate::types::{HousingType, MarketSegment};

/// the property being financed, a read-only provider of pricing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub total_contract_price: Money,
    pub appraised_value: Option<Money>,
    pub housing_type: HousingType,
    /// explicit segment, otherwise classified from the contract price
    pub market_segment: Option<MarketSegment>,
    pub percent_down_payment: Option<Rate>,
    /// months
    pub down_payment_term: Option<u32>,
    pub percent_miscellaneous_fees: Option<Rate>,
    pub disposable_income_requirement_multiplier: Option<Rate>,
    pub processing_fee: Option<Money>,
}

impl Property {
    pub fn new(total_contract_price: Money) -> Self {
        Self {
            total_contract_price,
            appraised_value: None,
            housing_type: HousingType::default(),
            market_segment: None,
            percent_down_payment: None,
            down_payment_term: None,
            percent_miscellaneous_fees: None,
            disposable_income_requirement_multiplier: None,
            processing_fee: None,
        }
    }

    pub fn with_appraised_value(mut self, value: Money) -> Self {
        self.appraised_value = Some(value);
        self
    }

    pub fn with_housing_type(mut self, housing_type: HousingType) -> Self {
        self.housing_type = housing_type;
        self
    }

    pub fn with_market_segment(mut self, segment: MarketSegment) -> Self {
        self.market_segment = Some(segment);
        self
    }

    pub fn with_percent_down_payment(mut self, percent: Rate) -> Self {
        self.percent_down_payment = Some(percent);
        self
    }

    pub fn with_down_payment_term(mut self, months: u32) -> Self {
        self.down_payment_term = Some(months);
        self
    }

    pub fn with_percent_miscellaneous_fees(mut self, percent: Rate) -> Self {
        self.percent_miscellaneous_fees = Some(percent);
        self
    }

    pub fn with_disposable_income_requirement_multiplier(mut self, multiplier: Rate) -> Self {
        self.disposable_income_requirement_multiplier = Some(multiplier);
        self
    }

    pub fn with_processing_fee(mut self, fee: Money) -> Self {
        self.processing_fee = Some(fee);
        self
    }

    /// classify against the housing-type ceilings unless set explicitly.
    /// ceilings are exclusive: a price at the ceiling belongs to the next segment up
    pub fn market_segment(&self, config: &PropertyConfig) -> MarketSegment {
        if let Some(segment) = self.market_segment {
            return segment;
        }
        let ceilings = config.ceilings(self.housing_type);
        if self.total_contract_price < ceilings.socialized {
            MarketSegment::Socialized
        } else if self.total_contract_price < ceilings.economic {
            MarketSegment::Economic
        } else {
            MarketSegment::Open
        }
    }

    pub fn disposable_income_requirement_multiplier(&self, config: &PropertyConfig) -> Rate {
        self.disposable_income_requirement_multiplier.unwrap_or_else(|| {
            config
                .disposable_income_multipliers
                .for_segment(self.market_segment(config))
        })
    }

    pub fn loanable_value_multiplier(&self, config: &PropertyConfig) -> Rate {
        config
            .loanable_value_multipliers
            .for_segment(self.market_segment(config))
    }

    /// maximum loanable amount against the appraised (or contract) value
    pub fn loanable_value(&self, config: &PropertyConfig) -> Money {
        let base = self.appraised_value.unwrap_or(self.total_contract_price);
        Money::from_decimal(base.as_decimal() * self.loanable_value_multiplier(config).as_decimal())
    }

    pub fn default_percent_down_payment(&self, config: &PropertyConfig) -> Rate {
        self.percent_down_payment
            .unwrap_or(config.defaults.percent_down_payment)
    }

    pub fn default_down_payment_term(&self, config: &PropertyConfig) -> u32 {
        self.down_payment_term
            .unwrap_or(config.defaults.down_payment_term)
    }

    pub fn default_percent_miscellaneous_fees(&self, fallback: Rate) -> Rate {
        self.percent_miscellaneous_fees.unwrap_or(fallback)
    }

    pub fn default_processing_fee(&self, config: &PropertyConfig) -> Money {
        self.processing_fee.unwrap_or(config.defaults.processing_fee)
    }

    /// preferential rate for eligible socialized-housing borrowers, else the fallback
    pub fn default_annual_interest_rate(
        &self,
        borrower: &Borrower,
        config: &PropertyConfig,
        fallback: Rate,
    ) -> Rate {
        if self.market_segment(config) != MarketSegment::Socialized {
            return fallback;
        }
        let ceiling = if borrower.regional {
            config.socialized_regional_income_ceiling
        } else {
            config.socialized_income_ceiling
        };
        if borrower.gross_monthly_income <= ceiling {
            config.socialized_interest_rate
        } else {
            fallback
        }
    }
}
