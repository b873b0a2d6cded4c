use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::mortgage::Mortgage;
use crate::types::MortgageId;

/// flat record of every computed figure of a mortgage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageData {
    pub mortgage_id: MortgageId,
    pub gross_monthly_income: Money,
    pub total_contract_price: Money,
    pub percent_down_payment: Rate,
    /// months
    pub dp_term: u32,
    pub balance_down_payment: Money,
    pub dp_amortization: Money,
    pub bp_interest_rate: Rate,
    pub percent_mf: Rate,
    /// years
    pub bp_term: u32,
    pub bp_term_in_months: u32,
    pub percent_balance_payment: Rate,
    pub miscellaneous_fees: Money,
    pub partial_miscellaneous_fees: Money,
    pub down_payment: Money,
    pub cash_out: Money,
    pub loan_amount: Money,
    pub loan_amortization: Money,
    pub add_on_fees_to_payment: Money,
    pub income_requirement_multiplier: Rate,
    pub joint_disposable_monthly_income: Money,
    pub income_requirement: Money,
    pub present_value_from_monthly_disposable_income: Money,
    pub loan_difference: Money,
    pub balance_payment: Money,
    pub loanable_value: Money,
    pub promotional: bool,
}

impl MortgageData {
    pub fn from_mortgage(mortgage: &Mortgage) -> Result<Self> {
        let loan = mortgage.get_loan()?;
        let balance_down_payment = mortgage.get_balance_down_payment();
        let percent_down_payment = mortgage.get_percent_down_payment();
        let bp_term = mortgage.get_balance_payment_term();

        Ok(Self {
            mortgage_id: mortgage.id,
            gross_monthly_income: mortgage.borrower().gross_monthly_income,
            total_contract_price: mortgage.get_contract_price(),
            percent_down_payment,
            dp_term: mortgage.get_down_payment_term(),
            balance_down_payment: balance_down_payment.principal,
            dp_amortization: balance_down_payment.monthly_amortization()?,
            bp_interest_rate: mortgage.get_interest_rate(),
            percent_mf: mortgage.get_percent_miscellaneous_fees(),
            bp_term,
            bp_term_in_months: bp_term * 12,
            percent_balance_payment: percent_down_payment.complement(),
            miscellaneous_fees: mortgage.get_miscellaneous_fees(),
            partial_miscellaneous_fees: mortgage.get_partial_miscellaneous_fees()?,
            down_payment: mortgage.get_down_payment().principal,
            cash_out: mortgage.get_total_cash_out(None),
            loan_amount: loan.principal,
            loan_amortization: loan.monthly_amortization()?,
            add_on_fees_to_payment: loan.total_add_on_fees(),
            income_requirement_multiplier: mortgage.get_income_requirement_multiplier(),
            joint_disposable_monthly_income: mortgage.get_joint_borrower_disposable_monthly_income()?,
            income_requirement: loan.income_requirement()?,
            present_value_from_monthly_disposable_income: mortgage
                .get_present_value_from_monthly_disposable_income_payments()?
                .discounted_value()?,
            loan_difference: mortgage.get_loan_difference()?,
            balance_payment: mortgage.get_balance_payment(),
            loanable_value: mortgage.get_loanable_value(),
            promotional: mortgage.is_promotional(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
