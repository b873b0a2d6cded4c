use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::decimal::Money;
use crate::types::{Account, CashOutKind};

/// named monetary item the borrower pays (or is credited) outside the loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOut {
    pub name: String,
    pub amount: Money,
    pub kind: CashOutKind,
    pub account: Account,
}

impl CashOut {
    pub fn new(name: impl Into<String>, amount: Money, kind: CashOutKind, account: Account) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            account,
        }
    }

    /// add-on booked against the up-front cash out
    pub fn add_on(name: impl Into<String>, amount: Money) -> Self {
        Self::new(name, amount, CashOutKind::AddOn, Account::CashOut)
    }

    /// deductible booked against the up-front cash out
    pub fn deductible(name: impl Into<String>, amount: Money) -> Self {
        Self::new(name, amount, CashOutKind::Deductible, Account::CashOut)
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = account;
        self
    }

    pub fn is_deductible(&self) -> bool {
        self.kind == CashOutKind::Deductible
    }

    /// signed effect on the cash requirement
    pub fn contribution(&self) -> Money {
        match self.kind {
            CashOutKind::AddOn => self.amount,
            CashOutKind::Deductible => -self.amount,
        }
    }

    fn same_slot(&self, name: &str, account: Account) -> bool {
        self.name == name && self.account == account
    }
}

/// insertion-ordered cash-out items owned by one mortgage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashOutLedger {
    items: Vec<CashOut>,
}

impl CashOutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CashOut) {
        trace!(name = %item.name, amount = %item.amount, "cash out added");
        self.items.push(item);
    }

    /// replace the item with the same name and account in place, append otherwise
    pub fn upsert(&mut self, item: CashOut) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.same_slot(&item.name, item.account))
        {
            Some(existing) => {
                trace!(name = %item.name, amount = %item.amount, "cash out replaced");
                *existing = item;
            }
            None => self.add(item),
        }
    }

    /// drop every item with this name and account, returning how many went
    pub fn remove(&mut self, name: &str, account: Account) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.same_slot(name, account));
        before - self.items.len()
    }

    /// first item with this name, any account
    pub fn find(&self, name: &str) -> Option<&CashOut> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CashOut> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// sum of item amounts, optionally restricted to one account
    pub fn total(&self, account: Option<Account>) -> Money {
        self.items
            .iter()
            .filter(|item| account.map_or(true, |a| item.account == a))
            .map(|item| item.amount)
            .sum()
    }

    pub fn total_for_account(&self, account: Account) -> Money {
        self.total(Some(account))
    }

    pub fn total_deductible(&self) -> Money {
        self.items
            .iter()
            .filter(|item| item.is_deductible())
            .map(|item| item.amount)
            .sum()
    }

    /// add-ons minus deductibles
    pub fn net_total(&self) -> Money {
        self.items.iter().map(CashOut::contribution).sum()
    }
}

impl<'a> IntoIterator for &'a CashOutLedger {
    type Item = &'a CashOut;
    type IntoIter = std::slice::Iter<'a, CashOut>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
