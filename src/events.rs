use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::MortgageId;

/// change signals raised by the mortgage setters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MortgageEvent {
    ContractPriceUpdated {
        mortgage_id: MortgageId,
        contract_price: Money,
    },
    PercentDownPaymentUpdated {
        mortgage_id: MortgageId,
        percent_down_payment: Rate,
    },
    DownPaymentTermUpdated {
        mortgage_id: MortgageId,
        months: u32,
    },
    BalancePaymentTermUpdated {
        mortgage_id: MortgageId,
        years: u32,
    },
    DownPaymentUpdated {
        mortgage_id: MortgageId,
        principal: Money,
        months: u32,
    },
    PercentMiscellaneousFeesUpdated {
        mortgage_id: MortgageId,
        percent_miscellaneous_fees: Rate,
    },
    MiscellaneousFeesUpdated {
        mortgage_id: MortgageId,
        miscellaneous_fees: Money,
    },
    LowCashOutUpdated {
        mortgage_id: MortgageId,
        low_cash_out: Money,
    },
}

impl MortgageEvent {
    pub fn mortgage_id(&self) -> MortgageId {
        match self {
            MortgageEvent::ContractPriceUpdated { mortgage_id, .. }
            | MortgageEvent::PercentDownPaymentUpdated { mortgage_id, .. }
            | MortgageEvent::DownPaymentTermUpdated { mortgage_id, .. }
            | MortgageEvent::BalancePaymentTermUpdated { mortgage_id, .. }
            | MortgageEvent::DownPaymentUpdated { mortgage_id, .. }
            | MortgageEvent::PercentMiscellaneousFeesUpdated { mortgage_id, .. }
            | MortgageEvent::MiscellaneousFeesUpdated { mortgage_id, .. }
            | MortgageEvent::LowCashOutUpdated { mortgage_id, .. } => *mortgage_id,
        }
    }

    /// short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            MortgageEvent::ContractPriceUpdated { .. } => "contract_price_updated",
            MortgageEvent::PercentDownPaymentUpdated { .. } => "percent_down_payment_updated",
            MortgageEvent::DownPaymentTermUpdated { .. } => "down_payment_term_updated",
            MortgageEvent::BalancePaymentTermUpdated { .. } => "balance_payment_term_updated",
            MortgageEvent::DownPaymentUpdated { .. } => "down_payment_updated",
            MortgageEvent::PercentMiscellaneousFeesUpdated { .. } => {
                "percent_miscellaneous_fees_updated"
            }
            MortgageEvent::MiscellaneousFeesUpdated { .. } => "miscellaneous_fees_updated",
            MortgageEvent::LowCashOutUpdated { .. } => "low_cash_out_updated",
        }
    }
}

/// journal of the signals raised during operations, kept until drained
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<MortgageEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: MortgageEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<MortgageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[MortgageEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_store_drains() {
        let id = Uuid::new_v4();
        let mut store = EventStore::new();
        store.emit(MortgageEvent::DownPaymentTermUpdated { mortgage_id: id, months: 12 });
        store.emit(MortgageEvent::BalancePaymentTermUpdated { mortgage_id: id, years: 20 });
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.events()[0].mortgage_id(), id);
        assert_eq!(store.events()[1].name(), "balance_payment_term_updated");

        let taken = store.take_events();
        assert_eq!(taken.len(), 2);
        assert!(store.events().is_empty());
    }
}
