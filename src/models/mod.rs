mod ledger;
mod performance;
mod subscription;

pub use {
    ledger::{HistoryEntry, HistoryLedger},
    performance::{MonthlyStats, OutcomeTally, PerformanceReport},
    subscription::{
        AccessState, ActivationError, BurnedCodes, Plan, SubscriptionGate, SubscriptionRecord,
    },
};
