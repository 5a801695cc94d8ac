use crate::{
    config::DF,
    data::PersistentStore,
    domain::{AnalysisResult, Outcome, SetupSlot},
    models::HistoryLedger,
};

/// The analysis currently on screen, with the history entry it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAnalysis {
    /// `None` only if the entry could not be recorded
    pub history_id: Option<String>,
    pub result: AnalysisResult,
}

/// Applies one user verdict to the active analysis and to its history entry.
///
/// Both sides receive the same transformation, so the dashboard and the stored
/// entry cannot disagree. Without an active analysis or a history id this does
/// nothing. If the entry was evicted meanwhile, only the view changes.
pub fn record_outcome(
    active: Option<&mut ActiveAnalysis>,
    ledger: &mut HistoryLedger,
    store: &mut PersistentStore,
    slot: SetupSlot,
    outcome: Outcome,
) -> bool {
    let Some(active) = active else {
        return false;
    };
    let Some(id) = active.history_id.as_deref() else {
        return false;
    };

    let next = active.result.with_outcome(slot, outcome);
    let stored = ledger.update_by_id(store, id, |_| next.clone());
    if DF.log_history {
        log::info!(
            "Outcome {} on {} for {} (history updated: {})",
            outcome,
            slot.key(),
            id,
            stored
        );
    }
    active.result = next;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, fixtures};

    fn seeded() -> (PersistentStore, HistoryLedger, ActiveAnalysis) {
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(5);
        let result = fixtures::analysis(Direction::Buy, 80);
        let id = ledger.append(&mut store, result.clone(), 1_000);
        (
            store,
            ledger,
            ActiveAnalysis {
                history_id: Some(id),
                result,
            },
        )
    }

    #[test]
    fn view_and_history_agree_after_update() {
        let (mut store, mut ledger, mut active) = seeded();
        assert!(record_outcome(
            Some(&mut active),
            &mut ledger,
            &mut store,
            SetupSlot::B,
            Outcome::Be
        ));

        let id = active.history_id.clone().unwrap();
        assert_eq!(active.result.setups.b.user_result, Outcome::Be);
        assert_eq!(ledger.get(&id).unwrap().data, active.result);

        let reloaded = HistoryLedger::load(&store, 5);
        assert_eq!(reloaded.get(&id).unwrap().data, active.result);
    }

    #[test]
    fn nothing_active_is_a_no_op() {
        let (mut store, mut ledger, _) = seeded();
        let before = ledger.entries().to_vec();
        assert!(!record_outcome(None, &mut ledger, &mut store, SetupSlot::A, Outcome::Win));
        assert_eq!(ledger.entries(), &before[..]);
    }

    #[test]
    fn missing_history_id_is_a_no_op() {
        let (mut store, mut ledger, mut active) = seeded();
        active.history_id = None;
        let before = active.clone();
        assert!(!record_outcome(
            Some(&mut active),
            &mut ledger,
            &mut store,
            SetupSlot::A,
            Outcome::Win
        ));
        assert_eq!(active, before);
    }

    #[test]
    fn evicted_entry_still_updates_the_view() {
        let (mut store, mut ledger, mut active) = seeded();
        active.history_id = Some("evicted".to_string());
        let before = ledger.entries().to_vec();
        assert!(record_outcome(
            Some(&mut active),
            &mut ledger,
            &mut store,
            SetupSlot::A,
            Outcome::Loss
        ));
        assert_eq!(active.result.setups.a.user_result, Outcome::Loss);
        assert_eq!(ledger.entries(), &before[..]);
    }
}
