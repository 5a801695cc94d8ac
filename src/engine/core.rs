use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DF, HISTORY};
use crate::data::PersistentStore;
use crate::domain::{Language, Outcome, SetupSlot};
use crate::error::VisionError;
use crate::models::{
    AccessState, ActivationError, BurnedCodes, HistoryEntry, HistoryLedger, PerformanceReport,
    Plan, SubscriptionGate,
};
use crate::utils::local_wall_clock;

use super::messages::{JobRequest, JobResult};
use super::reconcile::{self, ActiveAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle,
    Analyzing { token: u64 },
}

/// Top-level tab. Persisted with the UI prefs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    Vision,
    Analytics,
}

/// What the presentation layer should draw, derived from engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// No active plan: plan selection and activation
    Pricing,
    /// Drop zone plus history
    Upload,
    /// A chart is selected, not yet analyzed (or analysis running / failed)
    Preview,
    Dashboard,
    Analytics,
}

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisBlocked {
    #[error("no active plan")]
    NoActivePlan,

    #[error("no chart selected")]
    NoFile,

    #[error("an analysis is already running")]
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The free trial cannot be restarted once it has run out
    #[error("the free trial has already been used")]
    TrialUsed,

    #[error("the gold plan requires an activation code")]
    CodeRequired,

    #[error(transparent)]
    Activation(#[from] ActivationError),
}

/// Owns every piece of client state and applies user actions to it.
///
/// Runs on the UI thread only. The sole asynchronous step (the model call) is
/// handed out as a [`JobRequest`] and comes back through `complete_analysis`;
/// results whose token no longer matches the pending phase are dropped.
pub struct VisionEngine {
    store: PersistentStore,
    ledger: HistoryLedger,
    gate: SubscriptionGate,
    burned: BurnedCodes,
    language: Language,

    selected: Option<SelectedFile>,
    phase: AnalysisPhase,
    active: Option<ActiveAnalysis>,
    error: Option<VisionError>,
    view: ActiveView,

    last_token: u64,
    storage_reported: bool,
}

impl VisionEngine {
    pub fn new(store: PersistentStore, language: Language, now_ms: i64) -> Self {
        let ledger = HistoryLedger::load(&store, HISTORY.capacity);
        let gate = SubscriptionGate::load(&store, now_ms);
        let burned = BurnedCodes::load(&store);

        log::info!(
            "Engine ready: {} past analyses, access {:?}, language {}",
            ledger.len(),
            gate.state(),
            language
        );

        Self {
            store,
            ledger,
            gate,
            burned,
            language,
            selected: None,
            phase: AnalysisPhase::Idle,
            active: None,
            error: None,
            view: ActiveView::default(),
            last_token: 0,
            storage_reported: false,
        }
    }

    // --- Derived view state ---

    pub fn screen(&self) -> Screen {
        if self.gate.active_plan().is_none() {
            return Screen::Pricing;
        }
        match (self.view, &self.active, &self.selected) {
            (ActiveView::Analytics, _, _) => Screen::Analytics,
            (ActiveView::Vision, Some(_), _) => Screen::Dashboard,
            (ActiveView::Vision, None, Some(_)) => Screen::Preview,
            (ActiveView::Vision, None, None) => Screen::Upload,
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, AnalysisPhase::Analyzing { .. })
    }

    pub fn active(&self) -> Option<&ActiveAnalysis> {
        self.active.as_ref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&VisionError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Errors raised outside the engine (unreadable dropped file, bad path)
    pub fn report_error(&mut self, error: VisionError) {
        log::warn!("{}", error);
        self.error = Some(error);
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.ledger.entries()
    }

    pub fn history_capacity(&self) -> usize {
        self.ledger.capacity()
    }

    pub fn access(&self) -> AccessState {
        self.gate.state()
    }

    pub fn active_until(&self) -> Option<i64> {
        self.gate.active_until()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
    }

    /// Writes failed at least once; history lives in memory only.
    pub fn is_storage_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn performance(&self) -> PerformanceReport {
        PerformanceReport::from_history(self.ledger.entries())
    }

    // --- Analysis lifecycle ---

    /// A new chart replaces whatever was on screen and orphans any pending job.
    pub fn select_file(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        let name = name.into();
        let bytes = bytes.into();
        self.invalidate_pending();
        self.active = None;
        self.view = ActiveView::Vision;

        if bytes.is_empty() {
            self.selected = None;
            self.error = Some(VisionError::InputInvalid(format!("{} is empty", name)));
            return;
        }
        if DF.log_selection {
            log::info!("Selected chart {} ({} bytes)", name, bytes.len());
        }
        self.error = None;
        self.selected = Some(SelectedFile { name, bytes });
    }

    /// Marks an analysis as pending and returns the job to run.
    ///
    /// Expiry is re-checked here, so a plan that ran out while the app was open
    /// stops new analyses.
    pub fn begin_analysis(&mut self, now_ms: i64) -> Result<JobRequest, AnalysisBlocked> {
        self.gate.refresh(now_ms);
        if self.gate.active_plan().is_none() {
            return Err(AnalysisBlocked::NoActivePlan);
        }
        if self.is_analyzing() {
            return Err(AnalysisBlocked::AlreadyRunning);
        }
        let Some(file) = &self.selected else {
            return Err(AnalysisBlocked::NoFile);
        };

        let token = self.last_token + 1;
        let request = JobRequest {
            token,
            file_name: file.name.clone(),
            image: Arc::clone(&file.bytes),
            language: self.language,
            local_time: local_wall_clock(now_ms),
        };

        self.last_token = token;
        self.phase = AnalysisPhase::Analyzing { token };
        self.error = None;
        if DF.log_selection {
            log::info!("Analysis #{} started for {}", token, request.file_name);
        }
        Ok(request)
    }

    /// Applies a worker result. Returns false when the result was stale.
    pub fn complete_analysis(&mut self, job: JobResult, now_ms: i64) -> bool {
        if self.phase != (AnalysisPhase::Analyzing { token: job.token }) {
            log::warn!(
                "Discarding stale analysis #{} (phase {:?})",
                job.token,
                self.phase
            );
            return false;
        }
        self.phase = AnalysisPhase::Idle;

        match job.outcome {
            Ok(result) => {
                let id = self.ledger.append(&mut self.store, result.clone(), now_ms);
                if DF.log_selection {
                    log::info!("Analysis #{} stored as {} in {}ms", job.token, id, job.duration_ms);
                }
                self.active = Some(ActiveAnalysis {
                    history_id: Some(id),
                    result,
                });
                self.error = None;
                self.surface_storage_failure();
            }
            Err(e) => {
                log::warn!("Analysis #{} failed ({:?}): {}", job.token, e.kind(), e);
                self.error = Some(e);
            }
        }
        true
    }

    /// Back to the empty upload screen. A pending job becomes stale.
    pub fn reset(&mut self) {
        self.invalidate_pending();
        self.selected = None;
        self.active = None;
        self.error = None;
        self.view = ActiveView::Vision;
    }

    /// Shows a past analysis. Returns false when the id is unknown.
    pub fn select_history(&mut self, id: &str) -> bool {
        let Some(entry) = self.ledger.get(id) else {
            return false;
        };
        let active = ActiveAnalysis {
            history_id: Some(entry.id.clone()),
            result: entry.data.clone(),
        };
        if DF.log_selection {
            log::info!("Selected history entry {}", id);
        }
        self.invalidate_pending();
        self.active = Some(active);
        self.selected = None;
        self.error = None;
        self.view = ActiveView::Vision;
        true
    }

    pub fn record_outcome(&mut self, slot: SetupSlot, outcome: Outcome) -> bool {
        let changed = reconcile::record_outcome(
            self.active.as_mut(),
            &mut self.ledger,
            &mut self.store,
            slot,
            outcome,
        );
        self.surface_storage_failure();
        changed
    }

    // --- Subscription ---

    pub fn choose_plan(&mut self, plan: Plan, now_ms: i64) -> Result<AccessState, PlanError> {
        match plan {
            Plan::Gold => Err(PlanError::CodeRequired),
            Plan::Silver => {
                if self.gate.refresh(now_ms) == AccessState::Expired {
                    return Err(PlanError::TrialUsed);
                }
                let state = self.gate.grant(&mut self.store, Plan::Silver, now_ms);
                self.surface_storage_failure();
                Ok(state)
            }
        }
    }

    /// Burns the code then grants Gold.
    pub fn redeem_activation_code(
        &mut self,
        code: &str,
        now_ms: i64,
    ) -> Result<AccessState, PlanError> {
        let code = self.burned.redeem(&mut self.store, code)?;
        log::info!("Activation code {} accepted", code);
        let state = self.gate.grant(&mut self.store, Plan::Gold, now_ms);
        self.surface_storage_failure();
        Ok(state)
    }

    /// Re-evaluates plan expiry (called on a slow UI tick).
    pub fn refresh_access(&mut self, now_ms: i64) -> AccessState {
        self.gate.refresh(now_ms)
    }

    // --- Internals ---

    fn invalidate_pending(&mut self) {
        if let AnalysisPhase::Analyzing { token } = self.phase {
            if DF.log_selection {
                log::info!("Analysis #{} abandoned", token);
            }
        }
        self.phase = AnalysisPhase::Idle;
    }

    /// Storage degradation is reported once per session; later failures are
    /// only logged by the store. While another error occupies the slot the
    /// notice waits for the next failed write.
    fn surface_storage_failure(&mut self) {
        let Some(failure) = self.store.take_failure() else {
            return;
        };
        if self.storage_reported || self.error.is_some() {
            return;
        }
        self.storage_reported = true;
        self.error = Some(VisionError::StorageUnavailable(failure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::KeyValueStore;
    use crate::domain::{Direction, fixtures};

    const NOW: i64 = 1_760_000_000_000;

    fn subscribed() -> VisionEngine {
        let mut engine = VisionEngine::new(PersistentStore::in_memory(), Language::En, NOW);
        engine.choose_plan(Plan::Silver, NOW).unwrap();
        engine
    }

    fn ok(token: u64, confidence: u8) -> JobResult {
        JobResult {
            token,
            duration_ms: 10,
            outcome: Ok(fixtures::analysis(Direction::Buy, confidence)),
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
        fn write(&mut self, key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded writing {}", key)
        }
    }

    #[test]
    fn pricing_until_a_plan_is_chosen() {
        let mut engine = VisionEngine::new(PersistentStore::in_memory(), Language::En, NOW);
        assert_eq!(engine.screen(), Screen::Pricing);
        engine.select_file("chart.png", vec![1, 2, 3]);
        assert!(matches!(
            engine.begin_analysis(NOW),
            Err(AnalysisBlocked::NoActivePlan)
        ));
    }

    #[test]
    fn begin_requires_a_file_and_no_pending_job() {
        let mut engine = subscribed();
        assert_eq!(engine.screen(), Screen::Upload);
        assert!(matches!(engine.begin_analysis(NOW), Err(AnalysisBlocked::NoFile)));

        engine.select_file("chart.png", vec![1, 2, 3]);
        assert_eq!(engine.screen(), Screen::Preview);
        let job = engine.begin_analysis(NOW).unwrap();
        assert_eq!(job.file_name, "chart.png");
        assert_eq!(job.local_time, local_wall_clock(NOW));
        assert!(matches!(engine.begin_analysis(NOW), Err(AnalysisBlocked::AlreadyRunning)));
    }

    #[test]
    fn success_appends_and_activates() {
        let mut engine = subscribed();
        engine.select_file("chart.png", vec![1, 2, 3]);
        let job = engine.begin_analysis(NOW).unwrap();

        assert!(engine.complete_analysis(ok(job.token, 72), NOW));
        assert_eq!(engine.screen(), Screen::Dashboard);
        let active = engine.active().unwrap();
        assert_eq!(active.history_id.as_deref(), Some(engine.history()[0].id.as_str()));
        assert_eq!(engine.history()[0].data.market_bias.confidence, 72);
    }

    #[test]
    fn reset_discards_the_late_result() {
        let mut engine = subscribed();
        engine.select_file("chart.png", vec![1, 2, 3]);
        let job = engine.begin_analysis(NOW).unwrap();
        engine.reset();

        assert!(!engine.complete_analysis(ok(job.token, 72), NOW));
        assert!(engine.history().is_empty());
        assert!(engine.active().is_none());
        assert_eq!(engine.screen(), Screen::Upload);
    }

    #[test]
    fn newer_file_discards_older_job() {
        let mut engine = subscribed();
        engine.select_file("first.png", vec![1]);
        let first = engine.begin_analysis(NOW).unwrap();
        engine.select_file("second.png", vec![2]);
        let second = engine.begin_analysis(NOW).unwrap();
        assert!(second.token > first.token);

        assert!(!engine.complete_analysis(ok(first.token, 10), NOW));
        assert!(engine.is_analyzing());
        assert!(engine.complete_analysis(ok(second.token, 20), NOW));
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].data.market_bias.confidence, 20);
    }

    #[test]
    fn failure_keeps_the_file_for_retry() {
        let mut engine = subscribed();
        engine.select_file("chart.png", vec![1, 2, 3]);
        let job = engine.begin_analysis(NOW).unwrap();
        engine.complete_analysis(
            JobResult {
                token: job.token,
                duration_ms: 5,
                outcome: Err(VisionError::UpstreamFailure("429 quota".into())),
            },
            NOW,
        );

        assert_eq!(engine.screen(), Screen::Preview);
        assert!(matches!(engine.error(), Some(VisionError::UpstreamFailure(_))));
        assert!(engine.begin_analysis(NOW).is_ok());
        assert!(engine.error().is_none());
    }

    #[test]
    fn empty_file_is_input_invalid() {
        let mut engine = subscribed();
        engine.select_file("empty.png", Vec::<u8>::new());
        assert!(engine.selected_file().is_none());
        assert_eq!(engine.error().map(VisionError::kind), Some(crate::error::ErrorKind::InputInvalid));
    }

    #[test]
    fn history_selection_then_outcome_stays_consistent() {
        let mut engine = subscribed();
        engine.select_file("chart.png", vec![1]);
        let job = engine.begin_analysis(NOW).unwrap();
        engine.complete_analysis(ok(job.token, 60), NOW);
        let id = engine.history()[0].id.clone();

        engine.reset();
        assert!(engine.select_history(&id));
        assert!(engine.record_outcome(SetupSlot::A, Outcome::Win));
        assert_eq!(engine.active().unwrap().result.setups.a.user_result, Outcome::Win);
        assert_eq!(engine.history()[0].data.setups.a.user_result, Outcome::Win);
        assert!(!engine.select_history("nope"));
    }

    #[test]
    fn outcome_without_active_analysis_is_ignored() {
        let mut engine = subscribed();
        assert!(!engine.record_outcome(SetupSlot::B, Outcome::Loss));
    }

    #[test]
    fn expired_trial_cannot_be_restarted() {
        let mut engine = subscribed();
        let later = NOW + 31 * crate::utils::TimeUtils::MS_IN_D;
        assert_eq!(engine.refresh_access(later), AccessState::Expired);
        assert_eq!(engine.screen(), Screen::Pricing);
        assert_eq!(engine.choose_plan(Plan::Silver, later), Err(PlanError::TrialUsed));
        assert_eq!(engine.choose_plan(Plan::Gold, later), Err(PlanError::CodeRequired));
        assert_eq!(
            engine.redeem_activation_code("gold-abc-123", later),
            Ok(AccessState::Active(Plan::Gold))
        );
        assert_eq!(
            engine.redeem_activation_code("GOLD-ABC-123", later),
            Err(PlanError::Activation(ActivationError::AlreadyUsed))
        );
    }

    #[test]
    fn storage_failure_is_reported_once() {
        let mut engine =
            VisionEngine::new(PersistentStore::new(Box::new(ReadOnlyStore)), Language::Fr, NOW);
        assert_eq!(engine.choose_plan(Plan::Silver, NOW), Ok(AccessState::Active(Plan::Silver)));
        assert!(matches!(engine.error(), Some(VisionError::StorageUnavailable(_))));
        assert!(engine.is_storage_degraded());

        engine.dismiss_error();
        engine.select_file("chart.png", vec![1]);
        let job = engine.begin_analysis(NOW).unwrap();
        engine.complete_analysis(ok(job.token, 50), NOW);
        assert!(engine.error().is_none());
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn storage_notice_waits_for_a_free_error_slot() {
        let mut engine =
            VisionEngine::new(PersistentStore::new(Box::new(ReadOnlyStore)), Language::En, NOW);
        engine.select_file("empty.png", Vec::<u8>::new());
        assert!(matches!(engine.error(), Some(VisionError::InputInvalid(_))));

        engine.choose_plan(Plan::Silver, NOW).unwrap();
        assert!(matches!(engine.error(), Some(VisionError::InputInvalid(_))));

        engine.dismiss_error();
        engine.choose_plan(Plan::Silver, NOW).unwrap();
        assert!(matches!(engine.error(), Some(VisionError::StorageUnavailable(_))));

        engine.dismiss_error();
        engine.choose_plan(Plan::Silver, NOW).unwrap();
        assert!(engine.error().is_none());
    }

    #[test]
    fn analytics_view_and_reset() {
        let mut engine = subscribed();
        engine.set_view(ActiveView::Analytics);
        assert_eq!(engine.screen(), Screen::Analytics);
        assert!(engine.performance().is_empty());
        engine.reset();
        assert_eq!(engine.screen(), Screen::Upload);
    }
}
