use {
    crate::{
        config::{DF, PERSISTENCE, SUBSCRIPTION},
        data::PersistentStore,
    },
    serde::{Deserialize, Serialize},
    std::fmt,
    thiserror::Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free trial
    Silver,
    /// Paid, unlocked with an activation code
    Gold,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Silver => write!(f, "SILVER"),
            Plan::Gold => write!(f, "GOLD"),
        }
    }
}

/// Stored under `subscription_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub plan: Option<Plan>,
    pub start_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
}

impl SubscriptionRecord {
    /// Records written without an explicit expiry run for one plan duration.
    pub fn effective_expiry(&self) -> i64 {
        self.expiry_date
            .unwrap_or_else(|| self.start_date.saturating_add(SUBSCRIPTION.plan_duration_ms))
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.effective_expiry()
    }
}

/// Access decision shown to the rest of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    NoPlan,
    Active(Plan),
    Expired,
}

/// Derives access from the persisted record.
///
/// Expiry is evaluated lazily, on load and on `refresh`; there is no timer. An
/// expired record stays on disk but is never trusted again.
#[derive(Debug, Clone)]
pub struct SubscriptionGate {
    record: Option<SubscriptionRecord>,
    state: AccessState,
}

impl SubscriptionGate {
    pub fn load(store: &PersistentStore, now_ms: i64) -> Self {
        let record = store.load::<SubscriptionRecord>(PERSISTENCE.keys.subscription);
        let mut gate = Self {
            record,
            state: AccessState::NoPlan,
        };
        gate.refresh(now_ms);
        gate
    }

    /// Re-evaluates the stored record against `now_ms`.
    pub fn refresh(&mut self, now_ms: i64) -> AccessState {
        self.state = match &self.record {
            None => AccessState::NoPlan,
            Some(SubscriptionRecord { plan: None, .. }) => AccessState::NoPlan,
            Some(record) if record.is_expired_at(now_ms) => AccessState::Expired,
            Some(SubscriptionRecord {
                plan: Some(plan), ..
            }) => AccessState::Active(*plan),
        };
        if DF.log_subscription {
            log::info!("Subscription state: {:?}", self.state);
        }
        self.state
    }

    /// Starts `plan` at `now_ms` for one plan duration and persists it.
    pub fn grant(&mut self, store: &mut PersistentStore, plan: Plan, now_ms: i64) -> AccessState {
        let record = SubscriptionRecord {
            plan: Some(plan),
            start_date: now_ms,
            expiry_date: Some(now_ms.saturating_add(SUBSCRIPTION.plan_duration_ms)),
        };
        store.save(PERSISTENCE.keys.subscription, &record);
        self.record = Some(record);
        self.state = AccessState::Active(plan);
        if DF.log_subscription {
            log::info!("Granted {} plan", plan);
        }
        self.state
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn active_plan(&self) -> Option<Plan> {
        match self.state {
            AccessState::Active(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.state == AccessState::Expired
    }

    /// Expiry of the currently active plan
    pub fn active_until(&self) -> Option<i64> {
        self.active_plan()
            .and(self.record.as_ref())
            .map(SubscriptionRecord::effective_expiry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActivationError {
    #[error("activation code format is invalid")]
    InvalidFormat,

    #[error("activation code was already used on this device")]
    AlreadyUsed,
}

/// Activation codes consumed on this device, stored under `burned_codes`.
///
/// Client-side only: anyone with access to local storage can clear it. It
/// prevents casual reuse, nothing more.
#[derive(Debug, Clone, Default)]
pub struct BurnedCodes {
    codes: Vec<String>,
}

impl BurnedCodes {
    pub fn load(store: &PersistentStore) -> Self {
        Self {
            codes: store
                .load::<Vec<String>>(PERSISTENCE.keys.burned_codes)
                .unwrap_or_default(),
        }
    }

    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|burned| burned == code)
    }

    /// Validates the code format and burns it. The set only ever grows.
    pub fn redeem(&mut self, store: &mut PersistentStore, code: &str) -> Result<String, ActivationError> {
        let code = Self::normalize(code);
        let well_formed = code.starts_with(SUBSCRIPTION.activation_prefix)
            && code.chars().count() >= SUBSCRIPTION.activation_min_len;
        if !well_formed {
            return Err(ActivationError::InvalidFormat);
        }
        if self.contains(&code) {
            return Err(ActivationError::AlreadyUsed);
        }
        self.codes.push(code.clone());
        store.save(PERSISTENCE.keys.burned_codes, &self.codes);
        Ok(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    const NOW: i64 = 1_760_000_000_000;

    fn store_with(record: &SubscriptionRecord) -> PersistentStore {
        let mut store = PersistentStore::in_memory();
        store.save(PERSISTENCE.keys.subscription, record);
        store
    }

    fn silver_started(days_ago: i64) -> SubscriptionRecord {
        SubscriptionRecord {
            plan: Some(Plan::Silver),
            start_date: NOW - days_ago * TimeUtils::MS_IN_D,
            expiry_date: None,
        }
    }

    #[test]
    fn far_future_start_date_loads_as_active() {
        let mut store = PersistentStore::in_memory();
        store.save(
            PERSISTENCE.keys.subscription,
            &serde_json::json!({ "plan": "silver", "startDate": i64::MAX }),
        );
        let gate = SubscriptionGate::load(&store, NOW);
        assert_eq!(gate.state(), AccessState::Active(Plan::Silver));
        assert_eq!(gate.active_until(), Some(i64::MAX));

        let mut gate = gate;
        gate.grant(&mut store, Plan::Gold, i64::MAX - 1);
        assert_eq!(gate.active_until(), Some(i64::MAX));
    }

    #[test]
    fn empty_store_has_no_plan() {
        let gate = SubscriptionGate::load(&PersistentStore::in_memory(), NOW);
        assert_eq!(gate.state(), AccessState::NoPlan);
    }

    #[test]
    fn silver_expires_after_thirty_days() {
        let gate = SubscriptionGate::load(&store_with(&silver_started(31)), NOW);
        assert_eq!(gate.state(), AccessState::Expired);
        assert_eq!(gate.active_plan(), None);

        let gate = SubscriptionGate::load(&store_with(&silver_started(29)), NOW);
        assert_eq!(gate.state(), AccessState::Active(Plan::Silver));
    }

    #[test]
    fn expired_record_stays_on_disk() {
        let store = store_with(&silver_started(45));
        let _ = SubscriptionGate::load(&store, NOW);
        assert_eq!(
            store.load::<SubscriptionRecord>(PERSISTENCE.keys.subscription),
            Some(silver_started(45))
        );
    }

    #[test]
    fn gold_expiry_is_enforced() {
        let record = SubscriptionRecord {
            plan: Some(Plan::Gold),
            start_date: NOW - 40 * TimeUtils::MS_IN_D,
            expiry_date: Some(NOW - TimeUtils::MS_IN_D),
        };
        let gate = SubscriptionGate::load(&store_with(&record), NOW);
        assert_eq!(gate.state(), AccessState::Expired);
    }

    #[test]
    fn grant_persists_and_clears_expired() {
        let mut store = store_with(&silver_started(31));
        let mut gate = SubscriptionGate::load(&store, NOW);
        assert!(gate.is_expired());

        assert_eq!(gate.grant(&mut store, Plan::Gold, NOW), AccessState::Active(Plan::Gold));
        assert_eq!(gate.active_until(), Some(NOW + 30 * TimeUtils::MS_IN_D));

        let reloaded = SubscriptionGate::load(&store, NOW + TimeUtils::MS_IN_D);
        assert_eq!(reloaded.state(), AccessState::Active(Plan::Gold));
        let later = SubscriptionGate::load(&store, NOW + 31 * TimeUtils::MS_IN_D);
        assert_eq!(later.state(), AccessState::Expired);
    }

    #[test]
    fn refresh_is_the_only_expiry_check() {
        let mut store = PersistentStore::in_memory();
        let mut gate = SubscriptionGate::load(&store, NOW);
        gate.grant(&mut store, Plan::Silver, NOW);
        let much_later = NOW + 60 * TimeUtils::MS_IN_D;
        assert_eq!(gate.state(), AccessState::Active(Plan::Silver));
        assert_eq!(gate.refresh(much_later), AccessState::Expired);
    }

    #[test]
    fn record_uses_original_wire_names() {
        let json = serde_json::to_string(&SubscriptionRecord {
            plan: Some(Plan::Silver),
            start_date: 5,
            expiry_date: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"plan":"silver","startDate":5}"#);

        let parsed: SubscriptionRecord =
            serde_json::from_str(r#"{"plan":null,"startDate":1,"expiryDate":2}"#).unwrap();
        assert_eq!(parsed.plan, None);
        assert_eq!(parsed.expiry_date, Some(2));
    }

    #[test]
    fn codes_are_normalized_validated_and_burned() {
        let mut store = PersistentStore::in_memory();
        let mut burned = BurnedCodes::load(&store);

        assert_eq!(burned.redeem(&mut store, "silver-123"), Err(ActivationError::InvalidFormat));
        assert_eq!(burned.redeem(&mut store, "GOLD-1"), Err(ActivationError::InvalidFormat));
        assert_eq!(burned.redeem(&mut store, "  gold-x-123 ").as_deref(), Ok("GOLD-X-123"));
        assert_eq!(burned.redeem(&mut store, "GOLD-X-123"), Err(ActivationError::AlreadyUsed));

        let reloaded = BurnedCodes::load(&store);
        assert!(reloaded.contains("GOLD-X-123"));
        assert_eq!(reloaded.len(), 1);
    }
}
